//! JSON event scripts replayed into a controller.
//!
//! ```json
//! {
//!   "viewport": { "width": 800.0, "height": 600.0 },
//!   "steps": [
//!     { "step": "input", "event": { "type": "mouse_moved", "position": { "x": 100.0, "y": 100.0 } } },
//!     { "step": "advance", "millis": 150 },
//!     { "step": "update" },
//!     { "step": "draw" }
//!   ]
//! }
//! ```

use std::path::Path;

use panelkit::{Controller, InputEvent, Rect, Size, Widget};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::canvas::RecordingCanvas;
use crate::host::HeadlessHost;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Deliver one raw input event.
    Input { event: InputEvent },
    /// Run one update pass.
    Update,
    /// Run one draw pass.
    Draw,
    /// Move the host clock forward.
    Advance { millis: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub viewport: Size,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Final controller state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: usize,
    pub frames: usize,
    pub draw_commands: usize,
    pub current_panel: Option<u64>,
    pub current_panel_bounds: Rect,
    pub mouse_owner: Option<u64>,
    pub maximised: bool,
    pub chrome_visible: bool,
    pub fullscreen_toggles: usize,
}

/// Replay `script` into `controller`, drawing into `canvas`.
pub fn run_script(
    controller: &mut Controller<HeadlessHost>,
    script: &Script,
    canvas: &mut RecordingCanvas,
) -> ReplayReport {
    info!(steps = script.steps.len(), "replaying script");
    let mut frames = 0;

    for step in &script.steps {
        debug!(?step, "step");
        match step {
            Step::Input { event } => {
                if let InputEvent::WindowResized { width, height } = event {
                    controller
                        .host_mut()
                        .set_viewport(Rect::new(0.0, 0.0, *width, *height));
                }
                controller.handle_input(event.clone());
            }
            Step::Update => controller.update(),
            Step::Draw => {
                controller.draw(canvas);
                frames += 1;
            }
            Step::Advance { millis } => controller.host_mut().advance(*millis),
        }
    }

    ReplayReport {
        steps: script.steps.len(),
        frames,
        draw_commands: canvas.primitive_count(),
        current_panel: controller
            .current_panel()
            .map(|panel| panel.borrow().id().raw()),
        current_panel_bounds: controller.current_panel_bounds(),
        mouse_owner: controller.mouse_owner().map(|id| id.raw()),
        maximised: controller.is_maximised(),
        chrome_visible: controller.is_chrome_visible(),
        fullscreen_toggles: controller.host().fullscreen_toggles(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit::{Key, Point};

    #[test]
    fn parses_documented_format() {
        let script = Script::from_json(
            r#"{
                "viewport": { "width": 800.0, "height": 600.0 },
                "steps": [
                    { "step": "input", "event": { "type": "mouse_moved", "position": { "x": 100.0, "y": 100.0 } } },
                    { "step": "input", "event": { "type": "key_pressed", "key": { "Character": "m" } } },
                    { "step": "advance", "millis": 150 },
                    { "step": "update" },
                    { "step": "draw" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.viewport, Size::new(800.0, 600.0));
        assert_eq!(
            script.steps[0],
            Step::Input {
                event: InputEvent::MouseMoved {
                    position: Point::new(100.0, 100.0)
                }
            }
        );
        assert_eq!(
            script.steps[1],
            Step::Input {
                event: InputEvent::KeyPressed {
                    key: Key::Character('m')
                }
            }
        );
        assert_eq!(script.steps[2], Step::Advance { millis: 150 });
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Script::from_json("{ \"viewport\": 3 }"),
            Err(ScriptError::Json(_))
        ));
        assert!(matches!(
            Script::load("/nonexistent/panelkit/script.json"),
            Err(ScriptError::Io(_))
        ));
    }
}
