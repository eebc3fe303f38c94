//! Seams to the windowing/rendering runtime hosting the GUI.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::arguments::{Key, MouseButton};
use crate::primitives::{Color, Point, Rect, Size};

/// Services the controller consumes from the host runtime.
pub trait Host {
    /// Current drawable viewport in window space.
    fn viewport(&self) -> Rect;

    fn screen_size(&self) -> Size;

    /// Monotonic clock in milliseconds.
    fn elapsed_millis(&self) -> u64;

    /// Toggle OS-level fullscreen.
    fn toggle_fullscreen(&mut self);

    fn set_background(&mut self, color: Color);

    /// Pre-load a font so first use does not stall a frame.
    fn warm_font(&mut self, family: &str, size: u32);
}

/// Raw input delivered by the host's event loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    MouseMoved {
        position: Point,
    },
    MousePressed {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    MouseReleased {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    MouseDragged {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    KeyPressed {
        key: Key,
    },
    FilesDragged {
        position: Point,
        files: Vec<PathBuf>,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_events_use_tagged_json() {
        let json = r#"[
            {"type": "mouse_moved", "position": {"x": 1.0, "y": 2.0}},
            {"type": "mouse_pressed", "position": {"x": 1.0, "y": 2.0}},
            {"type": "key_pressed", "key": {"Character": "m"}},
            {"type": "window_resized", "width": 640.0, "height": 480.0}
        ]"#;
        let events: Vec<InputEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(
            events[1],
            InputEvent::MousePressed {
                position: Point::new(1.0, 2.0),
                button: MouseButton::Left,
            }
        );
        assert_eq!(
            events[2],
            InputEvent::KeyPressed {
                key: Key::Character('m')
            }
        );
    }
}
