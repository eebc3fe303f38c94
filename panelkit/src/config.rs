//! Configuration.
//!
//! Gesture thresholds and scroll geometry are compile-time constants. The
//! few settings applied once at `Controller::init` live in
//! [`ControllerConfig`].

use crate::primitives::Color;

/// Two presses closer together in time than this form a double click.
pub const DOUBLE_CLICK_TIME_THRESHOLD_MS: u64 = 300;

/// Two presses closer together in space than this form a double click.
pub const DOUBLE_CLICK_SPACE_THRESHOLD_PX: f32 = 10.0;

/// Width of the scrollbar gutter along the right edge of a `Scroll`.
pub const SCROLL_AREA_WIDTH: f32 = 20.0;

/// Stroke width of the drawn scrollbar.
pub const SCROLL_BAR_WIDTH: f32 = 5.0;

/// Vertical gap between stacked scroll elements.
pub const SCROLL_SPACING: f32 = 10.0;

/// Per-frame damping applied to out-of-range scroll positions.
pub const SCROLL_DECAY: f32 = 0.9;

/// Toggles OS-level fullscreen. Handled even before init.
pub const FULLSCREEN_KEY: char = 'f';

/// Toggles maximise of the current panel. Handled even before init.
pub const MAXIMISE_KEY: char = 'm';

/// Settings applied when the controller is initialised.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Window clear color.
    pub background: Color,

    /// Font family warmed in the host's asset cache.
    pub font_family: String,

    /// Sizes of `font_family` to warm at init.
    pub font_sizes: Vec<u32>,

    /// Fill drawn over the panel under the cursor.
    pub highlight: Color,

    /// Whether chrome is visible straight after init.
    pub chrome_visible: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            background: Color::grey8(30),
            font_family: String::from("panelkit::sans"),
            font_sizes: vec![12, 14, 18, 24],
            highlight: Color::rgba8(40, 40, 40, 100),
            chrome_visible: true,
        }
    }
}
