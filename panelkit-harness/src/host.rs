use panelkit::{Color, Host, Rect, Size};

/// A host with a settable viewport and a clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    viewport: Rect,
    screen: Size,
    now: u64,
    fullscreen_toggles: usize,
    background: Option<Color>,
    fonts: Vec<(String, u32)>,
}

impl HeadlessHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport: Rect::from_size(viewport),
            screen: viewport,
            now: 0,
            fullscreen_toggles: 0,
            background: None,
            fonts: Vec::new(),
        }
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }

    /// Move the clock forward.
    pub fn advance(&mut self, millis: u64) {
        self.now += millis;
    }

    pub fn fullscreen_toggles(&self) -> usize {
        self.fullscreen_toggles
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Fonts warmed so far, in order.
    pub fn fonts(&self) -> &[(String, u32)] {
        &self.fonts
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn elapsed_millis(&self) -> u64 {
        self.now
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen_toggles += 1;
    }

    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn warm_font(&mut self, family: &str, size: u32) {
        self.fonts.push((family.to_owned(), size));
    }
}
