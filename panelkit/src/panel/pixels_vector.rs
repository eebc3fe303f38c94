//! A panel browsing a list of images.
//!
//! A row of selector buttons sits in the bottom-left corner, one per image.
//! Clicking a button selects its image; `ArrowLeft` / `ArrowRight` step the
//! selection while the cursor is over this panel.

use image::RgbaImage;
use tracing::debug;

use crate::arguments::{Key, KeyboardArguments, MouseArguments, NamedKey};
use crate::draw::{DrawArguments, DrawContext};
use crate::element::{Element, Widget};
use crate::error::GuiError;
use crate::observer::Event;
use crate::panel::Panel;
use crate::panel::image_panel::{fit_image, image_size};
use crate::primitives::{Color, Point, Rect};

const BUTTON_SIZE: f32 = 20.0;
const BUTTON_SPACING: f32 = 5.0;
const BUTTON_MARGIN: f32 = 10.0;

pub struct PixelsVector {
    element: Element,
    images: Vec<RgbaImage>,
    selection: usize,
    buttons: Vec<Rect>,
    /// Fired with the new index whenever the selection changes.
    pub on_selection_change: Event<usize>,
}

impl PixelsVector {
    pub fn new(images: Vec<RgbaImage>) -> Self {
        let mut panel = Self {
            element: Element::new(),
            images,
            selection: 0,
            buttons: Vec::new(),
            on_selection_change: Event::new(),
        };
        panel.arrange_buttons();
        panel
    }

    pub fn images(&self) -> &[RgbaImage] {
        &self.images
    }

    pub fn set_images(&mut self, images: Vec<RgbaImage>) {
        self.images = images;
        if self.selection >= self.images.len() {
            self.selection = 0;
        }
        self.arrange_buttons();
    }

    pub fn push_image(&mut self, image: RgbaImage) {
        self.images.push(image);
        self.arrange_buttons();
    }

    /// Currently selected image, if there are any.
    pub fn selection(&self) -> Option<&RgbaImage> {
        self.images.get(self.selection)
    }

    pub fn selection_index(&self) -> usize {
        self.selection
    }

    pub fn set_selection_index(&mut self, index: usize) -> Result<(), GuiError> {
        if index >= self.images.len() {
            return Err(GuiError::SelectionOutOfRange {
                index,
                count: self.images.len(),
            });
        }
        if index != self.selection {
            self.selection = index;
            debug!(panel = %self.element.id(), index, "selection changed");
            let mut index = index;
            self.on_selection_change.notify(&mut index);
        }
        Ok(())
    }

    /// Selector button rectangles in local coordinates.
    pub fn buttons(&self) -> &[Rect] {
        &self.buttons
    }

    fn arrange_buttons(&mut self) {
        let y = self.element.height() - BUTTON_MARGIN - BUTTON_SIZE;
        self.buttons = (0..self.images.len())
            .map(|i| {
                let x = BUTTON_MARGIN + i as f32 * (BUTTON_SIZE + BUTTON_SPACING);
                Rect::new(x, y, BUTTON_SIZE, BUTTON_SIZE)
            })
            .collect();
    }

    fn step(&mut self, forward: bool) {
        let index = if forward {
            self.selection + 1
        } else {
            match self.selection.checked_sub(1) {
                Some(index) => index,
                None => return,
            }
        };
        // Stepping past either end is ignored.
        let _ = self.set_selection_index(index);
    }
}

impl Widget for PixelsVector {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if self.element.set_bounds(bounds) {
            self.arrange_buttons();
        }
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, args: &DrawArguments) {
        let image = self.images.get(self.selection);
        let buttons = &self.buttons;
        let selection = self.selection;
        let count = self.images.len();
        self.element.draw_with(ctx, args, |ctx| {
            if let Some(image) = image {
                ctx.draw_image(image, fit_image(image_size(image), args.local_bounds));
            }
            if !args.chrome_enabled {
                return;
            }
            for (i, button) in buttons.iter().enumerate() {
                let color = if i == selection {
                    Color::WHITE
                } else {
                    Color::grey8(80)
                };
                ctx.fill_rect(*button, color);
            }
            if count > 0 {
                let info = format!("{} / {}", selection + 1, count);
                ctx.text(&info, Point::new(BUTTON_MARGIN, 20.0), 12, Color::WHITE);
            }
        });
    }

    fn mouse_action(&mut self, args: &mut MouseArguments) {
        if !self.element.accepts_input() {
            return;
        }
        if args.is_press() && args.is_local() {
            let hit = self
                .buttons
                .iter()
                .position(|button| button.contains(args.local));
            if let Some(index) = hit {
                if args.take_mouse_press(self.element.id()) {
                    let _ = self.set_selection_index(index);
                }
            }
        }
        self.element.mouse_action(args);
    }

    fn keyboard_action(&mut self, args: &mut KeyboardArguments) {
        if !self.element.accepts_input() {
            return;
        }
        if args.check_current_panel(self.element.id()) {
            match args.key {
                Key::Named(NamedKey::ArrowLeft) => self.step(false),
                Key::Named(NamedKey::ArrowRight) => self.step(true),
                _ => {}
            }
        }
        self.element.keyboard_action(args);
    }
}

impl Panel for PixelsVector {}
