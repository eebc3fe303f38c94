use crate::element::{Element, Widget};
use crate::primitives::{Color, Point, Rect};

const DOT_RADIUS: f32 = 2.0;
const DOT_GAP: f32 = 10.0;

/// A blank 100×30 separator drawn as three dots.
pub struct Spacer {
    element: Element,
}

impl Spacer {
    pub fn new() -> Self {
        let mut element = Element::with_bounds(Rect::new(0.0, 0.0, 100.0, 30.0));
        element.on_draw.add(|ctx, args| {
            let center = args.local_bounds.center();
            for offset in [-DOT_GAP, 0.0, DOT_GAP] {
                ctx.fill_circle(center + Point::new(offset, 0.0), DOT_RADIUS, Color::WHITE);
            }
        });
        Self { element }
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Spacer {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}
