use image::RgbaImage;

use crate::draw::{DrawArguments, DrawContext};
use crate::element::{Element, Widget};
use crate::panel::Panel;
use crate::primitives::{Color, Point, Rect, Size};

/// Caption text size, in points.
const CAPTION_SIZE: u32 = 14;

/// Largest rectangle of `image` proportions that fits in `bounds`, centred.
pub fn fit_image(image: Size, bounds: Rect) -> Rect {
    if image.width <= 0.0 || image.height <= 0.0 {
        return Rect::from_origin_size(bounds.center(), Size::ZERO);
    }
    let scale = (bounds.width / image.width).min(bounds.height / image.height);
    let size = Size::new(image.width * scale, image.height * scale);
    Rect::new(
        bounds.x + (bounds.width - size.width) / 2.0,
        bounds.y + (bounds.height - size.height) / 2.0,
        size.width,
        size.height,
    )
}

pub(crate) fn image_size(image: &RgbaImage) -> Size {
    Size::new(image.width() as f32, image.height() as f32)
}

/// Shows a single image, fitted into the panel.
pub struct ImagePanel {
    element: Element,
    image: Option<RgbaImage>,
    caption: String,
}

impl ImagePanel {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            element: Element::new(),
            image: Some(image),
            caption: String::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            element: Element::new(),
            image: None,
            caption: String::new(),
        }
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<RgbaImage>) {
        self.image = image;
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Caption drawn in the top-left corner while chrome is enabled.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Where the image lands in local coordinates.
    pub fn image_bounds(&self) -> Option<Rect> {
        self.image
            .as_ref()
            .map(|image| fit_image(image_size(image), self.element.local_bounds()))
    }
}

impl Widget for ImagePanel {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, args: &DrawArguments) {
        let image = &self.image;
        let caption = &self.caption;
        self.element.draw_with(ctx, args, |ctx| {
            if let Some(image) = image {
                ctx.draw_image(image, fit_image(image_size(image), args.local_bounds));
            }
            if args.chrome_enabled && !caption.is_empty() {
                ctx.text(caption, Point::new(10.0, 20.0), CAPTION_SIZE, Color::WHITE);
            }
        });
    }
}

impl Panel for ImagePanel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_letterboxes_wide_image() {
        let fitted = fit_image(Size::new(200.0, 100.0), Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(fitted, Rect::new(0.0, 100.0, 400.0, 200.0));
    }

    #[test]
    fn fit_pillarboxes_tall_image() {
        let fitted = fit_image(Size::new(100.0, 200.0), Rect::new(10.0, 0.0, 400.0, 200.0));
        assert_eq!(fitted, Rect::new(160.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn empty_image_collapses_to_center() {
        let fitted = fit_image(Size::ZERO, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(fitted, Rect::new(50.0, 25.0, 0.0, 0.0));
    }

    #[test]
    fn image_bounds_follow_panel_size() {
        let mut panel = ImagePanel::new(RgbaImage::new(4, 2));
        panel.set_bounds(Rect::new(100.0, 100.0, 80.0, 80.0));
        assert_eq!(panel.image_bounds(), Some(Rect::new(0.0, 20.0, 80.0, 40.0)));
        assert!(ImagePanel::empty().image_bounds().is_none());
    }
}
