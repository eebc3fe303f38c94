use image::{Rgba, RgbaImage};
use panelkit::{
    Controller, GuiError, ImagePanel, PanelGroup, PixelsVector, Scroll, Spacer, share,
};
use tracing::info;

use crate::host::HeadlessHost;

const SPACER_COUNT: usize = 12;

fn gradient(width: u32, height: u32, tint: [u8; 3]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let fx = (x * 255 / width.max(1)) as u16;
        let fy = (y * 255 / height.max(1)) as u16;
        let channel = |base: u8, weight: u16| ((base as u16 * weight) / 255) as u8;
        Rgba([channel(tint[0], fx), channel(tint[1], fy), channel(tint[2], 255 - fx), 255])
    })
}

/// Initialise `controller` with the demo tree: a grid holding a scroll of
/// spacers, an image browser and a single image.
pub fn build_demo(controller: &mut Controller<HeadlessHost>) -> Result<(), GuiError> {
    controller.init(share(PanelGroup::grid()))?;

    let mut scroll = Scroll::new();
    for _ in 0..SPACER_COUNT {
        scroll.add_widget(Spacer::new());
    }
    controller.add(share(scroll));

    let images = vec![
        gradient(64, 48, [255, 0, 0]),
        gradient(64, 48, [0, 255, 0]),
        gradient(48, 64, [0, 0, 255]),
    ];
    controller.add(share(PixelsVector::new(images)));

    let mut image = ImagePanel::new(gradient(128, 128, [255, 255, 255]));
    image.set_caption("gradient");
    controller.add(share(image));

    info!("demo tree built");
    Ok(())
}
