use glam::Mat4;
use image::RgbaImage;
use panelkit::{Canvas, Color, Point, Rect};
use serde::Serialize;

/// One recorded canvas call. Geometry is converted to window space using the
/// transform active at the time of the call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
        scissor: Option<Rect>,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    },
    Image {
        width: u32,
        height: u32,
        rect: Rect,
    },
    Text {
        text: String,
        position: Point,
        size: u32,
        color: Color,
    },
    SetScissor {
        scissor: Option<Rect>,
    },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    transform: Mat4,
    scissor: Option<Rect>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Filled rectangles, in window space.
    pub fn fill_rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect { rect, color, .. } => Some((*rect, *color)),
            _ => None,
        })
    }

    /// Text runs drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of recorded commands that put pixels on screen.
    pub fn primitive_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| !matches!(command, DrawCommand::SetScissor { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect: rect.transform(&self.transform),
            color,
            scissor: self.scissor,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center: center.transform(&self.transform),
            radius,
            color,
        });
    }

    fn line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from: from.transform(&self.transform),
            to: to.transform(&self.transform),
            width,
            color,
        });
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        self.commands.push(DrawCommand::Image {
            width: image.width(),
            height: image.height(),
            rect: rect.transform(&self.transform),
        });
    }

    fn text(&mut self, text: &str, position: Point, size: u32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position: position.transform(&self.transform),
            size,
            color,
        });
    }

    fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    fn set_scissor(&mut self, scissor: Option<Rect>) {
        if self.scissor != scissor {
            self.scissor = scissor;
            self.commands.push(DrawCommand::SetScissor { scissor });
        }
    }
}
