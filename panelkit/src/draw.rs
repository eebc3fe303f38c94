//! Drawing: the canvas seam, draw arguments, and the scoped draw context.
//!
//! `DrawArguments` are propagated top-down. Each container narrows
//! `local_bounds`, `global_bounds` and `global_transform` for its children;
//! `natural_bounds` stays the top-level viewport. The invariant
//! `global_bounds == local_bounds * global_transform` holds at every level.
//!
//! `DrawContext` replaces a process-wide scissor stack: it is passed down the
//! recursion and every push is tied to a closure scope, so the canvas state
//! is restored on every exit path.

use std::fmt;

use glam::Mat4;
use image::RgbaImage;

use crate::observer::{ListenerId, Listeners};
use crate::primitives::{Color, Point, Rect, translation};

/// Low-level drawing primitives provided by the host renderer.
///
/// Coordinates are in the space set by the last `set_transform` call.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);
    fn line(&mut self, from: Point, to: Point, width: f32, color: Color);
    fn draw_image(&mut self, image: &RgbaImage, rect: Rect);
    fn text(&mut self, text: &str, position: Point, size: u32, color: Color);

    /// Replace the current model transform.
    fn set_transform(&mut self, transform: Mat4);

    /// Replace the current scissor rectangle (window space). `None` disables
    /// clipping.
    fn set_scissor(&mut self, scissor: Option<Rect>);
}

// =========================================================================
// DrawArguments
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawArguments {
    /// Whether decorative/navigational visuals should be drawn.
    pub chrome_enabled: bool,
    /// The top-level viewport. Constant through the whole tree.
    pub natural_bounds: Rect,
    /// This node's rectangle in its own frame (origin at 0,0).
    pub local_bounds: Rect,
    /// This node's rectangle in window space.
    pub global_bounds: Rect,
    /// Accumulated transform from this node's frame to window space.
    pub global_transform: Mat4,
    pub global_scale: f32,
}

impl DrawArguments {
    /// Arguments for the root of the tree. The root frame starts at the
    /// viewport origin.
    pub fn root(viewport: Rect, chrome_enabled: bool) -> Self {
        Self {
            chrome_enabled,
            natural_bounds: viewport,
            local_bounds: Rect::new(0.0, 0.0, viewport.width, viewport.height),
            global_bounds: viewport,
            global_transform: translation(viewport.origin()),
            global_scale: 1.0,
        }
    }

    /// Arguments for a child occupying `bounds` in this node's frame.
    pub fn for_child(&self, bounds: Rect) -> Self {
        let global_transform = self.global_transform * translation(bounds.origin());
        let local_bounds = Rect::from_size(bounds.size());
        Self {
            chrome_enabled: self.chrome_enabled,
            natural_bounds: self.natural_bounds,
            local_bounds,
            global_bounds: local_bounds.transform(&global_transform),
            global_transform,
            global_scale: self.global_scale,
        }
    }
}

// =========================================================================
// DrawContext
// =========================================================================

/// Scoped drawing state threaded through the draw recursion.
pub struct DrawContext<'c> {
    canvas: &'c mut dyn Canvas,
    transforms: Vec<Mat4>,
    scissors: Vec<Rect>,
    scissor_enabled: bool,
}

impl<'c> DrawContext<'c> {
    pub fn new(canvas: &'c mut dyn Canvas) -> Self {
        canvas.set_transform(Mat4::IDENTITY);
        canvas.set_scissor(None);
        Self {
            canvas,
            transforms: vec![Mat4::IDENTITY],
            scissors: Vec::new(),
            scissor_enabled: true,
        }
    }

    /// Access the underlying canvas.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Current accumulated transform.
    pub fn transform(&self) -> Mat4 {
        self.transforms.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Current effective scissor (window space), if any.
    pub fn scissor(&self) -> Option<Rect> {
        self.scissors.last().copied()
    }

    pub fn scissor_enabled(&self) -> bool {
        self.scissor_enabled
    }

    /// Globally enable or disable scissoring. Pushes still nest but are not
    /// applied to the canvas while disabled.
    pub fn set_scissor_enabled(&mut self, enabled: bool) {
        self.scissor_enabled = enabled;
        self.apply_scissor();
    }

    /// Run `f` with `local` appended to the current transform.
    pub fn with_transform<R>(&mut self, local: Mat4, f: impl FnOnce(&mut Self) -> R) -> R {
        let transform = self.transform() * local;
        self.transforms.push(transform);
        self.canvas.set_transform(transform);

        let result = f(self);

        self.transforms.pop();
        let restored = self.transform();
        self.canvas.set_transform(restored);
        result
    }

    /// Run `f` with drawing clipped to `global` (window space), intersected
    /// with any enclosing scissor.
    pub fn with_scissor<R>(&mut self, global: Rect, f: impl FnOnce(&mut Self) -> R) -> R {
        let scissor = match self.scissor() {
            Some(outer) => outer.intersection(&global).unwrap_or(Rect::ZERO),
            None => global,
        };
        self.scissors.push(scissor);
        self.apply_scissor();

        let result = f(self);

        self.scissors.pop();
        self.apply_scissor();
        result
    }

    fn apply_scissor(&mut self) {
        let scissor = if self.scissor_enabled { self.scissor() } else { None };
        self.canvas.set_scissor(scissor);
    }

    // =====================================================================
    // Convenience forwarding
    // =====================================================================

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.fill_rect(rect, color);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.canvas.fill_circle(center, radius, color);
    }

    pub fn line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        self.canvas.line(from, to, width, color);
    }

    pub fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        self.canvas.draw_image(image, rect);
    }

    pub fn text(&mut self, text: &str, position: Point, size: u32, color: Color) {
        self.canvas.text(text, position, size, color);
    }
}

// =========================================================================
// DrawEvent
// =========================================================================

type DrawListener = dyn FnMut(&mut DrawContext<'_>, &DrawArguments);

/// Multi-subscriber draw hook.
#[derive(Default)]
pub struct DrawEvent {
    listeners: Listeners<DrawListener>,
}

impl DrawEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        listener: impl FnMut(&mut DrawContext<'_>, &DrawArguments) + 'static,
    ) -> ListenerId {
        self.listeners.add_boxed(Box::new(listener))
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&mut self, ctx: &mut DrawContext<'_>, args: &DrawArguments) {
        for listener in self.listeners.iter_mut() {
            listener(&mut *ctx, args);
        }
    }
}

impl fmt::Debug for DrawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawEvent")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
