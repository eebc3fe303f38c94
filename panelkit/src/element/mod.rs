//! Element System
//!
//! `Element` is the generic tree node: bounds, visibility, a local mouse
//! state, and one observer list per lifecycle hook. Concrete widgets either
//! register closures on a plain `Element` or embed one and implement
//! [`Widget`], overriding only the hooks they need.
//!
//! # Mouse state machine
//!
//! - `Moved`: updates `mouse_over`.
//! - `Dragged`: becomes `Dragging` if this element owns the gesture, before
//!   listeners run.
//! - `Pressed` / `DoubleClick`: becomes `Down` if a listener claimed the
//!   press.
//! - `Released`: returns to `Waiting` after listeners run, so release
//!   listeners can still see `Down`/`Dragging`.

mod group;

pub use group::{ElementGroup, ElementPtr};

use crate::arguments::{
    BoundsChangeArguments, FilesDraggedArguments, KeyboardArguments, MouseAction,
    MouseArguments, UpdateArguments,
};
use crate::draw::{DrawArguments, DrawContext, DrawEvent};
use crate::element_id::ElementId;
use crate::observer::Event;
use crate::primitives::{Point, Rect, Size};

/// Local mouse state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseState {
    #[default]
    Waiting,
    Down,
    Dragging,
}

/// Generic tree node.
#[derive(Debug)]
pub struct Element {
    id: ElementId,
    bounds: Rect,
    enabled: bool,
    visible: bool,
    scissor: bool,
    mouse_state: MouseState,
    mouse_over: bool,

    pub on_update: Event<UpdateArguments>,
    pub on_draw: DrawEvent,
    pub on_mouse: Event<MouseArguments>,
    pub on_keyboard: Event<KeyboardArguments>,
    pub on_bounds_change: Event<BoundsChangeArguments>,
    pub on_files_dragged: Event<FilesDraggedArguments>,
}

impl Element {
    pub fn new() -> Self {
        Self::with_bounds(Rect::ZERO)
    }

    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            id: ElementId::new(),
            bounds,
            enabled: true,
            visible: true,
            scissor: false,
            mouse_state: MouseState::Waiting,
            mouse_over: false,
            on_update: Event::new(),
            on_draw: DrawEvent::new(),
            on_mouse: Event::new(),
            on_keyboard: Event::new(),
            on_bounds_change: Event::new(),
            on_files_dragged: Event::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    // =====================================================================
    // Geometry
    // =====================================================================

    /// Bounds in the parent's frame.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds in this element's own frame (origin at 0,0).
    pub fn local_bounds(&self) -> Rect {
        Rect::from_size(self.bounds.size())
    }

    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    pub fn height(&self) -> f32 {
        self.bounds.height
    }

    /// Set bounds, notifying `on_bounds_change` if they changed.
    ///
    /// Returns whether the bounds changed.
    pub fn set_bounds(&mut self, bounds: Rect) -> bool {
        if self.bounds == bounds {
            return false;
        }
        self.bounds = bounds;
        let mut args = BoundsChangeArguments {
            bounds,
            local_bounds: self.local_bounds(),
        };
        self.on_bounds_change.notify(&mut args);
        true
    }

    pub fn set_position(&mut self, position: Point) -> bool {
        self.set_bounds(Rect::from_origin_size(position, self.bounds.size()))
    }

    pub fn set_size(&mut self, size: Size) -> bool {
        self.set_bounds(Rect::from_origin_size(self.bounds.origin(), size))
    }

    // =====================================================================
    // Flags
    // =====================================================================

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled elements ignore input but are still drawn and updated.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hidden elements are neither drawn nor receive input.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn scissor(&self) -> bool {
        self.scissor
    }

    /// Clip drawing (this element and its children) to the element's
    /// bounds.
    pub fn set_scissor(&mut self, scissor: bool) {
        self.scissor = scissor;
    }

    pub fn mouse_state(&self) -> MouseState {
        self.mouse_state
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    /// Whether this element should receive input at all.
    pub fn accepts_input(&self) -> bool {
        self.enabled && self.visible
    }

    // =====================================================================
    // Lifecycle
    // =====================================================================

    pub fn update(&mut self) {
        self.on_update.notify(&mut UpdateArguments);
    }

    /// Notify draw listeners, clipped to the element when scissoring is on.
    pub fn draw(&mut self, ctx: &mut DrawContext<'_>, args: &DrawArguments) {
        self.draw_with(ctx, args, |_| {});
    }

    /// Notify draw listeners, then run `children` inside the same clip.
    pub fn draw_with(
        &mut self,
        ctx: &mut DrawContext<'_>,
        args: &DrawArguments,
        children: impl FnOnce(&mut DrawContext<'_>),
    ) {
        if !self.visible {
            return;
        }
        let on_draw = &mut self.on_draw;
        let body = |ctx: &mut DrawContext<'_>| {
            on_draw.notify(ctx, args);
            children(ctx);
        };
        if self.scissor {
            ctx.with_scissor(args.global_bounds, body);
        } else {
            body(ctx);
        }
    }

    /// Run the mouse state machine and notify mouse listeners.
    ///
    /// `args` must already be localized to this element.
    pub fn mouse_action(&mut self, args: &mut MouseArguments) {
        if !self.accepts_input() {
            return;
        }

        match args.action {
            MouseAction::Moved => self.mouse_over = args.is_local(),
            MouseAction::Dragged if args.is_owned_by(self.id) => {
                self.mouse_state = MouseState::Dragging;
            }
            _ => {}
        }

        self.on_mouse.notify(args);

        match args.action {
            MouseAction::Pressed | MouseAction::DoubleClick => {
                self.mouse_over = args.is_local();
                if args.is_owned_by(self.id) {
                    self.mouse_state = MouseState::Down;
                }
            }
            MouseAction::Released => self.mouse_state = MouseState::Waiting,
            _ => {}
        }
    }

    pub fn keyboard_action(&mut self, args: &mut KeyboardArguments) {
        if !self.accepts_input() {
            return;
        }
        self.on_keyboard.notify(args);
    }

    pub fn files_dragged(&mut self, args: &mut FilesDraggedArguments) {
        self.on_files_dragged.notify(args);
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Widget trait
// =========================================================================

/// The capability interface shared by every node in the tree.
///
/// Implementors embed an [`Element`] and expose it through `element` /
/// `element_mut`; the provided methods forward to it. Containers override
/// the lifecycle methods to walk their children with the helpers in
/// [`crate::dispatch`].
pub trait Widget {
    fn element(&self) -> &Element;
    fn element_mut(&mut self) -> &mut Element;

    fn id(&self) -> ElementId {
        self.element().id()
    }

    fn bounds(&self) -> Rect {
        self.element().bounds()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.element_mut().set_bounds(bounds);
    }

    fn update(&mut self) {
        self.element_mut().update();
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, args: &DrawArguments) {
        self.element_mut().draw(ctx, args);
    }

    fn mouse_action(&mut self, args: &mut MouseArguments) {
        self.element_mut().mouse_action(args);
    }

    fn keyboard_action(&mut self, args: &mut KeyboardArguments) {
        self.element_mut().keyboard_action(args);
    }
}

impl Widget for Element {
    fn element(&self) -> &Element {
        self
    }

    fn element_mut(&mut self) -> &mut Element {
        self
    }
}
