use std::cell::RefCell;
use std::rc::Rc;

use crate::arguments::{KeyboardArguments, MouseArguments};
use crate::dispatch;
use crate::draw::{DrawArguments, DrawContext};
use crate::element::{Element, Widget};
use crate::element_id::ElementId;
use crate::primitives::Rect;

/// Shared handle to any widget in a panel's own layout.
pub type ElementPtr = Rc<RefCell<dyn Widget>>;

/// Ordered collection of elements. Insertion order is draw order; the last
/// element is topmost for mouse dispatch.
#[derive(Default)]
pub struct ElementGroup {
    element: Element,
    elements: Vec<ElementPtr>,
}

impl ElementGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: ElementPtr) {
        self.elements.push(element);
    }

    /// Add a concrete widget and return a typed handle to it.
    pub fn add_widget<W: Widget + 'static>(&mut self, widget: W) -> Rc<RefCell<W>> {
        let widget = Rc::new(RefCell::new(widget));
        self.elements.push(widget.clone());
        widget
    }

    /// Remove the element with `id`. Returns false if it is not a direct
    /// child.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|element| element.borrow().id() != id);
        self.elements.len() != before
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn elements(&self) -> &[ElementPtr] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Union of the children's bounds, in this group's frame.
    pub fn children_bounds(&self) -> Rect {
        self.elements
            .iter()
            .map(|element| element.borrow().bounds())
            .reduce(|acc, bounds| acc.union(&bounds))
            .unwrap_or(Rect::ZERO)
    }
}

impl Widget for ElementGroup {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn update(&mut self) {
        self.element.update();
        dispatch::dispatch_update(&self.elements);
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, args: &DrawArguments) {
        let elements = &self.elements;
        self.element
            .draw_with(ctx, args, |ctx| dispatch::dispatch_draw(elements, ctx, args));
    }

    fn mouse_action(&mut self, args: &mut MouseArguments) {
        if !self.element.accepts_input() {
            return;
        }
        dispatch::dispatch_mouse(&self.elements, args);
        self.element.mouse_action(args);
    }

    fn keyboard_action(&mut self, args: &mut KeyboardArguments) {
        if !self.element.accepts_input() {
            return;
        }
        dispatch::dispatch_keyboard(&self.elements, args);
        self.element.keyboard_action(args);
    }
}
