//! Vertical scroll container.
//!
//! Children are stacked in one column inside an [`ElementGroup`] that is
//! translated by `(0, -position)`. A gutter of `SCROLL_AREA_WIDTH` on the
//! right holds the scroll bar.
//!
//! Out-of-range positions rubber-band back once per `update`:
//! - `position < 0`: decays toward 0
//! - content shorter than the viewport: any positive position decays toward 0
//! - `position > overflow`: only the excess past `overflow` decays

use std::cell::RefCell;
use std::rc::Rc;

use crate::arguments::{KeyboardArguments, MouseAction, MouseArguments};
use crate::config::{SCROLL_AREA_WIDTH, SCROLL_BAR_WIDTH, SCROLL_DECAY, SCROLL_SPACING};
use crate::dispatch;
use crate::draw::{DrawArguments, DrawContext};
use crate::element::{Element, ElementGroup, ElementPtr, Widget};
use crate::panel::Panel;
use crate::primitives::{Color, Point, Rect};

pub struct Scroll {
    element: Element,
    elements: ElementGroup,
    position: f32,
    length: f32,
    on_scroll_bar: bool,
}

impl Scroll {
    pub fn new() -> Self {
        let mut element = Element::new();
        element.set_scissor(true);
        Self {
            element,
            elements: ElementGroup::new(),
            position: 0.0,
            length: 0.0,
            on_scroll_bar: false,
        }
    }

    pub fn add(&mut self, element: ElementPtr) {
        self.elements.add(element);
        self.arrange();
    }

    /// Add a concrete widget and return a typed handle to it.
    pub fn add_widget<W: Widget + 'static>(&mut self, widget: W) -> Rc<RefCell<W>> {
        let widget = self.elements.add_widget(widget);
        self.arrange();
        widget
    }

    /// The group holding the scrolled content.
    pub fn group(&self) -> &ElementGroup {
        &self.elements
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Total height of the stacked content.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Whether the current gesture started on the scroll bar.
    pub fn is_on_scroll_bar(&self) -> bool {
        self.on_scroll_bar
    }

    pub fn set_scroll(&mut self, position: f32) {
        self.position = position;
        self.place_group();
    }

    /// Stack the children top to bottom and recompute `length`.
    pub fn arrange(&mut self) {
        let width = self.content_width();
        let mut y = 0.0;
        for element in self.elements.elements() {
            let mut bounds = element.borrow().bounds();
            bounds.y = y;
            bounds.width = width;
            element.borrow_mut().set_bounds(bounds);
            y += bounds.height + SCROLL_SPACING;
        }
        self.length = if self.elements.is_empty() {
            0.0
        } else {
            y - SCROLL_SPACING
        };
        self.place_group();
    }

    fn content_width(&self) -> f32 {
        (self.element.width() - SCROLL_AREA_WIDTH).max(0.0)
    }

    fn place_group(&mut self) {
        let bounds = Rect::new(0.0, -self.position, self.content_width(), self.length);
        self.elements.set_bounds(bounds);
    }

    fn bar_travel(&self) -> f32 {
        self.element.height() - SCROLL_AREA_WIDTH * 2.0
    }

    /// Length of the scroll bar: the visible fraction of the travel.
    pub fn bar_length(&self) -> f32 {
        if self.length <= 0.0 {
            return self.bar_travel();
        }
        self.element.height() / self.length * self.bar_travel()
    }

    /// Top of the scroll bar in local coordinates.
    pub fn bar_y(&self) -> f32 {
        let range = self.length - self.element.height();
        if range <= 0.0 {
            return SCROLL_AREA_WIDTH;
        }
        SCROLL_AREA_WIDTH + (self.bar_travel() - self.bar_length()) * (self.position / range)
    }

    /// Scroll bar rectangle, or `None` when the content fits.
    pub fn scrollbar(&self) -> Option<Rect> {
        let travel = self.bar_travel();
        if self.length <= self.element.height() || travel <= 0.0 {
            return None;
        }
        let length = self.bar_length();
        if length > travel {
            return None;
        }
        let x = self.element.width() - SCROLL_AREA_WIDTH / 2.0 - SCROLL_BAR_WIDTH / 2.0;
        Some(Rect::new(x, self.bar_y(), SCROLL_BAR_WIDTH, length))
    }

    fn decay(&mut self) {
        if self.position < 0.0 {
            self.set_scroll(self.position * SCROLL_DECAY);
            return;
        }
        let overflow = self.length - self.element.height();
        if overflow < 0.0 {
            if self.position > 0.0 {
                self.set_scroll(self.position * SCROLL_DECAY);
            }
        } else if self.position > overflow {
            let excess = (self.position - overflow) * SCROLL_DECAY;
            self.set_scroll(overflow + excess);
        }
    }

    fn drag(&mut self, movement: Point) {
        if self.on_scroll_bar {
            let range = self.length - self.element.height();
            let spare = self.element.height() - self.bar_length();
            if range > 0.0 && spare > 0.0 {
                self.set_scroll(self.position + movement.y * range / spare);
            }
        } else {
            self.set_scroll(self.position - movement.y);
        }
    }
}

impl Default for Scroll {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_bar(ctx: &mut DrawContext<'_>, bar: Rect) {
    let x = bar.center().x;
    let radius = SCROLL_BAR_WIDTH / 2.0;
    let top = Point::new(x, bar.y);
    let bottom = Point::new(x, bar.bottom());
    ctx.fill_circle(top, radius, Color::WHITE);
    ctx.fill_circle(bottom, radius, Color::WHITE);
    ctx.line(top, bottom, SCROLL_BAR_WIDTH, Color::WHITE);
}

impl Widget for Scroll {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if self.element.set_bounds(bounds) {
            self.arrange();
        }
    }

    fn update(&mut self) {
        self.element.update();
        self.elements.update();
        self.decay();
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, args: &DrawArguments) {
        let bar = self.scrollbar();
        let elements = &mut self.elements;
        self.element.draw_with(ctx, args, |ctx| {
            dispatch::draw_child(elements, ctx, args);
            if let Some(bar) = bar {
                draw_bar(ctx, bar);
            }
        });
    }

    fn mouse_action(&mut self, args: &mut MouseArguments) {
        if !self.element.accepts_input() {
            return;
        }
        let id = self.element.id();

        if args.is_press() && args.is_local() {
            self.on_scroll_bar = args.local.x > self.element.width() - SCROLL_AREA_WIDTH;
            if self.on_scroll_bar {
                args.take_mouse_press(id);
            }
        }

        dispatch::mouse_child(&mut self.elements, args);

        // Presses no child wanted start a content pan.
        if args.is_press() {
            args.take_mouse_press(id);
        }

        self.element.mouse_action(args);

        if args.is_dragging(id) {
            self.drag(args.movement);
            args.consume();
        }
        if args.action == MouseAction::Released {
            self.on_scroll_bar = false;
        }
    }

    fn keyboard_action(&mut self, args: &mut KeyboardArguments) {
        if !self.element.accepts_input() {
            return;
        }
        self.elements.keyboard_action(args);
        self.element.keyboard_action(args);
    }
}

impl Panel for Scroll {}
