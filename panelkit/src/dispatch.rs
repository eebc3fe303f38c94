//! Generic tree walking shared by every container.
//!
//! Containers hold their children as `Rc<RefCell<W>>` for some
//! `W: Widget + ?Sized` (`dyn Widget` inside panels, `dyn Panel` at the top
//! level) and forward each lifecycle call through these helpers, so the
//! traversal policy is written once:
//!
//! | Event                         | Order          | Policy                        |
//! |-------------------------------|----------------|-------------------------------|
//! | update                        | insertion      | all children                  |
//! | draw                          | insertion      | visible children              |
//! | `Moved` / `Released`          | topmost first  | broadcast                     |
//! | `Pressed` / `DoubleClick`     | topmost first  | stop once consumed            |
//! | `Dragged`                     | topmost first  | stop once consumed            |
//! | keyboard                      | insertion      | broadcast to visible children |
//!
//! A child is borrowed mutably for the duration of its own dispatch; a
//! listener must not re-borrow the node it is attached to.

use std::cell::RefCell;
use std::rc::Rc;

use crate::arguments::{KeyboardArguments, MouseAction, MouseArguments};
use crate::draw::{DrawArguments, DrawContext};
use crate::element::Widget;
use crate::primitives::translation;

/// Draw one child inside its own frame.
pub fn draw_child<W: Widget + ?Sized>(
    child: &mut W,
    ctx: &mut DrawContext<'_>,
    args: &DrawArguments,
) {
    if !child.element().is_visible() {
        return;
    }
    let bounds = child.bounds();
    let child_args = args.for_child(bounds);
    ctx.with_transform(translation(bounds.origin()), |ctx| {
        child.draw(ctx, &child_args);
    });
}

/// Forward a mouse event to one child, re-localized into its frame.
pub fn mouse_child<W: Widget + ?Sized>(child: &mut W, args: &mut MouseArguments) {
    if !child.element().accepts_input() {
        return;
    }
    let bounds = child.bounds();
    args.localized(bounds, |args| child.mouse_action(args));
}

pub fn dispatch_update<W: Widget + ?Sized>(children: &[Rc<RefCell<W>>]) {
    for child in children {
        child.borrow_mut().update();
    }
}

pub fn dispatch_draw<W: Widget + ?Sized>(
    children: &[Rc<RefCell<W>>],
    ctx: &mut DrawContext<'_>,
    args: &DrawArguments,
) {
    for child in children {
        draw_child(&mut *child.borrow_mut(), ctx, args);
    }
}

/// Route a mouse event to children, topmost first.
pub fn dispatch_mouse<W: Widget + ?Sized>(children: &[Rc<RefCell<W>>], args: &mut MouseArguments) {
    let exclusive = matches!(
        args.action,
        MouseAction::Pressed | MouseAction::DoubleClick | MouseAction::Dragged
    );
    for child in children.iter().rev() {
        mouse_child(&mut *child.borrow_mut(), args);
        if exclusive && args.is_consumed() {
            break;
        }
    }
}

pub fn dispatch_keyboard<W: Widget + ?Sized>(
    children: &[Rc<RefCell<W>>],
    args: &mut KeyboardArguments,
) {
    for child in children {
        let mut child = child.borrow_mut();
        if child.element().accepts_input() {
            child.keyboard_action(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::{Key, KeyboardAction, MouseButton};
    use crate::element::Element;
    use crate::element_id::ElementId;
    use crate::primitives::{Point, Rect};

    fn recording(bounds: Rect, log: &Rc<RefCell<Vec<(ElementId, MouseAction)>>>, claim: bool) -> Rc<RefCell<Element>> {
        let element = Rc::new(RefCell::new(Element::with_bounds(bounds)));
        let id = element.borrow().id();
        let log = log.clone();
        element.borrow_mut().on_mouse.add(move |args| {
            log.borrow_mut().push((id, args.action));
            if claim {
                args.take_mouse_press(id);
            }
        });
        element
    }

    fn args(action: MouseAction, at: Point) -> MouseArguments {
        MouseArguments::new(
            action,
            MouseButton::Left,
            at,
            Rect::new(0.0, 0.0, 200.0, 200.0),
            None,
            None,
        )
    }

    #[test]
    fn press_goes_to_topmost_claimant_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let bottom = recording(Rect::new(0.0, 0.0, 100.0, 100.0), &log, true);
        let top = recording(Rect::new(50.0, 50.0, 100.0, 100.0), &log, true);
        let top_id = top.borrow().id();
        let children: Vec<Rc<RefCell<Element>>> = vec![bottom, top];

        let mut press = args(MouseAction::Pressed, Point::new(75.0, 75.0));
        dispatch_mouse(&children, &mut press);

        assert_eq!(press.owner(), Some(top_id));
        assert_eq!(*log.borrow(), vec![(top_id, MouseAction::Pressed)]);
    }

    #[test]
    fn press_falls_through_to_lower_sibling() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let bottom = recording(Rect::new(0.0, 0.0, 100.0, 100.0), &log, true);
        let top = recording(Rect::new(150.0, 150.0, 40.0, 40.0), &log, true);
        let bottom_id = bottom.borrow().id();
        let children: Vec<Rc<RefCell<Element>>> = vec![bottom, top];

        let mut press = args(MouseAction::Pressed, Point::new(10.0, 10.0));
        dispatch_mouse(&children, &mut press);

        assert_eq!(press.owner(), Some(bottom_id));
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(press.local, Point::new(10.0, 10.0));
    }

    #[test]
    fn moves_are_broadcast() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recording(Rect::new(0.0, 0.0, 100.0, 100.0), &log, true);
        let b = recording(Rect::new(0.0, 0.0, 100.0, 100.0), &log, true);
        let children: Vec<Rc<RefCell<Element>>> = vec![a, b];

        let mut moved = args(MouseAction::Moved, Point::new(10.0, 10.0));
        dispatch_mouse(&children, &mut moved);
        assert_eq!(log.borrow().len(), 2);
        assert!(children.iter().all(|c| c.borrow().is_mouse_over()));
    }

    #[test]
    fn keyboard_skips_hidden_children() {
        let count = Rc::new(RefCell::new(0));
        let children: Vec<Rc<RefCell<Element>>> = (0..3)
            .map(|_| {
                let element = Rc::new(RefCell::new(Element::new()));
                let count = count.clone();
                element
                    .borrow_mut()
                    .on_keyboard
                    .add(move |_| *count.borrow_mut() += 1);
                element
            })
            .collect();
        children[1].borrow_mut().set_visible(false);

        let mut key = KeyboardArguments::new(KeyboardAction::Pressed, Key::Character('x'), None);
        dispatch_keyboard(&children, &mut key);
        assert_eq!(*count.borrow(), 2);
    }
}
