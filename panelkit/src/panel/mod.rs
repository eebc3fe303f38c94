//! Panels: independently positioned regions managed by the controller.
//!
//! A panel is a [`Widget`] that can additionally be hit-tested
//! ([`Panel::find_screen`]) and receive dropped files. The controller holds
//! panels as [`PanelPtr`] and only ever keeps [`WeakPanel`] references to
//! them, so a panel dropped from the tree simply stops resolving.

mod group;
mod image_panel;
mod pixels_vector;
mod scroll;

pub use group::{Layout, PanelGroup};
pub use image_panel::{ImagePanel, fit_image};
pub use pixels_vector::PixelsVector;
pub use scroll::Scroll;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::arguments::FilesDraggedArguments;
use crate::element::{Element, Widget};
use crate::primitives::{Point, Rect};

pub type PanelPtr = Rc<RefCell<dyn Panel>>;
pub type WeakPanel = Weak<RefCell<dyn Panel>>;

pub trait Panel: Widget {
    /// Find the deepest panel below this one containing `point`.
    ///
    /// `point` is in this panel's local frame. `bounds` holds this panel's
    /// rectangle in window space on entry; on a match it is overwritten with
    /// the matched panel's window-space rectangle. Leaves return `None` and
    /// the caller falls back to the leaf itself.
    fn find_screen(&self, point: Point, bounds: &mut Rect) -> Option<PanelPtr> {
        let _ = (point, bounds);
        None
    }

    fn files_dragged(&mut self, args: &mut FilesDraggedArguments) {
        self.element_mut().files_dragged(args);
    }
}

impl Panel for Element {}

/// Wrap a panel into a shared tree handle.
pub fn share<P: Panel + 'static>(panel: P) -> Rc<RefCell<P>> {
    Rc::new(RefCell::new(panel))
}
