//! Argument objects passed down the tree.
//!
//! A raw input event is wrapped once at the root into one of these values and
//! then re-expressed in each child's local frame as dispatch descends. The
//! same logical event travels the whole tree; it is never re-fired.
//!
//! `MouseArguments` also carries the ownership claim for the active gesture:
//! - `owner_before`: who owned the gesture when the event entered the tree
//! - `owner`: who owns it now (may be claimed during dispatch)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::element_id::ElementId;
use crate::primitives::{Point, Rect, Size};

// =========================================================================
// Mouse
// =========================================================================

/// What happened to the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseAction {
    Moved,
    Pressed,
    Released,
    Dragged,
    DoubleClick,
}

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Other(u16),
}

/// A mouse event, localized to the node currently receiving it.
#[derive(Debug, Clone)]
pub struct MouseArguments {
    pub action: MouseAction,
    pub button: MouseButton,
    /// Position in window space.
    pub global: Point,
    /// Position relative to the receiving node's top-left corner.
    pub local: Point,
    /// Delta since the last cached point. Only meaningful for `Dragged`.
    pub movement: Point,
    /// Size of the receiving node's frame.
    local_size: Size,
    /// Visible part of the receiving node's frame: its own rectangle
    /// intersected with every enclosing frame.
    clip: Rect,
    current_panel: Option<ElementId>,
    owner_before: Option<ElementId>,
    owner: Option<ElementId>,
    consumed: bool,
}

impl MouseArguments {
    /// Wrap a raw event at the root of the tree.
    pub fn new(
        action: MouseAction,
        button: MouseButton,
        global: Point,
        root_bounds: Rect,
        current_panel: Option<ElementId>,
        owner: Option<ElementId>,
    ) -> Self {
        Self {
            action,
            button,
            global,
            local: global - root_bounds.origin(),
            movement: Point::ORIGIN,
            local_size: root_bounds.size(),
            clip: Rect::from_size(root_bounds.size()),
            current_panel,
            owner_before: owner,
            owner,
            consumed: false,
        }
    }

    /// Set `movement` as the delta from `previous` to this event's position.
    pub fn with_movement(mut self, previous: Point) -> Self {
        self.movement = self.global - previous;
        self
    }

    /// Size of the frame `local` is expressed in.
    pub fn local_size(&self) -> Size {
        self.local_size
    }

    /// Visible part of the receiving node, in its own frame.
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Check if the cursor lies inside the visible part of the receiving
    /// node.
    pub fn is_local(&self) -> bool {
        self.clip.contains(self.local)
    }

    /// Run `f` with the arguments re-expressed in a child frame.
    ///
    /// `bounds` is the child's rectangle in the current frame. The child's
    /// clip is its rectangle intersected with the current clip, so content
    /// outside an enclosing frame is never local. The current frame is
    /// restored afterwards; ownership and consumption changes made inside
    /// `f` are kept.
    pub fn localized<R>(&mut self, bounds: Rect, f: impl FnOnce(&mut Self) -> R) -> R {
        let local = self.local;
        let local_size = self.local_size;
        let clip = self.clip;
        let offset = bounds.origin();
        self.local = local - offset;
        self.local_size = bounds.size();
        self.clip = clip
            .translate(Point::ORIGIN - offset)
            .intersection(&Rect::from_size(bounds.size()))
            .unwrap_or(Rect::ZERO);
        let result = f(self);
        self.local = local;
        self.local_size = local_size;
        self.clip = clip;
        result
    }

    /// Check if this is a press (single or double).
    pub fn is_press(&self) -> bool {
        matches!(self.action, MouseAction::Pressed | MouseAction::DoubleClick)
    }

    /// Claim the gesture started by this press for `id`.
    ///
    /// Succeeds when the event is a press inside the receiving node and the
    /// gesture is unowned or already owned by `id` (the double-click case).
    /// A successful claim consumes the event.
    pub fn take_mouse_press(&mut self, id: ElementId) -> bool {
        if !self.is_press() || !self.is_local() {
            return false;
        }
        match self.owner {
            Some(owner) if owner != id => false,
            _ => {
                self.owner = Some(id);
                self.consumed = true;
                true
            }
        }
    }

    /// Take ownership regardless of the current owner.
    pub fn force_mouse_take(&mut self, id: ElementId) {
        self.owner = Some(id);
        self.consumed = true;
    }

    /// Check if `id` owns the gesture this drag belongs to.
    pub fn is_dragging(&self, id: ElementId) -> bool {
        self.action == MouseAction::Dragged && self.owner == Some(id)
    }

    /// Current gesture owner.
    pub fn owner(&self) -> Option<ElementId> {
        self.owner
    }

    /// Owner at the time the event entered the tree.
    pub fn owner_before(&self) -> Option<ElementId> {
        self.owner_before
    }

    /// Check if `id` owns the gesture.
    pub fn is_owned_by(&self, id: ElementId) -> bool {
        self.owner == Some(id)
    }

    /// Mark the event as handled.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Panel under the cursor when the event was raised.
    pub fn current_panel(&self) -> Option<ElementId> {
        self.current_panel
    }

    /// Check if `id` is the panel under the cursor.
    pub fn check_current_panel(&self, id: ElementId) -> bool {
        self.current_panel == Some(id)
    }
}

// =========================================================================
// Keyboard
// =========================================================================

/// Named keys (non-character keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Enter,
    Tab,

    // Special
    Escape,
    Space,

    Unknown,
}

/// A keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A named (special) key.
    Named(NamedKey),

    /// A character key.
    Character(char),
}

impl Key {
    /// Check if this is the given character key.
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Key::Character(k) if *k == c)
    }
}

/// What happened to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardAction {
    Pressed,
}

/// A key event, broadcast to every visible node.
#[derive(Debug, Clone)]
pub struct KeyboardArguments {
    pub action: KeyboardAction,
    pub key: Key,
    current_panel: Option<ElementId>,
}

impl KeyboardArguments {
    pub fn new(action: KeyboardAction, key: Key, current_panel: Option<ElementId>) -> Self {
        Self {
            action,
            key,
            current_panel,
        }
    }

    /// Panel under the cursor when the key was pressed.
    pub fn current_panel(&self) -> Option<ElementId> {
        self.current_panel
    }

    /// Check if `id` is the panel under the cursor.
    pub fn check_current_panel(&self, id: ElementId) -> bool {
        self.current_panel == Some(id)
    }
}

// =========================================================================
// Other lifecycle arguments
// =========================================================================

/// Files dropped onto a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FilesDraggedArguments {
    /// Drop point relative to the receiving panel.
    pub local_position: Point,
    /// Drop point in window space.
    pub global_position: Point,
    pub files: Vec<PathBuf>,
}

/// Per-frame update notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateArguments;

/// Fired when an element's bounds change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsChangeArguments {
    /// New bounds in the parent's frame.
    pub bounds: Rect,
    /// New bounds in the element's own frame.
    pub local_bounds: Rect,
}
