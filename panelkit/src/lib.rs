//! panelkit: a retained-mode panel overlay for real-time graphics hosts.
//!
//! panelkit manages a tree of panels positioned in window space and routes
//! host input through it:
//! - Hit-testing of the panel under the cursor, with a hover highlight
//! - Mouse gesture ownership and double-click detection
//! - Maximising one panel to the full viewport
//! - Scrollable element stacks with elastic bounds
//!
//! # Architecture
//!
//! A [`Controller`] owns the root [`PanelGroup`] and is fed raw
//! [`InputEvent`]s by a [`Host`]. Every event is wrapped once into an
//! argument object ([`MouseArguments`], [`KeyboardArguments`], ...) and
//! re-localized at each level as it descends the tree. Drawing threads a
//! scoped [`DrawContext`] through the same recursion.
//!
//! # Usage
//!
//! ```ignore
//! use panelkit::{Controller, Element, PanelGroup, share};
//!
//! let root = share(PanelGroup::grid());
//! let mut controller = Controller::new(host);
//! controller.init(root)?;
//! controller.add(share(Element::new()));
//!
//! // per frame
//! controller.update();
//! controller.draw(&mut canvas);
//! ```

// Core primitives
pub mod primitives;
pub mod element_id;
pub mod config;
pub mod error;

// Events and drawing
pub mod arguments;
pub mod observer;
pub mod draw;

// Tree
pub mod element;
pub mod dispatch;
pub mod panel;
pub mod widgets;

// Host integration
pub mod host;
pub mod controller;

pub use primitives::{Color, Point, Rect, Size};
pub use element_id::ElementId;
pub use config::ControllerConfig;
pub use error::GuiError;
pub use arguments::{
    BoundsChangeArguments, FilesDraggedArguments, Key, KeyboardAction, KeyboardArguments,
    MouseAction, MouseArguments, MouseButton, NamedKey, UpdateArguments,
};
pub use observer::{Event, ListenerId};
pub use draw::{Canvas, DrawArguments, DrawContext, DrawEvent};
pub use element::{Element, ElementGroup, ElementPtr, MouseState, Widget};
pub use panel::{
    ImagePanel, Layout, Panel, PanelGroup, PanelPtr, PixelsVector, Scroll, WeakPanel, fit_image,
    share,
};
pub use widgets::Spacer;
pub use host::{Host, InputEvent};
pub use controller::{Controller, Inspector};
