//! Small reusable elements for panel layouts.

mod spacer;

pub use spacer::Spacer;
