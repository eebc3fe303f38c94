//! Element identity.
//!
//! `ElementId` is the weak handle used wherever the tree needs to remember a
//! node without keeping it alive: the owner of an active mouse gesture and
//! the "current panel" tag carried by argument objects. An id whose element
//! has been dropped simply never matches again.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique element IDs.
static ELEMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for an element or panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Create a new unique element ID.
    ///
    /// Each call returns a different ID.
    pub fn new() -> Self {
        Self(ELEMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw numeric value.
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
