//! GUI error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuiError {
    #[error("gui is already initialised")]
    AlreadyInitialised,

    #[error("cannot perform this action as gui is not initialised")]
    NotInitialised,

    #[error("selection index {index} out of range ({count} images)")]
    SelectionOutOfRange { index: usize, count: usize },
}
