//! Headless harness for panelkit.
//!
//! Runs a [`panelkit::Controller`] without a window: [`HeadlessHost`] stands
//! in for the runtime (viewport, manual clock, fullscreen toggles),
//! [`RecordingCanvas`] records every draw call, and [`Script`] replays a JSON
//! list of input/frame steps.

mod canvas;
mod demo;
mod host;
mod script;

pub use canvas::{DrawCommand, RecordingCanvas};
pub use demo::build_demo;
pub use host::HeadlessHost;
pub use script::{ReplayReport, Script, ScriptError, Step, run_script};
