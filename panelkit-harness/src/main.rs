//! panelkit-replay: replay a JSON input script against the demo tree.
//!
//! Prints the final controller state as JSON. `RUST_LOG` controls logging.

use anyhow::Context;
use panelkit::Controller;
use panelkit_harness::{HeadlessHost, RecordingCanvas, Script, build_demo, run_script};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: panelkit-replay <script.json>")?;
    let script = Script::load(&path).with_context(|| format!("loading {path}"))?;

    let mut controller = Controller::new(HeadlessHost::new(script.viewport));
    build_demo(&mut controller)?;

    let mut canvas = RecordingCanvas::new();
    let report = run_script(&mut controller, &script, &mut canvas);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
