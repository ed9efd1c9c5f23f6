//! JSON-lines frame output.
//!
//! Each frame is written as one compact JSON object followed by a newline,
//! then flushed, so a downstream plotter can consume frames as they happen.
//! After the first write failure the renderer goes quiet and reports the
//! error from [`JsonLinesRenderer::finish`].

use std::io::Write;

use forage_core::runner::FrameCallback;
use forage_core::snapshot::SimulationSnapshot;
use tracing::{debug, warn};

use crate::error::EngineError;

/// Frame callback that streams snapshots as JSON lines.
pub struct JsonLinesRenderer<W> {
    out: W,
    error: Option<std::io::Error>,
}

impl<W: Write> JsonLinesRenderer<W> {
    /// Render into `out`.
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Return the writer, or the first error hit while rendering.
    pub fn finish(self) -> Result<W, EngineError> {
        match self.error {
            Some(source) => Err(EngineError::Render { source }),
            None => Ok(self.out),
        }
    }

    fn write_frame(&mut self, snapshot: &SimulationSnapshot) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> FrameCallback for JsonLinesRenderer<W> {
    fn on_frame(&mut self, snapshot: &SimulationSnapshot) {
        if self.error.is_some() {
            return;
        }
        debug!(
            day = snapshot.day,
            agents = snapshot.agents.len(),
            resources = snapshot.resources.len(),
            "frame"
        );
        if let Err(e) = self.write_frame(snapshot) {
            warn!(error = %e, "frame output failed, further frames dropped");
            self.error = Some(e);
        }
    }
}
