// src/report/json.rs
// =============================================================================
// Machine-readable report: one pretty-printed JSON document.
//
// Progress messages are sent to the log instead of the writer, so stdout holds
// nothing but the document and can be piped straight into jq.
// =============================================================================

use std::io::{self, Write};

use tracing::{error, info, warn};

use super::{Reporter, RunReport};

pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn info(&mut self, message: &str) {
        info!("{message}");
    }

    fn success(&mut self, message: &str) {
        info!("{message}");
    }

    fn warning(&mut self, message: &str) {
        warn!("{message}");
    }

    fn error(&mut self, message: &str) {
        error!("{message}");
    }

    fn render(&mut self, report: &RunReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
