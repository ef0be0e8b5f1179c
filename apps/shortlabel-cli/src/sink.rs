use std::io::Write;
use std::sync::Mutex;

use shortlabel_engine::{EventSink, LabelEvent};
use tracing::warn;

/// Writes each event as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&self, event: LabelEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!(feature = event.feature_id(), %e, "could not serialize event");
                return;
            }
        };
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{line}") {
            warn!(%e, "could not write event");
        }
    }
}
