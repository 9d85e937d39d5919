use std::sync::mpsc;

use crate::ExportEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ExportEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: ExportEvent) {}
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<ExportEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<ExportEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ExportEvent) {
        let _ = self.tx.send(event);
    }
}
