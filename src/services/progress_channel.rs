use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use crate::enums::progress_event::ProgressEvent;

/// Delivers progress events to whoever started the run.
///
/// A streaming channel reports itself closed once the receiver is dropped, which the
/// orchestrator treats as a client disconnect. A silent channel discards events and
/// never closes.
#[derive(Debug, Clone)]
pub struct ProgressChannel {
    sender: Option<UnboundedSender<ProgressEvent>>,
}

impl ProgressChannel {
    pub fn streaming() -> (Self, UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { sender: Some(tx) }, rx)
    }

    pub fn silent() -> Self {
        Self { sender: None }
    }

    pub fn emit(&self, event: ProgressEvent) {
        if let Some(sender) = &self.sender {
            if sender.send(event).is_err() {
                log::debug!("Progress receiver dropped; event discarded");
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.as_ref().map_or(false, |s| s.is_closed())
    }
}
