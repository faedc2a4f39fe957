//! User-visible progress reporting.
//!
//! Percentages are fixed checkpoints published at phase boundaries, not
//! measured transfer progress.

use crate::phase::UploadPhase;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub percent: u8,
    pub status: &'static str,
}

pub const CREATING_UPLOAD_URL: Checkpoint = Checkpoint {
    percent: 10,
    status: "Creating upload URL...",
};

pub const UPLOADING: Checkpoint = Checkpoint {
    percent: 30,
    status: "Uploading video...",
};

pub const PROCESSING: Checkpoint = Checkpoint {
    percent: 60,
    status: "Processing video...",
};

pub const COMPLETE: Checkpoint = Checkpoint {
    percent: 100,
    status: "Upload complete!",
};

/// Receives what the user should see while a session runs.
pub trait UploadObserver: Send + Sync {
    fn on_phase(&self, _phase: UploadPhase) {}

    fn on_progress(&self, checkpoint: Checkpoint);

    fn on_alert(&self, message: &str);

    /// Progress back to 0 and status text cleared.
    fn on_reset(&self) {}
}

/// Logs progress; used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl UploadObserver for TracingObserver {
    fn on_phase(&self, phase: UploadPhase) {
        tracing::debug!(%phase, "Upload phase changed");
    }

    fn on_progress(&self, checkpoint: Checkpoint) {
        tracing::info!(progress = checkpoint.percent, "{}", checkpoint.status);
    }

    fn on_alert(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    Phase(UploadPhase),
    Progress(u8, String),
    Alert(String),
    Reset,
}

/// Keeps every notification in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn progress_values(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Progress(percent, _) => Some(percent),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ObservedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl UploadObserver for RecordingObserver {
    fn on_phase(&self, phase: UploadPhase) {
        self.push(ObservedEvent::Phase(phase));
    }

    fn on_progress(&self, checkpoint: Checkpoint) {
        self.push(ObservedEvent::Progress(
            checkpoint.percent,
            checkpoint.status.to_string(),
        ));
    }

    fn on_alert(&self, message: &str) {
        self.push(ObservedEvent::Alert(message.to_string()));
    }

    fn on_reset(&self) {
        self.push(ObservedEvent::Reset);
    }
}
