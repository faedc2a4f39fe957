use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Where an upload session is in the direct-upload sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    Idle,
    ValidatingFile,
    RequestingUploadUrl,
    Transferring,
    Polling,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Illegal upload phase transition: {from} -> {to}")]
pub struct PhaseError {
    pub from: UploadPhase,
    pub to: UploadPhase,
}

impl UploadPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadPhase::Ready | UploadPhase::Failed)
    }

    pub fn can_transition_to(self, next: UploadPhase) -> bool {
        use UploadPhase::*;

        match (self, next) {
            (Idle, ValidatingFile)
            | (ValidatingFile, RequestingUploadUrl)
            | (RequestingUploadUrl, Transferring)
            | (Transferring, Polling)
            | (Polling, Ready) => true,
            (from, Failed) => from != Idle && !from.is_terminal(),
            _ => false,
        }
    }

    pub fn transition(self, next: UploadPhase) -> Result<UploadPhase, PhaseError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(PhaseError {
                from: self,
                to: next,
            })
        }
    }
}

impl Display for UploadPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            UploadPhase::Idle => "idle",
            UploadPhase::ValidatingFile => "validating_file",
            UploadPhase::RequestingUploadUrl => "requesting_upload_url",
            UploadPhase::Transferring => "transferring",
            UploadPhase::Polling => "polling",
            UploadPhase::Ready => "ready",
            UploadPhase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
