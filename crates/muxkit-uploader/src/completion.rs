//! Single-shot delivery of a finished upload to the host.
//!
//! `CompletionSender::complete` consumes the sender, so a session can report
//! success at most once. A sender dropped without completing closes the
//! channel, which is how a failed session looks from the host side.

use muxkit_core::AssetStatus;
use serde::Serialize;
use tokio::sync::oneshot;

/// Identifiers of a video that is ready to play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadCompletion {
    pub playback_id: String,
    pub asset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub status: AssetStatus,
}

type PositionalFn = Box<dyn FnOnce(String, String) + Send>;
type StructuredFn = Box<dyn FnOnce(UploadCompletion) + Send>;

/// Host integration profiles for the upload-complete output.
pub enum HostCallback {
    /// `(playback_id, asset_id)`
    Positional(PositionalFn),
    /// The whole completion, including duration and status.
    Structured(StructuredFn),
}

impl HostCallback {
    pub fn positional(f: impl FnOnce(String, String) + Send + 'static) -> Self {
        HostCallback::Positional(Box::new(f))
    }

    pub fn structured(f: impl FnOnce(UploadCompletion) + Send + 'static) -> Self {
        HostCallback::Structured(Box::new(f))
    }

    pub fn invoke(self, completion: UploadCompletion) {
        match self {
            HostCallback::Positional(f) => f(completion.playback_id, completion.asset_id),
            HostCallback::Structured(f) => f(completion),
        }
    }
}

impl std::fmt::Debug for HostCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostCallback::Positional(_) => f.write_str("HostCallback::Positional"),
            HostCallback::Structured(_) => f.write_str("HostCallback::Structured"),
        }
    }
}

pub fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    let (tx, rx) = oneshot::channel();
    (CompletionSender { tx }, CompletionReceiver { rx })
}

#[derive(Debug)]
pub struct CompletionSender {
    tx: oneshot::Sender<UploadCompletion>,
}

impl CompletionSender {
    /// Returns `false` if the host stopped listening.
    pub fn complete(self, completion: UploadCompletion) -> bool {
        self.tx.send(completion).is_ok()
    }
}

#[derive(Debug)]
pub struct CompletionReceiver {
    rx: oneshot::Receiver<UploadCompletion>,
}

impl CompletionReceiver {
    /// `None` once the session ended without completing.
    pub async fn wait(self) -> Option<UploadCompletion> {
        self.rx.await.ok()
    }

    /// Wait for the result and hand it to `callback`; `false` if it never came.
    pub async fn deliver_to(self, callback: HostCallback) -> bool {
        match self.wait().await {
            Some(completion) => {
                callback.invoke(completion);
                true
            }
            None => false,
        }
    }
}
