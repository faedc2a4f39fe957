//! Video uploader for muxkit.
//!
//! `UploadOrchestrator` runs the three-call direct-upload protocol against the
//! proxy (create upload URL, PUT the file, poll until the asset is ready).
//! `UploaderWidget` adds the per-widget state a host UI renders. Hosts receive
//! the result through a single-shot completion channel in one of two callback
//! profiles.

pub mod completion;
pub mod error;
pub mod file;
pub mod orchestrator;
pub mod phase;
pub mod progress;
pub mod retry;
pub mod transport;
pub mod widget;

pub use completion::{
    completion_channel, CompletionReceiver, CompletionSender, HostCallback, UploadCompletion,
};
pub use error::{UploadError, UploadResult};
pub use file::SelectedFile;
pub use orchestrator::{UploadOrchestrator, UploadSession, UploadTarget};
pub use phase::UploadPhase;
pub use progress::{Checkpoint, RecordingObserver, TracingObserver, UploadObserver};
pub use retry::{BackoffSchedule, FixedInterval, LinearBackoff, PollPolicy, RetryOutcome};
pub use transport::ProxyTransport;
pub use widget::{UploaderConfig, UploaderView, UploaderWidget};
