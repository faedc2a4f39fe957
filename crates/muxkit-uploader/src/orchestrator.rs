//! Direct-upload orchestrator.
//!
//! Drives one file through the vendor handshake via the proxy: create an upload
//! URL, PUT the file to it, then poll the upload and its asset until the asset
//! is ready. The result reaches the host only through a `CompletionSender`.

use crate::completion::{CompletionSender, UploadCompletion};
use crate::error::{UploadError, UploadResult};
use crate::file::SelectedFile;
use crate::phase::UploadPhase;
use crate::progress::{self, Checkpoint, TracingObserver, UploadObserver};
use crate::retry::{PollPolicy, RetryOutcome};
use crate::transport::ProxyTransport;
use muxkit_core::Asset;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 500;

/// State of one upload invocation. Owned by the run that created it.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub file: SelectedFile,
    pub phase: UploadPhase,
    pub upload_id: Option<String>,
    pub asset_id: Option<String>,
    pub playback_id: Option<String>,
    pub progress: u8,
    pub status_text: String,
}

impl UploadSession {
    fn new(file: SelectedFile) -> Self {
        Self {
            file,
            phase: UploadPhase::Idle,
            upload_id: None,
            asset_id: None,
            playback_id: None,
            progress: 0,
            status_text: String::new(),
        }
    }
}

/// Where to send the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub upload_id: String,
    pub url: String,
}

pub struct UploadOrchestrator {
    transport: Arc<dyn ProxyTransport>,
    observer: Arc<dyn UploadObserver>,
    max_file_size_mb: u64,
    poll: PollPolicy,
}

impl UploadOrchestrator {
    pub fn new(transport: Arc<dyn ProxyTransport>) -> Self {
        Self {
            transport,
            observer: Arc::new(TracingObserver),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            poll: PollPolicy::default(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn UploadObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_max_file_size_mb(mut self, max_file_size_mb: u64) -> Self {
        self.max_file_size_mb = max_file_size_mb;
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_mb
    }

    fn advance(&self, session: &mut UploadSession, next: UploadPhase) -> UploadResult<()> {
        session.phase = session.phase.transition(next)?;
        self.observer.on_phase(next);
        Ok(())
    }

    fn publish(&self, session: &mut UploadSession, checkpoint: Checkpoint) {
        session.progress = checkpoint.percent;
        session.status_text = checkpoint.status.to_string();
        self.observer.on_progress(checkpoint);
    }

    /// Check size and type of a picked file and open a session for it.
    ///
    /// No network call is made here.
    pub fn select_file(&self, file: SelectedFile) -> UploadResult<UploadSession> {
        let mut session = UploadSession::new(file);
        self.advance(&mut session, UploadPhase::ValidatingFile)?;

        let size_mb = session.file.size_mb();
        if size_mb > self.max_file_size_mb as f64 {
            return Err(UploadError::FileTooLarge {
                size_mb,
                max_mb: self.max_file_size_mb,
            });
        }

        if !session.file.is_video() {
            return Err(UploadError::InvalidFileType {
                mime_type: session.file.mime_type.clone(),
            });
        }

        self.advance(&mut session, UploadPhase::RequestingUploadUrl)?;
        Ok(session)
    }

    /// Ask the proxy for a direct upload URL.
    pub async fn request_upload_url(&self, session: &mut UploadSession) -> UploadResult<UploadTarget> {
        self.publish(session, progress::CREATING_UPLOAD_URL);

        let envelope = self.transport.create_upload().await.map_err(|e| {
            UploadError::UploadUrlCreationFailed {
                reason: e.to_string(),
            }
        })?;

        let upload = envelope
            .into_data()
            .map_err(|reason| UploadError::UploadUrlCreationFailed { reason })?;

        let url = upload
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| UploadError::UploadUrlCreationFailed {
                reason: "Response did not include an upload URL".to_string(),
            })?;
        if upload.id.is_empty() {
            return Err(UploadError::UploadUrlCreationFailed {
                reason: "Response did not include an upload ID".to_string(),
            });
        }

        tracing::info!(upload_id = %upload.id, "Upload URL created");
        session.upload_id = Some(upload.id.clone());
        self.advance(session, UploadPhase::Transferring)?;

        Ok(UploadTarget {
            upload_id: upload.id,
            url,
        })
    }

    /// PUT the file body to the upload URL, declaring the file's own MIME type.
    pub async fn transfer_file(
        &self,
        session: &mut UploadSession,
        target: &UploadTarget,
    ) -> UploadResult<()> {
        self.publish(session, progress::UPLOADING);

        self.transport
            .put_file(&target.url, &session.file)
            .await
            .map_err(|e| UploadError::TransferFailed {
                reason: e.to_string(),
            })?;

        tracing::info!(
            upload_id = %target.upload_id,
            size = session.file.size,
            "File transferred"
        );
        self.publish(session, progress::PROCESSING);
        self.advance(session, UploadPhase::Polling)?;
        Ok(())
    }

    /// Poll until the upload's asset is ready or the attempt budget runs out.
    ///
    /// An attempt counts as not ready when the upload has no asset yet, the
    /// asset is not `ready`, or either call fails. The session records the
    /// asset id as soon as the upload reports one, ready or not.
    pub async fn poll_status(
        &self,
        session: &mut UploadSession,
        upload_id: &str,
    ) -> UploadResult<Asset> {
        let transport = self.transport.clone();
        let cancel = CancellationToken::new();
        let seen_asset = OnceLock::new();

        let outcome = self
            .poll
            .run(&cancel, |attempt| {
                let transport = transport.clone();
                let seen_asset = &seen_asset;
                async move { check_once(transport.as_ref(), upload_id, attempt, seen_asset).await }
            })
            .await;

        if let Some(asset_id) = seen_asset.into_inner() {
            session.asset_id = Some(asset_id);
        }

        match outcome {
            RetryOutcome::Ready(asset) => {
                session.asset_id = Some(asset.id.clone());
                Ok(asset)
            }
            RetryOutcome::Exhausted { attempts } | RetryOutcome::Cancelled { attempts } => {
                tracing::warn!(upload_id, attempts, "Asset never became ready");
                Err(UploadError::UploadTimeout { attempts })
            }
        }
    }

    /// Turn a ready asset into the host-facing completion.
    fn finish(&self, session: &mut UploadSession, asset: Asset) -> UploadResult<UploadCompletion> {
        let playback_id = asset
            .ready_playback_id()
            .map(str::to_string)
            .ok_or_else(|| UploadError::MissingPlaybackId {
                asset_id: asset.id.clone(),
            })?;

        session.playback_id = Some(playback_id.clone());
        self.advance(session, UploadPhase::Ready)?;
        self.publish(session, progress::COMPLETE);

        Ok(UploadCompletion {
            playback_id,
            asset_id: asset.id,
            duration: asset.duration,
            status: asset.status,
        })
    }

    async fn drive(&self, session: &mut UploadSession) -> UploadResult<UploadCompletion> {
        let target = self.request_upload_url(session).await?;
        self.transfer_file(session, &target).await?;
        let asset = self.poll_status(session, &target.upload_id).await?;
        self.finish(session, asset)
    }

    /// Run a whole session.
    ///
    /// On success the completion goes to `completion` and is also returned. On
    /// failure the user is alerted, progress is reset, and `completion` is
    /// dropped unfired.
    pub async fn run(
        &self,
        file: SelectedFile,
        completion: CompletionSender,
    ) -> UploadResult<UploadCompletion> {
        let file_name = file.name.clone();

        let result = match self.select_file(file) {
            Ok(mut session) => match self.drive(&mut session).await {
                Ok(done) => Ok(done),
                Err(err) => {
                    if session.phase.can_transition_to(UploadPhase::Failed) {
                        session.phase = UploadPhase::Failed;
                        self.observer.on_phase(UploadPhase::Failed);
                    }
                    session.progress = 0;
                    session.status_text.clear();
                    Err(err)
                }
            },
            Err(err) => {
                self.observer.on_phase(UploadPhase::Failed);
                Err(err)
            }
        };

        match result {
            Ok(done) => {
                tracing::info!(
                    file = %file_name,
                    playback_id = %done.playback_id,
                    asset_id = %done.asset_id,
                    "Upload complete"
                );
                if !completion.complete(done.clone()) {
                    tracing::debug!("Host stopped listening before completion");
                }
                Ok(done)
            }
            Err(err) => {
                tracing::warn!(
                    file = %file_name,
                    error = %err,
                    reason = err.reason().unwrap_or(""),
                    "Upload failed"
                );
                self.observer.on_alert(&err.alert_message());
                self.observer.on_reset();
                drop(completion);
                Err(err)
            }
        }
    }
}

async fn check_once(
    transport: &dyn ProxyTransport,
    upload_id: &str,
    attempt: u32,
    seen_asset: &OnceLock<String>,
) -> Option<Asset> {
    let upload = match transport.get_upload(upload_id).await {
        Ok(envelope) => envelope.into_data().ok()?,
        Err(e) => {
            tracing::warn!(upload_id, attempt, error = %e, "Upload status check failed");
            return None;
        }
    };

    let Some(asset_id) = upload.asset_id.filter(|id| !id.is_empty()) else {
        tracing::debug!(upload_id, attempt, status = %upload.status, "No asset yet");
        return None;
    };
    if seen_asset.set(asset_id.clone()).is_ok() {
        tracing::info!(upload_id, %asset_id, "Asset created");
    }

    let asset = match transport.get_asset(&asset_id).await {
        Ok(envelope) => envelope.into_data().ok()?,
        Err(e) => {
            tracing::warn!(%asset_id, attempt, error = %e, "Asset status check failed");
            return None;
        }
    };

    tracing::debug!(%asset_id, attempt, status = %asset.status, "Asset status");
    asset.is_ready().then_some(asset)
}
