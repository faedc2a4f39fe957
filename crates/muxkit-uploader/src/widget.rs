//! Uploader widget state.
//!
//! Wraps the orchestrator with what the embedding UI needs: an editor
//! placeholder, a busy flag that keeps one session per widget, a live
//! progress view, and a completion view that falls back to idle after a
//! short display delay.

use crate::completion::{completion_channel, HostCallback, UploadCompletion};
use crate::error::{UploadError, UploadResult};
use crate::file::SelectedFile;
use crate::orchestrator::{UploadOrchestrator, DEFAULT_MAX_FILE_SIZE_MB};
use crate::phase::UploadPhase;
use crate::progress::{Checkpoint, UploadObserver};
use crate::retry::PollPolicy;
use crate::transport::ProxyTransport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SUCCESS_DISPLAY_DELAY: Duration = Duration::from_secs(3);

pub const EDITOR_TITLE: &str = "Mux Video Uploader";
pub const EDITOR_HINT: &str = "Component will be functional in preview/published app";

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub backend_url: String,
    pub max_file_size_mb: u64,
    /// Running inside the host's design-time editor
    pub editor: bool,
    pub success_display: Duration,
    pub poll: PollPolicy,
}

impl UploaderConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            editor: false,
            success_display: SUCCESS_DISPLAY_DELAY,
            poll: PollPolicy::default(),
        }
    }
}

/// What the widget shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum UploaderView {
    Editor {
        title: String,
        backend_url: String,
        hint: String,
    },
    /// Select button enabled; the last finished upload stays available for copying.
    Idle { last_playback_id: Option<String> },
    /// Select button disabled while a session runs.
    Busy { progress: u8, status_text: String },
    /// Shown for `success_display` after a session completes.
    Complete { playback_id: String },
}

#[derive(Debug, Default)]
struct ViewState {
    progress: u8,
    status_text: String,
    last_playback_id: Option<String>,
    completed: Option<String>,
    last_alert: Option<String>,
}

struct WidgetState {
    busy: AtomicBool,
    view: Mutex<ViewState>,
}

impl WidgetState {
    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        if let Ok(mut view) = self.view.lock() {
            f(&mut view);
        }
    }

    fn finish_display(&self) {
        self.update(|view| {
            view.completed = None;
            view.progress = 0;
            view.status_text.clear();
        });
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Mirrors orchestrator notifications into the widget view, then forwards them.
struct ViewObserver {
    state: Arc<WidgetState>,
    host: Option<Arc<dyn UploadObserver>>,
}

impl UploadObserver for ViewObserver {
    fn on_phase(&self, phase: UploadPhase) {
        if let Some(host) = &self.host {
            host.on_phase(phase);
        }
    }

    fn on_progress(&self, checkpoint: Checkpoint) {
        self.state.update(|view| {
            view.progress = checkpoint.percent;
            view.status_text = checkpoint.status.to_string();
        });
        if let Some(host) = &self.host {
            host.on_progress(checkpoint);
        }
    }

    fn on_alert(&self, message: &str) {
        self.state
            .update(|view| view.last_alert = Some(message.to_string()));
        if let Some(host) = &self.host {
            host.on_alert(message);
        }
    }

    fn on_reset(&self) {
        self.state.update(|view| {
            view.progress = 0;
            view.status_text.clear();
        });
        if let Some(host) = &self.host {
            host.on_reset();
        }
    }
}

pub struct UploaderWidget {
    config: UploaderConfig,
    orchestrator: UploadOrchestrator,
    state: Arc<WidgetState>,
}

impl UploaderWidget {
    pub fn new(config: UploaderConfig, transport: Arc<dyn ProxyTransport>) -> Self {
        Self::build(config, transport, None)
    }

    /// Same as `new`, also forwarding every notification to `observer`.
    pub fn with_observer(
        config: UploaderConfig,
        transport: Arc<dyn ProxyTransport>,
        observer: Arc<dyn UploadObserver>,
    ) -> Self {
        Self::build(config, transport, Some(observer))
    }

    fn build(
        config: UploaderConfig,
        transport: Arc<dyn ProxyTransport>,
        host: Option<Arc<dyn UploadObserver>>,
    ) -> Self {
        let state = Arc::new(WidgetState {
            busy: AtomicBool::new(false),
            view: Mutex::new(ViewState::default()),
        });
        let observer = Arc::new(ViewObserver {
            state: state.clone(),
            host,
        });
        let orchestrator = UploadOrchestrator::new(transport)
            .with_observer(observer)
            .with_max_file_size_mb(config.max_file_size_mb)
            .with_poll_policy(config.poll.clone());

        Self {
            config,
            orchestrator,
            state,
        }
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy.load(Ordering::SeqCst)
    }

    pub fn view(&self) -> UploaderView {
        if self.config.editor {
            return UploaderView::Editor {
                title: EDITOR_TITLE.to_string(),
                backend_url: self.config.backend_url.clone(),
                hint: EDITOR_HINT.to_string(),
            };
        }

        let view = match self.state.view.lock() {
            Ok(view) => view,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(playback_id) = &view.completed {
            return UploaderView::Complete {
                playback_id: playback_id.clone(),
            };
        }
        if self.is_busy() {
            return UploaderView::Busy {
                progress: view.progress,
                status_text: view.status_text.clone(),
            };
        }
        UploaderView::Idle {
            last_playback_id: view.last_playback_id.clone(),
        }
    }

    /// Message of the most recent alert, if any.
    pub fn last_alert(&self) -> Option<String> {
        self.state
            .view
            .lock()
            .ok()
            .and_then(|view| view.last_alert.clone())
    }

    /// Playback ID to put on the clipboard, once an upload has finished.
    pub fn copy_playback_id(&self) -> Option<String> {
        self.state
            .view
            .lock()
            .ok()
            .and_then(|view| view.last_playback_id.clone())
    }

    /// Upload `file` and report the result to `callback`.
    ///
    /// Rejected with `Busy` while another session runs and with `EditorMode`
    /// inside the editor. The callback fires once, on success only.
    pub async fn select(
        &self,
        file: SelectedFile,
        callback: HostCallback,
    ) -> UploadResult<UploadCompletion> {
        if self.config.editor {
            return Err(UploadError::EditorMode);
        }
        if self
            .state
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(UploadError::Busy);
        }
        self.state.update(|view| view.last_alert = None);

        let (sender, receiver) = completion_channel();
        let (result, _delivered) = tokio::join!(
            self.orchestrator.run(file, sender),
            receiver.deliver_to(callback)
        );

        match &result {
            Ok(done) => {
                let playback_id = done.playback_id.clone();
                self.state.update(|view| {
                    view.last_playback_id = Some(playback_id.clone());
                    view.completed = Some(playback_id);
                });

                let state = self.state.clone();
                let delay = self.config.success_display;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    state.finish_display();
                });
            }
            Err(_) => {
                self.state.busy.store(false, Ordering::SeqCst);
            }
        }

        result
    }
}
