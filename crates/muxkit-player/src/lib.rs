//! Video player widget for muxkit.
//!
//! Stateless apart from the script guard: props in, markup out. Playback
//! events from the embedded element are forwarded to the host's handlers.

pub mod events;
pub mod props;
pub mod render;
pub mod script;

pub use events::{PlaybackEvent, PlaybackHandlers};
pub use props::PlayerProps;
pub use render::{PlayerView, PLACEHOLDER_TEXT};
pub use script::{HtmlDocument, ScriptHost, ScriptLoader, ScriptMount, Teardown, PLAYER_SCRIPT_URL};

use std::sync::Arc;

/// A mounted player. Dropping it unmounts.
#[derive(Debug)]
pub struct VideoPlayer<'a> {
    props: PlayerProps,
    editor: bool,
    handlers: PlaybackHandlers,
    _script: Option<ScriptMount<'a>>,
}

impl VideoPlayer<'static> {
    /// Mount against the process-wide player script loader.
    pub fn mount(
        props: PlayerProps,
        editor: bool,
        handlers: PlaybackHandlers,
        host: Arc<dyn ScriptHost>,
    ) -> Self {
        VideoPlayer::mount_with(ScriptLoader::player(), props, editor, handlers, host)
    }
}

impl<'a> VideoPlayer<'a> {
    /// The editor never loads the script.
    pub fn mount_with(
        loader: &'a ScriptLoader,
        props: PlayerProps,
        editor: bool,
        handlers: PlaybackHandlers,
        host: Arc<dyn ScriptHost>,
    ) -> Self {
        let script = (!editor).then(|| loader.mount(host));
        Self {
            props,
            editor,
            handlers,
            _script: script,
        }
    }

    pub fn props(&self) -> &PlayerProps {
        &self.props
    }

    pub fn view(&self) -> PlayerView {
        PlayerView::from_props(&self.props, self.editor)
    }

    /// Forward a native media event from the embedded element.
    pub fn handle_dom_event(&self, name: &str) -> bool {
        match PlaybackEvent::from_dom_event(name) {
            Some(event) => {
                tracing::debug!(?event, playback_id = ?self.props.playback_id(), "Playback event");
                self.handlers.dispatch(event)
            }
            None => false,
        }
    }
}
