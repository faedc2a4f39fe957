/// Playback notifications forwarded to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Started,
    Ended,
}

impl PlaybackEvent {
    /// Map a native media event name; everything else is ignored.
    pub fn from_dom_event(name: &str) -> Option<Self> {
        match name {
            "play" => Some(PlaybackEvent::Started),
            "ended" => Some(PlaybackEvent::Ended),
            _ => None,
        }
    }
}

type Handler = Box<dyn Fn() + Send + Sync>;

/// Host outputs for the player. Both are optional.
#[derive(Default)]
pub struct PlaybackHandlers {
    on_playback_started: Option<Handler>,
    on_playback_ended: Option<Handler>,
}

impl std::fmt::Debug for PlaybackHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackHandlers")
            .field("on_playback_started", &self.on_playback_started.is_some())
            .field("on_playback_ended", &self.on_playback_ended.is_some())
            .finish()
    }
}

impl PlaybackHandlers {
    pub fn on_playback_started(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_playback_started = Some(Box::new(f));
        self
    }

    pub fn on_playback_ended(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_playback_ended = Some(Box::new(f));
        self
    }

    /// Returns whether a handler ran.
    pub fn dispatch(&self, event: PlaybackEvent) -> bool {
        let handler = match event {
            PlaybackEvent::Started => &self.on_playback_started,
            PlaybackEvent::Ended => &self.on_playback_ended,
        };
        match handler {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }
}
