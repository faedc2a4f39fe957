use serde::{Deserialize, Serialize};

/// Per-instance player configuration as the host supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProps {
    #[serde(default)]
    pub playback_id: Option<String>,
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default = "default_show_controls")]
    pub show_controls: bool,
}

fn default_show_controls() -> bool {
    true
}

impl Default for PlayerProps {
    fn default() -> Self {
        Self {
            playback_id: None,
            autoplay: false,
            show_controls: default_show_controls(),
        }
    }
}

impl PlayerProps {
    pub fn new(playback_id: impl Into<String>) -> Self {
        Self {
            playback_id: Some(playback_id.into()),
            ..Self::default()
        }
    }

    pub fn autoplay(mut self, value: bool) -> Self {
        self.autoplay = value;
        self
    }

    pub fn show_controls(mut self, value: bool) -> Self {
        self.show_controls = value;
        self
    }

    /// Playback ID, treating blank as absent.
    pub fn playback_id(&self) -> Option<&str> {
        self.playback_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
