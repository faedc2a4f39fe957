//! Player markup.
//!
//! With a playback ID the view is the vendor's `<mux-player>` custom element;
//! without one (or inside the host's editor) it is a static placeholder and no
//! embed markup is built at all.

use crate::props::PlayerProps;
use std::fmt::Write;

pub const PLACEHOLDER_TEXT: &str = "No video loaded";
pub const PLAYER_STYLE: &str = "width: 100%; height: 100%; border-radius: 8px;";

/// What the player shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerView {
    Placeholder,
    Embed { markup: String },
}

impl PlayerView {
    pub fn from_props(props: &PlayerProps, editor: bool) -> Self {
        if editor {
            return PlayerView::Placeholder;
        }
        match props.playback_id() {
            Some(playback_id) => PlayerView::Embed {
                markup: embed_markup(playback_id, props.autoplay, props.show_controls),
            },
            None => PlayerView::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PlayerView::Placeholder)
    }

    /// HTML for the whole 16:9 container.
    pub fn to_html(&self) -> String {
        let inner = match self {
            PlayerView::Placeholder => format!(
                "<div class=\"mux-player-placeholder\" style=\"flex: 1; display: flex; \
                 justify-content: center; align-items: center; background-color: #1f2937;\">\
                 <span style=\"color: #9ca3af; font-size: 16px;\">{}</span></div>",
                PLACEHOLDER_TEXT
            ),
            PlayerView::Embed { markup } => markup.clone(),
        };
        format!(
            "<div class=\"mux-player-container\" style=\"width: 100%; aspect-ratio: 16 / 9; \
             background-color: #000; border-radius: 8px; overflow: hidden;\">{}</div>",
            inner
        )
    }
}

fn embed_markup(playback_id: &str, autoplay: bool, show_controls: bool) -> String {
    let mut html = String::with_capacity(128);
    let _ = write!(
        html,
        "<mux-player playback-id=\"{}\"",
        escape_attribute(playback_id)
    );
    if autoplay {
        html.push_str(" autoplay");
    }
    if show_controls {
        html.push_str(" controls");
    }
    let _ = write!(html, " style=\"{}\"></mux-player>", PLAYER_STYLE);
    html
}

/// Escape a value for a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
