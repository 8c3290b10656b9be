use serenity::all::{ButtonStyle, CreateActionRow, CreateButton, ReactionType};
use uuid::Uuid;

use crate::commands::music::audio_sources::TrackMetadata;
use crate::utils::config::EmbedIcons;

const SKIP_BUTTON_PREFIX: &str = "nowplaying-skip-button_";

/// A button attached to a music response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub custom_id: String,
    pub label: String,
    pub emoji: String,
    pub style: ButtonStyle,
}

/// Custom id of the skip button for one track instance. Embedding the instance id lets
/// a late click be told apart from a click on the track that is playing now.
pub fn skip_button_id(track: &TrackMetadata) -> String {
    format!("{}{}", SKIP_BUTTON_PREFIX, track.id)
}

pub fn track_id_from_skip_button(custom_id: &str) -> Option<Uuid> {
    custom_id
        .strip_prefix(SKIP_BUTTON_PREFIX)
        .and_then(|id| Uuid::parse_str(id).ok())
}

pub fn skip_button(track: &TrackMetadata, icons: &EmbedIcons) -> ButtonSpec {
    ButtonSpec {
        custom_id: skip_button_id(track),
        label: "Skip track".to_string(),
        emoji: icons.next_track.clone(),
        style: ButtonStyle::Secondary,
    }
}

/// Lay the buttons out in a single action row
pub fn action_rows(buttons: &[ButtonSpec]) -> Vec<CreateActionRow> {
    if buttons.is_empty() {
        return Vec::new();
    }

    let buttons = buttons
        .iter()
        .map(|spec| {
            // Custom emoji arrive as "<:name:id>", everything else is unicode
            let emoji = ReactionType::try_from(spec.emoji.as_str())
                .unwrap_or_else(|_| ReactionType::Unicode(spec.emoji.clone()));

            CreateButton::new(spec.custom_id.clone())
                .emoji(emoji)
                .style(spec.style)
                .label(spec.label.clone())
        })
        .collect();

    vec![CreateActionRow::Buttons(buttons)]
}
