//! Pure formatting of track and queue state into the strings shown in embeds.
//!
//! Every function here is total: missing or zeroed fields produce a placeholder
//! rather than an error. The one exception is [`loop_mode_label`], which rejects
//! repeat mode values the player should never report.

use std::time::Duration;
use thousands::Separable;

use super::format_duration;
use super::music_manager::MusicResult;
use super::player_queue::RepeatMode;
use crate::commands::music::audio_sources::{TrackMetadata, TrackSource};
use crate::utils::config::{EmbedIcons, ProgressBarOptions};

pub const UNAVAILABLE: &str = "Unavailable";
pub const NO_DURATION: &str = "_No duration available._";

/// Author reported for attachments uploaded to Discord itself.
const CDN_PLACEHOLDER_AUTHOR: &str = "cdn.discordapp.com";
const TIMECODE_SEPARATOR: &str = "┃";

pub fn author_label(track: &TrackMetadata) -> String {
    match track.author.as_deref() {
        Some(author) if !author.is_empty() && author != CDN_PLACEHOLDER_AUTHOR => {
            author.to_string()
        }
        _ => UNAVAILABLE.to_string(),
    }
}

/// Play count with thousands separators, falling back to the bridged count
pub fn plays_label(views: u64, bridge_views: Option<u64>) -> String {
    let plays = if views != 0 {
        views
    } else {
        bridge_views.unwrap_or(0)
    };

    if plays == 0 {
        UNAVAILABLE.to_string()
    } else {
        plays.separate_with_commas()
    }
}

pub fn source_name(source: Option<TrackSource>) -> &'static str {
    match source {
        Some(TrackSource::Youtube) => "YouTube",
        Some(TrackSource::Soundcloud) => "SoundCloud",
        Some(TrackSource::Spotify) => "Spotify",
        Some(TrackSource::AppleMusic) => "Apple Music",
        Some(TrackSource::Arbitrary) => "Direct source",
        None => UNAVAILABLE,
    }
}

pub fn source_icon(source: TrackSource, icons: &EmbedIcons) -> &str {
    match source {
        TrackSource::Youtube => &icons.source_you_tube,
        TrackSource::Soundcloud => &icons.source_sound_cloud,
        TrackSource::Spotify => &icons.source_spotify,
        TrackSource::AppleMusic => &icons.source_apple_music,
        TrackSource::Arbitrary => &icons.source_arbitrary,
    }
}

/// "Track source" field value: icon and linked platform name
pub fn source_label(track: &TrackMetadata, icons: &EmbedIcons) -> String {
    match track.source {
        Some(source) => format!(
            "**{} [{}]({})**",
            source_icon(source, icons),
            source_name(Some(source)),
            track.link()
        ),
        None => UNAVAILABLE.to_string(),
    }
}

/// Progress bar settings with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBarStyle {
    pub length: usize,
    pub timecodes: bool,
    pub indicator: String,
    pub left_char: String,
    pub right_char: String,
}

impl Default for ProgressBarStyle {
    fn default() -> Self {
        Self {
            length: 12,
            timecodes: false,
            indicator: "🔘".to_string(),
            left_char: "▬".to_string(),
            right_char: "▬".to_string(),
        }
    }
}

impl From<&ProgressBarOptions> for ProgressBarStyle {
    fn from(options: &ProgressBarOptions) -> Self {
        let defaults = Self::default();
        Self {
            length: options.length.unwrap_or(defaults.length),
            timecodes: options.timecodes.unwrap_or(defaults.timecodes),
            indicator: options.indicator.clone().unwrap_or(defaults.indicator),
            left_char: options.left_char.clone().unwrap_or(defaults.left_char),
            right_char: options.right_char.clone().unwrap_or(defaults.right_char),
        }
    }
}

/// The bar itself: the indicator sits at `round(position / total * length)`.
/// Positions that land outside the bar pin the indicator to the start.
pub fn render_bar(position: Duration, total: Duration, style: &ProgressBarStyle) -> String {
    let length = style.length;
    let index = if total.is_zero() {
        0
    } else {
        (position.as_secs_f64() / total.as_secs_f64() * length as f64).round() as usize
    };

    let bar = if (1..=length).contains(&index) {
        format!(
            "{}{}{}",
            style.left_char.repeat(index - 1),
            style.indicator,
            style.right_char.repeat(length - index)
        )
    } else {
        format!(
            "{}{}",
            style.indicator,
            style.right_char.repeat(length.saturating_sub(1))
        )
    };

    if style.timecodes {
        format!(
            "{} {sep} {} {sep} {}",
            format_duration(position),
            bar,
            format_duration(total),
            sep = TIMECODE_SEPARATOR
        )
    } else {
        bar
    }
}

pub fn live_label(icons: &EmbedIcons) -> String {
    format!(
        "{} **`LIVE`** - Playing continuously from live source.",
        icons.live_track
    )
}

/// Timecodes around the bar, or a fixed line for live and durationless tracks
pub fn progress_bar(
    track: &TrackMetadata,
    position: Duration,
    style: &ProgressBarStyle,
    icons: &EmbedIcons,
) -> String {
    if track.live {
        return live_label(icons);
    }
    if track.is_durationless() {
        return NO_DURATION.to_string();
    }

    let total = track.duration.unwrap_or_default();
    format!(
        "**`{}`** {} **`{}`**",
        format_duration(position),
        render_bar(position, total, style),
        track.duration_label()
    )
}

pub fn loop_mode_label(raw: u8) -> MusicResult<&'static str> {
    RepeatMode::try_from(raw).map(RepeatMode::label)
}

/// Short duration shown next to a title
pub fn duration_tag(track: &TrackMetadata, icons: &EmbedIcons) -> String {
    if track.live {
        format!("{} `LIVE`", icons.live_track)
    } else if track.is_durationless() {
        String::new()
    } else {
        format!("`{}`", track.duration_label())
    }
}

/// Which icon pair a loop note uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopNoteKind {
    NowPlaying,
    Skipped,
}

/// The "Looping" paragraph, absent when repeat is off
pub fn loop_note(mode: RepeatMode, kind: LoopNoteKind, icons: &EmbedIcons) -> Option<String> {
    let icon = match (mode, kind) {
        (RepeatMode::Off, _) => return None,
        (RepeatMode::Autoplay, LoopNoteKind::NowPlaying) => &icons.autoplay,
        (RepeatMode::Autoplay, LoopNoteKind::Skipped) => &icons.autoplaying,
        (_, LoopNoteKind::NowPlaying) => &icons.loop_mode,
        (_, LoopNoteKind::Skipped) => &icons.looping,
    };

    Some(format!(
        "**{} Looping**\nLoop mode is set to **`{}`**. You can change it with **`/loop`**.",
        icon,
        mode.label()
    ))
}

pub fn queue_footer(pending: usize) -> String {
    if pending == 0 {
        " ".to_string()
    } else {
        format!("{} other tracks in the queue...", pending)
    }
}
