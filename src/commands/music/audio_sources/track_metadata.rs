//! Defines the `TrackMetadata` struct, the player-independent description of a queued
//! track instance, and the `TrackSource` it was resolved from.

use serde::{Deserialize, Deserializer, Serialize};
use serenity::model::id::UserId;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::commands::music::utils::format_duration;

/// Where a track's audio comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrackSource {
    Youtube,
    Soundcloud,
    Spotify,
    AppleMusic,
    Arbitrary,
}

impl TrackSource {
    const ALL: [Self; 5] = [
        Self::Youtube,
        Self::Soundcloud,
        Self::Spotify,
        Self::AppleMusic,
        Self::Arbitrary,
    ];

    /// Classify a track URL by host. Anything that parses but is not a known
    /// platform is an arbitrary (direct) source.
    pub fn from_url(url: &str) -> Option<Self> {
        let url = Url::parse(url).ok()?;
        let host = url.host_str()?.trim_start_matches("www.");

        let source = match host {
            "youtube.com" | "m.youtube.com" | "music.youtube.com" | "youtu.be" => Self::Youtube,
            "soundcloud.com" | "on.soundcloud.com" => Self::Soundcloud,
            "open.spotify.com" => Self::Spotify,
            "music.apple.com" => Self::AppleMusic,
            _ => Self::Arbitrary,
        };
        Some(source)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Soundcloud => "soundcloud",
            Self::Spotify => "spotify",
            Self::AppleMusic => "apple_music",
            Self::Arbitrary => "arbitrary",
        }
    }
}

impl FromStr for TrackSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| format!("unknown track source: {s}"))
    }
}

/// Sources this build does not know about are read as `None` instead of failing
/// the whole track.
fn lenient_source<'de, D>(deserializer: D) -> Result<Option<TrackSource>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Unified representation of metadata for one enqueued track instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackMetadata {
    /// Identifies this queue entry. A re-enqueued copy of the same song gets a new id.
    pub id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub author: Option<String>,
    /// `None` or zero means the track has no duration.
    #[serde(with = "humantime_serde")]
    pub duration: Option<Duration>,
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: Option<TrackSource>,
    /// Zero when the play count is unknown.
    #[serde(default)]
    pub views: u64,
    /// Play count reported by the platform the track was bridged from.
    #[serde(default)]
    pub bridge_views: Option<u64>,
    #[serde(default)]
    pub live: bool,
    pub requested_by: Option<UserId>,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: "Unknown Track".to_string(),
            url: None,
            author: None,
            duration: None,
            thumbnail: None,
            source: None,
            views: 0,
            bridge_views: None,
            live: false,
            requested_by: None,
        }
    }
}

impl TrackMetadata {
    /// True when there is no usable duration. The display label is derived from the
    /// same value, so "0:00" and a zero duration are always classified together.
    pub fn is_durationless(&self) -> bool {
        self.duration.is_none_or(|d| d.as_secs() == 0)
    }

    /// Display form of the duration, "0:00" when durationless
    pub fn duration_label(&self) -> String {
        format_duration(self.duration.unwrap_or_default())
    }

    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or("#")
    }

    /// Copy of this track as a fresh queue entry
    pub fn reissued(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}
