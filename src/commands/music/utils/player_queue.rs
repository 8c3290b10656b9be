//! The view of a guild's playback queue that the music commands work against.
//!
//! The queue itself belongs to the audio player; commands read snapshots through
//! [`PlayerQueue`] and only mutate it through `skip`/`skip_to`.

use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use std::sync::Arc;
use std::time::Duration;

use super::music_manager::{MusicError, MusicResult};
use crate::commands::music::audio_sources::TrackMetadata;

/// What happens when the current track ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RepeatMode {
    #[default]
    Off = 0,
    Track = 1,
    Queue = 2,
    Autoplay = 3,
}

impl RepeatMode {
    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "disabled",
            RepeatMode::Track => "track",
            RepeatMode::Queue => "queue",
            RepeatMode::Autoplay => "autoplay",
        }
    }
}

impl TryFrom<u8> for RepeatMode {
    type Error = MusicError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RepeatMode::Off),
            1 => Ok(RepeatMode::Track),
            2 => Ok(RepeatMode::Queue),
            3 => Ok(RepeatMode::Autoplay),
            other => Err(MusicError::InvalidRepeatMode(other)),
        }
    }
}

impl From<RepeatMode> for u8 {
    fn from(mode: RepeatMode) -> Self {
        mode as u8
    }
}

/// The voice channel a queue is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChannelInfo {
    pub id: ChannelId,
    pub name: String,
    /// Bits per second
    pub bitrate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub paused: bool,
    pub position: Duration,
}

#[async_trait]
pub trait PlayerQueue: Send + Sync {
    fn channel(&self) -> VoiceChannelInfo;

    fn current_track(&self) -> Option<TrackMetadata>;

    /// Tracks waiting after the current one, in play order.
    fn tracks(&self) -> Vec<TrackMetadata>;

    /// Raw repeat mode as reported by the player. Convert with `RepeatMode::try_from`.
    fn repeat_mode(&self) -> u8;

    async fn playback_state(&self) -> MusicResult<PlaybackState>;

    /// Stop the current track and move on to the next one.
    fn skip(&self) -> MusicResult<()>;

    /// Drop the first `index` pending tracks, then skip the current one, so that the
    /// pending track at `index` plays next.
    fn skip_to(&self, index: usize) -> MusicResult<()>;
}

#[async_trait]
pub trait QueueProvider: Send + Sync {
    async fn get_queue(&self, guild_id: GuildId) -> Option<Arc<dyn PlayerQueue>>;
}
