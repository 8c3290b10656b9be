use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::async_trait;
use serenity::cache::Cache;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::Mutex as SerenityMutex;
use songbird::tracks::{TrackHandle, TrackQueue};
use songbird::{Call, Event, Songbird, TrackEvent};
use std::ops::Range;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::commands::music::audio_sources::TrackMetadata;

use super::event_handlers::{QueueLoopNotifier, TrackErrorNotifier, TrackStartNotifier};
use super::player_queue::{
    PlaybackState, PlayerQueue, QueueProvider, RepeatMode, VoiceChannelInfo,
};

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("No track is currently playing")]
    NoCurrentTrack,

    #[error("Cannot skip to position {index}: only {pending} tracks are queued")]
    SkipOutOfRange { index: usize, pending: usize },

    #[error("Unknown repeat mode value: {0}")]
    InvalidRepeatMode(u8),

    #[error("Audio source error: {0}")]
    AudioSourceError(String),

    #[error("Track control error: {0}")]
    Control(#[from] songbird::error::ControlError),
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Owns the songbird handle and the per-guild state songbird does not track itself.
pub struct MusicManager {
    songbird: Arc<Songbird>,
    cache: Arc<Cache>,
    // Map of guild ID to repeat mode, shared with the track event handlers
    repeat_modes: Arc<DashMap<GuildId, RepeatMode>>,
}

impl MusicManager {
    pub fn new(songbird: Arc<Songbird>, cache: Arc<Cache>) -> Self {
        Self {
            songbird,
            cache,
            repeat_modes: Arc::new(DashMap::new()),
        }
    }

    /// Get the current voice channel call handle
    pub fn get_call(&self, guild_id: GuildId) -> MusicResult<Arc<SerenityMutex<Call>>> {
        self.songbird.get(guild_id).ok_or(MusicError::NotConnected)
    }

    /// Join a voice channel and attach the track event listeners to the new call
    pub async fn join_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        http_client: reqwest::Client,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        let call = self.songbird.join(guild_id, channel_id).await.map_err(|e| {
            error!(
                "Failed to join voice channel {} for guild {}: {}",
                channel_id, guild_id, e
            );
            MusicError::JoinError(e.to_string())
        })?;

        self.begin_session(guild_id);

        {
            let mut handler = call.lock().await;
            handler.remove_all_global_events();
            handler.add_global_event(
                Event::Track(TrackEvent::Play),
                TrackStartNotifier {
                    guild_id,
                    repeat_modes: Arc::clone(&self.repeat_modes),
                },
            );
            handler.add_global_event(Event::Track(TrackEvent::Error), TrackErrorNotifier { guild_id });
            handler.add_global_event(
                Event::Track(TrackEvent::End),
                QueueLoopNotifier {
                    guild_id,
                    call: Arc::downgrade(&call),
                    http_client,
                    repeat_modes: Arc::clone(&self.repeat_modes),
                },
            );
        }

        info!("Joined voice channel {} in guild {}", channel_id, guild_id);
        Ok(call)
    }

    /// A fresh call starts a fresh queue, so nothing set on the previous one carries over
    fn begin_session(&self, guild_id: GuildId) {
        if let Some((_, previous)) = self.repeat_modes.remove(&guild_id) {
            debug!(
                "Cleared repeat mode {} left over in guild {}",
                previous.label(),
                guild_id
            );
        }
    }

    pub fn repeat_mode(&self, guild_id: GuildId) -> RepeatMode {
        self.repeat_modes
            .get(&guild_id)
            .map(|mode| *mode)
            .unwrap_or_default()
    }

    /// Store the repeat mode and apply track looping to whatever is playing now.
    pub async fn set_repeat_mode(&self, guild_id: GuildId, mode: RepeatMode) -> MusicResult<()> {
        self.repeat_modes.insert(guild_id, mode);
        info!("Set repeat mode for guild {} to {}", guild_id, mode.label());

        let current = match self.get_call(guild_id) {
            Ok(call) => call.lock().await.queue().current(),
            Err(_) => None,
        };
        if let Some(handle) = current {
            if mode == RepeatMode::Track {
                handle.enable_loop()?;
            } else {
                handle.disable_loop()?;
            }
        }
        Ok(())
    }

    fn voice_channel_info(&self, guild_id: GuildId, channel_id: ChannelId) -> VoiceChannelInfo {
        let cached = self.cache.guild(guild_id).and_then(|guild| {
            guild
                .channels
                .get(&channel_id)
                .map(|channel| (channel.name.clone(), channel.bitrate.unwrap_or_default()))
        });

        let (name, bitrate) = cached.unwrap_or_else(|| {
            warn!("Voice channel {} missing from cache", channel_id);
            (channel_id.to_string(), 0)
        });

        VoiceChannelInfo {
            id: channel_id,
            name,
            bitrate,
        }
    }
}

#[async_trait]
impl QueueProvider for MusicManager {
    async fn get_queue(&self, guild_id: GuildId) -> Option<Arc<dyn PlayerQueue>> {
        let call = self.songbird.get(guild_id)?;
        let (queue, channel) = {
            let handler = call.lock().await;
            let channel = handler.current_channel()?;
            (handler.queue().clone(), ChannelId::new(channel.0.get()))
        };

        debug!("Found queue for guild {} bound to {}", guild_id, channel);
        Some(Arc::new(SongbirdQueue {
            queue,
            channel: self.voice_channel_info(guild_id, channel),
            repeat_mode: self.repeat_mode(guild_id),
        }))
    }
}

/// Snapshot of a songbird builtin queue. Reads go to the live queue; the channel and
/// repeat mode are captured when the snapshot is taken.
pub struct SongbirdQueue {
    queue: TrackQueue,
    channel: VoiceChannelInfo,
    repeat_mode: RepeatMode,
}

/// Slots to drop from a songbird queue of `queue_len` entries (head playing) so that
/// pending track `index` comes right after the head.
fn skip_to_drain_range(queue_len: usize, index: usize) -> MusicResult<Range<usize>> {
    let pending = queue_len.saturating_sub(1);
    if index >= pending {
        return Err(MusicError::SkipOutOfRange { index, pending });
    }
    Ok(1..index + 1)
}

/// Every track this bot enqueues carries its `TrackMetadata` as user data.
pub fn metadata_of(handle: &TrackHandle) -> TrackMetadata {
    handle.data::<TrackMetadata>().as_ref().clone()
}

#[async_trait]
impl PlayerQueue for SongbirdQueue {
    fn channel(&self) -> VoiceChannelInfo {
        self.channel.clone()
    }

    fn current_track(&self) -> Option<TrackMetadata> {
        self.queue.current().as_ref().map(metadata_of)
    }

    fn tracks(&self) -> Vec<TrackMetadata> {
        // The head of a songbird queue is the track that is playing
        self.queue
            .current_queue()
            .iter()
            .skip(1)
            .map(metadata_of)
            .collect()
    }

    fn repeat_mode(&self) -> u8 {
        self.repeat_mode.into()
    }

    async fn playback_state(&self) -> MusicResult<PlaybackState> {
        let handle = self.queue.current().ok_or(MusicError::NoCurrentTrack)?;
        let info = handle.get_info().await?;

        Ok(PlaybackState {
            paused: info.playing == songbird::tracks::PlayMode::Pause,
            position: info.position,
        })
    }

    fn skip(&self) -> MusicResult<()> {
        self.queue.skip()?;
        Ok(())
    }

    fn skip_to(&self, index: usize) -> MusicResult<()> {
        let removed = self.queue.modify_queue(|queue| {
            let range = skip_to_drain_range(queue.len(), index)?;
            Ok::<_, MusicError>(queue.drain(range).collect::<Vec<_>>())
        })?;

        for queued in removed {
            if let Err(e) = queued.handle().stop() {
                warn!("Failed to stop track removed by skip_to: {}", e);
            }
        }

        self.queue.skip()?;
        Ok(())
    }
}
