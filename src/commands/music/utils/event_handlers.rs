use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::async_trait;
use serenity::model::id::GuildId;
use serenity::prelude::Mutex as SerenityMutex;
use songbird::{Call, EventContext};
use std::sync::{Arc, Weak};
use tracing::{debug, error, info, warn};

use super::music_manager::metadata_of;
use super::player_queue::RepeatMode;
use crate::commands::music::audio_sources::AudioSource;

/// Logs each track as it starts and re-applies track looping when that mode is active
pub struct TrackStartNotifier {
    pub guild_id: GuildId,
    pub repeat_modes: Arc<DashMap<GuildId, RepeatMode>>,
}

#[async_trait]
impl songbird::EventHandler for TrackStartNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<songbird::Event> {
        if let EventContext::Track(tracks) = ctx {
            let loop_track = self
                .repeat_modes
                .get(&self.guild_id)
                .is_some_and(|mode| *mode == RepeatMode::Track);

            for (_, handle) in tracks.iter() {
                let metadata = metadata_of(handle);
                debug!(
                    "Started playing '{}' in guild {}",
                    metadata.title, self.guild_id
                );

                if loop_track {
                    if let Err(e) = handle.enable_loop() {
                        warn!("Failed to enable track loop for '{}': {}", metadata.title, e);
                    }
                }
            }
        }
        None
    }
}

/// Logs tracks that fail while streaming
pub struct TrackErrorNotifier {
    pub guild_id: GuildId,
}

#[async_trait]
impl songbird::EventHandler for TrackErrorNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<songbird::Event> {
        if let EventContext::Track(tracks) = ctx {
            for (state, handle) in tracks.iter() {
                error!(
                    "Audio stream error for '{}' in guild {}: {:?}",
                    metadata_of(handle).title,
                    self.guild_id,
                    state.playing
                );
            }
        }
        None
    }
}

/// Puts finished tracks back at the end of the queue while queue looping is on
pub struct QueueLoopNotifier {
    pub guild_id: GuildId,
    pub call: Weak<SerenityMutex<Call>>,
    pub http_client: reqwest::Client,
    pub repeat_modes: Arc<DashMap<GuildId, RepeatMode>>,
}

#[async_trait]
impl songbird::EventHandler for QueueLoopNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<songbird::Event> {
        let EventContext::Track(tracks) = ctx else {
            return None;
        };

        let queue_loop = self
            .repeat_modes
            .get(&self.guild_id)
            .is_some_and(|mode| *mode == RepeatMode::Queue);
        if !queue_loop {
            return None;
        }

        let Some(call) = self.call.upgrade() else {
            return None;
        };

        for (_, handle) in tracks.iter() {
            let finished = metadata_of(handle);
            match AudioSource::requeue(self.http_client.clone(), &finished) {
                Some((track, metadata)) => {
                    call.lock().await.enqueue(track).await;
                    info!(
                        "Re-queued '{}' for guild {} (queue loop)",
                        metadata.title, self.guild_id
                    );
                }
                None => warn!("Cannot re-queue '{}': no source URL", finished.title),
            }
        }
        None
    }
}
