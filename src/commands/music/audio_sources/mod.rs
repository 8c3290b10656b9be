//! Resolution of user queries into playable songbird tracks carrying `TrackMetadata`.

/// Submodule defining the `TrackMetadata` struct used across the music commands.
pub(crate) mod track_metadata;

use crate::commands::music::utils::music_manager::{MusicError, MusicResult};
use serenity::model::id::UserId;
use songbird::input::{AuxMetadata, Compose, YoutubeDl};
use songbird::tracks::Track;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info, warn};
use url::Url;

pub use track_metadata::{TrackMetadata, TrackSource};

/// A utility struct providing helper functions related to audio sources.
pub struct AudioSource;

impl AudioSource {
    /// Performs a basic check if the input string can be parsed as a URL.
    pub fn is_url(input: &str) -> bool {
        Url::parse(input).is_ok()
    }

    /// Resolve a URL or a free-text search into a track ready to enqueue.
    pub async fn from_query(
        client: reqwest::Client,
        query: &str,
        requested_by: UserId,
    ) -> MusicResult<(Track, TrackMetadata)> {
        let mut source = if Self::is_url(query) {
            YoutubeDl::new(client, query.to_string())
        } else {
            info!("Searching YouTube for: {}", query);
            YoutubeDl::new_search(client, query.to_string())
        };

        let aux = source
            .aux_metadata()
            .await
            .map_err(|e| MusicError::AudioSourceError(e.to_string()))?;
        debug!("Resolved aux metadata: {:?}", aux);

        let mut metadata = Self::metadata_from_aux(aux, Some(query));
        metadata.requested_by = Some(requested_by);

        if let Some(url) = metadata.url.clone() {
            match Self::play_stats(&url).await {
                Ok(stats) => stats.apply(&mut metadata),
                Err(e) => warn!("No play stats for {}: {}", url, e),
            }
        }
        info!(
            "Resolved '{}' from {}",
            metadata.title,
            metadata.source.as_ref().map(TrackSource::as_str).unwrap_or("an unknown source")
        );

        Ok((Self::into_track(source, &metadata), metadata))
    }

    /// Build a fresh queue entry for a track that has already been played.
    pub fn requeue(client: reqwest::Client, metadata: &TrackMetadata) -> Option<(Track, TrackMetadata)> {
        let url = metadata.url.clone()?;
        let metadata = metadata.reissued();
        let source = YoutubeDl::new(client, url);
        Some((Self::into_track(source, &metadata), metadata))
    }

    /// Ask `yt-dlp` for the fields songbird's aux metadata leaves out
    async fn play_stats(url: &str) -> MusicResult<PlayStats> {
        let output = Command::new("yt-dlp")
            .args(["-j", "--no-playlist", "--skip-download", url])
            .output()
            .await
            .map_err(|e| MusicError::AudioSourceError(format!("Failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            return Err(MusicError::AudioSourceError(format!(
                "yt-dlp exited with {}",
                output.status
            )));
        }

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            MusicError::AudioSourceError(format!("Failed to parse video metadata: {}", e))
        })?;
        Ok(PlayStats::from_json(&json))
    }

    fn into_track(source: YoutubeDl<'static>, metadata: &TrackMetadata) -> Track {
        let mut track = Track::from(source);
        track.user_data = Arc::new(metadata.clone());
        track
    }

    fn metadata_from_aux(aux: AuxMetadata, query: Option<&str>) -> TrackMetadata {
        let url = aux
            .source_url
            .or_else(|| query.filter(|q| Self::is_url(q)).map(str::to_string));
        let source = url.as_deref().and_then(TrackSource::from_url);

        TrackMetadata {
            title: aux.title.or(aux.track).unwrap_or_else(|| "Unknown Track".to_string()),
            author: aux.artist.or(aux.channel),
            duration: aux.duration,
            thumbnail: aux.thumbnail,
            source,
            url,
            ..Default::default()
        }
    }
}

/// Play count and live state reported by `yt-dlp -j`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayStats {
    pub views: u64,
    pub live: bool,
}

impl PlayStats {
    pub fn from_json(json: &serde_json::Value) -> Self {
        Self {
            views: json["view_count"].as_u64().unwrap_or_default(),
            live: json["is_live"].as_bool().unwrap_or(false)
                || json["live_status"].as_str() == Some("is_live"),
        }
    }

    fn apply(self, metadata: &mut TrackMetadata) {
        metadata.views = self.views;
        metadata.live = self.live;
    }
}
