use poise::CreateReply;
use serenity::all::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter};
use std::time::Duration;

use super::button_controls::{self, ButtonSpec};
use super::formatting::{self, LoopNoteKind, ProgressBarStyle};
use super::invocation::InvocationContext;
use super::player_queue::{PlaybackState, RepeatMode, VoiceChannelInfo};
use crate::commands::music::audio_sources::TrackMetadata;
use crate::utils::config::{BotConfig, EmbedOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAuthorLine {
    pub name: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A single embed plus its buttons, kept as plain data until it is sent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MusicResponse {
    pub author: Option<EmbedAuthorLine>,
    pub description: String,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub thumbnail: Option<String>,
    pub color: u32,
    pub buttons: Vec<ButtonSpec>,
}

impl MusicResponse {
    fn new(description: impl Into<String>, color: u32) -> Self {
        Self {
            description: description.into(),
            color,
            ..Default::default()
        }
    }

    fn author(mut self, name: impl Into<String>, icon_url: Option<String>) -> Self {
        self.author = Some(EmbedAuthorLine {
            name: name.into(),
            icon_url,
        });
        self
    }

    fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        });
        self
    }

    fn thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = thumbnail;
        self
    }
}

impl From<MusicResponse> for CreateReply {
    fn from(response: MusicResponse) -> Self {
        let mut embed = CreateEmbed::new()
            .description(response.description)
            .color(response.color);

        if let Some(author) = response.author {
            let mut line = CreateEmbedAuthor::new(author.name);
            if let Some(icon_url) = author.icon_url {
                line = line.icon_url(icon_url);
            }
            embed = embed.author(line);
        }
        for field in response.fields {
            embed = embed.field(field.name, field.value, field.inline);
        }
        if let Some(footer) = response.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        if let Some(thumbnail) = response.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }

        let reply = CreateReply::default().embed(embed);
        if response.buttons.is_empty() {
            reply
        } else {
            reply.components(button_controls::action_rows(&response.buttons))
        }
    }
}

/// Warning embed with the "Oops!" header used for every failed precondition
pub fn warning(body: impl AsRef<str>, options: &EmbedOptions) -> MusicResponse {
    MusicResponse::new(
        format!("**{} Oops!**\n{}", options.icons.warning, body.as_ref()),
        options.colors.warning,
    )
}

pub fn not_in_voice_channel(options: &EmbedOptions) -> MusicResponse {
    warning("You need to be in a voice channel to use this command.", options)
}

pub fn not_in_same_voice_channel(options: &EmbedOptions) -> MusicResponse {
    warning(
        "You need to be in the same voice channel as me to use this command.",
        options,
    )
}

pub fn queue_does_not_exist(options: &EmbedOptions) -> MusicResponse {
    warning(
        "There are no tracks in the queue and nothing currently playing. First add some tracks with **`/play`**!",
        options,
    )
}

pub fn nothing_playing(options: &EmbedOptions) -> MusicResponse {
    warning(
        "There is nothing currently playing. First add some tracks with **`/play`**!",
        options,
    )
}

pub fn skip_target_out_of_range(pending: usize, target: usize, options: &EmbedOptions) -> MusicResponse {
    warning(
        format!(
            "There are only **`{}`** tracks in the queue. You cannot skip to track **`{}`**.\n\nView tracks added to the queue with **`/queue`**.",
            pending, target
        ),
        options,
    )
}

pub fn already_skipped(options: &EmbedOptions) -> MusicResponse {
    warning(
        "This track has already been skipped or is no longer playing.",
        options,
    )
}

/// Everything the now-playing embed shows
pub struct NowPlaying<'a> {
    pub invocation: &'a InvocationContext,
    pub channel: &'a VoiceChannelInfo,
    pub track: &'a TrackMetadata,
    pub playback: PlaybackState,
    pub pending: usize,
    pub repeat_mode: RepeatMode,
}

/// Create the now-playing embed with its skip button
pub fn now_playing(view: &NowPlaying<'_>, config: &BotConfig) -> MusicResponse {
    let options = &config.embed_options;
    let icons = &options.icons;
    let track = view.track;

    let style = ProgressBarStyle::from(&config.player_options.progress_bar);
    let bar = formatting::progress_bar(track, view.playback.position, &style, icons);

    let header = if view.playback.paused {
        "**Currently Paused**\n".to_string()
    } else {
        format!("**{} Now Playing**\n", icons.audio_playing)
    };
    let requester = track
        .requested_by
        .map(|id| format!("<@{}>", id))
        .unwrap_or_else(|| formatting::UNAVAILABLE.to_string());
    let loop_note = formatting::loop_note(view.repeat_mode, LoopNoteKind::NowPlaying, icons);

    let description = format!(
        "{}**[{}]({})**\nRequested by: {}\n {}\n\n{}",
        header,
        track.title,
        track.link(),
        requester,
        bar,
        loop_note.unwrap_or_default()
    );

    let mut response = MusicResponse::new(description, options.colors.info)
        .author(
            format!(
                "Channel: {} ({}kbps)",
                view.channel.name,
                view.channel.bitrate / 1000
            ),
            Some(
                view.invocation
                    .guild_icon_url
                    .clone()
                    .unwrap_or_else(|| options.info.fallback_icon_url.clone()),
            ),
        )
        .field("**Author**", formatting::author_label(track))
        .field("**Plays**", formatting::plays_label(track.views, track.bridge_views))
        .field("**Track source**", formatting::source_label(track, icons))
        .thumbnail(track.thumbnail.clone());

    response.footer = Some(formatting::queue_footer(view.pending));
    response.buttons = vec![button_controls::skip_button(track, icons)];
    response
}

/// Create the embed for a track that was skipped by the caller
pub fn skipped(
    invocation: &InvocationContext,
    track: &TrackMetadata,
    repeat_mode: RepeatMode,
    options: &EmbedOptions,
) -> MusicResponse {
    let icons = &options.icons;
    let mut description = format!(
        "**{} Skipped track**\n**{} [{}]({})**",
        icons.skipped,
        formatting::duration_tag(track, icons),
        track.title,
        track.link()
    );
    if let Some(note) = formatting::loop_note(repeat_mode, LoopNoteKind::Skipped, icons) {
        description.push_str("\n\n");
        description.push_str(&note);
    }

    MusicResponse::new(description, options.colors.success)
        .author(
            invocation.display_name.clone(),
            Some(
                invocation
                    .avatar_url
                    .clone()
                    .unwrap_or_else(|| options.info.fallback_icon_url.clone()),
            ),
        )
        .thumbnail(track.thumbnail.clone())
}

/// Create the embed for a track added by `/play`. Position 0 means it plays now.
pub fn added_to_queue(
    invocation: &InvocationContext,
    track: &TrackMetadata,
    position: usize,
    options: &EmbedOptions,
) -> MusicResponse {
    let icons = &options.icons;
    let header = if position == 0 {
        format!("**{} Started playing**", icons.audio_playing)
    } else {
        format!("**{} Added to queue** at position **`{}`**", icons.success, position)
    };

    MusicResponse::new(
        format!(
            "{}\n**{} [{}]({})**",
            header,
            formatting::duration_tag(track, icons),
            track.title,
            track.link()
        ),
        options.colors.success,
    )
    .author(
        invocation.display_name.clone(),
        Some(
            invocation
                .avatar_url
                .clone()
                .unwrap_or_else(|| options.info.fallback_icon_url.clone()),
        ),
    )
    .thumbnail(track.thumbnail.clone())
}

pub fn failed_to_play(reason: impl std::fmt::Display, options: &EmbedOptions) -> MusicResponse {
    MusicResponse::new(
        format!(
            "**{} Could not play that**\n{}",
            options.icons.error, reason
        ),
        options.colors.error,
    )
}

/// Create the embed confirming a `/loop` change
pub fn repeat_mode_changed(mode: RepeatMode, options: &EmbedOptions) -> MusicResponse {
    let description = formatting::loop_note(mode, LoopNoteKind::NowPlaying, &options.icons)
        .unwrap_or_else(|| {
            format!(
                "**{} Looping disabled**\nTracks will play once.",
                options.icons.success
            )
        });
    MusicResponse::new(description, options.colors.success)
}

/// Follow-up sent by the dispatcher when a command runs unusually long
pub fn slow_command(elapsed: Duration, options: &EmbedOptions) -> MusicResponse {
    MusicResponse::new(
        format!(
            "**{} Warning**\nThis command took {} seconds to execute.\n\n_If you experienced problems with the command, please try again._",
            options.icons.warning,
            elapsed.as_secs_f64()
        ),
        options.colors.warning,
    )
}

/// Reply for errors that escaped a command
pub fn unexpected_error(options: &EmbedOptions) -> MusicResponse {
    let mut description = format!(
        "**{} Uh-oh... _Something_ went wrong!**\nThere was an unexpected error while trying to execute this command.\n\nYou can try to perform the command again.",
        options.icons.error
    );
    if let Some(url) = &options.info.support_server_invite_url {
        description.push_str(&format!(
            "\n\n_If this problem persists, please submit a bug report in the **[support server]({})**._",
            url
        ));
    }
    MusicResponse::new(description, options.colors.error)
}
