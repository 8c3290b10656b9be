use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info};

use super::utils::button_controls;
use super::utils::embedded_messages::{self, NowPlaying};
use super::utils::invocation::InvocationContext;
use super::utils::player_queue::{QueueProvider, RepeatMode};
use super::utils::responder::{ButtonClick, CommandResponder, PoiseResponder};
use super::utils::validation::{Outcome, PLAYBACK_VALIDATORS, run_validators};
use crate::utils::config::BotConfig;
use crate::{CommandResult, Context};

/// How long the skip button on a now-playing message stays live
pub const SKIP_BUTTON_TIMEOUT: Duration = Duration::from_secs(60);

/// Show the current track, then let the caller skip it from the message for a minute
pub async fn show_now_playing<R: CommandResponder>(
    invocation: &InvocationContext,
    queues: &dyn QueueProvider,
    responder: &R,
    config: &BotConfig,
) -> CommandResult {
    let options = &config.embed_options;
    let execution_id = invocation.execution_id;

    let queue = queues.get_queue(invocation.guild_id).await;
    if let Outcome::Fail(response) =
        run_validators(&PLAYBACK_VALIDATORS, invocation, queue.as_deref(), options)
    {
        responder.reply(response).await?;
        return Ok(());
    }

    let Some((queue, track)) = queue.and_then(|q| q.current_track().map(|t| (q, t))) else {
        // The track ended between validation and now
        responder.reply(embedded_messages::nothing_playing(options)).await?;
        return Ok(());
    };

    let repeat_mode = RepeatMode::try_from(queue.repeat_mode())?;
    let playback = queue.playback_state().await?;
    let channel = queue.channel();
    let view = NowPlaying {
        invocation,
        channel: &channel,
        track: &track,
        playback,
        pending: queue.tracks().len(),
        repeat_mode,
    };

    let message_id = responder
        .reply_with_id(embedded_messages::now_playing(&view, config))
        .await?;
    debug!("[{}] Showing '{}', waiting for skip button", execution_id, track.title);

    let button_id = button_controls::skip_button_id(&track);
    let mut clicks = responder.button_clicks(message_id);
    let caller_click = async {
        while let Some(click) = clicks.next().await {
            if click.user_id() == invocation.user_id && click.custom_id() == button_id {
                return Some(click);
            }
            debug!(
                "[{}] Ignoring button '{}' from user {}",
                execution_id,
                click.custom_id(),
                click.user_id()
            );
        }
        None
    };

    let click = match tokio::time::timeout(SKIP_BUTTON_TIMEOUT, caller_click).await {
        Ok(Some(click)) => click,
        Ok(None) => {
            debug!("[{}] Button stream closed", execution_id);
            return Ok(());
        }
        Err(_) => {
            debug!("[{}] Skip button expired", execution_id);
            return Ok(());
        }
    };
    drop(clicks);
    click.acknowledge().await?;

    let clicked_track = button_controls::track_id_from_skip_button(click.custom_id());
    let queue = queues.get_queue(invocation.guild_id).await;
    let Some((queue, current)) = queue.and_then(|q| q.current_track().map(|t| (q, t))) else {
        responder
            .follow_up(embedded_messages::nothing_playing(options))
            .await?;
        return Ok(());
    };

    if clicked_track != Some(current.id) {
        debug!(
            "[{}] '{}' is no longer playing, not skipping '{}'",
            execution_id, track.title, current.title
        );
        responder
            .follow_up(embedded_messages::already_skipped(options))
            .await?;
        return Ok(());
    }

    let repeat_mode = RepeatMode::try_from(queue.repeat_mode())?;
    queue.skip()?;
    info!(
        "[{}] Skipped '{}' from the now-playing button in guild {}",
        execution_id, current.title, invocation.guild_id
    );

    responder
        .follow_up(embedded_messages::skipped(invocation, &current, repeat_mode, options))
        .await?;
    Ok(())
}

/// Show the track that is playing now
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn nowplaying(ctx: Context<'_>) -> CommandResult {
    let invocation = InvocationContext::from_poise(ctx).await?;
    let data = ctx.data();
    show_now_playing(
        &invocation,
        data.music.as_ref(),
        &PoiseResponder::new(ctx),
        &data.config,
    )
    .await
}
