use std::num::NonZeroUsize;
use tracing::info;

use super::utils::embedded_messages;
use super::utils::invocation::InvocationContext;
use super::utils::player_queue::{QueueProvider, RepeatMode};
use super::utils::responder::{CommandResponder, PoiseResponder};
use super::utils::validation::{Outcome, PLAYBACK_VALIDATORS, run_validators};
use crate::utils::config::BotConfig;
use crate::{CommandResult, Context};

/// Skip the current track, or jump to the 1-based `target` in the pending queue.
/// The response always names the track that was playing.
pub async fn skip_track<R: CommandResponder>(
    invocation: &InvocationContext,
    target: Option<NonZeroUsize>,
    queues: &dyn QueueProvider,
    responder: &R,
    config: &BotConfig,
) -> CommandResult {
    let options = &config.embed_options;

    let queue = queues.get_queue(invocation.guild_id).await;
    if let Outcome::Fail(response) =
        run_validators(&PLAYBACK_VALIDATORS, invocation, queue.as_deref(), options)
    {
        responder.reply(response).await?;
        return Ok(());
    }

    let Some((queue, current)) = queue.and_then(|q| q.current_track().map(|t| (q, t))) else {
        responder.reply(embedded_messages::nothing_playing(options)).await?;
        return Ok(());
    };

    if let Some(target) = target {
        let pending = queue.tracks().len();
        if target.get() > pending {
            responder
                .reply(embedded_messages::skip_target_out_of_range(
                    pending,
                    target.get(),
                    options,
                ))
                .await?;
            return Ok(());
        }
    }

    // Read before mutating so a bad mode leaves the queue untouched
    let repeat_mode = RepeatMode::try_from(queue.repeat_mode())?;

    match target {
        Some(target) => {
            queue.skip_to(target.get() - 1)?;
            info!(
                "[{}] Skipped '{}' to track {} in guild {}",
                invocation.execution_id, current.title, target, invocation.guild_id
            );
        }
        None => {
            queue.skip()?;
            info!(
                "[{}] Skipped '{}' in guild {}",
                invocation.execution_id, current.title, invocation.guild_id
            );
        }
    }

    responder
        .reply(embedded_messages::skipped(invocation, &current, repeat_mode, options))
        .await?;
    Ok(())
}

/// Skip the current track, optionally jumping ahead in the queue
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn skip(
    ctx: Context<'_>,
    #[description = "Track number in the queue to skip to"]
    #[min = 1]
    tracknumber: Option<u32>,
) -> CommandResult {
    let invocation = InvocationContext::from_poise(ctx).await?;
    let target = tracknumber.and_then(|n| NonZeroUsize::new(n as usize));
    let data = ctx.data();
    skip_track(
        &invocation,
        target,
        data.music.as_ref(),
        &PoiseResponder::new(ctx),
        &data.config,
    )
    .await
}
