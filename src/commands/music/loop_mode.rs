use tracing::info;

use super::utils::embedded_messages;
use super::utils::invocation::InvocationContext;
use super::utils::player_queue::{QueueProvider, RepeatMode};
use super::utils::responder::{CommandResponder, PoiseResponder};
use super::utils::validation::{Outcome, QUEUE_VALIDATORS, run_validators};
use crate::{CommandResult, Context};

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum LoopChoice {
    #[name = "off"]
    Off,
    #[name = "track"]
    Track,
    #[name = "queue"]
    Queue,
}

impl From<LoopChoice> for RepeatMode {
    fn from(choice: LoopChoice) -> Self {
        match choice {
            LoopChoice::Off => RepeatMode::Off,
            LoopChoice::Track => RepeatMode::Track,
            LoopChoice::Queue => RepeatMode::Queue,
        }
    }
}

/// Repeat the current track or the whole queue
#[poise::command(slash_command, guild_only, rename = "loop", category = "Music")]
pub async fn loop_mode(
    ctx: Context<'_>,
    #[description = "What to repeat"] mode: LoopChoice,
) -> CommandResult {
    let invocation = InvocationContext::from_poise(ctx).await?;
    let data = ctx.data();
    let responder = PoiseResponder::new(ctx);
    let options = &data.config.embed_options;

    let queue = data.music.get_queue(invocation.guild_id).await;
    if let Outcome::Fail(response) =
        run_validators(&QUEUE_VALIDATORS, &invocation, queue.as_deref(), options)
    {
        responder.reply(response).await?;
        return Ok(());
    }

    let mode = RepeatMode::from(mode);
    data.music.set_repeat_mode(invocation.guild_id, mode).await?;
    info!(
        "[{}] Loop mode set to {} in guild {}",
        invocation.execution_id,
        mode.label(),
        invocation.guild_id
    );

    responder
        .reply(embedded_messages::repeat_mode_changed(mode, options))
        .await?;
    Ok(())
}
