//! Framework hooks wrapped around every command: deferral, timing and the generic
//! failure reply.

use futures::future::BoxFuture;
use poise::{CreateReply, FrameworkError};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::commands::music::utils::embedded_messages;
use crate::{Context, Data, Error};

/// Commands slower than this get a warning follow-up
pub const SLOW_COMMAND_THRESHOLD: Duration = Duration::from_secs(20);

/// Commands that wait on a button collector are expected to run past this
pub const COLLECTOR_COMMAND_THRESHOLD: Duration = Duration::from_secs(55);

const COLLECTOR_COMMANDS: &[&str] = &["nowplaying"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionTiming {
    Normal,
    Slow,
}

pub fn classify_execution(command: &str, elapsed: Duration) -> ExecutionTiming {
    if elapsed <= SLOW_COMMAND_THRESHOLD {
        return ExecutionTiming::Normal;
    }
    if COLLECTOR_COMMANDS.contains(&command) && elapsed > COLLECTOR_COMMAND_THRESHOLD {
        // The collector timed out, which is the normal way these commands end
        return ExecutionTiming::Normal;
    }
    ExecutionTiming::Slow
}

struct StartedAt(Instant);

/// Defer the reply and remember when the command started
pub fn pre_command(ctx: Context<'_>) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        ctx.set_invocation_data(StartedAt(Instant::now())).await;
        if let Err(e) = ctx.defer().await {
            warn!("[{}] Failed to defer '{}': {}", ctx.id(), ctx.command().name, e);
        }
    })
}

pub fn post_command(ctx: Context<'_>) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        let Some(started_at) = ctx.invocation_data::<StartedAt>().await.map(|s| s.0) else {
            return;
        };
        let elapsed = started_at.elapsed();
        let command = &ctx.command().name;
        let guild = ctx
            .guild_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        match classify_execution(command, elapsed) {
            ExecutionTiming::Normal => {
                info!(
                    "[{}] ({}) Command '{}' executed in {} ms",
                    ctx.id(),
                    guild,
                    command,
                    elapsed.as_millis()
                );
            }
            ExecutionTiming::Slow => {
                warn!(
                    "[{}] ({}) Command '{}' took {} ms to execute",
                    ctx.id(),
                    guild,
                    command,
                    elapsed.as_millis()
                );
                let response =
                    embedded_messages::slow_command(elapsed, &ctx.data().config.embed_options);
                if let Err(e) = ctx.send(CreateReply::from(response)).await {
                    error!("[{}] Failed to send slow command warning: {}", ctx.id(), e);
                }
            }
        }
    })
}

pub fn on_error(error: FrameworkError<'_, Data, Error>) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        match error {
            FrameworkError::Command { error, ctx, .. } => {
                error!(
                    "[{}] Command '{}' failed to execute: {}",
                    ctx.id(),
                    ctx.command().name,
                    error
                );
                let response = embedded_messages::unexpected_error(&ctx.data().config.embed_options);
                if let Err(e) = ctx.send(CreateReply::from(response)).await {
                    error!("[{}] Failed to send error response: {}", ctx.id(), e);
                }
            }
            FrameworkError::Setup { error, .. } => {
                error!("Failed to set up the framework: {}", error);
            }
            other => {
                if let Err(e) = poise::builtins::on_error(other).await {
                    error!("Error while handling framework error: {}", e);
                }
            }
        }
    })
}
