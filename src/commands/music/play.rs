use tracing::{debug, error, info};

use super::audio_sources::AudioSource;
use super::utils::embedded_messages;
use super::utils::invocation::InvocationContext;
use super::utils::music_manager::MusicError;
use super::utils::player_queue::QueueProvider;
use super::utils::responder::{CommandResponder, PoiseResponder};
use super::utils::validation::{Outcome, VOICE_VALIDATORS, run_validators};
use crate::{CommandResult, Context};

/// Play a song from YouTube or a direct URL
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "URL or search query"] query: String,
) -> CommandResult {
    let invocation = InvocationContext::from_poise(ctx).await?;
    let data = ctx.data();
    let responder = PoiseResponder::new(ctx);
    let options = &data.config.embed_options;
    info!("[{}] Received play command with query: {}", invocation.execution_id, query);

    let queue = data.music.get_queue(invocation.guild_id).await;
    if let Outcome::Fail(response) =
        run_validators(&VOICE_VALIDATORS, &invocation, queue.as_deref(), options)
    {
        responder.reply(response).await?;
        return Ok(());
    }
    let channel_id = invocation.voice_channel.ok_or(MusicError::NotConnected)?;

    // Join the voice channel if not already connected
    let call = match queue {
        Some(_) => data.music.get_call(invocation.guild_id)?,
        None => {
            debug!("[{}] Not connected, joining {}", invocation.execution_id, channel_id);
            data.music
                .join_channel(invocation.guild_id, channel_id, data.http_client.clone())
                .await?
        }
    };

    let (track, metadata) =
        match AudioSource::from_query(data.http_client.clone(), &query, invocation.user_id).await {
            Ok(resolved) => resolved,
            Err(err) => {
                error!("[{}] Failed to resolve '{}': {}", invocation.execution_id, query, err);
                responder
                    .reply(embedded_messages::failed_to_play(&err, options))
                    .await?;
                return Ok(());
            }
        };

    let position = {
        let mut handler = call.lock().await;
        handler.enqueue(track).await;
        handler.queue().len().saturating_sub(1)
    };
    info!(
        "[{}] Queued '{}' at position {} in guild {}",
        invocation.execution_id, metadata.title, position, invocation.guild_id
    );

    responder
        .reply(embedded_messages::added_to_queue(&invocation, &metadata, position, options))
        .await?;
    Ok(())
}
