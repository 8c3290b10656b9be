//! Jukebox: a Discord voice-channel music bot built on poise, serenity and songbird.

use std::sync::Arc;

pub mod commands;
pub mod dispatch;
pub mod events;
pub mod utils;

use commands::music::utils::music_manager::MusicManager;
use utils::config::BotConfig;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data, which is stored and accessible in all command invocations
pub struct Data {
    pub config: Arc<BotConfig>,
    pub music: Arc<MusicManager>,
    pub http_client: reqwest::Client,
}

/// Show the list of commands
#[poise::command(slash_command, category = "General")]
pub async fn help(ctx: Context<'_>) -> CommandResult {
    poise::builtins::help(
        ctx,
        None,
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom: "Join a voice channel and start with /play.",
            show_context_menu_commands: true,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

#[poise::command(prefix_command, hide_in_help)]
pub async fn register(ctx: Context<'_>) -> CommandResult {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}
