use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::{SerenityInit, Songbird};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jukebox::commands::music::utils::music_manager::MusicManager;
use jukebox::commands::music::{loop_mode, nowplaying, play, skip};
use jukebox::utils::config::{self, BotConfig};
use jukebox::{Data, Error, dispatch, events, help, register};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jukebox=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let token = config::discord_token()?;
    let config = Arc::new(BotConfig::load()?);

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let commands = vec![
        // Default commands
        register(),
        help(),
        // Music commands
        play(),
        nowplaying(),
        skip(),
        loop_mode(),
    ];

    let songbird = Songbird::serenity();
    let voice = Arc::clone(&songbird);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            pre_command: dispatch::pre_command,
            post_command: dispatch::post_command,
            on_error: dispatch::on_error,
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands", framework.options().commands.len());
                Ok(Data {
                    config,
                    music: Arc::new(MusicManager::new(voice, Arc::clone(&ctx.cache))),
                    http_client: reqwest::Client::new(),
                })
            })
        });

    let mut client = ClientBuilder::new(token, intents)
        .event_handler(events::Handler)
        .framework(framework.build())
        .register_songbird_with(songbird)
        .await?;

    client.start().await.map_err(Into::into)
}
