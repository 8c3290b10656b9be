use serenity::all::{ActivityData, Guild, UnavailableGuild};
use serenity::async_trait;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::info;

pub struct Handler;

#[async_trait]
impl serenity::prelude::EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "Connected as {} to {} guilds",
            ready.user.name,
            ready.guilds.len()
        );
        ctx.set_activity(Some(ActivityData::watching("/help")));
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        // Also fired for every known guild on startup
        if is_new == Some(true) {
            info!(
                "Added to guild '{}' with {} members",
                guild.name, guild.member_count
            );
        }
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        if incomplete.unavailable {
            return;
        }
        match full {
            Some(guild) => info!(
                "Removed from guild '{}' with {} members",
                guild.name, guild.member_count
            ),
            None => info!("Removed from guild {}", incomplete.id),
        }
    }
}
