use serenity::model::id::{ChannelId, GuildId, UserId};

use super::music_manager::MusicError;
use crate::Context;

/// Who invoked a command and where they are, captured once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Poise invocation id, used to correlate log lines
    pub execution_id: u64,
    pub user_id: UserId,
    /// Guild nickname, falling back to the username
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub guild_id: GuildId,
    pub guild_icon_url: Option<String>,
    /// The caller's current voice channel in this guild
    pub voice_channel: Option<ChannelId>,
}

impl InvocationContext {
    pub async fn from_poise(ctx: Context<'_>) -> Result<Self, MusicError> {
        let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;
        let author = ctx.author();

        let nickname = ctx
            .author_member()
            .await
            .and_then(|member| member.nick.clone());

        let (voice_channel, guild_icon_url) = {
            let guild = ctx.guild().ok_or(MusicError::NotInGuild)?;
            let voice_channel = guild
                .voice_states
                .get(&author.id)
                .and_then(|state| state.channel_id);
            (voice_channel, guild.icon_url())
        };

        Ok(Self {
            execution_id: ctx.id(),
            user_id: author.id,
            display_name: nickname.unwrap_or_else(|| author.name.clone()),
            avatar_url: author.avatar_url(),
            guild_id,
            guild_icon_url,
            voice_channel,
        })
    }
}
