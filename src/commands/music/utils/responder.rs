//! How command handlers talk back to the caller.
//!
//! Handlers only see [`CommandResponder`], so the Discord round-trips can be swapped
//! for recording fakes in tests.

use futures::StreamExt;
use futures::stream::BoxStream;
use poise::serenity_prelude as serenity;
use poise::CreateReply;
use serenity::all::{ComponentInteraction, ComponentInteractionCollector, Http};
use serenity::async_trait;
use serenity::model::id::{MessageId, UserId};
use std::sync::Arc;

use super::embedded_messages::MusicResponse;
use crate::{Context, Error};

/// A press of a message component button
#[async_trait]
pub trait ButtonClick: Send + Sync {
    fn user_id(&self) -> UserId;

    fn custom_id(&self) -> &str;

    /// Tell Discord the click was handled so the client stops waiting on it
    async fn acknowledge(&self) -> Result<(), Error>;
}

#[async_trait]
pub trait CommandResponder: Send + Sync {
    type Click: ButtonClick + 'static;

    /// Send the primary response
    async fn reply(&self, response: MusicResponse) -> Result<(), Error>;

    /// Send the primary response and look up the message carrying it, for responses
    /// whose buttons are listened to
    async fn reply_with_id(&self, response: MusicResponse) -> Result<MessageId, Error>;

    async fn follow_up(&self, response: MusicResponse) -> Result<(), Error>;

    /// Clicks on any button of `message_id`, from any user, in arrival order
    fn button_clicks(&self, message_id: MessageId) -> BoxStream<'static, Self::Click>;
}

/// Responds through the poise context of a slash command invocation
pub struct PoiseResponder<'a> {
    ctx: Context<'a>,
}

impl<'a> PoiseResponder<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommandResponder for PoiseResponder<'_> {
    type Click = SerenityClick;

    async fn reply(&self, response: MusicResponse) -> Result<(), Error> {
        self.ctx.send(CreateReply::from(response)).await?;
        Ok(())
    }

    async fn reply_with_id(&self, response: MusicResponse) -> Result<MessageId, Error> {
        let handle = self.ctx.send(CreateReply::from(response)).await?;
        let message = handle.message().await?;
        Ok(message.id)
    }

    async fn follow_up(&self, response: MusicResponse) -> Result<(), Error> {
        // Once the deferred response has been edited, further sends become follow-ups
        self.ctx.send(CreateReply::from(response)).await?;
        Ok(())
    }

    fn button_clicks(&self, message_id: MessageId) -> BoxStream<'static, Self::Click> {
        let http = Arc::clone(&self.ctx.serenity_context().http);
        ComponentInteractionCollector::new(self.ctx.serenity_context())
            .message_id(message_id)
            .stream()
            .map(move |interaction| SerenityClick {
                interaction,
                http: Arc::clone(&http),
            })
            .boxed()
    }
}

pub struct SerenityClick {
    interaction: ComponentInteraction,
    http: Arc<Http>,
}

#[async_trait]
impl ButtonClick for SerenityClick {
    fn user_id(&self) -> UserId {
        self.interaction.user.id
    }

    fn custom_id(&self) -> &str {
        &self.interaction.data.custom_id
    }

    async fn acknowledge(&self) -> Result<(), Error> {
        self.interaction.defer(&*self.http).await?;
        Ok(())
    }
}
