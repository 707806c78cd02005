//! Request/response surface the navigator dispatches through.

use async_trait::async_trait;
use twilight_model::{
    application::interaction::Interaction,
    channel::Message,
    gateway::payload::incoming::MessageCreate,
    id::{
        Id,
        marker::{ApplicationMarker, ChannelMarker, GuildMarker, InteractionMarker, MessageMarker},
    },
};

use super::error::DispatchError;
use super::page::PagePayload;

/// Location of a message the bot can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

impl From<&Message> for MessageRef {
    fn from(message: &Message) -> Self {
        Self {
            channel_id: message.channel_id,
            message_id: message.id,
        }
    }
}

/// Interaction whose response the navigator may create or edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRef {
    pub application_id: Id<ApplicationMarker>,
    pub interaction_id: Id<InteractionMarker>,
    pub token: String,
    /// Whether a response (reply or deferral) was already sent.
    pub acknowledged: bool,
}

/// How the triggering request arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerSource {
    Message,
    Interaction(InteractionRef),
}

/// The request a render answers: where it came from and how to respond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub channel_id: Id<ChannelMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub source: TriggerSource,
}

impl Trigger {
    pub fn from_message(message: &MessageCreate) -> Self {
        Self {
            channel_id: message.channel_id,
            guild_id: message.guild_id,
            source: TriggerSource::Message,
        }
    }

    /// Returns `None` when the interaction carries no channel.
    pub fn from_interaction(interaction: &Interaction) -> Option<Self> {
        let channel_id = interaction.channel.as_ref()?.id;
        Some(Self {
            channel_id,
            guild_id: interaction.guild_id,
            source: TriggerSource::Interaction(InteractionRef {
                application_id: interaction.application_id,
                interaction_id: interaction.id,
                token: interaction.token.clone(),
                acknowledged: false,
            }),
        })
    }

    /// Mark the triggering interaction as already responded to or deferred.
    #[must_use]
    pub fn acknowledged(mut self) -> Self {
        if let TriggerSource::Interaction(interaction) = &mut self.source {
            interaction.acknowledged = true;
        }
        self
    }
}

/// How the currently displayed message was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOrigin {
    /// Reply to an interaction; later renders go through its response endpoints.
    Interactive(InteractionRef),
    /// Plain channel message; later renders edit it directly.
    PlainMessage,
}

/// The single outbound message a navigator is displaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHandle {
    pub origin: ResponseOrigin,
    pub message: MessageRef,
}

/// Send/edit capabilities of the hosting chat platform.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post a new message in a channel.
    async fn send(
        &self,
        channel_id: Id<ChannelMarker>,
        payload: &PagePayload,
    ) -> Result<MessageRef, DispatchError>;

    /// Edit an existing message. Fields absent from the payload are left alone.
    async fn edit(&self, message: MessageRef, payload: &PagePayload) -> Result<(), DispatchError>;

    /// Reply to an unacknowledged interaction with a public message and fetch it.
    async fn reply(
        &self,
        interaction: &InteractionRef,
        payload: &PagePayload,
    ) -> Result<MessageRef, DispatchError>;

    /// Edit the original response of an acknowledged interaction.
    async fn edit_reply(
        &self,
        interaction: &InteractionRef,
        payload: &PagePayload,
    ) -> Result<MessageRef, DispatchError>;
}
