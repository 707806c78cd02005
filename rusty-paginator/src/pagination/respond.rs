//! Twilight HTTP implementation of the pagination transport and the
//! session host.

use async_trait::async_trait;
use twilight_http::Client;
use twilight_model::{
    channel::message::{MessageFlags, component::Component},
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::{Id, marker::ChannelMarker},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use super::error::{DispatchError, DispatchOperation};
use super::page::PagePayload;
use super::session::{Notice, SessionHost};
use super::transport::{InteractionRef, MessageRef, Transport};

#[async_trait]
impl Transport for Client {
    async fn send(
        &self,
        channel_id: Id<ChannelMarker>,
        payload: &PagePayload,
    ) -> Result<MessageRef, DispatchError> {
        let mut request = self.create_message(channel_id);
        if let Some(content) = payload.content.as_deref() {
            request = request.content(content);
        }
        if let Some(embeds) = payload.embeds.as_deref() {
            request = request.embeds(embeds);
        }
        if let Some(components) = payload.components.as_deref() {
            request = request.components(components);
        }
        if let Some(allowed_mentions) = payload.allowed_mentions.as_ref() {
            request = request.allowed_mentions(Some(allowed_mentions));
        }

        let message = request
            .await
            .map_err(|source| DispatchError::new(DispatchOperation::Send, source))?
            .model()
            .await
            .map_err(|source| DispatchError::new(DispatchOperation::Send, source))?;

        Ok(MessageRef::from(&message))
    }

    async fn edit(&self, message: MessageRef, payload: &PagePayload) -> Result<(), DispatchError> {
        let mut request = self.update_message(message.channel_id, message.message_id);
        if let Some(content) = payload.content.as_deref() {
            request = request.content(Some(content));
        }
        if let Some(embeds) = payload.embeds.as_deref() {
            request = request.embeds(Some(embeds));
        }
        if let Some(components) = payload.components.as_deref() {
            request = request.components(Some(components));
        }
        if let Some(allowed_mentions) = payload.allowed_mentions.as_ref() {
            request = request.allowed_mentions(Some(allowed_mentions));
        }

        request
            .await
            .map_err(|source| DispatchError::new(DispatchOperation::Edit, source))?;

        Ok(())
    }

    async fn reply(
        &self,
        interaction: &InteractionRef,
        payload: &PagePayload,
    ) -> Result<MessageRef, DispatchError> {
        let mut data = InteractionResponseDataBuilder::new();
        if let Some(content) = payload.content.clone() {
            data = data.content(content);
        }
        if let Some(embeds) = payload.embeds.clone() {
            data = data.embeds(embeds);
        }
        if let Some(components) = payload.components.clone() {
            data = data.components(components);
        }
        if let Some(allowed_mentions) = payload.allowed_mentions.clone() {
            data = data.allowed_mentions(allowed_mentions);
        }

        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data.build()),
        };

        let client = self.interaction(interaction.application_id);
        client
            .create_response(interaction.interaction_id, &interaction.token, &response)
            .await
            .map_err(|source| DispatchError::new(DispatchOperation::Reply, source))?;

        // The reply is posted at this point; later failures only lose the message ID.
        let message = client
            .response(&interaction.token)
            .await
            .map_err(|source| DispatchError::new(DispatchOperation::FetchReply, source))?
            .model()
            .await
            .map_err(|source| DispatchError::new(DispatchOperation::FetchReply, source))?;

        Ok(MessageRef::from(&message))
    }

    async fn edit_reply(
        &self,
        interaction: &InteractionRef,
        payload: &PagePayload,
    ) -> Result<MessageRef, DispatchError> {
        let client = self.interaction(interaction.application_id);
        let mut request = client.update_response(&interaction.token);
        if let Some(content) = payload.content.as_deref() {
            request = request.content(Some(content));
        }
        if let Some(embeds) = payload.embeds.as_deref() {
            request = request.embeds(Some(embeds));
        }
        if let Some(components) = payload.components.as_deref() {
            request = request.components(Some(components));
        }
        if let Some(allowed_mentions) = payload.allowed_mentions.as_ref() {
            request = request.allowed_mentions(Some(allowed_mentions));
        }

        let message = request
            .await
            .map_err(|source| DispatchError::new(DispatchOperation::EditReply, source))?
            .model()
            .await
            .map_err(|source| DispatchError::new(DispatchOperation::EditReply, source))?;

        Ok(MessageRef::from(&message))
    }
}

#[async_trait]
impl SessionHost for Client {
    async fn defer_update(&self, interaction: &InteractionRef) -> anyhow::Result<()> {
        let response = InteractionResponse {
            kind: InteractionResponseType::DeferredUpdateMessage,
            data: None,
        };
        self.interaction(interaction.application_id)
            .create_response(interaction.interaction_id, &interaction.token, &response)
            .await?;

        Ok(())
    }

    async fn notify(&self, interaction: &InteractionRef, notice: Notice) -> anyhow::Result<()> {
        let data = InteractionResponseDataBuilder::new()
            .content(notice.text())
            .flags(MessageFlags::EPHEMERAL)
            .build();
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data),
        };
        self.interaction(interaction.application_id)
            .create_response(interaction.interaction_id, &interaction.token, &response)
            .await?;

        Ok(())
    }

    async fn clear_controls(&self, message: MessageRef) -> anyhow::Result<()> {
        let no_components: [Component; 0] = [];
        self.update_message(message.channel_id, message.message_id)
            .components(Some(&no_components))
            .await?;

        Ok(())
    }
}
