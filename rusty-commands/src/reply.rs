//! Plain-text notices sent back to whoever triggered a command.

use twilight_http::Client;
use twilight_model::{
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use rusty_paginator::pagination::{Trigger, TriggerSource};

/// Send `content` as a channel message, or as an ephemeral interaction reply.
pub async fn respond_notice(http: &Client, trigger: &Trigger, content: &str) -> anyhow::Result<()> {
    match &trigger.source {
        TriggerSource::Message => {
            http.create_message(trigger.channel_id)
                .content(content)
                .await?;
        }
        TriggerSource::Interaction(interaction) => {
            let response = InteractionResponse {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(
                    InteractionResponseDataBuilder::new()
                        .content(content)
                        .flags(MessageFlags::EPHEMERAL)
                        .build(),
                ),
            };

            http.interaction(interaction.application_id)
                .create_response(interaction.interaction_id, &interaction.token, &response)
                .await?;
        }
    }

    Ok(())
}
