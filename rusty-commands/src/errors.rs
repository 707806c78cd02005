//! Reporting of failed commands back to the user.
//!
//! Users only ever see a generic message; the error itself goes to the log.

use tracing::error;
use twilight_http::Client;
use twilight_model::{
    channel::message::MessageFlags,
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::{Id, marker::ChannelMarker},
};
use twilight_util::builder::InteractionResponseDataBuilder;

/// The only failure text users ever see.
pub const GENERIC_COMMAND_ERROR: &str = "An error occurred when trying to run this command.";

/// Report a failed chat-input command.
///
/// Replies ephemerally; when the interaction was already answered or
/// deferred, Discord rejects the reply and the original response is edited
/// instead.
pub async fn report_interaction_error(
    http: &Client,
    interaction: &InteractionCreate,
    command: &str,
    source: &anyhow::Error,
) {
    error!(?source, command, "chat input command failed");

    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(GENERIC_COMMAND_ERROR)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    let client = http.interaction(interaction.application_id);
    if client
        .create_response(interaction.id, &interaction.token, &response)
        .await
        .is_ok()
    {
        return;
    }

    if let Err(report_error) = client
        .update_response(&interaction.token)
        .content(Some(GENERIC_COMMAND_ERROR))
        .await
    {
        error!(?report_error, command, "failed to report command error");
    }
}

/// Report a failed prefix command in the channel it came from.
pub async fn report_message_error(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    command: &str,
    source: &anyhow::Error,
) {
    error!(?source, command, "message command failed");

    if let Err(report_error) = http
        .create_message(channel_id)
        .content(GENERIC_COMMAND_ERROR)
        .await
    {
        error!(?report_error, command, "failed to report command error");
    }
}
