//! Choosing between send, reply, edit-reply and edit for a render.

use twilight_model::id::{Id, marker::ChannelMarker};

use super::error::DispatchError;
use super::page::PagePayload;
use super::transport::{
    InteractionRef, MessageRef, ResponseHandle, ResponseOrigin, Transport, Trigger, TriggerSource,
};

/// The transport call a render will make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchPlan {
    Send(Id<ChannelMarker>),
    Reply(InteractionRef),
    EditReply(InteractionRef),
    EditMessage(MessageRef),
}

impl DispatchPlan {
    /// Decide from the current handle, falling back to the trigger on first render.
    pub fn resolve(response: Option<&ResponseHandle>, trigger: &Trigger) -> Self {
        match response {
            Some(ResponseHandle {
                origin: ResponseOrigin::Interactive(interaction),
                ..
            }) => Self::respond_to(interaction),
            Some(ResponseHandle {
                origin: ResponseOrigin::PlainMessage,
                message,
            }) => Self::EditMessage(*message),
            None => match &trigger.source {
                TriggerSource::Interaction(interaction) => Self::respond_to(interaction),
                TriggerSource::Message => Self::Send(trigger.channel_id),
            },
        }
    }

    fn respond_to(interaction: &InteractionRef) -> Self {
        if interaction.acknowledged {
            Self::EditReply(interaction.clone())
        } else {
            Self::Reply(interaction.clone())
        }
    }

    /// Run the plan and return the handle to keep afterwards.
    ///
    /// `current` is only consulted for in-place edits; on error nothing is
    /// returned, so the caller keeps its previous handle.
    pub async fn execute<T>(
        self,
        transport: &T,
        payload: &PagePayload,
        current: Option<&ResponseHandle>,
    ) -> Result<ResponseHandle, DispatchError>
    where
        T: Transport + ?Sized,
    {
        match self {
            Self::Send(channel_id) => {
                let message = transport.send(channel_id, payload).await?;
                Ok(ResponseHandle {
                    origin: ResponseOrigin::PlainMessage,
                    message,
                })
            }
            Self::Reply(mut interaction) => {
                let message = transport.reply(&interaction, payload).await?;
                interaction.acknowledged = true;
                Ok(ResponseHandle {
                    origin: ResponseOrigin::Interactive(interaction),
                    message,
                })
            }
            Self::EditReply(interaction) => {
                let message = transport.edit_reply(&interaction, payload).await?;
                Ok(ResponseHandle {
                    origin: ResponseOrigin::Interactive(interaction),
                    message,
                })
            }
            Self::EditMessage(message) => {
                transport.edit(message, payload).await?;
                Ok(current.cloned().unwrap_or(ResponseHandle {
                    origin: ResponseOrigin::PlainMessage,
                    message,
                }))
            }
        }
    }
}
