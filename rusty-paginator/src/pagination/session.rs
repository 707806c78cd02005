//! Input collection for live paginated messages.
//!
//! A session is opened when a navigator with more than one page is rendered.
//! Component activations on that message are filtered by owner, routed to the
//! navigator, and re-rendered. Sessions end on the stop action or after an
//! idle timeout; both strip the message's components.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, error, info};
use twilight_model::{
    application::interaction::{Interaction, InteractionData},
    gateway::payload::incoming::InteractionCreate,
    id::{
        Id,
        marker::{MessageMarker, UserMarker},
    },
};

use super::action::ACTION_ID_PREFIX;
use super::error::PaginationError;
use super::navigator::{ActionOutcome, Activation, InputCollector, Navigator};
use super::transport::{InteractionRef, MessageRef, Transport, Trigger};

/// Default idle timeout for pagination sessions.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Ephemeral notices a session answers activations with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Someone other than the command author pressed a control.
    WrongUser,
    /// The message has no live session.
    Expired,
    Invalid,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Self::WrongUser => "Only the person who ran this command can use these controls.",
            Self::Expired => "These controls are no longer active. Run the command again.",
            Self::Invalid => "This control could not be handled.",
        }
    }
}

/// Interaction plumbing a session needs on top of rendering.
#[async_trait]
pub trait SessionHost: Transport {
    /// Acknowledge a component activation; the message is edited afterwards.
    async fn defer_update(&self, interaction: &InteractionRef) -> anyhow::Result<()>;

    async fn notify(&self, interaction: &InteractionRef, notice: Notice) -> anyhow::Result<()>;

    /// Strip every interactive component from the message. The message stays.
    async fn clear_controls(&self, message: MessageRef) -> anyhow::Result<()>;
}

/// A component activation, detached from the gateway payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEvent {
    pub interaction: InteractionRef,
    pub message_id: Option<Id<MessageMarker>>,
    pub actor: Option<Id<UserMarker>>,
    pub custom_id: String,
    pub values: Vec<String>,
}

impl ComponentEvent {
    /// Returns `None` unless the interaction is a message component activation.
    pub fn from_interaction(interaction: &Interaction) -> Option<Self> {
        let Some(InteractionData::MessageComponent(component)) = interaction.data.as_ref() else {
            return None;
        };

        Some(Self {
            interaction: InteractionRef {
                application_id: interaction.application_id,
                interaction_id: interaction.id,
                token: interaction.token.clone(),
                acknowledged: false,
            },
            message_id: interaction.message.as_ref().map(|message| message.id),
            actor: interaction.author_id(),
            custom_id: component.custom_id.clone(),
            values: component.values.clone(),
        })
    }
}

type SessionMap = HashMap<u64, Session>;

/// Navigator plus liveness, guarded together so closing is ordered with renders.
struct SessionState {
    navigator: Navigator,
    closed: bool,
}

struct Session {
    owner: Id<UserMarker>,
    trigger: Trigger,
    message: MessageRef,
    state: Arc<Mutex<SessionState>>,
    expiry: JoinHandle<()>,
}

/// Collector flag raised by the stop action.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl InputCollector for StopSignal {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Live pagination sessions keyed by message ID.
#[derive(Clone)]
pub struct PaginationSessions {
    sessions: Arc<Mutex<SessionMap>>,
    timeout: Duration,
}

impl Default for PaginationSessions {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl PaginationSessions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            timeout,
        }
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Render the first page and start collecting activations for it.
    ///
    /// Single-page navigators have no controls, so no session is kept.
    pub async fn start<H>(
        &self,
        host: Arc<H>,
        mut navigator: Navigator,
        trigger: Trigger,
        owner: Id<UserMarker>,
    ) -> Result<(), PaginationError>
    where
        H: SessionHost + 'static,
    {
        navigator.render(&*host, &trigger, owner).await?;

        let Some(message) = navigator.response().map(|response| response.message) else {
            return Ok(());
        };
        if navigator.page_count() <= 1 {
            return Ok(());
        }

        let key = message.message_id.get();
        let mut sessions = self.sessions.lock().await;
        let session = Session {
            owner,
            trigger: trigger.acknowledged(),
            message,
            state: Arc::new(Mutex::new(SessionState {
                navigator,
                closed: false,
            })),
            expiry: self.schedule_expiry(host, key),
        };
        if let Some(previous) = sessions.insert(key, session) {
            previous.expiry.abort();
        }
        info!(message_id = key, owner = owner.get(), "pagination session started");

        Ok(())
    }

    /// Route a gateway component interaction to its session.
    ///
    /// Returns `false` when the interaction is not a pagination control.
    pub async fn handle_component<H>(
        &self,
        host: Arc<H>,
        interaction: &InteractionCreate,
    ) -> anyhow::Result<bool>
    where
        H: SessionHost + 'static,
    {
        match ComponentEvent::from_interaction(interaction) {
            Some(event) => self.handle_event(host, event).await,
            None => Ok(false),
        }
    }

    /// Route one activation to its session.
    ///
    /// Returns `false` when the custom ID is not a pagination control.
    pub async fn handle_event<H>(&self, host: Arc<H>, event: ComponentEvent) -> anyhow::Result<bool>
    where
        H: SessionHost + 'static,
    {
        if !event.custom_id.starts_with(ACTION_ID_PREFIX) {
            return Ok(false);
        }

        let (Some(message_id), Some(actor)) = (event.message_id, event.actor) else {
            host.notify(&event.interaction, Notice::Invalid).await?;
            return Ok(true);
        };
        let key = message_id.get();

        let session = {
            let sessions = self.sessions.lock().await;
            sessions.get(&key).map(|session| {
                (
                    session.owner,
                    session.trigger.clone(),
                    session.message,
                    Arc::clone(&session.state),
                )
            })
        };
        let Some((owner, trigger, message, state)) = session else {
            host.notify(&event.interaction, Notice::Expired).await?;
            return Ok(true);
        };

        if actor != owner {
            host.notify(&event.interaction, Notice::WrongUser).await?;
            return Ok(true);
        }

        self.refresh(Arc::clone(&host), key).await;

        let mut guard = state.lock().await;
        if guard.closed {
            drop(guard);
            host.notify(&event.interaction, Notice::Expired).await?;
            return Ok(true);
        }

        host.defer_update(&event.interaction).await?;

        let signal = StopSignal::default();
        let outcome = guard.navigator.handle_action(
            Activation {
                action_id: &event.custom_id,
                values: &event.values,
            },
            &signal,
        );

        if signal.is_stopped() {
            close(&*host, key, message, &mut guard).await;
            drop(guard);
            self.forget(key).await;
            return Ok(true);
        }

        if let ActionOutcome::Navigated { .. } = outcome {
            guard.navigator.render(&*host, &trigger, owner).await?;
        }

        Ok(true)
    }

    /// End a session and strip its controls. The message itself stays.
    pub async fn end<H>(&self, host: &H, key: u64)
    where
        H: SessionHost + ?Sized,
    {
        let Some(session) = self.sessions.lock().await.remove(&key) else {
            return;
        };
        session.expiry.abort();

        let mut state = session.state.lock().await;
        close(host, key, session.message, &mut state).await;
    }

    async fn forget(&self, key: u64) {
        if let Some(session) = self.sessions.lock().await.remove(&key) {
            session.expiry.abort();
        }
    }

    async fn refresh<H>(&self, host: Arc<H>, key: u64)
    where
        H: SessionHost + 'static,
    {
        let mut sessions = self.sessions.lock().await;
        let Some(session) = sessions.get_mut(&key) else {
            return;
        };
        let stale = std::mem::replace(&mut session.expiry, self.schedule_expiry(host, key));
        stale.abort();
    }

    /// The task only removes the session once the map lock is free, so
    /// callers may spawn it before inserting.
    fn schedule_expiry<H>(&self, host: Arc<H>, key: u64) -> JoinHandle<()>
    where
        H: SessionHost + 'static,
    {
        let sessions = Arc::clone(&self.sessions);
        let timeout = self.timeout;

        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;

            let Some(session) = sessions.lock().await.remove(&key) else {
                return;
            };
            debug!(message_id = key, "pagination session idle, closing");

            let mut state = session.state.lock().await;
            close(&*host, key, session.message, &mut state).await;
        })
    }
}

/// Mark the session closed and strip its controls, once.
async fn close<H>(host: &H, key: u64, message: MessageRef, state: &mut SessionState)
where
    H: SessionHost + ?Sized,
{
    if std::mem::replace(&mut state.closed, true) {
        return;
    }

    match host.clear_controls(message).await {
        Ok(()) => info!(message_id = key, "pagination session ended"),
        Err(source) => error!(
            ?source,
            message_id = key,
            "pagination session ended with its controls still attached"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_signal_starts_lowered() {
        let signal = StopSignal::default();
        assert!(!signal.is_stopped());
        signal.stop();
        assert!(signal.is_stopped());
    }

    #[test]
    fn notices_have_distinct_text() {
        let texts = [Notice::WrongUser, Notice::Expired, Notice::Invalid].map(Notice::text);
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
        assert_ne!(texts[0], texts[2]);
    }

    #[tokio::test]
    async fn sessions_start_empty() {
        let sessions = PaginationSessions::new(Duration::from_secs(5));
        assert_eq!(sessions.active_sessions().await, 0);
    }
}
