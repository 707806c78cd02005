//! The navigator: page collection, current index and response lifecycle.

use std::{fmt, sync::Arc};

use tracing::debug;
use twilight_model::{
    channel::message::component::Button,
    id::{
        Id,
        marker::{InteractionMarker, UserMarker},
    },
};

use super::action::{ActionInput, ActionTrigger, PaginationAction, Transition};
use super::dispatch::DispatchPlan;
use super::error::{ConfigurationError, PageResolutionError, PaginationError};
use super::layout::{Control, partition_controls};
use super::page::{Page, PagePayload};
use super::registry::ActionRegistry;
use super::select::{DefaultPageLabeler, LabelContext, PageLabeler, build_page_options, page_select_menu};
use super::transport::{ResponseHandle, Transport, Trigger, TriggerSource};

/// Delivers activations and can be told to stop delivering them.
pub trait InputCollector: Send + Sync {
    fn stop(&self);
}

/// One control activation routed back to the navigator.
#[derive(Debug, Clone, Copy)]
pub struct Activation<'a> {
    pub action_id: &'a str,
    /// Values picked in a select control. Empty for buttons.
    pub values: &'a [String],
}

/// What an activation did to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Navigated { from: usize, to: usize },
    Unchanged,
    Stopped,
    /// No registered action has this identifier.
    Unknown,
}

/// Renders one page at a time into a single message.
#[derive(Clone)]
pub struct Navigator {
    pages: Vec<Page>,
    index: usize,
    overrides: Option<PagePayload>,
    actions: ActionRegistry,
    labeler: Arc<dyn PageLabeler>,
    response: Option<ResponseHandle>,
    /// Interaction answered by a reply whose message could not be fetched.
    answered: Option<Id<InteractionMarker>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Empty navigator with the default action set.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            index: 0,
            overrides: None,
            actions: ActionRegistry::default(),
            labeler: Arc::new(DefaultPageLabeler),
            response: None,
            answered: None,
        }
    }

    pub fn with_pages<P: Into<Page>>(pages: impl IntoIterator<Item = P>) -> Self {
        let mut navigator = Self::new();
        navigator.pages.extend(pages.into_iter().map(Into::into));
        navigator
    }

    /// Fields applied over every page at render time.
    #[must_use]
    pub fn with_overrides(mut self, overrides: PagePayload) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_actions(
        mut self,
        actions: impl IntoIterator<Item = PaginationAction>,
    ) -> Result<Self, ConfigurationError> {
        self.actions.set_actions(actions)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_labeler(mut self, labeler: impl PageLabeler + 'static) -> Self {
        self.labeler = Arc::new(labeler);
        self
    }

    pub fn add_page(&mut self, page: impl Into<Page>) -> &mut Self {
        self.pages.push(page.into());
        self
    }

    pub fn set_actions(
        &mut self,
        actions: impl IntoIterator<Item = PaginationAction>,
    ) -> Result<&mut Self, ConfigurationError> {
        self.actions.set_actions(actions)?;
        Ok(self)
    }

    pub fn add_actions(
        &mut self,
        actions: impl IntoIterator<Item = PaginationAction>,
    ) -> Result<&mut Self, ConfigurationError> {
        self.actions.add_actions(actions)?;
        Ok(self)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// The message currently displayed, if any render succeeded yet.
    pub fn response(&self) -> Option<&ResponseHandle> {
        self.response.as_ref()
    }

    /// Run the activated action's handler and apply its transition.
    pub fn handle_action(
        &mut self,
        activation: Activation<'_>,
        collector: &dyn InputCollector,
    ) -> ActionOutcome {
        let Some(action) = self.actions.get(activation.action_id) else {
            debug!(action_id = activation.action_id, "ignoring unknown pagination action");
            return ActionOutcome::Unknown;
        };

        let transition = action.transition(&ActionInput {
            index: self.index,
            page_count: self.pages.len(),
            values: activation.values,
        });

        let outcome = self.apply_transition(transition);
        if outcome == ActionOutcome::Stopped {
            collector.stop();
        }

        debug!(action_id = activation.action_id, ?outcome, "pagination action applied");
        outcome
    }

    /// Apply a transition. Out-of-range targets leave the index untouched.
    pub fn apply_transition(&mut self, transition: Transition) -> ActionOutcome {
        match transition {
            Transition::SetIndex(to) if to < self.pages.len() && to != self.index => {
                let from = std::mem::replace(&mut self.index, to);
                ActionOutcome::Navigated { from, to }
            }
            Transition::SetIndex(_) | Transition::Stay => ActionOutcome::Unchanged,
            Transition::Stop => ActionOutcome::Stopped,
        }
    }

    /// Render the current page into the navigator's message.
    ///
    /// Nothing is sent when the page cannot be resolved, and the stored
    /// response handle only changes after the transport call succeeds.
    pub async fn render<T>(
        &mut self,
        transport: &T,
        trigger: &Trigger,
        viewer: Id<UserMarker>,
    ) -> Result<(), PaginationError>
    where
        T: Transport + ?Sized,
    {
        let payload = self.build_payload(trigger, viewer).await?;

        let trigger = self.with_known_acknowledgement(trigger);
        let plan = DispatchPlan::resolve(self.response.as_ref(), &trigger);
        debug!(
            index = self.index,
            pages = self.pages.len(),
            ?plan,
            "dispatching paginated message"
        );

        let replying_to = match &plan {
            DispatchPlan::Reply(interaction) => Some(interaction.interaction_id),
            _ => None,
        };
        match plan
            .execute(transport, &payload, self.response.as_ref())
            .await
        {
            Ok(handle) => {
                self.response = Some(handle);
                Ok(())
            }
            Err(source) => {
                if source.acknowledged_interaction() {
                    self.answered = replying_to;
                }
                Err(source.into())
            }
        }
    }

    /// A reply that was posted but not fetched still acknowledged its interaction.
    fn with_known_acknowledgement(&self, trigger: &Trigger) -> Trigger {
        match (&trigger.source, self.answered) {
            (TriggerSource::Interaction(interaction), Some(answered))
                if interaction.interaction_id == answered =>
            {
                trigger.clone().acknowledged()
            }
            _ => trigger.clone(),
        }
    }

    /// Resolve, merge and decorate the current page without sending it.
    pub async fn build_payload(
        &self,
        trigger: &Trigger,
        viewer: Id<UserMarker>,
    ) -> Result<PagePayload, PageResolutionError> {
        let mut payload = self.resolve_current_page().await?;

        if let Some(overrides) = &self.overrides {
            payload = payload.merged_with(overrides);
        }

        if self.pages.len() > 1 {
            let context = LabelContext {
                viewer,
                channel_id: trigger.channel_id,
                guild_id: trigger.guild_id,
            };
            let controls = self.build_controls(&context).await?;
            payload.components = Some(partition_controls(controls).into_components());
        }

        Ok(payload)
    }

    async fn resolve_current_page(&self) -> Result<PagePayload, PageResolutionError> {
        let index = self.index;
        let page = self
            .pages
            .get(index)
            .ok_or(PageResolutionError::NoPages)?;

        let payload = page
            .resolve(index, self)
            .await
            .map_err(|source| PageResolutionError::Producer { index, source })?;

        if payload.is_empty() {
            return Err(PageResolutionError::EmptyPayload { index });
        }

        Ok(payload)
    }

    async fn build_controls(
        &self,
        context: &LabelContext,
    ) -> Result<Vec<Control>, PageResolutionError> {
        let mut controls = Vec::with_capacity(self.actions.len());

        for action in self.actions.iter() {
            let control = match &action.trigger {
                ActionTrigger::Button {
                    style,
                    label,
                    emoji,
                } => Control::Button(Button {
                    id: None,
                    custom_id: Some(action.id.clone()),
                    disabled: false,
                    emoji: emoji.clone(),
                    label: label.clone(),
                    style: *style,
                    url: None,
                    sku_id: None,
                }),
                ActionTrigger::Select { placeholder } => {
                    let options = build_page_options(
                        self.pages.len(),
                        self.index,
                        self.labeler.as_ref(),
                        context,
                    )
                    .await?;
                    Control::Select(page_select_menu(&action.id, placeholder.clone(), options))
                }
            };
            controls.push(control);
        }

        Ok(controls)
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("pages", &self.pages)
            .field("index", &self.index)
            .field("overrides", &self.overrides)
            .field("actions", &self.actions)
            .field("response", &self.response)
            .field("answered", &self.answered)
            .finish_non_exhaustive()
    }
}
