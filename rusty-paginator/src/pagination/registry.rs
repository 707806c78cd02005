//! Ordered, validated action registry.

use super::action::{PaginationAction, default_actions};
use super::error::ConfigurationError;
use super::layout::{MAX_PRIMARY_BUTTONS, MAX_SECONDARY_SELECTS};

/// Discord rejects component custom IDs longer than this.
pub const MAX_ACTION_ID_LEN: usize = 100;

/// Actions keyed by identifier, iterated in insertion order.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    actions: Vec<PaginationAction>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self {
            actions: default_actions(),
        }
    }
}

impl ActionRegistry {
    /// Build a registry holding exactly `actions`.
    pub fn new(
        actions: impl IntoIterator<Item = PaginationAction>,
    ) -> Result<Self, ConfigurationError> {
        let mut registry = Self {
            actions: Vec::new(),
        };
        registry.set_actions(actions)?;
        Ok(registry)
    }

    /// Replace every registered action.
    ///
    /// On error the previous registry stays installed.
    pub fn set_actions(
        &mut self,
        actions: impl IntoIterator<Item = PaginationAction>,
    ) -> Result<(), ConfigurationError> {
        let mut next = Vec::new();
        for action in actions {
            upsert(&mut next, action);
        }
        validate(&next)?;
        self.actions = next;
        Ok(())
    }

    /// Append actions. A known identifier is replaced where it already sits.
    pub fn add_actions(
        &mut self,
        actions: impl IntoIterator<Item = PaginationAction>,
    ) -> Result<(), ConfigurationError> {
        let mut next = self.actions.clone();
        for action in actions {
            upsert(&mut next, action);
        }
        validate(&next)?;
        self.actions = next;
        Ok(())
    }

    pub fn add_action(&mut self, action: PaginationAction) -> Result<(), ConfigurationError> {
        self.add_actions([action])
    }

    pub fn get(&self, id: &str) -> Option<&PaginationAction> {
        self.actions.iter().find(|action| action.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaginationAction> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn upsert(actions: &mut Vec<PaginationAction>, action: PaginationAction) {
    match actions.iter_mut().find(|existing| existing.id == action.id) {
        Some(existing) => *existing = action,
        None => actions.push(action),
    }
}

/// Reject action sets that the 5+1 control layout cannot hold.
fn validate(actions: &[PaginationAction]) -> Result<(), ConfigurationError> {
    for action in actions {
        if action.id.is_empty() {
            return Err(ConfigurationError::EmptyIdentifier);
        }
        if action.id.chars().count() > MAX_ACTION_ID_LEN {
            return Err(ConfigurationError::IdentifierTooLong {
                id: action.id.clone(),
                max: MAX_ACTION_ID_LEN,
            });
        }
    }

    let buttons = actions
        .iter()
        .filter(|action| action.trigger.is_button())
        .count();
    if buttons > MAX_PRIMARY_BUTTONS {
        return Err(ConfigurationError::TooManyButtons {
            count: buttons,
            max: MAX_PRIMARY_BUTTONS,
        });
    }

    let selects = actions.len() - buttons;
    if selects > MAX_SECONDARY_SELECTS {
        return Err(ConfigurationError::TooManySelects {
            count: selects,
            max: MAX_SECONDARY_SELECTS,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use twilight_model::channel::message::component::ButtonStyle;

    use super::*;
    use crate::pagination::action::{
        ActionTrigger, FIRST_PAGE, GO_TO_PAGE, NEXT_PAGE, STOP, Transition,
    };

    fn button(id: &str) -> PaginationAction {
        PaginationAction::new(
            id,
            ActionTrigger::Button {
                style: ButtonStyle::Secondary,
                label: Some(id.to_owned()),
                emoji: None,
            },
            |_| Transition::Stay,
        )
    }

    fn select(id: &str) -> PaginationAction {
        PaginationAction::new(
            id,
            ActionTrigger::Select { placeholder: None },
            |_| Transition::Stay,
        )
    }

    fn ids(registry: &ActionRegistry) -> Vec<String> {
        registry.iter().map(|action| action.id.clone()).collect()
    }

    #[test]
    fn default_registry_holds_the_six_default_actions() {
        let registry = ActionRegistry::default();
        assert_eq!(registry.len(), 6);
        assert!(registry.get(GO_TO_PAGE).is_some());
        assert!(registry.get(STOP).is_some());
    }

    #[test]
    fn set_actions_replaces_everything_in_order() {
        let mut registry = ActionRegistry::default();
        registry
            .set_actions([button("b"), select("s"), button("a")])
            .expect("valid set");
        assert_eq!(ids(&registry), ["b", "s", "a"]);
    }

    #[test]
    fn add_actions_appends_and_updates_in_place() {
        let mut registry = ActionRegistry::new([button("one"), button("two")]).expect("valid");
        let renamed = PaginationAction::new(
            "one",
            ActionTrigger::Button {
                style: ButtonStyle::Danger,
                label: Some("first".to_owned()),
                emoji: None,
            },
            |_| Transition::Stop,
        );
        registry
            .add_actions([button("three"), renamed])
            .expect("valid addition");

        assert_eq!(ids(&registry), ["one", "two", "three"]);
        let one = registry.get("one").expect("one registered");
        assert_eq!(
            one.trigger,
            ActionTrigger::Button {
                style: ButtonStyle::Danger,
                label: Some("first".to_owned()),
                emoji: None,
            }
        );
    }

    #[test]
    fn second_select_is_rejected_and_registry_kept() {
        let mut registry = ActionRegistry::default();
        let error = registry
            .add_action(select("another-goto"))
            .expect_err("two selects cannot fit");
        assert_eq!(error, ConfigurationError::TooManySelects { count: 2, max: 1 });
        assert_eq!(registry.len(), 6);
        assert!(registry.get("another-goto").is_none());
    }

    #[test]
    fn sixth_button_is_rejected_at_registration() {
        let mut registry = ActionRegistry::default();
        let error = registry
            .add_action(button("extra"))
            .expect_err("six buttons cannot fit");
        assert_eq!(error, ConfigurationError::TooManyButtons { count: 6, max: 5 });
        assert_eq!(ids(&registry)[1], FIRST_PAGE);
    }

    #[test]
    fn set_actions_failure_keeps_previous_set() {
        let mut registry = ActionRegistry::new([button(NEXT_PAGE)]).expect("valid");
        let result = registry.set_actions([button("ok"), button("")]);
        assert_eq!(result, Err(ConfigurationError::EmptyIdentifier));
        assert_eq!(ids(&registry), [NEXT_PAGE]);
    }

    #[test]
    fn overlong_identifier_is_rejected() {
        let long = "x".repeat(MAX_ACTION_ID_LEN + 1);
        let error = ActionRegistry::new([button(&long)]).expect_err("too long");
        assert!(matches!(error, ConfigurationError::IdentifierTooLong { .. }));
    }

    #[test]
    fn duplicate_identifiers_in_one_call_collapse() {
        let registry = ActionRegistry::new([select("s"), select("s")]).expect("one select");
        assert_eq!(ids(&registry), ["s"]);
    }
}
