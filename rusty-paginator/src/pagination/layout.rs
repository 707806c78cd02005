//! Capacity-bounded arrangement of navigation controls into message rows.

use tracing::debug;
use twilight_model::channel::message::component::{ActionRow, Button, Component, SelectMenu};

/// Buttons that fit in the primary row.
pub const MAX_PRIMARY_BUTTONS: usize = 5;
/// Select controls that fit in the secondary row.
pub const MAX_SECONDARY_SELECTS: usize = 1;
/// Controls considered by the partitioner; anything past this is dropped.
pub const LAYOUT_CAPACITY: usize = MAX_PRIMARY_BUTTONS + MAX_SECONDARY_SELECTS;

/// One materialized interactive control.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Button(Button),
    Select(SelectMenu),
}

impl Control {
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Self::Button(button) => button.custom_id.as_deref(),
            Self::Select(select) => Some(&select.custom_id),
        }
    }

    fn is_button(&self) -> bool {
        matches!(self, Self::Button(_))
    }
}

/// Two-tier control layout: one button row and at most one select row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlLayout {
    pub primary: Vec<Button>,
    pub secondary: Option<SelectMenu>,
}

impl ControlLayout {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_none()
    }

    /// Convert into message action rows, skipping empty rows.
    pub fn into_components(self) -> Vec<Component> {
        let mut rows = Vec::with_capacity(2);

        if !self.primary.is_empty() {
            rows.push(Component::ActionRow(ActionRow {
                id: None,
                components: self.primary.into_iter().map(Component::Button).collect(),
            }));
        }

        if let Some(select) = self.secondary {
            rows.push(Component::ActionRow(ActionRow {
                id: None,
                components: vec![Component::SelectMenu(select)],
            }));
        }

        rows
    }
}

/// Partition controls into the primary button row and the secondary select row.
///
/// Buttons are stably moved ahead of selects, then only the first
/// [`LAYOUT_CAPACITY`] controls are kept: their buttons (at most
/// [`MAX_PRIMARY_BUTTONS`]) form the primary row and their first select
/// becomes the secondary row. With six or more buttons the select falls
/// outside the window and is dropped.
pub fn partition_controls(controls: Vec<Control>) -> ControlLayout {
    let (buttons, selects): (Vec<Control>, Vec<Control>) =
        controls.into_iter().partition(Control::is_button);

    let mut layout = ControlLayout::default();
    let mut dropped = Vec::new();

    for (position, control) in buttons.into_iter().chain(selects).enumerate() {
        match control {
            Control::Button(button)
                if position < LAYOUT_CAPACITY && layout.primary.len() < MAX_PRIMARY_BUTTONS =>
            {
                layout.primary.push(button);
            }
            Control::Select(select) if position < LAYOUT_CAPACITY && layout.secondary.is_none() => {
                layout.secondary = Some(select);
            }
            other => dropped.push(other),
        }
    }

    if !dropped.is_empty() {
        let dropped_ids: Vec<&str> = dropped.iter().filter_map(Control::custom_id).collect();
        debug!(
            dropped = dropped.len(),
            ?dropped_ids,
            "controls beyond layout capacity were dropped"
        );
    }

    layout
}

#[cfg(test)]
mod tests {
    use twilight_model::channel::message::component::{ButtonStyle, SelectMenuType};

    use super::*;

    fn button(id: &str) -> Control {
        Control::Button(Button {
            id: None,
            custom_id: Some(id.to_owned()),
            disabled: false,
            emoji: None,
            label: Some(id.to_owned()),
            style: ButtonStyle::Primary,
            url: None,
            sku_id: None,
        })
    }

    fn select(id: &str) -> Control {
        Control::Select(SelectMenu {
            id: None,
            channel_types: None,
            custom_id: id.to_owned(),
            default_values: None,
            disabled: false,
            kind: SelectMenuType::Text,
            max_values: None,
            min_values: None,
            options: Some(Vec::new()),
            placeholder: None,
            required: None,
        })
    }

    fn primary_ids(layout: &ControlLayout) -> Vec<&str> {
        layout
            .primary
            .iter()
            .filter_map(|button| button.custom_id.as_deref())
            .collect()
    }

    fn with_buttons(count: usize) -> Vec<Control> {
        let mut controls = vec![select("goto")];
        controls.extend((0..count).map(|index| button(&format!("b{index}"))));
        controls
    }

    #[test]
    fn buttons_move_ahead_of_select_keeping_their_order() {
        let layout = partition_controls(vec![
            button("a"),
            select("goto"),
            button("b"),
            button("c"),
        ]);
        assert_eq!(primary_ids(&layout), ["a", "b", "c"]);
        assert_eq!(
            layout.secondary.map(|select| select.custom_id),
            Some("goto".to_owned())
        );
    }

    #[test]
    fn five_buttons_and_a_select_fit_exactly() {
        let layout = partition_controls(with_buttons(5));
        assert_eq!(layout.primary.len(), 5);
        assert!(layout.secondary.is_some());
    }

    #[test]
    fn six_buttons_push_the_select_out() {
        let layout = partition_controls(with_buttons(6));
        assert_eq!(primary_ids(&layout), ["b0", "b1", "b2", "b3", "b4"]);
        assert!(layout.secondary.is_none());
    }

    #[test]
    fn fewer_buttons_keep_the_select() {
        for count in 0..=5 {
            let layout = partition_controls(with_buttons(count));
            assert_eq!(layout.primary.len(), count);
            assert!(layout.secondary.is_some(), "{count} buttons");
        }
    }

    #[test]
    fn only_one_select_survives() {
        let layout = partition_controls(vec![select("first"), select("second"), button("a")]);
        assert_eq!(primary_ids(&layout), ["a"]);
        assert_eq!(
            layout.secondary.map(|select| select.custom_id),
            Some("first".to_owned())
        );
    }

    #[test]
    fn rows_skip_empty_tiers() {
        assert!(partition_controls(Vec::new()).into_components().is_empty());

        let rows = partition_controls(vec![select("goto")]).into_components();
        assert_eq!(rows.len(), 1);
        let Component::ActionRow(row) = &rows[0] else {
            panic!("expected an action row");
        };
        assert!(matches!(row.components[0], Component::SelectMenu(_)));
    }

    #[test]
    fn full_layout_renders_two_rows() {
        let rows = partition_controls(with_buttons(5)).into_components();
        assert_eq!(rows.len(), 2);
        let Component::ActionRow(buttons) = &rows[0] else {
            panic!("expected a button row");
        };
        assert_eq!(buttons.components.len(), MAX_PRIMARY_BUTTONS);
    }
}
