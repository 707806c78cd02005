//! Navigation actions: trigger kinds, handlers and the default action set.

use std::{fmt, sync::Arc};

use twilight_model::channel::message::{EmojiReactionType, component::ButtonStyle};

/// Prefix shared by every default action identifier.
///
/// Hosts route component interactions whose custom ID starts with this
/// prefix to the pagination collector.
pub const ACTION_ID_PREFIX: &str = "pg.";

pub const GO_TO_PAGE: &str = "pg.goToPage";
pub const FIRST_PAGE: &str = "pg.firstPage";
pub const PREVIOUS_PAGE: &str = "pg.previousPage";
pub const NEXT_PAGE: &str = "pg.nextPage";
pub const GO_TO_LAST_PAGE: &str = "pg.goToLastPage";
pub const STOP: &str = "pg.stop";

/// State change requested by an action handler.
///
/// Handlers never touch navigator state directly; the navigator applies the
/// returned transition centrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to the given zero-based page index.
    SetIndex(usize),
    /// Ask the input collector to stop accepting activations.
    Stop,
    /// Leave everything as is.
    Stay,
}

/// Read-only view of navigation state handed to an action handler.
#[derive(Debug, Clone, Copy)]
pub struct ActionInput<'a> {
    pub index: usize,
    pub page_count: usize,
    /// Values picked in a select control. Empty for buttons.
    pub values: &'a [String],
}

pub type ActionHandler = Arc<dyn Fn(&ActionInput<'_>) -> Transition + Send + Sync>;

/// Which kind of control an action is bound to, with kind-specific hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTrigger {
    Button {
        style: ButtonStyle,
        label: Option<String>,
        emoji: Option<EmojiReactionType>,
    },
    /// The page-select control. Its options are generated from the pages.
    Select { placeholder: Option<String> },
}

impl ActionTrigger {
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Button { .. })
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select { .. })
    }
}

/// A named navigation command bound to one interactive control.
#[derive(Clone)]
pub struct PaginationAction {
    pub id: String,
    pub trigger: ActionTrigger,
    pub handler: ActionHandler,
}

impl PaginationAction {
    pub fn new(
        id: impl Into<String>,
        trigger: ActionTrigger,
        handler: impl Fn(&ActionInput<'_>) -> Transition + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            trigger,
            handler: Arc::new(handler),
        }
    }

    /// Button action with an emoji and no text label.
    pub fn emoji_button(
        id: impl Into<String>,
        style: ButtonStyle,
        emoji: &str,
        handler: impl Fn(&ActionInput<'_>) -> Transition + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            id,
            ActionTrigger::Button {
                style,
                label: None,
                emoji: Some(EmojiReactionType::Unicode {
                    name: emoji.to_owned(),
                }),
            },
            handler,
        )
    }

    /// Run the handler against the given state.
    pub fn transition(&self, input: &ActionInput<'_>) -> Transition {
        (self.handler)(input)
    }
}

impl fmt::Debug for PaginationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationAction")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

/// Transition for the page-select control: jump straight to the picked index.
pub fn go_to_page(input: &ActionInput<'_>) -> Transition {
    input
        .values
        .first()
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|index| *index < input.page_count)
        .map_or(Transition::Stay, Transition::SetIndex)
}

pub fn first_page(input: &ActionInput<'_>) -> Transition {
    if input.page_count == 0 {
        return Transition::Stay;
    }
    Transition::SetIndex(0)
}

/// Step back one page, wrapping from the first page to the last.
pub fn previous_page(input: &ActionInput<'_>) -> Transition {
    match input.page_count {
        0 => Transition::Stay,
        count if input.index == 0 || input.index >= count => Transition::SetIndex(count - 1),
        _ => Transition::SetIndex(input.index - 1),
    }
}

/// Step forward one page, wrapping from the last page to the first.
pub fn next_page(input: &ActionInput<'_>) -> Transition {
    match input.page_count {
        0 => Transition::Stay,
        count => Transition::SetIndex(input.index.saturating_add(1) % count),
    }
}

pub fn go_to_last_page(input: &ActionInput<'_>) -> Transition {
    match input.page_count {
        0 => Transition::Stay,
        count => Transition::SetIndex(count - 1),
    }
}

pub fn stop(_input: &ActionInput<'_>) -> Transition {
    Transition::Stop
}

/// The default six-action set, in render order.
pub fn default_actions() -> Vec<PaginationAction> {
    vec![
        PaginationAction::new(
            GO_TO_PAGE,
            ActionTrigger::Select {
                placeholder: Some("Jump to page".to_owned()),
            },
            go_to_page,
        ),
        PaginationAction::emoji_button(FIRST_PAGE, ButtonStyle::Primary, "⏪", first_page),
        PaginationAction::emoji_button(PREVIOUS_PAGE, ButtonStyle::Primary, "◀️", previous_page),
        PaginationAction::emoji_button(NEXT_PAGE, ButtonStyle::Primary, "▶️", next_page),
        PaginationAction::emoji_button(GO_TO_LAST_PAGE, ButtonStyle::Primary, "⏩", go_to_last_page),
        PaginationAction::emoji_button(STOP, ButtonStyle::Danger, "⏹️", stop),
    ]
}
