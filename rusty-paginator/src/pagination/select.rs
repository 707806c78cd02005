//! Page-select control: option windowing and the per-page label hook.

use async_trait::async_trait;
use futures::future::try_join_all;
use twilight_model::{
    channel::message::{
        EmojiReactionType,
        component::{SelectMenu, SelectMenuOption, SelectMenuType},
    },
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
};

use super::error::PageResolutionError;

/// Options a Discord select menu can hold.
pub const SELECT_OPTION_CAPACITY: usize = 25;

/// Who is looking at the paginated message, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelContext {
    pub viewer: Id<UserMarker>,
    pub channel_id: Id<ChannelMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
}

/// Display data for one page option. The option value is always the page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOption {
    pub label: String,
    pub description: Option<String>,
    pub emoji: Option<EmojiReactionType>,
}

impl PageOption {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            emoji: None,
        }
    }
}

/// Produces the select option shown for a 1-based page number.
#[async_trait]
pub trait PageLabeler: Send + Sync {
    async fn label(&self, page_number: usize, context: &LabelContext)
    -> anyhow::Result<PageOption>;
}

/// Labels every option `Page N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPageLabeler;

#[async_trait]
impl PageLabeler for DefaultPageLabeler {
    async fn label(
        &self,
        page_number: usize,
        _context: &LabelContext,
    ) -> anyhow::Result<PageOption> {
        Ok(PageOption::labelled(page_label(page_number)))
    }
}

pub fn page_label(page_number: usize) -> String {
    format!("Page {page_number}")
}

/// Distance between sampled page indices when pages outnumber select options.
///
/// `round(page_count / capacity)` with halves rounded up, never below one.
pub fn sample_stride(page_count: usize) -> usize {
    ((page_count * 2 + SELECT_OPTION_CAPACITY) / (SELECT_OPTION_CAPACITY * 2)).max(1)
}

/// Evenly spaced page indices covering the page range, at most
/// [`SELECT_OPTION_CAPACITY`] of them, always starting at 0.
pub fn sampled_page_indices(page_count: usize) -> Vec<usize> {
    (0..page_count)
        .step_by(sample_stride(page_count))
        .take(SELECT_OPTION_CAPACITY)
        .collect()
}

/// Build the options for the page-select control.
///
/// Up to the capacity every page gets its own option labelled through
/// `labeler`; the label futures run concurrently. Past the capacity the
/// options are a sampled window labelled `Page N`.
pub async fn build_page_options(
    page_count: usize,
    current_index: usize,
    labeler: &dyn PageLabeler,
    context: &LabelContext,
) -> Result<Vec<SelectMenuOption>, PageResolutionError> {
    if page_count > SELECT_OPTION_CAPACITY {
        let options = sampled_page_indices(page_count)
            .into_iter()
            .map(|index| {
                page_option(
                    index,
                    current_index,
                    PageOption::labelled(page_label(index + 1)),
                )
            })
            .collect();
        return Ok(options);
    }

    let labels = try_join_all((0..page_count).map(|index| async move {
        labeler
            .label(index + 1, context)
            .await
            .map_err(|source| PageResolutionError::Label {
                page_number: index + 1,
                source,
            })
    }))
    .await?;

    Ok(labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| page_option(index, current_index, label))
        .collect())
}

fn page_option(index: usize, current_index: usize, option: PageOption) -> SelectMenuOption {
    SelectMenuOption {
        default: index == current_index,
        description: option.description,
        emoji: option.emoji,
        label: option.label,
        value: index.to_string(),
    }
}

/// Wrap page options in a single-choice text select menu.
pub fn page_select_menu(
    custom_id: &str,
    placeholder: Option<String>,
    options: Vec<SelectMenuOption>,
) -> SelectMenu {
    SelectMenu {
        id: None,
        channel_types: None,
        custom_id: custom_id.to_owned(),
        default_values: None,
        disabled: false,
        kind: SelectMenuType::Text,
        max_values: Some(1),
        min_values: Some(1),
        options: Some(options),
        placeholder,
        required: None,
    }
}
