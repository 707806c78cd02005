use std::sync::Arc;

use async_trait::async_trait;
use twilight_model::{
    channel::message::AllowedMentions,
    id::{Id, marker::UserMarker},
};

use crate::reply::respond_notice;
use crate::{COMMANDS, CommandMeta};
use rusty_core::Context;
use rusty_paginator::embed::build_page_embed;
use rusty_paginator::pagination::{
    LabelContext, Navigator, PageLabeler, PageOption, PagePayload, Transition, Trigger,
};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page]",
};

const HELP_TITLE: &str = "Available Commands";

/// Render the command catalog, one page per category.
///
/// Inputs:
/// - optional 1-based page to open first.
///
/// Error behavior:
/// - replies with the valid range when the page does not exist.
pub async fn run(
    ctx: Context,
    trigger: Trigger,
    author_id: Id<UserMarker>,
    page: Option<usize>,
) -> anyhow::Result<()> {
    let mut navigator = help_navigator()?;
    let total = navigator.page_count();

    if let Some(page) = page {
        if page == 0 || page > total {
            let out = format!("Page {page} does not exist. Available pages: 1-{total}.");
            respond_notice(&ctx.http, &trigger, &out).await?;
            return Ok(());
        }
        navigator.apply_transition(Transition::SetIndex(page - 1));
    }

    ctx.sessions
        .start(Arc::clone(&ctx.http), navigator, trigger, author_id)
        .await?;

    Ok(())
}

/// Build the help navigator: one embed per category, labelled by category.
pub fn help_navigator() -> anyhow::Result<Navigator> {
    let categories = categories();
    let total = categories.len();

    let mut navigator = Navigator::new()
        .with_overrides(PagePayload::default().with_allowed_mentions(AllowedMentions::default()))
        .with_labeler(CategoryLabeler {
            categories: categories.clone(),
        });

    for (index, category) in categories.iter().copied().enumerate() {
        let description = category_description(category);
        let embed = build_page_embed(HELP_TITLE, description, index + 1, total, Some(category))?;
        navigator.add_page(embed);
    }

    Ok(navigator)
}

/// Names the page-select options after the category on each page.
struct CategoryLabeler {
    categories: Vec<&'static str>,
}

#[async_trait]
impl PageLabeler for CategoryLabeler {
    async fn label(&self, page_number: usize, _context: &LabelContext) -> anyhow::Result<PageOption> {
        let category = self
            .categories
            .get(page_number.saturating_sub(1))
            .copied()
            .unwrap_or("other");
        let count = COMMANDS
            .iter()
            .filter(|command| command.category == category)
            .count();

        Ok(PageOption {
            label: capitalize(category),
            description: Some(format!("{count} command(s)")),
            emoji: None,
        })
    }
}

fn categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = COMMANDS.iter().map(|cmd| cmd.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

fn category_description(category: &str) -> String {
    let mut commands: Vec<&CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| cmd.category == category)
        .collect();
    commands.sort_unstable_by(|left, right| left.name.cmp(right.name));

    commands
        .iter()
        .map(|cmd| format!("- `{}`: {}", cmd.usage, cmd.desc))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_page_per_category() {
        let navigator = help_navigator().expect("help pages build");
        assert_eq!(navigator.page_count(), categories().len());
        assert!(navigator.page_count() > 1);
    }

    #[test]
    fn category_pages_list_their_commands() {
        let description = category_description("utility");
        assert!(description.contains("`!help [page]`"));
        assert!(!description.contains("`!pages"));
    }

    #[tokio::test]
    async fn options_are_named_after_categories() {
        let labeler = CategoryLabeler {
            categories: vec!["pagination", "utility"],
        };
        let context = LabelContext {
            viewer: Id::new(1),
            channel_id: Id::new(2),
            guild_id: None,
        };

        let option = labeler.label(2, &context).await.expect("label");
        assert_eq!(option.label, "Utility");
        assert_eq!(option.description.as_deref(), Some("1 command(s)"));
    }

    #[test]
    fn capitalize_handles_empty_input() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("pagination"), "Pagination");
    }
}
