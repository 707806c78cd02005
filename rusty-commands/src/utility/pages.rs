use std::sync::Arc;

use twilight_model::id::{Id, marker::UserMarker};

use crate::CommandMeta;
use crate::reply::respond_notice;
use rusty_core::Context;
use rusty_paginator::embed::build_page_embed;
use rusty_paginator::pagination::{Navigator, Page, PageContext, PageFuture, PagePayload, Trigger};

pub const META: CommandMeta = CommandMeta {
    name: "pages",
    desc: "Open a demo pagination with generated pages.",
    category: "pagination",
    usage: "!pages [count]",
};

pub const DEFAULT_DEMO_PAGES: usize = 3;
pub const MAX_DEMO_PAGES: usize = 500;

/// Open `count` generated pages, each produced when it is shown.
pub async fn run(
    ctx: Context,
    trigger: Trigger,
    author_id: Id<UserMarker>,
    count: Option<usize>,
) -> anyhow::Result<()> {
    let count = count.unwrap_or(DEFAULT_DEMO_PAGES);
    if !(1..=MAX_DEMO_PAGES).contains(&count) {
        let out = format!("Page count must be between 1 and {MAX_DEMO_PAGES}.");
        respond_notice(&ctx.http, &trigger, &out).await?;
        return Ok(());
    }

    ctx.sessions
        .start(Arc::clone(&ctx.http), demo_navigator(count), trigger, author_id)
        .await?;

    Ok(())
}

pub fn demo_navigator(count: usize) -> Navigator {
    Navigator::with_pages((0..count).map(|_| Page::dynamic(demo_producer)))
}

fn demo_producer(context: PageContext<'_>) -> PageFuture<'_> {
    Box::pin(demo_page(context.index, context.pages.len()))
}

async fn demo_page(index: usize, total: usize) -> anyhow::Result<PagePayload> {
    let description = format!("This page was generated on demand.\nIndex `{index}` of `{total}`.");
    let embed = build_page_embed("Pagination Demo", description, index + 1, total, None)?;

    Ok(PagePayload::embed(embed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigator_holds_requested_page_count() {
        let navigator = demo_navigator(42);
        assert_eq!(navigator.page_count(), 42);
        assert_eq!(navigator.index(), 0);
    }

    #[tokio::test]
    async fn generated_page_reports_its_position() {
        let payload = demo_page(4, 10).await.expect("page builds");
        let embed = payload
            .embeds
            .and_then(|embeds| embeds.into_iter().next())
            .expect("one embed");

        assert_eq!(embed.footer.map(|footer| footer.text).as_deref(), Some("Page 5/10"));
        assert!(embed.description.unwrap_or_default().contains("Index `4` of `10`"));
    }
}
