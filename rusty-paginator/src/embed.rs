use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Footer text for page `page` (1-based) of `total_pages`.
///
/// Single-page collections only show the note, if any.
pub fn page_footer_text(page: usize, total_pages: usize, footer_note: Option<&str>) -> String {
    let page = page.max(1);
    let total_pages = total_pages.max(1);
    let note = footer_note.filter(|note| !note.is_empty());

    match (total_pages > 1, note) {
        (true, Some(note)) => format!("Page {page}/{total_pages} • {note}"),
        (true, None) => format!("Page {page}/{total_pages}"),
        (false, Some(note)) => note.to_owned(),
        (false, None) => String::new(),
    }
}

/// Build one page embed with consistent styling.
pub fn build_page_embed(
    title: &str,
    description: impl Into<String>,
    page: usize,
    total_pages: usize,
    footer_note: Option<&str>,
) -> anyhow::Result<Embed> {
    let footer_text = page_footer_text(page, total_pages, footer_note);

    let builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    let embed = if footer_text.is_empty() {
        builder.validate()?.build()
    } else {
        let footer = EmbedFooterBuilder::new(footer_text).build();
        builder.footer(footer).validate()?.build()
    };

    Ok(embed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_counts_pages_and_appends_note() {
        assert_eq!(page_footer_text(2, 5, None), "Page 2/5");
        assert_eq!(page_footer_text(2, 5, Some("utility")), "Page 2/5 • utility");
        assert_eq!(page_footer_text(1, 1, Some("")), "");
        assert_eq!(page_footer_text(1, 1, Some("only")), "only");
    }

    #[test]
    fn embed_carries_title_and_footer() {
        let embed = build_page_embed("Help", "body", 1, 3, None).expect("valid embed");
        assert_eq!(embed.title.as_deref(), Some("Help"));
        assert_eq!(embed.color, Some(DEFAULT_EMBED_COLOR));
        assert_eq!(
            embed.footer.map(|footer| footer.text),
            Some("Page 1/3".to_owned())
        );
    }
}
