//! Page entries and the message payload they resolve to.

use std::{fmt, sync::Arc};

use futures::future::BoxFuture;
use twilight_model::channel::message::{AllowedMentions, component::Component, embed::Embed};

use super::navigator::Navigator;

/// Message body for one rendered page.
///
/// Every field is optional so that a navigator-wide override can replace
/// individual fields of a page while leaving the rest alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePayload {
    pub content: Option<String>,
    pub embeds: Option<Vec<Embed>>,
    pub allowed_mentions: Option<AllowedMentions>,
    pub components: Option<Vec<Component>>,
}

impl PagePayload {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: Some(vec![embed]),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_embeds(mut self, embeds: Vec<Embed>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    #[must_use]
    pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Whether the payload has nothing a viewer could see.
    pub fn is_empty(&self) -> bool {
        let no_content = self.content.as_deref().is_none_or(str::is_empty);
        let no_embeds = self.embeds.as_ref().is_none_or(Vec::is_empty);
        no_content && no_embeds
    }

    /// Overlay `overrides` onto this payload, field by field.
    #[must_use]
    pub fn merged_with(self, overrides: &PagePayload) -> Self {
        Self {
            content: overrides.content.clone().or(self.content),
            embeds: overrides.embeds.clone().or(self.embeds),
            allowed_mentions: overrides.allowed_mentions.clone().or(self.allowed_mentions),
            components: overrides.components.clone().or(self.components),
        }
    }
}

/// Arguments handed to a page-producing function.
pub struct PageContext<'a> {
    pub index: usize,
    pub pages: &'a [Page],
    pub navigator: &'a Navigator,
}

pub type PageFuture<'a> = BoxFuture<'a, anyhow::Result<PagePayload>>;

type PageFn = Arc<dyn for<'a> Fn(PageContext<'a>) -> PageFuture<'a> + Send + Sync>;

/// One unit of navigable content.
#[derive(Clone)]
pub enum Page {
    Static(PagePayload),
    /// Produced on demand when the page becomes current.
    Dynamic(PageFn),
}

impl Page {
    pub fn dynamic<F>(producer: F) -> Self
    where
        F: for<'a> Fn(PageContext<'a>) -> PageFuture<'a> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(producer))
    }

    pub(crate) async fn resolve(
        &self,
        index: usize,
        navigator: &Navigator,
    ) -> anyhow::Result<PagePayload> {
        match self {
            Self::Static(payload) => Ok(payload.clone()),
            Self::Dynamic(producer) => {
                producer(PageContext {
                    index,
                    pages: navigator.pages(),
                    navigator,
                })
                .await
            }
        }
    }
}

impl From<PagePayload> for Page {
    fn from(payload: PagePayload) -> Self {
        Self::Static(payload)
    }
}

impl From<Embed> for Page {
    fn from(embed: Embed) -> Self {
        Self::Static(PagePayload::embed(embed))
    }
}

impl From<&str> for Page {
    fn from(content: &str) -> Self {
        Self::Static(PagePayload::content(content))
    }
}

impl From<String> for Page {
    fn from(content: String) -> Self {
        Self::Static(PagePayload::content(content))
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(payload) => f.debug_tuple("Static").field(payload).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use twilight_model::channel::message::AllowedMentions;

    use super::*;

    #[test]
    fn overrides_win_field_by_field() {
        let page = PagePayload::content("page text").with_embeds(Vec::new());
        let overrides = PagePayload {
            allowed_mentions: Some(AllowedMentions::default()),
            content: Some("shared header".to_owned()),
            ..PagePayload::default()
        };

        let merged = page.merged_with(&overrides);
        assert_eq!(merged.content.as_deref(), Some("shared header"));
        assert_eq!(merged.embeds, Some(Vec::new()));
        assert_eq!(merged.allowed_mentions, Some(AllowedMentions::default()));
        assert!(merged.components.is_none());
    }

    #[test]
    fn empty_override_keeps_the_page() {
        let page = PagePayload::content("kept");
        let merged = page.clone().merged_with(&PagePayload::default());
        assert_eq!(merged, page);
    }

    #[test]
    fn blank_payloads_are_empty() {
        assert!(PagePayload::default().is_empty());
        assert!(PagePayload::content("").is_empty());
        assert!(PagePayload::default().with_embeds(Vec::new()).is_empty());
        assert!(!PagePayload::content("A").is_empty());
    }
}
