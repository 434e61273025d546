//! Entity extractors.
//!
//! Each kind of entity knows where it sits in the text, which substring it replaces,
//! and how to render its replacement.
use chirp_core::models::{profile_link, Entities, Hashtag, Indices, Media, Mention, Url};

use crate::deferred::DelayedActions;
use crate::flags::RenderingFlags;
use crate::media;
use crate::mrkdwn::{escape, italic, link};
use crate::transcode::Transcoder;

/// Kinds of entity, in processing order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Extractor {
    Hashtag,
    Url,
    Media,
    Mention,
    Symbol,
}

impl Extractor {
    /// All extractors, in the order they run.
    pub const ORDER: [Self; 5] = [
        Self::Hashtag,
        Self::Url,
        Self::Media,
        Self::Mention,
        Self::Symbol,
    ];

    /// Items of this kind in `entities`.
    #[must_use]
    pub fn access(self, entities: &Entities) -> Vec<Item<'_>> {
        match self {
            Self::Hashtag => entities.hashtags.iter().map(Item::Hashtag).collect(),
            Self::Url => entities.urls.iter().map(Item::Url).collect(),
            Self::Media => entities.media.iter().map(Item::Media).collect(),
            Self::Mention => entities.user_mentions.iter().map(Item::Mention).collect(),
            Self::Symbol => entities.symbols.iter().map(Item::Symbol).collect(),
        }
    }

    /// Whether the replacement must be separated from preceding text by whitespace.
    #[must_use]
    pub const fn requires_padding(self) -> bool {
        matches!(self, Self::Hashtag | Self::Symbol)
    }
}

/// A single entity borrowed from an entity set.
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    Hashtag(&'a Hashtag),
    Url(&'a Url),
    Media(&'a Media),
    Mention(&'a Mention),
    Symbol(&'a Hashtag),
}

impl Item<'_> {
    #[must_use]
    pub const fn kind(&self) -> Extractor {
        match self {
            Self::Hashtag(_) => Extractor::Hashtag,
            Self::Url(_) => Extractor::Url,
            Self::Media(_) => Extractor::Media,
            Self::Mention(_) => Extractor::Mention,
            Self::Symbol(_) => Extractor::Symbol,
        }
    }

    /// Declared span of the item.
    #[must_use]
    pub fn indices(&self) -> Indices {
        match self {
            Self::Hashtag(tag) | Self::Symbol(tag) => tag.indices,
            Self::Url(url) => url.indices,
            Self::Media(media) => media.indices,
            Self::Mention(mention) => mention.indices,
        }
    }

    /// The substring of the text the item's span denotes.
    #[must_use]
    pub fn original_text(&self) -> String {
        match self {
            Self::Hashtag(tag) => format!("#{}", tag.text),
            Self::Symbol(tag) => format!("${}", tag.text),
            Self::Url(url) => url.url.clone(),
            Self::Media(media) => media.url.clone(),
            Self::Mention(mention) => format!("@{}", mention.screen_name),
        }
    }

    #[must_use]
    pub const fn requires_padding(&self) -> bool {
        self.kind().requires_padding()
    }

    /// Mentions carry the canonical screen name while the text keeps the case the
    /// author typed.
    #[must_use]
    pub const fn ignores_case(&self) -> bool {
        matches!(self, Self::Mention(_))
    }

    /// Render the replacement of the item.
    ///
    /// Media may push side messages to `delayed` and call `transcoder`. This never fails:
    /// on error a best-effort replacement is returned.
    pub async fn convert(
        &self,
        flags: &RenderingFlags,
        delayed: &mut DelayedActions,
        transcoder: &dyn Transcoder,
    ) -> String {
        match self {
            Self::Hashtag(tag) => italic(&escape(&format!("#{}", tag.text))),
            Self::Symbol(tag) => italic(&escape(&format!("${}", tag.text))),
            Self::Url(url) => link(
                url.expanded_url.as_deref().unwrap_or(&url.url),
                url.display_url.as_deref(),
            ),
            Self::Media(medium) => media::convert(medium, delayed, transcoder).await,
            Self::Mention(mention) => format!(
                ":{}:{}",
                flags.follow_emoji(),
                link(
                    &profile_link(&mention.screen_name),
                    Some(&format!("@{}", mention.screen_name))
                )
            ),
        }
    }
}
