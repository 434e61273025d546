//! Replacement chunks built from a tweet's entities.
use chirp_core::models::Entities;
use tracing::trace;

use crate::deferred::DelayedActions;
use crate::extractor::Extractor;
use crate::flags::RenderingFlags;
use crate::transcode::Transcoder;

/// A span of the text and what it is replaced with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chunk {
    /// First character of the span.
    pub left: usize,
    /// One past the last character of the span.
    pub right: usize,
    /// The substring the span is expected to cover.
    pub original: String,
    /// The replacement.
    pub converted: String,
    /// Whether the replacement needs whitespace before it.
    pub requires_padding: bool,
    /// Whether `original` matches the text regardless of ASCII case.
    pub ignore_case: bool,
}

/// Convert every entity into a chunk, ordered by declared position.
///
/// Entities are converted one at a time, extractor by extractor, so side messages are
/// pushed in a fixed order and at most one transcoding request is in flight. Chunks
/// declaring the same position keep that extraction order.
pub async fn build_chunks(
    entities: &Entities,
    flags: &RenderingFlags,
    delayed: &mut DelayedActions,
    transcoder: &dyn Transcoder,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for extractor in Extractor::ORDER {
        for item in extractor.access(entities) {
            let (left, right) = item.indices();
            let converted = item.convert(flags, delayed, transcoder).await;
            trace!(?extractor, left, right, %converted, "Converted entity");
            chunks.push(Chunk {
                left,
                right,
                original: item.original_text(),
                converted,
                requires_padding: item.requires_padding(),
                ignore_case: item.ignores_case(),
            });
        }
    }

    // Stable, so ties stay in extraction order.
    chunks.sort_by_key(|chunk| chunk.left);
    chunks
}

#[cfg(test)]
mod tests {
    use chirp_core::models::{Entities, Hashtag, Media, MediaKind, Mention, Url};

    use crate::chunk::build_chunks;
    use crate::deferred::DelayedActions;
    use crate::flags::RenderingFlags;
    use crate::transcode::PassthroughTranscoder;

    fn photo(left: usize, name: &str) -> Media {
        Media {
            indices: (left, left + 23),
            url: format!("https://t.co/{}", name),
            media_url_https: format!("https://pbs.twimg.com/media/{}.jpg", name),
            display_url: None,
            kind: MediaKind::Photo,
            video_info: None,
        }
    }

    #[tokio::test]
    async fn must_sort_by_position() {
        let entities = Entities {
            hashtags: vec![Hashtag {
                indices: (20, 24),
                text: String::from("tag"),
            }],
            user_mentions: vec![Mention {
                indices: (0, 5),
                screen_name: String::from("rust"),
            }],
            urls: vec![Url {
                indices: (6, 19),
                url: String::from("https://t.co/"),
                expanded_url: None,
                display_url: None,
            }],
            ..Entities::default()
        };
        let mut delayed = DelayedActions::new();

        let chunks = build_chunks(
            &entities,
            &RenderingFlags::default(),
            &mut delayed,
            &PassthroughTranscoder,
        )
        .await;

        let originals: Vec<_> = chunks.iter().map(|c| c.original.as_str()).collect();
        assert_eq!(originals, vec!["@rust", "https://t.co/", "#tag"]);
        assert_eq!((chunks[2].left, chunks[2].right), (20, 24));
        assert!(chunks[2].requires_padding);
        assert!(!chunks[0].requires_padding);
    }

    #[tokio::test]
    async fn must_keep_extraction_order_on_ties() {
        let entities = Entities {
            symbols: vec![Hashtag {
                indices: (3, 8),
                text: String::from("TWTR"),
            }],
            user_mentions: vec![Mention {
                indices: (3, 8),
                screen_name: String::from("TWTR"),
            }],
            media: vec![photo(3, "m")],
            urls: vec![Url {
                indices: (3, 8),
                url: String::from("https://t.co/u"),
                expanded_url: None,
                display_url: None,
            }],
            hashtags: vec![Hashtag {
                indices: (3, 8),
                text: String::from("TWTR"),
            }],
        };
        let mut delayed = DelayedActions::new();

        let chunks = build_chunks(
            &entities,
            &RenderingFlags::default(),
            &mut delayed,
            &PassthroughTranscoder,
        )
        .await;

        let originals: Vec<_> = chunks.iter().map(|c| c.original.as_str()).collect();
        assert_eq!(
            originals,
            vec!["#TWTR", "https://t.co/u", "https://t.co/m", "@TWTR", "$TWTR"]
        );
    }

    #[tokio::test]
    async fn must_push_media_in_item_order() {
        let entities = Entities {
            media: vec![photo(30, "second"), photo(2, "first")],
            ..Entities::default()
        };
        let mut delayed = DelayedActions::new();

        let chunks = build_chunks(
            &entities,
            &RenderingFlags::default(),
            &mut delayed,
            &PassthroughTranscoder,
        )
        .await;

        // Chunks follow positions, side messages follow extraction.
        assert_eq!(chunks[0].original, "https://t.co/first");
        let texts: Vec<_> = delayed.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "<https://pbs.twimg.com/media/second.jpg>",
                "<https://pbs.twimg.com/media/first.jpg>"
            ]
        );
    }
}
