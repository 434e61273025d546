//! Compose chat messages from a tweet.
use std::fmt::Write;
use std::iter;

use chirp_core::message::{Accessory, Block, PostableMessage, Text};
use chirp_core::models::{profile_link, status_link, Tweet, User};
use tracing::debug;

use crate::chunk::build_chunks;
use crate::deferred::DelayedActions;
use crate::flags::RenderingFlags;
use crate::mrkdwn::{bold, escape, link};
use crate::offset::correct_offsets;
use crate::reconstruct::reconstruct;
use crate::transcode::Transcoder;

/// Renders tweets with a fixed transcoder.
pub struct Renderer {
    transcoder: Box<dyn Transcoder>,
}

impl Renderer {
    pub fn new(transcoder: impl Transcoder + 'static) -> Self {
        Self {
            transcoder: Box::new(transcoder),
        }
    }

    /// Render `tweet` into the messages to post, main message first.
    pub async fn render(&self, tweet: &Tweet, flags: &RenderingFlags) -> Vec<PostableMessage> {
        messages_from_tweet(tweet, flags, &*self.transcoder).await
    }
}

/// Render `tweet` into an ordered list of messages.
///
/// The first message holds the tweet (and the tweet it quotes) as blocks, with
/// `@author: text` as its fallback text. Side messages produced by the entities follow
/// in the order they were produced.
pub async fn messages_from_tweet(
    tweet: &Tweet,
    flags: &RenderingFlags,
    transcoder: &dyn Transcoder,
) -> Vec<PostableMessage> {
    let mut delayed = DelayedActions::new();

    let mut blocks = vec![render_block(tweet, flags, &mut delayed, transcoder).await];
    if let Some(quoted) = &tweet.quoted {
        blocks.push(render_block(quoted, &flags.as_quoted(), &mut delayed, transcoder).await);
    }

    let composite = PostableMessage::text(format!(
        "@{}: {}",
        tweet.user.screen_name,
        tweet.long_text()
    ))
    .with_blocks(blocks);

    iter::once(composite)
        .chain(delayed.into_messages())
        .collect()
}

async fn render_block(
    tweet: &Tweet,
    flags: &RenderingFlags,
    delayed: &mut DelayedActions,
    transcoder: &dyn Transcoder,
) -> Block {
    let text = tweet.long_text();
    let chunks = build_chunks(&tweet.long_entities(), flags, delayed, transcoder).await;
    debug!(tweet_id = %tweet.id, chunks = chunks.len(), "Rendering tweet");
    let chunks = correct_offsets(text, chunks);
    let body = reconstruct(text, &chunks, flags);

    Block::Section {
        text: Text::Mrkdwn(format!("{}\n{}", header(tweet, flags), body)),
        fields: fields(tweet),
        accessory: tweet
            .user
            .profile_image
            .as_ref()
            .map(|image_url| Accessory::Image {
                image_url: image_url.clone(),
                alt_text: tweet.user.screen_name.clone(),
            }),
    }
}

fn user_link(user: &User) -> String {
    link(
        &user.profile_link(),
        Some(&format!("@{}", user.screen_name)),
    )
}

/// `[lead-in] *@author* (Name)[ retweeted @original (Name)]:`
#[must_use]
pub fn header(tweet: &Tweet, flags: &RenderingFlags) -> String {
    let mut header = format!(
        "{}{} ({})",
        flags.lead_in(),
        bold(&user_link(&tweet.user)),
        escape(&tweet.user.name)
    );
    if let Some(retweeted) = &tweet.retweeted {
        // Writing into a `String` never fails.
        let _ = write!(
            header,
            " retweeted {} ({})",
            user_link(&retweeted.user),
            escape(&retweeted.user.name)
        );
    }
    header.push(':');
    header
}

/// Side fields of a tweet: send time, id, and the replied user.
#[must_use]
pub fn fields(tweet: &Tweet) -> Vec<Text> {
    let sent = tweet.created.map(|created| {
        format!(
            "*Sent:* <!date^{}^{{date_short_pretty}} at {{time}}|{}>",
            created.timestamp(),
            created.format("%Y-%m-%d %H:%M:%S UTC")
        )
    });
    let id = Some(format!("*Tweet:* {}", link(&tweet.link(), Some(&tweet.id))));
    let reply = tweet.reply_to_user.as_ref().map(|user| {
        let target = tweet
            .reply_to_tweet_id
            .as_ref()
            .map_or_else(|| profile_link(user), |id| status_link(user, id));
        format!(
            "*In reply to:* {}",
            link(&target, Some(&format!("@{}", user)))
        )
    });

    [sent, id, reply]
        .into_iter()
        .flatten()
        .map(Text::Mrkdwn)
        .collect()
}
