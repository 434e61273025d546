//! Worker implementation.

use std::io::Write;
use std::time::Duration;

use chirp_core::message::PostableMessage;
use chirp_core::models::Tweet;
use egg_mode::tweet::user_timeline;
use egg_mode::user::UserID;
use egg_mode::Token;
use eyre::Result;
use futures_util::StreamExt;
use render::{Renderer, RenderingFlags, Transcoder};
use tap::TapFallible;
use tokio::time::{interval, sleep};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::twitter::newer_tweets;

/// Relays a user's timeline as rendered messages, one JSON document per line.
pub struct Relay<W> {
    token: Token,
    user: UserID,
    interval: Duration,
    renderer: Renderer,
    flags: RenderingFlags,
    sink: W,
}

impl<W: Write> Relay<W> {
    /// Creates a new relay writing to `sink`.
    pub fn new(config: Config, transcoder: impl Transcoder + 'static, sink: W) -> Self {
        Self {
            token: Token::Bearer(config.twitter_token),
            user: UserID::from(config.screen_name),
            interval: config.poll_interval,
            renderer: Renderer::new(transcoder),
            flags: RenderingFlags::with_follow_emoji(config.follow_emoji),
            sink,
        }
    }

    /// Relay tweets forever, restarting the timeline whenever it fails.
    pub async fn run(mut self) {
        loop {
            info!(user_id = ?self.user, "Spawning twitter task");
            if let Err(error) = self.relay_timeline().await {
                error!(?error, "Failed to fetch timeline");

                // Sleep to avoid looping if the task always fails.
                sleep(self.interval).await;
            }
        }
    }

    async fn relay_timeline(&mut self) -> Result<()> {
        let mut ticker = interval(self.interval);

        let timeline = user_timeline(self.user.clone(), true, true, &self.token);
        let stream = newer_tweets(timeline).await?;
        tokio::pin!(stream);
        while let Some(batch) = stream.next().await {
            let batch = batch?;
            debug!(count = batch.len(), "Fetched tweets");

            // Batches come newest first.
            for raw_tweet in batch.into_iter().rev() {
                let tweet_id = raw_tweet.id;
                let Ok(tweet) = Tweet::try_from(raw_tweet)
                    .tap_err(|error| warn!(?error, %tweet_id, "Skipping tweet"))
                else {
                    continue;
                };
                self.forward(&tweet).await?;
            }

            ticker.tick().await;
        }

        Ok(())
    }

    async fn forward(&mut self, tweet: &Tweet) -> Result<()> {
        let messages = self.renderer.render(tweet, &self.flags).await;
        info!(tweet_id = %tweet.id, count = messages.len(), "Relaying tweet");
        write_messages(&mut self.sink, &messages)
    }
}

/// Write every message as a single JSON line.
///
/// # Errors
/// Returns error if the sink can't be written to.
pub fn write_messages(mut sink: impl Write, messages: &[PostableMessage]) -> Result<()> {
    for message in messages {
        serde_json::to_writer(&mut sink, message)?;
        sink.write_all(b"\n")?;
    }
    sink.flush()?;
    Ok(())
}
