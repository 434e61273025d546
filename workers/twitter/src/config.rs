//! Twitter worker config.

use std::time::Duration;

use eyre::{ensure, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use url::Url;

/// Worker config.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Config {
    /// Twitter API token.
    pub twitter_token: String,
    /// Screen name of the timeline to relay.
    pub screen_name: String,
    /// Interval between twitter polls.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Emoji name decorating mentions.
    pub follow_emoji: String,
    /// Video transcoding service. Videos are posted untouched if unset.
    pub transcoder_url: Option<Url>,
    /// Timeout of a single transcoding request.
    #[serde(with = "humantime_serde")]
    pub transcoder_timeout: Duration,
}

impl Config {
    /// Load config from environment variables.
    ///
    /// # Errors
    /// Returns error if part of the config is invalid or a required field is missing.
    pub fn from_env() -> Result<Self> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("WORKER_"))
            .extract()?;
        ensure!(!config.twitter_token.is_empty(), "Missing twitter token");
        ensure!(!config.screen_name.is_empty(), "Missing screen name");
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            twitter_token: String::new(),
            screen_name: String::new(),
            poll_interval: Duration::from_secs(60),
            follow_emoji: String::from("bird"),
            transcoder_url: None,
            transcoder_timeout: Duration::from_secs(30),
        }
    }
}
