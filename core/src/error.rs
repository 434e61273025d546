//! Errors for the core library.
use thiserror::Error;

/// Errors that may occur while constructing a [`Tweet`](crate::models::Tweet) from a source.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum TweetError {
    /// The source tweet carries no author.
    #[error("Tweet {0} has no user")]
    MissingUser(String),
}
