//! Renders tweets into chat messages.
//!
//! A tweet's entities are converted into replacement chunks, the chunks are aligned with
//! the actual text, and the text is rebuilt around them. Side content such as videos and
//! photos is posted as separate messages after the main one.
#![allow(clippy::module_name_repetitions)]

pub mod chunk;
pub mod compose;
pub mod deferred;
pub mod extractor;
pub mod flags;
pub mod media;
pub mod mrkdwn;
pub mod offset;
pub mod reconstruct;
pub mod text;
pub mod transcode;

pub use compose::{messages_from_tweet, Renderer};
pub use flags::RenderingFlags;
pub use transcode::{HttpTranscoder, PassthroughTranscoder, TranscodeError, Transcoder};
