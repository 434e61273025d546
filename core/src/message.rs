//! Chat messages produced from tweets.
use serde::{Deserialize, Serialize};

/// A destination-agnostic chat message.
///
/// `channel` and `thread` are left unset by the renderer and filled in by whoever
/// delivers the message.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PostableMessage {
    /// Plain text body, or the fallback text when `blocks` are present.
    pub text: String,
    /// Structured layout of the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
    /// Destination channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Thread to reply in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<String>,
}

impl PostableMessage {
    /// A plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blocks: None,
            channel: None,
            thread: None,
        }
    }

    /// Attach structured blocks, keeping `text` as the fallback.
    #[must_use]
    pub fn with_blocks(self, blocks: Vec<Block>) -> Self {
        Self {
            blocks: Some(blocks),
            ..self
        }
    }

    /// A copy of this message addressed to `channel`, optionally inside `thread`.
    #[must_use]
    pub fn with_destination(&self, channel: impl Into<String>, thread: Option<String>) -> Self {
        Self {
            channel: Some(channel.into()),
            thread,
            ..self.clone()
        }
    }
}

/// A layout block of a message.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A section of formatted text with optional side fields and an accessory.
    Section {
        /// Primary text.
        text: Text,
        /// Secondary fields shown next to the primary text.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fields: Vec<Text>,
        /// Element displayed beside the section.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accessory: Option<Accessory>,
    },
}

/// A text object.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Text {
    /// Text interpreted as markup.
    Mrkdwn(String),
}

impl Text {
    /// The raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mrkdwn(text) => text,
        }
    }
}

/// An element displayed beside a section.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Accessory {
    /// A thumbnail image.
    Image {
        /// Link to the image.
        image_url: String,
        /// Alternative text.
        alt_text: String,
    },
}
