//! Side messages collected while rendering a tweet.
use chirp_core::message::PostableMessage;

/// Accumulates messages to be posted after the main one.
///
/// Lives for a single render call; messages keep the order they were pushed in.
#[derive(Debug, Default)]
pub struct DelayedActions {
    messages: Vec<PostableMessage>,
}

impl DelayedActions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: PostableMessage) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn messages(&self) -> &[PostableMessage] {
        &self.messages
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<PostableMessage> {
        self.messages
    }
}
