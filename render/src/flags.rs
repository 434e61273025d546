//! Per-invocation rendering options.
use crate::mrkdwn::QUOTE_MARKER;

/// Emoji used to decorate mentions when none is configured.
pub const DEFAULT_FOLLOW_EMOJI: &str = "bird";

/// Options of a single render call.
///
/// `quoted`, `retweeted` and `in_reply_to` describe how the tweet relates to the
/// context it is shown in. Any of them turns the body into a quote.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RenderingFlags {
    /// Emoji name decorating mentions.
    pub follow_emoji: Option<String>,
    /// The tweet is shown as quoted by another one.
    pub quoted: bool,
    /// The tweet is shown as retweeted by another one.
    pub retweeted: bool,
    /// The tweet is shown as the target of a reply.
    pub in_reply_to: bool,
}

impl RenderingFlags {
    /// Flags decorating mentions with `emoji`.
    #[must_use]
    pub fn with_follow_emoji(emoji: impl Into<String>) -> Self {
        Self {
            follow_emoji: Some(emoji.into()),
            ..Self::default()
        }
    }

    /// A copy of these flags with `quoted` forced on.
    #[must_use]
    pub fn as_quoted(&self) -> Self {
        Self {
            quoted: true,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn follow_emoji(&self) -> &str {
        self.follow_emoji.as_deref().unwrap_or(DEFAULT_FOLLOW_EMOJI)
    }

    /// Whether the body is rendered as a quote.
    #[must_use]
    pub const fn is_quoting(&self) -> bool {
        self.quoted || self.retweeted || self.in_reply_to
    }

    /// Prefix of the rendered body.
    #[must_use]
    pub const fn quote_prefix(&self) -> &'static str {
        if self.is_quoting() {
            QUOTE_MARKER
        } else {
            ""
        }
    }

    /// Phrase put in front of the header.
    #[must_use]
    pub const fn lead_in(&self) -> &'static str {
        if self.quoted {
            "Quoted "
        } else if self.retweeted {
            "Retweeted "
        } else if self.in_reply_to {
            "Replied to "
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::flags::RenderingFlags;

    #[test]
    fn must_default_to_bird() {
        assert_eq!(RenderingFlags::default().follow_emoji(), "bird");
        assert_eq!(RenderingFlags::with_follow_emoji("eyes").follow_emoji(), "eyes");
    }

    #[test]
    fn must_pick_lead_in() {
        let flags = RenderingFlags::default();
        assert_eq!(flags.lead_in(), "");
        assert_eq!(flags.quote_prefix(), "");

        let flags = RenderingFlags {
            in_reply_to: true,
            ..RenderingFlags::default()
        };
        assert_eq!(flags.lead_in(), "Replied to ");
        assert_eq!(flags.quote_prefix(), ">");

        let flags = RenderingFlags {
            retweeted: true,
            in_reply_to: true,
            ..RenderingFlags::default()
        };
        assert_eq!(flags.lead_in(), "Retweeted ");
        assert_eq!(flags.as_quoted().lead_in(), "Quoted ");
        assert_eq!(flags.as_quoted().follow_emoji, flags.follow_emoji);
    }
}
