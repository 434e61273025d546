//! Models for tweets and the entities annotated on their text.
//!
//! The serde layout follows the Twitter v1.1 JSON payload, so raw API responses can be
//! deserialized directly into a [`Tweet`].
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open `[left, right)` span into the declared text of a tweet.
pub type Indices = (usize, usize);

/// A tweet, possibly wrapping another one as a quote or a retweet.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    /// Opaque identifier of the tweet.
    #[serde(rename = "id_str")]
    pub id: String,
    /// Raw text, possibly truncated.
    #[serde(alias = "full_text")]
    pub text: String,
    /// Untruncated text and entities of a long tweet.
    #[serde(default, rename = "extended_tweet", skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedTweet>,
    /// Author of the tweet.
    pub user: User,
    /// Time the tweet was sent.
    #[serde(
        default,
        rename = "created_at",
        with = "twitter_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    /// Entities annotated on `text`.
    #[serde(default)]
    pub entities: Entities,
    /// Extended entities, usually carrying the full media list with video variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_entities: Option<Entities>,
    /// The quoted tweet.
    #[serde(default, rename = "quoted_status", skip_serializing_if = "Option::is_none")]
    pub quoted: Option<Box<Tweet>>,
    /// The retweeted tweet.
    #[serde(default, rename = "retweeted_status", skip_serializing_if = "Option::is_none")]
    pub retweeted: Option<Box<Tweet>>,
    /// Screen name of the user this tweet replies to.
    #[serde(
        default,
        rename = "in_reply_to_screen_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub reply_to_user: Option<String>,
    /// Id of the tweet this tweet replies to.
    #[serde(
        default,
        rename = "in_reply_to_status_id_str",
        skip_serializing_if = "Option::is_none"
    )]
    pub reply_to_tweet_id: Option<String>,
}

/// Full text and entities of a tweet longer than the legacy limit.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExtendedTweet {
    /// The untruncated text.
    pub full_text: String,
    /// Entities annotated on `full_text`.
    #[serde(default)]
    pub entities: Entities,
    /// Extended entities annotated on `full_text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_entities: Option<Entities>,
}

/// Author of a tweet.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Handle, without the leading `@`.
    pub screen_name: String,
    /// Display name.
    pub name: String,
    /// Profile picture.
    #[serde(
        default,
        rename = "profile_image_url_https",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image: Option<String>,
}

impl User {
    /// Link to the user's profile page.
    #[must_use]
    pub fn profile_link(&self) -> String {
        profile_link(&self.screen_name)
    }
}

/// Link to the profile page of `screen_name`.
#[must_use]
pub fn profile_link(screen_name: &str) -> String {
    format!("https://twitter.com/{}", screen_name)
}

/// Link to the tweet `id` posted by `screen_name`.
#[must_use]
pub fn status_link(screen_name: &str, id: &str) -> String {
    format!("https://twitter.com/{}/status/{}", screen_name, id)
}

impl Tweet {
    /// Full text of a long tweet, if the source provided one.
    #[must_use]
    pub fn extended_text(&self) -> Option<&str> {
        self.extended.as_ref().map(|ext| ext.full_text.as_str())
    }

    /// The effective body text.
    ///
    /// The extended text wins, then the retweeted tweet's long text, then the raw text.
    #[must_use]
    pub fn long_text(&self) -> &str {
        match (&self.extended, &self.retweeted) {
            (Some(ext), _) => &ext.full_text,
            (None, Some(retweeted)) => retweeted.long_text(),
            (None, None) => &self.text,
        }
    }

    /// The effective entity set, following the same precedence as [`Tweet::long_text`].
    ///
    /// Own entities are merged with own extended entities, then with the extended tweet's
    /// entities and extended entities, later non-empty lists replacing earlier ones. Lists
    /// annotated on the full text thus win over the ones annotated on the truncated text.
    #[must_use]
    pub fn long_entities(&self) -> Entities {
        if let (None, Some(retweeted)) = (&self.extended, &self.retweeted) {
            return retweeted.long_entities();
        }

        let mut entities = self.entities.clone();
        if let Some(extended_entities) = &self.extended_entities {
            entities = entities.merge(extended_entities.clone());
        }
        if let Some(ext) = &self.extended {
            entities = entities.merge(ext.entities.clone());
            if let Some(extended_entities) = &ext.extended_entities {
                entities = entities.merge(extended_entities.clone());
            }
        }
        entities
    }

    /// Link to this tweet.
    #[must_use]
    pub fn link(&self) -> String {
        status_link(&self.user.screen_name, &self.id)
    }
}

/// Entity lists annotated on a tweet's text.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entities {
    /// Hashtags, e.g. `#rust`.
    pub hashtags: Vec<Hashtag>,
    /// Shortened links.
    pub urls: Vec<Url>,
    /// Attached photos, videos and gifs.
    pub media: Vec<Media>,
    /// Mentioned users.
    pub user_mentions: Vec<Mention>,
    /// Cashtags, e.g. `$TWTR`.
    pub symbols: Vec<Hashtag>,
}

impl Entities {
    /// Merge `later` over `self`. Each list of `later` replaces the matching list of
    /// `self` when it is non-empty.
    #[must_use]
    pub fn merge(mut self, later: Self) -> Self {
        fn pick<T>(earlier: &mut Vec<T>, later: Vec<T>) {
            if !later.is_empty() {
                *earlier = later;
            }
        }

        pick(&mut self.hashtags, later.hashtags);
        pick(&mut self.urls, later.urls);
        pick(&mut self.media, later.media);
        pick(&mut self.user_mentions, later.user_mentions);
        pick(&mut self.symbols, later.symbols);
        self
    }
}

/// A hashtag or a cashtag. `text` excludes the leading `#` or `$`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hashtag {
    /// Span of the tag, sigil included.
    pub indices: Indices,
    /// Tag text.
    pub text: String,
}

/// A shortened link.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Url {
    /// Span of the shortened link.
    pub indices: Indices,
    /// The shortened link as it appears in the text.
    pub url: String,
    /// The link target.
    #[serde(default)]
    pub expanded_url: Option<String>,
    /// Label suggested for display.
    #[serde(default)]
    pub display_url: Option<String>,
}

/// A mentioned user.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    /// Span of the mention, `@` included.
    pub indices: Indices,
    /// Handle of the mentioned user.
    pub screen_name: String,
}

/// Kind of attached media.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// A still image.
    Photo,
    /// A video.
    Video,
    /// A looping gif, delivered as a video.
    AnimatedGif,
}

/// An attached photo, video or gif.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Span of the media link.
    pub indices: Indices,
    /// The shortened media link as it appears in the text.
    pub url: String,
    /// Direct link to the media file (or the video thumbnail).
    pub media_url_https: String,
    /// Label suggested for display.
    #[serde(default)]
    pub display_url: Option<String>,
    /// Kind of media.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Encoded variants of a video or gif.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_info: Option<VideoInfo>,
}

impl Media {
    /// Encoded variants, empty for photos.
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        self.video_info
            .as_ref()
            .map_or(&[][..], |info| info.variants.as_slice())
    }
}

/// Video metadata of a media entity.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Available encodings.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// One encoding of a video.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Bitrate, absent for streaming playlists.
    #[serde(default)]
    pub bitrate: Option<u64>,
    /// MIME type of the encoding.
    pub content_type: String,
    /// Link to the encoded file.
    pub url: String,
}

mod twitter_date {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

    pub fn serialize<S: Serializer>(
        date: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_some(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                DateTime::parse_from_str(&s, FORMAT)
                    .map(|date| date.with_timezone(&Utc))
                    .map_err(D::Error::custom)
            })
            .transpose()
    }
}
