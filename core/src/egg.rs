//! Conversion from [`egg_mode`] tweets.
//!
//! `egg_mode` reports entity ranges as byte offsets into the text, while [`Tweet`] keeps
//! character offsets like the raw API payload does, so ranges are mapped back here.
use egg_mode::entities::{HashtagEntity, MediaEntity, MediaType, MentionEntity, UrlEntity};
use egg_mode::tweet::Tweet as RawTweet;

use crate::error::TweetError;
use crate::models::{
    Entities, Hashtag, Indices, Media, MediaKind, Mention, Tweet, Url, User, Variant, VideoInfo,
};

impl TryFrom<RawTweet> for Tweet {
    type Error = TweetError;

    fn try_from(raw: RawTweet) -> Result<Self, Self::Error> {
        let id = raw.id.to_string();
        let user = raw.user.ok_or_else(|| TweetError::MissingUser(id.clone()))?;
        let text = raw.text;

        let entities = Entities {
            hashtags: hashtags(&text, raw.entities.hashtags),
            urls: raw
                .entities
                .urls
                .into_iter()
                .map(|url| convert_url(&text, url))
                .collect(),
            media: media(&text, raw.entities.media.unwrap_or_default()),
            user_mentions: raw
                .entities
                .user_mentions
                .into_iter()
                .map(|mention| convert_mention(&text, mention))
                .collect(),
            symbols: hashtags(&text, raw.entities.symbols),
        };
        let extended_entities = raw.extended_entities.map(|ext| Entities {
            media: media(&text, ext.media),
            ..Entities::default()
        });

        let quoted = raw
            .quoted_status
            .map(|quoted| Self::try_from(*quoted).map(Box::new))
            .transpose()?;
        let retweeted = raw
            .retweeted_status
            .map(|retweeted| Self::try_from(*retweeted).map(Box::new))
            .transpose()?;

        Ok(Self {
            id,
            text,
            extended: None,
            user: User {
                screen_name: user.screen_name,
                name: user.name,
                profile_image: Some(user.profile_image_url_https)
                    .filter(|url| !url.is_empty()),
            },
            created: Some(raw.created_at),
            entities,
            extended_entities,
            quoted,
            retweeted,
            reply_to_user: raw.in_reply_to_screen_name,
            reply_to_tweet_id: raw.in_reply_to_status_id.map(|id| id.to_string()),
        })
    }
}

// Map a byte range back to a character range. Ranges that do not fall on character
// boundaries are kept as is and left to the renderer's offset correction.
fn char_range(text: &str, (left, right): Indices) -> Indices {
    let to_chars = |offset: usize| {
        text.get(..offset)
            .map_or(offset, |prefix| prefix.chars().count())
    };
    (to_chars(left), to_chars(right))
}

fn hashtags(text: &str, raw: Vec<HashtagEntity>) -> Vec<Hashtag> {
    raw.into_iter()
        .map(|tag| Hashtag {
            indices: char_range(text, tag.range),
            text: tag.text,
        })
        .collect()
}

fn convert_url(text: &str, url: UrlEntity) -> Url {
    Url {
        indices: char_range(text, url.range),
        url: url.url,
        expanded_url: url.expanded_url,
        display_url: Some(url.display_url),
    }
}

fn convert_mention(text: &str, mention: MentionEntity) -> Mention {
    Mention {
        indices: char_range(text, mention.range),
        screen_name: mention.screen_name,
    }
}

fn media(text: &str, raw: Vec<MediaEntity>) -> Vec<Media> {
    raw.into_iter()
        .map(|medium| Media {
            indices: char_range(text, medium.range),
            url: medium.url,
            media_url_https: medium.media_url_https,
            display_url: Some(medium.display_url),
            kind: match medium.media_type {
                MediaType::Photo => MediaKind::Photo,
                MediaType::Video => MediaKind::Video,
                MediaType::Gif => MediaKind::AnimatedGif,
            },
            video_info: medium.video_info.map(|info| VideoInfo {
                variants: info
                    .variants
                    .into_iter()
                    .map(|variant| Variant {
                        bitrate: variant.bitrate.and_then(|rate| u64::try_from(rate).ok()),
                        content_type: variant.content_type.to_string(),
                        url: variant.url,
                    })
                    .collect(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use egg_mode::tweet::Tweet as RawTweet;
    use serde_json::{json, Value};

    use crate::egg::char_range;
    use crate::error::TweetError;
    use crate::models::{MediaKind, Tweet, Variant};

    fn user(screen_name: &str) -> Value {
        json!({
            "contributors_enabled": false,
            "created_at": "Wed Jan 01 00:00:00 +0000 2014",
            "default_profile": true,
            "default_profile_image": false,
            "favourites_count": 0,
            "followers_count": 42,
            "friends_count": 7,
            "geo_enabled": false,
            "id": 1,
            "is_translator": false,
            "listed_count": 0,
            "name": format!("The {}", screen_name),
            "profile_background_color": "000000",
            "profile_image_url": format!("http://pbs.twimg.com/profile_images/{}.jpg", screen_name),
            "profile_image_url_https": format!("https://pbs.twimg.com/profile_images/{}.jpg", screen_name),
            "profile_link_color": "1DA1F2",
            "profile_sidebar_border_color": "C0DEED",
            "profile_sidebar_fill_color": "DDEEF6",
            "profile_text_color": "333333",
            "profile_use_background_image": true,
            "protected": false,
            "screen_name": screen_name,
            "statuses_count": 100,
            "verified": false
        })
    }

    fn payload(id: u64, text: &str, user: Option<Value>) -> Value {
        let mut payload = json!({
            "created_at": "Sat Mar 16 14:32:11 +0000 2019",
            "entities": {"hashtags": [], "symbols": [], "urls": [], "user_mentions": []},
            "favorite_count": 0,
            "id": id,
            "retweet_count": 0,
            "source": "web",
            "full_text": text,
            "truncated": false
        });
        if let Some(user) = user {
            payload["user"] = user;
        }
        payload
    }

    fn media(kind: &str, indices: [usize; 2], video_info: Option<Value>) -> Value {
        let size = json!({"w": 100, "h": 100, "resize": "fit"});
        let mut media = json!({
            "display_url": "pic.twitter.com/m",
            "expanded_url": "https://twitter.com/a/status/1/photo/1",
            "id": 5,
            "indices": indices,
            "media_url": "http://pbs.twimg.com/media/m.jpg",
            "media_url_https": "https://pbs.twimg.com/media/m.jpg",
            "sizes": {"thumb": size, "small": size, "medium": size, "large": size},
            "type": kind,
            "url": "https://t.co/m"
        });
        if let Some(video_info) = video_info {
            media["video_info"] = video_info;
        }
        media
    }

    fn convert(payload: Value) -> Result<Tweet, TweetError> {
        let raw: RawTweet = serde_json::from_value(payload).unwrap();
        Tweet::try_from(raw)
    }

    #[test]
    fn must_reject_tweet_without_user() {
        assert_eq!(
            convert(payload(7, "hi", None)),
            Err(TweetError::MissingUser(String::from("7")))
        );
    }

    #[test]
    fn must_convert_tweet() {
        let mut raw = payload(1, "héllo #wörld @RustLang https://t.co/m", Some(user("a")));
        raw["entities"] = json!({
            "hashtags": [{"indices": [6, 12], "text": "wörld"}],
            "symbols": [],
            "urls": [],
            "user_mentions": [{"id": 2, "indices": [13, 22], "name": "Rust", "screen_name": "rustlang"}],
            "media": [media("photo", [23, 37], None)]
        });
        raw["in_reply_to_screen_name"] = json!("b");
        raw["in_reply_to_status_id"] = json!(9);

        let tweet = convert(raw).unwrap();

        assert_eq!(tweet.id, "1");
        assert_eq!(tweet.text, "héllo #wörld @RustLang https://t.co/m");
        assert_eq!(tweet.user.screen_name, "a");
        assert_eq!(tweet.user.name, "The a");
        assert_eq!(
            tweet.user.profile_image.as_deref(),
            Some("https://pbs.twimg.com/profile_images/a.jpg")
        );
        assert_eq!(
            tweet.created,
            Some(Utc.with_ymd_and_hms(2019, 3, 16, 14, 32, 11).unwrap())
        );
        assert_eq!(tweet.reply_to_user.as_deref(), Some("b"));
        assert_eq!(tweet.reply_to_tweet_id.as_deref(), Some("9"));

        // Offsets come back as the character positions of the payload.
        assert_eq!(tweet.entities.hashtags[0].indices, (6, 12));
        assert_eq!(tweet.entities.hashtags[0].text, "wörld");
        assert_eq!(tweet.entities.user_mentions[0].indices, (13, 22));
        assert_eq!(tweet.entities.user_mentions[0].screen_name, "rustlang");
        let photo = &tweet.entities.media[0];
        assert_eq!(photo.indices, (23, 37));
        assert_eq!(photo.kind, MediaKind::Photo);
        assert_eq!(photo.display_url.as_deref(), Some("pic.twitter.com/m"));
        assert!(photo.variants().is_empty());
        assert!(tweet.extended_entities.is_none());
    }

    #[test]
    fn must_convert_video_variants() {
        let mut raw = payload(1, "a video for you https://t.co/m", Some(user("a")));
        let video_info = json!({
            "aspect_ratio": [16, 9],
            "duration_millis": 1000,
            "variants": [
                {"content_type": "application/x-mpegURL", "url": "https://video.twimg.com/a.m3u8"},
                {"bitrate": 2_176_000, "content_type": "video/mp4", "url": "https://video.twimg.com/a.mp4"}
            ]
        });
        let gif_info = json!({
            "aspect_ratio": [1, 1],
            "variants": [{"bitrate": 0, "content_type": "video/mp4", "url": "https://video.twimg.com/b.mp4"}]
        });
        raw["extended_entities"] = json!({
            "media": [
                media("video", [16, 30], Some(video_info)),
                media("animated_gif", [16, 30], Some(gif_info))
            ]
        });

        let tweet = convert(raw).unwrap();

        let media = tweet.extended_entities.unwrap().media;
        assert_eq!(media[0].kind, MediaKind::Video);
        assert_eq!(media[0].indices, (16, 30));
        assert_eq!(media[0].variants().len(), 2);
        assert_eq!(media[0].variants()[0].bitrate, None);
        assert_eq!(
            media[0].variants()[1],
            Variant {
                bitrate: Some(2_176_000),
                content_type: String::from("video/mp4"),
                url: String::from("https://video.twimg.com/a.mp4"),
            }
        );
        assert_eq!(media[1].kind, MediaKind::AnimatedGif);
        assert_eq!(media[1].variants()[0].bitrate, Some(0));
    }

    #[test]
    fn must_convert_nested_tweets() {
        let mut raw = payload(3, "RT @b: look", Some(user("a")));
        let mut retweeted = payload(2, "look", Some(user("b")));
        retweeted["quoted_status"] = payload(1, "quoted", Some(user("c")));
        raw["retweeted_status"] = retweeted;

        let tweet = convert(raw).unwrap();

        let retweeted = tweet.retweeted.unwrap();
        assert_eq!(retweeted.id, "2");
        assert_eq!(retweeted.user.screen_name, "b");
        let quoted = retweeted.quoted.unwrap();
        assert_eq!(quoted.id, "1");
        assert_eq!(quoted.text, "quoted");
        assert_eq!(quoted.user.screen_name, "c");
        assert!(tweet.quoted.is_none());
    }

    #[test]
    fn must_reject_nested_tweet_without_user() {
        let mut raw = payload(2, "look", Some(user("a")));
        raw["quoted_status"] = payload(1, "quoted", None);

        assert_eq!(
            convert(raw),
            Err(TweetError::MissingUser(String::from("1")))
        );
    }

    #[test]
    fn must_map_byte_range_to_chars() {
        let text = "héllo #wörld";
        // `#wörld` starts at byte 7 and ends at byte 14.
        assert_eq!(char_range(text, (7, 14)), (6, 12));
    }

    #[test]
    fn must_keep_range_off_char_boundary() {
        let text = "é";
        assert_eq!(char_range(text, (1, 2)), (1, 1));
    }
}
