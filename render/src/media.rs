//! Conversion of attached photos, videos and gifs.
use std::borrow::Cow;

use chirp_core::message::PostableMessage;
use chirp_core::models::{Media, MediaKind, Variant};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::deferred::DelayedActions;
use crate::mrkdwn::link;
use crate::transcode::Transcoder;

/// Content type of the video encoding handed to the transcoder.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// The `video/mp4` variant with the highest bitrate. The first one wins on ties.
#[must_use]
pub fn best_variant(variants: &[Variant]) -> Option<&Variant> {
    let bitrate = |variant: &Variant| variant.bitrate.unwrap_or_default();
    variants
        .iter()
        .filter(|variant| variant.content_type == VIDEO_CONTENT_TYPE)
        .fold(None, |best, variant| match best {
            Some(best) if bitrate(variant) <= bitrate(best) => Some(best),
            _ => Some(variant),
        })
}

/// Remove the trailing `?tag=<n>` tracking parameter of a video link.
#[must_use]
pub fn strip_tag(url: &str) -> Cow<'_, str> {
    static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?tag=\d+$").unwrap());

    TAG.replace(url, "")
}

/// Convert a media entity into an inline link, posting the media itself as a side
/// message.
///
/// Videos and gifs go through `transcoder`. Any transcoding failure falls back to the
/// original variant link.
pub async fn convert(
    media: &Media,
    delayed: &mut DelayedActions,
    transcoder: &dyn Transcoder,
) -> String {
    let variant = match media.kind {
        MediaKind::Video | MediaKind::AnimatedGif => best_variant(media.variants()),
        MediaKind::Photo => None,
    };

    let url = match variant {
        Some(variant) => {
            let cleaned = strip_tag(&variant.url);
            match transcoder.attempt_transcode(&cleaned).await {
                Ok(transcoded) => {
                    debug!(from = %cleaned, to = %transcoded, "Transcoded video");
                    transcoded
                }
                Err(error) => {
                    warn!(%error, url = %variant.url, "Failed to transcode video, use original");
                    variant.url.clone()
                }
            }
        }
        None => media.media_url_https.clone(),
    };

    delayed.push(PostableMessage::text(link(&url, None)));
    link(&url, media.display_url.as_deref())
}
