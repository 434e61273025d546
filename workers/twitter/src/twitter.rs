use egg_mode::error::Error;
use egg_mode::tweet::{Timeline, Tweet};
use futures_util::{stream, Stream};

/// Stream of batches of tweets newer than the ones already seen, newest first.
///
/// The existing timeline is skipped; every poll yields what was posted since the last one.
///
/// # Errors
/// Returns an error if the timeline can't be started.
pub async fn newer_tweets(
    timeline: Timeline,
) -> Result<impl Stream<Item = Result<Vec<Tweet>, Error>>, Error> {
    let (timeline, _) = timeline.start().await?;
    Ok(stream::try_unfold(timeline, |timeline| async move {
        let (timeline, resp) = timeline.newer(None).await?;
        Ok(Some((resp.response, timeline)))
    }))
}
