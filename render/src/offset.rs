//! Alignment of declared entity positions with the actual text.
//!
//! Declared offsets drift from the real ones when the source counts characters
//! differently, e.g. when `&amp;` in the raw text is counted as a single `&`. The drift
//! ("fudge") is discovered chunk by chunk and carried forward, so one correction fixes
//! every later entity too.
use tracing::debug;

use crate::chunk::Chunk;
use crate::text::CharIndexed;

fn shift(position: usize, fudge: isize) -> Option<usize> {
    position.checked_add_signed(fudge)
}

fn matches(chunk: &Chunk, found: &str) -> bool {
    if chunk.ignore_case {
        found.eq_ignore_ascii_case(&chunk.original)
    } else {
        found == chunk.original
    }
}

#[allow(clippy::cast_possible_wrap)]
fn drift(found: usize, declared: usize) -> isize {
    found as isize - declared as isize
}

/// Find the fudge that aligns `chunk` with `text`, starting from the current `fudge`.
///
/// The current fudge is kept if it already aligns the chunk. Otherwise the original
/// substring is searched within `|fudge|` characters of its declared position, then
/// anywhere in the text. If it can't be found at all the current fudge is kept.
#[must_use]
pub fn find_fudge(text: &CharIndexed<'_>, chunk: &Chunk, fudge: isize) -> isize {
    let find_from = |start| {
        if chunk.ignore_case {
            text.find_from_ignore_ascii_case(&chunk.original, start)
        } else {
            text.find_from(&chunk.original, start)
        }
    };

    let aligned = shift(chunk.left, fudge)
        .zip(shift(chunk.right, fudge))
        .and_then(|(left, right)| text.slice(left, right));
    if aligned.map_or(false, |aligned| matches(chunk, aligned)) {
        return fudge;
    }

    let spread = fudge.unsigned_abs();
    let start = chunk.left.saturating_sub(spread);
    if let Some(found) = find_from(start) {
        if found <= chunk.left + spread {
            return drift(found, chunk.left);
        }
    }

    match find_from(0) {
        Some(found) => drift(found, chunk.left),
        None => {
            debug!(original = %chunk.original, left = chunk.left, "Entity not found in text");
            fudge
        }
    }
}

/// Shift every chunk by the fudge found for it, carrying the fudge forward.
///
/// `chunks` must be sorted by position.
#[must_use]
pub fn correct_offsets(text: &str, chunks: Vec<Chunk>) -> Vec<Chunk> {
    let text = CharIndexed::new(text);
    chunks
        .into_iter()
        .scan(0, |fudge, chunk| {
            *fudge = find_fudge(&text, &chunk, *fudge);
            Some(Chunk {
                left: shift(chunk.left, *fudge).unwrap_or_default(),
                right: shift(chunk.right, *fudge).unwrap_or_default(),
                ..chunk
            })
        })
        .collect()
}
