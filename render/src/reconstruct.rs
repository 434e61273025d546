//! Rebuild a tweet's text around its replacement chunks.
use crate::chunk::Chunk;
use crate::flags::RenderingFlags;
use crate::mrkdwn::{escape, quote_lines, unescape_html};
use crate::text::CharIndexed;

fn literal(text: &str, quoting: bool) -> String {
    let escaped = escape(&unescape_html(text));
    if quoting {
        quote_lines(&escaped)
    } else {
        escaped
    }
}

/// Interleave the literal text between `chunks` with their replacements.
///
/// `chunks` must be sorted and aligned with `text`. Literal text is unescaped from the
/// source's HTML entities and escaped for the chat markup; in quoting mode every line of
/// it continues the quote.
#[must_use]
pub fn reconstruct(text: &str, chunks: &[Chunk], flags: &RenderingFlags) -> String {
    let text = CharIndexed::new(text);
    let quoting = flags.is_quoting();

    let mut output = String::from(flags.quote_prefix());
    let mut cursor = 0;
    for chunk in chunks {
        if chunk.left > cursor {
            output.push_str(&literal(text.slice_clamped(cursor, chunk.left), quoting));
        }
        if chunk.requires_padding && !output.ends_with(char::is_whitespace) {
            output.push(' ');
        }
        output.push_str(&chunk.converted);
        cursor = chunk.right;
    }
    if cursor < text.len() {
        output.push_str(&literal(text.slice_clamped(cursor, text.len()), quoting));
    }

    output
}

#[cfg(test)]
mod tests {
    use crate::chunk::Chunk;
    use crate::flags::RenderingFlags;
    use crate::reconstruct::reconstruct;

    fn chunk(left: usize, right: usize, converted: &str, requires_padding: bool) -> Chunk {
        Chunk {
            left,
            right,
            original: String::new(),
            converted: converted.to_string(),
            requires_padding,
            ignore_case: false,
        }
    }

    fn quoted() -> RenderingFlags {
        RenderingFlags {
            quoted: true,
            ..RenderingFlags::default()
        }
    }

    #[test]
    fn must_only_escape_without_chunks() {
        let text = "Tom &amp; Jerry &lt;3 *stars* 日本";
        assert_eq!(
            reconstruct(text, &[], &RenderingFlags::default()),
            r"Tom &amp; Jerry &lt;3 \*stars\* 日本"
        );
    }

    #[test]
    fn must_interleave_chunks() {
        let text = "hi @rust see https://t.co/x!";
        let chunks = [
            chunk(3, 8, "<@rust>", false),
            chunk(13, 27, "<link>", false),
        ];
        assert_eq!(
            reconstruct(text, &chunks, &RenderingFlags::default()),
            "hi <@rust> see <link>!"
        );
    }

    #[test]
    fn must_pad_when_needed() {
        let text = "a#b c #d";
        let chunks = [chunk(1, 3, "_#b_", true), chunk(6, 8, "_#d_", true)];
        assert_eq!(
            reconstruct(text, &chunks, &RenderingFlags::default()),
            "a _#b_ c _#d_"
        );
    }

    #[test]
    fn must_quote_lines() {
        let text = "first\nsecond #tag\nthird";
        let chunks = [chunk(13, 17, "_#tag_", true)];
        assert_eq!(
            reconstruct(text, &chunks, &quoted()),
            ">first\n>second _#tag_\n>third"
        );
    }

    #[test]
    fn must_prefix_empty_quote() {
        assert_eq!(reconstruct("", &[], &quoted()), ">");
        assert_eq!(reconstruct("", &[], &RenderingFlags::default()), "");
    }

    #[test]
    fn must_clamp_chunks_past_the_end() {
        let text = "?";
        let chunks = [chunk(2, 25, "<pic>", false)];
        assert_eq!(
            reconstruct(text, &chunks, &RenderingFlags::default()),
            "?<pic>"
        );
    }
}
