//! Formatting helpers for the chat markup dialect.

/// Marker prefixed to quoted lines.
pub const QUOTE_MARKER: &str = ">";

/// Undo the entity escaping applied by the tweet source.
#[must_use]
pub fn unescape_html(text: &str) -> String {
    // `&amp;` goes last so `&amp;lt;` decodes to `&lt;` and not to `<`.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Escape literal text for the chat markup.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\\' | '*' | '_' | '~' | '`' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Continue a quote across line breaks.
#[must_use]
pub fn quote_lines(text: &str) -> String {
    text.replace('\n', &format!("\n{}", QUOTE_MARKER))
}

/// A link to `url`, labelled with `label` when given.
#[must_use]
pub fn link(url: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("<{}|{}>", url, label),
        None => format!("<{}>", url),
    }
}

#[must_use]
pub fn italic(text: &str) -> String {
    format!("_{}_", text)
}

#[must_use]
pub fn bold(text: &str) -> String {
    format!("*{}*", text)
}
