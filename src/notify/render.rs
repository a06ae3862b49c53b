//! Text helpers shared by the chat providers

use crate::smtp::message::SUBJECT_HEADER;

/// Maximum number of characters of body shown in a notification
pub const SNIPPET_MAX_CHARS: usize = 500;

/// Appended to a snippet that was cut short
pub const ELLIPSIS: &str = "...";

/// Escape the characters that are significant in HTML-like markup
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Remove every line starting with `Subject:` (any case)
pub fn strip_subject_lines(body: &str) -> String {
    body.split('\n')
        .filter(|line| {
            !line
                .get(..SUBJECT_HEADER.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SUBJECT_HEADER))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut `text` to at most `max_chars` characters, marking the cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// The unescaped body excerpt shown under the message facts
pub fn snippet(body: &str) -> String {
    truncate(&strip_subject_lines(body), SNIPPET_MAX_CHARS)
}
