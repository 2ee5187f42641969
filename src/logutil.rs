//! Keeps user-typed search queries on one log line.

/// Longest query preview written to the log.
const MAX_PREVIEW: usize = 200;

/// Render a chat query for logging.
///
/// Control characters use Rust escape notation (`\n`, `\u{7}`); everything past
/// [`MAX_PREVIEW`] characters is replaced by an ellipsis.
pub fn escape_log(query: &str) -> String {
    let mut out = String::with_capacity(query.len().min(MAX_PREVIEW) + 4);
    for c in query.chars().take(MAX_PREVIEW) {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    if query.chars().nth(MAX_PREVIEW).is_some() {
        out.push('…');
    }
    out
}
