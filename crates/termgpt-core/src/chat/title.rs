//! Title derivation from the first assistant reply.
//!
//! The system prompt pins the reply shape: a short plain-text title on the
//! first line, a blank second line, the answer from the third line on.
//! `split_title` takes that shape apart for persistence.

/// Split a reply into its title line and the body below the blank line.
///
/// Returns the trimmed first line as the title and the lines from index 2
/// onward, rejoined, as the body. Replies shorter than three lines yield an
/// empty body.
pub fn split_title(reply: &str) -> (String, String) {
    let title = reply.lines().next().unwrap_or("").trim().to_string();
    let body = reply.lines().skip(2).collect::<Vec<_>>().join("\n");
    (title, body)
}
