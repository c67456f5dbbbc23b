//! Logging helpers for user-supplied strings (starch names, tournament names, file paths).
//! Starch names and data URIs can be long or contain control characters; these helpers keep
//! every log record on one line and bounded in size.

use std::fmt::Write;

/// Longest preview kept for a logged value, in characters.
pub const MAX_PREVIEW: usize = 120;

/// Escape a string for single-line logging.
///
/// Newlines, carriage returns, tabs and backslashes are escaped; other control characters
/// become `\xNN`. Values longer than [`MAX_PREVIEW`] characters are cut with an ellipsis.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Describe an optional image URL for logs without dumping a whole data URI.
pub fn describe_image(image_url: Option<&str>) -> String {
    match image_url {
        None => "none".to_string(),
        Some(url) if url.starts_with("data:") => {
            let mime = url
                .trim_start_matches("data:")
                .split([';', ','])
                .next()
                .unwrap_or("?");
            format!("inline {} ({} bytes)", mime, url.len())
        }
        Some(url) => escape_log(url),
    }
}
