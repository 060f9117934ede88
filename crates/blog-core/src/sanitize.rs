//! Best-effort text sanitization for free-text fields.
//!
//! This is a defense-in-depth filter, not an HTML sanitizer: it strips
//! complete `<script>` blocks and anything that looks like a markup tag,
//! but it does not parse markup and cannot catch every obfuscated or
//! malformed injection vector. Stored text is still treated as untrusted
//! by consumers.

use once_cell::sync::Lazy;
use regex::Regex;

// Case-insensitive, dot-matches-newline, non-greedy so adjacent blocks are
// removed separately instead of swallowing the text between them.
static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script pattern"));

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Strip script blocks and markup tags, truncate to `max_len` characters,
/// and trim surrounding whitespace.
pub fn sanitize(input: &str, max_len: usize) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");
    let without_tags = MARKUP_TAG.replace_all(&without_scripts, "");

    let truncated: String = without_tags.chars().take(max_len).collect();
    truncated.trim().to_string()
}
