//! Slug normalization and validation.
//!
//! A slug is a URL-safe post identifier matching `^[a-z0-9-]{1,100}$`.
//! Slugs either come from the client (normalized, then validated - a slug
//! that still fails validation is rejected, never corrected further) or are
//! derived from the post title, in which case the result is valid by
//! construction and needs no re-check.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum slug length in characters.
pub const MAX_LEN: usize = 100;

/// Derived slug for titles with no usable characters.
const FALLBACK: &str = "untitled";

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]{1,100}$").expect("valid slug pattern"));

/// True iff `slug` is a well-formed slug.
pub fn is_valid(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

/// Derive a slug from a post title.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]`
/// (including CJK and other non-ASCII) into a single hyphen, strips
/// leading/trailing hyphens and truncates to [`MAX_LEN`]. Titles that leave
/// nothing behind produce `"untitled"`, so the result always satisfies
/// [`is_valid`].
pub fn from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_LEN));
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
        if slug.len() >= MAX_LEN {
            break;
        }
    }

    slug.truncate(MAX_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        FALLBACK.to_string()
    } else {
        slug
    }
}

/// Normalize a client-supplied slug.
///
/// Lowercases, maps characters outside `[a-z0-9-]` to hyphens, collapses
/// hyphen runs and trims the ends. The result may still be invalid (empty,
/// or over [`MAX_LEN`]) and must go through [`is_valid`].
pub fn normalize(supplied: &str) -> String {
    let mut slug = String::with_capacity(supplied.len());
    let mut last_was_hyphen = false;

    for c in supplied.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_basic_title() {
        assert_eq!(from_title("Hello World!"), "hello-world");
        assert_eq!(from_title("  Rust 2024, the year  "), "rust-2024-the-year");
    }

    #[test]
    fn derived_slugs_are_always_valid() {
        let titles = [
            "Hello World!",
            "",
            "   ",
            "!!!???",
            "你好世界",
            "你好 world 你好",
            "a",
            &"x".repeat(500),
            "---already---hyphenated---",
            "MiXeD CaSe TiTLe",
        ];
        for title in titles {
            let slug = from_title(title);
            assert!(is_valid(&slug), "invalid derived slug {slug:?} from {title:?}");
        }
    }

    #[test]
    fn cjk_only_title_falls_back() {
        assert_eq!(from_title("你好世界"), "untitled");
        assert_eq!(from_title("你好 world"), "world");
    }

    #[test]
    fn derivation_respects_max_len() {
        let slug = from_title(&"ab ".repeat(200));
        assert!(slug.len() <= MAX_LEN);
        assert!(is_valid(&slug));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn validates_exact_character_class() {
        assert!(is_valid("hello-world"));
        assert!(is_valid("a"));
        assert!(is_valid(&"a".repeat(100)));

        assert!(!is_valid(""));
        assert!(!is_valid(&"a".repeat(101)));
        assert!(!is_valid("Hello"));
        assert!(!is_valid("hello world"));
        assert!(!is_valid("hello_world"));
        assert!(!is_valid("héllo"));
    }

    #[test]
    fn normalizes_supplied_slugs() {
        assert_eq!(normalize("My Custom Slug"), "my-custom-slug");
        assert_eq!(normalize("--weird--input--"), "weird-input");
        assert_eq!(normalize("UPPER-case"), "upper-case");
        assert_eq!(normalize("!!!"), "");
    }
}
