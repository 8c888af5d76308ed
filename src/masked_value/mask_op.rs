//!
//! Masking, unmasking and cursor calculation.
//!
//! All functions work on a [MaskPattern] and some text. Raw text
//! that doesn't start with the prefix is used completely as
//! content for the slots.
//!
use crate::grapheme::str_len;
use crate::mask_pattern::{MaskPattern, PatternToken};
use crate::upos_type;
use unicode_segmentation::UnicodeSegmentation;

/// Part of the text after the prefix.
#[inline]
fn after_prefix<'a>(pattern: &MaskPattern, text: &'a str) -> &'a str {
    text.strip_prefix(pattern.prefix()).unwrap_or(text)
}

/// Prepends the prefix if the text doesn't start with it.
/// Does nothing if masking is disabled.
pub fn ensure_prefix(pattern: &MaskPattern, text: String) -> String {
    if pattern.is_masking_enabled() && !text.starts_with(pattern.prefix()) {
        let mut buf = pattern.prefix().to_string();
        buf.push_str(&text);
        buf
    } else {
        text
    }
}

/// Removes all occurrences of the allowed characters.
pub fn strip_allowed<S: AsRef<str>>(allowed: &[S], text: &str) -> String {
    let mut buf = text.to_string();
    for a in allowed {
        let a = a.as_ref();
        if !a.is_empty() {
            buf = buf.replace(a, "");
        }
    }
    buf
}

/// Raw text from some input text.
///
/// The allowed characters are removed from the part after the prefix,
/// and the prefix is added if it's missing. The prefix itself is kept
/// as is, even if it contains some of the allowed characters.
///
/// With masking disabled only the allowed characters are removed.
pub fn clean_raw<S: AsRef<str>>(pattern: &MaskPattern, allowed: &[S], text: &str) -> String {
    if !pattern.is_masking_enabled() {
        return strip_allowed(allowed, text);
    }

    let mut buf = pattern.prefix().to_string();
    buf.push_str(&strip_allowed(allowed, after_prefix(pattern, text)));
    buf
}

/// Creates the displayed text from the raw text.
///
/// Fills the slots of the pattern with the raw text and keeps
/// all literals. A literal that equals the next raw grapheme consumes
/// that grapheme, so separators contained in the raw text don't
/// shift the rest.
///
/// Returns the raw text if masking is disabled.
pub fn render(pattern: &MaskPattern, raw: &str) -> String {
    if !pattern.is_masking_enabled() {
        return raw.to_string();
    }

    let mut buf = pattern.prefix().to_string();
    let mut body = after_prefix(pattern, raw).graphemes(true).peekable();
    for t in pattern.tokens() {
        match t {
            PatternToken::Placeholder(p) => {
                if let Some(g) = body.next() {
                    buf.push_str(g);
                } else {
                    buf.push_str(p);
                }
            }
            PatternToken::Literal(l) => {
                buf.push_str(l);
                if body.peek().copied() == Some(&**l) {
                    body.next();
                }
            }
        }
    }
    buf
}

/// Recovers the raw text from a displayed text.
///
/// Collects the graphemes at slot positions up to the first slot
/// that still shows the placeholder.
///
/// Returns the text if masking is disabled.
pub fn unmask(pattern: &MaskPattern, displayed: &str) -> String {
    if !pattern.is_masking_enabled() {
        return displayed.to_string();
    }

    let mut buf = pattern.prefix().to_string();
    let body = after_prefix(pattern, displayed).graphemes(true);
    for (t, g) in pattern.tokens().iter().zip(body) {
        match t {
            PatternToken::Placeholder(p) => {
                if g == &**p {
                    break;
                }
                buf.push_str(g);
            }
            PatternToken::Literal(_) => {}
        }
    }
    buf
}

/// Raw text with the allowed literals of the pattern inserted.
///
/// ```
/// use rat_textmask::MaskPattern;
/// use rat_textmask::masked_value::mask_op::unmask_with_allowed;
///
/// let p = MaskPattern::new()
///     .with_pattern("A ___ + ___", "_")
///     .expect("pattern");
/// assert_eq!(unmask_with_allowed(&p, &["A", "+"], "123456"), "A123+456");
/// ```
///
/// Returns the raw text if masking is disabled.
pub fn unmask_with_allowed<S: AsRef<str>>(
    pattern: &MaskPattern,
    allowed: &[S],
    raw: &str,
) -> String {
    if !pattern.is_masking_enabled() {
        return raw.to_string();
    }

    let mut buf = pattern.prefix().to_string();
    let mut body = after_prefix(pattern, raw).graphemes(true);
    for t in pattern.tokens() {
        match t {
            PatternToken::Placeholder(_) => {
                if let Some(g) = body.next() {
                    buf.push_str(g);
                }
            }
            PatternToken::Literal(l) => {
                if allowed.iter().any(|a| a.as_ref() == &**l) {
                    buf.push_str(l);
                }
            }
        }
    }
    buf
}

/// Cursor position in the displayed text for the given raw text.
///
/// The cursor is placed at the first empty slot, or at the end
/// if all slots are filled. Literals before that point are skipped.
///
/// Returns None if masking is disabled, the host keeps its own
/// cursor then.
pub fn cursor_offset(pattern: &MaskPattern, raw: &str) -> Option<upos_type> {
    if !pattern.is_masking_enabled() {
        return None;
    }

    let mut offset = pattern.prefix_len();
    let mut body = after_prefix(pattern, raw).graphemes(true);
    for t in pattern.tokens() {
        if t.is_placeholder() {
            if body.next().is_some() {
                offset += 1;
            } else {
                break;
            }
        } else {
            offset += 1;
        }
    }
    Some(offset)
}

/// All slots are filled.
#[inline]
pub fn is_finished(pattern: &MaskPattern, raw: &str) -> bool {
    str_len(raw) == pattern.max_unmasked_len()
}
