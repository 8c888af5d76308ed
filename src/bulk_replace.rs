//!
//! Conversion of pasted text.
//!
//! Any edit that inserts more than one grapheme at once bypasses
//! the slot-by-slot editing. The whole text is used as the new raw
//! text instead. A [BulkReplace] can be attached to the value to
//! convert the text before that happens.
//!

use dyn_clone::{DynClone, clone_box};
use std::fmt::Debug;
use unicode_segmentation::UnicodeSegmentation;

/// Kind of content expected in a field.
///
/// This is just a hint that is passed on to the [BulkReplace].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentType {
    TelephoneNumber,
    CreditCardNumber,
    PostalCode,
    OneTimeCode,
    Other(String),
}

/// Converts pasted text to raw text.
pub trait BulkReplace: DynClone + Debug {
    /// Returns the raw text for the pasted text.
    ///
    /// None uses the pasted text as is.
    fn replaced_text(&self, text: &str, content_type: Option<&ContentType>) -> Option<String>;
}

/// Keeps only ascii digits.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepDigits;

impl KeepDigits {
    pub fn new() -> Self {
        Self
    }
}

impl BulkReplace for KeepDigits {
    fn replaced_text(&self, text: &str, _content_type: Option<&ContentType>) -> Option<String> {
        Some(text.chars().filter(|c| c.is_ascii_digit()).collect())
    }
}

/// Removes the given graphemes.
#[derive(Debug, Default, Clone)]
pub struct StripChars {
    strip: Vec<String>,
}

impl StripChars {
    pub fn new<S: Into<String>>(strip: impl IntoIterator<Item = S>) -> Self {
        Self {
            strip: strip.into_iter().map(|v| v.into()).collect(),
        }
    }
}

impl BulkReplace for StripChars {
    fn replaced_text(&self, text: &str, _content_type: Option<&ContentType>) -> Option<String> {
        if self.strip.is_empty() {
            return None;
        }
        Some(
            text.graphemes(true)
                .filter(|g| !self.strip.iter().any(|s| s == g))
                .collect(),
        )
    }
}

impl Clone for Box<dyn BulkReplace> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

impl BulkReplace for Box<dyn BulkReplace> {
    fn replaced_text(&self, text: &str, content_type: Option<&ContentType>) -> Option<String> {
        self.as_ref().replaced_text(text, content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_digits() {
        let r = KeepDigits::new();
        assert_eq!(r.replaced_text("111-222 333", None), Some("111222333".into()));
        assert_eq!(r.replaced_text("abc", None), Some("".into()));
    }

    #[test]
    fn test_strip_chars() {
        let r = StripChars::new(["-", " "]);
        assert_eq!(
            r.replaced_text("111-222 333", Some(&ContentType::TelephoneNumber)),
            Some("111222333".into())
        );
        let r = StripChars::new(Vec::<String>::new());
        assert_eq!(r.replaced_text("1-1", None), None);
    }

    #[test]
    fn test_boxed() {
        let r: Box<dyn BulkReplace> = Box::new(StripChars::new(["/"]));
        let r2 = r.clone();
        assert_eq!(r2.replaced_text("1/2", None), Some("12".into()));
    }
}
