//!
//! Raw value of a masked field.
//!
//! [MaskedValue] owns the raw text and derives everything else
//! from it and the [MaskPattern].
//!
//! * The raw text always starts with the prefix.
//! * The displayed text is rendered from the raw text on demand.
//! * The cursor is placed at the first empty slot.
//!
//! ```
//! use rat_textmask::MaskedValue;
//!
//! let mut v = MaskedValue::new()
//!     .with_pattern(" ___/___/___", "_")
//!     .expect("valid pattern")
//!     .with_prefix("+68")
//!     .with_allowed_characters(["/"]);
//!
//! v.set_raw_text("111/222/333");
//! assert_eq!(v.raw_text(), "+68111222333");
//! assert_eq!(v.text(), "+68 111/222/333");
//! assert_eq!(v.unmasked_with_allowed_characters(), "+68111/222/333");
//! assert!(v.is_finished());
//! ```
//!
use crate::_private::NonExhaustive;
use crate::bulk_replace::{BulkReplace, ContentType};
use crate::mask_pattern::MaskPattern;
use crate::{MaskError, upos_type};
use log::{debug, trace};
use std::ops::Range;

pub mod edit_op;
pub mod mask_op;

/// Configuration for a [MaskedValue].
///
/// Construct with `..Default::default()`.
#[derive(Debug, Clone)]
pub struct MaskConfig {
    /// Pattern. Empty disables masking.
    pub pattern: String,
    /// Placeholder in the pattern. Defaults to `_`.
    pub placeholder: String,
    /// Fixed start of the raw text.
    pub prefix: String,
    /// Literals of the pattern that are kept for
    /// [MaskedValue::unmasked_with_allowed_characters].
    /// They are removed when setting the raw text.
    pub allowed_characters: Vec<String>,
    /// Hint for pasted text.
    pub content_type: Option<ContentType>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            pattern: Default::default(),
            placeholder: "_".into(),
            prefix: Default::default(),
            allowed_characters: Default::default(),
            content_type: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

/// Raw text and mask.
#[derive(Debug, Clone, Default)]
pub struct MaskedValue {
    pattern: MaskPattern,
    allowed: Vec<String>,
    // raw text, starts with the prefix.
    raw: String,

    content_type: Option<ContentType>,
    bulk: Option<Box<dyn BulkReplace>>,
}

impl MaskedValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// New value with the given configuration.
    pub fn with_config(mut self, config: MaskConfig) -> Result<Self, MaskError> {
        self.set_config(config)?;
        Ok(self)
    }

    /// Pattern and placeholder.
    pub fn with_pattern(
        mut self,
        pattern: impl AsRef<str>,
        placeholder: impl AsRef<str>,
    ) -> Result<Self, MaskError> {
        self.set_pattern(pattern, placeholder)?;
        Ok(self)
    }

    /// Prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    /// Allowed characters.
    pub fn with_allowed_characters<S: Into<String>>(
        mut self,
        allowed: impl IntoIterator<Item = S>,
    ) -> Self {
        self.set_allowed_characters(allowed);
        self
    }

    /// Converter for pasted text.
    pub fn with_bulk_replace(mut self, bulk: impl BulkReplace + 'static) -> Self {
        self.set_bulk_replace(Some(bulk));
        self
    }

    /// Applies the configuration.
    ///
    /// Resets the raw text to the prefix. Nothing is changed if
    /// the pattern is invalid.
    pub fn set_config(&mut self, config: MaskConfig) -> Result<(), MaskError> {
        let mut pattern = MaskPattern::new();
        pattern.set_pattern(config.pattern, config.placeholder)?;
        pattern.set_prefix(config.prefix);

        self.pattern = pattern;
        self.allowed = config.allowed_characters;
        self.content_type = config.content_type;
        self.reset();
        Ok(())
    }

    /// Changes pattern and placeholder.
    ///
    /// Resets the raw text to the prefix.
    pub fn set_pattern(
        &mut self,
        pattern: impl AsRef<str>,
        placeholder: impl AsRef<str>,
    ) -> Result<(), MaskError> {
        self.pattern.set_pattern(pattern, placeholder)?;
        self.reset();
        Ok(())
    }

    /// Changes the prefix.
    ///
    /// Resets the raw text to the prefix.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.pattern.set_prefix(prefix);
        self.reset();
    }

    /// Literals of the pattern that are kept for
    /// [unmasked_with_allowed_characters](MaskedValue::unmasked_with_allowed_characters).
    ///
    /// Doesn't change the current raw text.
    pub fn set_allowed_characters<S: Into<String>>(
        &mut self,
        allowed: impl IntoIterator<Item = S>,
    ) {
        self.allowed = allowed.into_iter().map(|v| v.into()).collect();
    }

    /// Allowed characters.
    pub fn allowed_characters(&self) -> &[String] {
        &self.allowed
    }

    /// Pattern.
    #[inline]
    pub fn pattern(&self) -> &MaskPattern {
        &self.pattern
    }

    /// Prefix.
    #[inline]
    pub fn prefix(&self) -> &str {
        self.pattern.prefix()
    }

    /// Masking is active.
    #[inline]
    pub fn is_masking_enabled(&self) -> bool {
        self.pattern.is_masking_enabled()
    }

    /// Prefix and all literals up to the first slot.
    pub fn maximum_prefix(&self) -> String {
        self.pattern.maximum_prefix()
    }

    /// Maximum length of the raw text, prefix included.
    pub fn max_unmasked_len(&self) -> upos_type {
        self.pattern.max_unmasked_len()
    }

    /// Set the hint for pasted text.
    pub fn set_content_type(&mut self, content_type: Option<ContentType>) {
        self.content_type = content_type;
    }

    /// Hint for pasted text.
    pub fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }

    /// Converter for pasted text.
    pub fn set_bulk_replace(&mut self, bulk: Option<impl BulkReplace + 'static>) {
        match bulk {
            None => self.bulk = None,
            Some(v) => self.bulk = Some(Box::new(v)),
        }
    }

    /// Converter for pasted text.
    pub fn bulk_replace(&self) -> Option<&dyn BulkReplace> {
        match &self.bulk {
            None => None,
            Some(v) => Some(v.as_ref()),
        }
    }
}

impl MaskedValue {
    /// Resets the raw text to the prefix.
    pub fn reset(&mut self) {
        debug!("reset to prefix {:?}", self.pattern.prefix());
        self.raw = self.pattern.prefix().to_string();
    }

    /// Raw text. Starts with the prefix.
    ///
    /// With masking disabled this is the displayed text.
    #[inline]
    pub fn raw_text(&self) -> &str {
        self.raw.as_str()
    }

    /// Sets the raw text.
    ///
    /// All allowed characters are removed from the text after the
    /// prefix, and the prefix is added if it's missing.
    ///
    /// With masking disabled the text is used as displayed text too.
    pub fn set_raw_text(&mut self, text: impl AsRef<str>) {
        self.raw = mask_op::clean_raw(&self.pattern, &self.allowed, text.as_ref());
        trace!("set_raw_text {:?} -> {:?}", self.raw, self.text());
    }

    /// Displayed text.
    pub fn text(&self) -> String {
        mask_op::render(&self.pattern, &self.raw)
    }

    /// Raw text with the allowed characters inserted.
    pub fn unmasked_with_allowed_characters(&self) -> String {
        mask_op::unmask_with_allowed(&self.pattern, &self.allowed, &self.raw)
    }

    /// All slots are filled.
    pub fn is_finished(&self) -> bool {
        mask_op::is_finished(&self.pattern, &self.raw)
    }

    /// Cursor position in the displayed text.
    ///
    /// None if masking is disabled.
    pub fn cursor(&self) -> Option<upos_type> {
        mask_op::cursor_offset(&self.pattern, &self.raw)
    }

    /// Displayed text for any raw text.
    pub fn render(&self, raw: &str) -> String {
        mask_op::render(&self.pattern, raw)
    }

    /// Raw text for any displayed text.
    pub fn unmask(&self, displayed: &str) -> String {
        mask_op::unmask(&self.pattern, displayed)
    }

    /// Cursor position for any raw text.
    pub fn cursor_offset(&self, raw: &str) -> Option<upos_type> {
        mask_op::cursor_offset(&self.pattern, raw)
    }

    /// Checks an edit of the displayed text and
    /// updates the raw text accordingly.
    ///
    /// See [edit_op::propose_edit].
    pub fn propose_edit(
        &mut self,
        displayed: &str,
        range: Range<upos_type>,
        replace: &str,
    ) -> bool {
        edit_op::propose_edit(self, displayed, range, replace)
    }
}
