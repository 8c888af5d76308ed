//!
//! The pattern of a masked value.
//!
//! A pattern is a sequence of graphemes. Each grapheme equal to the
//! placeholder is a slot that can be filled with one grapheme of the raw
//! text. Everything else is a literal and is displayed as is.
//!
//! ```
//! use rat_textmask::MaskPattern;
//!
//! let mut p = MaskPattern::new();
//! p.set_pattern(" ___/___/___", "_").expect("valid pattern");
//! p.set_prefix("+68");
//!
//! assert_eq!(p.maximum_prefix(), "+68 ");
//! assert_eq!(p.max_unmasked_len(), 12);
//! ```
//!
use crate::grapheme::str_len;
use crate::{MaskError, upos_type};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use unicode_segmentation::UnicodeSegmentation;

/// One grapheme of the pattern.
#[derive(Clone, PartialEq, Eq)]
pub enum PatternToken {
    /// Slot for one grapheme of the raw text.
    Placeholder(Box<str>),
    /// Literal, always displayed.
    Literal(Box<str>),
}

impl Display for PatternToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatternToken::Placeholder(s) => s,
            PatternToken::Literal(s) => s,
        };
        write!(f, "{}", s)
    }
}

impl Debug for PatternToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PatternToken::Placeholder(s) => write!(f, "[{}]", s),
            PatternToken::Literal(s) => write!(f, "{}", s),
        }
    }
}

impl PatternToken {
    /// Is a slot.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PatternToken::Placeholder(_))
    }

    /// Is a literal.
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, PatternToken::Literal(_))
    }

    /// Display value.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            PatternToken::Placeholder(s) => s.as_ref(),
            PatternToken::Literal(s) => s.as_ref(),
        }
    }
}

/// Pattern, placeholder and prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPattern {
    // pattern as given
    pattern: String,
    // parsed pattern
    tokens: Vec<PatternToken>,
    placeholder: String,
    prefix: String,
}

impl Default for MaskPattern {
    fn default() -> Self {
        Self {
            pattern: Default::default(),
            tokens: Default::default(),
            placeholder: "_".into(),
            prefix: Default::default(),
        }
    }
}

impl MaskPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern with the given placeholder.
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

    /// Changes pattern and placeholder.
    ///
    /// An empty pattern disables masking. A non-empty pattern
    /// needs a placeholder of exactly one grapheme.
    pub fn set_pattern(
        &mut self,
        pattern: impl AsRef<str>,
        placeholder: impl AsRef<str>,
    ) -> Result<(), MaskError> {
        let pattern = pattern.as_ref();
        let placeholder = placeholder.as_ref();

        if !pattern.is_empty() && placeholder.is_empty() {
            return Err(MaskError::MissingPlaceholder);
        }
        if str_len(placeholder) > 1 {
            return Err(MaskError::InvalidPlaceholder(placeholder.to_string()));
        }

        self.tokens = Self::parse_pattern(pattern, placeholder);
        self.pattern = pattern.to_string();
        self.placeholder = placeholder.to_string();
        Ok(())
    }

    fn parse_pattern(pattern: &str, placeholder: &str) -> Vec<PatternToken> {
        pattern
            .graphemes(true)
            .map(|g| {
                if g == placeholder {
                    PatternToken::Placeholder(Box::from(g))
                } else {
                    PatternToken::Literal(Box::from(g))
                }
            })
            .collect()
    }

    /// Pattern as given.
    #[inline]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Parsed pattern.
    #[inline]
    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    /// Placeholder.
    #[inline]
    pub fn placeholder(&self) -> &str {
        self.placeholder.as_str()
    }

    /// Changes the prefix.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// Prefix. Always at the start of the raw text.
    #[inline]
    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Prefix length in graphemes.
    #[inline]
    pub fn prefix_len(&self) -> upos_type {
        str_len(&self.prefix)
    }

    /// Masking is active.
    #[inline]
    pub fn is_masking_enabled(&self) -> bool {
        !self.pattern.is_empty() && !self.placeholder.is_empty()
    }

    /// The prefix followed by all literals of the pattern up to the
    /// first placeholder. This part of the displayed text can't be edited.
    pub fn maximum_prefix(&self) -> String {
        let mut buf = self.prefix.clone();
        for t in self.tokens.iter() {
            match t {
                PatternToken::Placeholder(_) => break,
                PatternToken::Literal(s) => buf.push_str(s),
            }
        }
        buf
    }

    /// Number of slots.
    pub fn slot_count(&self) -> upos_type {
        self.tokens.iter().filter(|t| t.is_placeholder()).count() as upos_type
    }

    /// Maximum length of the raw text, prefix included.
    pub fn max_unmasked_len(&self) -> upos_type {
        self.prefix_len() + self.slot_count()
    }

    /// Length of the displayed text.
    pub fn display_len(&self) -> upos_type {
        self.prefix_len() + self.tokens.len() as upos_type
    }
}
