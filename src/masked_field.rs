//!
//! Host side of a masked field.
//!
//! [MaskedFieldState] keeps the text buffer and cursor a host widget
//! would show and routes every edit through the [MaskedValue].
//!
//! ```
//! use rat_textmask::MaskedFieldState;
//! use rat_textmask::event::TextOutcome;
//!
//! let mut state = MaskedFieldState::new()
//!     .with_pattern(" ___/___/___", "_")
//!     .expect("valid pattern")
//!     .with_prefix("+68");
//!
//! assert_eq!(state.text(), "+68 ___/___/___");
//! assert_eq!(state.insert_char('1'), TextOutcome::TextChanged);
//! assert_eq!(state.text(), "+68 1__/___/___");
//! assert_eq!(state.cursor(), 5);
//! ```
//!
use crate::_private::NonExhaustive;
use crate::bulk_replace::{BulkReplace, ContentType};
use crate::event::TextOutcome;
use crate::grapheme::{replace_range, str_len};
use crate::masked_value::{MaskConfig, MaskedValue};
use crate::{MaskError, upos_type};
use dyn_clone::{DynClone, clone_box};
use log::debug;
use std::fmt::Debug;
use std::ops::Range;

/// Observer for a [MaskedFieldState].
pub trait FieldDelegate: DynClone + Debug {
    /// The value has changed. Derived texts should be read again.
    fn value_changed(&mut self, value: &MaskedValue);

    /// The delegate wants to accept or reject edits itself.
    ///
    /// A masked field can't share this, such a delegate
    /// is refused.
    fn claims_edit_authority(&self) -> bool {
        false
    }
}

impl Clone for Box<dyn FieldDelegate> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

/// State of a masked field.
#[derive(Debug, Clone)]
pub struct MaskedFieldState {
    // editing core. changes go through the state to keep
    // the host buffer and the delegate in sync.
    value: MaskedValue,

    // displayed text as the host shows it.
    text: String,
    // host cursor
    cursor: upos_type,
    delegate: Option<Box<dyn FieldDelegate>>,

    /// Construct with `..Default::default()`
    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskedFieldState {
    fn default() -> Self {
        Self {
            value: Default::default(),
            text: Default::default(),
            cursor: 0,
            delegate: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl MaskedFieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// New field with the given configuration.
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
        self.value.set_allowed_characters(allowed);
        self
    }

    /// Converter for pasted text.
    pub fn with_bulk_replace(mut self, bulk: impl BulkReplace + 'static) -> Self {
        self.value.set_bulk_replace(Some(bulk));
        self
    }

    /// Applies the configuration and resets the value.
    pub fn set_config(&mut self, config: MaskConfig) -> Result<(), MaskError> {
        self.value.set_config(config)?;
        self.value_changed();
        Ok(())
    }

    /// Changes pattern and placeholder and resets the value.
    pub fn set_pattern(
        &mut self,
        pattern: impl AsRef<str>,
        placeholder: impl AsRef<str>,
    ) -> Result<(), MaskError> {
        self.value.set_pattern(pattern, placeholder)?;
        self.value_changed();
        Ok(())
    }

    /// Changes the prefix and resets the value.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.value.set_prefix(prefix);
        self.value_changed();
    }

    /// Hint for pasted text.
    pub fn set_content_type(&mut self, content_type: Option<ContentType>) {
        self.value.set_content_type(content_type);
    }

    /// Literals that are kept for
    /// [unmasked_with_allowed_characters](MaskedFieldState::unmasked_with_allowed_characters).
    pub fn set_allowed_characters<S: Into<String>>(
        &mut self,
        allowed: impl IntoIterator<Item = S>,
    ) {
        self.value.set_allowed_characters(allowed);
    }

    /// Converter for pasted text.
    pub fn set_bulk_replace(&mut self, bulk: Option<impl BulkReplace + 'static>) {
        self.value.set_bulk_replace(bulk);
    }

    /// Attach an observer.
    ///
    /// Fails if the delegate wants to decide about edits itself.
    /// The previous delegate stays in place then.
    pub fn set_delegate(
        &mut self,
        delegate: Option<impl FieldDelegate + 'static>,
    ) -> Result<(), MaskError> {
        match delegate {
            None => self.delegate = None,
            Some(v) => {
                if v.claims_edit_authority() {
                    return Err(MaskError::EditAuthorityTaken);
                }
                self.delegate = Some(Box::new(v));
            }
        }
        Ok(())
    }

    /// Current observer.
    pub fn delegate(&self) -> Option<&dyn FieldDelegate> {
        match &self.delegate {
            None => None,
            Some(v) => Some(v.as_ref()),
        }
    }
}

impl MaskedFieldState {
    /// Editing core.
    ///
    /// Read only, all changes go through the state.
    #[inline]
    pub fn value(&self) -> &MaskedValue {
        &self.value
    }

    /// Displayed text.
    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Length of the displayed text in graphemes.
    pub fn len(&self) -> upos_type {
        str_len(&self.text)
    }

    /// Displayed text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Raw text.
    pub fn raw_text(&self) -> &str {
        self.value.raw_text()
    }

    /// Sets the raw text. Allowed characters are removed.
    pub fn set_raw_text(&mut self, text: impl AsRef<str>) {
        self.value.set_raw_text(text);
        self.value_changed();
    }

    /// Raw text with the allowed characters of the pattern.
    pub fn unmasked_with_allowed_characters(&self) -> String {
        self.value.unmasked_with_allowed_characters()
    }

    /// All slots are filled.
    pub fn is_finished(&self) -> bool {
        self.value.is_finished()
    }

    /// Cursor position.
    #[inline]
    pub fn cursor(&self) -> upos_type {
        self.cursor
    }

    /// Set the cursor position.
    ///
    /// With masking active the cursor always snaps back to
    /// the first empty slot.
    ///
    /// Returns true if the cursor moved.
    pub fn set_cursor(&mut self, cursor: upos_type) -> bool {
        let old_cursor = self.cursor;
        self.cursor = match self.value.cursor() {
            Some(c) => c,
            None => cursor.min(self.len()),
        };
        old_cursor != self.cursor
    }

    /// The field got the focus.
    pub fn focus_gained(&mut self) -> TextOutcome {
        self.sync();
        TextOutcome::Changed
    }
}

impl MaskedFieldState {
    /// Replace a range of the displayed text.
    ///
    /// The edit is checked by the [MaskedValue]. If accepted,
    /// the displayed text is rendered anew and the cursor is reset.
    pub fn handle_edit(&mut self, range: Range<upos_type>, replace: &str) -> TextOutcome {
        if !self.value.propose_edit(&self.text, range.clone(), replace) {
            return TextOutcome::Unchanged;
        }

        // the host applies the edit. a paste may have a range that
        // doesn't fit, the rendered text replaces it anyway.
        if let Some(text) = replace_range(&self.text, range.clone(), replace) {
            self.text = text;
            self.cursor = range.start + str_len(replace);
        }
        self.value_changed();
        TextOutcome::TextChanged
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) -> TextOutcome {
        let mut buf = [0u8; 4];
        let cursor = self.cursor;
        self.handle_edit(cursor..cursor, c.encode_utf8(&mut buf))
    }

    /// Insert text at the cursor.
    pub fn insert_str(&mut self, s: &str) -> TextOutcome {
        let cursor = self.cursor;
        self.handle_edit(cursor..cursor, s)
    }

    /// Paste text at the cursor.
    pub fn paste(&mut self, s: &str) -> TextOutcome {
        self.insert_str(s)
    }

    /// Delete the char before the cursor.
    pub fn delete_prev_char(&mut self) -> TextOutcome {
        if self.cursor == 0 {
            return TextOutcome::Unchanged;
        }
        let cursor = self.cursor;
        self.handle_edit(cursor - 1..cursor, "")
    }

    /// Delete a range of the displayed text.
    pub fn delete_range(&mut self, range: Range<upos_type>) -> TextOutcome {
        if range.is_empty() {
            return TextOutcome::Unchanged;
        }
        self.handle_edit(range, "")
    }

    /// Renders the displayed text and resets the cursor.
    fn sync(&mut self) {
        self.text = self.value.text();
        if let Some(cursor) = self.value.cursor() {
            self.cursor = cursor;
        } else {
            self.cursor = self.cursor.min(str_len(&self.text));
        }
    }

    fn value_changed(&mut self) {
        self.sync();
        debug!("value changed {:?} cursor {}", self.text, self.cursor);
        if let Some(delegate) = &mut self.delegate {
            delegate.value_changed(&self.value);
        }
    }
}
