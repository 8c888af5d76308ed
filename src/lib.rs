#![doc = include_str!("../readme.md")]
#![allow(clippy::uninlined_format_args)]
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod bulk_replace;
pub mod mask_pattern;
pub mod masked_field;
pub mod masked_value;

mod grapheme;

pub use bulk_replace::{BulkReplace, ContentType};
pub use mask_pattern::{MaskPattern, PatternToken};
pub use masked_field::{FieldDelegate, MaskedFieldState};
pub use masked_value::{MaskConfig, MaskedValue};

pub mod event {
    //!
    //! Result of edit-handling.
    //!

    /// Result of event handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum TextOutcome {
        /// The given event has not been used at all.
        Continue,
        /// The event has been recognized, but the result was nil.
        /// The edit was rejected and the host buffer stays as it is.
        Unchanged,
        /// The event has been recognized and there is some change
        /// due to it. Only the cursor moved.
        Changed,
        /// Text content has changed.
        TextChanged,
    }

    impl TextOutcome {
        /// The event has been used in some way.
        pub fn is_consumed(&self) -> bool {
            *self != TextOutcome::Continue
        }
    }

    // Useful for converting most navigation/edit results.
    impl From<bool> for TextOutcome {
        fn from(value: bool) -> Self {
            if value {
                TextOutcome::Changed
            } else {
                TextOutcome::Unchanged
            }
        }
    }
}

/// Configuration errors.
///
/// Editing never fails, a rejected edit is reported as `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// A non-empty pattern was set without a placeholder.
    /// Masking can't be enabled that way.
    MissingPlaceholder,
    /// The placeholder must be exactly one grapheme.
    InvalidPlaceholder(String),
    /// The field already has an edit authority. Only
    /// observers can be attached as delegate.
    EditAuthorityTaken,
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MaskError {}

/// Column type. Counts graphemes.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
