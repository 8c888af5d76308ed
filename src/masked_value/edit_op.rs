//!
//! Accepts or rejects edits of the displayed text.
//!
//! The host reports every edit before applying it to its own buffer.
//! The raw text is updated here and the host re-renders afterwards.
//!
use crate::grapheme::{pop_last, replace_range, str_len};
use crate::masked_value::{MaskedValue, mask_op};
use crate::upos_type;
use log::debug;
use std::ops::Range;

/// Checks an edit of the displayed text and updates the raw text.
///
/// * More than one grapheme is a paste. The text is converted by the
///   [BulkReplace](crate::BulkReplace) if there is one and replaces the
///   raw text. The prefix is added if it's missing. Always accepted.
/// * A single grapheme is appended to the raw text, if there is an
///   empty slot left. If there is none, the edit is still accepted but
///   the raw text doesn't change.
/// * An empty replacement removes the last grapheme of the raw text.
///   The position of the deletion doesn't matter, but the prefix is
///   never removed.
///
/// Any single grapheme edit that would change the prefix or the
/// literals before the first slot is rejected.
///
/// With masking disabled every edit with a valid range is accepted
/// and the result is used as raw text.
///
/// Returns true if the host should apply the edit.
pub fn propose_edit(
    value: &mut MaskedValue,
    displayed: &str,
    range: Range<upos_type>,
    replace: &str,
) -> bool {
    if !value.pattern.is_masking_enabled() {
        return match replace_range(displayed, range.clone(), replace) {
            Some(text) => {
                value.raw = text;
                true
            }
            None => {
                debug!("edit rejected: range {:?} out of bounds", range);
                false
            }
        };
    }

    if str_len(replace) > 1 {
        let text = match &value.bulk {
            Some(bulk) => bulk.replaced_text(replace, value.content_type.as_ref()),
            None => None,
        }
        .unwrap_or_else(|| replace.to_string());
        value.raw = mask_op::ensure_prefix(&value.pattern, text);
        debug!("bulk edit: raw {:?}", value.raw);
        return true;
    }

    let Some(text) = replace_range(displayed, range.clone(), replace) else {
        debug!("edit rejected: range {:?} out of bounds", range);
        return false;
    };
    if !text.starts_with(&value.pattern.maximum_prefix()) {
        debug!("edit rejected: touches prefix {:?}", text);
        return false;
    }

    if replace.is_empty() {
        if value.raw.len() > value.pattern.prefix().len() {
            pop_last(&mut value.raw);
        }
    } else if str_len(&value.raw) < value.pattern.max_unmasked_len() {
        value.raw.push_str(replace);
    } else {
        debug!("edit ignored: all slots filled");
    }
    true
}
