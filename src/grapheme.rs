use crate::upos_type;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Length in graphemes.
#[inline]
pub(crate) fn str_len(s: &str) -> upos_type {
    s.graphemes(true).count() as upos_type
}

/// Maps a grapheme range to a byte range.
///
/// Returns None if the range is reversed or extends beyond the text.
pub(crate) fn byte_range(s: &str, range: Range<upos_type>) -> Option<Range<usize>> {
    if range.start > range.end {
        return None;
    }

    let mut start = None;
    let mut end = None;
    let mut pos = 0;
    for (idx, _) in s.grapheme_indices(true) {
        if pos == range.start {
            start = Some(idx);
        }
        if pos == range.end {
            end = Some(idx);
            break;
        }
        pos += 1;
    }
    // position after the last grapheme is valid too.
    if pos == range.start && start.is_none() {
        start = Some(s.len());
    }
    if pos == range.end && end.is_none() {
        end = Some(s.len());
    }

    match (start, end) {
        (Some(start), Some(end)) => Some(start..end),
        _ => None,
    }
}

/// Replace a grapheme range.
///
/// Returns None if the range is not valid for the text.
pub(crate) fn replace_range(s: &str, range: Range<upos_type>, replace: &str) -> Option<String> {
    let bytes = byte_range(s, range)?;
    let mut buf = String::with_capacity(s.len() + replace.len());
    buf.push_str(&s[..bytes.start]);
    buf.push_str(replace);
    buf.push_str(&s[bytes.end..]);
    Some(buf)
}

/// Remove the last grapheme.
pub(crate) fn pop_last(s: &mut String) -> Option<String> {
    let (idx, g) = s.grapheme_indices(true).next_back()?;
    let g = g.to_string();
    s.truncate(idx);
    Some(g)
}
