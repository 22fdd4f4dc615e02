//! Character-based length helpers.
//!
//! All limits in this crate count `char`s, never bytes, so truncation can
//! never split a UTF-8 sequence.

use std::borrow::Cow;

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Prefix of at most `max` characters.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to `max` characters, ending with `suffix` when it fits.
pub(crate) fn truncate_with_suffix(s: &str, max: usize, suffix: &str) -> String {
    if char_len(s) <= max {
        return s.to_string();
    }
    let suffix_len = char_len(suffix);
    if max > suffix_len {
        let mut out = truncate_chars(s, max - suffix_len).to_string();
        out.push_str(suffix);
        out
    } else {
        truncate_chars(s, max).to_string()
    }
}

/// Whether `s` has a run of `min_run` or more identical characters.
pub(crate) fn has_repeat_run(s: &str, min_run: usize) -> bool {
    let mut prev = None;
    let mut run = 0usize;
    for c in s.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run >= min_run {
            return true;
        }
    }
    false
}

/// Replace every run of `min_run` or more identical characters with `marker`.
pub(crate) fn collapse_repeats<'a>(s: &'a str, min_run: usize, marker: &str) -> Cow<'a, str> {
    let mut out = String::new();
    let mut copied = 0;
    let mut iter = s.char_indices().peekable();

    while let Some((start, c)) = iter.next() {
        let mut end = start + c.len_utf8();
        let mut run = 1;
        while let Some(&(idx, next)) = iter.peek() {
            if next != c {
                break;
            }
            end = idx + next.len_utf8();
            run += 1;
            iter.next();
        }
        if run >= min_run {
            out.push_str(&s[copied..start]);
            out.push_str(marker);
            copied = end;
        }
    }

    if copied == 0 {
        return Cow::Borrowed(s);
    }
    out.push_str(&s[copied..]);
    Cow::Owned(out)
}
