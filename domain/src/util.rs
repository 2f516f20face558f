//! Shared utility functions.

/// Return the first `max_chars` characters of `s`.
///
/// Counts Unicode scalar values, so multi-byte characters are never split.
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
