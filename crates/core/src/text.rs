//! Text display helpers.

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
///
/// Strings longer than `max` keep their first `max - 1` characters followed
/// by `...`; shorter ones are returned unchanged. Counts Unicode scalar
/// values, so a multi-byte character is never split.
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push_str("...");
    out
}
