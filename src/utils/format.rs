//! Human-readable number formatting for progress output.

/// Group digits with `,` separators.
///
/// # Examples
///
/// - `group_digits(999)` -> `"999"`
/// - `group_digits(1234567)` -> `"1,234,567"`
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Signed percentage change from `before` to `after`, one decimal place.
///
/// Returns `None` when `before` is zero (no meaningful ratio).
#[allow(clippy::cast_precision_loss)]
pub fn percent_change(before: u64, after: u64) -> Option<String> {
    if before == 0 {
        return None;
    }
    let pct = (after as f64 - before as f64) / before as f64 * 100.0;
    Some(format!("{pct:+.1}%"))
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(1, "file")` -> `"1 file"`
/// - `plural_count(3, "file")` -> `"3 files"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
