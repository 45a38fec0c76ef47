//! Shared utility functions

use unicode_width::UnicodeWidthChar;

/// Fit a string into at most `max_cols` terminal columns.
///
/// Width is measured in display columns, not bytes or chars, so CJK and
/// other wide characters count as 2. When the string is cut, the last
/// column is spent on an ellipsis.
///
/// # Examples
///
/// ```
/// use photofall::util::fit_width;
///
/// assert_eq!(fit_width("hello", 10), "hello");
/// assert_eq!(fit_width("hello world", 8), "hello w…");
/// ```
pub fn fit_width(s: &str, max_cols: usize) -> String {
    let total: usize = s.chars().filter_map(|c| c.width()).sum();
    if total <= max_cols {
        return s.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }

    // Reserve one column for the ellipsis
    let budget = max_cols - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Pad or cut a string to exactly `cols` columns (left-aligned).
///
/// Card rows are column-aligned, so fields narrower than their slot get
/// trailing spaces and wider ones go through fit_width.
pub fn pad_to_width(s: &str, cols: usize) -> String {
    let fitted = fit_width(s, cols);
    let width: usize = fitted.chars().filter_map(|c| c.width()).sum();
    let mut out = fitted;
    for _ in width..cols {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_fit_shorter_than_max() {
        assert_eq!(fit_width("hello", 10), "hello");
        assert_eq!(fit_width("hello", 5), "hello"); // exact fit, no ellipsis
    }

    #[test]
    fn test_fit_cuts_with_ellipsis() {
        assert_eq!(fit_width("hello world", 8), "hello w…");
        assert_eq!(fit_width("hello world", 8).width(), 8);
    }

    #[test]
    fn test_fit_counts_wide_chars_as_two() {
        // Each CJK char is 2 columns; 6 columns total
        assert_eq!(fit_width("日本語", 6), "日本語");
        // 5 columns: "日本" (4) + ellipsis (1); "語" doesn't fit the 4-col budget
        assert_eq!(fit_width("日本語", 5), "日本…");
        assert!(fit_width("日本語", 5).width() <= 5);
    }

    #[test]
    fn test_fit_zero_and_tiny_budgets() {
        assert_eq!(fit_width("hello", 0), "");
        assert_eq!(fit_width("hello", 1), "…");
    }

    #[test]
    fn test_pad_fills_to_exact_width() {
        assert_eq!(pad_to_width("ab", 5), "ab   ");
        assert_eq!(pad_to_width("abcdef", 5), "abcd…");
        assert_eq!(pad_to_width("ab", 5).width(), 5);
    }
}
