use crate::analyzer::FileStats;

/// Rough estimate: one token per Chinese scalar, ≈ 4 other chars per token.
pub fn approx_tokens(stats: &FileStats) -> usize {
    stats.chinese_chars + stats.non_chinese_chars().div_ceil(4)
}

/// `12345` -> `"12,345"`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{TextEncoding, compute_stats};

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn token_estimate_weights_chinese_higher() {
        let stats = compute_stats("中文abc", 9, TextEncoding::Utf8);
        assert_eq!(approx_tokens(&stats), 3);

        let latin = compute_stats("abcdefgh", 8, TextEncoding::Utf8);
        assert_eq!(approx_tokens(&latin), 2);

        let empty = compute_stats("", 0, TextEncoding::Utf8);
        assert_eq!(approx_tokens(&empty), 0);
    }
}
