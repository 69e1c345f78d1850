use crate::analyzer::FileStats;
use crate::utils::{approx_tokens, group_thousands};
use std::path::Path;

/// Number of scalars shown in a preview.
pub const PREVIEW_CHARS: usize = 500;

const TOKEN_HINT: &str = "Use these counts to judge the token cost of handing this text to a language model.\n\
Chinese characters usually cost more tokens than English letters.";

/// Full multi-line report, as printed in headless mode and shown in the details panel.
pub fn render_report(path: &Path, stats: &FileStats) -> String {
    let lines = [
        format!("File:     {}", path.display()),
        format!("Encoding: {}", stats.encoding),
        format!("Size:     {}", stats.formatted_size()),
        String::new(),
        "Characters:".to_string(),
        format!("- Total:         {}", group_thousands(stats.total_chars)),
        format!("- Chinese:       {}", group_thousands(stats.chinese_chars)),
        format!("- Chinese share: {}", stats.percentage_display()),
        format!("- Non-Chinese:   {}", group_thousands(stats.non_chinese_chars())),
        format!("- Est. tokens:   ≈ {}", group_thousands(approx_tokens(stats))),
        String::new(),
        TOKEN_HINT.to_string(),
    ];
    let mut report = lines.join("\n");
    report.push('\n');
    report
}

pub fn summary_line(stats: &FileStats) -> String {
    format!(
        "Counted - Chinese: {} / Total: {}",
        group_thousands(stats.chinese_chars),
        group_thousands(stats.total_chars)
    )
}

/// First `limit` scalars of `text`, with a notice appended when anything was cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!(
            "{}\n\n... (truncated, showing the first {limit} characters)",
            &text[..cut]
        ),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{TextEncoding, compute_stats};
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_full_report() {
        let stats = compute_stats("中文abc", 9, TextEncoding::Utf8);
        let report = render_report(Path::new("notes/sample.txt"), &stats);
        let expected = "\
File:     notes/sample.txt
Encoding: utf-8
Size:     9 bytes

Characters:
- Total:         5
- Chinese:       2
- Chinese share: 40.00%
- Non-Chinese:   3
- Est. tokens:   ≈ 3

Use these counts to judge the token cost of handing this text to a language model.
Chinese characters usually cost more tokens than English letters.
";
        assert_eq!(report, expected);
    }

    #[test]
    fn report_groups_large_counts() {
        let text = "中".repeat(12_000);
        let stats = compute_stats(&text, 36_000, TextEncoding::Gbk);
        let report = render_report(Path::new("big.txt"), &stats);
        assert!(report.contains("- Total:         12,000"));
        assert!(report.contains("Size:     35.16 KB"));
        assert!(report.contains("Encoding: gbk"));
    }

    #[test]
    fn summary_line_matches_status_format() {
        let stats = compute_stats("中文abc", 9, TextEncoding::Utf8);
        assert_eq!(summary_line(&stats), "Counted - Chinese: 2 / Total: 5");
    }

    #[test]
    fn short_text_preview_is_untouched() {
        assert_eq!(preview("中文abc", 5), "中文abc");
        assert_eq!(preview("", PREVIEW_CHARS), "");
    }

    #[test]
    fn long_text_preview_is_cut_on_scalars() {
        let text = "中文abc";
        assert_eq!(
            preview(text, 3),
            "中文a\n\n... (truncated, showing the first 3 characters)"
        );
    }
}
