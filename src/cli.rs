use clap::Parser;
use std::path::PathBuf;

/// cjkcount – count Chinese characters in a text file to gauge LLM token cost
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File to count, or a directory to pick a file from (defaults to CWD)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Comma-separated file-types listed in the picker (extension only, no dot).
    #[arg(
        long,
        value_delimiter = ',',
        value_name = "EXTENSIONS",
        default_value = "txt",
        conflicts_with = "all_files"
    )]
    pub types: Vec<String>,

    /// List every file in the picker regardless of extension
    #[arg(long)]
    pub all_files: bool,

    /// Include files ignored by .gitignore
    #[arg(long)]
    pub include_ignored: bool,

    /// When PATH is a file: also copy the report to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// When PATH is a file: print only the one-line summary
    #[arg(long)]
    pub brief: bool,
}

impl Cli {
    /// Extensions to keep while scanning; empty means no filtering.
    pub fn type_filter(&self) -> Vec<String> {
        if self.all_files {
            Vec::new()
        } else {
            self.types
                .iter()
                .map(|t| t.trim().trim_start_matches('.').to_string())
                .filter(|t| !t.is_empty())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_txt_in_cwd() {
        let cli = Cli::try_parse_from(["cjkcount"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.type_filter(), vec!["txt".to_string()]);
        assert!(!cli.copy && !cli.brief);
    }

    #[test]
    fn parses_type_list() {
        let cli = Cli::try_parse_from(["cjkcount", "docs", "--types", "txt,.md, csv"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("docs"));
        assert_eq!(cli.type_filter(), vec!["txt", "md", "csv"]);
    }

    #[test]
    fn all_files_clears_filter() {
        let cli = Cli::try_parse_from(["cjkcount", "--all-files"]).unwrap();
        assert!(cli.type_filter().is_empty());
    }

    #[test]
    fn all_files_conflicts_with_types() {
        assert!(Cli::try_parse_from(["cjkcount", "--all-files", "--types", "md"]).is_err());
    }
}
