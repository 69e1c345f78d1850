//! Character statistics for a single text file.
//!
//! The file is read in one go, decoded by trying a fixed list of encodings
//! in order, and then scanned once to count how many scalars fall in the
//! CJK ranges used for token-cost estimates.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Encodings tried by [`decode`], in priority order.
pub const DECODE_ORDER: [TextEncoding; 4] = [
    TextEncoding::Utf8,
    TextEncoding::Gbk,
    TextEncoding::Gb2312,
    TextEncoding::Utf16,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Gbk,
    Gb2312,
    Utf16,
}

impl TextEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Gbk => "gbk",
            TextEncoding::Gb2312 => "gb2312",
            TextEncoding::Utf16 => "utf-16",
        }
    }

    /// Strictly decodes `bytes`; any malformed sequence yields `None`.
    fn try_decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            // encoding_rs maps the gb2312 label onto its GBK decoder, so both
            // candidates accept the same inputs.
            TextEncoding::Gbk | TextEncoding::Gb2312 => encoding_rs::GBK
                .decode_without_bom_handling_and_without_replacement(bytes)
                .filter(|_| is_two_byte_gbk(bytes))
                .map(|text| text.into_owned()),
            TextEncoding::Utf16 => decode_utf16(bytes),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The encoding_rs GBK decoder is really GB18030: it also takes a lone `0x80`
/// as `€` and four-byte sequences (a lead byte then `0x30..=0x39`). Plain GBK
/// has neither, so both are rejected here. Expects input the decoder accepted.
fn is_two_byte_gbk(bytes: &[u8]) -> bool {
    let mut i = 0;
    while let Some(&byte) = bytes.get(i) {
        match byte {
            0x00..=0x7F => i += 1,
            0x81..=0xFE => {
                if bytes.get(i + 1).is_some_and(|trail| (0x30..=0x39).contains(trail)) {
                    return false;
                }
                i += 2;
            }
            _ => return false,
        }
    }
    true
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (codec, body) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (encoding_rs::UTF_16BE, rest),
        [0xFF, 0xFE, rest @ ..] => (encoding_rs::UTF_16LE, rest),
        _ => (encoding_rs::UTF_16LE, bytes),
    };
    codec
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
}

/// Returned when none of the [`DECODE_ORDER`] encodings accept the input.
#[derive(Debug, Error)]
#[error("unknown encoding (tried {})", tried_list())]
pub struct DecodeError;

fn tried_list() -> String {
    DECODE_ORDER
        .iter()
        .map(|encoding| encoding.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: TextEncoding,
}

pub fn decode(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    DECODE_ORDER
        .iter()
        .find_map(|&encoding| match encoding.try_decode(bytes) {
            Some(text) => Some(Decoded { text, encoding }),
            None => {
                log::debug!("{} bytes are not valid {}", bytes.len(), encoding);
                None
            }
        })
        .ok_or(DecodeError)
}

/// True for scalars in the CJK ideograph, compatibility, punctuation and
/// fullwidth blocks.
pub fn is_chinese(c: char) -> bool {
    matches!(
        u32::from(c),
        0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0xF900..=0xFAFF | 0x3000..=0x303F | 0xFF00..=0xFFEF
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileStats {
    pub total_chars: usize,
    pub chinese_chars: usize,
    pub percentage: f64,
    pub byte_size: u64,
    pub encoding: TextEncoding,
}

impl FileStats {
    pub fn non_chinese_chars(&self) -> usize {
        self.total_chars - self.chinese_chars
    }

    pub fn formatted_size(&self) -> String {
        format_byte_size(self.byte_size)
    }

    pub fn percentage_display(&self) -> String {
        format!("{:.2}%", self.percentage)
    }
}

pub fn compute_stats(text: &str, byte_size: u64, encoding: TextEncoding) -> FileStats {
    let (total_chars, chinese_chars) = text.chars().fold((0, 0), |(total, chinese), c| {
        (total + 1, chinese + usize::from(is_chinese(c)))
    });
    let percentage = if total_chars == 0 {
        0.0
    } else {
        chinese_chars as f64 / total_chars as f64 * 100.0
    };

    FileStats {
        total_chars,
        chinese_chars,
        percentage,
        byte_size,
        encoding,
    }
}

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

pub fn format_byte_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} bytes")
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GIB as f64)
    }
}

/// A decoded file together with its statistics.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
    pub stats: FileStats,
}

pub fn read_document(path: &Path) -> Result<Document, AnalyzeError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => AnalyzeError::NotFound {
            path: path.to_path_buf(),
        },
        _ => AnalyzeError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let Decoded { text, encoding } = decode(&bytes).map_err(|source| AnalyzeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let stats = compute_stats(&text, bytes.len() as u64, encoding);
    log::info!(
        "analyzed {} as {}: {} chars, {} chinese",
        path.display(),
        encoding,
        stats.total_chars,
        stats.chinese_chars
    );

    Ok(Document {
        path: path.to_path_buf(),
        text,
        stats,
    })
}

pub fn analyze_file(path: &Path) -> Result<FileStats, AnalyzeError> {
    read_document(path).map(|document| document.stats)
}
