//! Text/binary classification from a bounded byte sample.
//!
//! Classification works on raw bytes and never decodes, so any encoding
//! whose text uses only printable bytes plus tab/LF/CR is accepted. Only the
//! first [`SAMPLE_CAP`] bytes are read; a binary marker past the sample is
//! not detected.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Maximum number of bytes sampled from the start of a file.
pub const SAMPLE_CAP: usize = 32 * 1024;

/// Why a readable file was not treated as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectReason {
    NullByte,
    ControlCharacters,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::NullByte => "null byte",
            RejectReason::ControlCharacters => "binary or control characters",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    Rejected(RejectReason),
    /// The path could not be opened or read. Dropped silently by callers.
    Unreadable,
}

/// Control bytes that mark a sample as binary. Tab, LF, and CR are allowed.
fn is_disallowed_control(b: u8) -> bool {
    matches!(b, 0x01..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F | 0x7F)
}

/// Classify an in-memory sample. Bytes past [`SAMPLE_CAP`] are ignored.
///
/// A null byte anywhere in the sample wins over other control bytes.
pub fn classify_sample(sample: &[u8]) -> Classification {
    let sample = &sample[..sample.len().min(SAMPLE_CAP)];
    let mut control = false;
    for &b in sample {
        if b == 0 {
            return Classification::Rejected(RejectReason::NullByte);
        }
        control |= is_disallowed_control(b);
    }
    if control {
        Classification::Rejected(RejectReason::ControlCharacters)
    } else {
        Classification::Accepted
    }
}

/// Read up to [`SAMPLE_CAP`] bytes from `path` and classify them.
pub fn classify(path: &Path) -> Classification {
    let Ok(file) = File::open(path) else {
        return Classification::Unreadable;
    };
    let mut sample = Vec::with_capacity(SAMPLE_CAP);
    match file.take(SAMPLE_CAP as u64).read_to_end(&mut sample) {
        Ok(_) => classify_sample(&sample),
        Err(_) => Classification::Unreadable,
    }
}
