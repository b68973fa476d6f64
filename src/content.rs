//! Line-oriented view over a file's raw bytes.
//!
//! A line is a maximal run of bytes without LF. Its *body* additionally
//! excludes one CR directly before the LF (or before end of content), so
//! CRLF files are handled like LF files. Line and column numbers are
//! 1-based; columns count bytes.

/// One line of a [`FileContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the line's first byte in the content.
    pub start: usize,
    /// Line bytes without CR/LF terminator.
    pub body: &'a [u8],
    /// `b"\n"`, `b"\r\n"`, `b"\r"` (unterminated last line), or empty.
    pub terminator: &'a [u8],
}

/// Immutable byte content of an accepted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileContent<'a> {
    bytes: &'a [u8],
}

impl<'a> FileContent<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Iterate lines in order. Empty content has no lines; content ending in
    /// LF has no empty line after the final terminator.
    pub fn lines(&self) -> Lines<'a> {
        Lines {
            bytes: self.bytes,
            pos: 0,
            number: 0,
        }
    }

    /// True when the content is non-empty and does not end with LF.
    pub fn is_unterminated(&self) -> bool {
        self.bytes.last().is_some_and(|&b| b != b'\n')
    }

    /// Number of the last line (0 for empty content).
    pub fn last_line_number(&self) -> usize {
        let newlines = self.bytes.iter().filter(|&&b| b == b'\n').count();
        newlines + usize::from(self.is_unterminated())
    }
}

/// Iterator returned by [`FileContent::lines`].
pub struct Lines<'a> {
    bytes: &'a [u8],
    pos: usize,
    number: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.bytes[start..];
        let (raw, lf) = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => (&rest[..i], 1),
            None => (rest, 0),
        };
        let body_len = if raw.last() == Some(&b'\r') {
            raw.len() - 1
        } else {
            raw.len()
        };
        let end = start + raw.len() + lf;
        self.pos = end;
        self.number += 1;
        Some(Line {
            number: self.number,
            start,
            body: &self.bytes[start..start + body_len],
            terminator: &self.bytes[start + body_len..end],
        })
    }
}
