use super::{Finding, Rule};
use crate::content::FileContent;
use std::borrow::Cow;

/// TL001: non-empty content ends with exactly one terminator and no
/// trailing blank lines.
///
/// A blank line is one with an empty body. Line bodies are never changed,
/// only trailing blank lines and the last line's terminator.
pub struct FinalNewline;

/// Content with trailing blank lines removed and the last line terminated.
///
/// A lone CR terminator becomes CRLF; a missing one becomes LF. Content made
/// only of blank lines normalizes to empty.
fn normalize(content: FileContent<'_>) -> Cow<'_, [u8]> {
    let bytes = content.bytes();
    let Some(last) = content.lines().filter(|l| !l.body.is_empty()).last() else {
        return if bytes.is_empty() {
            Cow::Borrowed(bytes)
        } else {
            Cow::Owned(Vec::new())
        };
    };
    let body_end = last.start + last.body.len();
    let terminator: &[u8] = match last.terminator {
        b"\n" | b"\r\n" => last.terminator,
        b"\r" => b"\r\n",
        _ => b"\n",
    };
    if terminator == last.terminator && body_end + terminator.len() == bytes.len() {
        return Cow::Borrowed(bytes);
    }
    let mut out = Vec::with_capacity(body_end + terminator.len());
    out.extend_from_slice(&bytes[..body_end]);
    out.extend_from_slice(terminator);
    Cow::Owned(out)
}

impl Rule for FinalNewline {
    fn id(&self) -> &'static str {
        "TL001"
    }

    fn description(&self) -> &'static str {
        "files must end with exactly one newline"
    }

    fn check(&self, content: FileContent<'_>) -> Vec<Finding> {
        if matches!(normalize(content), Cow::Borrowed(_)) {
            return Vec::new();
        }
        vec![Finding {
            line: content.last_line_number(),
            column: 1,
            message: "file must end with exactly one newline".to_string(),
        }]
    }

    fn fix<'a>(&self, content: FileContent<'a>) -> Cow<'a, [u8]> {
        normalize(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(bytes: &[u8]) -> Vec<(usize, usize)> {
        FinalNewline
            .check(FileContent::new(bytes))
            .into_iter()
            .map(|f| (f.line, f.column))
            .collect()
    }

    fn fix(bytes: &[u8]) -> Vec<u8> {
        FinalNewline.fix(FileContent::new(bytes)).into_owned()
    }

    #[test]
    fn test_empty_file_has_no_issue() {
        assert!(check(b"").is_empty());
        assert_eq!(fix(b""), b"");
    }

    #[test]
    fn test_single_newline_is_clean() {
        assert!(check(b"a\n").is_empty());
        assert!(check(b"a\r\nb\r\n").is_empty());
        assert!(matches!(
            FinalNewline.fix(FileContent::new(b"a\nb\n")),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_missing_newline() {
        assert_eq!(check(b"a"), vec![(1, 1)]);
        assert_eq!(check(b"a\nb"), vec![(2, 1)]);
        assert_eq!(fix(b"a\nb"), b"a\nb\n");
    }

    #[test]
    fn test_trailing_blank_lines() {
        assert_eq!(check(b"a\n\n\n"), vec![(3, 1)]);
        assert_eq!(fix(b"a\n\n\n"), b"a\n");
        assert_eq!(fix(b"a\r\n\r\n"), b"a\r\n");
    }

    #[test]
    fn test_only_newlines_become_empty() {
        assert_eq!(check(b"\n"), vec![(1, 1)]);
        assert_eq!(fix(b"\n\n"), b"");
    }

    #[test]
    fn test_stray_cr_at_end() {
        assert_eq!(check(b"a\r"), vec![(1, 1)]);
        assert_eq!(fix(b"a\r"), b"a\r\n");
        assert_eq!(fix(b"\r"), b"");
        assert_eq!(check(b"a\n\r\n"), vec![(2, 1)]);
        assert_eq!(fix(b"a\n\r\n"), b"a\n");
    }

    #[test]
    fn test_bodies_are_never_changed() {
        // The CR before the stray one stays part of the body.
        assert!(check(b" \r\r\n").is_empty());
        assert_eq!(fix(b"a \r\r"), b"a \r\r\n");
        assert_eq!(fix(b"x\t\n\n"), b"x\t\n");
    }

    #[test]
    fn test_whitespace_only_last_line_is_not_blank() {
        // TL010 owns the spaces; after it runs this becomes a blank line.
        assert!(check(b"a\n  \n").is_empty());
    }
}
