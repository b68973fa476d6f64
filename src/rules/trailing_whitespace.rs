use super::{Finding, Rule};
use crate::content::FileContent;
use std::borrow::Cow;

/// TL010: no line body ends in spaces or tabs.
pub struct TrailingWhitespace;

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Length of `body` once trailing spaces/tabs are removed.
fn trimmed_len(body: &[u8]) -> usize {
    body.iter().rposition(|&b| !is_blank(b)).map_or(0, |i| i + 1)
}

impl Rule for TrailingWhitespace {
    fn id(&self) -> &'static str {
        "TL010"
    }

    fn description(&self) -> &'static str {
        "lines must not end with spaces or tabs"
    }

    fn check(&self, content: FileContent<'_>) -> Vec<Finding> {
        content
            .lines()
            .filter_map(|line| {
                let keep = trimmed_len(line.body);
                (keep < line.body.len()).then(|| Finding {
                    line: line.number,
                    column: keep + 1,
                    message: "no trailing spaces".to_string(),
                })
            })
            .collect()
    }

    fn fix<'a>(&self, content: FileContent<'a>) -> Cow<'a, [u8]> {
        let bytes = content.bytes();
        let mut out: Option<Vec<u8>> = None;
        for line in content.lines() {
            let keep = trimmed_len(line.body);
            if keep == line.body.len() {
                if let Some(out) = out.as_mut() {
                    out.extend_from_slice(line.body);
                    out.extend_from_slice(line.terminator);
                }
                continue;
            }
            let out = out.get_or_insert_with(|| {
                let mut v = Vec::with_capacity(bytes.len());
                v.extend_from_slice(&bytes[..line.start]);
                v
            });
            out.extend_from_slice(&line.body[..keep]);
            out.extend_from_slice(line.terminator);
        }
        match out {
            Some(v) => Cow::Owned(v),
            None => Cow::Borrowed(bytes),
        }
    }
}
