//! Line-level repair of raw INI text.
//!
//! Runs before parsing so that keys with stray whitespace and lines with an
//! empty key never reach the reader. Everything that is not an assignment is
//! passed through byte-for-byte, including lines the reader will later skip.

use super::parser::{LineKind, classify};
use tracing::warn;

/// A line that was changed or dropped, with the section it appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFix {
    pub line: usize,
    pub section: Option<String>,
    pub original: String,
    /// `None` when the line was dropped.
    pub replacement: Option<String>,
}

/// Output of [`repair`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub text: String,
    pub fixes: Vec<LineFix>,
}

impl RepairReport {
    pub fn dropped(&self) -> impl Iterator<Item = &LineFix> {
        self.fixes.iter().filter(|f| f.replacement.is_none())
    }

    pub fn rewritten(&self) -> impl Iterator<Item = &LineFix> {
        self.fixes.iter().filter(|f| f.replacement.is_some())
    }
}

/// Spaces and tabs inside a key become underscores.
pub fn sanitize_key(key: &str) -> String {
    key.replace([' ', '\t'], "_")
}

/// Rewrite every `key=value` line as `key = value`, sanitizing the key and
/// dropping lines whose key is empty.
///
/// Indented lines that continue the previous option's value are passed
/// through untouched, as the reader appends them to that value. Every line
/// keeps its original terminator (`\n`, `\r\n` or none at end of text).
pub fn repair(text: &str) -> RepairReport {
    let mut out = String::with_capacity(text.len());
    let mut fixes = Vec::new();
    let mut section: Option<String> = None;
    let mut continuing = false;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        let content = line.trim_end_matches(['\r', '\n']);
        let terminator = &line[content.len()..];

        if continuing && content.starts_with(char::is_whitespace) {
            out.push_str(line);
            continue;
        }

        let (key, value) = match classify(line) {
            LineKind::Header(name) => {
                section = Some(name.to_string());
                continuing = false;
                out.push_str(line);
                continue;
            }
            LineKind::Comment => {
                out.push_str(line);
                continue;
            }
            LineKind::Blank => {
                // Only a truly empty line ends a value.
                continuing &= !content.is_empty();
                out.push_str(line);
                continue;
            }
            LineKind::Other => {
                continuing = false;
                out.push_str(line);
                continue;
            }
            LineKind::Assignment { key, value } => (key.trim(), value.trim()),
        };

        let original = content.to_string();

        if key.is_empty() {
            warn!(
                line = line_no,
                section = section.as_deref().unwrap_or(""),
                content = original.trim(),
                "removing invalid line (empty key)"
            );
            fixes.push(LineFix {
                line: line_no,
                section: section.clone(),
                original,
                replacement: None,
            });
            continuing = false;
            continue;
        }

        let fixed = format!("{} = {}", sanitize_key(key), value);
        if fixed != original {
            fixes.push(LineFix {
                line: line_no,
                section: section.clone(),
                original,
                replacement: Some(fixed.clone()),
            });
        }
        out.push_str(&fixed);
        out.push_str(terminator);
        continuing = true;
    }

    RepairReport { text: out, fixes }
}
