//! Lenient INI reader.
//!
//! Accepts what standard INI readers accept (`=` or `:` delimiters, `;`/`#`
//! comments, indented continuation lines) and skips anything else with a
//! warning instead of failing. Duplicates are kept for the store to fold.

use super::document::{Entry, IniDocument, Section, normalize_key};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<name>.+)\]$").expect("Invalid section header regex"));

/// How a single physical line reads, independent of its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    /// `[name]`, name trimmed.
    Header(&'a str),
    /// Raw text before and after the first `=`, untrimmed.
    Assignment { key: &'a str, value: &'a str },
    Other,
}

/// Classify a line by the repair rules: only `=` counts as a delimiter here.
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if let Some(caps) = SECTION_HEADER.captures(trimmed)
        && let Some(name) = caps.name("name")
    {
        return LineKind::Header(name.as_str().trim());
    }
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if is_comment(trimmed) {
        return LineKind::Comment;
    }
    match line.split_once('=') {
        Some((key, value)) => LineKind::Assignment { key, value },
        None => LineKind::Other,
    }
}

pub(crate) fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with(';') || trimmed.starts_with('#')
}

/// Split at whichever of `=` or `:` comes first.
fn split_option(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':'])?;
    Some((&line[..at], &line[at + 1..]))
}

/// Parse INI text into an ordered document.
pub fn parse(text: &str) -> IniDocument {
    let mut document = IniDocument::new();
    let mut in_section = false;
    // A continuation may only follow an option line directly.
    let mut continuing = false;
    // Whitespace-only lines seen inside a continuation, kept only if more text follows.
    let mut pending_blank = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            if continuing && !raw.is_empty() {
                pending_blank += 1;
            } else {
                continuing = false;
                pending_blank = 0;
            }
            continue;
        }
        if is_comment(trimmed) {
            continue;
        }

        let indented = raw.starts_with(char::is_whitespace);
        if indented
            && continuing
            && let Some(entry) = document
                .last_section_mut()
                .and_then(|s| s.entries.last_mut())
        {
            for _ in 0..pending_blank {
                entry.value.push('\n');
            }
            pending_blank = 0;
            entry.value.push('\n');
            entry.value.push_str(trimmed);
            continue;
        }
        pending_blank = 0;

        if let Some(caps) = SECTION_HEADER.captures(trimmed)
            && let Some(name) = caps.name("name")
        {
            document.push_section(Section::new(name.as_str().trim()));
            in_section = true;
            continuing = false;
            continue;
        }

        let Some((key, value)) = split_option(trimmed) else {
            warn!(line = line_no, content = trimmed, "skipping line without a delimiter");
            continuing = false;
            continue;
        };

        let key = normalize_key(key);
        if key.is_empty() {
            warn!(line = line_no, content = trimmed, "skipping option with an empty key");
            continuing = false;
            continue;
        }
        if !in_section {
            warn!(line = line_no, content = trimmed, "skipping option outside of any section");
            continuing = false;
            continue;
        }

        if let Some(section) = document.last_section_mut() {
            section.entries.push(Entry {
                key,
                value: value.trim().to_string(),
            });
            continuing = true;
        }
    }

    document
}
