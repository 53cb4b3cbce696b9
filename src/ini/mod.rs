//! INI text handling: line repair, parsing and serialization.
//!
//! The persisted format is plain INI (`[Section]` headers, `key = value`
//! lines, `;`/`#` comments). Repair works on raw text; parsing produces an
//! [`IniDocument`] that the store mutates and serializes back.

mod document;
mod parser;
mod repair;

#[cfg(test)]
mod tests;

pub use document::{
    Deduplication, Entry, IniDocument, RemovedOption, Section, normalize_key,
};
pub use parser::{LineKind, classify, parse};
pub use repair::{LineFix, RepairReport, repair, sanitize_key};
