//! # Env File Parser
//!
//! Parses `KEY=VALUE` settings files into flat string pairs.
//!
//! Rules applied to each line:
//! - a line whose first character is `#` is a comment;
//! - the first `=` separates key from value, later `=` belong to the value;
//! - a `#` outside quotes starts an inline comment;
//! - the value is trimmed of whitespace, then of one layer of matching quotes.
//!
//! Parsing never fails on content; lines that are not assignments are skipped.
use std::collections::HashMap;
use std::path::Path;

use crate::kernel::error::Result;
use crate::storage::provider::StorageProvider;

/// Flat mapping of setting names to raw string values
pub type EnvMap = HashMap<String, String>;

/// Characters trimmed from both ends of a value before unquoting.
const VALUE_TRIM: &[char] = &[' ', '\t', '\n', '\r', '\x0B', '\0'];

/// Parse env-file content. Later assignments of a key overwrite earlier ones.
pub fn parse_env_str(content: &str) -> EnvMap {
    let mut values = EnvMap::new();
    for (key, value) in content.split('\n').filter_map(parse_line) {
        values.insert(key, value);
    }
    values
}

/// Read a file through `provider` and parse it.
pub fn parse_env_file(provider: &dyn StorageProvider, path: &Path) -> Result<EnvMap> {
    let content = provider.read_to_string(path)?;
    let values = parse_env_str(&content);
    log::debug!(
        "Parsed {} setting(s) from {} via '{}' provider",
        values.len(),
        path.display(),
        provider.name()
    );
    Ok(values)
}

/// Parse a single raw line into a `(key, value)` pair.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    if line.starts_with('#') {
        return None;
    }

    let (key, raw_value) = line.split_once('=')?;
    if key.is_empty() {
        return None;
    }

    let value = match inline_comment_start(raw_value) {
        Some(pos) => &raw_value[..pos],
        None => raw_value,
    };

    Some((key.to_string(), unquote(value.trim_matches(VALUE_TRIM)).to_string()))
}

#[derive(Clone, Copy, PartialEq)]
enum ScanState {
    Outside,
    Quoted(u8),
}

/// Byte offset of the first `#` that sits outside a quoted section.
///
/// A quote that is never closed is treated as a literal character and the
/// scan resumes right after it, so `it's # note` still loses its comment.
fn inline_comment_start(value: &str) -> Option<usize> {
    let bytes = value.as_bytes();
    let mut state = ScanState::Outside;
    let mut opened_at = 0;
    let mut i = 0;

    while i < bytes.len() {
        match (state, bytes[i]) {
            (ScanState::Outside, b'#') => return Some(i),
            (ScanState::Outside, quote @ (b'"' | b'\'')) => {
                state = ScanState::Quoted(quote);
                opened_at = i;
            }
            (ScanState::Quoted(quote), c) if c == quote => state = ScanState::Outside,
            _ => {}
        }
        i += 1;

        if i == bytes.len() && state != ScanState::Outside {
            state = ScanState::Outside;
            i = opened_at + 1;
        }
    }
    None
}

/// Strip one layer of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
