//! Line-oriented parser for the sectioned key/value format.
//!
//! ```text
//! [SectionName]
//! # comment line
//! key = value
//! key2 = %(key)s/suffix      ; inline comment
//!     continuation line
//! ```
//!
//! The parser only builds the raw document. Interpolation is checked by
//! [`ConfigDocument::validate`] once the final document is assembled.

use std::collections::HashSet;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::document::{normalize_key, ConfigDocument, Entry};

/// Line classes recognised by the parser.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    Pair { key: &'a str, value: &'a str },
    Continuation(&'a str),
}

/// Cut an inline comment: a `;` preceded by whitespace.
fn strip_inline_comment(value: &str) -> &str {
    let bytes = value.as_bytes();
    for (idx, byte) in bytes.iter().enumerate() {
        if *byte == b';' && idx > 0 && bytes[idx - 1].is_ascii_whitespace() {
            return value[..idx].trim_end();
        }
    }
    value
}

/// Classify one line. An indented line continues the previous value only
/// while `continuing` is set; otherwise it is read like any other line.
fn classify<'a>(
    raw: &'a str,
    continuing: bool,
    origin: &str,
    lineno: usize,
) -> ConfigResult<Line<'a>> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with('#') || trimmed.starts_with(';') {
        return Ok(Line::Comment);
    }
    if continuing && raw.starts_with(char::is_whitespace) {
        return Ok(Line::Continuation(strip_inline_comment(trimmed)));
    }

    if let Some(header) = trimmed.strip_prefix('[') {
        let name = strip_inline_comment(header)
            .strip_suffix(']')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ConfigError::parse(origin, lineno, format!("malformed section header: {trimmed}"))
            })?;
        return Ok(Line::Header(name));
    }

    let delimiter = trimmed.find(['=', ':']).ok_or_else(|| {
        ConfigError::parse(
            origin,
            lineno,
            format!("expected 'key = value', a section header or a comment, found: {trimmed}"),
        )
    })?;
    let key = trimmed[..delimiter].trim();
    if key.is_empty() {
        return Err(ConfigError::parse(origin, lineno, "empty key"));
    }
    let value = strip_inline_comment(trimmed[delimiter + 1..].trim());

    Ok(Line::Pair { key, value })
}

/// Parse `text` into a raw, unvalidated document.
///
/// `origin` names the source in error messages and entry locations.
pub fn parse(text: &str, origin: &str) -> ConfigResult<ConfigDocument> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut doc = ConfigDocument::new();
    let mut seen_sections: HashSet<String> = HashSet::new();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;

        match classify(raw, last_key.is_some(), origin, lineno)? {
            Line::Blank => last_key = None,
            Line::Comment => {}
            Line::Header(name) => {
                if !seen_sections.insert(name.to_string()) {
                    return Err(ConfigError::parse(
                        origin,
                        lineno,
                        format!("section [{name}] already defined"),
                    ));
                }
                doc.section_entry(name);
                current = Some(name.to_string());
                last_key = None;
            }
            Line::Pair { key, value } => {
                let section = current.as_deref().ok_or_else(|| {
                    ConfigError::parse(
                        origin,
                        lineno,
                        format!("'{key}' appears before any section header"),
                    )
                })?;
                let target = doc.section_entry(section);
                if target.contains_key(key) {
                    return Err(ConfigError::parse(
                        origin,
                        lineno,
                        format!("key '{}' already defined in [{section}]", normalize_key(key)),
                    ));
                }
                target.insert(key, Entry::new(value, origin, lineno));
                last_key = Some(key.to_string());
            }
            Line::Continuation(text) => {
                let entry = match (current.as_deref(), last_key.as_deref()) {
                    (Some(section), Some(key)) => doc.section_entry(section).get_mut(key),
                    _ => None,
                };
                let entry = entry.ok_or_else(|| {
                    ConfigError::parse(
                        origin,
                        lineno,
                        "indented line does not continue a key",
                    )
                })?;
                if !text.is_empty() {
                    entry.value.push('\n');
                    entry.value.push_str(text);
                }
            }
        }
    }

    Ok(doc)
}
