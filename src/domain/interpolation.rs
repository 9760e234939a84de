//! `%(name)s` substitution.
//!
//! A value is scanned once into literal text, `%%` escapes and references.
//! References are resolved recursively in the view of the section being read
//! (local, then DEFAULT). The chain of keys currently being resolved doubles
//! as the cycle check and is capped at [`MAX_INTERPOLATION_DEPTH`].

use std::collections::HashMap;

use super::errors::{ConfigError, ConfigResult};
use super::models::document::{normalize_key, ConfigDocument, Location};

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Percent,
    Reference(&'a str),
}

fn bad_syntax(value: &str, location: &Location) -> ConfigError {
    ConfigError::parse(
        &location.origin,
        location.line,
        format!("bad interpolation syntax in '{value}': '%' must be followed by '%' or '(name)s'"),
    )
}

fn tokenize<'a>(value: &'a str, location: &Location) -> ConfigResult<Vec<Token<'a>>> {
    let mut tokens = Vec::new();
    let mut rest = value;

    while let Some(pos) = rest.find('%') {
        if pos > 0 {
            tokens.push(Token::Literal(&rest[..pos]));
        }
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('%') {
            tokens.push(Token::Percent);
            rest = tail;
        } else if let Some(body) = after.strip_prefix('(') {
            let close = body
                .find(")s")
                .ok_or_else(|| bad_syntax(value, location))?;
            let name = &body[..close];
            if name.trim().is_empty() || name.contains(['(', ')']) {
                return Err(bad_syntax(value, location));
            }
            tokens.push(Token::Reference(name));
            rest = &body[close + 2..];
        } else {
            return Err(bad_syntax(value, location));
        }
    }

    if !rest.is_empty() {
        tokens.push(Token::Literal(rest));
    }
    Ok(tokens)
}

/// Longest chain of nested references followed before giving up.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Upper bound on the length of one interpolated value, in bytes.
pub const MAX_INTERPOLATED_LEN: usize = 1 << 20;

/// Resolves values in the view of one section.
///
/// Resolved values are cached, so repeated references to the same key cost
/// one resolution per view.
pub(crate) struct Interpolator<'a> {
    doc: &'a ConfigDocument,
    section: &'a str,
    resolved: HashMap<String, String>,
    chain: Vec<String>,
}

impl<'a> Interpolator<'a> {
    pub(crate) fn new(doc: &'a ConfigDocument, section: &'a str) -> Self {
        Self {
            doc,
            section,
            resolved: HashMap::new(),
            chain: Vec::new(),
        }
    }

    /// Fully interpolated value of `key`.
    pub(crate) fn value(&mut self, key: &str) -> ConfigResult<String> {
        self.chain.clear();
        self.resolve(&normalize_key(key))
    }

    fn resolve(&mut self, key: &str) -> ConfigResult<String> {
        if let Some(done) = self.resolved.get(key) {
            return Ok(done.clone());
        }
        if self.chain.len() >= MAX_INTERPOLATION_DEPTH {
            let message = format!(
                "interpolation in [{}] nests deeper than {MAX_INTERPOLATION_DEPTH} levels: {}",
                self.section,
                self.path_to(key)
            );
            return Err(self.error_at_chain_start(key, message));
        }

        let doc = self.doc;
        let entry = doc.lookup(self.section, key)?;
        self.chain.push(key.to_string());

        let mut out = String::with_capacity(entry.value.len());
        for token in tokenize(&entry.value, &entry.location)? {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Percent => out.push('%'),
                Token::Reference(name) => {
                    let name = normalize_key(name);
                    if let Some(start) = self.chain.iter().position(|seen| *seen == name) {
                        return Err(self.circular(start, &name));
                    }
                    if !doc.has_key(self.section, &name) {
                        return Err(ConfigError::UnresolvedInterpolation {
                            section: self.section.to_string(),
                            key: key.to_string(),
                            reference: name,
                        });
                    }
                    out.push_str(&self.resolve(&name)?);
                }
            }
            if out.len() > MAX_INTERPOLATED_LEN {
                let message = format!(
                    "interpolated value of '{key}' in [{}] exceeds {MAX_INTERPOLATED_LEN} bytes",
                    self.section
                );
                return Err(self.error_at_chain_start(key, message));
            }
        }

        self.chain.pop();
        self.resolved.insert(key.to_string(), out.clone());
        Ok(out)
    }

    /// `a -> b -> ... -> closing` over the keys currently being resolved.
    fn path_to(&self, closing: &str) -> String {
        self.chain
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(closing))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// A parse error located at the outermost key being resolved.
    fn error_at_chain_start(&self, fallback: &str, message: String) -> ConfigError {
        let first = self.chain.first().map_or(fallback, String::as_str);
        match self.doc.lookup(self.section, first) {
            Ok(entry) => ConfigError::parse(&entry.location.origin, entry.location.line, message),
            Err(err) => err,
        }
    }

    /// Circular references are reported at the first key of the cycle.
    fn circular(&self, start: usize, closing: &str) -> ConfigError {
        let path = self.chain[start..]
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(closing))
            .collect::<Vec<_>>()
            .join(" -> ");
        let message = format!("circular interpolation in [{}]: {path}", self.section);
        match self.doc.lookup(self.section, &self.chain[start]) {
            Ok(entry) => ConfigError::parse(&entry.location.origin, entry.location.line, message),
            Err(err) => err,
        }
    }
}

/// Fully interpolated value of `key` as seen from `section`.
pub(crate) fn interpolate(doc: &ConfigDocument, section: &str, key: &str) -> ConfigResult<String> {
    Interpolator::new(doc, section).value(key)
}
