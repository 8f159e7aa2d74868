//! Source-unit value matcher.
//!
//! A single alternation scanned left to right:
//!
//! ```text
//! "[^"]+" | '[^']+' | url\([^)]+\) | ([0-9]*\.?[0-9]+)<unit>
//! ```
//!
//! Quoted strings and `url(...)` calls are consumed whole by the first three
//! branches, so numbers inside them never surface. Only the last branch has a
//! capture group, and only matches with that group produce a token.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::ConfigError;

/// A number-plus-unit occurrence in a value string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchToken<'a> {
    /// The whole match, unit included: `12.5px`.
    pub text: &'a str,
    /// The numeric literal: `12.5`.
    pub number: &'a str,
    /// Byte range of `text` within the scanned value.
    pub span: Range<usize>,
}

/// Compiled matcher for one source unit.
#[derive(Debug, Clone)]
pub struct ValueMatcher {
    pattern: Regex,
}

impl ValueMatcher {
    /// Build the matcher. The unit matches case-insensitively.
    pub fn new(unit: &str) -> Result<Self, ConfigError> {
        if unit.is_empty() {
            return Err(ConfigError::EmptySourceUnit);
        }

        let source = format!(
            r#""[^"]+"|'[^']+'|url\([^)]+\)|([0-9]*\.?[0-9]+){}"#,
            regex::escape(unit)
        );
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|source_err| ConfigError::InvalidPattern {
                list: "sourceUnit",
                pattern: source.clone(),
                source: source_err,
            })?;

        Ok(Self { pattern })
    }

    /// Lazily yield every number-plus-unit token in `value`, in order.
    pub fn tokens<'v>(&'v self, value: &'v str) -> impl Iterator<Item = MatchToken<'v>> + 'v {
        self.pattern.captures_iter(value).filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1)?;
            Some(MatchToken {
                text: whole.as_str(),
                number: number.as_str(),
                span: whole.range(),
            })
        })
    }

    /// Replace every token with `replace(token)` in a single scan of `value`.
    /// Text outside tokens, including skipped quoted and `url()` spans, is kept.
    pub fn replace_all<F>(&self, value: &str, mut replace: F) -> String
    where
        F: FnMut(&MatchToken<'_>) -> String,
    {
        let mut out = String::with_capacity(value.len());
        let mut last = 0;

        for token in self.tokens(value) {
            out.push_str(&value[last..token.span.start]);
            out.push_str(&replace(&token));
            last = token.span.end;
        }

        out.push_str(&value[last..]);
        out
    }
}
