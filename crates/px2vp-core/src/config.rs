//! Transform configuration.
//!
//! `Options` is what a caller hands over (every field optional, deserializable
//! from the host's plugin options). `Config` is the resolved, validated record
//! the transform runs with. `Config::resolve` is the only way from one to the
//! other.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::ConfigError;

pub const DEFAULT_SOURCE_UNIT: &str = "px";
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 750.0;
pub const DEFAULT_VIEWPORT_UNIT: &str = "vmin";
pub const DEFAULT_PRECISION: u32 = 5;
pub const DEFAULT_FONT_VIEWPORT_UNIT: &str = "vw";
pub const DEFAULT_MIN_PIXEL_VALUE: f64 = 1.0;
pub const DEFAULT_ENABLE_COMMENT: &str = "on";
pub const DEFAULT_DISABLE_COMMENT: &str = "off";

/// Largest precision that still rounds through `f64` without overflowing the scale factor.
pub const MAX_PRECISION: u32 = 15;

// =========================================================================
// Blacklists
// =========================================================================

/// One blacklist entry.
#[derive(Debug, Clone)]
pub enum BlacklistEntry {
    /// Matches when the target contains the string.
    Substring(String),
    /// Matches when the pattern finds a match in the target.
    Pattern(Regex),
}

impl BlacklistEntry {
    pub fn matches(&self, target: &str) -> bool {
        match self {
            BlacklistEntry::Substring(needle) => target.contains(needle.as_str()),
            BlacklistEntry::Pattern(pattern) => pattern.is_match(target),
        }
    }
}

impl From<&str> for BlacklistEntry {
    fn from(needle: &str) -> Self {
        BlacklistEntry::Substring(needle.to_string())
    }
}

impl From<Regex> for BlacklistEntry {
    fn from(pattern: Regex) -> Self {
        BlacklistEntry::Pattern(pattern)
    }
}

/// An ordered list of entries; matches if any entry does.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    entries: Vec<BlacklistEntry>,
}

impl Blacklist {
    pub fn new(entries: Vec<BlacklistEntry>) -> Self {
        Self { entries }
    }

    pub fn matches(&self, target: &str) -> bool {
        self.entries.iter().any(|entry| entry.matches(target))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<E: Into<BlacklistEntry>> FromIterator<E> for Blacklist {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A blacklist entry as written in options: a bare string, or `{ "pattern": "..." }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EntrySpec {
    Substring(String),
    Pattern { pattern: String },
}

impl EntrySpec {
    fn compile(self, list: &'static str) -> Result<BlacklistEntry, ConfigError> {
        match self {
            EntrySpec::Substring(needle) => Ok(BlacklistEntry::Substring(needle)),
            EntrySpec::Pattern { pattern } => match Regex::new(&pattern) {
                Ok(regex) => Ok(BlacklistEntry::Pattern(regex)),
                Err(source) => Err(ConfigError::InvalidPattern {
                    list,
                    pattern,
                    source,
                }),
            },
        }
    }
}

fn compile_blacklist(
    specs: Option<Vec<EntrySpec>>,
    list: &'static str,
) -> Result<Blacklist, ConfigError> {
    let entries = specs
        .unwrap_or_default()
        .into_iter()
        .map(|spec| spec.compile(list))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Blacklist::new(entries))
}

// =========================================================================
// Options (caller overrides)
// =========================================================================

/// Caller overrides. Absent fields keep their defaults, and so do scalar fields
/// of the wrong type (logged and dropped). Malformed blacklists are errors.
///
/// Accepts both the current field names and the legacy plugin option names
/// (`unitToConvert`, `unitPrecision`, `selectorBlackList`,
/// `enableConvertComment`, `disableConvertComment`, `mediaQuery`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    #[serde(alias = "unitToConvert", deserialize_with = "lenient")]
    pub source_unit: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub viewport_width: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub viewport_unit: Option<String>,
    #[serde(alias = "unitPrecision", deserialize_with = "lenient")]
    pub precision: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub font_viewport_unit: Option<String>,
    pub property_blacklist: Option<Vec<EntrySpec>>,
    #[serde(alias = "selectorBlackList")]
    pub selector_blacklist: Option<Vec<EntrySpec>>,
    #[serde(deserialize_with = "lenient")]
    pub min_pixel_value: Option<f64>,
    #[serde(alias = "enableConvertComment", deserialize_with = "lenient")]
    pub enable_comment: Option<String>,
    #[serde(alias = "disableConvertComment", deserialize_with = "lenient")]
    pub disable_comment: Option<String>,
    #[serde(alias = "mediaQuery", deserialize_with = "lenient")]
    pub convert_media_queries: Option<bool>,
}

/// Read a scalar option, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            tracing::warn!(%value, %err, "malformed option, using default");
            Ok(None)
        }
    }
}

impl Options {
    /// Read options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

// =========================================================================
// Config (resolved)
// =========================================================================

/// Resolved transform configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_unit: String,
    pub viewport_width: f64,
    pub viewport_unit: String,
    pub precision: u32,
    pub font_viewport_unit: String,
    pub property_blacklist: Blacklist,
    pub selector_blacklist: Blacklist,
    /// Values at or below this are left as written.
    pub min_pixel_value: f64,
    pub enable_comment: String,
    pub disable_comment: String,
    pub convert_media_queries: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_unit: DEFAULT_SOURCE_UNIT.into(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_unit: DEFAULT_VIEWPORT_UNIT.into(),
            precision: DEFAULT_PRECISION,
            font_viewport_unit: DEFAULT_FONT_VIEWPORT_UNIT.into(),
            property_blacklist: Blacklist::default(),
            selector_blacklist: Blacklist::default(),
            min_pixel_value: DEFAULT_MIN_PIXEL_VALUE,
            enable_comment: DEFAULT_ENABLE_COMMENT.into(),
            disable_comment: DEFAULT_DISABLE_COMMENT.into(),
            convert_media_queries: false,
        }
    }
}

impl Config {
    /// Merge `options` over the defaults.
    ///
    /// Out-of-range numbers fall back to their default with a warning; an empty
    /// source unit or an invalid blacklist pattern is an error.
    pub fn resolve(options: Options) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let source_unit = options.source_unit.unwrap_or(defaults.source_unit);
        if source_unit.is_empty() {
            return Err(ConfigError::EmptySourceUnit);
        }

        let viewport_width = match options.viewport_width {
            Some(width) if width.is_finite() && width > 0.0 => width,
            Some(width) => {
                tracing::warn!(width, "viewportWidth must be a positive number, using default");
                defaults.viewport_width
            }
            None => defaults.viewport_width,
        };

        let precision = match options.precision {
            Some(precision) if precision <= MAX_PRECISION => precision,
            Some(precision) => {
                tracing::warn!(precision, max = MAX_PRECISION, "precision out of range, using default");
                defaults.precision
            }
            None => defaults.precision,
        };

        let min_pixel_value = match options.min_pixel_value {
            Some(min) if min.is_finite() => min,
            Some(min) => {
                tracing::warn!(min, "minPixelValue must be finite, using default");
                defaults.min_pixel_value
            }
            None => defaults.min_pixel_value,
        };

        Ok(Self {
            source_unit,
            viewport_width,
            viewport_unit: options.viewport_unit.unwrap_or(defaults.viewport_unit),
            precision,
            font_viewport_unit: options
                .font_viewport_unit
                .unwrap_or(defaults.font_viewport_unit),
            property_blacklist: compile_blacklist(options.property_blacklist, "propertyBlacklist")?,
            selector_blacklist: compile_blacklist(options.selector_blacklist, "selectorBlacklist")?,
            min_pixel_value,
            enable_comment: options.enable_comment.unwrap_or(defaults.enable_comment),
            disable_comment: options.disable_comment.unwrap_or(defaults.disable_comment),
            convert_media_queries: options
                .convert_media_queries
                .unwrap_or(defaults.convert_media_queries),
        })
    }

    /// Viewport unit for a property: font properties get `font_viewport_unit`.
    pub fn unit_for(&self, prop: &str) -> &str {
        if prop.contains("font") {
            &self.font_viewport_unit
        } else {
            &self.viewport_unit
        }
    }
}
