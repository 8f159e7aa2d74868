//! px2vp transform
//!
//! Rewrites pixel lengths in a stylesheet into viewport units so a fixed-width
//! design scales with the device. Runs as one stage of a host CSS pipeline:
//! the host parses, hands over a [`Stylesheet`], and prints the result.
//!
//! ```text
//! Stylesheet → PxToViewport::transform() → Stylesheet (mutated in place)
//! ```
//!
//! A comment directly after a declaration overrides the rules for that one
//! declaration: `/* on */` converts it even when its property is blacklisted,
//! `/* off */` leaves it alone. Directive comments are removed once read.
//!
//! # Example
//!
//! ```
//! use px2vp_ast::{Node, Stylesheet};
//! use px2vp_core::{Config, PxToViewport};
//!
//! let stage = PxToViewport::new(Config::default()).unwrap();
//! let mut sheet = Stylesheet::new(vec![Node::rule(".a", vec![Node::decl("width", "75px")])]);
//! stage.transform(&mut sheet);
//! assert_eq!(sheet.to_string(), ".a {\n  width: 10vmin;\n}\n");
//! ```

pub mod config;
pub mod convert;
pub mod filter;
pub mod matcher;

pub use config::{Blacklist, BlacklistEntry, Config, EntrySpec, Options};
pub use convert::UnitConverter;
pub use filter::{Action, Directive, SkipReason, Verdict};
pub use matcher::{MatchToken, ValueMatcher};
pub use px2vp_ast::Stylesheet;

use filter::Candidate;

/// Name the stage registers under in a host pipeline.
pub const PLUGIN_NAME: &str = "postcss-pixel-to-viewport";

/// Configuration error, reported once when the stage is built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: invalid {list} pattern '{pattern}': {source}")]
    InvalidPattern {
        list: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Config error: source unit must not be empty")]
    EmptySourceUnit,

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The pixel-to-viewport transform stage.
///
/// Holds the resolved configuration and the compiled value matcher. Immutable
/// once built; one instance can transform any number of independent
/// stylesheets, from any thread.
#[derive(Debug, Clone)]
pub struct PxToViewport {
    config: Config,
    matcher: ValueMatcher,
    converter: UnitConverter,
}

impl PxToViewport {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let matcher = ValueMatcher::new(&config.source_unit)?;
        let converter = UnitConverter::from_config(&config);
        Ok(Self {
            config,
            matcher,
            converter,
        })
    }

    /// Build from caller overrides merged over the defaults.
    pub fn from_options(options: Options) -> Result<Self, ConfigError> {
        Self::new(Config::resolve(options)?)
    }

    /// Build from a JSON options object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_options(Options::from_json(json)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert every eligible declaration, and media query params when enabled.
    pub fn transform(&self, sheet: &mut Stylesheet) {
        let config = &self.config;
        let mut converted = 0usize;

        sheet.walk_decls(|ctx| {
            let verdict = filter::evaluate(
                config,
                &Candidate {
                    prop: &ctx.decl().prop,
                    value: &ctx.decl().value,
                    selector: ctx.parent_selector(),
                    trailing_comment: ctx.trailing_comment(),
                },
            );

            if verdict.consume_comment {
                ctx.remove_trailing_comment();
            }

            match verdict.action {
                Action::Convert => {
                    let decl = ctx.decl_mut();
                    let unit = config.unit_for(&decl.prop);
                    let value = self.rewrite(&decl.value, unit);
                    tracing::debug!(prop = %decl.prop, from = %decl.value, to = %value, "converted");
                    decl.value = value;
                    converted += 1;
                }
                Action::Skip(reason) => {
                    tracing::debug!(prop = %ctx.decl().prop, ?reason, "skipped");
                }
            }
        });

        if config.convert_media_queries {
            sheet.walk_at_rules("media", |rule| {
                if !rule.params.contains(config.source_unit.as_str()) {
                    return;
                }
                let params = self.rewrite(&rule.params, &config.viewport_unit);
                tracing::trace!(from = %rule.params, to = %params, "media params");
                rule.params = params;
            });
        }

        tracing::debug!(converted, stage = PLUGIN_NAME, "transform done");
    }

    /// Replace every matched token in `value` in a single scan.
    fn rewrite(&self, value: &str, unit: &str) -> String {
        self.matcher
            .replace_all(value, |token| self.converter.replace(token, unit))
    }
}
