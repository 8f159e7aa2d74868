//! Per-declaration eligibility.
//!
//! Decides, from a declaration's property, value, parent selector and trailing
//! comment, whether it gets converted and whether the trailing comment is
//! consumed. Checks run in a fixed order:
//!
//! 1. value without the source unit: skip (a trailing disable comment is still consumed)
//! 2. trailing disable comment: skip, consume the comment
//! 3. blacklisted selector: skip, leave any comment alone
//! 4. trailing enable comment: convert, consume the comment
//! 5. blacklisted property: skip
//! 6. convert

use crate::config::Config;

/// A recognized trailing-comment directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Enable,
    Disable,
}

impl Directive {
    /// Match comment text exactly against the configured directive strings.
    /// Disable wins when both strings are configured the same.
    pub fn parse(text: &str, config: &Config) -> Option<Self> {
        if text == config.disable_comment {
            Some(Directive::Disable)
        } else if text == config.enable_comment {
            Some(Directive::Enable)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSourceUnit,
    DisabledByComment,
    SelectorBlacklisted,
    PropertyBlacklisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Convert,
    Skip(SkipReason),
}

/// What to do with one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub action: Action,
    /// Detach the trailing comment.
    pub consume_comment: bool,
}

impl Verdict {
    fn convert(consume_comment: bool) -> Self {
        Self {
            action: Action::Convert,
            consume_comment,
        }
    }

    fn skip(reason: SkipReason, consume_comment: bool) -> Self {
        Self {
            action: Action::Skip(reason),
            consume_comment,
        }
    }
}

/// The parts of a declaration the filter looks at.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub prop: &'a str,
    pub value: &'a str,
    pub selector: Option<&'a str>,
    pub trailing_comment: Option<&'a str>,
}

pub fn evaluate(config: &Config, candidate: &Candidate<'_>) -> Verdict {
    let directive = candidate
        .trailing_comment
        .and_then(|text| Directive::parse(text, config));
    let disabled = directive == Some(Directive::Disable);

    if !candidate.value.contains(config.source_unit.as_str()) {
        return Verdict::skip(SkipReason::NoSourceUnit, disabled);
    }
    if disabled {
        return Verdict::skip(SkipReason::DisabledByComment, true);
    }

    if candidate
        .selector
        .is_some_and(|selector| config.selector_blacklist.matches(selector))
    {
        return Verdict::skip(SkipReason::SelectorBlacklisted, false);
    }

    if directive == Some(Directive::Enable) {
        return Verdict::convert(true);
    }

    if config.property_blacklist.matches(candidate.prop) {
        return Verdict::skip(SkipReason::PropertyBlacklisted, false);
    }

    Verdict::convert(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Blacklist;
    use pretty_assertions::assert_eq;
    use regex::Regex;

    fn config() -> Config {
        Config {
            property_blacklist: ["border"].into_iter().collect(),
            selector_blacklist: Blacklist::new(vec![
                ".ignore".into(),
                Regex::new(r"^\.raw-").unwrap().into(),
            ]),
            ..Config::default()
        }
    }

    fn candidate<'a>(
        prop: &'a str,
        value: &'a str,
        selector: Option<&'a str>,
        trailing_comment: Option<&'a str>,
    ) -> Candidate<'a> {
        Candidate {
            prop,
            value,
            selector,
            trailing_comment,
        }
    }

    #[test]
    fn test_plain_convert() {
        let v = evaluate(&config(), &candidate("width", "10px", Some(".a"), None));
        assert_eq!(v, Verdict::convert(false));
    }

    #[test]
    fn test_no_source_unit() {
        let v = evaluate(&config(), &candidate("width", "10em", Some(".a"), None));
        assert_eq!(v, Verdict::skip(SkipReason::NoSourceUnit, false));
    }

    #[test]
    fn test_unit_presence_is_case_sensitive() {
        let v = evaluate(&config(), &candidate("width", "10PX", Some(".a"), None));
        assert_eq!(v.action, Action::Skip(SkipReason::NoSourceUnit));
    }

    #[test]
    fn test_no_source_unit_consumes_stale_disable() {
        let v = evaluate(&config(), &candidate("color", "red", Some(".a"), Some("off")));
        assert_eq!(v, Verdict::skip(SkipReason::NoSourceUnit, true));
    }

    #[test]
    fn test_no_source_unit_keeps_enable() {
        let v = evaluate(&config(), &candidate("color", "red", Some(".a"), Some("on")));
        assert_eq!(v, Verdict::skip(SkipReason::NoSourceUnit, false));
    }

    #[test]
    fn test_disable_comment() {
        let v = evaluate(&config(), &candidate("width", "10px", Some(".a"), Some("off")));
        assert_eq!(v, Verdict::skip(SkipReason::DisabledByComment, true));
    }

    #[test]
    fn test_disable_beats_selector_blacklist() {
        let v = evaluate(
            &config(),
            &candidate("width", "10px", Some(".ignore"), Some("off")),
        );
        assert_eq!(v, Verdict::skip(SkipReason::DisabledByComment, true));
    }

    // =========================================================================
    // Blacklists
    // =========================================================================

    #[test]
    fn test_selector_substring() {
        let v = evaluate(&config(), &candidate("width", "10px", Some("div .ignore span"), None));
        assert_eq!(v, Verdict::skip(SkipReason::SelectorBlacklisted, false));
    }

    #[test]
    fn test_selector_pattern() {
        let v = evaluate(&config(), &candidate("width", "10px", Some(".raw-box"), None));
        assert_eq!(v.action, Action::Skip(SkipReason::SelectorBlacklisted));
        let v = evaluate(&config(), &candidate("width", "10px", Some("div .raw-box"), None));
        assert_eq!(v.action, Action::Convert);
    }

    #[test]
    fn test_selector_blacklist_ignores_enable() {
        let v = evaluate(&config(), &candidate("width", "10px", Some(".ignore"), Some("on")));
        assert_eq!(v, Verdict::skip(SkipReason::SelectorBlacklisted, false));
    }

    #[test]
    fn test_selector_blacklist_checks_selector_not_property() {
        let v = evaluate(&config(), &candidate("ignore", "10px", Some(".a"), None));
        assert_eq!(v.action, Action::Convert);
    }

    #[test]
    fn test_no_selector_never_blacklisted() {
        let v = evaluate(&config(), &candidate("width", "10px", None, None));
        assert_eq!(v.action, Action::Convert);
    }

    #[test]
    fn test_property_blacklist() {
        let v = evaluate(&config(), &candidate("border-width", "2px", Some(".a"), None));
        assert_eq!(v, Verdict::skip(SkipReason::PropertyBlacklisted, false));
    }

    #[test]
    fn test_enable_overrides_property_blacklist() {
        let v = evaluate(&config(), &candidate("border-width", "2px", Some(".a"), Some("on")));
        assert_eq!(v, Verdict::convert(true));
    }

    #[test]
    fn test_enable_on_eligible_declaration_still_consumed() {
        let v = evaluate(&config(), &candidate("width", "10px", Some(".a"), Some("on")));
        assert_eq!(v, Verdict::convert(true));
    }

    #[test]
    fn test_unrelated_comment_ignored() {
        let v = evaluate(&config(), &candidate("width", "10px", Some(".a"), Some("note")));
        assert_eq!(v, Verdict::convert(false));
    }

    // =========================================================================
    // Directives
    // =========================================================================

    #[test]
    fn test_directive_exact_match() {
        let config = Config::default();
        assert_eq!(Directive::parse("on", &config), Some(Directive::Enable));
        assert_eq!(Directive::parse("off", &config), Some(Directive::Disable));
        assert_eq!(Directive::parse(" on", &config), None);
        assert_eq!(Directive::parse("OFF", &config), None);
    }

    #[test]
    fn test_directive_same_strings_disable_wins() {
        let config = Config {
            enable_comment: "toggle".into(),
            disable_comment: "toggle".into(),
            ..Config::default()
        };
        assert_eq!(Directive::parse("toggle", &config), Some(Directive::Disable));
    }
}
