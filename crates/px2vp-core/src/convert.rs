//! Pixel to viewport unit conversion.

use crate::config::Config;
use crate::matcher::MatchToken;

/// Converts matched source-unit numbers into viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    viewport_width: f64,
    min_pixel_value: f64,
    precision: u32,
}

impl UnitConverter {
    pub fn new(viewport_width: f64, min_pixel_value: f64, precision: u32) -> Self {
        Self {
            viewport_width,
            min_pixel_value,
            precision,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.viewport_width,
            config.min_pixel_value,
            config.precision,
        )
    }

    /// Convert a numeric literal to `<value><unit>`.
    ///
    /// Returns `None` when the number is at or below the minimum pixel value
    /// (the threshold is inclusive) or does not parse.
    pub fn convert(&self, number: &str, unit: &str) -> Option<String> {
        let pixels: f64 = number.parse().ok()?;
        if pixels <= self.min_pixel_value {
            return None;
        }
        let value = to_fixed(pixels / self.viewport_width * 100.0, self.precision);
        // `f64` Display never switches to exponent form
        Some(format!("{value}{unit}"))
    }

    /// Replacement text for a token: the converted value, or the token as written.
    pub fn replace(&self, token: &MatchToken<'_>, unit: &str) -> String {
        self.convert(token.number, unit)
            .unwrap_or_else(|| token.text.to_string())
    }
}

/// Round `number` to `precision` decimal places, half up.
///
/// Floors at one extra digit first, then rounds that digit away, so
/// `13.333335` becomes `13.33334` and float noise below the extra digit is
/// never carried up.
pub fn to_fixed(number: f64, precision: u32) -> f64 {
    let multiplier = 10f64.powi(precision as i32 + 1);
    let whole = (number * multiplier).floor();
    (whole / 10.0 + 0.5).floor() * 10.0 / multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn default_converter() -> UnitConverter {
        UnitConverter::from_config(&Config::default())
    }

    // =========================================================================
    // to_fixed
    // =========================================================================

    #[test]
    fn test_to_fixed_repeating() {
        assert_eq!(to_fixed(100.0 / 750.0 * 100.0, 5), 13.33333);
        assert_eq!(to_fixed(32.0 / 750.0 * 100.0, 5), 4.26667);
    }

    #[test]
    fn test_to_fixed_integer() {
        assert_eq!(to_fixed(10.0, 5), 10.0);
        assert_eq!(to_fixed(0.0, 5), 0.0);
    }

    #[test]
    fn test_to_fixed_half_up() {
        assert_eq!(to_fixed(1.25, 1), 1.3);
        assert_eq!(to_fixed(1.24, 1), 1.2);
        assert_eq!(to_fixed(2.5, 0), 3.0);
    }

    #[test]
    fn test_to_fixed_zero_precision() {
        assert_eq!(to_fixed(13.3333, 0), 13.0);
        assert_eq!(to_fixed(13.6, 0), 14.0);
    }

    // =========================================================================
    // convert
    // =========================================================================

    #[test]
    fn test_convert_default() {
        let c = default_converter();
        assert_eq!(c.convert("100", "vmin"), Some("13.33333vmin".into()));
        assert_eq!(c.convert("32", "vw"), Some("4.26667vw".into()));
        assert_eq!(c.convert("75", "vmin"), Some("10vmin".into()));
    }

    #[test]
    fn test_convert_threshold_inclusive() {
        let c = default_converter();
        assert_eq!(c.convert("1", "vmin"), None);
        assert_eq!(c.convert("0.5", "vmin"), None);
        assert_eq!(c.convert("1.5", "vmin"), Some("0.2vmin".into()));
    }

    #[test]
    fn test_convert_custom_threshold() {
        let c = UnitConverter::new(750.0, 0.0, 5);
        assert_eq!(c.convert("1", "vmin"), Some("0.13333vmin".into()));
        assert_eq!(c.convert("0", "vmin"), None);
    }

    #[test]
    fn test_convert_leading_dot() {
        let c = UnitConverter::new(100.0, 0.0, 2);
        assert_eq!(c.convert(".5", "vw"), Some("0.5vw".into()));
    }

    #[test]
    fn test_convert_custom_viewport() {
        let c = UnitConverter::new(375.0, 1.0, 3);
        assert_eq!(c.convert("100", "vw"), Some("26.667vw".into()));
    }

    #[test]
    fn test_convert_tiny_value_prints_plain_decimal() {
        let c = UnitConverter::new(750.0, 0.0, 15);
        assert_eq!(
            c.convert("0.000001", "vw"),
            Some("0.000000133333333vw".into())
        );
    }

    #[test]
    fn test_replace_keeps_small_token() {
        let c = default_converter();
        let token = MatchToken {
            text: "1PX",
            number: "1",
            span: 0..3,
        };
        assert_eq!(c.replace(&token, "vmin"), "1PX");
    }
}
