use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::CellValue;

const MAX_PRECISION: u32 = 15;
const GENERAL_ROUNDING_DP: u32 = 10;

/// Display-unit scaling applied before a number is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayUnit {
    #[default]
    None,
    Thousands,
    Millions,
    Billions,
    Trillions,
}

impl DisplayUnit {
    /// Resolves a configured multiplier. `0` is "auto" and picks the unit
    /// from `reference_magnitude`; unknown multipliers render unscaled.
    #[must_use]
    pub fn from_multiplier(multiplier: f64, reference_magnitude: f64) -> Self {
        if multiplier == 0.0 {
            return Self::auto(reference_magnitude);
        }
        match multiplier {
            m if m == 1e3 => DisplayUnit::Thousands,
            m if m == 1e6 => DisplayUnit::Millions,
            m if m == 1e9 => DisplayUnit::Billions,
            m if m == 1e12 => DisplayUnit::Trillions,
            _ => DisplayUnit::None,
        }
    }

    fn auto(reference_magnitude: f64) -> Self {
        let magnitude = reference_magnitude.abs();
        if !magnitude.is_finite() {
            DisplayUnit::None
        } else if magnitude >= 1e12 {
            DisplayUnit::Trillions
        } else if magnitude >= 1e9 {
            DisplayUnit::Billions
        } else if magnitude >= 1e6 {
            DisplayUnit::Millions
        } else if magnitude >= 1e3 {
            DisplayUnit::Thousands
        } else {
            DisplayUnit::None
        }
    }

    #[must_use]
    pub const fn divisor(self) -> f64 {
        match self {
            DisplayUnit::None => 1.0,
            DisplayUnit::Thousands => 1e3,
            DisplayUnit::Millions => 1e6,
            DisplayUnit::Billions => 1e9,
            DisplayUnit::Trillions => 1e12,
        }
    }

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            DisplayUnit::None => "",
            DisplayUnit::Thousands => "K",
            DisplayUnit::Millions => "M",
            DisplayUnit::Billions => "bn",
            DisplayUnit::Trillions => "T",
        }
    }
}

/// Parsed numeric section of a column format string such as `"$#,0.00"`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FormatPattern {
    prefix: String,
    suffix: String,
    decimals: usize,
    grouping: bool,
    percent: bool,
}

impl FormatPattern {
    fn parse(format: &str) -> Option<Self> {
        // Only the positive section of a multi-section format is honored.
        let section = format.split(';').next().unwrap_or_default();
        let start = section.find(['0', '#'])?;
        let core_start = section[..start]
            .char_indices()
            .rev()
            .find(|(_, ch)| !matches!(ch, '.' | ','))
            .map_or(0, |(index, ch)| index + ch.len_utf8());
        let core_end = section[start..]
            .find(|ch: char| !matches!(ch, '0' | '#' | '.' | ','))
            .map_or(section.len(), |offset| start + offset);

        let core = &section[core_start..core_end];
        let decimals = core
            .split_once('.')
            .map_or(0, |(_, fraction)| {
                fraction.chars().filter(|ch| matches!(ch, '0' | '#')).count()
            });
        let prefix = strip_literal_escapes(&section[..core_start]);
        let suffix = strip_literal_escapes(&section[core_end..]);
        let percent = prefix.contains('%') || suffix.contains('%');

        Some(Self {
            prefix,
            suffix,
            decimals,
            grouping: core.contains(','),
            percent,
        })
    }
}

fn strip_literal_escapes(literal: &str) -> String {
    literal.chars().filter(|ch| !matches!(ch, '"' | '\\')).collect()
}

/// Formats raw cells for axis ticks and tooltips.
///
/// Built from a column format string, an optional display unit and an
/// optional decimal precision that overrides the format string decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFormatter {
    pattern: Option<FormatPattern>,
    unit: DisplayUnit,
    precision: Option<u32>,
}

impl ValueFormatter {
    /// Formatter driven only by a column format string.
    #[must_use]
    pub fn from_format(format: Option<&str>) -> Self {
        Self {
            pattern: format.and_then(FormatPattern::parse),
            unit: DisplayUnit::None,
            precision: None,
        }
    }

    /// Axis formatter: format string plus display units and precision.
    #[must_use]
    pub fn for_axis(
        format: Option<&str>,
        display_units: f64,
        precision: u32,
        reference_magnitude: f64,
    ) -> Self {
        Self {
            pattern: format.and_then(FormatPattern::parse),
            unit: DisplayUnit::from_multiplier(display_units, reference_magnitude),
            precision: Some(precision.min(MAX_PRECISION)),
        }
    }

    #[must_use]
    pub fn display_unit(&self) -> DisplayUnit {
        self.unit
    }

    #[must_use]
    pub fn format(&self, value: &CellValue) -> String {
        match value {
            CellValue::Number(number) => self.format_number(*number),
            CellValue::Text(text) => text.clone(),
            CellValue::Bool(true) => "True".to_owned(),
            CellValue::Bool(false) => "False".to_owned(),
            CellValue::Null => "(Blank)".to_owned(),
        }
    }

    #[must_use]
    pub fn format_number(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let percent = self.pattern.as_ref().is_some_and(|pattern| pattern.percent);
        let (scaled, unit) = if percent {
            (value * 100.0, DisplayUnit::None)
        } else {
            (value / self.unit.divisor(), self.unit)
        };

        let decimals = self.precision.map(|precision| precision as usize).or_else(|| {
            self.pattern.as_ref().map(|pattern| pattern.decimals)
        });
        let mut digits = match decimals {
            Some(decimals) => format_fixed(scaled, decimals),
            None => format_general(scaled),
        };
        if self.pattern.as_ref().is_some_and(|pattern| pattern.grouping) {
            digits = group_thousands(&digits);
        }

        match &self.pattern {
            Some(pattern) => format!(
                "{}{}{}{}",
                pattern.prefix,
                digits,
                unit.suffix(),
                pattern.suffix
            ),
            None => format!("{digits}{}", unit.suffix()),
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::from_format(None)
    }
}

fn format_fixed(value: f64, decimals: usize) -> String {
    let decimals = decimals.min(MAX_PRECISION as usize);
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let mut rounded = decimal
                .round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            format!("{rounded:.decimals$}")
        }
        None => format!("{value:.decimals$}"),
    }
}

fn format_general(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let mut rounded = decimal.round_dp(GENERAL_ROUNDING_DP).normalize();
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        None => value.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, unsigned) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_trims_binary_noise() {
        let formatter = ValueFormatter::default();
        assert_eq!(formatter.format_number(0.1 + 0.2), "0.3");
        assert_eq!(formatter.format_number(25.0), "25");
        assert_eq!(formatter.format_number(-0.0), "0");
    }

    #[test]
    fn format_string_controls_decimals_grouping_and_literals() {
        let formatter = ValueFormatter::from_format(Some("$#,0.00"));
        assert_eq!(formatter.format_number(1234567.891), "$1,234,567.89");

        let percent = ValueFormatter::from_format(Some("0.0%"));
        assert_eq!(percent.format_number(0.256), "25.6%");

        let quoted = ValueFormatter::from_format(Some("0\" days\""));
        assert_eq!(quoted.format_number(3.4), "3 days");
    }

    #[test]
    fn multi_byte_currency_prefixes_are_kept_intact() {
        let euro = ValueFormatter::from_format(Some("€#,0.00"));
        assert_eq!(euro.format_number(1234.5), "€1,234.50");

        let pound = ValueFormatter::from_format(Some("£0.0"));
        assert_eq!(pound.format_number(3.25), "£3.3");

        let suffixed = ValueFormatter::from_format(Some("0.00 €"));
        assert_eq!(suffixed.format_number(2.0), "2.00 €");
    }

    #[test]
    fn axis_precision_overrides_format_decimals() {
        let formatter = ValueFormatter::for_axis(Some("0.0000"), 1.0, 2, 0.0);
        assert_eq!(formatter.format_number(10.0), "10.00");
        assert_eq!(formatter.format_number(-0.001), "0.00");
    }

    #[test]
    fn display_units_scale_and_suffix() {
        let thousands = ValueFormatter::for_axis(None, 1e3, 1, 0.0);
        assert_eq!(thousands.format_number(12_345.0), "12.3K");

        let auto = ValueFormatter::for_axis(None, 0.0, 2, 2_500_000.0);
        assert_eq!(auto.display_unit(), DisplayUnit::Millions);
        assert_eq!(auto.format_number(1_500_000.0), "1.50M");

        let auto_small = ValueFormatter::for_axis(None, 0.0, 2, 25.0);
        assert_eq!(auto_small.format_number(25.0), "25.00");
    }

    #[test]
    fn non_numeric_cells_pass_through() {
        let formatter = ValueFormatter::for_axis(None, 0.0, 2, 0.0);
        assert_eq!(formatter.format(&CellValue::Text("Mon".to_owned())), "Mon");
        assert_eq!(formatter.format(&CellValue::Null), "(Blank)");
    }
}
