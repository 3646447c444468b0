//! # Ingredient Parser
//!
//! This module parses a single free-text ingredient line into quantity, unit and name.
//!
//! ## Features
//!
//! - Integer, decimal, fraction (1/2) and mixed-number (1 1/2) amounts
//! - Unit synonyms canonicalized (tbsp → tablespoon, tsp → teaspoon, oz → ounce)
//! - Never fails: unparseable lines degrade to one unit-less item named by the whole line
//!
//! ## Usage
//!
//! ```rust
//! use cookify::ingredient_parser::{parse, Unit};
//!
//! let parsed = parse("1/2 cup flour");
//! assert_eq!(parsed.quantity, 0.5);
//! assert_eq!(parsed.unit, Some(Unit::Cup));
//! assert_eq!(parsed.name, "flour");
//! ```

use crate::ingredient_patterns::{INGREDIENT_LINE_REGEX, UNIT_SYNONYMS};
use crate::text_normalizer::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Amount used when a line has no readable quantity
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Measurement units recognized in ingredient lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Cup,
    Tablespoon,
    Teaspoon,
    Whole,
    White,
    Ounce,
}

impl Unit {
    /// Canonical unit for a unit token, if recognized
    pub fn from_token(token: &str) -> Option<Self> {
        UNIT_SYNONYMS.get(normalize(token).as_str()).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cup => "cup",
            Unit::Tablespoon => "tablespoon",
            Unit::Teaspoon => "teaspoon",
            Unit::Whole => "whole",
            Unit::White => "white",
            Unit::Ounce => "ounce",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ingredient line split into its parts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIngredientLine {
    /// Non-negative amount; 1 when absent or unreadable
    pub quantity: f64,
    /// `None` means unit-less (per item)
    pub unit: Option<Unit>,
    /// Normalized ingredient name
    pub name: String,
}

impl ParsedIngredientLine {
    fn fallback(line: &str) -> Self {
        Self {
            quantity: DEFAULT_QUANTITY,
            unit: None,
            name: line.to_string(),
        }
    }
}

impl fmt::Display for ParsedIngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{} {} {}", self.quantity, unit, self.name),
            None => write!(f, "{} {}", self.quantity, self.name),
        }
    }
}

/// Parse a single ingredient line
pub fn parse(line: &str) -> ParsedIngredientLine {
    // The line pattern is anchored and `.` stops at newlines
    let line = normalize(line)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let Some(captures) = INGREDIENT_LINE_REGEX.captures(&line) else {
        debug!("Ingredient line did not match pattern, using whole line: '{}'", line);
        return ParsedIngredientLine::fallback(&line);
    };

    let name = captures.name("name").map(|m| m.as_str().trim()).unwrap_or("");
    if name.is_empty() {
        debug!("No ingredient name in '{}', using whole line", line);
        return ParsedIngredientLine::fallback(&line);
    }

    let quantity = captures
        .name("qty")
        .map(|m| parse_quantity(m.as_str()))
        .unwrap_or(DEFAULT_QUANTITY);
    let unit = captures.name("unit").and_then(|m| Unit::from_token(m.as_str()));

    let parsed = ParsedIngredientLine {
        quantity,
        unit,
        name: name.to_string(),
    };
    trace!("Parsed '{}' -> {:?}", line, parsed);
    parsed
}

/// Parse an amount: integer, decimal, fraction or mixed number
///
/// Returns [`DEFAULT_QUANTITY`] when the amount cannot be read, including
/// zero denominators.
pub fn parse_quantity(qty_str: &str) -> f64 {
    let qty_str = qty_str.trim();

    let amount = match qty_str.split_once(char::is_whitespace) {
        Some((whole, fraction)) => whole
            .parse::<f64>()
            .ok()
            .zip(parse_fraction(fraction.trim()))
            .map(|(whole, fraction)| whole + fraction),
        None => parse_fraction(qty_str),
    };

    match amount {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            debug!("Unreadable quantity '{}', defaulting to {}", qty_str, DEFAULT_QUANTITY);
            DEFAULT_QUANTITY
        }
    }
}

fn parse_fraction(s: &str) -> Option<f64> {
    match s.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            Some(numerator / denominator)
        }
        None => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fraction_with_unit() {
        let parsed = parse("1/2 cup flour");
        assert_eq!(
            parsed,
            ParsedIngredientLine {
                quantity: 0.5,
                unit: Some(Unit::Cup),
                name: "flour".to_string()
            }
        );
    }

    #[test]
    fn test_parse_name_only() {
        let parsed = parse("tomato");
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.name, "tomato");
    }

    #[test]
    fn test_parse_normalizes_line() {
        let parsed = parse("  2 Cups Whole Wheat Flour ");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, Some(Unit::Cup));
        assert_eq!(parsed.name, "whole wheat flour");
    }

    #[test]
    fn test_parse_collapses_internal_whitespace() {
        let parsed = parse("2 cups flour\nsifted");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, Some(Unit::Cup));
        assert_eq!(parsed.name, "flour sifted");

        let parsed = parse("1/2\tcup\r\n  brown   sugar");
        assert_eq!(parsed.quantity, 0.5);
        assert_eq!(parsed.unit, Some(Unit::Cup));
        assert_eq!(parsed.name, "brown sugar");
    }

    #[test]
    fn test_unit_synonyms() {
        assert_eq!(parse("1 tbsp olive oil").unit, Some(Unit::Tablespoon));
        assert_eq!(parse("3 tsp sugar").unit, Some(Unit::Teaspoon));
        assert_eq!(parse("8 oz cheddar").unit, Some(Unit::Ounce));
        assert_eq!(parse("2 tablespoons butter").unit, Some(Unit::Tablespoon));
        assert_eq!(parse("1 tbsp. honey").name, "honey");
    }

    #[test]
    fn test_whole_and_white_are_units() {
        let parsed = parse("2 whole eggs");
        assert_eq!(parsed.unit, Some(Unit::Whole));
        assert_eq!(parsed.name, "eggs");

        let parsed = parse("1 cup white sugar");
        assert_eq!(parsed.unit, Some(Unit::Cup));
        assert_eq!(parsed.name, "white sugar");
    }

    #[test]
    fn test_quantity_without_unit() {
        let parsed = parse("3 eggs");
        assert_eq!(parsed.quantity, 3.0);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.name, "eggs");
    }

    #[test]
    fn test_decimal_and_mixed_numbers() {
        assert_eq!(parse("1.5 cups milk").quantity, 1.5);
        assert_eq!(parse("1 1/2 cups milk").quantity, 1.5);
        assert_eq!(parse("2 3/4 tsp salt").quantity, 2.75);
    }

    #[test]
    fn test_unreadable_quantity_defaults_to_one() {
        assert_eq!(parse("1/0 cup rice").quantity, 1.0);
        assert_eq!(parse("1.2.3 cup rice").quantity, 1.0);
        assert_eq!(parse_quantity("./"), 1.0);
    }

    #[test]
    fn test_degenerate_lines_keep_whole_text() {
        let parsed = parse("2 cups");
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.name, "2 cups");

        let parsed = parse("");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.unit, None);
    }

    #[test]
    fn test_unit_from_token() {
        assert_eq!(Unit::from_token("TBSP"), Some(Unit::Tablespoon));
        assert_eq!(Unit::from_token("cups"), Some(Unit::Cup));
        assert_eq!(Unit::from_token("gram"), None);
    }

    #[test]
    fn test_unit_serializes_lowercase() {
        let parsed = parse("2 oz chocolate");
        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["unit"], serde_json::json!("ounce"));

        let value = serde_json::to_value(parse("banana")).unwrap();
        assert!(value["unit"].is_null());
    }
}
