//! # Nutrition Aggregator Module
//!
//! Turns a list of free-text ingredient lines into nutrient totals using a
//! reference table.
//!
//! Each line is parsed, resolved against the table (exact name, then the name
//! inside a reference key, then a reference key inside the name), converted to
//! the reference entry's unit, and accumulated. Unresolved lines contribute
//! nothing. Totals are rounded to one decimal place once, at the end.

use crate::ingredient_parser::{parse, ParsedIngredientLine, Unit};
use crate::nutrition_model::{Nutrient, NutritionTotals, ReferenceIngredientEntry, ReferenceTable};
use tracing::{debug, info};

/// Aggregate nutrient totals for `lines`
///
/// # Examples
///
/// ```rust
/// use cookify::nutrition_aggregator::aggregate;
/// use cookify::nutrition_model::ReferenceTable;
///
/// let reference = ReferenceTable::from_json_str(r#"{"ingredients": {
///     "flour": {"unit": "cup", "calories_per_unit": 455, "protein_per_unit": 13,
///               "carbs_per_unit": 95, "fats_per_unit": 1.2, "fiber_per_unit": 3.4}
/// }}"#)?;
///
/// let totals = aggregate(&["2 cups flour", "unicorn dust"], &reference);
/// assert_eq!(totals.calories.value, 910.0);
/// assert_eq!(totals.fats.value, 2.4);
/// # Ok::<(), cookify::engine_errors::EngineError>(())
/// ```
pub fn aggregate<S: AsRef<str>>(lines: &[S], reference: &ReferenceTable) -> NutritionTotals {
    let mut totals = NutritionTotals::default();
    let mut resolved = 0;

    for line in lines {
        let parsed = parse(line.as_ref());
        let Some(entry) = resolve(&parsed.name, reference) else {
            debug!("Unresolved ingredient '{}', skipping", parsed.name);
            continue;
        };
        resolved += 1;

        let amount = scaled_quantity(&parsed, &entry.unit);
        debug!(
            "'{}' -> '{}': {} {:?} = {} {}",
            line.as_ref(),
            entry.name,
            parsed.quantity,
            parsed.unit,
            amount,
            entry.unit
        );

        for nutrient in Nutrient::ALL {
            totals.get_mut(nutrient).value += amount * entry.per_unit(nutrient);
        }
    }

    info!(
        "Aggregated nutrition for {} lines ({} resolved)",
        lines.len(),
        resolved
    );
    totals.rounded()
}

/// Find the reference entry for an ingredient name
///
/// Tries an exact key first, then a key containing `name`, then a key contained
/// in `name`. Substring candidates are taken in table order. Blank names never resolve.
pub fn resolve<'a>(name: &str, reference: &'a ReferenceTable) -> Option<&'a ReferenceIngredientEntry> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    reference
        .get(name)
        .or_else(|| reference.iter().find(|entry| entry.name.contains(name)))
        .or_else(|| {
            reference
                .iter()
                .find(|entry| !entry.name.is_empty() && name.contains(entry.name.as_str()))
        })
}

/// Factor converting one `from` unit into the reference unit `to`
///
/// Only tablespoon→cup, teaspoon→tablespoon and teaspoon→cup convert; unit-less
/// lines, identical units and any other pair use a factor of 1.
pub fn conversion_factor(from: Option<Unit>, to: &str) -> f64 {
    let Some(from) = from else {
        return 1.0;
    };
    match (from, Unit::from_token(to)) {
        (Unit::Tablespoon, Some(Unit::Cup)) => 1.0 / 16.0,
        (Unit::Teaspoon, Some(Unit::Tablespoon)) => 1.0 / 3.0,
        (Unit::Teaspoon, Some(Unit::Cup)) => 1.0 / 48.0,
        _ => 1.0,
    }
}

/// The parsed quantity expressed in the reference entry's unit
pub fn scaled_quantity(parsed: &ParsedIngredientLine, reference_unit: &str) -> f64 {
    parsed.quantity * conversion_factor(parsed.unit, reference_unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceTable {
        ReferenceTable::from_json_str(
            r#"{"ingredients": {
                "flour": {"unit": "cup", "calories_per_unit": 455, "protein_per_unit": 13,
                          "carbs_per_unit": 95, "fats_per_unit": 1.2, "fiber_per_unit": 3.4},
                "sugar": {"unit": "cup", "calories_per_unit": 774, "carbs_per_unit": 200},
                "butter": {"unit": "tablespoon", "calories_per_unit": 102, "fats_per_unit": 11.5},
                "egg": {"unit": "whole", "calories_per_unit": 72, "protein_per_unit": 6.3,
                        "fats_per_unit": 4.8},
                "chicken breast": {"unit": "ounce", "calories_per_unit": 31, "protein_per_unit": 6.5}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(aggregate(&empty, &reference()), NutritionTotals::default());
    }

    #[test]
    fn test_teaspoons_to_cups() {
        let totals = aggregate(&["3 tsp sugar"], &reference());
        // 3/48 cup * 774 kcal = 48.375
        assert_eq!(totals.calories.value, 48.4);
        assert_eq!(totals.carbs.value, 12.5);
        assert_eq!(scaled_quantity(&parse("3 teaspoons sugar"), "cup"), 0.0625);
    }

    #[test]
    fn test_conversion_table() {
        assert_eq!(conversion_factor(Some(Unit::Tablespoon), "cup"), 1.0 / 16.0);
        assert_eq!(conversion_factor(Some(Unit::Teaspoon), "tablespoon"), 1.0 / 3.0);
        assert_eq!(conversion_factor(Some(Unit::Teaspoon), "cup"), 1.0 / 48.0);
        assert_eq!(conversion_factor(Some(Unit::Cup), "cup"), 1.0);
        assert_eq!(conversion_factor(Some(Unit::Teaspoon), "tbsp"), 1.0 / 3.0);
        // No reverse conversions
        assert_eq!(conversion_factor(Some(Unit::Cup), "tablespoon"), 1.0);
        assert_eq!(conversion_factor(Some(Unit::Ounce), "gram"), 1.0);
        assert_eq!(conversion_factor(None, "cup"), 1.0);
    }

    #[test]
    fn test_resolution_order() {
        let table = reference();
        assert_eq!(resolve("egg", &table).map(|e| e.name.as_str()), Some("egg"));
        // name inside a key
        assert_eq!(
            resolve("chicken", &table).map(|e| e.name.as_str()),
            Some("chicken breast")
        );
        // key inside the name
        assert_eq!(
            resolve("unsalted butter", &table).map(|e| e.name.as_str()),
            Some("butter")
        );
        assert!(resolve("saffron", &table).is_none());
        assert!(resolve("", &table).is_none());
    }

    #[test]
    fn test_unresolved_lines_are_skipped() {
        let totals = aggregate(&["2 whole eggs", "a pinch of saffron", ""], &reference());
        assert_eq!(totals.calories.value, 144.0);
        assert_eq!(totals.protein.value, 12.6);
        assert_eq!(totals.fats.value, 9.6);
        assert_eq!(totals.fiber.value, 0.0);
    }

    #[test]
    fn test_accumulates_and_rounds_once() {
        let totals = aggregate(
            &["2 cups flour", "1/2 cup sugar", "2 tbsp butter", "4 oz chicken breast"],
            &reference(),
        );
        // 910 + 387 + 204 + 124
        assert_eq!(totals.calories.value, 1625.0);
        // 26 + 26
        assert_eq!(totals.protein.value, 52.0);
        // 2.4 + 23
        assert_eq!(totals.fats.value, 25.4);
        assert_eq!(totals.carbs.value, 290.0);
        assert_eq!(totals.fiber.value, 6.8);
    }

    #[test]
    fn test_multi_line_entry_keeps_quantity() {
        let totals = aggregate(&["2 cups flour\nsifted"], &reference());
        assert_eq!(totals.calories.value, 910.0);
    }

    #[test]
    fn test_unknown_unit_pair_uses_raw_quantity() {
        // flour is per cup; ounces have no conversion so 3 is used as-is
        let totals = aggregate(&["3 oz flour"], &reference());
        assert_eq!(totals.calories.value, 1365.0);
    }
}
