//! # Nutrition Tests
//!
//! Aggregation against the bundled reference table and file-backed reference
//! tables loaded through the cache.

use cookify::api_response::NutritionSummary;
use cookify::engine_config::DEFAULT_SERVING_DIVISOR;
use cookify::ingredient_parser::{parse, Unit};
use cookify::nutrition_aggregator::{aggregate, resolve, scaled_quantity};
use cookify::nutrition_model::{NutritionTotals, ReferenceTable};
use cookify::reference_data::ReferenceDataCache;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn bundled_reference() -> ReferenceDataCache {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/nutrition_data.json");
    ReferenceDataCache::from_path(path)
}

#[test]
fn test_pancake_batter() {
    let cache = bundled_reference();
    let reference = cache.try_get().unwrap();

    let lines = [
        "2 cups flour",
        "1 cup milk",
        "2 whole eggs",
        "2 tbsp sugar",
        "1 tsp baking powder",
        "3 tbsp butter",
        "a pinch of nutmeg",
    ];
    let total = aggregate(&lines, &reference);

    assert_eq!(total.calories.value, 1607.8);
    assert_eq!(total.protein.value, 46.6);
    assert_eq!(total.carbs.value, 228.8);
    assert_eq!(total.fats.value, 54.4);
    assert_eq!(total.fiber.value, 6.8);

    let summary = NutritionSummary::new(total, DEFAULT_SERVING_DIVISOR);
    assert_eq!(summary.per_serving.calories.value, 402.0);
    assert_eq!(summary.per_serving.protein.value, 11.7);
    assert_eq!(summary.per_serving.carbs.value, 57.2);
    assert_eq!(summary.per_serving.fiber.unit, "g");
}

#[test]
fn test_empty_lines_are_all_zero() {
    let cache = bundled_reference();
    let empty: [&str; 0] = [];
    let total = aggregate(&empty, &cache.get());

    assert_eq!(total, NutritionTotals::default());
    assert_eq!(total.calories.unit, "kcal");
    assert_eq!(total.protein.unit, "g");
}

#[test]
fn test_teaspoons_of_a_per_cup_ingredient() {
    let parsed = parse("3 teaspoons sugar");
    assert_eq!(parsed.unit, Some(Unit::Teaspoon));
    assert_eq!(scaled_quantity(&parsed, "cup"), 0.0625);
}

#[test]
fn test_plural_name_resolves_to_singular_key() {
    let cache = bundled_reference();
    let reference = cache.get();
    assert_eq!(resolve("eggs", &reference).map(|e| e.name.as_str()), Some("egg"));
    assert_eq!(
        resolve("egg white", &reference).map(|e| e.name.as_str()),
        Some("egg white")
    );
    assert_eq!(
        resolve("cheddar", &reference).map(|e| e.name.as_str()),
        Some("cheddar cheese")
    );
}

#[test]
fn test_file_backed_reference_preserves_key_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{"ingredients": {{
            "Green Beans": {{"unit": "cup", "calories_per_unit": 31, "fiber_per_unit": 3.4}},
            "beans": {{"unit": "cup", "calories_per_unit": 227, "fiber_per_unit": 15}}
        }}}}"#
    )?;

    let cache = ReferenceDataCache::from_path(file.path());
    let reference = cache.try_get()?;
    let names: Vec<&str> = reference.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["green beans", "beans"]);

    // "bean" is inside both keys; the first in file order wins
    let total = aggregate(&["2 cups bean"], &reference);
    assert_eq!(total.calories.value, 62.0);
    assert_eq!(total.fiber.value, 6.8);
    Ok(())
}

#[test]
fn test_unreadable_reference_yields_empty_totals() {
    let cache = ReferenceDataCache::from_path("/nonexistent/nutrition.json");
    let reference = cache.get();
    assert!(reference.is_empty());
    assert!(!cache.is_loaded());

    let total = aggregate(&["2 cups flour"], &reference);
    assert_eq!(total, NutritionTotals::default());
}

#[test]
fn test_reference_table_from_inline_json() {
    let table = ReferenceTable::from_json_str(
        r#"{"ingredients": {"quinoa": {"unit": "cup", "calories_per_unit": 222, "protein_per_unit": 8}}}"#,
    )
    .unwrap();
    let total = aggregate(&["1 1/2 cups quinoa"], &table);
    assert_eq!(total.calories.value, 333.0);
    assert_eq!(total.protein.value, 12.0);
}
