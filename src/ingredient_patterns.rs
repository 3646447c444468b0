//! # Ingredient Patterns Module
//!
//! This module contains the regex pattern and unit synonym table used to split
//! an ingredient line into quantity, unit and name.

use crate::ingredient_parser::Unit;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

// Optional amount (mixed number, fraction, integer or decimal), optional unit token, remainder
pub const INGREDIENT_LINE_PATTERN: &str = r"^(?:(?P<qty>\d+\s+\d+/\d+|[\d./]+)\s*)?(?:(?P<unit>cups?|tablespoons?|tbsp|teaspoons?|tsp|whole|white|ounces?|oz)\b\.?\s*)?(?P<name>.*)$";

lazy_static! {
    pub static ref INGREDIENT_LINE_REGEX: Regex =
        Regex::new(INGREDIENT_LINE_PATTERN).expect("Ingredient line pattern should be valid");

    /// Unit tokens and their canonical unit
    pub static ref UNIT_SYNONYMS: HashMap<&'static str, Unit> = {
        let mut map = HashMap::new();
        map.insert("cup", Unit::Cup);
        map.insert("cups", Unit::Cup);
        map.insert("tablespoon", Unit::Tablespoon);
        map.insert("tablespoons", Unit::Tablespoon);
        map.insert("tbsp", Unit::Tablespoon);
        map.insert("teaspoon", Unit::Teaspoon);
        map.insert("teaspoons", Unit::Teaspoon);
        map.insert("tsp", Unit::Teaspoon);
        map.insert("whole", Unit::Whole);
        map.insert("white", Unit::White);
        map.insert("ounce", Unit::Ounce);
        map.insert("ounces", Unit::Ounce);
        map.insert("oz", Unit::Ounce);
        map
    };
}
