//! # Nutrition Data Model
//!
//! Nutrient totals and the static reference table they are computed from.
//!
//! The reference table is read from JSON shaped like:
//!
//! ```json
//! {
//!   "ingredients": {
//!     "flour": {
//!       "unit": "cup",
//!       "calories_per_unit": 455,
//!       "protein_per_unit": 13,
//!       "carbs_per_unit": 95,
//!       "fats_per_unit": 1.2,
//!       "fiber_per_unit": 3.4
//!     }
//!   }
//! }
//! ```
//!
//! Entry order in the file is preserved; it decides which entry wins when an
//! ingredient name only matches by substring.

use crate::engine_errors::EngineError;
use crate::text_normalizer::normalize;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

/// The five tracked nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fats,
    Fiber,
}

impl Nutrient {
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fats,
        Nutrient::Fiber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fats => "fats",
            Nutrient::Fiber => "fiber",
        }
    }

    /// Unit reported for this nutrient
    pub fn default_unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }
}

/// An amount of one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientQuantity {
    pub value: f64,
    pub unit: String,
}

impl NutrientQuantity {
    pub fn zero(nutrient: Nutrient) -> Self {
        Self {
            value: 0.0,
            unit: nutrient.default_unit().to_string(),
        }
    }
}

/// Totals for all five nutrients; every nutrient is always present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: NutrientQuantity,
    pub protein: NutrientQuantity,
    pub carbs: NutrientQuantity,
    pub fats: NutrientQuantity,
    pub fiber: NutrientQuantity,
}

impl Default for NutritionTotals {
    fn default() -> Self {
        Self {
            calories: NutrientQuantity::zero(Nutrient::Calories),
            protein: NutrientQuantity::zero(Nutrient::Protein),
            carbs: NutrientQuantity::zero(Nutrient::Carbs),
            fats: NutrientQuantity::zero(Nutrient::Fats),
            fiber: NutrientQuantity::zero(Nutrient::Fiber),
        }
    }
}

impl NutritionTotals {
    pub fn get(&self, nutrient: Nutrient) -> &NutrientQuantity {
        match nutrient {
            Nutrient::Calories => &self.calories,
            Nutrient::Protein => &self.protein,
            Nutrient::Carbs => &self.carbs,
            Nutrient::Fats => &self.fats,
            Nutrient::Fiber => &self.fiber,
        }
    }

    pub fn get_mut(&mut self, nutrient: Nutrient) -> &mut NutrientQuantity {
        match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fats => &mut self.fats,
            Nutrient::Fiber => &mut self.fiber,
        }
    }

    /// Round every value to one decimal place
    pub fn rounded(mut self) -> Self {
        for nutrient in Nutrient::ALL {
            let quantity = self.get_mut(nutrient);
            quantity.value = round_one_decimal(quantity.value);
        }
        self
    }

    /// Per-serving view: every value divided by `servings`, rounded to one decimal
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cookify::nutrition_model::NutritionTotals;
    ///
    /// let mut totals = NutritionTotals::default();
    /// totals.calories.value = 910.0;
    /// totals.protein.value = 13.0;
    ///
    /// let serving = totals.per_serving(4.0);
    /// assert_eq!(serving.calories.value, 227.5);
    /// assert_eq!(serving.protein.value, 3.3);
    /// ```
    pub fn per_serving(&self, servings: f64) -> Self {
        let mut serving = self.clone();
        for nutrient in Nutrient::ALL {
            let quantity = serving.get_mut(nutrient);
            quantity.value = round_one_decimal(quantity.value / servings);
        }
        serving
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Nutrient density of one reference ingredient, per `unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceIngredientEntry {
    #[serde(skip)]
    pub name: String,
    /// Native unit the per-unit values are expressed in
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub calories_per_unit: f64,
    #[serde(default)]
    pub protein_per_unit: f64,
    #[serde(default)]
    pub carbs_per_unit: f64,
    #[serde(default)]
    pub fats_per_unit: f64,
    #[serde(default)]
    pub fiber_per_unit: f64,
}

impl ReferenceIngredientEntry {
    pub fn per_unit(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories_per_unit,
            Nutrient::Protein => self.protein_per_unit,
            Nutrient::Carbs => self.carbs_per_unit,
            Nutrient::Fats => self.fats_per_unit,
            Nutrient::Fiber => self.fiber_per_unit,
        }
    }
}

/// Reference nutrition table keyed by normalized ingredient name, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    entries: Vec<ReferenceIngredientEntry>,
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    /// Build a table from entries; a repeated name replaces the earlier entry in place
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ReferenceIngredientEntry>,
    {
        let mut table = Self::default();
        for mut entry in entries {
            entry.name = normalize(&entry.name);
            match table.index.get(&entry.name) {
                Some(&position) => table.entries[position] = entry,
                None => {
                    table.index.insert(entry.name.clone(), table.entries.len());
                    table.entries.push(entry);
                }
            }
        }
        table
    }

    /// Parse the `{"ingredients": {...}}` reference document
    ///
    /// Entries whose values are not objects of numbers are skipped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| EngineError::ReferenceData(format!("Invalid reference JSON: {e}")))?;
        let ingredients = match document.get("ingredients") {
            Some(Value::Object(map)) => map.clone(),
            Some(_) => {
                return Err(EngineError::ReferenceData(
                    "'ingredients' must be an object".to_string(),
                ))
            }
            None => Map::new(),
        };

        let entries = ingredients.into_iter().filter_map(|(name, value)| {
            match serde_json::from_value::<ReferenceIngredientEntry>(value) {
                Ok(mut entry) => {
                    entry.name = name;
                    Some(entry)
                }
                Err(e) => {
                    warn!("Skipping reference ingredient '{}': {}", name, e);
                    None
                }
            }
        });
        Ok(Self::from_entries(entries))
    }

    pub fn get(&self, name: &str) -> Option<&ReferenceIngredientEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// Entries in file order
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceIngredientEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ReferenceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, entry)?;
        }
        map.end()
    }
}
