use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::{CategoryId, MealId};

/// Number of `strIngredientN` / `strMeasureN` slots the upstream schema carries.
pub const MAX_INGREDIENT_FIELDS: usize = 20;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MealCategory {
    #[serde(rename = "idCategory")]
    pub id: CategoryId,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb")]
    pub thumbnail_url: String,
    #[serde(rename = "strCategoryDescription")]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Meal {
    #[serde(rename = "idMeal")]
    pub id: MealId,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IngredientMeasure {
    pub index: usize,
    pub measure: String,
    pub ingredient: String,
}

/// Full recipe for one meal.
///
/// The wire format spreads ingredients over numbered fields
/// (`strIngredient1`, `strMeasure1`, ...). They are folded into
/// [`MealDetails::ingredient_measures`] on decode and spread back out on
/// encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MealDetails {
    pub id: MealId,
    pub name: String,
    pub instructions: String,
    pub thumbnail_url: String,
    pub ingredient_measures: Vec<IngredientMeasure>,
}

impl MealDetails {
    /// Pairs measures with ingredients by position.
    ///
    /// Blank entries are dropped from each sequence before zipping, and the
    /// resulting pairs are re-indexed from zero.
    pub fn pair_ingredients<M, I>(measures: M, ingredients: I) -> Vec<IngredientMeasure>
    where
        M: IntoIterator<Item = String>,
        I: IntoIterator<Item = String>,
    {
        let measures = measures.into_iter().filter_map(non_blank);
        let ingredients = ingredients.into_iter().filter_map(non_blank);

        measures
            .zip(ingredients)
            .enumerate()
            .map(|(index, (measure, ingredient))| IngredientMeasure {
                index,
                measure,
                ingredient,
            })
            .collect()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Deserialize)]
struct RawMealDetails {
    #[serde(rename = "idMeal")]
    id: MealId,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strInstructions")]
    instructions: String,
    #[serde(rename = "strMealThumb")]
    thumbnail_url: String,
    #[serde(flatten)]
    numbered: Map<String, Value>,
}

impl RawMealDetails {
    fn numbered_values(&self, prefix: &str) -> Vec<String> {
        (1..=MAX_INGREDIENT_FIELDS)
            .filter_map(|i| {
                self.numbered
                    .get(&format!("{prefix}{i}"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for MealDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMealDetails::deserialize(deserializer)?;
        let ingredient_measures = Self::pair_ingredients(
            raw.numbered_values("strMeasure"),
            raw.numbered_values("strIngredient"),
        );

        Ok(Self {
            id: raw.id,
            name: raw.name,
            instructions: raw.instructions,
            thumbnail_url: raw.thumbnail_url,
            ingredient_measures,
        })
    }
}

impl Serialize for MealDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4 + 2 * self.ingredient_measures.len()))?;
        map.serialize_entry("idMeal", &self.id)?;
        map.serialize_entry("strMeal", &self.name)?;
        map.serialize_entry("strInstructions", &self.instructions)?;
        map.serialize_entry("strMealThumb", &self.thumbnail_url)?;
        for (slot, pair) in self.ingredient_measures.iter().enumerate() {
            map.serialize_entry(&format!("strIngredient{}", slot + 1), &pair.ingredient)?;
            map.serialize_entry(&format!("strMeasure{}", slot + 1), &pair.measure)?;
        }
        map.end()
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct CategoriesEnvelope {
    pub categories: Option<Vec<MealCategory>>,
}

/// `lookup.php` and `filter.php` answer `{"meals": null}` when nothing matches.
#[derive(Deserialize, Debug)]
pub(crate) struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}
