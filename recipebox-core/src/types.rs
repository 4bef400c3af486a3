use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Opaque recipe identifier, assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The validated, mutable part of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipeFields {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cuisine_type: String,
    /// Minutes.
    pub cooking_time: u32,
}

/// A stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Recipe {
    #[serde(alias = "_id")]
    pub id: RecipeId,
    #[serde(flatten)]
    pub fields: RecipeFields,
}

impl Recipe {
    pub fn title(&self) -> &str {
        &self.fields.title
    }
}

/// Write payload as received from a caller.
///
/// Every field is optional so that a missing field is reported by
/// [`RecipeInput::validate`] instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<u32>,
}

impl RecipeInput {
    /// Check that every required field is present and non-blank.
    ///
    /// All missing fields are reported at once, by wire name, in
    /// declaration order. Whitespace-only text counts as missing, and the
    /// ingredient list is missing when no entry has text. Accepted values
    /// are returned exactly as given.
    pub fn validate(self) -> Result<RecipeFields, ValidationError> {
        let mut missing = Vec::new();

        let title = required_text(self.title, "title", &mut missing);

        let ingredients = self.ingredients.unwrap_or_default();
        if ingredients.iter().all(|i| is_blank(i)) {
            missing.push("ingredients");
        }

        let instructions = required_text(self.instructions, "instructions", &mut missing);
        let cuisine_type = required_text(self.cuisine_type, "cuisineType", &mut missing);

        let cooking_time = self.cooking_time;
        if cooking_time.is_none() {
            missing.push("cookingTime");
        }

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let cooking_time = cooking_time.unwrap_or_default();
        if cooking_time > MAX_COOKING_TIME {
            return Err(ValidationError::OutOfRange("cookingTime"));
        }

        Ok(RecipeFields {
            title,
            description: self.description,
            ingredients,
            instructions,
            cuisine_type,
            cooking_time,
        })
    }
}

/// Largest `cookingTime` every store can hold (a signed 32-bit column).
pub const MAX_COOKING_TIME: u32 = i32::MAX as u32;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn required_text(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    let value = value.unwrap_or_default();
    if is_blank(&value) {
        missing.push(name);
    }
    value
}

impl From<RecipeFields> for RecipeInput {
    fn from(fields: RecipeFields) -> Self {
        Self {
            title: Some(fields.title),
            description: fields.description,
            ingredients: Some(fields.ingredients),
            instructions: Some(fields.instructions),
            cuisine_type: Some(fields.cuisine_type),
            cooking_time: Some(fields.cooking_time),
        }
    }
}

/// Render an ingredient list for display, e.g. on a recipe card.
pub fn format_ingredients(ingredients: &[String]) -> String {
    ingredients.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tea_input() -> RecipeInput {
        serde_json::from_value(json!({
            "title": "Tea",
            "ingredients": ["water", "leaves"],
            "instructions": "boil",
            "cuisineType": "Asian",
            "cookingTime": 5
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_complete_input() {
        let fields = tea_input().validate().unwrap();
        assert_eq!(fields.title, "Tea");
        assert_eq!(fields.ingredients, vec!["water", "leaves"]);
        assert_eq!(fields.cuisine_type, "Asian");
        assert_eq!(fields.cooking_time, 5);
        assert_eq!(fields.description, None);
    }

    #[test]
    fn test_validate_reports_missing_title() {
        let mut input = tea_input();
        input.title = None;
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingFields(vec!["title"]))
        );
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let err = RecipeInput::default().validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![
                "title",
                "ingredients",
                "instructions",
                "cuisineType",
                "cookingTime",
            ])
        );
    }

    #[test]
    fn test_validate_treats_blank_as_missing() {
        let mut input = tea_input();
        input.instructions = Some("   ".to_string());
        input.ingredients = Some(vec![" ".to_string(), String::new()]);
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingFields(vec!["ingredients", "instructions"]))
        );
    }

    #[test]
    fn test_ingredient_with_comma_survives() {
        let mut input = tea_input();
        input.ingredients = Some(vec![
            "salt, to taste".to_string(),
            " ".to_string(),
            "water".to_string(),
        ]);
        let fields = input.validate().unwrap();
        assert_eq!(fields.ingredients, vec!["salt, to taste", " ", "water"]);
    }

    #[test]
    fn test_validate_keeps_values_verbatim() {
        let input = RecipeInput {
            title: Some(" Tea ".to_string()),
            description: Some("  ".to_string()),
            ingredients: Some(vec!["water".to_string(), " leaves".to_string()]),
            instructions: Some("boil\n".to_string()),
            cuisine_type: Some("Asian ".to_string()),
            cooking_time: Some(0),
        };

        let fields = input.validate().unwrap();

        assert_eq!(fields.title, " Tea ");
        assert_eq!(fields.description.as_deref(), Some("  "));
        assert_eq!(fields.ingredients, vec!["water", " leaves"]);
        assert_eq!(fields.instructions, "boil\n");
        assert_eq!(fields.cuisine_type, "Asian ");
        assert_eq!(fields.cooking_time, 0);
    }

    #[test]
    fn test_cooking_time_range() {
        let mut input = tea_input();
        input.cooking_time = Some(MAX_COOKING_TIME);
        assert!(input.clone().validate().is_ok());

        input.cooking_time = Some(3_000_000_000);
        assert_eq!(
            input.validate(),
            Err(ValidationError::OutOfRange("cookingTime"))
        );
    }

    #[test]
    fn test_missing_fields_reported_before_range() {
        let mut input = tea_input();
        input.title = None;
        input.cooking_time = Some(u32::MAX);
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingFields(vec!["title"]))
        );
    }

    #[test]
    fn test_recipe_wire_format_is_flat_camel_case() {
        let recipe = Recipe {
            id: RecipeId::new("abc"),
            fields: tea_input().validate().unwrap(),
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abc",
                "title": "Tea",
                "ingredients": ["water", "leaves"],
                "instructions": "boil",
                "cuisineType": "Asian",
                "cookingTime": 5
            })
        );
    }

    #[test]
    fn test_recipe_accepts_underscore_id() {
        let recipe: Recipe = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "title": "Soup",
            "description": "Warm",
            "ingredients": ["stock"],
            "instructions": "heat",
            "cuisineType": "French",
            "cookingTime": 20
        }))
        .unwrap();
        assert_eq!(recipe.id.as_str(), "65f0c0ffee");
        assert_eq!(recipe.fields.description.as_deref(), Some("Warm"));
    }

    #[test]
    fn test_format_ingredients() {
        let ingredients = vec!["water".to_string(), "leaves".to_string()];
        assert_eq!(format_ingredients(&ingredients), "water, leaves");
    }
}
