//! Meal plan entries and the query/request shapes sent to Mealie.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Meal plan entry
// =============================================================================

/// A single planned meal as supplied by a tool caller.
///
/// Fields are private: once built, an entry is only read, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MealPlanEntry {
    /// Day of the meal (YYYY-MM-DD).
    date: NaiveDate,

    /// Mealie recipe id, when the entry is linked to a recipe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipe_id: Option<String>,

    /// Display title, typically used for entries without a recipe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    /// Meal slot, one of Mealie's entry types (breakfast, lunch, dinner, side).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entry_type: Option<String>,
}

impl MealPlanEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            recipe_id: None,
            title: None,
            entry_type: None,
        }
    }

    pub fn with_recipe_id(mut self, recipe_id: impl Into<String>) -> Self {
        self.recipe_id = Some(recipe_id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_entry_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = Some(entry_type.into());
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn recipe_id(&self) -> Option<&str> {
        self.recipe_id.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn entry_type(&self) -> Option<&str> {
        self.entry_type.as_deref()
    }

    /// Arguments for the backend create call. Every field is forwarded as is.
    pub fn to_create_args(&self) -> CreateMealPlan {
        CreateMealPlan {
            date: self.date,
            recipe_id: self.recipe_id.clone(),
            title: self.title.clone(),
            entry_type: self.entry_type.clone(),
        }
    }
}

// =============================================================================
// Backend request shapes
// =============================================================================

/// Payload of `POST /api/households/mealplans`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealPlan {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
}

/// Filters for listing meal plans. Dates are passed through unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MealPlanQuery {
    /// Start date for filtering meal plans (ISO format YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// End date for filtering meal plans (ISO format YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Page number to retrieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub per_page: Option<u32>,
}

impl MealPlanQuery {
    /// Query string pairs for the present filters only.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = &self.start_date {
            pairs.push(("start_date", start.clone()));
        }
        if let Some(end) = &self.end_date {
            pairs.push(("end_date", end.clone()));
        }
        pairs.extend(page_pairs(self.page, self.per_page));
        pairs
    }
}

/// Payload of `POST /api/households/mealplans/random`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomMealRequest {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
}

/// Pagination for listing meal plan rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RulesQuery {
    /// Page number to retrieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub per_page: Option<u32>,
}

impl RulesQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        page_pairs(self.page, self.per_page)
    }
}

fn page_pairs(page: Option<u32>, per_page: Option<u32>) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(page) = page {
        pairs.push(("page", page.to_string()));
    }
    if let Some(per_page) = per_page {
        pairs.push(("per_page", per_page.to_string()));
    }
    pairs
}
