//! Mealie backend access.
//!
//! [`MealPlanFetcher`] is the contract the tools depend on; [`MealieClient`]
//! implements it over Mealie's REST API. Results are returned as raw JSON so
//! the tools can pass them through unchanged.

pub mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{CreateMealPlan, MealPlanQuery, RandomMealRequest, RulesQuery};
use crate::types::Result;

pub use client::MealieClient;

/// Meal plan operations of an authenticated, connected Mealie backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealPlanFetcher: Send + Sync {
    /// `GET /api/households/mealplans`: items plus pagination metadata.
    async fn list_mealplans(&self, query: &MealPlanQuery) -> Result<Value>;

    /// `POST /api/households/mealplans`: the created entry.
    async fn create_mealplan(&self, args: &CreateMealPlan) -> Result<Value>;

    /// `PUT /api/households/mealplans/{id}`: the updated entry.
    async fn update_mealplan(&self, mealplan_id: i64, args: &CreateMealPlan) -> Result<Value>;

    /// `GET /api/households/mealplans/today`: today's entries.
    async fn todays_mealplan(&self) -> Result<Value>;

    /// `GET /api/households/mealplans/{id}`.
    async fn get_mealplan(&self, mealplan_id: i64) -> Result<Value>;

    /// `POST /api/households/mealplans/random`: an entry with a recipe picked
    /// by the household's meal plan rules.
    async fn create_random_mealplan(&self, request: &RandomMealRequest) -> Result<Value>;

    /// `GET /api/households/mealplans/rules`.
    async fn list_mealplan_rules(&self, query: &RulesQuery) -> Result<Value>;
}
