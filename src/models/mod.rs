//! Data shapes exchanged between the tools and the Mealie backend.

pub mod mealplan;

pub use mealplan::{CreateMealPlan, MealPlanEntry, MealPlanQuery, RandomMealRequest, RulesQuery};
