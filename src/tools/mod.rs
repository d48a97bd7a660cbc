//! Tool infrastructure: catalog, envelopes, meal plan tools, dispatch.
//!
//! Tools take typed arguments, call the Mealie fetcher and always answer
//! with text: the backend JSON on success, the error envelope otherwise.

pub mod catalog;
pub mod envelope;
pub mod mealplan;
pub mod registry;

pub use catalog::{ToolCatalog, ToolEntry};
pub use envelope::format_error_response;
pub use mealplan::{MealPlanTools, BULK_SUCCESS_MESSAGE};
pub use registry::{ToolOutput, ToolRegistry};
