//! Tool registry: names, argument types and dispatch for `tools/call`.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::mealie::MealPlanFetcher;
use crate::models::{MealPlanEntry, MealPlanQuery, RulesQuery};
use crate::tools::catalog::{ToolCatalog, ToolEntry};
use crate::tools::envelope;
use crate::tools::mealplan::MealPlanTools;
use crate::types::{Error, Result};

pub const GET_ALL_MEALPLANS: &str = "get_all_mealplans";
pub const CREATE_MEALPLAN: &str = "create_mealplan";
pub const CREATE_MEALPLAN_BULK: &str = "create_mealplan_bulk";
pub const UPDATE_MEALPLAN: &str = "update_mealplan";
pub const GET_TODAYS_MEALPLAN: &str = "get_todays_mealplan";
pub const GET_MEALPLAN: &str = "get_mealplan";
pub const CREATE_RANDOM_MEALPLAN: &str = "create_random_mealplan";
pub const GET_MEALPLAN_RULES: &str = "get_mealplan_rules";

// =============================================================================
// Argument types
// =============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateMealplanArgs {
    /// Meal plan entry containing date, recipe_id, title and entry_type.
    pub entry: MealPlanEntry,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateMealplanBulkArgs {
    /// Meal plan entries, created in the given order.
    pub entries: Vec<MealPlanEntry>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateMealplanArgs {
    /// Id of the meal plan entry to update.
    pub mealplan_id: i64,

    /// New contents of the entry.
    pub entry: MealPlanEntry,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetMealplanArgs {
    /// Id of the meal plan entry.
    pub mealplan_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateRandomMealplanArgs {
    /// Day to plan (YYYY-MM-DD). Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Meal slot: breakfast, lunch, dinner or side.
    #[serde(default)]
    pub entry_type: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NoArguments {}

// =============================================================================
// Tool output
// =============================================================================

/// Text produced by a tool call and whether it is the error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    fn from_text(text: String) -> Self {
        let is_error = envelope::is_error_response(&text);
        Self { text, is_error }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Catalog plus the implementations behind it.
#[derive(Debug)]
pub struct ToolRegistry {
    catalog: ToolCatalog,
    mealplans: MealPlanTools,
}

impl ToolRegistry {
    pub fn new(fetcher: Arc<dyn MealPlanFetcher>) -> Result<Self> {
        let mut catalog = ToolCatalog::new();
        catalog.register(ToolEntry::for_args::<MealPlanQuery>(
            GET_ALL_MEALPLANS,
            "Get all meal plans for the current household with pagination. \
             Returns JSON containing mealplan items and pagination information.",
        )?)?;
        catalog.register(ToolEntry::for_args::<CreateMealplanArgs>(
            CREATE_MEALPLAN,
            "Create a new meal plan entry. Returns JSON containing the created mealplan entry.",
        )?)?;
        catalog.register(ToolEntry::for_args::<CreateMealplanBulkArgs>(
            CREATE_MEALPLAN_BULK,
            "Create multiple meal plan entries in bulk, one after another. \
             Stops at the first failure; entries created before it are kept.",
        )?)?;
        catalog.register(ToolEntry::for_args::<UpdateMealplanArgs>(
            UPDATE_MEALPLAN,
            "Update an existing meal plan entry by its id. \
             Returns JSON containing the updated mealplan entry.",
        )?)?;
        catalog.register(ToolEntry::for_args::<NoArguments>(
            GET_TODAYS_MEALPLAN,
            "Get the mealplan entries for today.",
        )?)?;
        catalog.register(ToolEntry::for_args::<GetMealplanArgs>(
            GET_MEALPLAN,
            "Get a specific meal plan entry by its id.",
        )?)?;
        catalog.register(ToolEntry::for_args::<CreateRandomMealplanArgs>(
            CREATE_RANDOM_MEALPLAN,
            "Create a meal plan entry with a random recipe chosen by the household's \
             meal plan rules.",
        )?)?;
        catalog.register(ToolEntry::for_args::<RulesQuery>(
            GET_MEALPLAN_RULES,
            "Get the household's meal plan rules with pagination.",
        )?)?;

        Ok(Self {
            catalog,
            mealplans: MealPlanTools::new(fetcher),
        })
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Run a tool. Unknown names and invalid arguments come back as error
    /// envelopes, like any other tool failure.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolOutput {
        let arguments = if arguments.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            arguments
        };

        if !self.catalog.has_tool(name) {
            let err = Error::not_found(format!("Unknown tool: {}", name));
            return ToolOutput::from_text(envelope::failure(
                &format!("calling tool {}", name),
                &err,
            ));
        }

        let text = match self.catalog.validate_arguments(name, &arguments) {
            Err(err) => envelope::failure(&format!("calling tool {}", name), &err),
            Ok(errors) if !errors.is_empty() => envelope::failure(
                &format!("validating arguments for {}", name),
                &Error::validation(errors.join("; ")),
            ),
            Ok(_) => match self.dispatch(name, arguments).await {
                Ok(text) => text,
                Err(err) => {
                    envelope::failure(&format!("validating arguments for {}", name), &err)
                }
            },
        };

        ToolOutput::from_text(text)
    }

    async fn dispatch(&self, name: &str, arguments: Value) -> Result<String> {
        let tools = &self.mealplans;
        let text = match name {
            GET_ALL_MEALPLANS => tools.list_mealplans(&parse::<MealPlanQuery>(arguments)?).await,
            CREATE_MEALPLAN => {
                let args = parse::<CreateMealplanArgs>(arguments)?;
                tools.create_entry(&args.entry).await
            }
            CREATE_MEALPLAN_BULK => {
                let args = parse::<CreateMealplanBulkArgs>(arguments)?;
                tools.create_entries_bulk(&args.entries).await
            }
            UPDATE_MEALPLAN => {
                let args = parse::<UpdateMealplanArgs>(arguments)?;
                tools.update_entry(args.mealplan_id, &args.entry).await
            }
            GET_TODAYS_MEALPLAN => tools.get_today().await,
            GET_MEALPLAN => {
                let args = parse::<GetMealplanArgs>(arguments)?;
                tools.get_mealplan(args.mealplan_id).await
            }
            CREATE_RANDOM_MEALPLAN => {
                let args = parse::<CreateRandomMealplanArgs>(arguments)?;
                tools.create_random_mealplan(args.date, args.entry_type).await
            }
            GET_MEALPLAN_RULES => tools.list_mealplan_rules(&parse::<RulesQuery>(arguments)?).await,
            _ => return Err(Error::not_found(format!("Unknown tool: {}", name))),
        };
        Ok(text)
    }
}

fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| Error::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mealie::MockMealPlanFetcher;
    use serde_json::json;

    fn registry(mock: MockMealPlanFetcher) -> ToolRegistry {
        ToolRegistry::new(Arc::new(mock)).unwrap()
    }

    #[test]
    fn test_all_tools_registered() {
        let registry = registry(MockMealPlanFetcher::new());
        let names: Vec<&str> = registry
            .catalog()
            .list_entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                CREATE_MEALPLAN,
                CREATE_MEALPLAN_BULK,
                CREATE_RANDOM_MEALPLAN,
                GET_ALL_MEALPLANS,
                GET_MEALPLAN,
                GET_MEALPLAN_RULES,
                GET_TODAYS_MEALPLAN,
                UPDATE_MEALPLAN,
            ]
        );
        for entry in registry.catalog().list_entries() {
            assert_eq!(entry.input_schema["type"], json!("object"), "{}", entry.name);
        }
    }

    #[tokio::test]
    async fn test_call_create_mealplan() {
        let mut mock = MockMealPlanFetcher::new();
        mock.expect_create_mealplan()
            .withf(|args| args.recipe_id.as_deref() == Some("r1"))
            .times(1)
            .returning(|_| Ok(json!({"id": 5})));

        let output = registry(mock)
            .call(
                CREATE_MEALPLAN,
                json!({"entry": {"date": "2024-03-01", "recipe_id": "r1", "entry_type": "dinner"}}),
            )
            .await;

        assert!(!output.is_error);
        assert_eq!(serde_json::from_str::<Value>(&output.text).unwrap(), json!({"id": 5}));
    }

    #[tokio::test]
    async fn test_call_get_todays_mealplan_with_null_arguments() {
        let mut mock = MockMealPlanFetcher::new();
        mock.expect_todays_mealplan()
            .times(1)
            .returning(|| Ok(json!([])));

        let output = registry(mock).call(GET_TODAYS_MEALPLAN, Value::Null).await;
        assert!(!output.is_error);
        assert_eq!(output.text, "[]");
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_error_envelope() {
        let output = registry(MockMealPlanFetcher::new())
            .call("delete_everything", json!({}))
            .await;
        assert!(output.is_error);
        let value: Value = serde_json::from_str(&output.text).unwrap();
        assert_eq!(
            value["error"],
            json!("Error calling tool delete_everything: not found: Unknown tool: delete_everything")
        );
    }

    #[tokio::test]
    async fn test_call_invalid_arguments_never_reach_backend() {
        let mut mock = MockMealPlanFetcher::new();
        mock.expect_create_mealplan().times(0);
        mock.expect_list_mealplans().times(0);
        let registry = registry(mock);

        let output = registry.call(CREATE_MEALPLAN, json!({"entry": {"title": "x"}})).await;
        assert!(output.is_error);
        assert!(output.text.contains("Error validating arguments for create_mealplan"));

        let output = registry.call(GET_ALL_MEALPLANS, json!({"page": -1})).await;
        assert!(output.is_error);

        let output = registry
            .call(CREATE_MEALPLAN_BULK, json!({"entries": [{"date": "2024-13-45"}]}))
            .await;
        assert!(output.is_error);
    }

    #[tokio::test]
    async fn test_call_update_mealplan() {
        let mut mock = MockMealPlanFetcher::new();
        mock.expect_update_mealplan()
            .withf(|id, args| *id == 12 && args.recipe_id.as_deref() == Some("r2"))
            .times(1)
            .returning(|id, _| Ok(json!({"id": id})));

        let output = registry(mock)
            .call(
                UPDATE_MEALPLAN,
                json!({"mealplan_id": 12, "entry": {"date": "2024-03-04", "recipe_id": "r2"}}),
            )
            .await;
        assert!(!output.is_error);
        assert_eq!(output.text, r#"{"id":12}"#);
    }

    #[tokio::test]
    async fn test_call_backend_failure_flags_error() {
        let mut mock = MockMealPlanFetcher::new();
        mock.expect_get_mealplan()
            .returning(|_| Err(Error::internal("gone")));

        let output = registry(mock)
            .call(GET_MEALPLAN, json!({"mealplan_id": 3}))
            .await;
        assert!(output.is_error);
        assert!(output.text.contains("Error fetching mealplan: internal error: gone"));
    }
}
