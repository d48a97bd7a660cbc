//! Tool catalog: typed metadata, input schemas, argument validation.
//!
//! Owns tool *metadata* (not implementations). Input schemas are generated
//! from each tool's argument type and enforced before the tool runs.

use crate::types::{Error, Result};
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

// =============================================================================
// Tool entry
// =============================================================================

/// Complete tool metadata entry, as served by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolEntry {
    /// Entry whose input schema is derived from the argument type `T`.
    pub fn for_args<T: JsonSchema>(name: &str, description: &str) -> Result<Self> {
        let schema = SchemaSettings::draft07()
            .with(|settings| settings.inline_subschemas = true)
            .into_generator()
            .into_root_schema_for::<T>();
        let mut input_schema = serde_json::to_value(schema)?;
        if let Some(map) = input_schema.as_object_mut() {
            map.remove("$schema");
            map.remove("title");
        }

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        })
    }
}

// =============================================================================
// Tool catalog
// =============================================================================

/// In-memory tool catalog. Owns metadata, not implementations.
#[derive(Debug, Default)]
pub struct ToolCatalog {
    entries: HashMap<String, ToolEntry>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a tool entry.
    pub fn register(&mut self, entry: ToolEntry) -> Result<()> {
        if entry.name.is_empty() {
            return Err(Error::validation("Tool name cannot be empty"));
        }
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Get a tool entry by name.
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.get(name)
    }

    /// Check if a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// List all tool entries, sorted by name.
    pub fn list_entries(&self) -> Vec<&ToolEntry> {
        let mut entries: Vec<&ToolEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Validate arguments against a tool's input schema.
    ///
    /// Returns a list of validation errors (empty = valid).
    pub fn validate_arguments(&self, name: &str, arguments: &Value) -> Result<Vec<String>> {
        let entry = self
            .get(name)
            .ok_or_else(|| Error::not_found(format!("Unknown tool: {}", name)))?;

        let validator = jsonschema::validator_for(&entry.input_schema)
            .map_err(|e| Error::internal(format!("Invalid input schema for {}: {}", name, e)))?;

        Ok(validator
            .iter_errors(arguments)
            .map(|e| e.to_string())
            .collect())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[allow(dead_code)]
    #[derive(Debug, Deserialize, JsonSchema)]
    struct SearchArgs {
        /// Search query
        query: String,
        /// Maximum results
        #[schemars(range(min = 1))]
        max_results: Option<u32>,
    }

    fn sample_entry() -> ToolEntry {
        ToolEntry::for_args::<SearchArgs>("search_recipes", "Search recipes by name").unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_entry()).unwrap();

        assert!(catalog.has_tool("search_recipes"));
        assert!(!catalog.has_tool("nonexistent"));
        assert_eq!(catalog.list_entries().len(), 1);

        let entry = catalog.get("search_recipes").unwrap();
        assert_eq!(entry.description, "Search recipes by name");
    }

    #[test]
    fn test_register_empty_name_fails() {
        let mut catalog = ToolCatalog::new();
        let mut entry = sample_entry();
        entry.name = String::new();
        assert!(catalog.register(entry).is_err());
    }

    #[test]
    fn test_input_schema_is_object_schema() {
        let entry = sample_entry();
        assert_eq!(entry.input_schema["type"], json!("object"));
        assert!(entry.input_schema["properties"].get("query").is_some());
        assert!(entry.input_schema.get("$schema").is_none());
        assert_eq!(entry.input_schema["required"], json!(["query"]));
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert_eq!(value["name"], json!("search_recipes"));
    }

    #[test]
    fn test_validate_arguments_valid() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_entry()).unwrap();

        let errors = catalog
            .validate_arguments("search_recipes", &json!({"query": "pasta"}))
            .unwrap();
        assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
    }

    #[test]
    fn test_validate_arguments_missing_required() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_entry()).unwrap();

        let errors = catalog.validate_arguments("search_recipes", &json!({})).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("query"));
    }

    #[test]
    fn test_validate_arguments_wrong_type() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_entry()).unwrap();

        let errors = catalog
            .validate_arguments("search_recipes", &json!({"query": 42}))
            .unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validate_arguments_below_minimum() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_entry()).unwrap();

        let errors = catalog
            .validate_arguments("search_recipes", &json!({"query": "x", "max_results": 0}))
            .unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validate_arguments_unknown_tool() {
        let catalog = ToolCatalog::new();
        let err = catalog.validate_arguments("nonexistent", &json!({})).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_list_entries_sorted() {
        let mut catalog = ToolCatalog::new();
        let mut b = sample_entry();
        b.name = "b_tool".to_string();
        let mut a = sample_entry();
        a.name = "a_tool".to_string();
        catalog.register(b).unwrap();
        catalog.register(a).unwrap();

        let names: Vec<&str> = catalog.list_entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a_tool", "b_tool"]);
    }
}
