//! Meal plan tools.
//!
//! Every operation has the same shape: log the call at info, forward to the
//! fetcher, and render the outcome through [`envelope::render`]. A tool never
//! fails; errors come back as the error envelope.

use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

use crate::mealie::MealPlanFetcher;
use crate::models::{MealPlanEntry, MealPlanQuery, RandomMealRequest, RulesQuery};
use crate::observability::LOG_TARGET;
use crate::tools::envelope;
use crate::types::Result;

/// Acknowledgement returned by a fully successful bulk create.
pub const BULK_SUCCESS_MESSAGE: &str = "Bulk mealplan entries created successfully";

/// Meal plan operations exposed as tools.
#[derive(Clone)]
pub struct MealPlanTools {
    fetcher: Arc<dyn MealPlanFetcher>,
}

impl std::fmt::Debug for MealPlanTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MealPlanTools").finish_non_exhaustive()
    }
}

impl MealPlanTools {
    pub fn new(fetcher: Arc<dyn MealPlanFetcher>) -> Self {
        Self { fetcher }
    }

    /// All meal plans for the household, optionally filtered and paginated.
    pub async fn list_mealplans(&self, query: &MealPlanQuery) -> String {
        tracing::info!(
            target: LOG_TARGET,
            start_date = ?query.start_date,
            end_date = ?query.end_date,
            page = ?query.page,
            per_page = ?query.per_page,
            "Fetching mealplans"
        );
        envelope::render(
            "fetching mealplans",
            self.fetcher.list_mealplans(query).await,
        )
    }

    /// Create one meal plan entry.
    pub async fn create_entry(&self, entry: &MealPlanEntry) -> String {
        tracing::info!(target: LOG_TARGET, entry = ?entry, "Creating mealplan entry");
        envelope::render(
            "creating mealplan entry",
            self.fetcher.create_mealplan(&entry.to_create_args()).await,
        )
    }

    /// Replace the fields of an existing entry.
    pub async fn update_entry(&self, mealplan_id: i64, entry: &MealPlanEntry) -> String {
        tracing::info!(
            target: LOG_TARGET,
            mealplan_id,
            entry = ?entry,
            "Updating mealplan entry"
        );
        envelope::render(
            "updating mealplan entry",
            self.fetcher
                .update_mealplan(mealplan_id, &entry.to_create_args())
                .await,
        )
    }

    /// Create entries one after another, stopping at the first failure.
    ///
    /// Entries created before the failure stay in Mealie.
    pub async fn create_entries_bulk(&self, entries: &[MealPlanEntry]) -> String {
        tracing::info!(
            target: LOG_TARGET,
            entries_count = entries.len(),
            "Creating bulk mealplan entries"
        );
        envelope::render(
            "creating bulk mealplan entries",
            self.create_in_order(entries).await,
        )
    }

    async fn create_in_order(&self, entries: &[MealPlanEntry]) -> Result<Value> {
        for entry in entries {
            self.fetcher.create_mealplan(&entry.to_create_args()).await?;
        }
        Ok(serde_json::json!({ "message": BULK_SUCCESS_MESSAGE }))
    }

    /// Today's meal plan entries.
    pub async fn get_today(&self) -> String {
        tracing::info!(target: LOG_TARGET, "Fetching today's mealplan");
        envelope::render(
            "fetching today's mealplan",
            self.fetcher.todays_mealplan().await,
        )
    }

    /// A single meal plan entry by id.
    pub async fn get_mealplan(&self, mealplan_id: i64) -> String {
        tracing::info!(target: LOG_TARGET, mealplan_id, "Fetching mealplan");
        envelope::render(
            "fetching mealplan",
            self.fetcher.get_mealplan(mealplan_id).await,
        )
    }

    /// Let Mealie pick a recipe for a slot. `date` defaults to today.
    pub async fn create_random_mealplan(
        &self,
        date: Option<NaiveDate>,
        entry_type: Option<String>,
    ) -> String {
        let request = RandomMealRequest {
            date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            entry_type,
        };
        tracing::info!(
            target: LOG_TARGET,
            date = %request.date,
            entry_type = ?request.entry_type,
            "Creating random mealplan entry"
        );
        envelope::render(
            "creating random mealplan entry",
            self.fetcher.create_random_mealplan(&request).await,
        )
    }

    /// The household's meal plan rules.
    pub async fn list_mealplan_rules(&self, query: &RulesQuery) -> String {
        tracing::info!(
            target: LOG_TARGET,
            page = ?query.page,
            per_page = ?query.per_page,
            "Fetching mealplan rules"
        );
        envelope::render(
            "fetching mealplan rules",
            self.fetcher.list_mealplan_rules(query).await,
        )
    }
}
