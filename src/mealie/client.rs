//! reqwest-based Mealie REST client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

use super::MealPlanFetcher;
use crate::models::{CreateMealPlan, MealPlanQuery, RandomMealRequest, RulesQuery};
use crate::types::{Error, MealieConfig, Result};

const MEALPLANS_PATH: &str = "/api/households/mealplans";
const ABOUT_PATH: &str = "/api/app/about";

/// HTTP client for one Mealie instance, authenticated with an API token.
#[derive(Debug, Clone)]
pub struct MealieClient {
    http: reqwest::Client,
    base_url: String,
}

impl MealieClient {
    /// Build a client from configuration. Does not touch the network.
    pub fn new(config: &MealieConfig) -> Result<Self> {
        let base_url = config.base_url.trim();
        if base_url.is_empty() {
            return Err(Error::validation("Base URL cannot be empty"));
        }
        if config.api_key.trim().is_empty() {
            return Err(Error::validation("API key cannot be empty"));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim()))
            .map_err(|_| Error::validation("API key contains invalid header characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        tracing::debug!("Initializing MealieClient with base URL: {}", base_url);

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `/api/app/about` to confirm the instance is reachable and the
    /// token is accepted.
    pub async fn check_connection(&self) -> Result<Value> {
        tracing::debug!("Testing connection to Mealie API");
        let about = self.request(Method::GET, ABOUT_PATH, &[], None).await?;
        tracing::info!("Successfully connected to Mealie API");
        Ok(about)
    }

    /// Send one request and decode the JSON answer.
    ///
    /// Non-2xx answers become [`Error::Api`] carrying the response body. A
    /// successful body that is not JSON is wrapped as `{"raw_response": ...}`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Making {} request to {}", method, path);

        let mut builder = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            tracing::debug!("Request parameters: {:?}", query);
            builder = builder.query(query);
        }
        if let Some(payload) = &body {
            tracing::debug!("Request payload: {}", payload);
            builder = builder.json(payload);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, &method, path))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, &method, path))?;

        if !status.is_success() {
            let detail = match serde_json::from_str::<Value>(&text) {
                Ok(json) => json.to_string(),
                Err(_) => text,
            };
            let err = Error::Api {
                status: status.as_u16(),
                method: method.to_string(),
                path: path.to_string(),
                detail,
            };
            tracing::error!("{}", err);
            return Err(err);
        }

        tracing::debug!("Request successful: {}", status.as_u16());

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str(&text) {
            Ok(json) => Ok(json),
            Err(e) => {
                tracing::error!("Failed to parse response as JSON: {}", e);
                tracing::debug!("Non-JSON response text: {}", text);
                Ok(serde_json::json!({ "raw_response": text }))
            }
        }
    }
}

/// Classify a reqwest failure that happened before a status was available.
fn transport_error(err: reqwest::Error, method: &Method, path: &str) -> Error {
    let mapped = if err.is_timeout() {
        Error::timeout(format!("{} {}", method, path))
    } else if err.is_connect() {
        Error::connection(format!("{} {}: {}", method, path, err))
    } else {
        Error::Http(err)
    };
    tracing::error!("{}", mapped);
    mapped
}

#[async_trait]
impl MealPlanFetcher for MealieClient {
    async fn list_mealplans(&self, query: &MealPlanQuery) -> Result<Value> {
        self.request(Method::GET, MEALPLANS_PATH, &query.to_query_pairs(), None)
            .await
    }

    async fn create_mealplan(&self, args: &CreateMealPlan) -> Result<Value> {
        let payload = serde_json::to_value(args)?;
        self.request(Method::POST, MEALPLANS_PATH, &[], Some(payload))
            .await
    }

    async fn update_mealplan(&self, mealplan_id: i64, args: &CreateMealPlan) -> Result<Value> {
        let path = format!("{}/{}", MEALPLANS_PATH, mealplan_id);
        let mut payload = serde_json::to_value(args)?;
        if let Some(map) = payload.as_object_mut() {
            map.insert("id".to_string(), Value::from(mealplan_id));
        }
        self.request(Method::PUT, &path, &[], Some(payload)).await
    }

    async fn todays_mealplan(&self) -> Result<Value> {
        let path = format!("{}/today", MEALPLANS_PATH);
        self.request(Method::GET, &path, &[], None).await
    }

    async fn get_mealplan(&self, mealplan_id: i64) -> Result<Value> {
        let path = format!("{}/{}", MEALPLANS_PATH, mealplan_id);
        self.request(Method::GET, &path, &[], None).await
    }

    async fn create_random_mealplan(&self, request: &RandomMealRequest) -> Result<Value> {
        let path = format!("{}/random", MEALPLANS_PATH);
        let payload = serde_json::to_value(request)?;
        self.request(Method::POST, &path, &[], Some(payload)).await
    }

    async fn list_mealplan_rules(&self, query: &RulesQuery) -> Result<Value> {
        let path = format!("{}/rules", MEALPLANS_PATH);
        self.request(Method::GET, &path, &query.to_query_pairs(), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base_url: &str, api_key: &str) -> MealieConfig {
        MealieConfig {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        let err = MealieClient::new(&config("", "token")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let err = MealieClient::new(&config("http://mealie.local", " ")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_new_rejects_header_unsafe_api_key() {
        let err = MealieClient::new(&config("http://mealie.local", "abc\ndef")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MealieClient::new(&config("http://mealie.local:9000/", "token")).unwrap();
        assert_eq!(client.base_url(), "http://mealie.local:9000");
    }
}
