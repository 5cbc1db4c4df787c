//! Transport to the Partners GraphQL API.
//!
//! Tasks only see the [`Transport`] trait: an operation name plus a variables
//! mapping in, an optional response mapping out. Every transport-level
//! failure (connection refused, timeout, unparseable body) collapses into an
//! absent response, which tasks treat as fatal.

pub mod queries;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{ScaffoldError, ScaffoldResult};

/// Default Partners API host.
pub const DEFAULT_PARTNERS_URL: &str = "https://partners.5dlabs.ai";

/// Path of the GraphQL endpoint below the Partners host.
const GRAPHQL_PATH: &str = "/api/cli/graphql";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request/response transport used by remote tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Run the named operation with `variables`.
    ///
    /// Returns `None` when no usable response came back.
    async fn query(&self, operation: &str, variables: Value) -> Option<Value>;
}

/// GraphQL request body
#[derive(Debug, Serialize)]
struct GraphQLRequest {
    query: &'static str,
    variables: Value,
}

/// Partners API GraphQL client
#[derive(Debug, Clone)]
pub struct PartnersClient {
    client: reqwest::Client,
    api_url: String,
}

impl PartnersClient {
    /// Create a client for the Partners host at `base_url`.
    ///
    /// The token, when present, is sent as a bearer credential on every
    /// request.
    pub fn new(base_url: &str, token: Option<&str>) -> ScaffoldResult<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ScaffoldError::Config(format!("Invalid access token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ScaffoldError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: format!("{}{GRAPHQL_PATH}", base_url.trim_end_matches('/')),
        })
    }

    /// Full URL requests are posted to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl Transport for PartnersClient {
    #[instrument(skip(self, variables), fields(url = %self.api_url))]
    async fn query(&self, operation: &str, variables: Value) -> Option<Value> {
        let Some(query) = queries::document(operation) else {
            warn!(operation, "Unknown Partners operation");
            return None;
        };

        let request = GraphQLRequest { query, variables };

        let response = match self.client.post(&self.api_url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to send request to Partners API");
                return None;
            }
        };

        let status = response.status();
        match response.json::<Value>().await {
            Ok(Value::Null) => None,
            Ok(body) => {
                // GraphQL error bodies still carry an `errors` list worth surfacing
                if !status.is_success() {
                    debug!(%status, "Partners API returned error status");
                }
                Some(body)
            }
            Err(e) => {
                warn!(%status, error = %e, "Failed to parse Partners API response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_graphql_path() {
        let client = PartnersClient::new("https://partners.example.com/", None).unwrap();
        assert_eq!(
            client.api_url(),
            "https://partners.example.com/api/cli/graphql"
        );
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let result = PartnersClient::new(DEFAULT_PARTNERS_URL, Some("bad\ntoken"));
        assert!(matches!(result, Err(ScaffoldError::Config(_))));
    }
}
