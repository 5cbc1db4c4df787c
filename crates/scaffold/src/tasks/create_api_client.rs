//! Create an app (API client) in the Partner Dashboard.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::{check_response, Task};
use crate::context::Context;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::messages;
use crate::partners::queries;
use crate::telemetry;

/// App types the Partners API accepts.
pub const VALID_APP_TYPES: [&str; 2] = ["public", "custom"];

/// Application URL every new app starts with.
pub const DEFAULT_APP_URL: &str = "https://5dlabs.github.io/scaffold/help/start-app/";

/// OAuth redirect target used by the local development server.
pub const REDIRECT_HOST: &str = "http://app-cli-loopback.5dlabs.ai:3456";

/// Caller-supplied parameters for app creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateApiClientParams {
    /// Partner organization the app belongs to.
    pub org_id: u64,
    /// App title shown in the dashboard.
    pub title: String,
    /// One of [`VALID_APP_TYPES`].
    #[serde(rename = "type")]
    pub app_type: String,
}

/// Secret issued for an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSecretKey {
    pub secret: String,
}

/// App returned by a successful `appCreate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub api_key: String,
    #[serde(default)]
    pub api_secret_keys: Vec<ApiSecretKey>,
}

impl App {
    /// First API secret, if the response included one.
    pub fn secret(&self) -> Option<&str> {
        self.api_secret_keys.first().map(|key| key.secret.as_str())
    }
}

/// Task creating a new app through the Partners API.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateApiClient;

impl CreateApiClient {
    pub const NAME: &'static str = "create_api_client";

    /// Create the app, aborting the command on any reported error.
    ///
    /// On success the new app's API key is recorded in telemetry.
    #[instrument(skip(self, ctx, params), fields(title = %params.title, app_type = %params.app_type))]
    pub async fn create(&self, ctx: &Context, params: &CreateApiClientParams) -> ScaffoldResult<App> {
        let response = ctx
            .transport()
            .query(queries::CREATE_APP, Self::variables(params))
            .await;

        let result = check_response(ctx, response, "appCreate")?;
        let Some(app) = result.get("app").filter(|app| !app.is_null()) else {
            return ctx.abort(messages::EMPTY_RESPONSE);
        };
        let app: App = match serde_json::from_value(app.clone()) {
            Ok(app) => app,
            Err(e) => {
                warn!(error = %e, "Partners API returned a malformed app");
                return ctx.abort(messages::UNEXPECTED_RESPONSE);
            }
        };

        ctx.telemetry().record(telemetry::API_KEY, &app.api_key);
        info!(api_key = %app.api_key, "App created");

        Ok(app)
    }

    /// Request variables; the app URL and redirect list are always ours.
    fn variables(params: &CreateApiClientParams) -> Value {
        json!({
            "org": params.org_id,
            "title": params.title,
            "type": params.app_type,
            "app_url": DEFAULT_APP_URL,
            "redir": [REDIRECT_HOST],
        })
    }
}

#[async_trait]
impl Task for CreateApiClient {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn call(&self, ctx: &Context, args: Value) -> ScaffoldResult<Value> {
        let params: CreateApiClientParams =
            serde_json::from_value(args).map_err(|e| ScaffoldError::InvalidTaskArgs {
                task: Self::NAME.to_string(),
                reason: e.to_string(),
            })?;
        let app = self.create(ctx, &params).await?;
        Ok(serde_json::to_value(app)?)
    }
}
