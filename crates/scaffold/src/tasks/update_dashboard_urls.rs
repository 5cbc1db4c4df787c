//! Point an existing app's dashboard URLs at a new application URL.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::{check_response, Task};
use crate::context::Context;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::partners::queries;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDashboardUrlsParams {
    pub api_key: String,
    pub application_url: String,
    /// Redirect URLs to allow; the application URL's callback is always added.
    #[serde(default)]
    pub redirect_urls: Vec<String>,
}

/// Task updating an app's application URL and redirect whitelist.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateDashboardUrls;

impl UpdateDashboardUrls {
    pub const NAME: &'static str = "update_dashboard_urls";

    #[instrument(skip(self, ctx, params), fields(api_key = %params.api_key))]
    pub async fn update(&self, ctx: &Context, params: &UpdateDashboardUrlsParams) -> ScaffoldResult<()> {
        let response = ctx
            .transport()
            .query(queries::UPDATE_DASHBOARD_URLS, Self::variables(params))
            .await;

        check_response(ctx, response, "appUpdate")?;
        info!(url = %params.application_url, "Dashboard URLs updated");
        Ok(())
    }

    fn variables(params: &UpdateDashboardUrlsParams) -> Value {
        let callback = format!(
            "{}/auth/callback",
            params.application_url.trim_end_matches('/')
        );
        let mut redirects = params.redirect_urls.clone();
        if !redirects.contains(&callback) {
            redirects.push(callback);
        }

        json!({
            "input": {
                "apiKey": params.api_key,
                "applicationUrl": params.application_url,
                "redirectUrlWhitelist": redirects,
            }
        })
    }
}

#[async_trait]
impl Task for UpdateDashboardUrls {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn call(&self, ctx: &Context, args: Value) -> ScaffoldResult<Value> {
        let params: UpdateDashboardUrlsParams =
            serde_json::from_value(args).map_err(|e| ScaffoldError::InvalidTaskArgs {
                task: Self::NAME.to_string(),
                reason: e.to_string(),
            })?;
        self.update(ctx, &params).await?;
        Ok(Value::Null)
    }
}
