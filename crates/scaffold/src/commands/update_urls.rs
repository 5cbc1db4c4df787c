use clap::Args;
use serde_json::json;

use super::{answered, Runtime};
use crate::error::ScaffoldResult;
use crate::forms::{AskApiKey, Form, ProjectDetails};
use crate::messages;
use crate::tasks::UpdateDashboardUrls;
use crate::ui;

/// Point an app's dashboard URLs at a new application URL
#[derive(Args, Debug, Default)]
pub struct UpdateUrlsCommand {
    /// Application URL (e.g., your tunnel URL)
    #[arg(long)]
    pub url: String,

    /// API key of the app to update
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Extra redirect URL to allow (repeatable)
    #[arg(long = "redirect", value_name = "URL")]
    pub redirect_urls: Vec<String>,
}

impl UpdateUrlsCommand {
    pub async fn run(&self, rt: &Runtime<'_>) -> ScaffoldResult<()> {
        let form = Form::new().question(AskApiKey::new(self.api_key.clone(), Vec::new()));

        let Some(details) = form.ask(rt.ctx, rt.prompt, ProjectDetails::default())? else {
            rt.ctx.puts(ui::warning(messages::FORM_CANCELLED));
            return Ok(());
        };
        let api_key = answered(details.api_key, "API key")?;

        let task = rt.registry.require(UpdateDashboardUrls::NAME)?;
        task.call(
            rt.ctx,
            json!({
                "api_key": api_key,
                "application_url": self.url,
                "redirect_urls": self.redirect_urls,
            }),
        )
        .await?;

        rt.ctx.puts(ui::success(&format!("Dashboard URLs now point at {}", self.url)));
        Ok(())
    }
}
