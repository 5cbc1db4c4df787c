use std::sync::Arc;

use clap::{Args, Subcommand};
use serde_json::json;
use tracing::info;

use super::{answered, Runtime};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::extension_point::SdkLanguage;
use crate::forms::{
    AskApiKey, AskAppType, AskExtensionPoint, AskExtensionType, AskLanguage, AskName,
    AskOrganization, Form, ProjectDetails,
};
use crate::messages;
use crate::tasks::{App, CreateApiClient};
use crate::ui;

/// Create a new project
#[derive(Args, Debug)]
pub struct CreateCommand {
    #[command(subcommand)]
    pub target: CreateTarget,
}

#[derive(Subcommand, Debug)]
pub enum CreateTarget {
    /// Create a new app in the Partner Dashboard.
    App(CreateAppArgs),

    /// Create a new app extension.
    Extension(CreateExtensionArgs),

    /// Create a new script for an extension point.
    Script(CreateScriptArgs),
}

#[derive(Args, Debug, Default)]
pub struct CreateAppArgs {
    /// App title (50 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// App type (public or custom)
    #[arg(long = "type", value_name = "TYPE")]
    pub app_type: Option<String>,

    /// Partner organization ID
    #[arg(long, value_name = "ID")]
    pub org_id: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct CreateExtensionArgs {
    /// Extension name (50 characters)
    #[arg(long)]
    pub name: Option<String>,

    /// Extension type
    #[arg(long = "type", value_name = "TYPE")]
    pub extension_type: Option<String>,

    /// API key of the app the extension belongs to
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct CreateScriptArgs {
    /// Script name
    #[arg(long)]
    pub name: Option<String>,

    /// Extension point the script targets
    #[arg(long, value_name = "TYPE")]
    pub extension_point: Option<String>,

    /// Script language
    #[arg(long)]
    pub language: Option<String>,
}

impl CreateCommand {
    pub async fn run(&self, rt: &Runtime<'_>) -> ScaffoldResult<()> {
        match &self.target {
            CreateTarget::App(args) => args.run(rt).await,
            CreateTarget::Extension(args) => args.run(rt),
            CreateTarget::Script(args) => args.run(rt),
        }
    }
}

/// Run a form, printing a notice when the user cancels it.
fn run_form(rt: &Runtime<'_>, form: &Form) -> ScaffoldResult<Option<ProjectDetails>> {
    let details = form.ask(rt.ctx, rt.prompt, ProjectDetails::default())?;
    if details.is_none() {
        rt.ctx.puts(ui::warning(messages::FORM_CANCELLED));
    }
    Ok(details)
}

/// Abort if the project directory is already taken.
fn ensure_directory_free(rt: &Runtime<'_>, details: &ProjectDetails) -> ScaffoldResult<String> {
    let directory = answered(details.directory_name(), "name")?;
    if rt.ctx.root().join(&directory).exists() {
        return rt.ctx.abort(messages::directory_exists(&directory));
    }
    Ok(directory)
}

impl CreateAppArgs {
    pub async fn run(&self, rt: &Runtime<'_>) -> ScaffoldResult<()> {
        let form = Form::new()
            .question(AskName::new(self.title.clone()))
            .question(AskAppType::new(self.app_type.clone()))
            .question(AskOrganization::new(self.org_id.clone()));

        let Some(details) = run_form(rt, &form)? else {
            return Ok(());
        };

        let title = answered(details.name, "title")?;
        let app_type = answered(details.project_type, "type")?;
        let org_id: u64 = answered(details.organization_id, "organization")?
            .parse()
            .map_err(|e: std::num::ParseIntError| ScaffoldError::InvalidTaskArgs {
                task: CreateApiClient::NAME.to_string(),
                reason: e.to_string(),
            })?;

        let task = rt.registry.require(CreateApiClient::NAME)?;
        let result = task
            .call(
                rt.ctx,
                json!({"org_id": org_id, "title": title, "type": app_type}),
            )
            .await?;
        let app: App = serde_json::from_value(result)?;

        rt.ctx
            .puts(ui::success(&messages::app_created(&title, &app.api_key)));
        Ok(())
    }
}

impl CreateExtensionArgs {
    pub fn run(&self, rt: &Runtime<'_>) -> ScaffoldResult<()> {
        let form = Form::new()
            .question(AskName::new(self.name.clone()))
            .question(AskExtensionType::new(
                self.extension_type.clone(),
                rt.config.extension_types(),
            ))
            .question(AskApiKey::new(self.api_key.clone(), Vec::new()));

        let Some(details) = run_form(rt, &form)? else {
            return Ok(());
        };

        let directory = ensure_directory_free(rt, &details)?;
        let name = answered(details.name, "name")?;
        info!(
            extension_type = details.project_type.as_deref().unwrap_or_default(),
            %directory,
            "Extension project details collected"
        );

        rt.ctx
            .puts(ui::success(&messages::extension_ready(&directory, &name)));
        Ok(())
    }
}

impl CreateScriptArgs {
    pub fn run(&self, rt: &Runtime<'_>) -> ScaffoldResult<()> {
        let catalog = Arc::new(rt.config.catalog()?);
        let form = Form::new()
            .question(AskName::new(self.name.clone()))
            .question(AskExtensionPoint::new(
                self.extension_point.clone(),
                Arc::clone(&catalog),
            ))
            .question(AskLanguage::new(self.language.clone(), Arc::clone(&catalog)));

        let Some(details) = run_form(rt, &form)? else {
            return Ok(());
        };

        let directory = ensure_directory_free(rt, &details)?;
        let extension_point = answered(details.extension_point, "extension point")?;
        let language = answered(details.language, "language")?;

        let sdk = language.parse::<SdkLanguage>().ok().and_then(|language| {
            catalog
                .get(&extension_point)
                .and_then(|ep| ep.sdks().get(language))
        });
        if sdk.as_ref().is_some_and(|sdk| sdk.is_beta()) {
            rt.ctx
                .puts(ui::warning(&messages::beta_language(&language, &extension_point)));
        }
        info!(
            %extension_point,
            %language,
            package = sdk.as_ref().and_then(|sdk| sdk.package()).unwrap_or_default(),
            "Script project details collected"
        );

        rt.ctx.puts(ui::info(&messages::script_ready(&directory)));
        Ok(())
    }
}
