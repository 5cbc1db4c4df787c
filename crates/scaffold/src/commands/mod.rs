//! Subcommands of the `scaffold` binary.

pub mod create;
pub mod tasks;
pub mod update_urls;

use crate::config::ScaffoldConfig;
use crate::context::Context;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::forms::Prompt;
use crate::tasks::TaskRegistry;

pub use create::{CreateCommand, CreateTarget};
pub use tasks::TasksCommand;
pub use update_urls::UpdateUrlsCommand;

/// Collaborators shared by every command.
pub struct Runtime<'a> {
    pub ctx: &'a Context,
    pub prompt: &'a dyn Prompt,
    pub registry: &'a TaskRegistry,
    pub config: &'a ScaffoldConfig,
}

/// Unwrap a form field that the form guarantees is set.
fn answered(value: Option<String>, field: &str) -> ScaffoldResult<String> {
    value.ok_or_else(|| ScaffoldError::MissingAnswer(field.to_string()))
}
