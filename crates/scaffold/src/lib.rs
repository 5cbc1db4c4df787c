#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

//! # Scaffold
//!
//! Interactive project scaffolding for apps, extensions and scripts.
//!
//! This crate provides:
//! - Question/answer forms that reprompt until every answer is valid
//! - The extension point catalog and the SDK capabilities of each point
//! - A registry of named tasks, resolved lazily on first use
//! - Partners API tasks that abort on top-level or operation user errors
//!
//! ## Example
//!
//! ```rust,ignore
//! use scaffold::tasks::{global_registry, CreateApiClient};
//!
//! let task = global_registry().require(CreateApiClient::NAME)?;
//! let app = task
//!     .call(&ctx, serde_json::json!({"org_id": 42, "title": "My App", "type": "public"}))
//!     .await?;
//! ```

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod extension_point;
pub mod forms;
pub mod messages;
pub mod partners;
pub mod tasks;
pub mod telemetry;
pub mod ui;

// Re-export commonly used types at the crate root
pub use config::ScaffoldConfig;
pub use context::{CapturedOutput, Context};
pub use error::{ScaffoldError, ScaffoldResult};
pub use extension_point::{ExtensionPoint, ExtensionPointCatalog, ExtensionPointSdk, SdkLanguage};
pub use forms::{Form, ProjectDetails, Prompt, Question};
pub use partners::{PartnersClient, Transport};
pub use tasks::{global_registry, Task, TaskRegistry};
pub use telemetry::{Metadata, TelemetrySink};
