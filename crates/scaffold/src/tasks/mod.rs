//! Named tasks invoked through the task registry.
//!
//! Remote tasks share one response protocol: a top-level `errors` list and an
//! operation-scoped `userErrors` list, either of which aborts the command.
//! Top-level errors always win when both are populated.

pub mod create_api_client;
pub mod registry;
pub mod update_dashboard_urls;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::Context;
use crate::error::ScaffoldResult;
use crate::messages;

pub use create_api_client::{App, CreateApiClient, CreateApiClientParams};
pub use registry::{global_registry, TaskRegistry};
pub use update_dashboard_urls::{UpdateDashboardUrls, UpdateDashboardUrlsParams};

/// A task that can be looked up by name and invoked with a parameter mapping.
#[async_trait]
pub trait Task: Send + Sync {
    /// Registry name (e.g., "create_api_client").
    fn name(&self) -> &'static str;

    /// Run the task with JSON arguments, returning its JSON result.
    async fn call(&self, ctx: &Context, args: Value) -> ScaffoldResult<Value>;
}

/// Validate a remote response and return the result subtree of `operation`.
///
/// Aborts on an absent response, then on top-level errors, then on the
/// operation's user errors, in that order.
pub(crate) fn check_response(
    ctx: &Context,
    response: Option<Value>,
    operation: &str,
) -> ScaffoldResult<Value> {
    let Some(response) = response.filter(|r| !r.is_null()) else {
        return ctx.abort(messages::EMPTY_RESPONSE);
    };

    let errors = describe_errors(response.get("errors"));
    if !errors.is_empty() {
        return ctx.abort(errors.join(", "));
    }

    let result = response
        .get("data")
        .and_then(|data| data.get(operation))
        .cloned()
        .unwrap_or(Value::Null);

    let user_errors = describe_errors(result.get("userErrors"));
    if !user_errors.is_empty() {
        return ctx.abort(user_errors.join(", "));
    }

    Ok(result)
}

/// Render each `{field, message}` entry as "field message".
fn describe_errors(errors: Option<&Value>) -> Vec<String> {
    errors
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(describe_error).collect())
        .unwrap_or_default()
}

fn describe_error(entry: &Value) -> String {
    // userErrors report the field as a path, e.g. ["input", "title"]
    let field = match entry.get("field") {
        Some(Value::String(field)) => field.clone(),
        Some(Value::Array(path)) => path
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("."),
        _ => String::new(),
    };
    let message = entry
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();

    format!("{field} {message}").trim().to_string()
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles shared by the task tests.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::context::{CapturedOutput, Context};
    use crate::partners::Transport;
    use crate::telemetry::Metadata;

    /// Transport replaying canned responses and recording every request.
    #[derive(Default)]
    pub struct FakeTransport {
        responses: Mutex<VecDeque<Option<Value>>>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl FakeTransport {
        pub fn replying(responses: impl IntoIterator<Item = Option<Value>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().collect()),
                requests: Mutex::default(),
            })
        }

        pub fn requests(&self) -> Vec<(String, Value)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn query(&self, operation: &str, variables: Value) -> Option<Value> {
            self.requests
                .lock()
                .unwrap()
                .push((operation.to_string(), variables));
            self.responses.lock().unwrap().pop_front().flatten()
        }
    }

    pub fn context(transport: Arc<FakeTransport>) -> (Context, Arc<Metadata>, CapturedOutput) {
        let metadata = Arc::new(Metadata::new());
        let output = CapturedOutput::new();
        let ctx = Context::new(transport, metadata.clone()).with_output(output.clone());
        (ctx, metadata, output)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::{context, FakeTransport};
    use super::*;
    use crate::error::ScaffoldError;

    fn abort_message(result: ScaffoldResult<Value>) -> String {
        match result {
            Err(ScaffoldError::Abort(message)) => message,
            other => panic!("expected abort, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_response_aborts() {
        let (ctx, _, _) = context(FakeTransport::replying([]));

        assert_eq!(
            abort_message(check_response(&ctx, None, "appCreate")),
            "Error - empty response"
        );
        assert_eq!(
            abort_message(check_response(&ctx, Some(Value::Null), "appCreate")),
            "Error - empty response"
        );
    }

    #[test]
    fn test_top_level_errors_take_precedence() {
        let (ctx, _, _) = context(FakeTransport::replying([]));
        let response = json!({
            "errors": [
                {"field": "org", "message": "invalid"},
                {"field": "title", "message": "missing"}
            ],
            "data": {"appCreate": {"userErrors": [{"field": "title", "message": "too long"}]}}
        });

        assert_eq!(
            abort_message(check_response(&ctx, Some(response), "appCreate")),
            "org invalid, title missing"
        );
    }

    #[test]
    fn test_user_errors_scoped_to_operation() {
        let (ctx, _, _) = context(FakeTransport::replying([]));
        let response = json!({
            "errors": [],
            "data": {"appCreate": {"userErrors": [{"field": ["input", "title"], "message": "too long"}]}}
        });

        assert_eq!(
            abort_message(check_response(&ctx, Some(response.clone()), "appCreate")),
            "input.title too long"
        );

        // Another operation's subtree is not inspected
        let result = check_response(&ctx, Some(response), "appUpdate").unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn test_clean_response_returns_operation_subtree() {
        let (ctx, _, _) = context(FakeTransport::replying([]));
        let response = json!({"data": {"appCreate": {"app": {"apiKey": "abc"}, "userErrors": []}}});

        let result = check_response(&ctx, Some(response), "appCreate").unwrap();
        assert_eq!(result["app"]["apiKey"], "abc");
    }

    #[test]
    fn test_error_without_field_renders_message_only() {
        assert_eq!(describe_error(&json!({"message": "throttled"})), "throttled");
    }
}
