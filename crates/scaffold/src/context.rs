//! Per-command execution context.
//!
//! A [`Context`] bundles the collaborators one command invocation talks to:
//! the output sink, the abort channel, the Partners transport and the
//! telemetry sink.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::partners::Transport;
use crate::telemetry::TelemetrySink;

/// Collaborators for a single command run.
pub struct Context {
    output: Mutex<Box<dyn Write + Send>>,
    transport: Arc<dyn Transport>,
    telemetry: Arc<dyn TelemetrySink>,
    root: PathBuf,
}

impl Context {
    /// Create a context writing to stdout, rooted at the current directory.
    pub fn new(transport: Arc<dyn Transport>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
            transport,
            telemetry,
            root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Replace the output sink.
    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.output = Mutex::new(Box::new(output));
        self
    }

    /// Replace the directory new projects are created in.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Print a line to the attached output.
    pub fn puts(&self, message: impl AsRef<str>) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(output, "{}", message.as_ref()) {
            warn!(error = %e, "Failed to write to output");
        }
    }

    /// Terminate the current command with a user-facing message.
    pub fn abort<T>(&self, message: impl Into<String>) -> ScaffoldResult<T> {
        let message = message.into();
        debug!(%message, "Aborting command");
        Err(ScaffoldError::Abort(message))
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn telemetry(&self) -> &dyn TelemetrySink {
        self.telemetry.as_ref()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Cloneable in-memory output sink, handy for capturing what a command printed.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Written lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::Metadata;
    use serde_json::Value;

    struct NoTransport;

    #[async_trait::async_trait]
    impl Transport for NoTransport {
        async fn query(&self, _operation: &str, _variables: Value) -> Option<Value> {
            None
        }
    }

    #[test]
    fn test_puts_writes_lines() {
        let output = CapturedOutput::new();
        let ctx = Context::new(Arc::new(NoTransport), Arc::new(Metadata::new()))
            .with_output(output.clone());

        ctx.puts("first");
        ctx.puts(String::from("second"));

        assert_eq!(output.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_abort_returns_abort_error() {
        let ctx = Context::new(Arc::new(NoTransport), Arc::new(Metadata::new()));
        let result: ScaffoldResult<()> = ctx.abort("stop here");

        match result {
            Err(ScaffoldError::Abort(message)) => assert_eq!(message, "stop here"),
            other => panic!("expected abort, got {other:?}"),
        }
    }
}
