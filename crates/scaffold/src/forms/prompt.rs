//! Prompt collaborator used by the form engine.

use std::io;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{ScaffoldError, ScaffoldResult};

/// Something that can ask the user a question.
///
/// `Ok(None)` means the user declined to answer (Ctrl-C, end of input).
pub trait Prompt {
    fn ask(&self, message: &str) -> ScaffoldResult<Option<String>>;
}

impl<F> Prompt for F
where
    F: Fn(&str) -> ScaffoldResult<Option<String>>,
{
    fn ask(&self, message: &str) -> ScaffoldResult<Option<String>> {
        self(message)
    }
}

/// Interactive terminal prompt.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&self, message: &str) -> ScaffoldResult<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text();

        match answer {
            Ok(value) => Ok(Some(value)),
            Err(dialoguer::Error::IO(e)) if is_cancellation(&e) => Ok(None),
            Err(e) => Err(ScaffoldError::Prompt(e.to_string())),
        }
    }
}

fn is_cancellation(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof
    )
}
