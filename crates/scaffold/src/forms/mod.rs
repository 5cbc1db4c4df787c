//! Question/answer forms with reprompt-until-valid semantics.
//!
//! A [`Form`] runs its questions in order over a [`ProjectDetails`]
//! accumulator. Each question is driven by a small state machine: a candidate
//! value either satisfies the question's break condition ([`AskState::Valid`])
//! or does not ([`AskState::Invalid`]), and the prompt may be cancelled
//! ([`AskState::Cancelled`]). Only valid values are ever written into the
//! accumulator.

pub mod prompt;
pub mod questions;

use tracing::{debug, info};

use crate::context::Context;
use crate::error::ScaffoldResult;

pub use prompt::{Prompt, TerminalPrompt};
pub use questions::{
    AskApiKey, AskAppType, AskExtensionPoint, AskExtensionType, AskLanguage, AskName,
    AskOrganization, MAX_TITLE_LENGTH,
};

/// Project metadata filled in progressively by questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDetails {
    pub name: Option<String>,
    /// App type (`public`/`custom`) or extension type, depending on the form.
    pub project_type: Option<String>,
    pub api_key: Option<String>,
    pub organization_id: Option<String>,
    pub extension_point: Option<String>,
    pub language: Option<String>,
}

impl ProjectDetails {
    /// Directory a project with this name is created in ("My Ext" -> "my_ext").
    pub fn directory_name(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let directory = name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        (!directory.is_empty()).then_some(directory)
    }
}

/// A single question of a form.
pub trait Question {
    /// Message shown when asking.
    fn prompt_message(&self, details: &ProjectDetails) -> String;

    /// Message shown before asking again after an invalid answer.
    fn reprompt_message(&self, details: &ProjectDetails) -> String;

    /// Value supplied up front (e.g., from a command-line flag).
    fn initial_value(&self, details: &ProjectDetails) -> Option<String>;

    /// Break condition: whether `candidate` is an acceptable answer.
    fn accepts(&self, details: &ProjectDetails, candidate: &str) -> bool;

    /// Write an accepted value into the field this question owns.
    fn apply(&self, details: &mut ProjectDetails, value: String);
}

/// Where a question stands in its ask loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskState {
    NotAsked,
    Invalid,
    Valid(String),
    Cancelled,
}

impl AskState {
    /// Move to the next state given a prompt answer (`None` = cancelled).
    pub fn transition(
        question: &dyn Question,
        details: &ProjectDetails,
        answer: Option<String>,
    ) -> Self {
        match answer {
            None => Self::Cancelled,
            Some(answer) => {
                let candidate = answer.trim();
                if question.accepts(details, candidate) {
                    Self::Valid(candidate.to_string())
                } else {
                    Self::Invalid
                }
            }
        }
    }

    /// Starting state: an acceptable initial value skips prompting entirely.
    fn initial(question: &dyn Question, details: &ProjectDetails) -> Self {
        match question.initial_value(details) {
            Some(value) => match Self::transition(question, details, Some(value)) {
                valid @ Self::Valid(_) => valid,
                _ => Self::NotAsked,
            },
            None => Self::NotAsked,
        }
    }
}

/// Ask one question until it is answered validly or cancelled.
///
/// The reprompt message is printed before every prompt except the first.
pub fn ask_question(
    ctx: &Context,
    prompt: &dyn Prompt,
    question: &dyn Question,
    details: &ProjectDetails,
) -> ScaffoldResult<Option<String>> {
    let mut state = AskState::initial(question, details);

    loop {
        state = match state {
            AskState::Valid(value) => return Ok(Some(value)),
            AskState::Cancelled => return Ok(None),
            AskState::NotAsked => {
                let answer = prompt.ask(&question.prompt_message(details))?;
                AskState::transition(question, details, answer)
            }
            AskState::Invalid => {
                ctx.puts(question.reprompt_message(details));
                let answer = prompt.ask(&question.prompt_message(details))?;
                AskState::transition(question, details, answer)
            }
        };
    }
}

/// An ordered sequence of questions.
#[derive(Default)]
pub struct Form {
    questions: Vec<Box<dyn Question>>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question.
    pub fn question(mut self, question: impl Question + 'static) -> Self {
        self.questions.push(Box::new(question));
        self
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Run every question in order.
    ///
    /// Returns `Ok(None)` as soon as the user cancels a prompt; questions
    /// after the cancelled one are never asked.
    pub fn ask(
        &self,
        ctx: &Context,
        prompt: &dyn Prompt,
        mut details: ProjectDetails,
    ) -> ScaffoldResult<Option<ProjectDetails>> {
        for (index, question) in self.questions.iter().enumerate() {
            let Some(value) = ask_question(ctx, prompt, question.as_ref(), &details)? else {
                info!(question = index, "Form cancelled");
                return Ok(None);
            };
            debug!(question = index, %value, "Question answered");
            question.apply(&mut details, value);
        }

        Ok(Some(details))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::sync::Arc;

    use super::*;
    use crate::context::CapturedOutput;
    use crate::tasks::testing::FakeTransport;
    use crate::telemetry::Metadata;

    /// Prompt replaying scripted answers and recording the messages it saw.
    struct ScriptedPrompt {
        answers: RefCell<VecDeque<Option<String>>>,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }

        fn asked(&self) -> Vec<String> {
            self.asked.borrow().clone()
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&self, message: &str) -> ScaffoldResult<Option<String>> {
            self.asked.borrow_mut().push(message.to_string());
            Ok(self
                .answers
                .borrow_mut()
                .pop_front()
                .expect("prompt asked more often than scripted"))
        }
    }

    /// Question accepting values that start with a prefix, writing `name`.
    struct Starts {
        label: &'static str,
        prefix: &'static str,
        initial: Option<&'static str>,
    }

    impl Question for Starts {
        fn prompt_message(&self, _details: &ProjectDetails) -> String {
            format!("ask {}", self.label)
        }

        fn reprompt_message(&self, _details: &ProjectDetails) -> String {
            format!("invalid {}", self.label)
        }

        fn initial_value(&self, _details: &ProjectDetails) -> Option<String> {
            self.initial.map(str::to_string)
        }

        fn accepts(&self, _details: &ProjectDetails, candidate: &str) -> bool {
            candidate.starts_with(self.prefix)
        }

        fn apply(&self, details: &mut ProjectDetails, value: String) {
            match self.label {
                "first" => details.name = Some(value),
                "second" => details.project_type = Some(value),
                _ => details.api_key = Some(value),
            }
        }
    }

    fn question(label: &'static str, prefix: &'static str) -> Starts {
        Starts {
            label,
            prefix,
            initial: None,
        }
    }

    fn context() -> (Context, CapturedOutput) {
        let output = CapturedOutput::new();
        let ctx = Context::new(FakeTransport::replying([]), Arc::new(Metadata::new()))
            .with_output(output.clone());
        (ctx, output)
    }

    #[test]
    fn test_valid_initial_value_skips_prompt() {
        let (ctx, output) = context();
        let prompt = ScriptedPrompt::new(&[]);
        let q = Starts {
            initial: Some("a-flag"),
            ..question("first", "a")
        };

        let value = ask_question(&ctx, &prompt, &q, &ProjectDetails::default()).unwrap();

        assert_eq!(value.as_deref(), Some("a-flag"));
        assert!(prompt.asked().is_empty());
        assert!(output.lines().is_empty());
    }

    #[test]
    fn test_invalid_initial_value_prompts_without_reprompt() {
        let (ctx, output) = context();
        let prompt = ScriptedPrompt::new(&[Some("apple")]);
        let q = Starts {
            initial: Some("banana"),
            ..question("first", "a")
        };

        let value = ask_question(&ctx, &prompt, &q, &ProjectDetails::default()).unwrap();

        assert_eq!(value.as_deref(), Some("apple"));
        assert_eq!(prompt.asked(), vec!["ask first"]);
        assert!(output.lines().is_empty());
    }

    #[test]
    fn test_reprompt_shown_before_every_retry() {
        let (ctx, output) = context();
        let prompt = ScriptedPrompt::new(&[Some("x"), Some("y"), Some("  apple  ")]);

        let value = ask_question(
            &ctx,
            &prompt,
            &question("first", "a"),
            &ProjectDetails::default(),
        )
        .unwrap();

        assert_eq!(value.as_deref(), Some("apple"));
        assert_eq!(prompt.asked().len(), 3);
        assert_eq!(output.lines(), vec!["invalid first", "invalid first"]);
    }

    #[test]
    fn test_cancellation_produces_no_value() {
        let (ctx, _) = context();
        let prompt = ScriptedPrompt::new(&[Some("x"), None]);

        let value = ask_question(
            &ctx,
            &prompt,
            &question("first", "a"),
            &ProjectDetails::default(),
        )
        .unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn test_form_never_skips_ahead_of_failing_question() {
        let (ctx, output) = context();
        let prompt = ScriptedPrompt::new(&[
            Some("alpha"),
            Some("nope"),
            Some("still nope"),
            Some("bravo"),
            Some("charlie"),
        ]);
        let form = Form::new()
            .question(question("first", "a"))
            .question(question("second", "b"))
            .question(question("third", "c"));

        let details = form
            .ask(&ctx, &prompt, ProjectDetails::default())
            .unwrap()
            .unwrap();

        assert_eq!(
            prompt.asked(),
            vec![
                "ask first",
                "ask second",
                "ask second",
                "ask second",
                "ask third"
            ]
        );
        assert_eq!(output.lines(), vec!["invalid second", "invalid second"]);
        assert_eq!(details.name.as_deref(), Some("alpha"));
        assert_eq!(details.project_type.as_deref(), Some("bravo"));
        assert_eq!(details.api_key.as_deref(), Some("charlie"));
    }

    #[test]
    fn test_form_cancellation_stops_remaining_questions() {
        let (ctx, _) = context();
        let prompt = ScriptedPrompt::new(&[Some("alpha"), None]);
        let form = Form::new()
            .question(question("first", "a"))
            .question(question("second", "b"))
            .question(question("third", "c"));

        let result = form.ask(&ctx, &prompt, ProjectDetails::default()).unwrap();

        assert_eq!(result, None);
        assert_eq!(prompt.asked(), vec!["ask first", "ask second"]);
    }

    #[test]
    fn test_prompt_errors_propagate() {
        let (ctx, _) = context();
        let prompt = |_: &str| -> ScaffoldResult<Option<String>> {
            Err(crate::error::ScaffoldError::Prompt("terminal gone".to_string()))
        };

        let result = ask_question(
            &ctx,
            &prompt,
            &question("first", "a"),
            &ProjectDetails::default(),
        );

        assert!(matches!(
            result,
            Err(crate::error::ScaffoldError::Prompt(_))
        ));
    }

    #[test]
    fn test_transition() {
        let q = question("first", "a");
        let details = ProjectDetails::default();

        assert_eq!(
            AskState::transition(&q, &details, Some(" apple ".to_string())),
            AskState::Valid("apple".to_string())
        );
        assert_eq!(
            AskState::transition(&q, &details, Some("pear".to_string())),
            AskState::Invalid
        );
        assert_eq!(AskState::transition(&q, &details, None), AskState::Cancelled);
    }

    #[test]
    fn test_directory_name() {
        let details = ProjectDetails {
            name: Some("  My  Ext ".to_string()),
            ..ProjectDetails::default()
        };
        assert_eq!(details.directory_name().as_deref(), Some("my_ext"));
        assert_eq!(ProjectDetails::default().directory_name(), None);
    }
}
