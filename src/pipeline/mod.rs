//! Interview pipeline
//!
//! A fixed, ordered list of stages run over an [`InterviewState`]:
//! generate questions, generate answers, print results. Any stage failure
//! aborts the run and is returned to the caller.

pub mod answers;
pub mod printer;
pub mod questions;

use crate::error::Result;
use crate::llm::{GenerationParams, LLMProvider};
use std::io::Write;
use tracing::info;

pub use answers::AnswerMode;

/// Role used when the user leaves the prompt empty
pub const DEFAULT_ROLE: &str = "Python Developer";

/// Experience level used when the user leaves the prompt empty
pub const DEFAULT_LEVEL: &str = "Junior";

/// Job role and experience level for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInput {
    job_role: String,
    experience_level: String,
}

impl SessionInput {
    /// Create a session input; blank values fall back to the defaults
    pub fn new(job_role: impl Into<String>, experience_level: impl Into<String>) -> Self {
        Self {
            job_role: or_default(job_role.into(), DEFAULT_ROLE),
            experience_level: or_default(experience_level.into(), DEFAULT_LEVEL),
        }
    }

    pub fn job_role(&self) -> &str {
        &self.job_role
    }

    pub fn experience_level(&self) -> &str {
        &self.experience_level
    }
}

impl Default for SessionInput {
    fn default() -> Self {
        Self::new(DEFAULT_ROLE, DEFAULT_LEVEL)
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// State threaded through the stages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewState {
    pub input: SessionInput,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

impl InterviewState {
    pub fn new(input: SessionInput) -> Self {
        Self {
            input,
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    GenerateQuestions,
    GenerateAnswers,
    PrintResults,
}

impl Stage {
    /// Every stage, in the order the pipeline runs them
    pub const ALL: [Stage; 3] = [
        Stage::GenerateQuestions,
        Stage::GenerateAnswers,
        Stage::PrintResults,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::GenerateQuestions => "generate_questions",
            Stage::GenerateAnswers => "generate_answers",
            Stage::PrintResults => "print_results",
        }
    }
}

/// Runs the stages against a provider handle
pub struct Pipeline<'a> {
    provider: &'a dyn LLMProvider,
    params: GenerationParams,
    answer_mode: AnswerMode,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with default generation parameters
    pub fn new(provider: &'a dyn LLMProvider) -> Self {
        Self {
            provider,
            params: GenerationParams::default(),
            answer_mode: AnswerMode::default(),
        }
    }

    /// Set the generation parameters used for every request
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Set how answer requests are issued
    pub fn with_answer_mode(mut self, answer_mode: AnswerMode) -> Self {
        self.answer_mode = answer_mode;
        self
    }

    /// Run every stage in order, writing progress and results to `out`
    pub async fn run<W: Write>(&self, input: SessionInput, out: &mut W) -> Result<InterviewState> {
        let mut state = InterviewState::new(input);
        for stage in Stage::ALL {
            info!(stage = stage.name(), "running stage");
            self.run_stage(stage, &mut state, out).await?;
        }
        Ok(state)
    }

    async fn run_stage<W: Write>(
        &self,
        stage: Stage,
        state: &mut InterviewState,
        out: &mut W,
    ) -> Result<()> {
        match stage {
            Stage::GenerateQuestions => {
                writeln!(
                    out,
                    "\n--- Generating questions for a {} {} ---",
                    state.input.experience_level(),
                    state.input.job_role()
                )?;
                out.flush()?;
                state.questions =
                    questions::generate_questions(self.provider, &state.input, &self.params)
                        .await?;
            }
            Stage::GenerateAnswers => {
                writeln!(out, "--- Generating answers ---")?;
                out.flush()?;
                state.answers = answers::generate_answers(
                    self.provider,
                    &state.questions,
                    &self.params,
                    self.answer_mode,
                )
                .await?;
            }
            Stage::PrintResults => {
                printer::print_results(out, &state.questions, &state.answers)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_uses_defaults() {
        let input = SessionInput::new("", "   ");
        assert_eq!(input.job_role(), "Python Developer");
        assert_eq!(input.experience_level(), "Junior");
    }

    #[test]
    fn test_input_kept_verbatim() {
        let input = SessionInput::new("Data Engineer", "Mid-level");
        assert_eq!(input.job_role(), "Data Engineer");
        assert_eq!(input.experience_level(), "Mid-level");
    }

    #[test]
    fn test_stage_order() {
        let names: Vec<&str> = Stage::ALL.iter().map(Stage::name).collect();
        assert_eq!(
            names,
            vec!["generate_questions", "generate_answers", "print_results"]
        );
    }
}
