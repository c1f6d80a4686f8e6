//! Answer generation stage
//!
//! One request per question. Sequential mode awaits each request before the
//! next; concurrent mode issues them together. Both return answers in
//! question order and abort on the first failure.

use crate::error::Result;
use crate::llm::{GenerationParams, LLMProvider};
use futures::future::try_join_all;
use tracing::debug;

/// How answer requests are issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerMode {
    /// One request at a time, in question order
    #[default]
    Sequential,
    /// All requests in flight at once
    Concurrent,
}

/// Prompt asking for a short answer to one question
pub fn answer_prompt(question: &str) -> String {
    format!(
        "Provide a short, concise answer to this interview question: {}",
        question
    )
}

async fn generate_answer(
    provider: &dyn LLMProvider,
    question: &str,
    params: &GenerationParams,
) -> Result<String> {
    provider
        .generate_text(&answer_prompt(question), Some(params))
        .await
}

/// Generate one answer per question
pub async fn generate_answers(
    provider: &dyn LLMProvider,
    questions: &[String],
    params: &GenerationParams,
    mode: AnswerMode,
) -> Result<Vec<String>> {
    debug!(count = questions.len(), ?mode, "generating answers");

    match mode {
        AnswerMode::Sequential => {
            let mut answers = Vec::with_capacity(questions.len());
            for question in questions {
                answers.push(generate_answer(provider, question, params).await?);
            }
            Ok(answers)
        }
        AnswerMode::Concurrent => {
            try_join_all(
                questions
                    .iter()
                    .map(|question| generate_answer(provider, question, params)),
            )
            .await
        }
    }
}
