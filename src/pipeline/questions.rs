//! Question generation stage

use crate::error::Result;
use crate::llm::{GenerationParams, LLMProvider};
use crate::pipeline::SessionInput;
use tracing::debug;

/// Prompt asking for three numbered questions
pub fn question_prompt(input: &SessionInput) -> String {
    format!(
        "Generate 3 interview questions for a {} {}. \
        Return just the questions as a numbered list.",
        input.experience_level(),
        input.job_role()
    )
}

/// Split a raw response into questions: one per non-blank line, trimmed
///
/// Never fails; numbering and well-formedness are not checked.
pub fn parse_questions(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ask the provider for questions and parse the reply
pub async fn generate_questions(
    provider: &dyn LLMProvider,
    input: &SessionInput,
    params: &GenerationParams,
) -> Result<Vec<String>> {
    let prompt = question_prompt(input);
    let text = provider.generate_text(&prompt, Some(params)).await?;
    let questions = parse_questions(&text);
    debug!(count = questions.len(), "parsed questions");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_blank_lines() {
        assert_eq!(
            parse_questions("1. First?\n\n2. Second?\n"),
            vec!["1. First?".to_string(), "2. Second?".to_string()]
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            parse_questions("  1. A?  \r\n\t2. B?\r\n   \n"),
            vec!["1. A?".to_string(), "2. B?".to_string()]
        );
    }

    #[test]
    fn test_parse_degenerate_input() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("\n \n\t\n").is_empty());
        assert_eq!(parse_questions("no numbering"), vec!["no numbering".to_string()]);
    }

    #[test]
    fn test_question_prompt() {
        let input = SessionInput::new("Rust Engineer", "Senior");
        assert_eq!(
            question_prompt(&input),
            "Generate 3 interview questions for a Senior Rust Engineer. \
            Return just the questions as a numbered list."
        );
    }
}
