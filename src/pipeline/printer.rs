//! Result printing stage

use crate::error::Result;
use std::io::Write;

/// Banner printed before the results
pub const RESULTS_BANNER: &str = "=== Interview Prep Results ===";

/// Render index-paired Q/A blocks, stopping at the shorter list
pub fn format_results(questions: &[String], answers: &[String]) -> String {
    questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| format!("Q: {}\nA: {}\n\n", question, answer))
        .collect()
}

/// Write the banner and Q/A blocks
pub fn print_results<W: Write>(out: &mut W, questions: &[String], answers: &[String]) -> Result<()> {
    writeln!(out, "\n{}\n", RESULTS_BANNER)?;
    write!(out, "{}", format_results(questions, answers))?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_pairs() {
        let output = format_results(&strings(&["Q1?", "Q2?"]), &strings(&["A1", "A2"]));
        assert_eq!(output, "Q: Q1?\nA: A1\n\nQ: Q2?\nA: A2\n\n");
    }

    #[test]
    fn test_extra_answers_dropped() {
        let output = format_results(&strings(&["Q1?"]), &strings(&["A1", "A2", "A3"]));
        assert_eq!(output, "Q: Q1?\nA: A1\n\n");
    }

    #[test]
    fn test_print_empty() {
        let mut out = Vec::new();
        print_results(&mut out, &[], &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n=== Interview Prep Results ===\n\n"
        );
    }
}
