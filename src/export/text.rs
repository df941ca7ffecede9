//! Quizlet term/definition import.

use crate::models::QuestionItem;

/// Collapses line breaks and tabs so a field stays on one line.
pub fn flatten_field(field: &str) -> String {
    field
        .replace("\r\n", " ")
        .replace(['\r', '\n', '\t'], " ")
}

/// One `term<TAB>definition` line per question, with the correct option as definition.
pub fn render(questions: &[QuestionItem]) -> String {
    questions
        .iter()
        .map(|q| {
            format!(
                "{}\t{}",
                flatten_field(&q.question),
                flatten_field(q.correct_option())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
