//! Placeholder for document parsing.
//!
//! Uploaded documents are not read yet; every upload yields the same two
//! questions so the export path can be exercised end to end.

use crate::models::QuestionItem;

pub fn sample_questions(source_name: &str) -> Vec<QuestionItem> {
    vec![
        QuestionItem::new(
            format!("Question from file {}: 1 + 1 = ?", source_name),
            vec!["1".into(), "2".into(), "3".into(), "4".into()],
            1,
            20,
        ),
        QuestionItem::new(
            "What is the capital of Vietnam?",
            vec![
                "Ho Chi Minh City".into(),
                "Hanoi".into(),
                "Da Nang".into(),
                "Hue".into(),
            ],
            1,
            30,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_questions_are_valid() {
        let questions = sample_questions("notes.docx");
        assert_eq!(questions.len(), 2);
        assert!(questions[0].question.contains("notes.docx"));
        assert!(questions.iter().all(|q| q.validate().is_ok()));
    }
}
