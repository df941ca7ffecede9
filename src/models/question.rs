use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time limit applied when a question does not carry one.
pub const DEFAULT_TIME_LIMIT: u32 = 30;

const MIN_OPTIONS: usize = 2;

fn default_time_limit() -> u32 {
    DEFAULT_TIME_LIMIT
}

fn default_platform() -> String {
    "quizizz".to_string()
}

/// Reasons a question list is refused before any export runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question text must not be empty")]
    EmptyQuestion,
    #[error("a question needs at least 2 options, got {0}")]
    TooFewOptions(usize),
    #[error("correct_index {index} is out of range for {count} options")]
    CorrectIndexOutOfRange { index: usize, count: usize },
    #[error("time_limit must be a positive number of seconds")]
    ZeroTimeLimit,
    #[error("no questions to export")]
    NoQuestions,
    #[error("question {position}: {source}")]
    InvalidQuestion {
        position: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_index: usize,
    #[serde(default = "default_time_limit")]
    pub time_limit: u32,
}

impl QuestionItem {
    /// Creates a question without validating it.
    ///
    /// # Arguments
    ///
    /// * `question` - The question text
    /// * `options` - Answer options in display order
    /// * `correct_index` - Zero-based index of the correct option
    /// * `time_limit` - Seconds allowed for answering
    ///
    /// # Example
    ///
    /// ```
    /// use quiz_export::QuestionItem;
    ///
    /// let q = QuestionItem::new("1 + 1 = ?", vec!["1".into(), "2".into()], 1, 20);
    /// assert!(q.validate().is_ok());
    /// assert_eq!(q.correct_option(), "2");
    /// ```
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        time_limit: u32,
    ) -> Self {
        Self {
            question: question.into(),
            options,
            correct_index,
            time_limit,
        }
    }

    /// Checks that the question can be exported: non-blank text, at least
    /// two options, `correct_index` inside `options` and a non-zero time
    /// limit. The first problem found is returned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }

        if self.options.len() < MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions(self.options.len()));
        }

        if self.correct_index >= self.options.len() {
            return Err(ValidationError::CorrectIndexOutOfRange {
                index: self.correct_index,
                count: self.options.len(),
            });
        }

        if self.time_limit == 0 {
            return Err(ValidationError::ZeroTimeLimit);
        }

        Ok(())
    }

    /// Text of the correct option. Only meaningful after `validate` passed.
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Body of a JSON export call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default = "default_platform")]
    pub platform: String,
    pub questions: Vec<QuestionItem>,
}

impl ExportRequest {
    /// Rejects an empty list or the first invalid question, by position.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_questions(&self.questions)
    }
}

/// Checks every question, reporting the first failure with its 1-based position.
pub(crate) fn validate_questions(questions: &[QuestionItem]) -> Result<(), ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }

    for (idx, question) in questions.iter().enumerate() {
        question
            .validate()
            .map_err(|e| ValidationError::InvalidQuestion {
                position: idx + 1,
                source: Box::new(e),
            })?;
    }

    Ok(())
}
