mod question;

pub(crate) use question::validate_questions;
pub use question::{ExportRequest, QuestionItem, ValidationError, DEFAULT_TIME_LIMIT};
