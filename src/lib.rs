//! # quiz-export
//!
//! Converts a list of multiple-choice questions into the import files of
//! third-party quiz platforms: a spreadsheet for Quizizz, a printable PDF
//! for Kahoot, Moodle-style XML for an LMS and tab-separated text for
//! Quizlet.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_export::{export_from_json, ExportSettings, QuizExportError};
//!
//! fn main() -> Result<(), QuizExportError> {
//!     let artifact = export_from_json("questions.json", "kahoot", &ExportSettings::default())?;
//!     println!("wrote {}", artifact.path.display());
//!     Ok(())
//! }
//! ```
//!
//! The same exporter is served over HTTP by [`server::run`].

pub mod config;
mod data;
pub mod export;
mod models;
pub mod protocol;
pub mod server;

use std::path::Path;

use thiserror::Error;

pub use data::{load_questions_from_json, sample_questions, LoadError};
pub use export::{
    generate_request_id, Artifact, ExportError, ExportSettings, Platform, QuizExporter,
};
pub use models::{ExportRequest, QuestionItem, ValidationError, DEFAULT_TIME_LIMIT};

/// Error type for file-to-file exports.
#[derive(Debug, Error)]
pub enum QuizExportError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Loads a JSON question list and writes it in the format of `platform`.
///
/// `platform` is matched loosely (see [`Platform::from_identifier`]), so
/// unknown names produce the spreadsheet format.
pub fn export_from_json<P: AsRef<Path>>(
    path: P,
    platform: &str,
    settings: &ExportSettings,
) -> Result<Artifact, QuizExportError> {
    let questions = load_questions_from_json(path)?;
    let exporter = QuizExporter::new(questions, generate_request_id(), settings.clone());
    Ok(exporter.export(Platform::from_identifier(platform))?)
}
