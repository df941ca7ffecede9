//! Quiz export.
//!
//! A [`QuizExporter`] renders one question list into the import format of a
//! target [`Platform`] and writes it as a uniquely named file.

mod pdf;
mod spreadsheet;
mod text;
mod xml;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::QuestionItem;

pub use pdf::{layout as pdf_layout, to_latin1_lossy, PdfBlock, TextEncoding};
pub use spreadsheet::{Cell, SpreadsheetRow, COLUMNS as SPREADSHEET_COLUMNS};
pub use text::{flatten_field, render as render_quizlet_text};
pub use xml::{escape_html, render as render_lms_xml};

/// Unicode font consulted for PDF output, relative to the working directory.
pub const DEFAULT_FONT_PATH: &str = "Arial.ttf";

/// Directory generated files are written to, relative to the working directory.
pub const DEFAULT_EXPORT_DIR: &str = "temp_exports";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Target quiz tool. Each one has its own import file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Quizizz / Wayground spreadsheet import.
    Quizizz,
    /// Kahoot, printable PDF.
    Kahoot,
    /// Moodle-style quiz XML for the university LMS.
    Lms,
    /// Quizlet tab-separated term/definition list.
    Quizlet,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Quizizz,
        Platform::Kahoot,
        Platform::Lms,
        Platform::Quizlet,
    ];

    /// Resolves a free-form platform name such as `"NEU LMS"` or `"Kahoot!"`.
    ///
    /// Matching is a case-insensitive substring search. Anything unrecognised
    /// gets the spreadsheet format.
    pub fn from_identifier(identifier: &str) -> Self {
        let id = identifier.to_lowercase();

        if id.contains("quizizz") || id.contains("wayground") {
            Platform::Quizizz
        } else if id.contains("kahoot") {
            Platform::Kahoot
        } else if id.contains("lms") {
            Platform::Lms
        } else if id.contains("quizlet") {
            Platform::Quizlet
        } else {
            Platform::Quizizz
        }
    }

    /// Human-readable name, sent back in the `X-Platform` header.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Quizizz => "Quizizz",
            Platform::Kahoot => "Kahoot",
            Platform::Lms => "NEU LMS",
            Platform::Quizlet => "Quizlet",
        }
    }

    /// Leading part of generated file names, e.g. `NEU_LMS` in
    /// `NEU_LMS_1a2b3c4d.xml`.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Platform::Quizizz => "Quizizz",
            Platform::Kahoot => "Kahoot",
            Platform::Lms => "NEU_LMS",
            Platform::Quizlet => "Quizlet",
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Platform::Quizizz => "xlsx",
            Platform::Kahoot => "pdf",
            Platform::Lms => "xml",
            Platform::Quizlet => "txt",
        }
    }

    /// Page where the user imports the generated file.
    pub fn import_url(&self) -> &'static str {
        match self {
            Platform::Quizizz => "https://quizizz.com/admin",
            Platform::Kahoot => "https://create.kahoot.it/creator",
            Platform::Lms => "https://lms.neu.edu.vn",
            Platform::Quizlet => "https://quizlet.com/create-set",
        }
    }
}

/// A generated export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub file_name: String,
    pub platform: Platform,
}

impl Artifact {
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .to_string()
    }
}

/// Where exports go and which font the PDF renderer tries first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub export_dir: PathBuf,
    pub font_path: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
        }
    }
}

/// Short identifier embedded in file names to keep concurrent exports apart.
pub fn generate_request_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Renders a validated question list into platform files.
pub struct QuizExporter {
    questions: Vec<QuestionItem>,
    request_id: String,
    settings: ExportSettings,
}

impl QuizExporter {
    /// Creates an exporter for one request.
    ///
    /// # Arguments
    ///
    /// * `questions` - An already validated question list
    /// * `request_id` - Short identifier placed in every file name
    /// * `settings` - Output directory and PDF font
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_export::{generate_request_id, ExportSettings, Platform, QuestionItem, QuizExporter};
    ///
    /// let questions = vec![QuestionItem::new("1 + 1 = ?", vec!["1".into(), "2".into()], 1, 20)];
    /// let exporter = QuizExporter::new(questions, generate_request_id(), ExportSettings::default());
    /// let artifact = exporter.export(Platform::Quizlet)?;
    /// println!("{}", artifact.file_name);
    /// # Ok::<(), quiz_export::ExportError>(())
    /// ```
    pub fn new(
        questions: Vec<QuestionItem>,
        request_id: impl Into<String>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            questions,
            request_id: request_id.into(),
            settings,
        }
    }

    /// Writes the file for `platform` and returns where it went.
    ///
    /// A failed export leaves nothing behind in the export directory.
    pub fn export(&self, platform: Platform) -> Result<Artifact, ExportError> {
        match platform {
            Platform::Quizizz => self.export_quizizz(),
            Platform::Kahoot => self.export_kahoot_pdf(),
            Platform::Lms => self.export_lms_xml(),
            Platform::Quizlet => self.export_quizlet_txt(),
        }
    }

    /// Quizizz spreadsheet: one header row, then one row per question.
    pub fn export_quizizz(&self) -> Result<Artifact, ExportError> {
        let artifact = self.prepare(Platform::Quizizz)?;
        let written = spreadsheet::write(&self.questions, &artifact.path);
        self.finish(artifact, written)
    }

    /// Kahoot question sheet as PDF, using the configured font when it loads.
    pub fn export_kahoot_pdf(&self) -> Result<Artifact, ExportError> {
        let artifact = self.prepare(Platform::Kahoot)?;
        let written = pdf::write(&self.questions, &artifact.path, &self.settings.font_path);
        self.finish(artifact, written)
    }

    pub fn export_lms_xml(&self) -> Result<Artifact, ExportError> {
        let artifact = self.prepare(Platform::Lms)?;
        let document = xml::render(&self.questions);
        let written =
            fs::write(&artifact.path, document).map_err(|e| ExportError::io(&artifact.path, e));
        self.finish(artifact, written)
    }

    /// Quizlet import text: `question<TAB>correct option` per line.
    pub fn export_quizlet_txt(&self) -> Result<Artifact, ExportError> {
        let artifact = self.prepare(Platform::Quizlet)?;
        let document = text::render(&self.questions);
        let written =
            fs::write(&artifact.path, document).map_err(|e| ExportError::io(&artifact.path, e));
        self.finish(artifact, written)
    }

    fn prepare(&self, platform: Platform) -> Result<Artifact, ExportError> {
        let dir = &self.settings.export_dir;
        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

        let file_name = format!(
            "{}_{}.{}",
            platform.file_prefix(),
            self.request_id,
            platform.extension()
        );
        debug!(
            request_id = %self.request_id,
            platform = platform.display_name(),
            questions = self.questions.len(),
            "Rendering export"
        );

        Ok(Artifact {
            path: dir.join(&file_name),
            file_name,
            platform,
        })
    }

    /// Logs a written file, or removes whatever a failed writer left behind.
    fn finish(
        &self,
        artifact: Artifact,
        written: Result<(), ExportError>,
    ) -> Result<Artifact, ExportError> {
        if let Err(e) = written {
            match fs::remove_file(&artifact.path) {
                Ok(()) => warn!(
                    request_id = %self.request_id,
                    file = %artifact.path.display(),
                    "Removed partial export"
                ),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => warn!(
                    request_id = %self.request_id,
                    file = %artifact.path.display(),
                    "Could not remove partial export: {}",
                    err
                ),
            }
            return Err(e);
        }

        info!(
            request_id = %self.request_id,
            file = %artifact.path.display(),
            "Export written"
        );
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn question(text: &str, options: &[&str], correct_index: usize) -> QuestionItem {
        QuestionItem::new(
            text,
            options.iter().map(|s| s.to_string()).collect(),
            correct_index,
            30,
        )
    }

    fn exporter(dir: &TempDir, questions: Vec<QuestionItem>) -> QuizExporter {
        QuizExporter::new(
            questions,
            "abcd1234",
            ExportSettings {
                export_dir: dir.path().join("exports"),
                font_path: dir.path().join("missing-font.ttf"),
            },
        )
    }

    #[test]
    fn test_platform_dispatch() {
        assert_eq!(Platform::from_identifier("quizizz"), Platform::Quizizz);
        assert_eq!(Platform::from_identifier("Wayground"), Platform::Quizizz);
        assert_eq!(Platform::from_identifier("KAHOOT"), Platform::Kahoot);
        assert_eq!(Platform::from_identifier("NEU LMS"), Platform::Lms);
        assert_eq!(Platform::from_identifier("my-lms-server"), Platform::Lms);
        assert_eq!(Platform::from_identifier("Quizlet"), Platform::Quizlet);
    }

    #[test]
    fn test_unknown_platform_falls_back_to_spreadsheet() {
        assert_eq!(Platform::from_identifier("foobar"), Platform::Quizizz);
        assert_eq!(Platform::from_identifier(""), Platform::Quizizz);
    }

    #[test]
    fn test_request_id_is_short_hex() {
        let id = generate_request_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, generate_request_id());
    }

    #[test]
    fn test_every_platform_writes_named_file() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&dir, vec![question("1 + 1 = ?", &["1", "2", "3", "4"], 1)]);

        for platform in Platform::ALL {
            let artifact = exporter.export(platform).unwrap();
            assert_eq!(artifact.platform, platform);
            assert_eq!(
                artifact.file_name,
                format!("{}_abcd1234.{}", platform.file_prefix(), platform.extension())
            );
            assert!(artifact.path.is_file(), "{} missing", artifact.file_name);
            assert!(fs::metadata(&artifact.path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_content_types() {
        let artifact = |platform: Platform| Artifact {
            path: PathBuf::new(),
            file_name: format!("x.{}", platform.extension()),
            platform,
        };
        assert_eq!(
            artifact(Platform::Quizizz).content_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(artifact(Platform::Kahoot).content_type(), "application/pdf");
        assert_eq!(artifact(Platform::Quizlet).content_type(), "text/plain");
        assert!(artifact(Platform::Lms).content_type().contains("xml"));
    }

    #[test]
    fn test_lms_scenario_two_questions() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(
            &dir,
            vec![
                question("First", &["a", "b", "c"], 0),
                question("Second", &["x", "y"], 1),
            ],
        );

        let artifact = exporter
            .export(Platform::from_identifier("NEU LMS"))
            .unwrap();
        let content = fs::read_to_string(&artifact.path).unwrap();
        let doc = roxmltree::Document::parse(&content).unwrap();

        let questions: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("question"))
            .collect();
        assert_eq!(questions.len(), 2);

        let answer_counts: Vec<usize> = questions
            .iter()
            .map(|q| q.children().filter(|n| n.has_tag_name("answer")).count())
            .collect();
        assert_eq!(answer_counts, vec![3, 2]);
    }

    #[test]
    fn test_quizlet_file_content() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(
            &dir,
            vec![
                question("Line1\nLine2", &["wrong", "right\tanswer"], 1),
                question("Capital?", &["Hanoi", "Hue"], 0),
            ],
        );

        let artifact = exporter.export_quizlet_txt().unwrap();
        let content = fs::read_to_string(&artifact.path).unwrap();
        assert_eq!(content, "Line1 Line2\tright answer\nCapital?\tHanoi");
    }

    #[test]
    fn test_export_dir_is_created() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&dir, vec![question("q", &["a", "b"], 0)]);
        assert!(!dir.path().join("exports").exists());

        exporter.export_lms_xml().unwrap();
        assert!(dir.path().join("exports").is_dir());
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&dir, vec![question("q", &["a", "b"], 0)]);
        let artifact = exporter.prepare(Platform::Kahoot).unwrap();
        fs::write(&artifact.path, "%PDF-1.3 truncated").unwrap();
        let path = artifact.path.clone();

        let err = exporter
            .finish(artifact, Err(ExportError::Pdf("save failed".to_string())))
            .unwrap_err();

        assert!(matches!(err, ExportError::Pdf(_)));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path().join("exports")).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_write_without_file_keeps_error() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&dir, vec![question("q", &["a", "b"], 0)]);
        let artifact = exporter.prepare(Platform::Quizizz).unwrap();

        let err = exporter
            .finish(artifact, Err(ExportError::Pdf("nothing written".to_string())))
            .unwrap_err();
        assert_eq!(err.to_string(), "PDF generation failed: nothing written");
    }

    #[test]
    fn test_unwritable_export_dir_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("exports");
        fs::write(&blocker, "not a directory").unwrap();

        let exporter = exporter(&dir, vec![question("q", &["a", "b"], 0)]);
        let err = exporter.export_quizlet_txt().unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
