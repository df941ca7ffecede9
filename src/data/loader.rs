use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{QuestionItem, ValidationError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Reads a JSON array of questions and validates every entry.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionItem>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let questions: Vec<QuestionItem> =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    crate::models::validate_questions(&questions).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(
            &path,
            r#"[{"question": "2 + 2?", "options": ["3", "4"], "correct_index": 1, "time_limit": 15}]"#,
        )
        .unwrap();

        let questions = load_questions_from_json(&path).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].time_limit, 15);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_questions_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn test_load_empty_list_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "[]").unwrap();

        let err = load_questions_from_json(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                source: ValidationError::NoQuestions,
                ..
            }
        ));
    }

    #[test]
    fn test_load_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            load_questions_from_json(&path),
            Err(LoadError::Parse { .. })
        ));
    }
}
