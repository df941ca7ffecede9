//! Wire types and constants shared by the handlers and their callers.
//!
//! Request bodies are JSON or multipart forms; errors are JSON.

use serde::{Deserialize, Serialize};

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Export endpoint, with the alias the web front-end proxies to.
pub const EXPORT_ROUTE: &str = "/export";
pub const EXPORT_ROUTE_ALIAS: &str = "/api/export";
pub const HEALTH_ROUTE: &str = "/health";

/// Response header carrying the import page of the chosen platform.
pub const PLATFORM_URL_HEADER: &str = "x-platform-url";
/// Response header carrying the resolved platform's display name.
pub const PLATFORM_HEADER: &str = "x-platform";

/// Multipart field names.
pub const FILE_FIELD: &str = "file";
pub const PLATFORM_FIELD: &str = "platform";
pub const DEFAULT_PLATFORM: &str = "quizizz";

/// Longest uploaded file name kept when storing the upload.
pub const UPLOAD_NAME_MAX_LENGTH: usize = 120;

/// Largest request body accepted, uploads included.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Error body, shaped like the responses the front-end already parses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// `Content-Disposition` value for a download.
pub fn attachment_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", file_name.replace('"', ""))
}

/// Reduces a client-supplied upload name to a safe base name.
///
/// Directory components and control characters are dropped. Returns `None`
/// when nothing usable is left.
pub fn sanitize_upload_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .take(UPLOAD_NAME_MAX_LENGTH)
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.');

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_upload_name() {
        assert_eq!(sanitize_upload_name("notes.pdf"), Some("notes.pdf".to_string()));
        assert_eq!(
            sanitize_upload_name("../../etc/passwd"),
            Some("passwd".to_string())
        );
        assert_eq!(
            sanitize_upload_name("C:\\Users\\me\\quiz.docx"),
            Some("quiz.docx".to_string())
        );
        assert_eq!(sanitize_upload_name("..."), None);
        assert_eq!(sanitize_upload_name("dir/"), None);
        assert_eq!(sanitize_upload_name("a\u{0}b"), Some("ab".to_string()));
        assert_eq!(sanitize_upload_name(&"x".repeat(500)).unwrap().len(), UPLOAD_NAME_MAX_LENGTH);
    }

    #[test]
    fn test_attachment_disposition() {
        assert_eq!(
            attachment_disposition("Kahoot_1234abcd.pdf"),
            "attachment; filename=\"Kahoot_1234abcd.pdf\""
        );
    }

    #[test]
    fn test_error_serialization() {
        let body = ErrorBody {
            detail: "Export failed: disk full".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"detail":"Export failed: disk full"}"#);
    }
}
