//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::export::{ExportSettings, DEFAULT_EXPORT_DIR, DEFAULT_FONT_PATH};
use crate::protocol::{DEFAULT_PLATFORM, DEFAULT_PORT};

/// Directory uploaded source documents are stored in while they are parsed.
pub const DEFAULT_UPLOAD_DIR: &str = "uploaded_files";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,quiz_export=debug";

#[derive(Parser, Debug)]
#[command(version, about = "Convert quiz questions into import files for quiz platforms")]
pub struct Cli {
    /// Log filter, e.g. `debug` or `quiz_export=trace`
    #[arg(long, global = true, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP export service
    Serve(ServeArgs),
    /// Write a single export file from a JSON question list
    Export(ExportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "QUIZ_EXPORT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "QUIZ_EXPORT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory for generated files
    #[arg(long, env = "QUIZ_EXPORT_DIR", default_value = DEFAULT_EXPORT_DIR)]
    pub export_dir: PathBuf,

    /// Directory for uploaded documents
    #[arg(long, env = "QUIZ_UPLOAD_DIR", default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: PathBuf,

    /// Unicode TrueType font used for PDF output when present
    #[arg(long, env = "QUIZ_EXPORT_FONT", default_value = DEFAULT_FONT_PATH)]
    pub font: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// JSON file to load the questions from
    #[arg(short, long)]
    pub questions: PathBuf,

    /// Target platform (quizizz, wayground, kahoot, lms, quizlet)
    #[arg(short, long, default_value = DEFAULT_PLATFORM)]
    pub platform: String,

    /// Directory to write the file to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Unicode TrueType font used for PDF output when present
    #[arg(long, env = "QUIZ_EXPORT_FONT", default_value = DEFAULT_FONT_PATH)]
    pub font: PathBuf,
}

impl ExportArgs {
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            export_dir: self.out_dir.clone(),
            font_path: self.font.clone(),
        }
    }
}

/// Resolved settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub export: ExportSettings,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            upload_dir: args.upload_dir,
            export: ExportSettings {
                export_dir: args.export_dir,
                font_path: args.font,
            },
        }
    }
}
