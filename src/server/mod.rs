//! HTTP export service.
//!
//! Accepts a question list (JSON) or an uploaded document (multipart),
//! streams back the generated file and removes it afterwards.

mod cleanup;
mod error;
mod handlers;
mod server;

pub use cleanup::{remove_artifact, CleanupGuard};
pub use error::ApiError;
pub use server::{router, run, AppState};
