mod loader;
mod sample;

pub use loader::{load_questions_from_json, LoadError};
pub use sample::sample_questions;
