//! HTTP contract between the export service and its front-ends.

mod messages;

pub use messages::*;
