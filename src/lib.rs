//! BFHL Service Library
//!
//! Classifies a mixed list of tokens into numbers and letters and inspects an
//! optional base64-encoded (or uploaded) file, reporting its MIME type and size.

pub mod api;
pub mod processing;
pub mod router;
pub mod types;

pub use processing::{FileInspector, FilePayload, TokenClassifier};
pub use router::create_router;
pub use types::{ServiceConfig, Token};

/// Default port the service listens on
pub const DEFAULT_PORT: u16 = 3000;

/// Maximum size of an uploaded file part (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Maximum request body size; leaves room for a base64-encoded 10MB file
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
