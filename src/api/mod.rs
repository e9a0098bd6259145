//! HTTP API: handlers, request extraction and error responses.

pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;
pub use extract::BfhlPayload;
pub use handlers::AppState;
