//! Request and response definitions for the `/bfhl` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::token::Token;

/// Sentinel used when the `user_id` header is absent.
pub const UNKNOWN_USER: &str = "unknown_user";
/// Sentinel used when the `email` header is absent.
pub const UNKNOWN_EMAIL: &str = "unknown_email";
/// Sentinel used when the `roll_number` header is absent.
pub const UNKNOWN_ROLL_NUMBER: &str = "unknown_roll_number";
/// Sentinel used when the `filename` header is absent.
pub const UNKNOWN_FILE: &str = "unknown_file";

/// JSON body of a `POST /bfhl` request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BfhlRequest {
    /// Tokens to classify, parsed element by element
    #[serde(default)]
    pub data: Option<Box<RawValue>>,

    /// Optional base64 file, possibly with a data-URI prefix
    #[serde(default)]
    pub file_b64: Option<String>,
}

/// An uploaded file part.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name reported by the client, if any
    pub file_name: Option<String>,
    /// Raw file content
    pub bytes: Vec<u8>,
}

/// Identity values echoed back from request headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequesterInfo {
    pub user_id: String,
    pub email: String,
    pub roll_number: String,
    pub filename: String,
}

impl Default for RequesterInfo {
    fn default() -> Self {
        Self {
            user_id: UNKNOWN_USER.to_string(),
            email: UNKNOWN_EMAIL.to_string(),
            roll_number: UNKNOWN_ROLL_NUMBER.to_string(),
            filename: UNKNOWN_FILE.to_string(),
        }
    }
}

/// Response of `POST /bfhl`.
#[derive(Debug, Clone, Serialize)]
pub struct BfhlResponse {
    pub is_success: bool,
    pub user_id: String,
    pub email: String,
    pub roll_number: String,
    pub filename: String,
    pub numbers: Vec<Token>,
    pub alphabets: Vec<String>,
    /// Empty or a single letter
    pub highest_lowercase_alphabet: Vec<String>,
    pub is_prime_found: bool,
    pub file_valid: bool,

    /// Present only when `file_valid` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_mime_type: Option<String>,

    /// Present only when `file_valid` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_kb: Option<f64>,
}

/// Response of `GET /bfhl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub operation_code: u32,
}

/// Error body for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub is_success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            error: error.into(),
        }
    }
}
