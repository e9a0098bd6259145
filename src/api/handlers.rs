//! HTTP request handlers for the BFHL service.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::api::extract::BfhlPayload;
use crate::processing::{FileInspectionResult, FileInspector, TokenClassifier};
use crate::types::{BfhlResponse, OperationResponse, RequesterInfo, ServiceConfig};

/// Operation code reported by `GET /bfhl`.
pub const OPERATION_CODE: u32 = 1;

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServiceConfig,
    pub classifier: TokenClassifier,
    pub inspector: FileInspector,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            classifier: TokenClassifier::new(),
            inspector: FileInspector::new(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Liveness payload for `GET /bfhl`.
pub async fn get_operation_code() -> Json<OperationResponse> {
    Json(OperationResponse {
        operation_code: OPERATION_CODE,
    })
}

/// Classify tokens and inspect the optional file.
pub async fn process_bfhl(
    State(state): State<Arc<AppState>>,
    requester: RequesterInfo,
    mut payload: BfhlPayload,
) -> Json<BfhlResponse> {
    let classification = state.classifier.classify(&payload.tokens);

    let mut filename = requester.filename;
    let inspection = match payload.take_file() {
        Some((file, upload_name)) => {
            let hint = upload_name.as_deref().unwrap_or(&filename);
            let result = state.inspector.inspect(&file, Some(hint));
            if let (true, Some(name)) = (result.valid, upload_name) {
                filename = name;
            }
            result
        }
        None => FileInspectionResult::default(),
    };

    info!(
        tokens = payload.tokens.len(),
        numbers = classification.numbers.len(),
        alphabets = classification.alphabets.len(),
        prime_found = classification.prime_found,
        file_valid = inspection.valid,
        mime_type = ?inspection.mime_type,
        "Processed bfhl request"
    );

    let highest_lowercase_alphabet = classification.highest_lowercase_list();
    let file_size_kb = inspection.size_kb().filter(|_| inspection.valid);

    Json(BfhlResponse {
        is_success: true,
        user_id: requester.user_id,
        email: requester.email,
        roll_number: requester.roll_number,
        filename,
        numbers: classification.numbers,
        alphabets: classification.alphabets,
        highest_lowercase_alphabet,
        is_prime_found: classification.prime_found,
        file_valid: inspection.valid,
        file_mime_type: inspection.mime_type.filter(|_| inspection.valid),
        file_size_kb,
    })
}
