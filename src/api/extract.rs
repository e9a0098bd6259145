//! Request extractors for the `/bfhl` endpoint.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Multipart, Request},
    http::{header, request::Parts, HeaderMap},
    Form,
};

use crate::api::error::ApiError;
use crate::api::handlers::AppState;
use crate::processing::{decoded_len, FilePayload};
use crate::types::{
    decode_data_text, tokens_from_data, BfhlRequest, RequesterInfo, Token, UploadedFile,
};

/// Multipart field holding an uploaded file.
const FILE_FIELD: &str = "file";
/// Field holding the token list.
const DATA_FIELD: &str = "data";
/// Field holding a base64 file.
const FILE_B64_FIELD: &str = "file_b64";

/// Body of a `POST /bfhl`, whatever encoding it arrived in.
#[derive(Debug, Clone, Default)]
pub struct BfhlPayload {
    pub tokens: Vec<Token>,
    pub file_b64: Option<String>,
    pub upload: Option<UploadedFile>,
}

impl From<BfhlRequest> for BfhlPayload {
    fn from(request: BfhlRequest) -> Self {
        Self {
            tokens: request
                .data
                .map(|raw| tokens_from_data(&raw))
                .unwrap_or_default(),
            file_b64: request.file_b64,
            upload: None,
        }
    }
}

impl BfhlPayload {
    /// Take the file to inspect along with the upload's own file name.
    ///
    /// An uploaded part wins over `file_b64`; a blank `file_b64` is no file.
    pub fn take_file(&mut self) -> Option<(FilePayload, Option<String>)> {
        if let Some(upload) = self.upload.take() {
            return Some((FilePayload::Binary(upload.bytes), upload.file_name));
        }
        self.file_b64
            .take()
            .filter(|text| !text.trim().is_empty())
            .map(|text| (FilePayload::Base64(text), None))
    }

    /// Reject a `file_b64` that decodes to more than `max_upload_bytes`.
    fn check_base64_size(&self, max_upload_bytes: usize) -> Result<(), ApiError> {
        match &self.file_b64 {
            Some(text) if decoded_len(text) > max_upload_bytes => Err(ApiError::PayloadTooLarge {
                limit: max_upload_bytes,
            }),
            _ => Ok(()),
        }
    }

    fn push_text_field(&mut self, name: &str, value: String) {
        match name {
            DATA_FIELD => self.tokens.extend(decode_data_text(value)),
            FILE_B64_FIELD => self.file_b64 = Some(value),
            _ => {}
        }
    }

    async fn from_multipart(mut multipart: Multipart, max_upload_bytes: usize) -> Result<Self, ApiError> {
        let mut payload = Self::default();

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name != FILE_FIELD {
                let value = field.text().await?;
                payload.push_text_field(&name, value);
                continue;
            }

            let file_name = field
                .file_name()
                .map(str::to_string)
                .filter(|n| !n.is_empty());
            let mut bytes = Vec::new();
            while let Some(chunk) = field.chunk().await? {
                if bytes.len() + chunk.len() > max_upload_bytes {
                    return Err(ApiError::PayloadTooLarge {
                        limit: max_upload_bytes,
                    });
                }
                bytes.extend_from_slice(&chunk);
            }

            // Browsers send an empty part when no file was chosen
            if bytes.is_empty() && file_name.is_none() {
                continue;
            }
            payload.upload = Some(UploadedFile { file_name, bytes });
        }

        Ok(payload)
    }

    async fn read_body(req: Request, state: &Arc<AppState>) -> Result<Self, ApiError> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await?;
            return Self::from_multipart(multipart, state.config.max_upload_bytes).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
            let mut payload = Self::default();
            for (name, value) in fields {
                payload.push_text_field(&name, value);
            }
            return Ok(payload);
        }

        if content_type.is_empty() || content_type.contains("json") {
            let body = Bytes::from_request(req, state).await?;
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self::default());
            }
            let request: BfhlRequest = serde_json::from_slice(&body)?;
            return Ok(Self::from(request));
        }

        Err(ApiError::UnsupportedContentType(content_type))
    }
}

#[async_trait]
impl FromRequest<Arc<AppState>> for BfhlPayload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let payload = Self::read_body(req, state).await?;
        payload.check_base64_size(state.config.max_upload_bytes)?;
        Ok(payload)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequesterInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(requester_from_headers(&parts.headers))
    }
}

/// Read the echoed identity headers, substituting sentinels for missing ones.
pub fn requester_from_headers(headers: &HeaderMap) -> RequesterInfo {
    let defaults = RequesterInfo::default();
    let read = |name: &str, fallback: String| {
        headers
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or(fallback)
    };

    RequesterInfo {
        user_id: read("user_id", defaults.user_id),
        email: read("email", defaults.email),
        roll_number: read("roll_number", defaults.roll_number),
        filename: read("filename", defaults.filename),
    }
}
