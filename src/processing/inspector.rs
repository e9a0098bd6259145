//! File payload inspection.
//!
//! Decodes a base64 string (or takes raw uploaded bytes), records its size
//! and resolves a MIME type from the data-URI prefix, the content signature,
//! or the filename extension, in that order.

use std::borrow::Cow;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::processing::mime::{self, DataUri, ExtensionMimeMap};

/// Standard alphabet, padding optional.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Why a file payload was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InspectionError {
    #[error("invalid encoding")]
    InvalidEncoding,
    #[error("unknown file type")]
    UnknownFileType,
}

/// A file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePayload {
    /// Base64 text, optionally prefixed with `data:<mime>;base64,`
    Base64(String),
    /// Raw bytes from a multipart upload
    Binary(Vec<u8>),
}

/// Outcome of inspecting a file payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileInspectionResult {
    /// Whether a MIME type was resolved
    pub valid: bool,
    /// Resolved MIME type
    pub mime_type: Option<String>,
    /// Decoded size; absent when decoding failed
    pub size_bytes: Option<usize>,
    /// Reason the payload was rejected
    pub error_reason: Option<String>,
}

impl FileInspectionResult {
    fn resolved(mime_type: &str, size_bytes: usize) -> Self {
        Self {
            valid: true,
            mime_type: Some(mime_type.to_string()),
            size_bytes: Some(size_bytes),
            error_reason: None,
        }
    }

    fn rejected(error: InspectionError, size_bytes: Option<usize>) -> Self {
        Self {
            valid: false,
            mime_type: None,
            size_bytes,
            error_reason: Some(error.to_string()),
        }
    }

    /// Size in kibibytes, unrounded.
    pub fn size_kb(&self) -> Option<f64> {
        self.size_bytes.map(|bytes| bytes as f64 / 1024.0)
    }
}

/// Stateless file inspector.
pub struct FileInspector {
    extensions: ExtensionMimeMap,
}

impl Default for FileInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileInspector {
    pub fn new() -> Self {
        Self {
            extensions: ExtensionMimeMap::new(),
        }
    }

    /// Inspect a payload, using `filename_hint` for the extension fallback.
    pub fn inspect(&self, payload: &FilePayload, filename_hint: Option<&str>) -> FileInspectionResult {
        let result = match payload {
            FilePayload::Base64(text) => self.inspect_base64(text, filename_hint),
            FilePayload::Binary(bytes) => self.inspect_bytes(bytes, None, filename_hint),
        };

        if let Some(reason) = &result.error_reason {
            debug!(
                reason = %reason,
                size_bytes = ?result.size_bytes,
                filename = ?filename_hint,
                "File payload rejected"
            );
        }

        result
    }

    fn inspect_base64(&self, text: &str, filename_hint: Option<&str>) -> FileInspectionResult {
        let uri = DataUri::split(text);
        match decode_base64(uri.payload) {
            Ok(bytes) => self.inspect_bytes(&bytes, uri.mime_type, filename_hint),
            Err(error) => FileInspectionResult::rejected(error, None),
        }
    }

    fn inspect_bytes(
        &self,
        bytes: &[u8],
        declared_mime: Option<&str>,
        filename_hint: Option<&str>,
    ) -> FileInspectionResult {
        let resolved = declared_mime
            .or_else(|| mime::sniff(bytes))
            .or_else(|| filename_hint.and_then(|name| self.extensions.lookup(name)));

        match resolved {
            Some(mime_type) => FileInspectionResult::resolved(mime_type, bytes.len()),
            None => FileInspectionResult::rejected(InspectionError::UnknownFileType, Some(bytes.len())),
        }
    }
}

/// Number of bytes a base64 payload decodes to.
///
/// A data-URI prefix, ASCII whitespace and padding are not counted. The
/// result is exact for well-formed input and computed without decoding.
pub fn decoded_len(text: &str) -> usize {
    let symbols = DataUri::split(text)
        .payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b'=')
        .count();
    symbols / 4 * 3 + symbols % 4 * 3 / 4
}

/// Decode standard base64, ignoring embedded ASCII whitespace.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, InspectionError> {
    let compact: Cow<'_, str> = if text.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(text.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(text)
    };

    BASE64
        .decode(compact.as_bytes())
        .map_err(|_| InspectionError::InvalidEncoding)
}
