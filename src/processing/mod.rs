//! Processing module for token classification and file inspection.
//!
//! This module provides:
//! - Token partitioning into numbers and letters, with prime detection
//! - Base64 decoding and MIME type inference for file payloads

pub mod classifier;
pub mod inspector;
pub mod mime;
pub mod primes;

pub use classifier::{ClassificationResult, NumericValue, TokenClass, TokenClassifier};
pub use inspector::{
    decoded_len, FileInspectionResult, FileInspector, FilePayload, InspectionError,
};
pub use mime::{DataUri, ExtensionMimeMap};
