//! Core types for the BFHL service.

mod config;
mod payload;
mod token;

pub use config::{LogFormat, ServiceConfig};
pub use payload::{
    BfhlRequest, BfhlResponse, ErrorResponse, OperationResponse, RequesterInfo, UploadedFile,
    UNKNOWN_EMAIL, UNKNOWN_FILE, UNKNOWN_ROLL_NUMBER, UNKNOWN_USER,
};
pub use token::{decode_data_text, tokens_from_data, Token};
