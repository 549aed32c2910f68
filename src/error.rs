//! Boundary error types for ledger-auth
//!
//! The core reports failures as [`TxError`]. Everything that crosses the
//! tooling boundary (CLI output, key files, wire decoding) is converted
//! into a serializable [`LedgerError`] with a stable [`ErrorCode`].

use crate::tx::TxError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type at the tooling boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LedgerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidKey, msg)
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::EncodingError, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, msg)
    }

    /// Serialize for machine-readable output
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!(r#"{{"code":"internal","message":"{}"}}"#, self.code))
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for LedgerError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Core errors
    InvalidKey,
    SigningFailed,
    RecoveryFailure,
    InvalidAddress,
    SenderMismatch,

    // Boundary errors
    EncodingError,
    JsonError,
    HexError,
    InvalidInput,
    IoError,

    // Internal
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidKey => "invalid_key",
            Self::SigningFailed => "signing_failed",
            Self::RecoveryFailure => "recovery_failure",
            Self::InvalidAddress => "invalid_address",
            Self::SenderMismatch => "sender_mismatch",
            Self::EncodingError => "encoding_error",
            Self::JsonError => "json_error",
            Self::HexError => "hex_error",
            Self::InvalidInput => "invalid_input",
            Self::IoError => "io_error",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Result type alias for boundary operations
pub type LedgerResult<T> = Result<T, LedgerError>;

// Conversions from common error types

impl From<TxError> for LedgerError {
    fn from(e: TxError) -> Self {
        let code = match &e {
            TxError::InvalidKey(_) => ErrorCode::InvalidKey,
            TxError::SigningFailed(_) => ErrorCode::SigningFailed,
            TxError::RecoveryFailure(_) => ErrorCode::RecoveryFailure,
            TxError::InvalidAddress(_) => ErrorCode::InvalidAddress,
            TxError::SenderMismatch { .. } => ErrorCode::SenderMismatch,
        };
        LedgerError::new(code, e.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        // Malformed wire input is an encoding error, not a JSON syntax problem
        let code = if e.is_data() { ErrorCode::EncodingError } else { ErrorCode::JsonError };
        LedgerError::new(code, e.to_string())
    }
}

impl From<hex::FromHexError> for LedgerError {
    fn from(e: hex::FromHexError) -> Self {
        LedgerError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(e: std::io::Error) -> Self {
        LedgerError::new(ErrorCode::IoError, e.to_string())
    }
}
