//! Signer Configuration
//!
//! Settings for the command-line tooling:
//! - Profile presets (standard, strict)
//! - Default chain id and key file location
//! - Output format and debug logging
//! - Validation of settings before use
//!
//! The signing core takes no configuration; everything here is consumed by
//! the CLI before it calls into [`crate::tx`].

use crate::error::{LedgerError, LedgerResult};
use std::path::{Path, PathBuf};

/// Chain id used when none is configured
pub const DEFAULT_CHAIN_ID: u32 = 1;

/// Environment variable names read by the CLI
pub mod env_vars {
    pub const CHAIN_ID: &str = "LEDGER_CHAIN_ID";
    pub const KEY_FILE: &str = "LEDGER_KEY_FILE";
    pub const DEBUG: &str = "LEDGER_DEBUG";
}

/// Settings profile presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Recovery reports the signer without enforcing the sender match
    Standard,
    /// Recovery must match the claimed sender; chain 0 is refused
    Strict,
}

/// JSON output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Compact,
}

/// Signer settings
#[derive(Debug, Clone)]
pub struct SignerSettings {
    /// Profile preset these settings were derived from
    pub profile: Profile,
    /// Chain id applied to transactions built by the CLI
    pub chain_id: u32,
    /// Hex key file used for signing
    pub key_file: Option<PathBuf>,
    /// Layout of JSON written to stdout
    pub output: OutputFormat,
    /// Emit debug logs on stderr
    pub debug: bool,
    /// Fail recovery when the signer differs from `from`
    pub verify_sender: bool,
}

impl Default for SignerSettings {
    fn default() -> Self {
        Self::standard()
    }
}

impl SignerSettings {
    /// Standard preset
    pub fn standard() -> Self {
        Self {
            profile: Profile::Standard,
            chain_id: DEFAULT_CHAIN_ID,
            key_file: None,
            output: OutputFormat::Pretty,
            debug: false,
            verify_sender: false,
        }
    }

    /// Strict preset
    pub fn strict() -> Self {
        Self {
            profile: Profile::Strict,
            verify_sender: true,
            ..Self::standard()
        }
    }

    pub fn with_chain_id(mut self, chain_id: u32) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_verify_sender(mut self, verify_sender: bool) -> Self {
        self.verify_sender = verify_sender;
        self
    }

    /// The configured key file, or an error naming how to set it
    pub fn require_key_file(&self) -> LedgerResult<&Path> {
        self.key_file.as_deref().ok_or_else(|| {
            LedgerError::invalid_input(format!(
                "no key file configured (use --key-file or {})",
                env_vars::KEY_FILE
            ))
        })
    }

    /// Validate settings consistency.
    ///
    /// Hard errors are returned as `Err`; softer issues come back as warnings.
    pub fn validate(&self) -> LedgerResult<Vec<String>> {
        let mut warnings = Vec::new();

        if let Some(path) = &self.key_file {
            if path.as_os_str().is_empty() {
                return Err(LedgerError::invalid_input("key file path is empty"));
            }
        }

        if self.chain_id == 0 {
            if self.profile == Profile::Strict {
                return Err(LedgerError::invalid_input(
                    "chain id 0 is not allowed in the strict profile",
                ));
            }
            warnings.push("Warning: chain id 0 is meant for local development only".to_string());
        }

        if self.profile == Profile::Strict && !self.verify_sender {
            warnings.push("Warning: strict profile with sender verification disabled".to_string());
        }

        Ok(warnings)
    }
}
