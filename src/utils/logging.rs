//! Structured Logging
//!
//! Stderr log lines for the CLI and the key file tooling; the signing core
//! never logs. Each field is masked according to its name before it is
//! formatted:
//! - key material is never shown
//! - account identifiers (`signer`, `sender`, `from`, ...) keep a short head and tail
//! - digests and signatures keep a longer head and tail
//!
//! Entries below the active level are dropped before any field is formatted.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Turn on `DEBUG` entries for the rest of the process
pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn is_enabled(self) -> bool {
        self != LogLevel::Debug || is_debug_enabled()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field value is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mask {
    /// Key material: only the length survives
    Hidden,
    /// Account identifiers and addresses
    Account,
    /// Digests, hashes and signatures
    Digest,
    Clear,
}

const HIDDEN_FIELDS: &[&str] = &["private_key", "privatekey", "secret", "seed", "key_hex", "signing_key"];
const ACCOUNT_FIELDS: &[&str] = &["address", "signer", "sender", "recipient", "from", "to"];
const DIGEST_FIELDS: &[&str] = &["digest", "hash", "signature", "preimage"];

impl Mask {
    fn for_field(key: &str) -> Self {
        let key = key.to_ascii_lowercase();
        let matches = |names: &[&str]| names.iter().any(|name| key.contains(name));

        if matches(HIDDEN_FIELDS) {
            Mask::Hidden
        } else if matches(ACCOUNT_FIELDS) {
            Mask::Account
        } else if matches(DIGEST_FIELDS) {
            Mask::Digest
        } else {
            Mask::Clear
        }
    }

    fn apply(self, value: &str) -> String {
        match self {
            Mask::Hidden => hide(value),
            Mask::Account => {
                let value = value.trim();
                let head = if value.starts_with("0x") { 8 } else { 6 };
                head_and_tail(value, head, 4).unwrap_or_else(|| hide(value))
            }
            Mask::Digest => {
                let value = value.trim();
                let head = if value.starts_with("0x") { 12 } else { 10 };
                // Short values carry nothing worth hiding
                head_and_tail(value, head, 6).unwrap_or_else(|| value.to_string())
            }
            Mask::Clear => value.to_string(),
        }
    }
}

fn hide(value: &str) -> String {
    match value.chars().count() {
        0 => "[EMPTY]".to_string(),
        1..=4 => "[REDACTED]".to_string(),
        n => format!("[REDACTED:{}chars]", n),
    }
}

/// `head...tail` counted in characters, or `None` when too little would be hidden
fn head_and_tail(value: &str, head: usize, tail: usize) -> Option<String> {
    let count = value.chars().count();
    if count <= head + tail + 3 {
        return None;
    }

    let head_end = value.char_indices().nth(head).map(|(i, _)| i)?;
    let tail_start = value.char_indices().nth(count - tail).map(|(i, _)| i)?;
    Some(format!("{}...{}", &value[..head_end], &value[tail_start..]))
}

/// One log line: level, module, message and masked `key=value` fields
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
    enabled: bool,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
            enabled: level.is_enabled(),
        }
    }

    /// Attach a field, masked by its name. No-op when the entry will not be written.
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        if self.enabled {
            let masked = Mask::for_field(key).apply(&value.to_string());
            self.fields.push((key, masked));
        }
        self
    }

    pub fn log(self) {
        if self.enabled {
            eprintln!("{}", self);
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        write!(f, "[{}] {} [{}] {}", timestamp, self.level, self.module, self.message)?;

        for (i, (key, value)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " | " } else { " " };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_entry {
    ($level:ident, $module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::$level, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}

/// `log_debug!(module, message, key = value, ...)`; written only after [`enable_debug`]
#[macro_export]
macro_rules! log_debug {
    ($($args:tt)*) => { $crate::__log_entry!(Debug, $($args)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($args:tt)*) => { $crate::__log_entry!(Info, $($args)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($args:tt)*) => { $crate::__log_entry!(Warn, $($args)*) };
}

#[macro_export]
macro_rules! log_error {
    ($($args:tt)*) => { $crate::__log_entry!(Error, $($args)*) };
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNER: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";
    const DIGEST: &str = "0xfdc76926be48ead3e075b0f038b2ba85eae820e7ff77f8856f2743fb03404eab";

    #[test]
    fn test_mask_by_field_name() {
        assert_eq!(Mask::for_field("private_key"), Mask::Hidden);
        assert_eq!(Mask::for_field("signer"), Mask::Account);
        assert_eq!(Mask::for_field("sender"), Mask::Account);
        assert_eq!(Mask::for_field("digest"), Mask::Digest);
        assert_eq!(Mask::for_field("chain_id"), Mask::Clear);
        assert_eq!(Mask::for_field("nonce"), Mask::Clear);
    }

    #[test]
    fn test_hidden_values() {
        assert_eq!(hide(""), "[EMPTY]");
        assert_eq!(hide("abc"), "[REDACTED]");
        assert_eq!(hide(&"4c".repeat(32)), "[REDACTED:64chars]");
    }

    #[test]
    fn test_account_mask() {
        assert_eq!(Mask::Account.apply(SIGNER), "0x2c7536...5c23");
        // Opaque identifiers are short enough to hide entirely
        assert_eq!(Mask::Account.apply("bill"), "[REDACTED]");
        assert_eq!(Mask::Account.apply("nathan"), "[REDACTED:6chars]");
    }

    #[test]
    fn test_account_mask_counts_characters() {
        assert_eq!(Mask::Account.apply("€€€€€"), "[REDACTED:5chars]");
        assert_eq!(Mask::Account.apply("€€€€€€€€€€€€€€"), "€€€€€€...€€€€");
        assert_eq!(Mask::Account.apply("Zoë Ångström-Müller"), "Zoë Ån...ller");
    }

    #[test]
    fn test_digest_mask() {
        assert_eq!(Mask::Digest.apply(DIGEST), "0xfdc76926be...404eab");
        assert_eq!(Mask::Digest.apply("0xabcd"), "0xabcd");
        assert_eq!(Mask::Digest.apply(&"ü".repeat(30)), format!("{}...{}", "ü".repeat(10), "ü".repeat(6)));
    }

    #[test]
    fn test_entry_fields() {
        let entry = LogEntry::new(LogLevel::Info, "keyfile", "Saved private key")
            .field("chain_id", 1)
            .field("private_key", "4c0883a69102937d")
            .field("signer", SIGNER);

        assert_eq!(
            entry.fields,
            vec![
                ("chain_id", "1".to_string()),
                ("private_key", "[REDACTED:16chars]".to_string()),
                ("signer", "0x2c7536...5c23".to_string()),
            ]
        );
        assert!(entry.to_string().ends_with("Saved private key | chain_id=1 private_key=[REDACTED:16chars] signer=0x2c7536...5c23"));
    }

    #[test]
    fn test_disabled_debug_entry_skips_fields() {
        // Nothing in this crate's unit tests turns debug on
        let entry = LogEntry::new(LogLevel::Debug, "cli", "Recovered signer").field("sender", "€€€€€");
        assert!(entry.fields.is_empty());
    }
}
