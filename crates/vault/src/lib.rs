//! Subprocess provider layer for password manager CLIs
//!
//! This crate wraps external password manager command-line tools behind the
//! [`SecretProvider`] trait. The only implementation today is [`bw::BwCli`],
//! the official Bitwarden CLI. All vault access (unlock, sync, decryption)
//! is delegated to the external tool; this crate only spawns it, captures
//! its output and maps failures into the error taxonomy below.

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for secret providers
#[derive(Error, Debug)]
pub enum Error {
    /// The CLI binary is missing, not executable, or otherwise unusable
    #[error("Provider not usable: {0}")]
    Config(String),

    /// The CLI exited non-zero; carries its stderr text
    #[error("Command failed: {0}")]
    ExternalTool(String),

    /// The CLI produced output that is not valid JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Spawning or reaping the subprocess failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Bitwarden Vault (personal/team passwords)
pub mod bw;

/// Trait for secret providers
///
/// All password manager CLI integrations implement this trait. The lookup
/// resolver depends only on the trait, which keeps it testable against a
/// fake provider with canned output.
pub trait SecretProvider: Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Execute a command and return the raw stdout text
    ///
    /// # Arguments
    ///
    /// * `args` - Command arguments (e.g., `["get", "item", "GitHub"]`)
    fn run_raw(&self, args: &[&str]) -> Result<String>;

    /// Execute a command and parse its stdout as JSON
    ///
    /// Empty output is a parse failure rather than a silent `null`.
    fn run_json(&self, args: &[&str]) -> Result<JsonValue> {
        let stdout = self.run_raw(args)?;
        if stdout.trim().is_empty() {
            return Err(Error::Parse("Empty output".to_string()));
        }
        serde_json::from_str(&stdout).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Fetch one vault item by name or id
    fn get_item(&self, name_or_id: &str) -> Result<JsonValue> {
        self.run_json(&["get", "item", name_or_id])
    }

    /// Fetch the raw content of an attachment on an item
    fn get_attachment(&self, filename: &str, item_id: &str) -> Result<String> {
        self.run_raw(&["get", "attachment", filename, "--itemid", item_id, "--raw"])
    }

    /// Synchronize the local vault cache with the server
    ///
    /// The confirmation text the tool prints is not JSON, so it is
    /// discarded.
    fn sync(&self) -> Result<()> {
        self.run_raw(&["sync"]).map(|_| ())
    }

    /// Check if the provider is available (CLI installed, etc.)
    fn is_available(&self) -> bool;
}
