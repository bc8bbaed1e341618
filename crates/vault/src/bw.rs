//! Bitwarden Vault integration
//!
//! Provides access to Bitwarden personal/team password vaults through the
//! official Node.js-based `bw` CLI.
//!
//! # Security Warning
//!
//! **Session Key Exposure Risk**: the `bw` CLI receives the session key via
//! the `BW_SESSION` environment variable, which is visible to other users of
//! the machine via process inspection tools. This is a limitation of the
//! official CLI and cannot be mitigated here. Session keys expire after a
//! timeout (default 30 minutes).

use crate::{Error, Result, SecretProvider};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Default binary name resolved from `PATH`
const BW_BINARY: &str = "bw";

/// Official Bitwarden CLI provider (`bw`)
///
/// Configuration (binary path, session key) is passed in explicitly at
/// construction; the provider itself holds no mutable state and is safe to
/// use for any number of invocations.
#[derive(Debug)]
pub struct BwCli {
    /// Resolved path to the `bw` binary
    cli_path: PathBuf,
    /// Explicit session key; `None` inherits `BW_SESSION` from the environment
    session: Option<String>,
}

impl BwCli {
    /// Locate `bw` on the search path
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no `bw` executable is on `PATH`.
    pub fn discover() -> Result<Self> {
        let cli_path = which::which(BW_BINARY)
            .map_err(|e| Error::Config(format!("{BW_BINARY} not found on PATH: {e}")))?;
        debug!(path = %cli_path.display(), "resolved bw binary");
        Ok(Self {
            cli_path,
            session: None,
        })
    }

    /// Use an explicitly configured binary path
    ///
    /// The path is probed with `--version`, matching how the CLI itself
    /// reports an unusable installation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the probe cannot be spawned or fails.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let cli_path = path.as_ref().to_path_buf();
        let probe = Command::new(&cli_path)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| Error::Config(format!("Command not found: {}: {e}", cli_path.display())))?;
        if !probe.success() {
            return Err(Error::Config(format!(
                "{} --version failed; is this a Bitwarden CLI binary?",
                cli_path.display()
            )));
        }
        Ok(Self {
            cli_path,
            session: None,
        })
    }

    /// Attach an explicit session key (`BW_SESSION`) to every invocation
    #[must_use]
    pub fn with_session(mut self, key: impl Into<String>) -> Self {
        self.session = Some(key.into());
        self
    }

    /// Path of the binary this provider invokes
    #[must_use]
    pub fn cli_path(&self) -> &Path {
        &self.cli_path
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.cli_path);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("NODE_OPTIONS", "--no-deprecation");
        if let Some(ref session) = self.session {
            // SECURITY NOTE: environment variables are visible via process
            // inspection; see the module documentation.
            cmd.env("BW_SESSION", session);
        }
        cmd
    }
}

impl SecretProvider for BwCli {
    fn name(&self) -> &'static str {
        "bw"
    }

    fn run_raw(&self, args: &[&str]) -> Result<String> {
        debug!(binary = %self.cli_path.display(), ?args, "invoking bw");

        // Command::output waits for exit and closes both pipes on every
        // path, so no descriptors or zombie processes outlive this call.
        let output = self.command(args).output().map_err(Error::Io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            // bw writes its errors to stderr, but some builds print them on
            // stdout; fall back so the message is never lost.
            let message = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            debug!(status = ?output.status.code(), %message, "bw failed");
            return Err(Error::ExternalTool(describe_failure(message, args)));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn is_available(&self) -> bool {
        Command::new(&self.cli_path)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// Turn the CLI's well-known failure messages into actionable ones
///
/// The original stderr text is always preserved; recognized prefixes gain a
/// remediation hint.
fn describe_failure(message: &str, args: &[&str]) -> String {
    let term = args.last().copied().unwrap_or_default();
    if message.starts_with("Vault is locked.") {
        format!("{message} Run 'bw unlock' to unlock the vault.")
    } else if message.starts_with("You are not logged in.") {
        format!("{message} Run 'bw login' to log in.")
    } else if message.starts_with("Failed to decrypt.") {
        format!("{message} Make sure BW_SESSION is set properly.")
    } else if message.starts_with("Not found.") {
        format!("{message} Specified item not found: {term}")
    } else if message.starts_with("More than one result was found.") {
        format!("{message} Specified item found more than once: {term}")
    } else if message.is_empty() {
        "Unknown failure in 'bw' command".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_describe_failure_adds_unlock_hint() {
        let msg = describe_failure("Vault is locked.", &["get", "item", "Google"]);
        assert!(
            msg.contains("bw unlock"),
            "locked vault should suggest 'bw unlock': {msg}"
        );
    }

    #[test]
    fn test_describe_failure_names_missing_item() {
        let msg = describe_failure("Not found.", &["get", "item", "Google"]);
        assert!(
            msg.contains("Google"),
            "missing item message should name the term: {msg}"
        );
    }

    #[test]
    fn test_describe_failure_passes_through_unknown_text() {
        let msg = describe_failure("something exploded", &["sync"]);
        assert_eq!(msg, "something exploded");
    }

    #[test]
    fn test_describe_failure_empty_stderr() {
        let msg = describe_failure("", &[]);
        assert!(
            msg.contains("Unknown failure"),
            "empty stderr still needs a message: {msg}"
        );
    }
}
