//! Vaultlook CLI library
//!
//! Command-line front end over the lookup resolver, mainly for manual
//! verification of vault lookups: the field name comes first, followed by
//! one or more item names, and each resolved value prints on its own line.

pub mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use tracing::debug;
use vaultlook_lookup::LookupOptions;
use vaultlook_vault::bw::BwCli;

/// Vaultlook - resolve secrets from a Bitwarden vault
#[derive(Parser)]
#[command(name = "vaultlook")]
#[command(about = "Look up fields from Bitwarden vault items via the bw CLI")]
#[command(version)]
#[command(long_about = "Look up fields from Bitwarden vault items via the bw CLI

Requires the official Bitwarden CLI (bw) to be installed and logged in
(`bw login`), with the vault unlocked (`bw unlock` / BW_SESSION).

Examples:
  • vaultlook password google.com wufoo.com
      → print the login passwords of two items

  • vaultlook username Google
      → print the login username of one item

  • vaultlook item Google
      → print the whole item record as JSON

  • vaultlook --custom-field api_key Google
      → print the user-defined custom field 'api_key'

  • vaultlook --attachment id_rsa 'SSH Keys'
      → print the content of the attachment 'id_rsa'")]
pub struct Cli {
    /// Field to return from each item ('item' selects the whole record)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// One or more item names or ids to look up
    #[arg(value_name = "ITEM", required = true)]
    pub items: Vec<String>,

    /// Path to the bw binary (resolved from PATH when omitted)
    #[arg(long, env = "VAULTLOOK_BW_PATH", value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Session key passed to bw as BW_SESSION
    #[arg(long, value_name = "KEY")]
    pub session: Option<String>,

    /// Treat FIELD as the name of a user-defined custom field
    #[arg(long, conflicts_with = "attachment")]
    pub custom_field: bool,

    /// Treat FIELD as an attachment file name and print its content
    #[arg(long)]
    pub attachment: bool,

    /// Run 'bw sync' before looking anything up
    #[arg(long)]
    pub sync: bool,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the lookup described by the parsed arguments
pub fn run(cli: &Cli) -> Result<()> {
    logging::init(cli.verbose);

    let provider = match &cli.path {
        Some(path) => BwCli::from_path(path),
        None => BwCli::discover(),
    }
    .context("Bitwarden CLI is not usable")?;
    let provider = match &cli.session {
        Some(key) => provider.with_session(key.clone()),
        None => provider,
    };
    debug!(binary = %provider.cli_path().display(), "using bw binary");

    let options = LookupOptions {
        field: cli.field.clone(),
        custom_field: cli.custom_field,
        attachment: cli.attachment,
        sync: cli.sync,
    };

    let results = vaultlook_lookup::resolve(&provider, &cli.items, &options)?;
    for value in results {
        println!("{}", render(&value)?);
    }
    Ok(())
}

/// Render one resolved value for terminal output
///
/// Strings print their raw contents (no JSON quoting); whole records and
/// other structures print as pretty JSON.
fn render(value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        other => serde_json::to_string_pretty(other).context("Failed to serialize result"),
    }
}
