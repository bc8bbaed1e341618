//! Lookup resolver for vault items
//!
//! This crate maps a list of item names plus named options onto a list of
//! resolved values, in input order, by querying a
//! [`SecretProvider`](vaultlook_vault::SecretProvider). It owns the field
//! extraction rules: default login fields, whole-item passthrough, custom
//! fields and attachments.
//!
//! The resolver is stateless; binary path and session configuration live on
//! the provider the caller passes in.

use serde::Deserialize;
use thiserror::Error;

pub mod item;
pub mod resolver;

pub use resolver::resolve;

/// Field name that selects the entire item record instead of one field
pub const WHOLE_ITEM_FIELD: &str = "item";

/// Result type for lookup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the lookup resolver
#[derive(Error, Debug)]
pub enum Error {
    /// The caller passed an empty term list
    #[error("At least one item name is required")]
    NoTerms,

    /// The requested field is absent from the resolved item
    #[error("Field '{field}' not found in item '{item}'")]
    FieldNotFound {
        /// Requested field (or custom field / attachment) name
        field: String,
        /// Item name or id it was looked up on
        item: String,
    },

    /// Failure in the underlying provider
    #[error(transparent)]
    Vault(#[from] vaultlook_vault::Error),
}

/// Named options accepted by a lookup call
///
/// Mirrors the caller-facing option bag: every field has a default, so an
/// empty mapping deserializes to "return the password".
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupOptions {
    /// Field to return; `"item"` selects the whole record
    pub field: String,
    /// Treat `field` as the name of a user-defined custom field
    pub custom_field: bool,
    /// Treat `field` as an attachment file name and return its content
    pub attachment: bool,
    /// Run a vault sync once before resolving any term
    pub sync: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            field: "password".to_string(),
            custom_field: false,
            attachment: false,
            sync: false,
        }
    }
}
