//! Batch resolution of item names to field values

use crate::{Error, LookupOptions, Result, WHOLE_ITEM_FIELD, item};
use serde_json::Value as JsonValue;
use tracing::debug;
use vaultlook_vault::SecretProvider;

/// Resolve each term to the value selected by `options`
///
/// Terms resolve in order, one `get item` invocation per term, and the
/// returned list always has exactly one entry per term. The first failure
/// aborts the whole batch; no partial results are returned.
///
/// # Errors
///
/// - [`Error::NoTerms`] when `terms` is empty.
/// - [`Error::FieldNotFound`] when the item resolves but lacks the
///   requested field, custom field, or attachment.
/// - [`Error::Vault`] for provider failures (tool exit status, malformed
///   JSON, configuration).
pub fn resolve(
    provider: &dyn SecretProvider,
    terms: &[String],
    options: &LookupOptions,
) -> Result<Vec<JsonValue>> {
    if terms.is_empty() {
        return Err(Error::NoTerms);
    }

    if options.sync {
        debug!(provider = provider.name(), "syncing vault before lookup");
        provider.sync()?;
    }

    let mut results = Vec::with_capacity(terms.len());
    for term in terms {
        results.push(resolve_one(provider, term, options)?);
    }
    Ok(results)
}

fn resolve_one(
    provider: &dyn SecretProvider,
    term: &str,
    options: &LookupOptions,
) -> Result<JsonValue> {
    debug!(provider = provider.name(), term, field = %options.field, "resolving item");
    let record = provider.get_item(term)?;

    if options.field == WHOLE_ITEM_FIELD {
        return Ok(record);
    }

    if options.custom_field {
        return item::custom_field(&record, &options.field)
            .cloned()
            .ok_or_else(|| field_not_found(&options.field, term));
    }

    if options.attachment {
        if !item::has_attachment(&record, &options.field) {
            return Err(field_not_found(&options.field, term));
        }
        let id = item::item_id(&record, term);
        let content = provider.get_attachment(&options.field, id)?;
        return Ok(JsonValue::String(content));
    }

    item::flattened_get(&record, &options.field)
        .cloned()
        .ok_or_else(|| field_not_found(&options.field, term))
}

fn field_not_found(field: &str, term: &str) -> Error {
    Error::FieldNotFound {
        field: field.to_string(),
        item: term.to_string(),
    }
}
