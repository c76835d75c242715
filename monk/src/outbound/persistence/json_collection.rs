//! Helpers for JSON array documents.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::outbound::storage::{StorageBackend, StorageError, StorageKey};

/// Read every parseable entry of the array stored under `key`.
pub(crate) fn load_collection<T, B>(backend: &B, key: StorageKey) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    B: StorageBackend + ?Sized,
{
    let Some(raw) = backend.read(key)? else {
        return Ok(Vec::new());
    };
    let entries = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            warn!(%key, kind = json_kind(&other), "stored collection is not an array; ignoring it");
            return Ok(Vec::new());
        }
        Err(error) => {
            warn!(%key, %error, "stored collection is not valid JSON; ignoring it");
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(error) => {
                warn!(%key, index, %error, "skipping malformed record");
                None
            }
        })
        .collect())
}

/// Replace the array stored under `key`.
pub(crate) fn store_collection<T, B>(
    backend: &B,
    key: StorageKey,
    items: &[T],
) -> Result<(), StorageError>
where
    T: Serialize,
    B: StorageBackend + ?Sized,
{
    let contents = serde_json::to_string_pretty(items).map_err(|err| StorageError::Write {
        key,
        message: format!("serialise collection: {err}"),
    })?;
    backend.write(key, &contents)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
