//! Canonical dataset item shape and raw-record normalization.
//!
//! Raw records come from a remote index the crate does not control, so every
//! field is treated as optional-with-default until explicitly required. The
//! identifier is the only required field; a record without one is rejected,
//! everything else coerces to its zero value on absence or type mismatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Untyped record as returned by the remote source. Untrusted input.
pub type RawRecord = Value;

/// Canonical output record emitted to the dataset.
///
/// `id` is never empty and uniquely keys the record; all other fields default
/// to empty when the source omits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetItem {
    /// Unique record identifier. Never empty.
    pub id: String,
    /// Machine name of the record.
    #[serde(default)]
    pub name: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Owning user's account name.
    #[serde(default)]
    pub username: String,
    /// Owning user's display name.
    #[serde(default)]
    pub user_full_name: String,
    /// Category tags in source order.
    #[serde(default)]
    pub categories: Vec<String>,
    /// URL of the record's picture, if any.
    #[serde(default)]
    pub picture_url: String,
    /// Open-ended statistics mapping, passed through as-is.
    #[serde(default)]
    pub stats: serde_json::Map<String, Value>,
}

/// Why a raw record was rejected by normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    /// The record carries no usable identifier field.
    #[error("record has no usable identifier")]
    MissingIdentifier,
}

/// Maps one raw record into the canonical item shape.
///
/// The identifier is read from `objectID`, falling back to `id`; it must be
/// a non-empty string. Type mismatches in any other field never fail the
/// record. Pure: no I/O, no shared state.
///
/// # Errors
///
/// Returns `RejectReason::MissingIdentifier` when neither identifier field
/// holds a non-empty string.
pub fn normalize(raw: &RawRecord) -> Result<DatasetItem, RejectReason> {
    let id = str_field(raw, "objectID")
        .or_else(|| str_field(raw, "id"))
        .ok_or(RejectReason::MissingIdentifier)?;

    Ok(DatasetItem {
        id: id.to_string(),
        name: str_field(raw, "name").unwrap_or_default().to_string(),
        title: str_field(raw, "title").unwrap_or_default().to_string(),
        username: str_field(raw, "username").unwrap_or_default().to_string(),
        user_full_name: str_field(raw, "userFullName")
            .unwrap_or_default()
            .to_string(),
        categories: string_list_field(raw, "categories"),
        picture_url: str_field(raw, "pictureUrl").unwrap_or_default().to_string(),
        stats: map_field(raw, "stats"),
    })
}

/// Non-empty string value of `field`, or `None` on absence or mismatch.
fn str_field<'a>(raw: &'a RawRecord, field: &str) -> Option<&'a str> {
    raw.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// String elements of the `field` array; non-string elements are skipped.
fn string_list_field(raw: &RawRecord, field: &str) -> Vec<String> {
    raw.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Object value of `field`, or empty on absence or mismatch.
fn map_field(raw: &RawRecord, field: &str) -> serde_json::Map<String, Value> {
    raw.get(field)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
