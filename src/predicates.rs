//! Shape tests for untyped values and grammar tests for strings.
//!
//! The value predicates only look at the structure of a JSON value, they never parse IDs or
//! URLs. [`crate::AssetSource`] applies them in a fixed order when classifying input: object
//! stubs are unwrapped first, then in-progress uploads, then references, ID stubs, path stubs
//! and URL stubs.

use serde_json::Value;

use crate::constants::{FILE_ASSET_TYPE, IMAGE_ASSET_TYPE};
use crate::patterns;

/// `{_ref: string}`
pub fn is_reference(value: &Value) -> bool {
    value.get("_ref").is_some_and(Value::is_string)
}

/// `{_id: string}`
pub fn is_asset_id_stub(value: &Value) -> bool {
    value.get("_id").is_some_and(Value::is_string)
}

/// `{path: string}`
pub fn is_asset_path_stub(value: &Value) -> bool {
    value.get("path").is_some_and(Value::is_string)
}

/// `{url: string}`
pub fn is_asset_url_stub(value: &Value) -> bool {
    value.get("url").is_some_and(Value::is_string)
}

/// `{asset: {...}}`, an object wrapping one of the other stubs.
pub fn is_asset_object_stub(value: &Value) -> bool {
    value.get("asset").is_some_and(Value::is_object)
}

/// An upload marker without an `asset` field: the upload has not produced an asset yet.
pub fn is_in_progress_upload(value: &Value) -> bool {
    value.is_object() && value.get("_upload").is_some_and(is_truthy) && value.get("asset").is_none()
}

/// A (partial) image asset document. Only `_type` is checked.
pub fn is_sanity_image_asset(value: &Value) -> bool {
    value.get("_type").and_then(Value::as_str) == Some(IMAGE_ASSET_TYPE)
}

/// A (partial) file asset document. Only `_type` is checked.
pub fn is_sanity_file_asset(value: &Value) -> bool {
    value.get("_type").and_then(Value::as_str) == Some(FILE_ASSET_TYPE)
}

/// Whether the string is a valid image asset document ID.
pub fn is_image_asset_id(document_id: &str) -> bool {
    patterns::image_asset_id().is_match(document_id)
}

/// Whether the string is a valid file asset document ID.
pub fn is_file_asset_id(document_id: &str) -> bool {
    patterns::file_asset_id().is_match(document_id)
}

/// Whether the string is a valid image or file asset document ID.
pub fn is_asset_id(document_id: &str) -> bool {
    is_image_asset_id(document_id) || is_file_asset_id(document_id)
}

/// Whether the string is an image asset filename, `<hash>-<w>x<h>.<ext>`.
pub fn is_image_asset_filename(filename: &str) -> bool {
    patterns::image_asset_filename().is_match(filename)
}

/// Whether the string is a file asset filename, `<hash>.<ext>`.
pub fn is_file_asset_filename(filename: &str) -> bool {
    patterns::file_asset_filename().is_match(filename)
}

/// Whether the string is an image or file asset filename.
pub fn is_asset_filename(filename: &str) -> bool {
    is_image_asset_filename(filename) || is_file_asset_filename(filename)
}

/// Whether the URL is served from the hosted CDN, or from a custom `cdn.` host following the
/// same path convention.
pub fn is_cdn_url(url: &str) -> bool {
    if patterns::hosted_cdn_url().is_match(url) {
        return true;
    }

    patterns::custom_cdn_url()
        .captures(url)
        .is_some_and(|caps| patterns::asset_path().is_match(&caps[1]))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
