//! Input shapes accepted by the resolvers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::constants::{FILE_ASSET_TYPE, IMAGE_ASSET_TYPE};
use crate::error::AssetError;
use crate::models::{ImageCrop, ImageHotspot};
use crate::predicates::{is_asset_object_stub, is_in_progress_upload};

/// Anything that may identify an asset.
///
/// Built by the caller for a single call. Converting from a [`serde_json::Value`] classifies
/// the value with the shape predicates in [`crate::predicates`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssetSource {
    /// ID, URL, storage path or filename.
    Text(String),
    /// Reference, ID/path/URL stub or (partial) asset document.
    Stub(AssetStub),
    /// Object wrapping a stub under `asset`, such as an image field value.
    Object(AssetObjectStub),
    /// Upload that has not been assigned an asset yet.
    Upload(UploadStub),
}

impl AssetSource {
    /// The stub this source points at, after unwrapping one level of `asset` nesting.
    pub fn stub(&self) -> Option<&AssetStub> {
        match self {
            Self::Stub(stub) => Some(stub),
            Self::Object(object) => Some(&object.asset),
            Self::Text(_) | Self::Upload(_) => None,
        }
    }

    /// Whether this source is an upload without an asset.
    pub fn is_in_progress_upload(&self) -> bool {
        matches!(self, Self::Upload(_))
    }
}

impl From<&str> for AssetSource {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AssetSource {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<AssetStub> for AssetSource {
    fn from(stub: AssetStub) -> Self {
        Self::Stub(stub)
    }
}

impl From<AssetObjectStub> for AssetSource {
    fn from(object: AssetObjectStub) -> Self {
        Self::Object(object)
    }
}

impl From<UploadStub> for AssetSource {
    fn from(upload: UploadStub) -> Self {
        Self::Upload(upload)
    }
}

impl TryFrom<Value> for AssetSource {
    type Error = AssetError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Object(_) if is_asset_object_stub(&value) => {
                Ok(Self::Object(AssetObjectStub::from_value(&value)))
            }
            Value::Object(_) if is_in_progress_upload(&value) => {
                Ok(Self::Upload(UploadStub::from_value(&value)))
            }
            Value::Object(_) => Ok(Self::Stub(AssetStub::from_value(&value))),
            other => Err(AssetError::Unresolvable {
                input: other,
                message: "asset source must be a string or an object".into(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for AssetSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Keys read into the named fields of [`AssetStub`].
const KNOWN_FIELDS: [&str; 10] = [
    "_ref",
    "_weak",
    "_id",
    "_type",
    "path",
    "url",
    "assetId",
    "extension",
    "originalFilename",
    "metadata",
];

/// Loosely shaped asset object: a reference, an ID/path/URL stub or a partial asset document.
///
/// Fields are checked in the order `_ref`, `_id`, `path`, `url` when resolving the asset ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStub {
    /// Referenced document ID.
    #[serde(rename = "_ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Weak reference flag.
    #[serde(rename = "_weak", skip_serializing_if = "Option::is_none")]
    pub weak: Option<bool>,
    /// Document ID.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Document type.
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Storage path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// CDN URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Content hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    /// Extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Original upload filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    /// Document metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Every other field, such as `size` or `mimeType` on a full asset document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetStub {
    /// `{_ref: id}`
    pub fn from_ref(id: impl Into<String>) -> Self {
        Self {
            reference: Some(id.into()),
            ..Self::default()
        }
    }

    /// `{_id: id}`
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// `{path: path}`
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// `{url: url}`
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Attach document metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether `_type` marks this as an image asset document.
    pub fn is_image_asset(&self) -> bool {
        self.type_name.as_deref() == Some(IMAGE_ASSET_TYPE)
    }

    /// Whether `_type` marks this as a file asset document.
    pub fn is_file_asset(&self) -> bool {
        self.type_name.as_deref() == Some(FILE_ASSET_TYPE)
    }

    /// Read the known fields off a JSON object. Fields of the wrong JSON type are ignored;
    /// unknown fields are kept in `extra`.
    pub(crate) fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let extra = value
            .as_object()
            .map(|fields| {
                fields
                    .iter()
                    .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
                    .map(|(key, field)| (key.clone(), field.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            reference: text("_ref"),
            weak: value.get("_weak").and_then(Value::as_bool),
            id: text("_id"),
            type_name: text("_type"),
            path: text("path"),
            url: text("url"),
            asset_id: text("assetId"),
            extension: text("extension"),
            original_filename: text("originalFilename"),
            metadata: value.get("metadata").and_then(Value::as_object).cloned(),
            extra,
        }
    }
}

/// Object holding an asset stub under `asset`, with optional crop and hotspot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetObjectStub {
    /// Object type, such as `image` or `file`.
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Wrapped asset stub.
    pub asset: AssetStub,
    /// Image crop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<ImageCrop>,
    /// Image hotspot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<ImageHotspot>,
}

impl AssetObjectStub {
    /// Wrap a stub with no crop or hotspot.
    pub fn new(asset: AssetStub) -> Self {
        Self {
            asset,
            ..Self::default()
        }
    }

    fn from_value(value: &Value) -> Self {
        Self {
            type_name: value.get("_type").and_then(Value::as_str).map(str::to_string),
            asset: value.get("asset").map(AssetStub::from_value).unwrap_or_default(),
            crop: value
                .get("crop")
                .and_then(|crop| serde_json::from_value(crop.clone()).ok()),
            hotspot: value
                .get("hotspot")
                .and_then(|hotspot| serde_json::from_value(hotspot.clone()).ok()),
        }
    }
}

/// Upload still in progress: an upload marker but no asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadStub {
    /// Object type, such as `image` or `file`.
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Upload marker, usually progress information.
    #[serde(rename = "_upload")]
    pub upload: Value,
}

impl UploadStub {
    /// Upload stub with the given marker.
    pub fn new(upload: Value) -> Self {
        Self {
            type_name: None,
            upload,
        }
    }

    fn from_value(value: &Value) -> Self {
        Self {
            type_name: value.get("_type").and_then(Value::as_str).map(str::to_string),
            upload: value.get("_upload").cloned().unwrap_or(Value::Null),
        }
    }
}
