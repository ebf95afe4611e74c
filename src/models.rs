//! Data structures produced by parsing and resolution, and consumed by the path builder.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The two families of hosted assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Image asset, IDs carry dimensions.
    Image,
    /// Any other uploaded file.
    File,
}

impl AssetKind {
    /// Lowercase name, also the ID prefix (`image-`, `file-`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::File => "file",
        }
    }

    /// First segment of storage paths for this kind.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::File => "files",
        }
    }

    pub(crate) fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "images" => Some(Self::Image),
            "files" => Some(Self::File),
            _ => None,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named parts of an image asset ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAssetIdParts {
    /// Content hash.
    pub asset_id: String,
    /// Width in pixels, always positive.
    pub width: u32,
    /// Height in pixels, always positive.
    pub height: u32,
    /// Extension without the leading dot.
    pub extension: String,
}

/// Named parts of a file asset ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAssetIdParts {
    /// Content hash.
    pub asset_id: String,
    /// Extension without the leading dot.
    pub extension: String,
}

/// Parts of an asset ID, discriminated by asset kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssetIdParts {
    /// `image-<hash>-<w>x<h>-<ext>`
    Image(ImageAssetIdParts),
    /// `file-<hash>-<ext>`
    File(FileAssetIdParts),
}

impl AssetIdParts {
    /// Kind of asset these parts describe.
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Image(_) => AssetKind::Image,
            Self::File(_) => AssetKind::File,
        }
    }

    /// Content hash.
    pub fn asset_id(&self) -> &str {
        match self {
            Self::Image(parts) => &parts.asset_id,
            Self::File(parts) => &parts.asset_id,
        }
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> &str {
        match self {
            Self::Image(parts) => &parts.extension,
            Self::File(parts) => &parts.extension,
        }
    }
}

/// Parts of an image CDN URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlParts {
    /// Content hash.
    pub asset_id: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Extension without the leading dot.
    pub extension: String,
    /// Project the asset belongs to.
    pub project_id: String,
    /// Dataset the asset belongs to.
    pub dataset: String,
    /// Human readable filename segment following the canonical filename.
    pub vanity_filename: Option<String>,
    /// Origin the URL was served from, when it is not the default CDN host.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_url: Option<String>,
}

/// Parts of a file CDN URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUrlParts {
    /// Content hash.
    pub asset_id: String,
    /// Extension without the leading dot.
    pub extension: String,
    /// Project the asset belongs to.
    pub project_id: String,
    /// Dataset the asset belongs to.
    pub dataset: String,
    /// Human readable filename segment following the canonical filename.
    pub vanity_filename: Option<String>,
    /// Origin the URL was served from, when it is not the default CDN host.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_url: Option<String>,
}

/// Parts of any CDN URL, discriminated by asset kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssetUrlParts {
    /// URL below `/images/`.
    Image(ImageUrlParts),
    /// URL below `/files/`.
    File(FileUrlParts),
}

impl AssetUrlParts {
    /// Kind of asset the URL points at.
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Image(_) => AssetKind::Image,
            Self::File(_) => AssetKind::File,
        }
    }
}

/// Project and dataset an asset belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    /// Project ID.
    pub project_id: String,
    /// Dataset name.
    pub dataset: String,
    /// Origin overriding the default CDN host.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_url: Option<String>,
}

impl ProjectDetails {
    /// Project details served from the default CDN host.
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            base_url: None,
        }
    }

    /// Serve from a custom origin instead of the default CDN host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Options accepted by the path and URL builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathBuilderOptions {
    /// Project ID, takes priority over one carried by the asset parts.
    pub project_id: Option<String>,
    /// Dataset, takes priority over one carried by the asset parts.
    pub dataset: Option<String>,
    /// Origin overriding the default CDN host.
    pub base_url: Option<String>,
    /// Append the vanity filename, if any. Defaults to `true`.
    pub use_vanity_name: Option<bool>,
}

impl PathBuilderOptions {
    /// Whether the vanity filename should be appended to built paths.
    pub fn use_vanity_name(&self) -> bool {
        self.use_vanity_name.unwrap_or(true)
    }
}

impl From<&ProjectDetails> for PathBuilderOptions {
    fn from(project: &ProjectDetails) -> Self {
        Self {
            project_id: Some(project.project_id.clone()),
            dataset: Some(project.dataset.clone()),
            base_url: project.base_url.clone(),
            use_vanity_name: None,
        }
    }
}

/// Minimal description of an image needed to render its path or URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlBuilderOptions {
    /// Content hash.
    pub asset_id: String,
    /// Extension without the leading dot.
    pub extension: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Project ID, used when the builder options carry none.
    pub project_id: Option<String>,
    /// Dataset, used when the builder options carry none.
    pub dataset: Option<String>,
    /// Origin, used when the builder options carry none.
    pub base_url: Option<String>,
    /// Vanity filename. Preferred over `original_filename`.
    pub vanity_filename: Option<String>,
    /// Original upload filename, used as vanity filename fallback.
    pub original_filename: Option<String>,
}

impl From<ImageUrlParts> for ImageUrlBuilderOptions {
    fn from(parts: ImageUrlParts) -> Self {
        Self {
            asset_id: parts.asset_id,
            extension: parts.extension,
            width: parts.width,
            height: parts.height,
            project_id: Some(parts.project_id),
            dataset: Some(parts.dataset),
            base_url: parts.base_url,
            vanity_filename: parts.vanity_filename,
            original_filename: None,
        }
    }
}

impl From<&ImageAsset> for ImageUrlBuilderOptions {
    fn from(asset: &ImageAsset) -> Self {
        Self {
            asset_id: asset.asset_id.clone(),
            extension: asset.extension.clone(),
            width: asset.metadata.dimensions.width,
            height: asset.metadata.dimensions.height,
            original_filename: asset.original_filename.clone(),
            ..Self::default()
        }
    }
}

/// Minimal description of a file needed to render its path or URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUrlBuilderOptions {
    /// Content hash.
    pub asset_id: String,
    /// Extension without the leading dot.
    pub extension: String,
    /// Project ID, used when the builder options carry none.
    pub project_id: Option<String>,
    /// Dataset, used when the builder options carry none.
    pub dataset: Option<String>,
    /// Origin, used when the builder options carry none.
    pub base_url: Option<String>,
    /// Vanity filename. Preferred over `original_filename`.
    pub vanity_filename: Option<String>,
    /// Original upload filename, used as vanity filename fallback.
    pub original_filename: Option<String>,
}

impl From<FileUrlParts> for FileUrlBuilderOptions {
    fn from(parts: FileUrlParts) -> Self {
        Self {
            asset_id: parts.asset_id,
            extension: parts.extension,
            project_id: Some(parts.project_id),
            dataset: Some(parts.dataset),
            base_url: parts.base_url,
            vanity_filename: parts.vanity_filename,
            original_filename: None,
        }
    }
}

impl From<&FileAsset> for FileUrlBuilderOptions {
    fn from(asset: &FileAsset) -> Self {
        Self {
            asset_id: asset.asset_id.clone(),
            extension: asset.extension.clone(),
            original_filename: asset.original_filename.clone(),
            ..Self::default()
        }
    }
}

/// Width, height and aspect ratio of an image.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width / height`, unrounded.
    pub aspect_ratio: f64,
}

impl ImageDimensions {
    /// Dimensions with the aspect ratio derived from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            aspect_ratio: f64::from(width) / f64::from(height),
        }
    }
}

/// Image metadata: computed dimensions plus whatever the source document carried.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageMetadata {
    /// Dimensions derived from the asset ID.
    pub dimensions: ImageDimensions,
    /// Remaining metadata fields (`lqip`, `palette`, ...), passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fully resolved image asset document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    /// Document ID, `image-<hash>-<w>x<h>-<ext>`.
    #[serde(rename = "_id")]
    pub id: String,
    /// Document type, `sanity.imageAsset`.
    #[serde(rename = "_type")]
    pub type_name: String,
    /// Content hash.
    pub asset_id: String,
    /// Extension without the leading dot.
    pub extension: String,
    /// Absolute CDN URL.
    pub url: String,
    /// Storage path.
    pub path: String,
    /// Original upload filename, when the source document carried one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub original_filename: Option<String>,
    /// Image metadata.
    pub metadata: ImageMetadata,
    /// Other fields of a source asset document (`size`, `mimeType`, `_rev`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fully resolved file asset document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAsset {
    /// Document ID, `file-<hash>-<ext>`.
    #[serde(rename = "_id")]
    pub id: String,
    /// Document type, `sanity.fileAsset`.
    #[serde(rename = "_type")]
    pub type_name: String,
    /// Content hash.
    pub asset_id: String,
    /// Extension without the leading dot.
    pub extension: String,
    /// Absolute CDN URL.
    pub url: String,
    /// Storage path.
    pub path: String,
    /// Original upload filename, when the source document carried one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub original_filename: Option<String>,
    /// Metadata carried by the source document.
    pub metadata: Map<String, Value>,
    /// Other fields of a source asset document (`size`, `mimeType`, `_rev`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Crop rectangle, as fractions trimmed from each edge.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageCrop {
    /// Object type, usually `sanity.imageCrop`.
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none", default)]
    pub type_name: Option<String>,
    /// Fraction trimmed from the left edge.
    pub left: f64,
    /// Fraction trimmed from the bottom edge.
    pub bottom: f64,
    /// Fraction trimmed from the right edge.
    pub right: f64,
    /// Fraction trimmed from the top edge.
    pub top: f64,
}

impl Default for ImageCrop {
    fn default() -> Self {
        Self {
            type_name: None,
            left: 0.0,
            bottom: 0.0,
            right: 0.0,
            top: 0.0,
        }
    }
}

impl ImageCrop {
    /// Whether nothing is trimmed from any edge. `_type` is ignored.
    pub fn is_default(&self) -> bool {
        let default = Self::default();
        (self.left, self.bottom, self.right, self.top)
            == (default.left, default.bottom, default.right, default.top)
    }
}

/// Hotspot, the area of the image to keep in view when cropping.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageHotspot {
    /// Object type, usually `sanity.imageHotspot`.
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none", default)]
    pub type_name: Option<String>,
    /// Horizontal center.
    pub x: f64,
    /// Vertical center.
    pub y: f64,
    /// Width fraction.
    pub width: f64,
    /// Height fraction.
    pub height: f64,
}

impl Default for ImageHotspot {
    fn default() -> Self {
        Self {
            type_name: None,
            x: 0.5,
            y: 0.5,
            width: 1.0,
            height: 1.0,
        }
    }
}

impl ImageHotspot {
    /// Whether the hotspot covers the whole image, centered. `_type` is ignored.
    pub fn is_default(&self) -> bool {
        let default = Self::default();
        (self.x, self.y, self.width, self.height)
            == (default.x, default.y, default.width, default.height)
    }
}

/// Image object resolved by [`crate::get_image`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResolvedImage {
    /// Resolved asset document.
    pub asset: ImageAsset,
    /// Crop from the source, or the whole image.
    pub crop: ImageCrop,
    /// Hotspot from the source, or the image center.
    pub hotspot: ImageHotspot,
}

/// File object resolved by [`crate::get_file`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResolvedFile {
    /// Resolved asset document.
    pub asset: FileAsset,
}
