//! Fixed values shared by the parser, resolver and path builder.

/// Default CDN origin used when building URLs and resolving bare paths.
pub const CDN_URL: &str = "https://cdn.sanity.io";

/// Document type of image asset records.
pub const IMAGE_ASSET_TYPE: &str = "sanity.imageAsset";

/// Document type of file asset records.
pub const FILE_ASSET_TYPE: &str = "sanity.fileAsset";

/// Placeholder document ID returned for uploads that have no asset yet.
pub const IN_PROGRESS_ASSET_ID: &str = "upload-in-progress-placeholder";

/// Placeholder `assetId` for in-progress uploads.
pub const IN_PROGRESS_ASSET_ASSET_ID: &str = "upload-in-progress";

/// Placeholder extension for in-progress uploads.
pub const IN_PROGRESS_ASSET_EXTENSION: &str = "tmp";

/// Project ID used when only the asset ID matters.
pub(crate) const DUMMY_PROJECT_ID: &str = "a";

/// Dataset used when only the asset ID matters.
pub(crate) const DUMMY_DATASET: &str = "b";

pub(crate) const EXAMPLE_IMAGE_ID: &str =
    "image-027401f31c3ac1e6d78c5d539ccd1beff72b9b11-2000x3000-jpg";

pub(crate) const EXAMPLE_FILE_ID: &str = "file-027401f31c3ac1e6d78c5d539ccd1beff72b9b11-pdf";
