#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod error;
pub mod forgiving;
pub mod models;
pub mod parse;
pub mod paths;
mod patterns;
pub mod predicates;
pub mod resolve;
pub mod source;
pub mod urls;

pub use config::AssetConfig;
pub use error::{AssetError, AssetResult};
pub use forgiving::{forgive, forgiving_resolver};
pub use models::{
    AssetIdParts, AssetKind, AssetUrlParts, FileAsset, FileAssetIdParts, FileUrlBuilderOptions,
    FileUrlParts, ImageAsset, ImageAssetIdParts, ImageCrop, ImageDimensions, ImageHotspot,
    ImageMetadata, ImageUrlBuilderOptions, ImageUrlParts, PathBuilderOptions, ProjectDetails,
    ResolvedFile, ResolvedImage,
};
pub use parse::{
    get_asset_url_type, parse_asset_filename, parse_asset_id, parse_asset_url,
    parse_file_asset_id, parse_file_asset_url, parse_image_asset_id, parse_image_asset_url,
};
pub use paths::{
    build_file_path, build_file_url, build_image_path, build_image_url, get_url_filename,
    get_url_path, get_vanity_stub, is_valid_filename, try_get_asset_path, try_get_url_filename,
    try_get_url_path,
};
pub use predicates::{
    is_asset_filename, is_asset_id, is_asset_id_stub, is_asset_object_stub, is_asset_path_stub,
    is_asset_url_stub, is_cdn_url, is_file_asset_filename, is_file_asset_id,
    is_image_asset_filename, is_image_asset_id, is_in_progress_upload, is_reference,
    is_sanity_file_asset, is_sanity_image_asset,
};
pub use resolve::{
    get_asset_document_id, get_extension, get_file, get_file_asset, get_id_from_string,
    get_image, get_image_asset, get_image_dimensions, get_project, is_file_source,
    is_image_source, try_get_asset_document_id, try_get_extension, try_get_file,
    try_get_file_asset, try_get_id_from_string, try_get_image, try_get_image_asset,
    try_get_image_dimensions, try_get_project,
};
pub use source::{AssetObjectStub, AssetSource, AssetStub, UploadStub};
pub use urls::{is_sanity_asset_url, is_sanity_file_url, is_sanity_image_url};
