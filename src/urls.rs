//! Boolean checks for CDN asset URLs.

use crate::models::AssetKind;
use crate::parse::get_asset_url_type;

/// Whether the URL is a valid image or file CDN URL.
pub fn is_sanity_asset_url(url: &str) -> bool {
    get_asset_url_type(url).is_some()
}

/// Whether the URL is a valid image CDN URL.
pub fn is_sanity_image_url(url: &str) -> bool {
    get_asset_url_type(url) == Some(AssetKind::Image)
}

/// Whether the URL is a valid file CDN URL.
pub fn is_sanity_file_url(url: &str) -> bool {
    get_asset_url_type(url) == Some(AssetKind::File)
}
