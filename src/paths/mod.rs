//! Storage paths and CDN URLs for assets.
//!
//! Building and extracting are split into separate submodules: `builder` renders canonical
//! paths and URLs from parsed parts, `extract` pulls paths and filenames back out of URLs and
//! asset sources. Parsing a URL and building it again yields the same URL, minus any query
//! string.

mod builder;
mod extract;

pub use builder::{
    build_file_path, build_file_url, build_image_path, build_image_url, get_vanity_stub,
};
pub use extract::{
    get_url_filename, get_url_path, is_valid_filename, try_get_asset_path, try_get_url_filename,
    try_get_url_path,
};

pub(crate) use extract::raw_url_path;
