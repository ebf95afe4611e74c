//! Parsing of asset IDs, filenames and CDN URLs into their named parts.

use url::Url;

use crate::constants::{CDN_URL, EXAMPLE_FILE_ID, EXAMPLE_IMAGE_ID};
use crate::error::{AssetError, AssetResult};
use crate::models::{
    AssetIdParts, AssetKind, AssetUrlParts, FileAssetIdParts, FileUrlParts, ImageAssetIdParts,
    ImageUrlParts,
};
use crate::paths::{get_url_filename, raw_url_path};
use crate::patterns;
use crate::predicates::{is_cdn_url, is_file_asset_id, is_image_asset_id, is_image_asset_filename};

type IdGrammar = (fn(&str) -> bool, fn(&str) -> AssetResult<AssetIdParts>);

/// ID grammars in precedence order. The image grammar is strictly more specific.
const ID_GRAMMARS: [IdGrammar; 2] = [
    (is_image_asset_id, parse_image_variant),
    (is_file_asset_id, parse_file_variant),
];

/// Parse an image or file asset document ID into its parts.
pub fn parse_asset_id(document_id: &str) -> AssetResult<AssetIdParts> {
    ID_GRAMMARS
        .iter()
        .find(|(matches, _)| matches(document_id))
        .map(|(_, parse)| parse(document_id))
        .unwrap_or_else(|| {
            Err(malformed(
                document_id,
                format!("\"{EXAMPLE_IMAGE_ID}\" or \"{EXAMPLE_FILE_ID}\""),
            ))
        })
}

/// Parse an image asset document ID, `image-<hash>-<w>x<h>-<ext>`.
pub fn parse_image_asset_id(document_id: &str) -> AssetResult<ImageAssetIdParts> {
    let invalid = || malformed(document_id, format!("\"{EXAMPLE_IMAGE_ID}\""));
    let caps = patterns::image_asset_id()
        .captures(document_id)
        .ok_or_else(invalid)?;
    let width = caps[2].parse::<u32>().map_err(|_| invalid())?;
    let height = caps[3].parse::<u32>().map_err(|_| invalid())?;

    Ok(ImageAssetIdParts {
        asset_id: caps[1].to_string(),
        width,
        height,
        extension: caps[4].to_string(),
    })
}

/// Parse a file asset document ID, `file-<hash>-<ext>`.
pub fn parse_file_asset_id(document_id: &str) -> AssetResult<FileAssetIdParts> {
    let caps = patterns::file_asset_id()
        .captures(document_id)
        .ok_or_else(|| malformed(document_id, format!("\"{EXAMPLE_FILE_ID}\"")))?;

    Ok(FileAssetIdParts {
        asset_id: caps[1].to_string(),
        extension: caps[2].to_string(),
    })
}

/// Parse an asset filename (`<hash>-<w>x<h>.<ext>` or `<hash>.<ext>`) into its parts.
///
/// CDN URLs and storage paths are accepted too; their canonical filename is used.
pub fn parse_asset_filename(filename: &str) -> AssetResult<AssetIdParts> {
    let invalid = || AssetError::InvalidFilename {
        filename: filename.to_string(),
    };
    let file = get_url_filename(filename).map_err(|_| invalid())?;
    let kind = if is_image_asset_filename(&file) {
        AssetKind::Image
    } else {
        AssetKind::File
    };
    let (stem, extension) = file.rsplit_once('.').ok_or_else(invalid)?;

    parse_asset_id(&format!("{kind}-{stem}-{extension}")).map_err(|_| invalid())
}

/// Parse a CDN URL into asset parts, project details and vanity filename.
///
/// The host is checked before the filename, so a URL from an unknown host fails with
/// [`AssetError::NotACdnUrl`] even when it ends in a valid filename. Query strings are dropped.
/// Path segments are taken as written, without percent-encoding.
pub fn parse_asset_url(url: &str) -> AssetResult<AssetUrlParts> {
    let not_cdn = || AssetError::NotACdnUrl {
        url: url.to_string(),
    };
    if !is_cdn_url(url) {
        return Err(not_cdn());
    }

    let parsed = Url::parse(url).map_err(|_| not_cdn())?;
    let segments: Vec<&str> = raw_url_path(url).split('/').collect();
    let (kind, project_id, dataset, filename, vanity) = match segments.as_slice() {
        [kind, project_id, dataset, filename] => (*kind, *project_id, *dataset, *filename, None),
        [kind, project_id, dataset, filename, vanity] => {
            (*kind, *project_id, *dataset, *filename, Some(*vanity))
        }
        _ => return Err(not_cdn()),
    };

    let kind = AssetKind::from_path_segment(kind).ok_or_else(not_cdn)?;
    if !patterns::project_id_token().is_match(project_id)
        || !patterns::dataset_token().is_match(dataset)
    {
        return Err(not_cdn());
    }

    let origin = parsed.origin().ascii_serialization();
    let base_url = (origin != CDN_URL).then_some(origin);
    let vanity_filename = vanity
        .filter(|vanity| !vanity.is_empty())
        .map(str::to_string);

    match (kind, parse_asset_filename(filename)?) {
        (AssetKind::Image, AssetIdParts::Image(parts)) => Ok(AssetUrlParts::Image(ImageUrlParts {
            asset_id: parts.asset_id,
            width: parts.width,
            height: parts.height,
            extension: parts.extension,
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
            vanity_filename,
            base_url,
        })),
        (AssetKind::File, AssetIdParts::File(parts)) => Ok(AssetUrlParts::File(FileUrlParts {
            asset_id: parts.asset_id,
            extension: parts.extension,
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
            vanity_filename,
            base_url,
        })),
        _ => Err(AssetError::InvalidFilename {
            filename: filename.to_string(),
        }),
    }
}

/// Parse an image CDN URL. File URLs are rejected.
pub fn parse_image_asset_url(url: &str) -> AssetResult<ImageUrlParts> {
    match parse_asset_url(url)? {
        AssetUrlParts::Image(parts) => Ok(parts),
        AssetUrlParts::File(_) => Err(AssetError::NotACdnUrl {
            url: url.to_string(),
        }),
    }
}

/// Parse a file CDN URL. Image URLs are rejected.
pub fn parse_file_asset_url(url: &str) -> AssetResult<FileUrlParts> {
    match parse_asset_url(url)? {
        AssetUrlParts::File(parts) => Ok(parts),
        AssetUrlParts::Image(_) => Err(AssetError::NotACdnUrl {
            url: url.to_string(),
        }),
    }
}

/// Kind of asset a CDN URL points at, or `None` if it is not a valid asset URL.
pub fn get_asset_url_type(url: &str) -> Option<AssetKind> {
    parse_asset_url(url).ok().map(|parts| parts.kind())
}

fn parse_image_variant(document_id: &str) -> AssetResult<AssetIdParts> {
    parse_image_asset_id(document_id).map(AssetIdParts::Image)
}

fn parse_file_variant(document_id: &str) -> AssetResult<AssetIdParts> {
    parse_file_asset_id(document_id).map(AssetIdParts::File)
}

fn malformed(document_id: &str, expected: String) -> AssetError {
    AssetError::MalformedId {
        id: document_id.to_string(),
        expected,
    }
}
