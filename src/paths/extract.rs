use url::Url;

use crate::error::{AssetError, AssetResult};
use crate::forgiving::forgiving;
use crate::patterns;
use crate::predicates::{is_asset_filename, is_cdn_url};
use crate::source::{AssetSource, AssetStub};

/// Strip the origin and query string from a CDN URL, e.g.
/// `https://cdn.sanity.io/images/p/d/f00baa-200x200.jpg?w=10` becomes
/// `images/p/d/f00baa-200x200.jpg`. Storage paths are returned unchanged, minus a leading `/`.
///
/// The path is sliced from the input as written, so vanity filenames keep their spelling.
pub fn get_url_path(url: &str) -> AssetResult<String> {
    let relative = url.strip_prefix('/').unwrap_or(url);
    if patterns::asset_path().is_match(relative) {
        return Ok(relative.to_string());
    }

    let unresolvable =
        || AssetError::unresolvable_str(url, format!("failed to resolve path from URL \"{url}\""));

    if !is_cdn_url(url) {
        return Err(unresolvable());
    }

    Url::parse(url).map_err(|_| unresolvable())?;
    Ok(raw_url_path(url).to_string())
}

/// Path of an absolute URL without its leading `/`, query string or fragment.
///
/// Unlike [`Url::path`] nothing is percent-encoded.
pub(crate) fn raw_url_path(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = match rest.find(['/', '?', '#']) {
        Some(start) if rest[start..].starts_with('/') => &rest[start + 1..],
        _ => "",
    };
    path.split(['?', '#']).next().unwrap_or_default()
}

/// The canonical asset filename of a CDN URL, storage path or bare filename, e.g.
/// `https://cdn.sanity.io/images/p/d/f00baa-200x200.jpg/pretty.jpg` becomes
/// `f00baa-200x200.jpg`. Vanity filenames and query strings are dropped.
pub fn get_url_filename(url: &str) -> AssetResult<String> {
    let path = try_get_url_path(url)?.unwrap_or_else(|| url.to_string());
    let rest = match patterns::asset_path().find(&path) {
        Some(prefix) => &path[prefix.end()..],
        None => path.as_str(),
    };
    let filename = rest
        .split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();

    if !is_valid_filename(filename) {
        return Err(AssetError::unresolvable_str(
            url,
            format!("failed to resolve filename from URL \"{url}\""),
        ));
    }

    Ok(filename.to_string())
}

forgiving! {
    /// [`get_url_path`], returning `Ok(None)` when the URL cannot be resolved.
    pub fn try_get_url_path = get_url_path(url: &str) -> String;

    /// [`get_url_filename`], returning `Ok(None)` when the URL cannot be resolved.
    pub fn try_get_url_filename = get_url_filename(url: &str) -> String;
}

/// Whether the filename matches the image or file filename grammar.
pub fn is_valid_filename(filename: &str) -> bool {
    is_asset_filename(filename)
}

/// The storage path of a path-bearing source, if any.
///
/// Strings, path stubs and URL stubs (optionally nested under `asset`) carry a path. References
/// and ID stubs do not.
pub fn try_get_asset_path(src: &AssetSource) -> Option<String> {
    match src {
        AssetSource::Text(text) if has_path(text) => get_url_path(text).ok(),
        AssetSource::Text(_) | AssetSource::Upload(_) => None,
        AssetSource::Stub(_) | AssetSource::Object(_) => src.stub().and_then(stub_path),
    }
}

/// Whether the URL or path contains a storage path.
fn has_path(url_or_path: &str) -> bool {
    get_url_path(url_or_path).is_ok_and(|path| patterns::asset_path().is_match(&path))
}

fn stub_path(stub: &AssetStub) -> Option<String> {
    if stub.reference.is_some() {
        return None;
    }

    if let Some(path) = &stub.path {
        return Some(path.clone());
    }

    stub.url.as_deref().and_then(|url| get_url_path(url).ok())
}
