use crate::constants::CDN_URL;
use crate::error::{AssetError, AssetResult};
use crate::models::{FileUrlBuilderOptions, ImageUrlBuilderOptions, PathBuilderOptions};

/// Render the storage path of an image.
///
/// Project ID and dataset are taken from `options` first, then from `asset`. The vanity
/// filename (or the original filename) is appended unless `options.use_vanity_name` is `false`.
pub fn build_image_path(
    asset: &ImageUrlBuilderOptions,
    options: &PathBuilderOptions,
) -> AssetResult<String> {
    let (project_id, dataset) = project_segments(
        options,
        asset.project_id.as_deref(),
        asset.dataset.as_deref(),
        "path for image",
    )?;
    let vanity = get_vanity_stub(
        asset.original_filename.as_deref(),
        asset.vanity_filename.as_deref(),
        options,
    );

    Ok(format!(
        "images/{project_id}/{dataset}/{}-{}x{}.{}{vanity}",
        asset.asset_id, asset.width, asset.height, asset.extension
    ))
}

/// Render the absolute URL of an image.
pub fn build_image_url(
    asset: &ImageUrlBuilderOptions,
    options: &PathBuilderOptions,
) -> AssetResult<String> {
    let path = build_image_path(asset, options)?;
    Ok(format!(
        "{}/{path}",
        base_url(options, asset.base_url.as_deref())
    ))
}

/// Render the storage path of a file.
pub fn build_file_path(
    asset: &FileUrlBuilderOptions,
    options: &PathBuilderOptions,
) -> AssetResult<String> {
    let (project_id, dataset) = project_segments(
        options,
        asset.project_id.as_deref(),
        asset.dataset.as_deref(),
        "path for file",
    )?;
    let vanity = get_vanity_stub(
        asset.original_filename.as_deref(),
        asset.vanity_filename.as_deref(),
        options,
    );

    Ok(format!(
        "files/{project_id}/{dataset}/{}.{}{vanity}",
        asset.asset_id, asset.extension
    ))
}

/// Render the absolute URL of a file.
pub fn build_file_url(
    asset: &FileUrlBuilderOptions,
    options: &PathBuilderOptions,
) -> AssetResult<String> {
    let path = build_file_path(asset, options)?;
    Ok(format!(
        "{}/{path}",
        base_url(options, asset.base_url.as_deref())
    ))
}

/// The `/<vanity>` suffix for a path, or an empty string.
///
/// `vanity_filename` wins over `original_filename`.
pub fn get_vanity_stub(
    original_filename: Option<&str>,
    vanity_filename: Option<&str>,
    options: &PathBuilderOptions,
) -> String {
    match non_empty(vanity_filename).or(non_empty(original_filename)) {
        Some(name) if options.use_vanity_name() => format!("/{name}"),
        _ => String::new(),
    }
}

fn project_segments<'a>(
    options: &'a PathBuilderOptions,
    project_id: Option<&'a str>,
    dataset: Option<&'a str>,
    target: &str,
) -> AssetResult<(&'a str, &'a str)> {
    let project_id = non_empty(options.project_id.as_deref()).or(non_empty(project_id));
    let dataset = non_empty(options.dataset.as_deref()).or(non_empty(dataset));

    match (project_id, dataset) {
        (Some(project_id), Some(dataset)) => Ok((project_id, dataset)),
        _ => Err(AssetError::missing_project(target)),
    }
}

fn base_url<'a>(options: &'a PathBuilderOptions, fallback: Option<&'a str>) -> &'a str {
    non_empty(options.base_url.as_deref())
        .or(non_empty(fallback))
        .unwrap_or(CDN_URL)
        .trim_end_matches('/')
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
