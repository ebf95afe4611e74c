//! Resolution of any asset source into document IDs, asset documents and project details.
//!
//! Every resolver has a strict form returning [`AssetError`] and a `try_` form generated with
//! `forgiving!` that turns [`AssetError::Unresolvable`] into `Ok(None)`.
//!
//! Sources are classified in a fixed order: in-progress uploads short-circuit to placeholder
//! values, object stubs are unwrapped one level, then references, ID stubs, path stubs and URL
//! stubs are tried in turn. Bare strings go through [`get_id_from_string`].

use tracing::debug;
use url::Url;

use crate::constants::{
    CDN_URL, DUMMY_DATASET, DUMMY_PROJECT_ID, FILE_ASSET_TYPE, IMAGE_ASSET_TYPE,
    IN_PROGRESS_ASSET_ASSET_ID, IN_PROGRESS_ASSET_EXTENSION, IN_PROGRESS_ASSET_ID,
};
use crate::error::{AssetError, AssetResult};
use crate::forgiving::forgiving;
use crate::models::{
    AssetKind, FileAsset, FileUrlBuilderOptions, ImageAsset, ImageDimensions, ImageMetadata,
    ImageUrlBuilderOptions, PathBuilderOptions, ProjectDetails, ResolvedFile, ResolvedImage,
};
use crate::parse::{parse_asset_id, parse_file_asset_id, parse_image_asset_id};
use crate::paths::{
    build_file_path, build_file_url, build_image_path, build_image_url, get_url_path,
    try_get_asset_path,
};
use crate::patterns;
use crate::predicates::{is_asset_id, is_cdn_url, is_file_asset_filename, is_image_asset_filename};
use crate::source::{AssetSource, AssetStub};

const UNRESOLVABLE_PROJECT: &str = "failed to resolve project ID and dataset from source";

/// One way of reading an asset ID out of a bare string.
struct StringRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    resolve: fn(&str) -> Option<String>,
}

/// Tried in order, the first matching rule decides.
const STRING_RULES: [StringRule; 6] = [
    StringRule {
        name: "document id",
        matches: is_asset_id,
        resolve: id_verbatim,
    },
    StringRule {
        name: "cdn url",
        matches: is_asset_cdn_url,
        resolve: id_from_url,
    },
    StringRule {
        name: "rooted path",
        matches: is_rooted_asset_path,
        resolve: id_from_rooted_path,
    },
    StringRule {
        name: "path",
        matches: is_asset_path,
        resolve: id_from_path,
    },
    StringRule {
        name: "file filename",
        matches: is_file_asset_filename,
        resolve: id_from_file_filename,
    },
    StringRule {
        name: "image filename",
        matches: is_image_asset_filename,
        resolve: id_from_image_filename,
    },
];

/// Resolve the asset document ID of any source.
///
/// In-progress uploads resolve to [`IN_PROGRESS_ASSET_ID`], which is not a valid
/// asset ID. Every other source must produce an ID matching the image or file grammar, or the
/// call fails with [`AssetError::Unresolvable`] carrying the source.
pub fn get_asset_document_id(src: &AssetSource) -> AssetResult<String> {
    let candidate = match src {
        AssetSource::Upload(_) => return Ok(IN_PROGRESS_ASSET_ID.to_string()),
        AssetSource::Text(text) => {
            return get_id_from_string(text)
                .map_err(|_| AssetError::unresolvable(src, AssetError::UNRESOLVABLE_ASSET_ID));
        }
        AssetSource::Stub(_) | AssetSource::Object(_) => src.stub().and_then(stub_candidate),
    };

    match candidate.filter(|id| is_asset_id(id)) {
        Some(id) => Ok(id),
        None => {
            debug!(source = ?src, "asset source did not resolve to a document ID");
            Err(AssetError::unresolvable(src, AssetError::UNRESOLVABLE_ASSET_ID))
        }
    }
}

/// Coerce a string (ID, CDN URL, storage path or filename) to an asset document ID.
///
/// Filenames carry no project, so a placeholder project is used to read the ID out of them.
pub fn get_id_from_string(text: &str) -> AssetResult<String> {
    let candidate = STRING_RULES
        .iter()
        .find(|rule| (rule.matches)(text))
        .and_then(|rule| {
            debug!(rule = rule.name, input = text, "classified asset string");
            (rule.resolve)(text)
        });

    match candidate.filter(|id| is_asset_id(id)) {
        Some(id) => Ok(id),
        None => {
            debug!(input = text, "asset string did not resolve to a document ID");
            Err(AssetError::unresolvable_str(text, AssetError::UNRESOLVABLE_ASSET_ID))
        }
    }
}

/// Width, height and aspect ratio of an image source.
///
/// In-progress uploads report all zeroes. A source resolving to a file ID fails with
/// [`AssetError::MalformedId`].
pub fn get_image_dimensions(src: &AssetSource) -> AssetResult<ImageDimensions> {
    if src.is_in_progress_upload() {
        return Ok(ImageDimensions {
            width: 0,
            height: 0,
            aspect_ratio: 0.0,
        });
    }

    let id = get_asset_document_id(src)?;
    let parts = parse_image_asset_id(&id)?;
    Ok(ImageDimensions::new(parts.width, parts.height))
}

/// Extension of an image or file source, without the leading dot.
pub fn get_extension(src: &AssetSource) -> AssetResult<String> {
    if src.is_in_progress_upload() {
        return Ok(IN_PROGRESS_ASSET_EXTENSION.to_string());
    }

    let id = get_asset_document_id(src)?;
    Ok(parse_asset_id(&id)?.extension().to_string())
}

/// Resolve an image object: the asset document plus crop and hotspot.
///
/// Crop and hotspot are taken from an object stub when present and default to the whole image,
/// centered.
pub fn get_image(
    src: &AssetSource,
    project: Option<&ProjectDetails>,
) -> AssetResult<ResolvedImage> {
    let (crop, hotspot) = match src {
        AssetSource::Object(object) => (object.crop.clone(), object.hotspot.clone()),
        _ => (None, None),
    };

    Ok(ResolvedImage {
        asset: get_image_asset(src, project)?,
        crop: crop.unwrap_or_default(),
        hotspot: hotspot.unwrap_or_default(),
    })
}

/// Resolve an image asset document with URL, path and dimensions.
///
/// The explicit `project` wins over project details inferred from a path or URL in the source.
/// Metadata already present on the source is kept, except `dimensions` which is recomputed
/// from the ID. Resolving the ID comes first, so a source that is not an asset at all fails
/// with [`AssetError::Unresolvable`] rather than [`AssetError::MissingProjectDetails`].
pub fn get_image_asset(
    src: &AssetSource,
    project: Option<&ProjectDetails>,
) -> AssetResult<ImageAsset> {
    if src.is_in_progress_upload() {
        return Ok(in_progress_image_asset());
    }

    let id = get_asset_document_id(src)?;
    let parts = parse_image_asset_id(&id)?;
    let options = resolved_path_options(src, project)?;
    let stub = src.stub();
    let original_filename = stub.and_then(|stub| stub.original_filename.clone());

    let mut extra = stub
        .and_then(|stub| stub.metadata.clone())
        .unwrap_or_default();
    extra.remove("dimensions");
    let document_fields = stub
        .filter(|stub| stub.is_image_asset())
        .map(|stub| stub.extra.clone())
        .unwrap_or_default();

    let builder = ImageUrlBuilderOptions {
        asset_id: parts.asset_id.clone(),
        extension: parts.extension.clone(),
        width: parts.width,
        height: parts.height,
        original_filename: original_filename.clone(),
        ..ImageUrlBuilderOptions::default()
    };

    Ok(ImageAsset {
        path: build_image_path(&builder, &options)?,
        url: build_image_url(&builder, &options)?,
        id,
        type_name: IMAGE_ASSET_TYPE.to_string(),
        asset_id: parts.asset_id,
        extension: parts.extension,
        original_filename,
        metadata: ImageMetadata {
            dimensions: ImageDimensions::new(parts.width, parts.height),
            extra,
        },
        extra: document_fields,
    })
}

/// Resolve a file object.
pub fn get_file(src: &AssetSource, project: Option<&ProjectDetails>) -> AssetResult<ResolvedFile> {
    Ok(ResolvedFile {
        asset: get_file_asset(src, project)?,
    })
}

/// Resolve a file asset document with URL and path. See [`get_image_asset`].
pub fn get_file_asset(
    src: &AssetSource,
    project: Option<&ProjectDetails>,
) -> AssetResult<FileAsset> {
    if src.is_in_progress_upload() {
        return Ok(in_progress_file_asset());
    }

    let id = get_asset_document_id(src)?;
    let parts = parse_file_asset_id(&id)?;
    let options = resolved_path_options(src, project)?;
    let stub = src.stub();
    let original_filename = stub.and_then(|stub| stub.original_filename.clone());
    let document_fields = stub
        .filter(|stub| stub.is_file_asset())
        .map(|stub| stub.extra.clone())
        .unwrap_or_default();

    let builder = FileUrlBuilderOptions {
        asset_id: parts.asset_id.clone(),
        extension: parts.extension.clone(),
        original_filename: original_filename.clone(),
        ..FileUrlBuilderOptions::default()
    };

    Ok(FileAsset {
        path: build_file_path(&builder, &options)?,
        url: build_file_url(&builder, &options)?,
        id,
        type_name: FILE_ASSET_TYPE.to_string(),
        asset_id: parts.asset_id,
        extension: parts.extension,
        original_filename,
        metadata: stub
            .and_then(|stub| stub.metadata.clone())
            .unwrap_or_default(),
        extra: document_fields,
    })
}

/// Project ID and dataset of a path-bearing source (string, path stub or URL stub).
///
/// A source that is a valid asset reference but carries no usable path, such as a bare ID or
/// a reference, fails with [`AssetError::MissingProjectDetails`]. Anything else fails with
/// [`AssetError::Unresolvable`]. Sources served from a custom CDN host also carry that host.
pub fn get_project(src: &AssetSource) -> AssetResult<ProjectDetails> {
    let project = try_get_asset_path(src).and_then(|path| {
        let caps = patterns::asset_path().captures(&path)?;
        Some(ProjectDetails::new(&caps[2], &caps[3]))
    });

    if let Some(mut project) = project {
        project.base_url = source_origin(src);
        debug!(
            project_id = %project.project_id,
            dataset = %project.dataset,
            "inferred project details from asset source"
        );
        return Ok(project);
    }

    if src.is_in_progress_upload() {
        return Err(AssetError::unresolvable(src, UNRESOLVABLE_PROJECT));
    }

    match try_get_asset_document_id(src)? {
        Some(id) => Err(AssetError::missing_project(format!("URL for asset {id}"))),
        None => Err(AssetError::unresolvable(src, UNRESOLVABLE_PROJECT)),
    }
}

forgiving! {
    /// [`get_asset_document_id`], returning `Ok(None)` for unresolvable sources.
    pub fn try_get_asset_document_id = get_asset_document_id(src: &AssetSource) -> String;

    /// [`get_id_from_string`], returning `Ok(None)` for unresolvable strings.
    pub fn try_get_id_from_string = get_id_from_string(text: &str) -> String;

    /// [`get_image_dimensions`], returning `Ok(None)` for unresolvable sources.
    pub fn try_get_image_dimensions = get_image_dimensions(src: &AssetSource) -> ImageDimensions;

    /// [`get_extension`], returning `Ok(None)` for unresolvable sources.
    pub fn try_get_extension = get_extension(src: &AssetSource) -> String;

    /// [`get_image`], returning `Ok(None)` for unresolvable sources.
    pub fn try_get_image = get_image(
        src: &AssetSource,
        project: Option<&ProjectDetails>,
    ) -> ResolvedImage;

    /// [`get_image_asset`], returning `Ok(None)` for unresolvable sources.
    pub fn try_get_image_asset = get_image_asset(
        src: &AssetSource,
        project: Option<&ProjectDetails>,
    ) -> ImageAsset;

    /// [`get_file`], returning `Ok(None)` for unresolvable sources.
    pub fn try_get_file = get_file(
        src: &AssetSource,
        project: Option<&ProjectDetails>,
    ) -> ResolvedFile;

    /// [`get_file_asset`], returning `Ok(None)` for unresolvable sources.
    pub fn try_get_file_asset = get_file_asset(
        src: &AssetSource,
        project: Option<&ProjectDetails>,
    ) -> FileAsset;

    /// [`get_project`], returning `Ok(None)` for unresolvable sources.
    ///
    /// Sources that resolve to an asset ID but carry no path still fail with
    /// [`AssetError::MissingProjectDetails`].
    pub fn try_get_project = get_project(src: &AssetSource) -> ProjectDetails;
}

/// Whether the source resolves to an image asset ID. Never fails.
pub fn is_image_source(src: &AssetSource) -> bool {
    resolves_to(src, AssetKind::Image)
}

/// Whether the source resolves to a file asset ID. Never fails.
pub fn is_file_source(src: &AssetSource) -> bool {
    resolves_to(src, AssetKind::File)
}

fn resolves_to(src: &AssetSource, kind: AssetKind) -> bool {
    matches!(
        try_get_asset_document_id(src),
        Ok(Some(id)) if id.starts_with(&format!("{kind}-"))
    )
}

fn resolved_path_options(
    src: &AssetSource,
    project: Option<&ProjectDetails>,
) -> AssetResult<PathBuilderOptions> {
    let project = match project {
        Some(project) => project.clone(),
        None => get_project(src)?,
    };

    Ok(PathBuilderOptions {
        use_vanity_name: Some(false),
        ..PathBuilderOptions::from(&project)
    })
}

fn stub_candidate(stub: &AssetStub) -> Option<String> {
    if let Some(reference) = &stub.reference {
        return Some(reference.clone());
    }
    if let Some(id) = &stub.id {
        return Some(id.clone());
    }
    if let Some(path) = &stub.path {
        return id_from_path(path);
    }
    stub.url.as_deref().and_then(id_from_url)
}

/// Origin of a custom-host CDN URL carried by the source.
fn source_origin(src: &AssetSource) -> Option<String> {
    let url = match src {
        AssetSource::Text(text) => text.as_str(),
        _ => src.stub()?.url.as_deref()?,
    };
    if !is_cdn_url(url) {
        return None;
    }

    let origin = Url::parse(url).ok()?.origin().ascii_serialization();
    (origin != CDN_URL).then_some(origin)
}

/// `<type>s/<project>/<dataset>/<filename>` becomes `<type>-<filename with dots as dashes>`.
fn id_from_url(url: &str) -> Option<String> {
    let path = get_url_path(url).ok()?;
    let mut segments = path.split('/');
    let kind = AssetKind::from_path_segment(segments.next()?)?;
    let filename = segments.nth(2)?.split(['?', '#']).next()?;
    Some(format!("{kind}-{}", filename.replace('.', "-")))
}

fn id_verbatim(text: &str) -> Option<String> {
    Some(text.to_string())
}

fn is_asset_cdn_url(text: &str) -> bool {
    is_cdn_url(text)
        && Url::parse(text).is_ok_and(|url| {
            let path = url.path();
            path.starts_with("/images") || path.starts_with("/files")
        })
}

fn is_rooted_asset_path(text: &str) -> bool {
    text.starts_with("/images/") || text.starts_with("/files/")
}

fn id_from_rooted_path(path: &str) -> Option<String> {
    id_from_url(&format!("{CDN_URL}{path}"))
}

fn is_asset_path(text: &str) -> bool {
    patterns::asset_path().is_match(text)
}

fn id_from_path(path: &str) -> Option<String> {
    id_from_url(&format!("{CDN_URL}/{path}"))
}

fn id_from_file_filename(filename: &str) -> Option<String> {
    id_from_url(&format!(
        "{CDN_URL}/files/{DUMMY_PROJECT_ID}/{DUMMY_DATASET}/{filename}"
    ))
}

fn id_from_image_filename(filename: &str) -> Option<String> {
    id_from_url(&format!(
        "{CDN_URL}/images/{DUMMY_PROJECT_ID}/{DUMMY_DATASET}/{filename}"
    ))
}

fn in_progress_image_asset() -> ImageAsset {
    ImageAsset {
        id: IN_PROGRESS_ASSET_ID.to_string(),
        type_name: IMAGE_ASSET_TYPE.to_string(),
        asset_id: IN_PROGRESS_ASSET_ASSET_ID.to_string(),
        extension: IN_PROGRESS_ASSET_EXTENSION.to_string(),
        url: String::new(),
        path: String::new(),
        original_filename: None,
        metadata: ImageMetadata {
            dimensions: ImageDimensions::new(1, 1),
            extra: Default::default(),
        },
        extra: Default::default(),
    }
}

fn in_progress_file_asset() -> FileAsset {
    FileAsset {
        id: IN_PROGRESS_ASSET_ID.to_string(),
        type_name: FILE_ASSET_TYPE.to_string(),
        asset_id: IN_PROGRESS_ASSET_ASSET_ID.to_string(),
        extension: IN_PROGRESS_ASSET_EXTENSION.to_string(),
        url: String::new(),
        path: String::new(),
        original_filename: None,
        metadata: Default::default(),
        extra: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageCrop, ImageHotspot};
    use crate::source::{AssetObjectStub, UploadStub};
    use serde_json::json;

    const ID: &str = "image-f00baa-320x240-png";
    const URL: &str = "https://cdn.sanity.io/images/foo/bar/f00baa-320x240.png";
    const URL_WITH_QUERY: &str =
        "https://cdn.sanity.io/images/foo/bar/f00baa-320x240.png?w=120&h=120";
    const INFERRED_URL: &str = "https://cdn.sanity.io/images/a/b/f00baa-320x240.png";
    const PATH: &str = "images/foo/bar/f00baa-320x240.png";
    const INFERRED_PATH: &str = "images/a/b/f00baa-320x240.png";

    fn test_project() -> ProjectDetails {
        ProjectDetails::new("a", "b")
    }

    fn expected_asset() -> ImageAsset {
        ImageAsset {
            id: ID.into(),
            type_name: IMAGE_ASSET_TYPE.into(),
            asset_id: "f00baa".into(),
            extension: "png".into(),
            url: INFERRED_URL.into(),
            path: INFERRED_PATH.into(),
            original_filename: None,
            metadata: ImageMetadata {
                dimensions: ImageDimensions::new(320, 240),
                extra: Default::default(),
            },
            extra: Default::default(),
        }
    }

    fn nested(stub: AssetStub) -> AssetSource {
        AssetObjectStub::new(stub).into()
    }

    /// Sources that need explicit project details.
    fn sources_without_project() -> Vec<(&'static str, AssetSource)> {
        vec![
            ("id", ID.into()),
            ("url", URL.into()),
            ("url with query", URL_WITH_QUERY.into()),
            ("path", PATH.into()),
            ("filename", "f00baa-320x240.png".into()),
            ("reference", AssetStub::from_ref(ID).into()),
            ("id stub", AssetStub::from_id(ID).into()),
            ("path stub", AssetStub::from_path(PATH).into()),
            ("url stub", AssetStub::from_url(URL).into()),
            ("url stub with query", AssetStub::from_url(URL_WITH_QUERY).into()),
            ("deep reference", nested(AssetStub::from_ref(ID))),
            ("deep id stub", nested(AssetStub::from_id(ID))),
            ("deep path stub", nested(AssetStub::from_path(PATH))),
            ("deep url stub", nested(AssetStub::from_url(URL))),
        ]
    }

    /// Sources whose project is inferred from their path.
    fn sources_with_project() -> Vec<(&'static str, AssetSource)> {
        vec![
            ("url", INFERRED_URL.into()),
            ("url with query", format!("{INFERRED_URL}?w=120&h=120").into()),
            ("path", INFERRED_PATH.into()),
            ("rooted path", format!("/{INFERRED_PATH}").into()),
            ("path stub", AssetStub::from_path(INFERRED_PATH).into()),
            ("url stub", AssetStub::from_url(INFERRED_URL).into()),
            ("deep path stub", nested(AssetStub::from_path(INFERRED_PATH))),
            (
                "deep url stub with query",
                nested(AssetStub::from_url(format!("{INFERRED_URL}?w=200"))),
            ),
        ]
    }

    fn file_sources() -> Vec<(&'static str, AssetSource)> {
        let id = "file-def987-pdf";
        let path = "files/a/b/def987.pdf";
        let url = format!("https://cdn.sanity.io/{path}");
        vec![
            ("id", id.into()),
            ("reference", AssetStub::from_ref(id).into()),
            ("path stub", AssetStub::from_path(path).into()),
            ("url stub", AssetStub::from_url(url.clone()).into()),
            ("deep reference", nested(AssetStub::from_ref(id))),
            ("deep id stub", nested(AssetStub::from_id(id))),
            ("deep path stub", nested(AssetStub::from_path(path))),
            ("deep url stub", nested(AssetStub::from_url(url))),
        ]
    }

    #[test]
    fn resolves_ids_from_strings() {
        for input in [
            ID,
            URL,
            URL_WITH_QUERY,
            PATH,
            "/images/foo/bar/f00baa-320x240.png",
            "f00baa-320x240.png",
        ] {
            assert_eq!(get_id_from_string(input).unwrap(), ID, "{input}");
        }
        assert_eq!(get_id_from_string("f00baa.pdf").unwrap(), "file-f00baa-pdf");
        assert_eq!(try_get_id_from_string("f00baa-320x240.png"), Ok(Some(ID.into())));
    }

    #[test]
    fn unknown_strings_are_unresolvable() {
        let err = get_id_from_string("who knows").unwrap_err();
        assert!(err.is_unresolvable());
        assert_eq!(err.to_string(), "failed to resolve asset ID from source");
        assert_eq!(try_get_id_from_string("who knows"), Ok(None));
        assert_eq!(
            try_get_id_from_string("https://cdn.sanity.io/studios/foo.jpg"),
            Ok(None)
        );
    }

    #[test]
    fn resolves_document_ids_from_every_shape() {
        for (name, source) in sources_without_project() {
            assert_eq!(get_asset_document_id(&source).unwrap(), ID, "{name}");
        }
    }

    #[test]
    fn unresolvable_document_id_carries_the_source() {
        let source = nested(AssetStub::from_path(""));
        let err = get_asset_document_id(&source).unwrap_err();
        assert_eq!(err.input(), Some(&json!({"asset": {"path": ""}})));
        assert_eq!(try_get_asset_document_id(&"who knows".into()), Ok(None));
    }

    #[test]
    fn in_progress_uploads_short_circuit() {
        let upload: AssetSource = UploadStub::new(json!({"progress": 50})).into();

        assert_eq!(get_asset_document_id(&upload).unwrap(), IN_PROGRESS_ASSET_ID);
        assert_eq!(get_extension(&upload).unwrap(), "tmp");

        let dimensions = get_image_dimensions(&upload).unwrap();
        assert_eq!((dimensions.width, dimensions.height, dimensions.aspect_ratio), (0, 0, 0.0));

        let image = get_image(&upload, None).unwrap();
        assert_eq!(image.asset.id, IN_PROGRESS_ASSET_ID);
        assert_eq!(image.asset.asset_id, IN_PROGRESS_ASSET_ASSET_ID);
        assert_eq!(image.asset.metadata.dimensions, ImageDimensions::new(1, 1));
        assert_eq!(image.asset.url, "");
        assert_eq!(image.crop, ImageCrop::default());

        let file = get_file(&upload, None).unwrap();
        assert_eq!(file.asset.type_name, FILE_ASSET_TYPE);
        assert_eq!(file.asset.path, "");
        assert!(!is_image_source(&upload));
        assert!(!is_file_source(&upload));
    }

    #[test]
    fn resolves_image_assets_with_explicit_project() {
        let project = test_project();
        for (name, source) in sources_without_project() {
            let asset = get_image_asset(&source, Some(&project)).unwrap();
            assert_eq!(asset, expected_asset(), "{name}");
        }
    }

    #[test]
    fn resolves_image_assets_with_inferred_project() {
        for (name, source) in sources_with_project() {
            assert_eq!(get_image_asset(&source, None).unwrap(), expected_asset(), "{name}");
            let asset = try_get_image_asset(&source, None).unwrap();
            assert_eq!(asset, Some(expected_asset()), "{name}");
        }
    }

    #[test]
    fn junk_is_unresolvable_even_without_project() {
        let err = get_image_asset(&"ey hold up".into(), None).unwrap_err();
        assert!(err.is_unresolvable());
        assert_eq!(try_get_image_asset(&"ey hold up".into(), None), Ok(None));
        assert_eq!(try_get_image(&"ey hold up".into(), None), Ok(None));
    }

    #[test]
    fn bare_ids_require_project_details() {
        let err = get_image_asset(&"image-abc123-320x240-png".into(), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            concat!(
                "project details (projectId and dataset) required to resolve ",
                "URL for asset image-abc123-320x240-png"
            )
        );

        let source = AssetStub {
            id: Some("image-abc123-320x240-png".into()),
            path: Some(String::new()),
            ..AssetStub::default()
        };
        assert!(matches!(
            get_image(&source.into(), None),
            Err(AssetError::MissingProjectDetails { .. })
        ));
    }

    #[test]
    fn keeps_source_metadata_and_recomputes_dimensions() {
        let metadata = json!({"lqip": "data:image/jpeg;base64,xyz", "dimensions": {"width": 1}});
        let stub = AssetStub {
            type_name: Some(IMAGE_ASSET_TYPE.into()),
            original_filename: Some("cat.png".into()),
            ..AssetStub::from_id(ID)
        }
        .with_metadata(metadata.as_object().cloned().unwrap_or_default());

        let asset = get_image_asset(&stub.into(), Some(&test_project())).unwrap();
        assert_eq!(asset.metadata.dimensions, ImageDimensions::new(320, 240));
        assert_eq!(
            asset.metadata.extra.get("lqip"),
            Some(&json!("data:image/jpeg;base64,xyz"))
        );
        assert!(!asset.metadata.extra.contains_key("dimensions"));
        assert_eq!(asset.original_filename.as_deref(), Some("cat.png"));
        assert_eq!(asset.path, INFERRED_PATH);
    }

    #[test]
    fn rooted_paths_name_their_own_project() {
        let source = AssetSource::from(format!("/{INFERRED_PATH}"));
        assert_eq!(get_asset_document_id(&source).unwrap(), ID);
        assert_eq!(get_project(&source).unwrap(), test_project());
        assert_eq!(get_image_asset(&source, None).unwrap(), expected_asset());
    }

    #[test]
    fn full_asset_documents_keep_their_other_fields() {
        let source = AssetSource::try_from(json!({
            "_id": ID,
            "_type": IMAGE_ASSET_TYPE,
            "_rev": "x8oZ3",
            "_createdAt": "2024-01-01T00:00:00Z",
            "size": 1234,
            "mimeType": "image/png",
            "sha1hash": "f00baa",
            "uploadId": "u1",
            "url": "https://cdn.sanity.io/images/stale/old/f00baa-320x240.png",
            "metadata": {"dimensions": {"width": 1, "height": 1}}
        }))
        .unwrap();

        let asset = get_image_asset(&source, Some(&test_project())).unwrap();
        assert_eq!(asset.url, INFERRED_URL);
        assert_eq!(asset.extra.get("size"), Some(&json!(1234)));

        let document = serde_json::to_value(&asset).unwrap();
        assert_eq!(document["_rev"], "x8oZ3");
        assert_eq!(document["_createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(document["mimeType"], "image/png");
        assert_eq!(document["sha1hash"], "f00baa");
        assert_eq!(document["uploadId"], "u1");
        assert_eq!(document["url"], INFERRED_URL);
        assert_eq!(document["metadata"]["dimensions"]["width"], 320);

        let file = AssetSource::try_from(json!({
            "_id": "file-def987-pdf",
            "_type": FILE_ASSET_TYPE,
            "size": 99
        }))
        .unwrap();
        let asset = get_file_asset(&file, Some(&test_project())).unwrap();
        assert_eq!(asset.extra.get("size"), Some(&json!(99)));
    }

    #[test]
    fn stubs_without_an_asset_type_carry_no_extra_fields() {
        let source = AssetSource::try_from(json!({"_ref": ID, "_key": "k1"})).unwrap();
        let asset = get_image_asset(&source, Some(&test_project())).unwrap();
        assert_eq!(asset, expected_asset());

        let file = AssetSource::try_from(json!({"_id": ID, "_type": FILE_ASSET_TYPE, "size": 1}))
            .unwrap();
        assert!(get_image_asset(&file, Some(&test_project())).unwrap().extra.is_empty());
    }

    #[test]
    fn overflowing_dimensions_are_not_asset_ids() {
        let source = AssetSource::from("image-f00baa-99999999999x1-png");
        assert_eq!(try_get_asset_document_id(&source), Ok(None));
        assert!(!is_image_source(&source));
        assert_eq!(try_get_image_dimensions(&source), Ok(None));
    }

    #[test]
    fn resolves_images_with_crop_and_hotspot() {
        let image = get_image(&INFERRED_URL.into(), None).unwrap();
        assert_eq!(image.asset, expected_asset());
        assert_eq!(image.crop, ImageCrop::default());
        assert_eq!(image.hotspot, ImageHotspot::default());

        let crop = ImageCrop {
            left: 0.2,
            bottom: 0.037,
            ..ImageCrop::default()
        };
        let hotspot = ImageHotspot {
            x: 0.57,
            y: 0.32,
            width: 0.41,
            height: 0.6,
            ..ImageHotspot::default()
        };
        let source = AssetObjectStub {
            crop: Some(crop.clone()),
            hotspot: Some(hotspot.clone()),
            ..AssetObjectStub::new(AssetStub::from_ref(ID))
        };

        let image = get_image(&source.into(), Some(&test_project())).unwrap();
        assert_eq!(image.crop, crop);
        assert_eq!(image.hotspot, hotspot);
    }

    #[test]
    fn resolves_file_assets() {
        let project = test_project();
        for (name, source) in file_sources() {
            let file = get_file(&source, Some(&project)).unwrap();
            assert_eq!(file.asset.id, "file-def987-pdf", "{name}");
            assert_eq!(file.asset.url, "https://cdn.sanity.io/files/a/b/def987.pdf");
            assert_eq!(file.asset.path, "files/a/b/def987.pdf");
            assert!(file.asset.metadata.is_empty());
        }

        let source = AssetStub::from_path("files/a/b/def987.pdf").into();
        let asset = get_file_asset(&source, None).unwrap();
        assert_eq!(asset.extension, "pdf");
        assert_eq!(asset.type_name, FILE_ASSET_TYPE);
    }

    #[test]
    fn kind_mismatch_is_malformed() {
        let err = get_file_asset(&ID.into(), Some(&test_project())).unwrap_err();
        assert!(matches!(err, AssetError::MalformedId { .. }));
        assert!(try_get_file_asset(&ID.into(), Some(&test_project())).is_err());
    }

    #[test]
    fn resolves_dimensions_and_extensions() {
        for (name, source) in sources_without_project() {
            let dimensions = get_image_dimensions(&source).unwrap();
            assert_eq!(dimensions, ImageDimensions::new(320, 240), "{name}");
            assert_eq!(dimensions.aspect_ratio, 320.0 / 240.0);
            assert_eq!(get_extension(&source).unwrap(), "png", "{name}");
        }
        for (name, source) in file_sources() {
            assert_eq!(get_extension(&source).unwrap(), "pdf", "{name}");
        }

        let err = get_image_dimensions(&"whatever".into()).unwrap_err();
        assert_eq!(err.to_string(), "failed to resolve asset ID from source");
        assert_eq!(try_get_image_dimensions(&"whatever".into()), Ok(None));
        assert_eq!(try_get_extension(&"whatever".into()), Ok(None));
    }

    #[test]
    fn resolves_projects_from_paths() {
        for (name, source) in sources_with_project() {
            assert_eq!(get_project(&source).unwrap(), test_project(), "{name}");
        }

        let source = "https://cdn.example.com/images/p/d/f00baa-1x1.png".into();
        let project = get_project(&source).unwrap();
        assert_eq!(
            project,
            ProjectDetails::new("p", "d").with_base_url("https://cdn.example.com")
        );
    }

    #[test]
    fn references_carry_no_project() {
        let reference = AssetStub::from_ref("image-abc123-200x300-png").into();
        let err = get_project(&reference).unwrap_err();
        assert!(matches!(err, AssetError::MissingProjectDetails { .. }));
        assert!(try_get_project(&reference).is_err());

        let err = get_project(&"who knows".into()).unwrap_err();
        assert_eq!(err.to_string(), "failed to resolve project ID and dataset from source");
        assert_eq!(try_get_project(&"who knows".into()), Ok(None));
    }

    #[test]
    fn custom_host_urls_keep_their_host() {
        let url = "https://cdn.example.com/images/p/d/f00baa-320x240.png";
        let asset = get_image_asset(&url.into(), None).unwrap();
        assert_eq!(asset.url, url);

        let project = ProjectDetails::new("p", "d").with_base_url("https://media.example.com");
        let asset = get_image_asset(&ID.into(), Some(&project)).unwrap();
        assert_eq!(asset.url, "https://media.example.com/images/p/d/f00baa-320x240.png");
    }

    #[test]
    fn classifies_sources_without_failing() {
        assert!(is_image_source(&ID.into()));
        assert!(!is_file_source(&ID.into()));
        assert!(is_file_source(&"f00baa.pdf".into()));
        assert!(!is_image_source(&"who knows".into()));
        assert!(!is_file_source(&AssetStub::default().into()));
    }
}
