//! Grammar for asset IDs, filenames, storage paths and CDN URLs.
//!
//! Every classification in the crate goes through these expressions, so image and file
//! references are told apart the same way whether they are parsed, built or merely tested.
//! Image patterns are always tried before file patterns.

use std::sync::OnceLock;

use regex::Regex;

/// Content hash token. Covers both hex hashes and the older base62-ish identifiers.
const HASH: &str = "[A-Za-z0-9_]+";

/// Positive dimension without leading zeros. Nine digits at most, so it always fits a `u32`.
const DIMENSION: &str = "[1-9][0-9]{0,8}";

const EXTENSION: &str = "[a-z0-9]+";

/// Project ID token inside a storage path.
pub(crate) const PROJECT_ID: &str = "[a-z0-9]+";

/// Dataset token inside a storage path.
pub(crate) const DATASET: &str = "[a-z0-9][-A-Za-z0-9_]*";

fn compile(slot: &'static OnceLock<Regex>, build: impl FnOnce() -> String) -> &'static Regex {
    slot.get_or_init(|| Regex::new(&build()).expect("invalid asset grammar regex"))
}

/// `image-<hash>-<width>x<height>-<ext>`
pub(crate) fn image_asset_id() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || {
        format!("^image-({HASH})-({DIMENSION})x({DIMENSION})-({EXTENSION})$")
    })
}

/// `file-<hash>-<ext>`
pub(crate) fn file_asset_id() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || format!("^file-({HASH})-({EXTENSION})$"))
}

/// `<hash>-<width>x<height>.<ext>`
pub(crate) fn image_asset_filename() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || {
        format!("^({HASH})-({DIMENSION})x({DIMENSION})\\.({EXTENSION})$")
    })
}

/// `<hash>.<ext>`
pub(crate) fn file_asset_filename() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || format!("^({HASH})\\.({EXTENSION})$"))
}

/// `(images|files)/<projectId>/<dataset>/` prefix of a storage path.
pub(crate) fn asset_path() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || {
        format!("^(images|files)/({PROJECT_ID})/({DATASET})/")
    })
}

/// Hosted CDN origin, production or staging.
pub(crate) fn hosted_cdn_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || r"^https://cdn\.sanity\.".to_string())
}

/// Any `https://cdn.<host>/` origin, capturing everything after the host.
pub(crate) fn custom_cdn_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || r"^https://cdn\.[^/?#]+/(.*)$".to_string())
}

/// Whole-token matcher used to validate path segments of a parsed URL.
pub(crate) fn project_id_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || format!("^{PROJECT_ID}$"))
}

/// Whole-token matcher used to validate path segments of a parsed URL.
pub(crate) fn dataset_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compile(&PATTERN, || format!("^{DATASET}$"))
}
