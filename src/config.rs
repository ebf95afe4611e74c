//! Project configuration for resolving and building asset URLs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::warn;

use crate::models::{PathBuilderOptions, ProjectDetails};

const DEFAULT_CONFIG_FILE: &str = "asset-utils.config.json";

/// Discoverable configuration naming the project, dataset and CDN host assets belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetConfig {
    /// Project ID used when a source carries none.
    pub project_id: Option<String>,
    /// Dataset used when a source carries none.
    pub dataset: Option<String>,
    /// Origin overriding the default CDN host.
    pub base_url: Option<String>,
    /// Append vanity filenames to built URLs.
    pub use_vanity_name: Option<bool>,
}

impl AssetConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing file yields the defaults. A file that fails to parse is reported and the
    /// defaults are used instead.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if !candidate.is_file() {
            return Self::default();
        }

        Self::from_path(&candidate).unwrap_or_else(|err| {
            let error = format!("{err:#}");
            warn!(path = %candidate.display(), %error, "ignoring asset config");
            Self::default()
        })
    }

    /// Read configuration from a JSON or YAML file, picked by extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display())),
            _ => bail!("unsupported config format: {}", path.display()),
        }
    }

    /// Project details, when both project ID and dataset are configured.
    pub fn project(&self) -> Option<ProjectDetails> {
        let project = ProjectDetails {
            project_id: self.project_id.clone().filter(|id| !id.is_empty())?,
            dataset: self.dataset.clone().filter(|dataset| !dataset.is_empty())?,
            base_url: self.base_url.clone(),
        };
        Some(project)
    }

    /// Builder options carrying every configured value.
    pub fn path_options(&self) -> PathBuilderOptions {
        PathBuilderOptions {
            project_id: self.project_id.clone(),
            dataset: self.dataset.clone(),
            base_url: self.base_url.clone(),
            use_vanity_name: self.use_vanity_name,
        }
    }
}
