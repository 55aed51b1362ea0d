//! Configuration schema for implfix.
//!
//! Every field has a default matching the standard Unreal plugin layout, so
//! a project without a configuration file behaves exactly like one with an
//! empty file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for at the project root when `--config` is absent.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["implfix.yaml", ".implfix.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixerConfig {
    /// Fixed top-level source folder under the project root.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Per-module folder holding declaration files.
    #[serde(default = "default_declarations_dir")]
    pub declarations_dir: String,
    /// Per-module folder holding implementation files.
    #[serde(default = "default_implementations_dir")]
    pub implementations_dir: String,
    #[serde(default = "default_header_extension")]
    pub header_extension: String,
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    /// Rows appended to the built-in well-known include table.
    #[serde(default)]
    pub extra_includes: Vec<IncludeRule>,
    /// Glob patterns for implementation files to skip (e.g. "**/ThirdParty/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            declarations_dir: default_declarations_dir(),
            implementations_dir: default_implementations_dir(),
            header_extension: default_header_extension(),
            source_extension: default_source_extension(),
            extra_includes: Vec::new(),
            excluded_paths: Vec::new(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

fn default_source_dir() -> String {
    "Source".to_string()
}

fn default_declarations_dir() -> String {
    "Public".to_string()
}

fn default_implementations_dir() -> String {
    "Private".to_string()
}

fn default_header_extension() -> String {
    "h".to_string()
}

fn default_source_extension() -> String {
    "cpp".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bootstrap_file() -> String {
    "NetForgeTypes.h".to_string()
}

/// A type name that requires a specific include when used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IncludeRule {
    #[serde(rename = "type")]
    pub type_name: String,
    pub include: String,
}

/// Settings for the shared-types header writer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_bootstrap_file")]
    pub file_name: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_name: default_bootstrap_file(),
        }
    }
}

impl FixerConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a configuration from YAML text. Empty text yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: FixerConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the configuration for a project.
    ///
    /// An explicit path must exist. Without one, the project root is searched
    /// for a default file name, and the defaults are used if none is found.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::parse_file(path)
                .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e)),
            None => match discover(project_root) {
                Some(path) => {
                    tracing::info!(config = %path.display(), "using discovered config");
                    Self::parse_file(&path)
                        .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e))
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Check if an implementation file should be skipped.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Find a configuration file at the project root.
pub fn discover(project_root: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Validate a configuration.
pub fn validate(config: &FixerConfig) -> anyhow::Result<()> {
    for (field, value) in [
        ("source_dir", &config.source_dir),
        ("declarations_dir", &config.declarations_dir),
        ("implementations_dir", &config.implementations_dir),
        ("header_extension", &config.header_extension),
        ("source_extension", &config.source_extension),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("{} must not be empty", field);
        }
    }

    if config.declarations_dir == config.implementations_dir {
        anyhow::bail!(
            "declarations_dir and implementations_dir must differ (both {:?})",
            config.declarations_dir
        );
    }

    for ext in [&config.header_extension, &config.source_extension] {
        if ext.contains('.') {
            anyhow::bail!("extension {:?} must be given without a dot", ext);
        }
    }

    for (i, rule) in config.extra_includes.iter().enumerate() {
        if rule.type_name.trim().is_empty() || rule.include.trim().is_empty() {
            anyhow::bail!("extra_includes[{}]: type and include are required", i);
        }
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded path {:?}: {}", pattern, e))?;
    }

    if config.bootstrap.file_name.trim().is_empty() {
        anyhow::bail!("bootstrap.file_name must not be empty");
    }

    Ok(())
}
