//! Project structure discovery.
//!
//! A project keeps its code under a fixed source folder whose immediate
//! children are modules. A child only counts as a module when it directly
//! contains both a declarations and an implementations folder:
//!
//! ```text
//! <root>/Source/
//!   Combat/
//!     Public/    <- declarations (.h)
//!     Private/   <- implementations (.cpp)
//! ```

mod pairing;

pub use pairing::{HeaderMatch, PairingChain, PairingStep};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FixerConfig;

/// A top-level source module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub root: PathBuf,
    pub declarations_dir: PathBuf,
    pub implementations_dir: PathBuf,
}

/// Modules keyed by name.
///
/// Backed by an ordered map so that repeated discovery over an unchanged
/// tree yields the same iteration order regardless of directory order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMap {
    modules: BTreeMap<String, Module>,
}

impl ModuleMap {
    /// Enumerate the immediate children of `source_dir` that qualify as modules.
    ///
    /// Never fails: an unreadable or missing source folder yields an empty map.
    pub fn discover(source_dir: &Path, declarations: &str, implementations: &str) -> Self {
        let mut modules = BTreeMap::new();

        let entries = match fs::read_dir(source_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    source_dir = %source_dir.display(),
                    error = %e,
                    "cannot read source directory"
                );
                return Self { modules };
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let root = entry.path();
            if !root.is_dir() {
                continue;
            }

            let declarations_dir = root.join(declarations);
            let implementations_dir = root.join(implementations);
            if !declarations_dir.is_dir() || !implementations_dir.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            modules.insert(
                name.clone(),
                Module {
                    name,
                    root,
                    declarations_dir,
                    implementations_dir,
                },
            );
        }

        let names: Vec<&str> = modules.keys().map(String::as_str).collect();
        tracing::info!("Discovered {} modules: {}", names.len(), names.join(", "));

        Self { modules }
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The module whose root directory contains `file`.
    pub fn owning(&self, file: &Path) -> Option<&Module> {
        self.modules.values().find(|m| file.starts_with(&m.root))
    }
}

/// Directory conventions plus the discovered modules of one project.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub project_root: PathBuf,
    pub source_dir: PathBuf,
    pub declarations_name: String,
    pub implementations_name: String,
    pub header_extension: String,
    pub source_extension: String,
    pub modules: ModuleMap,
}

impl ProjectLayout {
    /// Discover the layout of the project rooted at `project_root`.
    pub fn discover(project_root: &Path, config: &FixerConfig) -> Self {
        let source_dir = project_root.join(&config.source_dir);
        let modules = ModuleMap::discover(
            &source_dir,
            &config.declarations_dir,
            &config.implementations_dir,
        );

        Self {
            project_root: project_root.to_path_buf(),
            source_dir,
            declarations_name: config.declarations_dir.clone(),
            implementations_name: config.implementations_dir.clone(),
            header_extension: config.header_extension.clone(),
            source_extension: config.source_extension.clone(),
            modules,
        }
    }

    /// Check whether a path is a declaration file by extension.
    pub fn is_header(&self, path: &Path) -> bool {
        has_extension(path, &self.header_extension)
    }

    /// Check whether a path is an implementation file by extension.
    pub fn is_implementation(&self, path: &Path) -> bool {
        has_extension(path, &self.source_extension)
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ext)
}
