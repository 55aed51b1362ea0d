//! Pairing of implementation files with their declaring headers.
//!
//! Each chain is an ordered list of lookup steps. The first step that finds
//! an existing file wins and later steps are never attempted. Failure to
//! pair is not an error; callers skip the file for that check.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use super::ProjectLayout;

/// A single header lookup strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingStep {
    /// Same directory and stem, header extension.
    SameStem,
    /// Same file name anywhere under the owning module's declarations folder,
    /// the folder itself first.
    ModuleDeclarations,
    /// Path relative to the module's implementations folder, re-rooted at its
    /// declarations folder.
    ModuleRelative,
    /// Every declarations folder anywhere under the source folder.
    TreeSearch,
    /// The implementations folder component swapped for the declarations one.
    FolderSwap,
    /// `<ancestor>/<declarations>/<name>` for each ancestor up to the source folder.
    AncestorDeclarations,
}

/// Ordered fallback chains used by the different checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingChain {
    /// The full resolver: used by interface and RPC checks.
    Full,
    /// Direct, module declarations and reconstructed path; no tree search.
    /// Used by the native-override check.
    Module,
    /// Direct rename, folder swap and ancestor lookup. Used when adding
    /// member declarations to a header.
    Sibling,
}

impl PairingChain {
    pub fn steps(&self) -> &'static [PairingStep] {
        match self {
            PairingChain::Full => &[
                PairingStep::SameStem,
                PairingStep::ModuleDeclarations,
                PairingStep::ModuleRelative,
                PairingStep::TreeSearch,
            ],
            PairingChain::Module => &[
                PairingStep::SameStem,
                PairingStep::ModuleDeclarations,
                PairingStep::ModuleRelative,
            ],
            PairingChain::Sibling => &[
                PairingStep::SameStem,
                PairingStep::FolderSwap,
                PairingStep::AncestorDeclarations,
            ],
        }
    }
}

/// A resolved header and the step that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub path: PathBuf,
    pub step: PairingStep,
}

impl ProjectLayout {
    /// Find the header declaring the contents of `implementation`.
    pub fn resolve_header(&self, implementation: &Path, chain: PairingChain) -> Option<HeaderMatch> {
        let found = chain.steps().iter().find_map(|&step| {
            self.try_step(implementation, step)
                .map(|path| HeaderMatch { path, step })
        });

        match &found {
            Some(m) => tracing::debug!(
                file = %implementation.display(),
                header = %m.path.display(),
                step = ?m.step,
                "paired header"
            ),
            None => tracing::warn!(
                "Could not find header file for {}",
                implementation.display()
            ),
        }

        found
    }

    fn header_name(&self, implementation: &Path) -> Option<String> {
        let stem = implementation.file_stem()?.to_string_lossy();
        Some(format!("{}.{}", stem, self.header_extension))
    }

    fn try_step(&self, implementation: &Path, step: PairingStep) -> Option<PathBuf> {
        let name = self.header_name(implementation)?;

        match step {
            PairingStep::SameStem => {
                existing(implementation.with_extension(&self.header_extension))
            }
            PairingStep::ModuleDeclarations => {
                let module = self.modules.owning(implementation)?;
                existing(module.declarations_dir.join(&name))
                    .or_else(|| find_file_under(&module.declarations_dir, &name))
            }
            PairingStep::ModuleRelative => {
                let module = self.modules.owning(implementation)?;
                let relative = implementation.strip_prefix(&module.implementations_dir).ok()?;
                existing(
                    module
                        .declarations_dir
                        .join(relative)
                        .with_extension(&self.header_extension),
                )
            }
            PairingStep::TreeSearch => self.search_declaration_dirs(&name),
            PairingStep::FolderSwap => {
                let relative = implementation.strip_prefix(&self.source_dir).ok()?;
                let mut swapped = false;
                let mut rebuilt = PathBuf::new();
                for component in relative.components() {
                    match component {
                        Component::Normal(part)
                            if !swapped && part == self.implementations_name.as_str() =>
                        {
                            rebuilt.push(&self.declarations_name);
                            swapped = true;
                        }
                        other => rebuilt.push(other.as_os_str()),
                    }
                }
                if !swapped {
                    return None;
                }
                existing(
                    self.source_dir
                        .join(rebuilt)
                        .with_extension(&self.header_extension),
                )
            }
            PairingStep::AncestorDeclarations => implementation
                .ancestors()
                .skip(1)
                .take_while(|dir| dir.starts_with(&self.source_dir))
                .find_map(|dir| existing(dir.join(&self.declarations_name).join(&name))),
        }
    }

    /// Search every declarations folder under the source folder for `name`.
    fn search_declaration_dirs(&self, name: &str) -> Option<PathBuf> {
        let declaration_dirs = WalkDir::new(&self.source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir() && e.file_name() == self.declarations_name.as_str());

        for dir in declaration_dirs {
            if let Some(hit) = find_file_under(dir.path(), name) {
                return Some(hit);
            }
        }
        None
    }
}

/// First file named `name` under `dir`, walking in file-name order.
fn find_file_under(dir: &Path, name: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name() == name)
        .map(|e| e.into_path())
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}
