//! The per-run context shared by detectors and synthesizers.
//!
//! Built once at startup from the project root and configuration, then
//! passed by reference everywhere. Nothing in it changes after construction;
//! only files on disk are mutated during a run.

use std::path::Path;

use crate::config::FixerConfig;
use crate::detect::IncludeTable;
use crate::metadata::{DeclarationExtractor, PatternExtractor, ProjectMetadata};
use crate::project::ProjectLayout;

/// Immutable state for one run.
pub struct FixContext {
    pub config: FixerConfig,
    pub layout: ProjectLayout,
    pub metadata: ProjectMetadata,
    pub includes: IncludeTable,
}

impl FixContext {
    /// Discover modules and metadata using the pattern extractor.
    pub fn build(project_root: &Path, config: FixerConfig) -> anyhow::Result<Self> {
        Self::build_with(project_root, config, &PatternExtractor::new())
    }

    /// Discover modules and metadata with a specific extractor.
    pub fn build_with(
        project_root: &Path,
        config: FixerConfig,
        extractor: &dyn DeclarationExtractor,
    ) -> anyhow::Result<Self> {
        let includes = IncludeTable::new(&config.extra_includes)?;
        let layout = ProjectLayout::discover(project_root, &config);
        let metadata = ProjectMetadata::scan(&layout, extractor);

        Ok(Self {
            config,
            layout,
            metadata,
            includes,
        })
    }
}
