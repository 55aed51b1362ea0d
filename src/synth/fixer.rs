//! Applies generated fixes to files on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::context::FixContext;
use crate::detect::{DetectionResult, Issue, IssueCategory, IssueKind};
use crate::project::PairingChain;
use crate::source;

use super::{append_stubs, insert_includes, insert_members};

/// Totals for one fixing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixSummary {
    pub fixes_applied: usize,
    /// Distinct files rewritten, in the order they were first written.
    pub modified_files: Vec<PathBuf>,
}

impl FixSummary {
    pub fn files_modified(&self) -> usize {
        self.modified_files.len()
    }

    fn record(&mut self, path: &Path, fixes: usize) {
        self.fixes_applied += fixes;
        if !self.modified_files.iter().any(|p| p == path) {
            self.modified_files.push(path.to_path_buf());
        }
    }
}

/// Writes fixes for detected issues.
///
/// Each (file, category) group is an independent read-modify-write of the
/// whole file, so a file with several categories is written several times.
/// A write failure aborts the pass; files already written stay written.
pub struct Fixer<'a> {
    ctx: &'a FixContext,
}

impl<'a> Fixer<'a> {
    pub fn new(ctx: &'a FixContext) -> Self {
        Self { ctx }
    }

    pub fn apply(&self, result: &DetectionResult) -> anyhow::Result<FixSummary> {
        let mut summary = FixSummary::default();

        for (file, category, issues) in result.groups() {
            tracing::info!("Fixing {} in {}", category, file.display());
            self.apply_group(&file, category, &issues, &mut summary)?;
        }

        tracing::info!(
            "Total: Applied {} fixes across {} files",
            summary.fixes_applied,
            summary.files_modified()
        );
        Ok(summary)
    }

    fn apply_group(
        &self,
        file: &Path,
        category: IssueCategory,
        issues: &[&Issue],
        summary: &mut FixSummary,
    ) -> anyhow::Result<()> {
        match category {
            IssueCategory::UndeclaredIdentifier => self.declare_members(file, issues, summary),
            IssueCategory::MissingInclude => {
                let includes = unique_includes(issues);
                rewrite(file, issues.len(), summary, |content| {
                    insert_includes(content, &includes)
                })
            }
            IssueCategory::MissingNativeOverrideImpl
            | IssueCategory::MissingInterfaceImpl
            | IssueCategory::MissingRpcImpl => rewrite(file, issues.len(), summary, |content| {
                append_stubs(content, category, issues)
            }),
        }
    }

    /// Add member declarations to the header paired with `file`. The
    /// implementation file itself is left unchanged. A header that cannot be
    /// found or read is skipped.
    fn declare_members(
        &self,
        file: &Path,
        issues: &[&Issue],
        summary: &mut FixSummary,
    ) -> anyhow::Result<()> {
        let Some(header) = self.ctx.layout.resolve_header(file, PairingChain::Sibling) else {
            return Ok(());
        };

        let identifiers: Vec<&str> = issues
            .iter()
            .filter_map(|issue| match &issue.kind {
                IssueKind::UndeclaredIdentifier { identifier, .. } => Some(identifier.as_str()),
                _ => None,
            })
            .collect();

        let Some(header_content) = source::try_read(&header.path) else {
            return Ok(());
        };
        let Some(insertion) = insert_members(&header_content, &identifiers) else {
            tracing::warn!("Could not find closing brace in {}", header.path.display());
            return Ok(());
        };

        if insertion.added.is_empty() {
            return Ok(());
        }

        source::write_all(&header.path, &insertion.content)?;
        tracing::info!(
            "Updated header {} with {} new member declarations",
            header.path.display(),
            insertion.added.len()
        );
        summary.record(&header.path, insertion.added.len());
        Ok(())
    }
}

/// Read `file`, transform it, and write it back if anything changed.
fn rewrite(
    file: &Path,
    fixes: usize,
    summary: &mut FixSummary,
    transform: impl FnOnce(&str) -> String,
) -> anyhow::Result<()> {
    let content = source::read_lossy(file)?;
    let modified = transform(&content);
    if modified == content {
        return Ok(());
    }

    source::write_all(file, &modified)?;
    tracing::info!("Applied {} fixes to {}", fixes, file.display());
    summary.record(file, fixes);
    Ok(())
}

/// Include paths in first-seen order, each once.
fn unique_includes<'i>(issues: &[&'i Issue]) -> Vec<&'i str> {
    let mut includes: Vec<&str> = Vec::new();
    for &issue in issues {
        if let IssueKind::MissingInclude { include, .. } = &issue.kind {
            if !includes.contains(&include.as_str()) {
                tracing::info!("Added include: {}", include);
                includes.push(include.as_str());
            }
        }
    }
    includes
}
