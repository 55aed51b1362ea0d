//! Detection runner that orchestrates all checks.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::context::FixContext;
use crate::source;

use super::{
    detect_missing_includes, detect_missing_interface_impls, detect_missing_native_overrides,
    detect_missing_rpc_impls, detect_undeclared_identifiers, DetectionResult,
};

/// Executes every detector against a set of implementation files.
pub struct Runner<'a> {
    ctx: &'a FixContext,
}

impl<'a> Runner<'a> {
    /// Create a new detection runner.
    pub fn new(ctx: &'a FixContext) -> Self {
        Self { ctx }
    }

    /// Run all checks over `files`, in file order then detector order.
    pub fn run(&self, files: &[PathBuf]) -> anyhow::Result<DetectionResult> {
        let mut result = DetectionResult::new();

        for file in files {
            let file_result = self
                .scan_file(file)
                .with_context(|| format!("analyzing {}", file.display()))?;
            result.merge(file_result);
        }

        for (category, count) in result.counts() {
            tracing::info!("Found {} {} issues", count, category);
        }

        Ok(result)
    }

    /// Run every detector against one file.
    fn scan_file(&self, file: &Path) -> anyhow::Result<DetectionResult> {
        let content = source::read_lossy(file)?;

        let mut issues = detect_missing_includes(&self.ctx.includes, &content, file);
        issues.extend(detect_undeclared_identifiers(&content, file));
        issues.extend(detect_missing_native_overrides(self.ctx, &content, file));
        issues.extend(detect_missing_interface_impls(self.ctx, &content, file));
        issues.extend(detect_missing_rpc_impls(self.ctx, &content, file));

        Ok(DetectionResult { issues, scanned: 1 })
    }
}
