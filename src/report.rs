//! Output formatting for fixer runs.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::context::FixContext;
use crate::detect::{DetectionResult, Issue, IssueCategory, IssueKind};
use crate::synth::FixSummary;

/// Everything reported at the end of a run.
#[derive(Serialize)]
pub struct RunReport {
    pub version: String,
    pub project: String,
    /// Detect-only run; nothing was written.
    pub check: bool,
    pub modules: Vec<String>,
    pub metadata: MetadataCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_created: Option<String>,
    pub files_scanned: usize,
    pub issue_counts: BTreeMap<String, usize>,
    pub issues: Vec<JsonIssue>,
    pub fixes_applied: usize,
    pub files_modified: usize,
    pub modified_files: Vec<String>,
}

#[derive(Serialize)]
pub struct MetadataCounts {
    pub interfaces: usize,
    pub rpcs: usize,
    pub native_events: usize,
    pub replicated_properties: usize,
}

#[derive(Serialize)]
pub struct JsonIssue {
    pub file: String,
    pub category: IssueCategory,
    pub message: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl RunReport {
    /// Assemble the report. `fixes` is `None` for detect-only runs.
    pub fn new(
        ctx: &FixContext,
        result: &DetectionResult,
        fixes: Option<&FixSummary>,
        bootstrap_created: Option<&Path>,
    ) -> Self {
        let root = &ctx.layout.project_root;
        let metadata = &ctx.metadata;

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            project: root.display().to_string(),
            check: fixes.is_none(),
            modules: ctx
                .layout
                .modules
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
            metadata: MetadataCounts {
                interfaces: metadata.interfaces.len(),
                rpcs: metadata.rpcs.len(),
                native_events: metadata.native_events.len(),
                replicated_properties: metadata.replicated_properties.len(),
            },
            bootstrap_created: bootstrap_created.map(|p| relative(p, root)),
            files_scanned: result.scanned,
            issue_counts: result
                .counts()
                .into_iter()
                .map(|(category, count)| (category.as_str().to_string(), count))
                .collect(),
            issues: result.issues.iter().map(|i| issue_to_json(i, root)).collect(),
            fixes_applied: fixes.map_or(0, |f| f.fixes_applied),
            files_modified: fixes.map_or(0, |f| f.files_modified()),
            modified_files: fixes
                .map(|f| f.modified_files.iter().map(|p| relative(p, root)).collect())
                .unwrap_or_default(),
        }
    }

    /// The one-line outcome printed last.
    pub fn final_line(&self) -> String {
        if self.issues.is_empty() {
            "No implementation issues found".to_string()
        } else if self.check {
            format!(
                "Found {} implementation issues in {} files",
                self.issues.len(),
                self.files_with_issues()
            )
        } else {
            format!(
                "Applied {} fixes across {} files",
                self.fixes_applied, self.files_modified
            )
        }
    }

    fn files_with_issues(&self) -> usize {
        let mut files: Vec<&str> = self.issues.iter().map(|i| i.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }
}

fn issue_to_json(issue: &Issue, root: &Path) -> JsonIssue {
    JsonIssue {
        file: relative(&issue.file, root),
        category: issue.category(),
        message: issue.summary(),
        kind: issue.kind.clone(),
    }
}

/// Display `path` relative to `base`, with forward slashes.
fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| path.display().to_string())
}

/// Write the report as JSON on stdout.
pub fn write_json(report: &RunReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

/// Write the report in colored form on stdout.
pub fn write_pretty(report: &RunReport) {
    println!();
    print!("  ");
    print!("{}", "implfix".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Project:  ".dimmed());
    println!("{}", report.project);
    print!("  {}", "Modules:  ".dimmed());
    if report.modules.is_empty() {
        println!("{}", "none".yellow());
    } else {
        println!("{}", report.modules.join(", "));
    }
    print!("  {}", "Metadata: ".dimmed());
    println!(
        "{} interfaces, {} RPCs, {} native events, {} replicated properties",
        report.metadata.interfaces,
        report.metadata.rpcs,
        report.metadata.native_events,
        report.metadata.replicated_properties
    );
    print!("  {}", "Scanned:  ".dimmed());
    println!("{} files", report.files_scanned);
    if let Some(ref created) = report.bootstrap_created {
        print!("  {}", "Created:  ".dimmed());
        println!("{}", created);
    }
    println!();

    if !report.issues.is_empty() {
        write_issues(&report.issues);
        println!();
        write_breakdown(&report.issue_counts);
        println!();
    }

    if !report.modified_files.is_empty() {
        println!("  {}", "Modified files".bold());
        for file in &report.modified_files {
            println!("    {}", file);
        }
        println!();
    }

    write_final_status(report);
    println!();
}

fn write_issues(issues: &[JsonIssue]) {
    let mut by_file: BTreeMap<&str, Vec<&JsonIssue>> = BTreeMap::new();
    for issue in issues {
        by_file.entry(issue.file.as_str()).or_default().push(issue);
    }

    for (file, issues) in by_file {
        println!("  {}", file.bold());
        for issue in issues {
            print!("    {}", category_label(issue.category));
            println!("  {}", issue.message);
        }
    }
}

fn category_label(category: IssueCategory) -> ColoredString {
    let label = format!("{:<36}", category.as_str());
    match category {
        IssueCategory::MissingInclude => label.blue(),
        IssueCategory::UndeclaredIdentifier => label.magenta(),
        IssueCategory::MissingNativeOverrideImpl
        | IssueCategory::MissingInterfaceImpl
        | IssueCategory::MissingRpcImpl => label.yellow(),
    }
}

fn write_breakdown(counts: &BTreeMap<String, usize>) {
    println!("  {}", "Breakdown".bold());
    for (category, count) in counts {
        println!("    {:<36} {}", category, count);
    }
}

fn write_final_status(report: &RunReport) {
    let line = report.final_line();
    if report.issues.is_empty() {
        println!("  {} {}", "✓".green(), line.green());
    } else if report.check {
        println!("  {} {}", "✗".red(), line.red());
    } else {
        println!("  {} {}", "✓".green(), line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixerConfig;
    use tempfile::TempDir;

    fn context() -> (TempDir, FixContext) {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("Source/Combat/Public")).unwrap();
        std::fs::create_dir_all(temp.path().join("Source/Combat/Private")).unwrap();
        let ctx = FixContext::build(temp.path(), FixerConfig::default()).unwrap();
        (temp, ctx)
    }

    fn rpc_issue(root: &Path) -> Issue {
        Issue::new(
            root.join("Source/Combat/Private/Weapon.cpp"),
            IssueKind::MissingRpcImpl {
                class_name: "AWeapon".to_string(),
                role: crate::metadata::RpcRole::Server,
                method_name: "Fire".to_string(),
                impl_name: "Fire_Implementation".to_string(),
                return_type: "void".to_string(),
                params: String::new(),
            },
        )
    }

    #[test]
    fn test_final_line_no_issues() {
        let (_temp, ctx) = context();
        let report = RunReport::new(&ctx, &DetectionResult::new(), Some(&FixSummary::default()), None);
        assert_eq!(report.final_line(), "No implementation issues found");
        assert_eq!(report.modules, vec!["Combat"]);
    }

    #[test]
    fn test_final_line_after_fixing() {
        let (temp, ctx) = context();
        let cpp = temp.path().join("Source/Combat/Private/Weapon.cpp");
        let mut result = DetectionResult::new();
        result.issues.push(rpc_issue(temp.path()));
        result.scanned = 1;
        let fixes = FixSummary {
            fixes_applied: 1,
            modified_files: vec![cpp],
        };

        let report = RunReport::new(&ctx, &result, Some(&fixes), None);
        assert_eq!(report.final_line(), "Applied 1 fixes across 1 files");
        assert_eq!(report.modified_files, vec!["Source/Combat/Private/Weapon.cpp"]);
        assert_eq!(report.issues[0].file, "Source/Combat/Private/Weapon.cpp");
    }

    #[test]
    fn test_check_mode_reports_findings() {
        let (temp, ctx) = context();
        let mut result = DetectionResult::new();
        result.issues.push(rpc_issue(temp.path()));

        let report = RunReport::new(&ctx, &result, None, None);
        assert!(report.check);
        assert_eq!(report.final_line(), "Found 1 implementation issues in 1 files");
    }

    #[test]
    fn test_json_shape() {
        let (temp, ctx) = context();
        let mut result = DetectionResult::new();
        result.issues.push(rpc_issue(temp.path()));

        let report = RunReport::new(&ctx, &result, None, None);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["issue_counts"]["missing_rpc_implementations"], 1);
        assert_eq!(value["issues"][0]["type"], "missing_rpc_impl");
        assert_eq!(value["issues"][0]["category"], "missing_rpc_implementations");
        assert_eq!(value["issues"][0]["role"], "Server");
        assert!(value.get("bootstrap_created").is_none());
    }
}
