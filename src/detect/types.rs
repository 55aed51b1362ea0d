//! Core types for detection results.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::metadata::RpcRole;

/// Issue categories, in the order fixes are applied to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum IssueCategory {
    #[serde(rename = "missing_includes")]
    MissingInclude,
    #[serde(rename = "undeclared_identifiers")]
    UndeclaredIdentifier,
    #[serde(rename = "missing_implementations")]
    MissingNativeOverrideImpl,
    #[serde(rename = "missing_interface_implementations")]
    MissingInterfaceImpl,
    #[serde(rename = "missing_rpc_implementations")]
    MissingRpcImpl,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::MissingInclude => "missing_includes",
            IssueCategory::UndeclaredIdentifier => "undeclared_identifiers",
            IssueCategory::MissingNativeOverrideImpl => "missing_implementations",
            IssueCategory::MissingInterfaceImpl => "missing_interface_implementations",
            IssueCategory::MissingRpcImpl => "missing_rpc_implementations",
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What is missing, with enough detail to synthesize a fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueKind {
    MissingInclude {
        type_name: String,
        include: String,
    },
    UndeclaredIdentifier {
        identifier: String,
        /// The diagnostic line the identifier was taken from.
        line: String,
    },
    MissingNativeOverrideImpl {
        class_name: String,
        event: String,
        impl_name: String,
        return_type: String,
        params: String,
    },
    MissingInterfaceImpl {
        class_name: String,
        interface: String,
        method_name: String,
        return_type: String,
        params: String,
        signature: String,
    },
    MissingRpcImpl {
        class_name: String,
        role: RpcRole,
        method_name: String,
        impl_name: String,
        return_type: String,
        params: String,
    },
}

/// A gap found in one implementation file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub file: PathBuf,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(file: impl Into<PathBuf>, kind: IssueKind) -> Self {
        Self {
            file: file.into(),
            kind,
        }
    }

    pub fn category(&self) -> IssueCategory {
        match self.kind {
            IssueKind::MissingInclude { .. } => IssueCategory::MissingInclude,
            IssueKind::UndeclaredIdentifier { .. } => IssueCategory::UndeclaredIdentifier,
            IssueKind::MissingNativeOverrideImpl { .. } => IssueCategory::MissingNativeOverrideImpl,
            IssueKind::MissingInterfaceImpl { .. } => IssueCategory::MissingInterfaceImpl,
            IssueKind::MissingRpcImpl { .. } => IssueCategory::MissingRpcImpl,
        }
    }

    /// Short human-readable description.
    pub fn summary(&self) -> String {
        match &self.kind {
            IssueKind::MissingInclude { type_name, include } => {
                format!("{} used without #include \"{}\"", type_name, include)
            }
            IssueKind::UndeclaredIdentifier { identifier, .. } => {
                format!("undeclared identifier {}", identifier)
            }
            IssueKind::MissingNativeOverrideImpl {
                class_name,
                impl_name,
                ..
            } => format!("missing {}::{}", class_name, impl_name),
            IssueKind::MissingInterfaceImpl {
                class_name,
                interface,
                method_name,
                ..
            } => format!("missing {}::{} required by {}", class_name, method_name, interface),
            IssueKind::MissingRpcImpl {
                class_name,
                role,
                impl_name,
                ..
            } => format!("missing {} RPC {}::{}", role, class_name, impl_name),
        }
    }
}

/// Results of running detection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionResult {
    pub issues: Vec<Issue>,
    /// Number of implementation files scanned
    pub scanned: usize,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: DetectionResult) {
        self.issues.extend(other.issues);
        self.scanned += other.scanned;
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues per category.
    pub fn counts(&self) -> BTreeMap<IssueCategory, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.category()).or_insert(0) += 1;
        }
        counts
    }

    /// Issues grouped by (file, category), in order of first appearance.
    pub fn groups(&self) -> Vec<(PathBuf, IssueCategory, Vec<&Issue>)> {
        let mut groups: Vec<(PathBuf, IssueCategory, Vec<&Issue>)> = Vec::new();
        for issue in &self.issues {
            let category = issue.category();
            match groups
                .iter_mut()
                .find(|(file, cat, _)| *file == issue.file && *cat == category)
            {
                Some((_, _, members)) => members.push(issue),
                None => groups.push((issue.file.clone(), category, vec![issue])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn include_issue(file: &str, type_name: &str) -> Issue {
        Issue::new(
            file,
            IssueKind::MissingInclude {
                type_name: type_name.to_string(),
                include: "Containers/Array.h".to_string(),
            },
        )
    }

    fn identifier_issue(file: &str) -> Issue {
        Issue::new(
            file,
            IssueKind::UndeclaredIdentifier {
                identifier: "bReady".to_string(),
                line: "// 'bReady': undeclared identifier".to_string(),
            },
        )
    }

    #[test]
    fn test_groups_by_file_and_category() {
        let result = DetectionResult {
            issues: vec![
                include_issue("A.cpp", "TArray"),
                identifier_issue("A.cpp"),
                include_issue("B.cpp", "TArray"),
                include_issue("A.cpp", "TMap"),
            ],
            scanned: 2,
        };

        let groups = result.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0, PathBuf::from("A.cpp"));
        assert_eq!(groups[0].1, IssueCategory::MissingInclude);
        assert_eq!(groups[0].2.len(), 2);
        assert_eq!(groups[1].1, IssueCategory::UndeclaredIdentifier);
        assert_eq!(groups[2].0, PathBuf::from("B.cpp"));
    }

    #[test]
    fn test_counts() {
        let result = DetectionResult {
            issues: vec![include_issue("A.cpp", "TArray"), include_issue("B.cpp", "TMap")],
            scanned: 2,
        };
        let counts = result.counts();
        assert_eq!(counts[&IssueCategory::MissingInclude], 2);
        assert!(!counts.contains_key(&IssueCategory::MissingRpcImpl));
    }

    #[test]
    fn test_merge() {
        let mut result = DetectionResult {
            issues: vec![include_issue("A.cpp", "TArray")],
            scanned: 1,
        };
        result.merge(DetectionResult {
            issues: vec![identifier_issue("B.cpp")],
            scanned: 1,
        });
        assert_eq!(result.scanned, 2);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[1].file, PathBuf::from("B.cpp"));
    }

    #[test]
    fn test_issue_serializes_with_type_tag() {
        let json = serde_json::to_value(include_issue("A.cpp", "TArray")).unwrap();
        assert_eq!(json["type"], "missing_include");
        assert_eq!(json["type_name"], "TArray");
        assert_eq!(json["file"], "A.cpp");
    }
}
