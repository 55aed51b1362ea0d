//! Detection of undeclared identifiers from transcribed compiler errors.
//!
//! Nothing is compiled. The file is searched line by line for compiler
//! diagnostics that were pasted into it (usually as comments).

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use super::{implementing_class, Issue, IssueKind};

lazy_static! {
    static ref DIAGNOSTICS: Vec<Regex> = vec![
        Regex::new(r"'(\w+)': undeclared identifier").unwrap(),
        Regex::new(r"'(\w+)': is not a member of '(\w+)'").unwrap(),
    ];
}

pub fn detect_undeclared_identifiers(content: &str, file: &Path) -> Vec<Issue> {
    if implementing_class(content).is_none() {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for line in content.lines() {
        for pattern in DIAGNOSTICS.iter() {
            if let Some(caps) = pattern.captures(line) {
                issues.push(Issue::new(
                    file,
                    IssueKind::UndeclaredIdentifier {
                        identifier: caps[1].to_string(),
                        line: line.trim().to_string(),
                    },
                ));
            }
        }
    }
    issues
}
