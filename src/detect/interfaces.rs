//! Detection of interface methods the implementing class never defines.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use crate::context::FixContext;
use crate::project::PairingChain;
use crate::source;

use super::{has_definition, implementing_class, Issue, IssueKind};

lazy_static! {
    /// Base types following the contract naming convention: `I` + uppercase.
    static ref INTERFACE_BASE: Regex = Regex::new(r"public\s+(I[A-Z]\w*)").unwrap();
}

pub fn detect_missing_interface_impls(ctx: &FixContext, content: &str, file: &Path) -> Vec<Issue> {
    tracing::debug!("Checking for interface implementations in {}", file.display());

    let Some(class_name) = implementing_class(content) else {
        return Vec::new();
    };

    let Some(header) = ctx.layout.resolve_header(file, PairingChain::Full) else {
        return Vec::new();
    };
    let Some(header_content) = source::try_read(&header.path) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let bases: Vec<&str> = INTERFACE_BASE
        .captures_iter(&header_content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .collect();

    if !bases.is_empty() {
        tracing::debug!("Found interfaces implemented by {}: {:?}", class_name, bases);
    }

    let mut reported = HashSet::new();
    let mut issues = Vec::new();
    for interface in bases {
        let Some(contract) = ctx.metadata.interface(interface) else {
            tracing::warn!("Could not find header for interface {}", interface);
            continue;
        };

        for method in &contract.required_methods {
            if has_definition(content, class_name, &method.name)
                || !reported.insert(method.name.clone())
            {
                continue;
            }
            issues.push(Issue::new(
                file,
                IssueKind::MissingInterfaceImpl {
                    class_name: class_name.to_string(),
                    interface: contract.name.clone(),
                    method_name: method.name.clone(),
                    return_type: method.return_type.clone(),
                    params: method.params.clone(),
                    signature: method.signature.clone(),
                },
            ));
        }
    }
    issues
}
