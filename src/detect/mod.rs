//! Gap detection over implementation files.
//!
//! Every detector takes the file's content and path and returns the issues
//! found in it, in order. All of them identify the class under analysis by
//! the first `Class::Method(` in the file and report nothing when there is
//! none.

mod identifiers;
mod includes;
mod interfaces;
mod native_events;
mod rpcs;
mod runner;
mod types;

pub use identifiers::detect_undeclared_identifiers;
pub use includes::{detect_missing_includes, IncludeTable, WELL_KNOWN_INCLUDES};
pub use interfaces::detect_missing_interface_impls;
pub use native_events::detect_missing_native_overrides;
pub use rpcs::{detect_missing_rpc_impls, rpc_implementation_name};
pub use runner::Runner;
pub use types::{DetectionResult, Issue, IssueCategory, IssueKind};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUALIFIED_DEFINITION: Regex = Regex::new(r"(\w+)::\w+\(").unwrap();
}

/// The class owning the first qualified method definition in `content`.
pub fn implementing_class(content: &str) -> Option<&str> {
    QUALIFIED_DEFINITION
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Check for `Class::Method(` anywhere in `content`.
pub fn has_definition(content: &str, class_name: &str, method: &str) -> bool {
    let pattern = format!(
        r"\b{}::\s*{}\s*\(",
        regex::escape(class_name),
        regex::escape(method)
    );
    Regex::new(&pattern)
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}

/// Check for `ReturnType Class::Method(`, tolerating whitespace differences
/// inside the return type.
pub fn has_typed_definition(
    content: &str,
    return_type: &str,
    class_name: &str,
    method: &str,
) -> bool {
    let return_pattern = return_type
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let pattern = format!(
        r"\b{}\s+{}::{}\s*\(",
        return_pattern,
        regex::escape(class_name),
        regex::escape(method)
    );
    Regex::new(&pattern)
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}
