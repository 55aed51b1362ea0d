//! Member declarations added to headers for undeclared identifiers.

use regex::Regex;

/// Result of inserting members into a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInsertion {
    pub content: String,
    pub added: Vec<String>,
}

/// Guess a member type from its name: a leading `b` means a boolean flag.
pub fn member_type(identifier: &str) -> &'static str {
    if identifier.starts_with('b') {
        "bool"
    } else {
        "int32"
    }
}

/// Declare each identifier not already present in the header as a
/// reflected member, just before the header's last `};`.
///
/// Returns `None` when the header has no closing `};`.
pub fn insert_members(header: &str, identifiers: &[&str]) -> Option<MemberInsertion> {
    let mut insert_at = header.rfind("};")?;
    let mut content = header.to_string();
    let mut added = Vec::new();

    for identifier in identifiers {
        if is_present(&content, identifier) {
            continue;
        }

        let decl = format!(
            "\n    UPROPERTY()\n    {} {};\n",
            member_type(identifier),
            identifier
        );
        content.insert_str(insert_at, &decl);
        insert_at += decl.len();
        added.push(identifier.to_string());
        tracing::info!("Added member declaration for: {}", identifier);
    }

    Some(MemberInsertion { content, added })
}

fn is_present(content: &str, identifier: &str) -> bool {
    Regex::new(&format!(r"\b{}\b", regex::escape(identifier)))
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}
