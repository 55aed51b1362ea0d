//! Insertion of missing include directives.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INCLUDE_LINE: Regex = Regex::new(r#"^\s*#include\s+[<"][^>"]+[>"]"#).unwrap();
}

/// Insert an `#include "<path>"` line per entry.
///
/// The block goes right after the last existing include line. Without any
/// include, it goes before the first line that is not a comment, followed
/// by a blank line. Bytes before and after the insertion point are kept
/// as they were.
pub fn insert_includes(content: &str, includes: &[&str]) -> String {
    if includes.is_empty() {
        return content.to_string();
    }

    let block: String = includes
        .iter()
        .map(|include| format!("#include \"{}\"\n", include))
        .collect();

    let (at, trailer) = match last_include_end(content) {
        Some(end) => (end, ""),
        None => (first_code_line_start(content), "\n"),
    };

    let mut out = String::with_capacity(content.len() + block.len() + 2);
    out.push_str(&content[..at]);
    if at > 0 && !content[..at].ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&block);
    out.push_str(trailer);
    out.push_str(&content[at..]);
    out
}

/// Byte offset just past the last include line (including its newline).
fn last_include_end(content: &str) -> Option<usize> {
    let mut offset = 0;
    let mut end = None;
    for line in content.split_inclusive('\n') {
        if INCLUDE_LINE.is_match(line) {
            end = Some(offset + line.len());
        }
        offset += line.len();
    }
    end
}

/// Byte offset of the first line that is not part of a comment.
///
/// Returns the end of the content when every line is a comment.
fn first_code_line_start(content: &str) -> usize {
    let mut offset = 0;
    let mut in_block = false;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_comment = if in_block {
            if trimmed.contains("*/") {
                in_block = false;
            }
            true
        } else if trimmed.starts_with("//") {
            true
        } else if trimmed.starts_with("/*") {
            in_block = !trimmed.contains("*/");
            true
        } else {
            false
        };

        if !is_comment {
            return offset;
        }
        offset += line.len();
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after_last_include() {
        let content = "// Copyright\n#include \"Weapon.h\"\n#include <Engine/World.h>\n\nvoid AWeapon::Fire() {}\n";
        let out = insert_includes(content, &["Containers/Array.h"]);
        assert_eq!(
            out,
            "// Copyright\n#include \"Weapon.h\"\n#include <Engine/World.h>\n#include \"Containers/Array.h\"\n\nvoid AWeapon::Fire() {}\n"
        );
    }

    #[test]
    fn test_non_contiguous_includes_uses_last() {
        let content = "#include \"A.h\"\n\nint X;\n#include \"B.h\"\nvoid A::B() {}\n";
        let out = insert_includes(content, &["C.h"]);
        assert_eq!(
            out,
            "#include \"A.h\"\n\nint X;\n#include \"B.h\"\n#include \"C.h\"\nvoid A::B() {}\n"
        );
    }

    #[test]
    fn test_without_includes_before_first_code_line() {
        let content = "// Copyright Epic\n/* multi\n   line */\nvoid AWeapon::Fire() {}\n";
        let out = insert_includes(content, &["Containers/Array.h", "Containers/Map.h"]);
        assert_eq!(
            out,
            "// Copyright Epic\n/* multi\n   line */\n#include \"Containers/Array.h\"\n#include \"Containers/Map.h\"\n\nvoid AWeapon::Fire() {}\n"
        );
    }

    #[test]
    fn test_without_includes_or_comments() {
        let content = "void AWeapon::Fire() {}\n";
        let out = insert_includes(content, &["Containers/Array.h"]);
        assert_eq!(out, "#include \"Containers/Array.h\"\n\nvoid AWeapon::Fire() {}\n");
    }

    #[test]
    fn test_last_include_without_newline() {
        let content = "#include \"Weapon.h\"";
        let out = insert_includes(content, &["Containers/Array.h"]);
        assert_eq!(out, "#include \"Weapon.h\"\n#include \"Containers/Array.h\"\n");
    }

    #[test]
    fn test_existing_bytes_preserved_around_insertion() {
        let content = "#include \"A.h\"\n#include \"B.h\"\nvoid A::B() {}\n";
        let out = insert_includes(content, &["C.h"]);
        let at = "#include \"A.h\"\n#include \"B.h\"\n".len();
        assert!(out.starts_with(&content[..at]));
        assert!(out.ends_with(&content[at..]));
        assert_eq!(out.len(), content.len() + "#include \"C.h\"\n".len());
    }

    #[test]
    fn test_empty_list_is_identity() {
        assert_eq!(insert_includes("void A::B() {}\n", &[]), "void A::B() {}\n");
    }
}
