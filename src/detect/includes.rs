//! Detection of well-known types used without their include.
//!
//! Includes reaching the file through another header are not followed, so
//! a transitive include still produces an issue.

use regex::Regex;
use std::path::Path;

use crate::config::IncludeRule;

use super::{implementing_class, Issue, IssueKind};

/// Framework types and the header that declares them.
pub const WELL_KNOWN_INCLUDES: &[(&str, &str)] = &[
    ("FString", "Containers/UnrealString.h"),
    ("TArray", "Containers/Array.h"),
    ("TMap", "Containers/Map.h"),
    ("TSet", "Containers/Set.h"),
    ("FName", "UObject/NameTypes.h"),
    ("FText", "Internationalization/Text.h"),
    ("IOnlineSession", "Online/OnlineSessionInterface.h"),
    ("FOnlineSessionSearchResult", "Online/OnlineSessionInterface.h"),
];

/// Pre-compiled rule.
struct CompiledRule {
    type_name: String,
    include: String,
    usage: Regex,
    directive: Regex,
}

/// The include table with its patterns compiled once.
pub struct IncludeTable {
    rules: Vec<CompiledRule>,
}

impl IncludeTable {
    /// Build the table from the built-in rows followed by `extra` rows.
    pub fn new(extra: &[IncludeRule]) -> anyhow::Result<Self> {
        let builtin = WELL_KNOWN_INCLUDES.iter().map(|(t, i)| IncludeRule {
            type_name: t.to_string(),
            include: i.to_string(),
        });

        let rules = builtin
            .chain(extra.iter().cloned())
            .map(|rule| {
                let usage = Regex::new(&format!(r"\b{}\b", regex::escape(&rule.type_name)))
                    .map_err(|e| anyhow::anyhow!("compiling usage of {:?}: {}", rule.type_name, e))?;
                let directive = Regex::new(&format!(
                    r#"#include\s+[<"].*{}[>"]"#,
                    regex::escape(&rule.include)
                ))
                .map_err(|e| anyhow::anyhow!("compiling include {:?}: {}", rule.include, e))?;
                Ok(CompiledRule {
                    type_name: rule.type_name,
                    include: rule.include,
                    usage,
                    directive,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Flag each table type used as a whole word when no include directive
/// mentions its header.
pub fn detect_missing_includes(table: &IncludeTable, content: &str, file: &Path) -> Vec<Issue> {
    if implementing_class(content).is_none() {
        return Vec::new();
    }

    table
        .rules
        .iter()
        .filter(|rule| rule.usage.is_match(content) && !rule.directive.is_match(content))
        .map(|rule| {
            Issue::new(
                file,
                IssueKind::MissingInclude {
                    type_name: rule.type_name.clone(),
                    include: rule.include.clone(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IncludeTable {
        IncludeTable::new(&[]).unwrap()
    }

    fn includes(issues: &[Issue]) -> Vec<String> {
        issues
            .iter()
            .map(|i| match &i.kind {
                IssueKind::MissingInclude { include, .. } => include.clone(),
                other => panic!("unexpected issue {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_flags_used_type_without_include() {
        let content = r#"#include "Inventory.h"

void UInventory::Add(const FName& Id)
{
    TArray<int32> Slots;
}
"#;
        let issues = detect_missing_includes(&table(), content, Path::new("Inventory.cpp"));
        assert_eq!(
            includes(&issues),
            vec!["Containers/Array.h", "UObject/NameTypes.h"]
        );
        assert_eq!(issues[0].file, Path::new("Inventory.cpp"));
    }

    #[test]
    fn test_include_present_suppresses() {
        let content = r#"#include "Inventory.h"
#include "Containers/Array.h"

void UInventory::Add()
{
    TArray<int32> Slots;
}
"#;
        let issues = detect_missing_includes(&table(), content, Path::new("Inventory.cpp"));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_whole_word_only() {
        let content = "void UInventory::Add()\n{\n    FStringView View;\n    TArrayView<int32> Slots;\n}\n";
        let issues = detect_missing_includes(&table(), content, Path::new("Inventory.cpp"));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_no_class_no_issues() {
        let content = "TArray<int32> GSlots;\n";
        let issues = detect_missing_includes(&table(), content, Path::new("Globals.cpp"));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_extra_rules_appended() {
        let table = IncludeTable::new(&[IncludeRule {
            type_name: "FGameplayTag".to_string(),
            include: "GameplayTagContainer.h".to_string(),
        }])
        .unwrap();
        assert_eq!(table.len(), WELL_KNOWN_INCLUDES.len() + 1);

        let content = "void UAbility::Grant(FGameplayTag Tag)\n{\n}\n";
        let issues = detect_missing_includes(&table, content, Path::new("Ability.cpp"));
        assert_eq!(includes(&issues), vec!["GameplayTagContainer.h"]);
    }
}
