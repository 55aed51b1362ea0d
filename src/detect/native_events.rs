//! Detection of native-override events without an `_Implementation`.

use std::collections::HashSet;
use std::path::Path;

use crate::context::FixContext;
use crate::project::PairingChain;

use super::{has_typed_definition, implementing_class, Issue, IssueKind};

/// Every native event declared in the paired header needs a class-qualified
/// `<Event>_Implementation` with the same return type.
pub fn detect_missing_native_overrides(ctx: &FixContext, content: &str, file: &Path) -> Vec<Issue> {
    let Some(class_name) = implementing_class(content) else {
        return Vec::new();
    };

    let Some(header) = ctx.layout.resolve_header(file, PairingChain::Module) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut issues = Vec::new();
    for event in ctx.metadata.native_events_declared_in(&header.path) {
        let impl_name = event.implementation_name();
        if !seen.insert(impl_name.clone()) {
            continue;
        }
        if has_typed_definition(content, &event.return_type, class_name, &impl_name) {
            continue;
        }
        issues.push(Issue::new(
            file,
            IssueKind::MissingNativeOverrideImpl {
                class_name: class_name.to_string(),
                event: event.name.clone(),
                impl_name,
                return_type: event.return_type.clone(),
                params: event.params.clone(),
            },
        ));
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixerConfig;
    use tempfile::TempDir;

    const HEADER: &str = r#"#pragma once

UCLASS()
class COMBAT_API APickup : public AActor
{
    GENERATED_BODY()

public:
    UFUNCTION(BlueprintNativeEvent, BlueprintCallable)
    bool CanPickUp(AActor* By);

    UFUNCTION(BlueprintNativeEvent)
    void OnPickedUp(AActor* By);
};
"#;

    fn fixture(cpp: &str) -> (TempDir, FixContext, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let public = temp.path().join("Source/Combat/Public");
        let private = temp.path().join("Source/Combat/Private");
        std::fs::create_dir_all(&public).unwrap();
        std::fs::create_dir_all(&private).unwrap();
        std::fs::write(public.join("Pickup.h"), HEADER).unwrap();
        let cpp_path = private.join("Pickup.cpp");
        std::fs::write(&cpp_path, cpp).unwrap();

        let ctx = FixContext::build(temp.path(), FixerConfig::default()).unwrap();
        (temp, ctx, cpp_path)
    }

    #[test]
    fn test_missing_event_implementation() {
        let cpp = r#"#include "Pickup.h"

void APickup::OnPickedUp_Implementation(AActor* By)
{
}
"#;
        let (_temp, ctx, path) = fixture(cpp);
        let issues = detect_missing_native_overrides(&ctx, cpp, &path);
        assert_eq!(issues.len(), 1);
        match &issues[0].kind {
            IssueKind::MissingNativeOverrideImpl {
                class_name,
                event,
                impl_name,
                return_type,
                params,
            } => {
                assert_eq!(class_name, "APickup");
                assert_eq!(event, "CanPickUp");
                assert_eq!(impl_name, "CanPickUp_Implementation");
                assert_eq!(return_type, "bool");
                assert_eq!(params, "AActor* By");
            }
            other => panic!("unexpected issue {:?}", other),
        }
    }

    #[test]
    fn test_return_type_must_match() {
        let cpp = r#"void APickup::OnPickedUp_Implementation(AActor* By) {}
int32 APickup::CanPickUp_Implementation(AActor* By) { return 0; }
"#;
        let (_temp, ctx, path) = fixture(cpp);
        let issues = detect_missing_native_overrides(&ctx, cpp, &path);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_all_implemented() {
        let cpp = r#"void APickup::OnPickedUp_Implementation(AActor* By) {}
bool APickup::CanPickUp_Implementation(AActor* By) { return true; }
"#;
        let (_temp, ctx, path) = fixture(cpp);
        assert!(detect_missing_native_overrides(&ctx, cpp, &path).is_empty());
    }

    #[test]
    fn test_unpaired_file_is_skipped() {
        let cpp = "void AOrphan::Tick(float Dt) {}\n";
        let (temp, ctx, _) = fixture("void APickup::X() {}\n");
        let orphan = temp.path().join("Source/Combat/Private/Orphan.cpp");
        std::fs::write(&orphan, cpp).unwrap();
        assert!(detect_missing_native_overrides(&ctx, cpp, &orphan).is_empty());
    }
}
