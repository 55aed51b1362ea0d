//! Creation of the shared-types header that generated code relies on.

use std::path::{Path, PathBuf};

use crate::config::BootstrapConfig;
use crate::project::{Module, ProjectLayout};
use crate::source;

const TEMPLATE: &str = include_str!("templates/shared_types.h");

/// Export macro of a module, e.g. `Combat` -> `COMBAT_API`.
pub fn api_macro(module_name: &str) -> String {
    format!("{}_API", module_name.to_uppercase())
}

/// Render the shared-types header for a module.
pub fn render(file_name: &str, module_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());

    TEMPLATE
        .replace("{{FILE}}", file_name)
        .replace("{{STEM}}", &stem)
        .replace("{{API}}", &api_macro(module_name))
}

/// The existing shared-types header in any module's declarations folder.
pub fn find_existing(layout: &ProjectLayout, file_name: &str) -> Option<PathBuf> {
    layout
        .modules
        .iter()
        .map(|m| m.declarations_dir.join(file_name))
        .find(|p| p.is_file())
}

/// Write the shared-types header into the first module unless some module
/// already has one. Returns the path of a newly created header.
pub fn ensure_shared_types(
    layout: &ProjectLayout,
    config: &BootstrapConfig,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(existing) = find_existing(layout, &config.file_name) {
        tracing::info!("{} already exists at {}", config.file_name, existing.display());
        return Ok(None);
    }

    let Some(module) = layout.modules.iter().next() else {
        tracing::error!("Could not determine module name for {}", config.file_name);
        return Ok(None);
    };

    let path = write_header(module, &config.file_name)?;
    tracing::info!("Created {} at {}", config.file_name, path.display());
    Ok(Some(path))
}

fn write_header(module: &Module, file_name: &str) -> anyhow::Result<PathBuf> {
    let path = module.declarations_dir.join(file_name);
    source::write_all(&path, &render(file_name, &module.name))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixerConfig;
    use tempfile::TempDir;

    fn layout_with(modules: &[&str]) -> (TempDir, ProjectLayout) {
        let temp = TempDir::new().unwrap();
        for name in modules {
            let root = temp.path().join("Source").join(name);
            std::fs::create_dir_all(root.join("Public")).unwrap();
            std::fs::create_dir_all(root.join("Private")).unwrap();
        }
        let layout = ProjectLayout::discover(temp.path(), &FixerConfig::default());
        (temp, layout)
    }

    #[test]
    fn test_render_substitutes_module_and_stem() {
        let text = render("NetForgeTypes.h", "NetForge");
        assert!(text.starts_with("// NetForgeTypes.h - "));
        assert!(text.contains("#include \"NetForgeTypes.generated.h\""));
        assert!(text.contains("struct NETFORGE_API FNetForgeMetricsHistory"));
        assert!(text.contains("struct NETFORGE_API FNetForgeFinding"));
        assert!(text.contains("enum class ENetForgeSessionState : uint8"));
        assert!(text.contains("#define SEARCH_PRESENCE TEXT(\"SEARCH_PRESENCE\")"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_created_in_first_module() {
        let (temp, layout) = layout_with(&["Zeta", "Alpha"]);
        let created = ensure_shared_types(&layout, &BootstrapConfig::default())
            .unwrap()
            .unwrap();

        assert_eq!(
            created,
            temp.path().join("Source/Alpha/Public/NetForgeTypes.h")
        );
        let text = std::fs::read_to_string(&created).unwrap();
        assert!(text.contains("ALPHA_API"));
    }

    #[test]
    fn test_existing_header_left_alone() {
        let (temp, layout) = layout_with(&["Alpha", "Beta"]);
        let existing = temp.path().join("Source/Beta/Public/NetForgeTypes.h");
        std::fs::write(&existing, "// mine\n").unwrap();

        let created = ensure_shared_types(&layout, &BootstrapConfig::default()).unwrap();
        assert!(created.is_none());
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "// mine\n");
        assert!(!temp.path().join("Source/Alpha/Public/NetForgeTypes.h").exists());
    }

    #[test]
    fn test_no_modules() {
        let (_temp, layout) = layout_with(&[]);
        assert!(ensure_shared_types(&layout, &BootstrapConfig::default())
            .unwrap()
            .is_none());
    }
}
