//! Declaration metadata discovered from header files.
//!
//! Four categories are collected in one traversal of the source tree:
//! interface contracts, RPC declarations, native-override events and
//! replicated properties. Recognition is lexical and lives behind the
//! [`DeclarationExtractor`] trait so the matcher can be replaced without
//! touching the detectors.

mod extract;

pub use extract::{contract_name, DeclarationExtractor, PatternExtractor};

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::project::ProjectLayout;
use crate::source;

/// A method an interface contract requires implementers to define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredMethod {
    pub name: String,
    pub return_type: String,
    pub params: String,
    pub signature: String,
}

impl RequiredMethod {
    pub fn new(return_type: &str, name: &str, params: &str) -> Self {
        Self {
            name: name.to_string(),
            return_type: return_type.to_string(),
            params: params.to_string(),
            signature: format!("{} {}({})", return_type, name, params),
        }
    }
}

/// An interface contract, named `I<Name>` after its `U<Name>` base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceContract {
    pub name: String,
    pub declaring_file: PathBuf,
    pub required_methods: Vec<RequiredMethod>,
}

/// Which side of a networked session executes an RPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RpcRole {
    Server,
    Client,
    Multicast,
}

impl RpcRole {
    /// Parse the role tag as written in the function macro.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Server" => Some(RpcRole::Server),
            "Client" => Some(RpcRole::Client),
            "NetMulticast" => Some(RpcRole::Multicast),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpcRole::Server => "Server",
            RpcRole::Client => "Client",
            RpcRole::Multicast => "NetMulticast",
        }
    }
}

impl fmt::Display for RpcRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcDeclaration {
    pub role: RpcRole,
    pub name: String,
    pub return_type: String,
    pub params: String,
    pub declaring_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeOverrideEvent {
    pub name: String,
    pub return_type: String,
    pub params: String,
    pub declaring_file: PathBuf,
}

impl NativeOverrideEvent {
    /// Name of the method implementers must define.
    pub fn implementation_name(&self) -> String {
        format!("{}_Implementation", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReplicationMode {
    Plain,
    WithHandler(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplicatedProperty {
    pub name: String,
    pub type_name: String,
    pub mode: ReplicationMode,
    pub declaring_file: PathBuf,
}

/// Records extracted from a single header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDeclarations {
    pub interfaces: Vec<InterfaceContract>,
    pub rpcs: Vec<RpcDeclaration>,
    pub native_events: Vec<NativeOverrideEvent>,
    pub replicated_properties: Vec<ReplicatedProperty>,
}

/// All declaration metadata for a project.
///
/// Built once per run and never mutated afterwards. Duplicate declarations
/// across files are kept; lookups by name return the first one seen in
/// traversal order.
#[derive(Debug, Clone, Default)]
pub struct ProjectMetadata {
    pub interfaces: Vec<InterfaceContract>,
    pub rpcs: Vec<RpcDeclaration>,
    pub native_events: Vec<NativeOverrideEvent>,
    pub replicated_properties: Vec<ReplicatedProperty>,
}

impl ProjectMetadata {
    /// Scan every header under the source folder.
    pub fn scan(layout: &ProjectLayout, extractor: &dyn DeclarationExtractor) -> Self {
        let mut metadata = Self::default();

        let headers = WalkDir::new(&layout.source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && layout.is_header(e.path()));

        for entry in headers {
            let Some(content) = source::try_read(entry.path()) else {
                continue;
            };
            metadata.absorb(extractor.extract(entry.path(), &content));
        }

        metadata.warn_duplicate_interfaces();
        metadata.log_summary();
        metadata
    }

    /// Merge the records of one file.
    pub fn absorb(&mut self, decls: FileDeclarations) {
        self.interfaces.extend(decls.interfaces);
        self.rpcs.extend(decls.rpcs);
        self.native_events.extend(decls.native_events);
        self.replicated_properties.extend(decls.replicated_properties);
    }

    /// The first interface contract with this name.
    pub fn interface(&self, name: &str) -> Option<&InterfaceContract> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn rpcs_declared_in<'a>(
        &'a self,
        header: &'a Path,
    ) -> impl Iterator<Item = &'a RpcDeclaration> + 'a {
        self.rpcs.iter().filter(move |r| r.declaring_file == header)
    }

    pub fn native_events_declared_in<'a>(
        &'a self,
        header: &'a Path,
    ) -> impl Iterator<Item = &'a NativeOverrideEvent> + 'a {
        self.native_events
            .iter()
            .filter(move |e| e.declaring_file == header)
    }

    fn warn_duplicate_interfaces(&self) {
        let mut seen = HashSet::new();
        for contract in &self.interfaces {
            if !seen.insert(contract.name.as_str()) {
                tracing::warn!(
                    interface = %contract.name,
                    file = %contract.declaring_file.display(),
                    "duplicate interface declaration ignored for lookups"
                );
            }
        }
    }

    fn log_summary(&self) {
        log_category("interfaces", self.interfaces.iter().map(|i| i.name.as_str()));
        log_category("rpcs", self.rpcs.iter().map(|r| r.name.as_str()));
        log_category(
            "native events",
            self.native_events.iter().map(|e| e.name.as_str()),
        );
        log_category(
            "replicated properties",
            self.replicated_properties.iter().map(|p| p.name.as_str()),
        );
    }
}

fn log_category<'a>(category: &str, names: impl ExactSizeIterator<Item = &'a str>) {
    let total = names.len();
    if total == 0 {
        tracing::info!("No {} discovered", category);
        return;
    }
    tracing::info!("Discovered {} {}: {}", total, category, sample_names(names));
}

/// Up to five names, with a trailing "and more" when truncated.
fn sample_names<'a>(names: impl ExactSizeIterator<Item = &'a str>) -> String {
    let total = names.len();
    let shown: Vec<&str> = names.take(5).collect();
    let mut out = shown.join(", ");
    if total > shown.len() {
        out.push_str(" and more");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixerConfig;
    use tempfile::TempDir;

    #[test]
    fn test_sample_names_truncates() {
        let names = ["A", "B", "C", "D", "E", "F"];
        assert_eq!(sample_names(names.iter().copied()), "A, B, C, D, E and more");
        assert_eq!(sample_names(names[..2].iter().copied()), "A, B");
    }

    #[test]
    fn test_rpc_role_tags() {
        assert_eq!(RpcRole::from_tag("NetMulticast"), Some(RpcRole::Multicast));
        assert_eq!(RpcRole::from_tag("Server"), Some(RpcRole::Server));
        assert_eq!(RpcRole::from_tag("Reliable"), None);
        assert_eq!(RpcRole::Multicast.to_string(), "NetMulticast");
    }

    #[test]
    fn test_scan_collects_from_all_headers() {
        let temp = TempDir::new().unwrap();
        let public = temp.path().join("Source/Combat/Public");
        std::fs::create_dir_all(&public).unwrap();
        std::fs::create_dir_all(temp.path().join("Source/Combat/Private")).unwrap();

        std::fs::write(
            public.join("Weapon.h"),
            "UCLASS()\nclass COMBAT_API AWeapon : public AActor\n{\n    UFUNCTION(Server, Reliable)\n    void ServerFire();\n\n    UPROPERTY(ReplicatedUsing=OnRep_Ammo)\n    int32 Ammo;\n};\n",
        )
        .unwrap();
        std::fs::write(
            public.join("Pickup.h"),
            "class COMBAT_API APickup : public AActor\n{\n    UFUNCTION(BlueprintNativeEvent)\n    void OnPicked(AActor* By);\n};\n",
        )
        .unwrap();
        // Implementation files are not scanned.
        std::fs::write(
            temp.path().join("Source/Combat/Private/Weapon.cpp"),
            "UFUNCTION(Server, Reliable)\nvoid NotAHeader();\n",
        )
        .unwrap();

        let layout = ProjectLayout::discover(temp.path(), &FixerConfig::default());
        let metadata = ProjectMetadata::scan(&layout, &PatternExtractor::new());

        assert_eq!(metadata.rpcs.len(), 1);
        assert_eq!(metadata.rpcs[0].name, "ServerFire");
        assert_eq!(metadata.native_events.len(), 1);
        assert_eq!(metadata.replicated_properties.len(), 1);

        let weapon_h = public.join("Weapon.h");
        assert_eq!(metadata.rpcs_declared_in(&weapon_h).count(), 1);
        assert_eq!(metadata.native_events_declared_in(&weapon_h).count(), 0);
    }

    #[test]
    fn test_interface_lookup_first_seen() {
        let mut metadata = ProjectMetadata::default();
        for file in ["A.h", "B.h"] {
            metadata.absorb(FileDeclarations {
                interfaces: vec![InterfaceContract {
                    name: "IDamageable".to_string(),
                    declaring_file: PathBuf::from(file),
                    required_methods: vec![],
                }],
                ..Default::default()
            });
        }

        assert_eq!(metadata.interfaces.len(), 2);
        assert_eq!(
            metadata.interface("IDamageable").unwrap().declaring_file,
            PathBuf::from("A.h")
        );
        assert!(metadata.interface("IMissing").is_none());
    }
}
