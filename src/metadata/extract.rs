//! Pattern-based recognition of Unreal reflection macros.
//!
//! No syntax tree is built. Each category is a regular expression anchored
//! on its macro, and a declaration must start on the line right after the
//! macro's closing parenthesis. Nested parentheses inside a macro (e.g.
//! `meta=(...)`) are not supported.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use super::{
    FileDeclarations, InterfaceContract, NativeOverrideEvent, ReplicatedProperty,
    ReplicationMode, RequiredMethod, RpcDeclaration, RpcRole,
};

lazy_static! {
    /// `UINTERFACE(...)` followed by `class X_API U<Name> : public UInterface`
    static ref INTERFACE_DECL: Regex = Regex::new(
        r"UINTERFACE\s*\([^)]*\)\s*\n\s*class\s+[A-Z0-9_]+_API\s+(\w+)\s*:\s*public\s+UInterface\b"
    ).unwrap();

    /// Declared-only virtual method: no inline body before the semicolon.
    static ref VIRTUAL_METHOD: Regex = Regex::new(
        r"virtual\s+([^(;{}]+)\s+(\w+)\s*\(([^)]*)\)[^;{}]*;"
    ).unwrap();

    static ref RPC_DECL: Regex = Regex::new(
        r"UFUNCTION\s*\(\s*(?:[^)]*,)?\s*(Server|Client|NetMulticast)\b[^)]*\)\s*\n\s*([^(]+)\s+(\w+)\s*\(([^)]*)\)"
    ).unwrap();

    static ref NATIVE_EVENT_DECL: Regex = Regex::new(
        r"UFUNCTION\s*\(\s*(?:[^)]*,)?\s*BlueprintNativeEvent\b[^)]*\)\s*\n\s*([^(]+)\s+(\w+)\s*\(([^)]*)\)"
    ).unwrap();

    static ref REPLICATED_DECL: Regex = Regex::new(
        r"UPROPERTY\s*\(\s*(?:[^)]*,)?\s*(ReplicatedUsing\s*=\s*(\w+)|Replicated\b)[^)]*\)\s*\n\s*([^\n;]+)\s+(\w+)\s*;"
    ).unwrap();
}

/// Specifiers that may precede a return type but never belong to it in an
/// out-of-class definition.
const LEADING_SPECIFIERS: &[&str] = &["virtual", "static", "inline", "FORCEINLINE", "explicit"];

/// Turns a header's text into structured declaration records.
pub trait DeclarationExtractor {
    fn extract(&self, path: &Path, content: &str) -> FileDeclarations;
}

/// The regular-expression extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    fn interfaces(&self, path: &Path, content: &str) -> Vec<InterfaceContract> {
        INTERFACE_DECL
            .captures_iter(content)
            .filter_map(|caps| {
                let name = contract_name(&caps[1])?;
                let body = class_body(content, &name)?;
                Some(InterfaceContract {
                    required_methods: unfinished_virtuals(body),
                    name,
                    declaring_file: path.to_path_buf(),
                })
            })
            .collect()
    }

    fn rpcs(&self, path: &Path, content: &str) -> Vec<RpcDeclaration> {
        RPC_DECL
            .captures_iter(content)
            .filter_map(|caps| {
                Some(RpcDeclaration {
                    role: RpcRole::from_tag(&caps[1])?,
                    return_type: normalize_return_type(&caps[2]),
                    name: caps[3].to_string(),
                    params: caps[4].trim().to_string(),
                    declaring_file: path.to_path_buf(),
                })
            })
            .collect()
    }

    fn native_events(&self, path: &Path, content: &str) -> Vec<NativeOverrideEvent> {
        NATIVE_EVENT_DECL
            .captures_iter(content)
            .map(|caps| NativeOverrideEvent {
                return_type: normalize_return_type(&caps[1]),
                name: caps[2].to_string(),
                params: caps[3].trim().to_string(),
                declaring_file: path.to_path_buf(),
            })
            .collect()
    }

    fn replicated_properties(&self, path: &Path, content: &str) -> Vec<ReplicatedProperty> {
        REPLICATED_DECL
            .captures_iter(content)
            .map(|caps| ReplicatedProperty {
                mode: match caps.get(2) {
                    Some(handler) => ReplicationMode::WithHandler(handler.as_str().to_string()),
                    None => ReplicationMode::Plain,
                },
                type_name: caps[3].trim().to_string(),
                name: caps[4].to_string(),
                declaring_file: path.to_path_buf(),
            })
            .collect()
    }
}

impl DeclarationExtractor for PatternExtractor {
    fn extract(&self, path: &Path, content: &str) -> FileDeclarations {
        FileDeclarations {
            interfaces: self.interfaces(path, content),
            rpcs: self.rpcs(path, content),
            native_events: self.native_events(path, content),
            replicated_properties: self.replicated_properties(path, content),
        }
    }
}

/// Derive a contract name from an interface base type: `UFoo` -> `IFoo`.
///
/// Returns `None` for names without the `U` prefix.
pub fn contract_name(base: &str) -> Option<String> {
    let rest = base.strip_prefix('U')?;
    if rest.is_empty() {
        return None;
    }
    Some(format!("I{}", rest))
}

/// Text between the braces of `class X_API <name> ... { ... }`.
///
/// Stops at the first closing brace, so inline bodies truncate the class.
fn class_body<'a>(content: &'a str, name: &str) -> Option<&'a str> {
    let pattern = format!(
        r"class\s+[A-Z0-9_]+_API\s+{}\b[^{{;]*\{{([^}}]*)\}}",
        regex::escape(name)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn unfinished_virtuals(body: &str) -> Vec<RequiredMethod> {
    VIRTUAL_METHOD
        .captures_iter(body)
        .map(|caps| {
            RequiredMethod::new(
                &normalize_return_type(&caps[1]),
                &caps[2],
                caps[3].trim(),
            )
        })
        .collect()
}

/// Collapse whitespace and drop storage/inline specifiers.
fn normalize_return_type(raw: &str) -> String {
    let mut tokens: Vec<&str> = raw.split_whitespace().collect();
    while tokens
        .first()
        .map(|t| LEADING_SPECIFIERS.contains(t))
        .unwrap_or(false)
    {
        tokens.remove(0);
    }
    tokens.join(" ")
}
