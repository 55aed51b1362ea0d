//! implfix - closes gaps between Unreal plugin headers and implementations.
//!
//! A plugin's headers promise methods that its implementation files never
//! define: interface contracts, networked RPCs, native-override events.
//! implfix finds those gaps, along with framework types used without their
//! include and members named by pasted compiler errors, and repairs each
//! one in place by appending a stub, inserting an include or declaring a
//! member in the header.
//!
//! # Architecture
//!
//! - `project`: module discovery and header/implementation pairing
//! - `metadata`: reflection-macro declarations extracted from headers
//! - `context`: the immutable per-run state shared by everything below
//! - `detect`: gap detectors and the `Runner` that drives them
//! - `synth`: stub and insertion text, and the `Fixer` that writes files
//! - `bootstrap`: the shared-types header
//! - `config`, `report`, `cli`: configuration, output and the command line

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod context;
pub mod detect;
pub mod metadata;
pub mod project;
pub mod report;
pub mod source;
pub mod synth;

pub use config::FixerConfig;
pub use context::FixContext;
pub use detect::{DetectionResult, Issue, IssueCategory, IssueKind, Runner};
pub use metadata::{DeclarationExtractor, PatternExtractor, ProjectMetadata};
pub use project::{ModuleMap, PairingChain, ProjectLayout};
pub use synth::{FixSummary, Fixer};
