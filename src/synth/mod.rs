//! Code synthesis for detected gaps.
//!
//! The text-producing functions here are pure: they take the current file
//! content and return the new content. Only [`Fixer`] touches the disk.

mod defaults;
mod fixer;
mod includes;
mod members;
mod stubs;

pub use defaults::{default_return_value, is_void, return_statement};
pub use fixer::{FixSummary, Fixer};
pub use includes::insert_includes;
pub use members::{insert_members, member_type, MemberInsertion};
pub use stubs::{
    append_stubs, authority_guard, interface_stub, native_override_stub, rpc_stub, stub_for,
};
