//! Detection of RPCs declared in the paired header but never defined.

use std::collections::HashSet;
use std::path::Path;

use crate::context::FixContext;
use crate::metadata::{RpcDeclaration, RpcRole};
use crate::project::PairingChain;

use super::{has_definition, implementing_class, Issue, IssueKind};

/// Name of the method the implementing class must define for an RPC.
///
/// Server RPCs are implemented under `<Name>_Implementation`; client and
/// multicast RPCs are checked and stubbed under the bare name.
pub fn rpc_implementation_name(rpc: &RpcDeclaration) -> String {
    match rpc.role {
        RpcRole::Server => format!("{}_Implementation", rpc.name),
        RpcRole::Client | RpcRole::Multicast => rpc.name.clone(),
    }
}

pub fn detect_missing_rpc_impls(ctx: &FixContext, content: &str, file: &Path) -> Vec<Issue> {
    let Some(class_name) = implementing_class(content) else {
        return Vec::new();
    };

    let Some(header) = ctx.layout.resolve_header(file, PairingChain::Full) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut issues = Vec::new();
    for rpc in ctx.metadata.rpcs_declared_in(&header.path) {
        let impl_name = rpc_implementation_name(rpc);
        if !seen.insert(impl_name.clone()) || has_definition(content, class_name, &impl_name) {
            continue;
        }
        issues.push(Issue::new(
            file,
            IssueKind::MissingRpcImpl {
                class_name: class_name.to_string(),
                role: rpc.role,
                method_name: rpc.name.clone(),
                impl_name,
                return_type: rpc.return_type.clone(),
                params: rpc.params.clone(),
            },
        ));
    }
    issues
}
