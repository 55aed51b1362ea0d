//! Placeholder method definitions.
//!
//! Stubs are appended after the existing content of an implementation file,
//! one banner-led block per issue category. Existing bytes are never touched.

use crate::detect::{Issue, IssueCategory, IssueKind};
use crate::metadata::RpcRole;

use super::defaults::{default_return_value, return_statement};

const INDENT: &str = "    ";

/// `<Ret> <Class>::<Method>(<Params>)` with an empty body and a TODO.
///
/// No return statement is emitted, even for non-void methods.
pub fn interface_stub(
    class_name: &str,
    interface: &str,
    method_name: &str,
    return_type: &str,
    params: &str,
) -> String {
    format!(
        "\n{} {}::{}({})\n{{\n{}// TODO: implement {}::{}\n}}\n",
        return_type, class_name, method_name, params, INDENT, interface, method_name
    )
}

/// RPC stub: authority guard for server RPCs, a role TODO, then a default return.
pub fn rpc_stub(
    class_name: &str,
    role: RpcRole,
    method_name: &str,
    impl_name: &str,
    return_type: &str,
    params: &str,
) -> String {
    let mut body = String::new();

    if role == RpcRole::Server {
        body.push_str(&authority_guard(return_type));
    }

    let todo = match role {
        RpcRole::Server => format!("implement server-side logic for {}", method_name),
        RpcRole::Client => format!("implement client-side visual/audio effects for {}", method_name),
        RpcRole::Multicast => {
            format!("implement multicast logic visible to all clients for {}", method_name)
        }
    };
    body.push_str(&format!("{}// TODO: {}\n", INDENT, todo));
    push_default_return(&mut body, return_type);

    definition(class_name, impl_name, return_type, params, &body)
}

/// Native-override stub: a TODO then a default return.
pub fn native_override_stub(
    class_name: &str,
    event: &str,
    impl_name: &str,
    return_type: &str,
    params: &str,
) -> String {
    let mut body = format!("{}// TODO: implement {}\n", INDENT, event);
    push_default_return(&mut body, return_type);
    definition(class_name, impl_name, return_type, params, &body)
}

/// Early return taken when the executing side lacks authority.
pub fn authority_guard(return_type: &str) -> String {
    format!(
        "{i}if (!HasAuthority())\n{i}{{\n{i}{i}{ret}\n{i}}}\n\n",
        i = INDENT,
        ret = return_statement(return_type)
    )
}

fn push_default_return(body: &mut String, return_type: &str) {
    if let Some(value) = default_return_value(return_type) {
        body.push_str(&format!("{}return {};\n", INDENT, value));
    }
}

fn definition(class_name: &str, name: &str, return_type: &str, params: &str, body: &str) -> String {
    format!(
        "\n{} {}::{}({})\n{{\n{}}}\n",
        return_type, class_name, name, params, body
    )
}

/// The stub for a single issue, if its category produces one.
pub fn stub_for(issue: &Issue) -> Option<String> {
    match &issue.kind {
        IssueKind::MissingInterfaceImpl {
            class_name,
            interface,
            method_name,
            return_type,
            params,
            ..
        } => Some(interface_stub(
            class_name,
            interface,
            method_name,
            return_type,
            params,
        )),
        IssueKind::MissingRpcImpl {
            class_name,
            role,
            method_name,
            impl_name,
            return_type,
            params,
        } => Some(rpc_stub(
            class_name,
            *role,
            method_name,
            impl_name,
            return_type,
            params,
        )),
        IssueKind::MissingNativeOverrideImpl {
            class_name,
            event,
            impl_name,
            return_type,
            params,
        } => Some(native_override_stub(
            class_name,
            event,
            impl_name,
            return_type,
            params,
        )),
        IssueKind::MissingInclude { .. } | IssueKind::UndeclaredIdentifier { .. } => None,
    }
}

fn banner(category: IssueCategory) -> &'static str {
    match category {
        IssueCategory::MissingInterfaceImpl => "// Auto-generated interface implementations",
        IssueCategory::MissingRpcImpl => "// Auto-generated RPC implementations",
        _ => "// Auto-generated implementations",
    }
}

/// Append one block holding a stub per issue. All issues must share a
/// category; issues that produce no stub are skipped.
pub fn append_stubs(content: &str, category: IssueCategory, issues: &[&Issue]) -> String {
    let stubs: Vec<String> = issues.iter().filter_map(|i| stub_for(i)).collect();
    if stubs.is_empty() {
        return content.to_string();
    }

    for issue in issues {
        tracing::info!("Added implementation: {}", issue.summary());
    }

    let mut out = String::with_capacity(content.len() + stubs.iter().map(String::len).sum::<usize>() + 64);
    out.push_str(content);
    out.push_str("\n\n");
    out.push_str(banner(category));
    out.push('\n');
    for stub in &stubs {
        out.push_str(stub);
    }
    out
}
