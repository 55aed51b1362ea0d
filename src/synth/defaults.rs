//! Placeholder return values for generated method bodies.

/// Framework value types and their zero/empty expressions, checked in order.
const FRAMEWORK_DEFAULTS: &[(&str, &str)] = &[
    ("FVector", "FVector::ZeroVector"),
    ("FRotator", "FRotator::ZeroRotator"),
    ("FTransform", "FTransform::Identity"),
    ("FString", "FString()"),
    ("FName", "FName()"),
    ("FText", "FText::GetEmpty()"),
];

/// Whether a return type needs no return statement.
pub fn is_void(return_type: &str) -> bool {
    return_type.trim() == "void"
}

/// The expression a stub returns for `return_type`, or `None` for `void`.
///
/// First match wins: boolean-named types, then numeric-named types, then
/// known framework value types, then a null pointer.
pub fn default_return_value(return_type: &str) -> Option<&'static str> {
    if is_void(return_type) {
        return None;
    }

    let lower = return_type.to_lowercase();
    if lower.contains("bool") {
        return Some("false");
    }
    if lower.contains("int") {
        return Some("0");
    }
    if lower.contains("float") {
        return Some("0.0f");
    }
    if lower.contains("double") {
        return Some("0.0");
    }

    for (type_name, value) in FRAMEWORK_DEFAULTS {
        if return_type.contains(type_name) {
            return Some(value);
        }
    }

    Some("nullptr")
}

/// `return <default>;` or a bare `return;` for void.
pub fn return_statement(return_type: &str) -> String {
    match default_return_value(return_type) {
        Some(value) => format!("return {};", value),
        None => "return;".to_string(),
    }
}
