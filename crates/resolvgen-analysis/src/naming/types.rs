//! Schema type → Go type expressions.

use resolvgen_core::types::Argument;

use super::case::split_and_recase;

/// Package holding gqlgen-generated models.
pub const MODEL_PACKAGE: &str = "model";

/// Map a schema type name to a Go type token.
///
/// Built-in scalars use a fixed table; everything else is a model type,
/// re-cased with the project acronym convention.
pub fn map_scalar(type_name: &str) -> String {
    match type_name {
        "Int" => "int".to_string(),
        "Float" => "float64".to_string(),
        "Boolean" => "bool".to_string(),
        "String" | "ID" => "string".to_string(),
        "Upload" => "graphql.Upload".to_string(),
        other => format!("{MODEL_PACKAGE}.{}", split_and_recase(other)),
    }
}

/// `ID` and `String` map to Go strings and are never made pointers.
fn never_wrapped(type_name: &str) -> bool {
    matches!(type_name, "ID" | "String")
}

/// Prefix `*` unless the value is required or a never-wrapped scalar.
pub fn wrap_optional(token: &str, type_name: &str, required: bool) -> String {
    if required || never_wrapped(type_name) {
        token.to_string()
    } else {
        format!("*{token}")
    }
}

/// Wrap an element token into a slice; the slice itself becomes a pointer
/// when the list is optional.
pub fn wrap_list(element: &str, type_name: &str, list_required: bool) -> String {
    wrap_optional(&format!("[]{element}"), type_name, list_required)
}

/// Full Go parameter type of an argument.
pub fn go_arg_type(arg: &Argument) -> String {
    let element = wrap_optional(&map_scalar(&arg.type_name), &arg.type_name, arg.required);
    if arg.is_list {
        wrap_list(&element, &arg.type_name, arg.is_list_required)
    } else {
        element
    }
}

/// Pointer to the response model: `GetUserResponse!` → `*model.GetUserResponse`.
pub fn response_pointer_type(response: &str) -> String {
    format!("*{}", response_struct_type(response))
}

/// Response model value type: `GetUserResponse` → `model.GetUserResponse`.
pub fn response_struct_type(response: &str) -> String {
    let bare = response.trim_end_matches('!');
    format!("{MODEL_PACKAGE}.{}", split_and_recase(bare))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(type_name: &str, required: bool, is_list: bool, is_list_required: bool) -> Argument {
        Argument {
            name: "value".to_string(),
            type_name: type_name.to_string(),
            required,
            is_list,
            is_list_required,
        }
    }

    #[test]
    fn test_map_scalar_table() {
        assert_eq!(map_scalar("Int"), "int");
        assert_eq!(map_scalar("Float"), "float64");
        assert_eq!(map_scalar("Boolean"), "bool");
        assert_eq!(map_scalar("ID"), "string");
        assert_eq!(map_scalar("String"), "string");
        assert_eq!(map_scalar("Upload"), "graphql.Upload");
        assert_eq!(map_scalar("UserIdInput"), "model.UserIDInput");
    }

    #[test]
    fn test_required_list_of_required_inputs() {
        let t = go_arg_type(&arg("ActionInput", true, true, true));
        assert_eq!(t, "[]model.ActionInput");
    }

    #[test]
    fn test_bare_input_is_optional_pointer() {
        let t = go_arg_type(&arg("ActionInput", false, false, false));
        assert_eq!(t, "*model.ActionInput");
    }

    #[test]
    fn test_optional_list_of_optional_ints() {
        assert_eq!(go_arg_type(&arg("Int", false, true, false)), "*[]*int");
        assert_eq!(go_arg_type(&arg("Int", true, true, false)), "*[]int");
    }

    #[test]
    fn test_id_and_string_never_wrapped() {
        assert_eq!(go_arg_type(&arg("ID", false, false, false)), "string");
        assert_eq!(go_arg_type(&arg("String", false, true, false)), "[]string");
        assert_eq!(go_arg_type(&arg("Int", false, false, false)), "*int");
    }

    #[test]
    fn test_response_types() {
        assert_eq!(response_pointer_type("GetUserResponse!"), "*model.GetUserResponse");
        assert_eq!(response_struct_type("ApiKeyResponse"), "model.APIKeyResponse");
    }
}
