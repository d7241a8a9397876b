//! Fresh service code: file header and not-yet-implemented stubs.

use resolvgen_analysis::naming::{map_scalar, response_pointer_type, response_struct_type};
use resolvgen_core::types::{Action, ResultMeta};

use crate::context::EmitContext;
use crate::go_source::GoFunction;
use crate::resolver::{render_parameters, service_function_name};

use super::ServiceGroup;

/// First statement of every generated stub, left until a developer
/// replaces it.
pub const STUB_PANIC: &str = "panic(fmt.Errorf(\"not implemented\"))";

/// A function still opening with the generated stub statement.
pub fn is_unimplemented(function: &GoFunction) -> bool {
    function.body.trim_start().starts_with(STUB_PANIC)
}

/// Header of a newly created service file.
pub fn render_fresh_header(group: &ServiceGroup<'_>, ctx: &EmitContext<'_>) -> String {
    let mut imports = vec![ctx.model_import()];
    if group.has_upload_field {
        imports.push(ctx.upload_import().to_string());
    }
    imports.extend(["context", "fmt", "time"].map(String::from));
    imports.extend(ctx.config.generation.extra_service_imports.iter().cloned());

    let mut out = format!("package {}\n\nimport (\n", group.module.package);
    for import in imports {
        out.push_str(&format!("\t\"{import}\"\n"));
    }
    out.push_str(")\n\n");
    out
}

/// `func GetUserQuery(ctx context.Context, id string) (*model.GetUserResponse, error) {`
pub fn render_signature(action: &Action) -> String {
    format!(
        "func {}({}) ({}, error) {{",
        service_function_name(action),
        render_parameters(action),
        response_pointer_type(&action.response_type_name),
    )
}

fn is_builtin_scalar(type_name: &str) -> bool {
    matches!(type_name, "Int" | "Float" | "Boolean" | "String" | "ID" | "Upload")
}

/// Zero-valued `result` declaration for a result shape.
pub fn result_declaration(meta: &ResultMeta) -> String {
    if meta.type_name.is_empty() {
        return "\tvar result interface{}\n".to_string();
    }

    let token = map_scalar(&meta.type_name);
    match (is_builtin_scalar(&meta.type_name), meta.is_list) {
        (true, true) => format!("\tresult := []{token}{{}}\n"),
        (true, false) => format!("\tvar result {token}\n"),
        (false, true) => format!("\tresult := []*{token}{{}}\n"),
        (false, false) => format!("\tresult := {token}{{}}\n"),
    }
}

/// Slices and required scalars are value fields in the gqlgen model;
/// everything else is a pointer.
fn result_field(meta: &ResultMeta) -> &'static str {
    if meta.is_list || (meta.required && is_builtin_scalar(&meta.type_name)) {
        "result"
    } else {
        "&result"
    }
}

/// Complete stub for one action.
pub fn render_stub(action: &Action, meta: &ResultMeta) -> String {
    let result_field = result_field(meta);

    let mut out = render_signature(action);
    out.push('\n');
    out.push_str(&format!("\t{STUB_PANIC}\n\n"));
    out.push_str("\ttimeStart := time.Now()\n");
    out.push_str("\tsuccess := false\n");
    out.push_str(&result_declaration(meta));
    out.push_str(&format!(
        "\tresponse := {}{{\n",
        response_struct_type(&action.response_type_name)
    ));
    out.push_str(&format!("\t\tResult:      {result_field},\n"));
    out.push_str("\t\tSuccess:     success,\n");
    out.push_str("\t\tElapsedTime: time.Since(timeStart).String(),\n");
    out.push_str("\t}\n");
    out.push_str("\treturn &response, nil\n");
    out.push_str("}\n\n");
    out
}
