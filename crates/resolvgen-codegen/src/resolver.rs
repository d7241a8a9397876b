//! gqlgen resolver file: one dispatch method per action, forwarding to the
//! module's service function.

use std::collections::BTreeSet;

use resolvgen_analysis::naming::{go_arg_type, response_pointer_type, split_and_recase, upper_first};
use resolvgen_analysis::SchemaModel;
use resolvgen_core::types::{Action, OperationKind};

use crate::context::EmitContext;

const RESOLVER_FOOTER: &str = "\
// Mutation returns MutationResolver implementation.
func (r *Resolver) Mutation() MutationResolver { return &mutationResolver{r} }

// Query returns QueryResolver implementation.
func (r *Resolver) Query() QueryResolver { return &queryResolver{r} }

type mutationResolver struct{ *Resolver }
type queryResolver struct{ *Resolver }
";

/// Name of the service function an action dispatches to: `GetUserQuery`.
pub fn service_function_name(action: &Action) -> String {
    format!("{}{}", upper_first(&action.name), upper_first(action.kind.name()))
}

/// `ctx context.Context, id string, input *model.UserInput`
pub fn render_parameters(action: &Action) -> String {
    let mut params = String::from("ctx context.Context");
    for arg in &action.args {
        params.push_str(", ");
        params.push_str(&split_and_recase(&arg.name));
        params.push(' ');
        params.push_str(&go_arg_type(arg));
    }
    params
}

/// `ctx, id, input`
pub fn render_call_arguments(action: &Action) -> String {
    let mut call = String::from("ctx");
    for arg in &action.args {
        call.push_str(", ");
        call.push_str(&split_and_recase(&arg.name));
    }
    call
}

fn render_header(model: &SchemaModel, ctx: &EmitContext<'_>) -> String {
    let module_imports: BTreeSet<String> = model
        .files
        .iter()
        .map(|f| ctx.module_import(&f.module_dir))
        .collect();

    let mut out = String::from("package graph\n\nimport (\n");
    out.push_str(&format!("\t\"{}\"\n", ctx.model_import()));
    out.push_str("\t\"context\"\n");
    for import in &module_imports {
        out.push_str(&format!("\t\"{import}\"\n"));
    }
    if model.has_upload_field() {
        out.push_str(&format!("\t\"{}\"\n", ctx.upload_import()));
    }
    out.push_str(")\n\n");
    out
}

fn render_method(action: &Action) -> Option<String> {
    let receiver = match action.kind {
        OperationKind::Query => "queryResolver",
        OperationKind::Mutation => "mutationResolver",
        OperationKind::Subscription => return None,
    };

    Some(format!(
        "func (r *{receiver}) {}({}) ({}, error) {{\n\treturn {}.{}({})\n}}\n\n",
        upper_first(&action.name),
        render_parameters(action),
        response_pointer_type(&action.response_type_name),
        action.module.package,
        service_function_name(action),
        render_call_arguments(action),
    ))
}

/// Render the resolver file. Methods are ordered by action name.
pub fn render_resolver(model: &SchemaModel, ctx: &EmitContext<'_>) -> String {
    let mut out = render_header(model, ctx);
    let table = model.action_table();

    for action in table.values() {
        if let Some(method) = render_method(action) {
            out.push_str(&method);
        }
    }

    out.push_str(RESOLVER_FOOTER);
    tracing::debug!(methods = table.len(), "resolver rendered");
    out
}
