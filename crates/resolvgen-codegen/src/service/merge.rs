//! Regeneration of a service file that may already hold hand-written code.
//!
//! Previous functions returning `&response` are indexed by name. Each
//! current action either gets a fresh stub, its previous implementation
//! verbatim, or (when its signature changed) the previous body under the
//! new signature behind a review banner. Whatever is left over goes to the
//! backup file. Other top-level code (helpers, `const`, `var`, `type`) is
//! carried over right after the header.

use resolvgen_analysis::schema::ResponseRegistry;
use resolvgen_core::types::collections::{FxHashMap, FxHashSet};

use crate::context::EmitContext;
use crate::go_source::{GoFunction, GoSource};
use crate::resolver::service_function_name;

use super::stub::{is_unimplemented, render_fresh_header, render_signature, render_stub};
use super::ServiceGroup;

/// Functions without this statement are not considered generated services.
pub const RESPONSE_RETURN: &str = "return &response";

/// Placed above a previous implementation whose signature changed.
pub const DRIFT_BANNER: &str = "\
/**------------------------------------------------------------
// !!! WARNING !!!
// The code below was changed and needs review:
// - The GraphQL query or mutation parameters changed; review this implementation.
------------------------------------------------------------**/
";

/// What happened to each action of a service file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub stubs: usize,
    pub kept: usize,
    pub drifted: usize,
    /// Helper functions carried over unchanged.
    pub carried: usize,
}

/// Rendered service file plus previous functions no action claimed.
#[derive(Debug, Clone)]
pub struct ServiceRender {
    pub content: String,
    /// Ordered by name.
    pub leftovers: Vec<GoFunction>,
    pub stats: MergeStats,
}

/// Render one service file, merging with its previous content if any.
pub fn render_service(
    group: &ServiceGroup<'_>,
    registry: &ResponseRegistry,
    ctx: &EmitContext<'_>,
    existing: Option<&str>,
) -> ServiceRender {
    let existing = existing.filter(|content| !content.trim().is_empty());
    let GoSource {
        header,
        functions,
        declarations,
        ..
    } = existing.map(GoSource::parse).unwrap_or_default();

    let mut content = match (existing, header.as_deref()) {
        (_, Some(header)) => format!("{header}\n\n"),
        (Some(_), None) => {
            tracing::warn!(module = %group.module, kind = %group.kind, "existing service has no package clause; writing a fresh header");
            render_fresh_header(group, ctx)
        }
        (None, None) => render_fresh_header(group, ctx),
    };

    let action_names: FxHashSet<String> = group
        .actions
        .iter()
        .map(|action| service_function_name(action))
        .collect();

    let mut stats = MergeStats::default();
    let mut previous: FxHashMap<String, GoFunction> = FxHashMap::default();
    let mut clashing = Vec::new();
    let mut carried = Vec::new();
    for function in functions {
        if function.body.contains(RESPONSE_RETURN) {
            previous.insert(function.name.clone(), function);
        } else if action_names.contains(&function.name) {
            tracing::warn!(function = %function.name, module = %group.module, "function without a response return shadows an action; archiving it");
            clashing.push(function);
        } else {
            carried.push(function);
        }
    }

    for declaration in &declarations {
        content.push_str(declaration);
        content.push_str("\n\n");
    }
    for function in &carried {
        push_verbatim(&mut content, function);
        stats.carried += 1;
    }

    for action in &group.actions {
        let name = service_function_name(action);
        let signature = render_signature(action);

        match previous.remove(&name) {
            Some(old) if !is_unimplemented(&old) => {
                if old.signature.trim() == signature.trim() {
                    push_verbatim(&mut content, &old);
                    stats.kept += 1;
                } else {
                    tracing::warn!(function = %name, module = %group.module, "signature changed; previous body kept for review");
                    content.push_str(&render_drift(&old, &signature));
                    stats.drifted += 1;
                }
            }
            _ => {
                let meta = registry.result_for(&action.response_type_name);
                content.push_str(&render_stub(action, &meta));
                stats.stubs += 1;
            }
        }
    }

    let mut leftovers: Vec<GoFunction> = previous.into_values().chain(clashing).collect();
    leftovers.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        module = %group.module,
        kind = %group.kind,
        stubs = stats.stubs,
        kept = stats.kept,
        drifted = stats.drifted,
        carried = stats.carried,
        leftovers = leftovers.len(),
        "service rendered"
    );

    ServiceRender {
        content,
        leftovers,
        stats,
    }
}

/// A previous function with its doc comment, unchanged.
fn push_verbatim(content: &mut String, function: &GoFunction) {
    if let Some(comment) = &function.leading_comment {
        content.push_str(comment);
        content.push('\n');
    }
    content.push_str(&function.text);
    content.push_str("\n\n");
}

/// Banner, the previous doc comment (minus an older banner), the new
/// signature and the previous body.
fn render_drift(old: &GoFunction, signature: &str) -> String {
    let mut out = String::from(DRIFT_BANNER);

    let doc = old
        .leading_comment
        .as_deref()
        .map(|c| c.strip_prefix(DRIFT_BANNER.trim_end()).unwrap_or(c).trim_start())
        .unwrap_or_default();
    if !doc.is_empty() {
        out.push_str(doc);
        out.push('\n');
    }

    out.push_str(signature);
    out.push_str(old.body.trim_end());
    out.push_str("\n}\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::stub::STUB_PANIC;
    use resolvgen_core::types::{Action, Argument, ModuleRef, OperationKind};
    use resolvgen_core::ResolvgenConfig;
    use std::path::Path;

    fn module() -> ModuleRef {
        ModuleRef {
            project: "shop".to_string(),
            package: "user".to_string(),
        }
    }

    fn create_user(with_age: bool) -> Action {
        let mut args = vec![Argument {
            name: "name".to_string(),
            type_name: "String".to_string(),
            required: true,
            is_list: false,
            is_list_required: false,
        }];
        if with_age {
            args.insert(
                0,
                Argument {
                    name: "age".to_string(),
                    type_name: "Int".to_string(),
                    required: true,
                    is_list: false,
                    is_list_required: false,
                },
            );
        }
        Action {
            name: "createUser".to_string(),
            args,
            response_type_name: "CreateUserResponse".to_string(),
            kind: OperationKind::Mutation,
            module: module(),
        }
    }

    fn render(actions: Vec<Action>, existing: Option<&str>) -> ServiceRender {
        let module = module();
        let group = ServiceGroup {
            module: &module,
            kind: OperationKind::Mutation,
            has_upload_field: false,
            actions: actions.iter().collect(),
        };
        let config = ResolvgenConfig::default();
        let ctx = EmitContext::new(Path::new("."), "example.com/api", &config);
        render_service(&group, &ResponseRegistry::new(), &ctx, existing)
    }

    const IMPLEMENTED: &str = "package user\n\nimport (\n\t\"context\"\n)\n\n\
        func CreateUserMutation(ctx context.Context, name string) (*model.CreateUserResponse, error) {\n\
        \tresponse := model.CreateUserResponse{Success: name != \"\"}\n\
        \treturn &response, nil\n}\n\n\
        func DeleteUserMutation(ctx context.Context, id string) (*model.DeleteUserResponse, error) {\n\
        \tresponse := model.DeleteUserResponse{Success: true}\n\
        \treturn &response, nil\n}\n\n\
        func helper() int {\n\treturn 1\n}\n";

    #[test]
    fn test_fresh_file_gets_header_and_stubs() {
        let render = render(vec![create_user(false)], None);
        assert!(render.content.starts_with("package user\n\nimport (\n\t\"example.com/api/graph/model\"\n"));
        assert!(render.content.contains(STUB_PANIC));
        assert_eq!(render.stats.stubs, 1);
        assert!(render.leftovers.is_empty());
    }

    #[test]
    fn test_matching_signature_is_kept_verbatim() {
        let render = render(vec![create_user(false)], Some(IMPLEMENTED));
        assert!(render.content.starts_with("package user\n\nimport (\n\t\"context\"\n)\n\n"));
        assert!(render.content.contains("Success: name != \"\""));
        assert_eq!(render.stats.kept, 1);
        assert!(!render.content.contains("DeleteUserMutation"));
        assert_eq!(render.stats.carried, 1);

        let names: Vec<_> = render.leftovers.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["DeleteUserMutation"]);
    }

    #[test]
    fn test_changed_signature_gets_banner_and_old_body() {
        let render = render(vec![create_user(true)], Some(IMPLEMENTED));
        assert_eq!(render.stats.drifted, 1);
        let expected = format!(
            "{DRIFT_BANNER}func CreateUserMutation(ctx context.Context, age int, name string) (*model.CreateUserResponse, error) {{\n\
             \tresponse := model.CreateUserResponse{{Success: name != \"\"}}\n\
             \treturn &response, nil\n}}\n\n"
        );
        assert!(render.content.ends_with(&expected), "{}", render.content);
    }

    #[test]
    fn test_drift_banner_survives_next_regeneration() {
        let first = render(vec![create_user(true)], Some(IMPLEMENTED));
        let second = render(vec![create_user(true)], Some(&first.content));
        assert_eq!(second.stats.kept, 1);
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn test_unimplemented_function_is_regenerated() {
        let fresh = render(vec![create_user(false)], None);
        let again = render(vec![create_user(true)], Some(&fresh.content));
        assert_eq!(again.stats.stubs, 1);
        assert!(again.content.contains("age int, name string"));
        assert!(!again.content.contains("WARNING"));
    }

    #[test]
    fn test_helpers_and_declarations_survive_in_place() {
        let existing = "package user\n\nimport (\n\t\"context\"\n)\n\n\
            const limit = 10\n\n\
            // clamp bounds n to limit.\n\
            func clamp(n int) int {\n\tif n > limit {\n\t\treturn limit\n\t}\n\treturn n\n}\n\n\
            func CreateUserMutation(ctx context.Context, name string) (*model.CreateUserResponse, error) {\n\
            \tresponse := model.CreateUserResponse{Success: clamp(len(name)) > 0}\n\
            \treturn &response, nil\n}\n";

        let first = render(vec![create_user(false)], Some(existing));
        assert_eq!(first.content, format!("{existing}\n"));
        assert_eq!(first.stats.carried, 1);
        assert_eq!(first.stats.kept, 1);
        assert!(first.leftovers.is_empty());

        let second = render(vec![create_user(false)], Some(&first.content));
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn test_implementation_mentioning_not_implemented_is_kept() {
        let existing = "package user\n\n\
            func CreateUserMutation(ctx context.Context, name string) (*model.CreateUserResponse, error) {\n\
            \t// bulk mode is not implemented yet\n\
            \tresponse := model.CreateUserResponse{Success: true}\n\
            \treturn &response, nil\n}\n";
        let render = render(vec![create_user(false)], Some(existing));
        assert_eq!(render.stats.kept, 1);
        assert_eq!(render.stats.stubs, 0);
        assert!(render.content.contains("Success: true"));
        assert!(!render.content.contains(STUB_PANIC));
    }

    #[test]
    fn test_function_shadowing_an_action_is_archived() {
        let existing = "package user\n\n\
            func CreateUserMutation(ctx context.Context, name string) error {\n\treturn nil\n}\n";
        let render = render(vec![create_user(false)], Some(existing));
        assert_eq!(render.stats.stubs, 1);
        assert_eq!(render.stats.carried, 0);
        assert_eq!(render.content.matches("func CreateUserMutation(").count(), 1);
        let names: Vec<_> = render.leftovers.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["CreateUserMutation"]);
    }

    #[test]
    fn test_whitespace_only_file_is_treated_as_missing() {
        let render = render(vec![create_user(false)], Some("\n  \n"));
        assert!(render.content.starts_with("package user\n"));
    }
}
