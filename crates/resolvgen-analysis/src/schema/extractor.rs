//! Action grammar extractor.
//!
//! Two passes over normalized text:
//! 1. `name(args):Response` — every match is collapsed to `)` afterwards;
//! 2. `name:Response` on the residue, for parameterless actions.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use resolvgen_core::errors::SchemaError;
use resolvgen_core::types::{Action, Argument, ModuleRef, OperationKind};

use super::annotation::TypeAnnotation;
use super::normalizer::SEPARATOR;

static WITH_PARAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\(([^()]*)\):(\w+!?)").expect("valid action regex"));
static WITHOUT_PARAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+):(\w+!?)").expect("valid action regex"));
static DIRECTIVE_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)\([^()]*\)").expect("valid directive regex"));

/// Where the normalized text came from.
#[derive(Debug, Clone, Copy)]
pub struct ActionSource<'a> {
    pub path: &'a Path,
    pub kind: OperationKind,
    pub module: &'a ModuleRef,
}

/// Extract every action declared in normalized schema text.
///
/// Actions with parameters come first, in source order, followed by
/// parameterless ones. The result depends on the input text only.
pub fn extract_actions(normalized: &str, source: ActionSource<'_>) -> Result<Vec<Action>, SchemaError> {
    let mut actions = Vec::new();
    let normalized = DIRECTIVE_ARGS.replace_all(normalized, "@${1}#");

    for caps in WITH_PARAMS.captures_iter(&normalized) {
        let name = &caps[1];
        let args = parse_arguments(name, &caps[2], source.path)?;
        let response = response_type_name(name, &caps[3], source.path)?;
        actions.push(new_action(name, args, response, source));
    }

    // Arguments of lines the first pass could not match (e.g. list
    // responses) must not be mistaken for parameterless actions.
    let residue = WITH_PARAMS.replace_all(&normalized, ")");
    let residue = strip_groups(&residue);

    for caps in WITHOUT_PARAMS.captures_iter(&residue) {
        let name = &caps[1];
        let response = response_type_name(name, &caps[2], source.path)?;
        actions.push(new_action(name, Vec::new(), response, source));
    }

    tracing::debug!(
        path = %source.path.display(),
        kind = %source.kind,
        actions = actions.len(),
        "extracted actions"
    );
    Ok(actions)
}

/// Replace every outermost parenthesized group, nested ones included, by
/// a single `)`. An unclosed group runs to the end of the text.
fn strip_groups(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    out.push(')');
                }
            }
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}

fn new_action(name: &str, args: Vec<Argument>, response: String, source: ActionSource<'_>) -> Action {
    Action {
        name: name.to_string(),
        args,
        response_type_name: response,
        kind: source.kind,
        module: source.module.clone(),
    }
}

/// Parse the inside of an argument list: `id:ID!#input:UserInput!`.
///
/// Items are sorted by their raw text so regenerated code does not churn
/// when arguments are reordered in the schema. Items without a `:` (default
/// values, directives) are skipped.
pub fn parse_arguments(action: &str, inner: &str, path: &Path) -> Result<Vec<Argument>, SchemaError> {
    let mut items: Vec<&str> = inner.split(SEPARATOR).filter(|i| !i.is_empty()).collect();
    items.sort_unstable();

    let mut args = Vec::with_capacity(items.len());
    for item in items {
        let Some((name, raw_type)) = item.split_once(':') else {
            tracing::debug!(action, item, "skipping argument item without a type");
            continue;
        };

        let arg = TypeAnnotation::parse(raw_type).into_argument(name);
        if arg.name == "input" && !arg.type_name.contains("Input") {
            return Err(SchemaError::InvalidInputArgument {
                action: action.to_string(),
                type_name: arg.type_name,
                path: path.to_path_buf(),
            });
        }
        args.push(arg);
    }

    Ok(args)
}

/// Validate a response token and strip its required marker.
fn response_type_name(action: &str, token: &str, path: &Path) -> Result<String, SchemaError> {
    match token.strip_suffix('!') {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(SchemaError::InvalidResponseName {
            action: action.to_string(),
            token: token.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::normalizer::normalize;
    use proptest::prelude::*;

    fn module() -> ModuleRef {
        ModuleRef {
            project: "shop".to_string(),
            package: "user".to_string(),
        }
    }

    fn extract(schema: &str) -> Result<Vec<Action>, SchemaError> {
        let normalized = normalize(schema).unwrap();
        let module = module();
        extract_actions(
            &normalized,
            ActionSource {
                path: Path::new("modules/shop/user/schemas/user_query.graphqls"),
                kind: OperationKind::Query,
                module: &module,
            },
        )
    }

    #[test]
    fn test_extract_with_and_without_params() {
        let actions = extract(
            "type Query {\n  getUser(id: ID!): GetUserResponse!\n  listUsers: ListUsersResponse!\n}\n",
        )
        .unwrap();
        let names: Vec<_> = actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["getUser", "listUsers"]);
        assert_eq!(actions[0].response_type_name, "GetUserResponse");
        assert_eq!(actions[0].args.len(), 1);
        assert_eq!(actions[0].args[0].type_name, "ID");
        assert!(actions[0].args[0].required);
        assert!(actions[1].args.is_empty());
        assert_eq!(actions[1].module, module());
        assert_eq!(actions[1].kind, OperationKind::Query);
    }

    #[test]
    fn test_parameterless_actions_are_matched_once() {
        let actions = extract("type Query {\n a(x: Int): AResponse!\n b: BResponse!\n}").unwrap();
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| a.name != "x"));
    }

    #[test]
    fn test_arguments_are_sorted_by_raw_text() {
        let actions = extract(
            "type Mutation {\n  createUser(name: String!, age: Int, input: CreateUserInput!): CreateUserResponse!\n}",
        )
        .unwrap();
        let args: Vec<_> = actions[0].args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(args, vec!["age", "input", "name"]);
    }

    #[test]
    fn test_list_argument_flags() {
        let actions =
            extract("type Query {\n  byIds(ids: [ActionInput!]!, tags: [String]): ByIdsResponse!\n}")
                .unwrap();
        let ids = &actions[0].args[0];
        assert!(ids.is_list && ids.required && ids.is_list_required);
        let tags = &actions[0].args[1];
        assert!(tags.is_list && !tags.required && !tags.is_list_required);
    }

    #[test]
    fn test_default_values_are_skipped() {
        let actions = extract("type Query {\n  page(limit: Int = 10): PageResponse!\n}").unwrap();
        assert_eq!(actions[0].args.len(), 1);
        assert_eq!(actions[0].args[0].name, "limit");
    }

    #[test]
    fn test_directive_arguments_do_not_leak_actions() {
        let actions = extract(
            "type Query {\n  getUser(id: ID! @deprecated(reason: \"use key\"), key: String): GetUserResponse!\n  \
             listUsers: ListUsersResponse! @cacheControl(scope: PRIVATE, hints: [Hint(ttl: 5)])\n}",
        )
        .unwrap();
        let names: Vec<_> = actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["getUser", "listUsers"]);
        let args: Vec<_> = actions[0].args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(args, vec!["id", "key"]);
    }

    #[test]
    fn test_nested_leftover_groups_are_removed() {
        assert_eq!(strip_groups("a(b(c:D)#e:F):[R]#x:Y!"), "a):[R]#x:Y!");
        assert_eq!(strip_groups("a(b"), "a");
    }

    #[test]
    fn test_input_argument_needs_input_type() {
        let err = extract("type Mutation {\n  save(input: UserData!): SaveResponse!\n}").unwrap_err();
        match err {
            SchemaError::InvalidInputArgument { action, type_name, .. } => {
                assert_eq!(action, "save");
                assert_eq!(type_name, "UserData");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_response_is_rejected() {
        let err = extract("type Query {\n  getUser(id: ID!): GetUserResponse\n}").unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, SchemaError::InvalidResponseName { .. }));
        assert!(message.contains("getUser"));
        assert!(message.contains("user_query.graphqls"));
    }

    proptest! {
        #[test]
        fn test_extraction_is_deterministic(
            names in proptest::collection::vec("[a-z][a-zA-Z]{0,8}", 1..6),
            with_args in proptest::collection::vec(any::<bool>(), 6),
        ) {
            let mut schema = String::from("type Query {\n");
            for (i, name) in names.iter().enumerate() {
                if with_args[i] {
                    schema.push_str(&format!("  {name}(id: ID!, limit: Int): R{i}Response!\n"));
                } else {
                    schema.push_str(&format!("  {name}: R{i}Response!\n"));
                }
            }
            schema.push_str("}\n");

            let first = extract(&schema).unwrap();
            let second = extract(&schema).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), names.len());
            for action in &first {
                for arg in &action.args {
                    prop_assert!(!arg.is_list_required || arg.is_list);
                }
            }
        }
    }
}
