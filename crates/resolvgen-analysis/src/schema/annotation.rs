//! Textual type annotations: `Name`, `Name!`, `[Name]`, `[Name!]!`.

use resolvgen_core::types::{Argument, ResultMeta};

/// Flags derived from a type annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAnnotation {
    /// Type name with `!`, `[` and `]` removed.
    pub type_name: String,
    /// Element type carries a trailing `!`.
    pub required: bool,
    pub is_list: bool,
    /// `!` after the closing bracket.
    pub is_list_required: bool,
}

impl TypeAnnotation {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let type_name: String = raw
            .chars()
            .filter(|c| !matches!(c, '!' | '[' | ']'))
            .collect::<String>()
            .trim()
            .to_string();

        let list = raw
            .strip_prefix('[')
            .and_then(|rest| rest.find(']').map(|close| (&rest[..close], &rest[close + 1..])));

        match list {
            Some((element, after)) => Self {
                type_name,
                required: element.trim_end().ends_with('!'),
                is_list: true,
                is_list_required: after.trim_start().starts_with('!'),
            },
            None => Self {
                type_name,
                required: raw.ends_with('!'),
                is_list: false,
                is_list_required: false,
            },
        }
    }

    pub fn into_argument(self, name: &str) -> Argument {
        Argument {
            name: name.to_string(),
            type_name: self.type_name,
            required: self.required,
            is_list: self.is_list,
            is_list_required: self.is_list_required,
        }
    }

    pub fn into_result_meta(self) -> ResultMeta {
        ResultMeta {
            type_name: self.type_name,
            is_list: self.is_list,
            is_list_required: self.is_list_required,
            required: self.required,
        }
    }
}
