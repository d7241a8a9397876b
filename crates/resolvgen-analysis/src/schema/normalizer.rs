//! Schema normalizer.
//!
//! Turns the interior of a `type X { ... }` block into a flat token string:
//! documentation and comments removed, commas removed, whitespace runs
//! collapsed to a single `#` separator, separators around `(`, `)`, `:`, before
//! `!` and inside list brackets removed. The layout of the schema is lost on
//! purpose; the extractor only scans the resulting left-to-right sequence.

use std::sync::LazyLock;

use regex::Regex;

/// Separator replacing every whitespace run.
pub const SEPARATOR: char = '#';

static TYPE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btype\s+\w+[^{\n]*\{").expect("valid type header regex"));
static BLOCK_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)""".*?""""#).expect("valid block string regex"));
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"\n]*""#).expect("valid description regex"));
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[^\n]*").expect("valid comment regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static AROUND_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#?([():])#?|#(!)").expect("valid punctuation regex"));
static INSIDE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\[)#|#(\])").expect("valid bracket regex"));

/// Interior of the first top-level type block, without the braces.
///
/// Returns `None` when the text has no `type <Name> ... {` header outside
/// comments and descriptions. An unterminated block runs to the end of the
/// text.
pub fn type_block_interior(text: &str) -> Option<&str> {
    let header = first_header(text)?;
    Some(extract_block(text, header))
}

/// End of the first type header that is not part of a comment or
/// description.
fn first_header(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    for header in TYPE_HEADER.find_iter(text) {
        while pos < header.start() {
            pos = skip_documentation(bytes, pos).unwrap_or(pos + 1);
        }
        if pos == header.start() {
            return Some(header.end());
        }
    }
    None
}

/// Extract a brace-delimited block starting right after its opening brace.
/// Braces inside comments and descriptions do not count.
fn extract_block(content: &str, start: usize) -> &str {
    let bytes = content.as_bytes();
    let mut depth = 1usize;
    let mut i = start;

    while i < bytes.len() {
        if let Some(end) = skip_documentation(bytes, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return &content[start..i];
                }
            }
            _ => {}
        }
        i += 1;
    }

    &content[start..]
}

/// End of the `#` comment, `"""` block string or `"` description starting
/// at `i`, if one starts there.
fn skip_documentation(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes[i] {
        b'#' => Some(
            bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |p| i + p),
        ),
        b'"' if bytes[i..].starts_with(b"\"\"\"") => Some(
            bytes[i + 3..]
                .windows(3)
                .position(|w| w == b"\"\"\"")
                .map_or(bytes.len(), |p| i + 3 + p + 3),
        ),
        b'"' => {
            let mut j = i + 1;
            while j < bytes.len() {
                match bytes[j] {
                    b'\\' => j += 2,
                    b'"' => return Some(j + 1),
                    b'\n' => return Some(j),
                    _ => j += 1,
                }
            }
            Some(bytes.len())
        }
        _ => None,
    }
}

/// Remove `"""` block strings, `"..."` descriptions and `#` comments.
pub fn strip_documentation(text: &str) -> String {
    let text = BLOCK_STRING.replace_all(text, "");
    let text = DESCRIPTION.replace_all(&text, "");
    LINE_COMMENT.replace_all(&text, "").into_owned()
}

/// Normalize a type block interior into the extractor's token string.
pub fn normalize_interior(interior: &str) -> String {
    let text = strip_documentation(interior).replace(',', "");
    let text = WHITESPACE.replace_all(&text, "#");
    let text = AROUND_PUNCT.replace_all(&text, "${1}${2}");
    INSIDE_BRACKETS.replace_all(&text, "${1}${2}").into_owned()
}

/// Locate the first type block of a schema file and normalize it.
pub fn normalize(text: &str) -> Option<String> {
    type_block_interior(text).map(normalize_interior)
}
