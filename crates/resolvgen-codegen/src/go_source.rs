//! Minimal Go source scanner for previously generated service files.
//!
//! Only what the merge needs: the package/import header, top-level
//! function declarations with their attached comment group, and the
//! remaining top-level text (`const`, `var`, `type`, free comments). Braces
//! inside strings, runes and comments are ignored.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Ident,
    Literal,
    Comment,
    Punct(u8),
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

/// A top-level `func` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFunction {
    pub name: String,
    /// Comment group directly above the declaration (no blank line between).
    pub leading_comment: Option<String>,
    /// From `func` up to and including the opening brace of the body.
    pub signature: String,
    /// Text between the body braces.
    pub body: String,
    /// From `func` up to and including the closing brace.
    pub text: String,
    /// Byte range of the name inside `text`.
    name_range: Range<usize>,
    /// Byte range in the source, leading comment included.
    span: Range<usize>,
}

impl GoFunction {
    /// The declaration text with its name replaced.
    pub fn renamed(&self, new_name: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + new_name.len());
        out.push_str(&self.text[..self.name_range.start]);
        out.push_str(new_name);
        out.push_str(&self.text[self.name_range.end..]);
        out
    }
}

/// Scanned view of a Go file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoSource {
    /// Everything up to the end of the last import declaration (or of the
    /// package clause). `None` without a package clause.
    pub header: Option<String>,
    pub package: Option<String>,
    pub functions: Vec<GoFunction>,
    /// Top-level text between functions that is not a function, trimmed,
    /// in source order.
    pub declarations: Vec<String>,
}

impl GoSource {
    pub fn parse(src: &str) -> Self {
        let tokens = tokenize(src);
        let (header_end, header, package) = match parse_header(src, &tokens) {
            Some((end, package)) => (end, Some(src[..end].to_string()), Some(package)),
            None => (0, None, None),
        };
        let functions = parse_functions(src, &tokens);
        let declarations = declarations_between(src, header_end, &functions);
        Self {
            header,
            package,
            functions,
            declarations,
        }
    }
}

fn declarations_between(src: &str, header_end: usize, functions: &[GoFunction]) -> Vec<String> {
    let mut declarations = Vec::new();
    let mut cursor = header_end;

    let gaps = functions
        .iter()
        .map(|f| f.span.clone())
        .chain(std::iter::once(src.len()..src.len()));
    for span in gaps {
        let gap = src.get(cursor..span.start).unwrap_or_default().trim();
        if !gap.is_empty() {
            declarations.push(gap.to_string());
        }
        cursor = cursor.max(span.end);
    }

    declarations
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn tokenize(src: &str) -> Vec<Token> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let start = i;

        let kind = match b {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = find_from(bytes, i, b"\n").unwrap_or(bytes.len());
                TokenKind::Comment
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = find_from(bytes, i + 2, b"*/").map_or(bytes.len(), |p| p + 2);
                TokenKind::Comment
            }
            b'"' | b'\'' => {
                i = skip_quoted(bytes, i, b);
                TokenKind::Literal
            }
            b'`' => {
                i = find_from(bytes, i + 1, b"`").map_or(bytes.len(), |p| p + 1);
                TokenKind::Literal
            }
            _ if is_ident_byte(b) => {
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                TokenKind::Ident
            }
            _ => {
                i += 1;
                TokenKind::Punct(b)
            }
        };

        tokens.push(Token { kind, start, end: i });
    }

    tokens
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// End of an interpreted string or rune literal. Stops at a newline when
/// the literal is unterminated.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn text<'a>(src: &'a str, token: &Token) -> &'a str {
    &src[token.start..token.end]
}

/// Index of the token closing the group opened at `open`.
fn matching(tokens: &[Token], open: usize, open_b: u8, close_b: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::Punct(b) if b == open_b => depth += 1,
            TokenKind::Punct(b) if b == close_b => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns the byte end of the header and the package name.
fn parse_header(src: &str, tokens: &[Token]) -> Option<(usize, String)> {
    let code: Vec<(usize, &Token)> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind != TokenKind::Comment)
        .collect();

    let (_, keyword) = code.first()?;
    let (_, name) = code.get(1)?;
    if keyword.kind != TokenKind::Ident || text(src, keyword) != "package" || name.kind != TokenKind::Ident {
        return None;
    }
    let package = text(src, name).to_string();
    let mut end = name.end;
    let mut pos = 2;

    while let Some((_, token)) = code.get(pos) {
        if token.kind != TokenKind::Ident || text(src, token) != "import" {
            break;
        }
        let Some((index, next)) = code.get(pos + 1) else {
            break;
        };

        if next.kind == TokenKind::Punct(b'(') {
            let close = matching(tokens, *index, b'(', b')')?;
            end = tokens[close].end;
            pos = code.iter().position(|(i, _)| *i > close).unwrap_or(code.len());
        } else {
            // import [alias] "path"
            let literal = code[pos + 1..]
                .iter()
                .take(2)
                .position(|(_, t)| t.kind == TokenKind::Literal)?;
            end = code[pos + 1 + literal].1.end;
            pos += 2 + literal;
        }
    }

    Some((end, package))
}

fn is_attached(src: &str, end: usize, start: usize) -> bool {
    let gap = &src[end..start];
    gap.trim().is_empty() && gap.matches('\n').count() <= 1
}

fn parse_functions(src: &str, tokens: &[Token]) -> Vec<GoFunction> {
    let mut functions = Vec::new();
    let mut group: Option<(usize, usize)> = None;
    let mut depth = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        match token.kind {
            TokenKind::Comment if depth == 0 => {
                group = match group {
                    Some((start, end)) if is_attached(src, end, token.start) => Some((start, token.end)),
                    _ => Some((token.start, token.end)),
                };
                i += 1;
                continue;
            }
            TokenKind::Punct(b'{') | TokenKind::Punct(b'(') | TokenKind::Punct(b'[') => depth += 1,
            TokenKind::Punct(b'}') | TokenKind::Punct(b')') | TokenKind::Punct(b']') => {
                depth = depth.saturating_sub(1)
            }
            TokenKind::Ident if depth == 0 && text(src, &token) == "func" => {
                let leading = group.filter(|(_, end)| is_attached(src, *end, token.start));
                if let Some((function, close)) = parse_function(src, tokens, i, leading) {
                    functions.push(function);
                    group = None;
                    i = close + 1;
                    continue;
                }
            }
            _ => {}
        }
        group = None;
        i += 1;
    }

    functions
}

fn parse_function(
    src: &str,
    tokens: &[Token],
    func: usize,
    leading: Option<(usize, usize)>,
) -> Option<(GoFunction, usize)> {
    let mut next = func + 1;
    while tokens.get(next)?.kind == TokenKind::Comment {
        next += 1;
    }
    // Method receiver.
    if tokens[next].kind == TokenKind::Punct(b'(') {
        next = matching(tokens, next, b'(', b')')? + 1;
        while tokens.get(next)?.kind == TokenKind::Comment {
            next += 1;
        }
    }
    let name = tokens.get(next)?;
    if name.kind != TokenKind::Ident {
        return None;
    }

    let mut depth = 0usize;
    let mut open = None;
    for (i, token) in tokens.iter().enumerate().skip(next + 1) {
        match token.kind {
            TokenKind::Punct(b'(') | TokenKind::Punct(b'[') => depth += 1,
            TokenKind::Punct(b')') | TokenKind::Punct(b']') => depth = depth.saturating_sub(1),
            TokenKind::Punct(b'{') if depth == 0 => {
                open = Some(i);
                break;
            }
            _ => {}
        }
    }
    let open = open?;
    let close = matching(tokens, open, b'{', b'}')?;

    let start = tokens[func].start;
    let end = tokens[close].end;
    let function = GoFunction {
        name: text(src, name).to_string(),
        leading_comment: leading.map(|(from, to)| src[from..to].to_string()),
        signature: src[start..tokens[open].end].to_string(),
        body: src[tokens[open].end..tokens[close].start].to_string(),
        text: src[start..end].to_string(),
        name_range: name.start - start..name.end - start,
        span: leading.map_or(start, |(from, _)| from)..end,
    };
    Some((function, close))
}
