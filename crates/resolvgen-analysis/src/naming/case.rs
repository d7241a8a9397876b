//! Camel-case word splitting and acronym re-casing.

/// Character class used to find word boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_lowercase() {
            Self::Lower
        } else if c.is_uppercase() {
            Self::Upper
        } else if c.is_numeric() {
            Self::Digit
        } else {
            Self::Other
        }
    }
}

/// Split an identifier into words at case, digit and punctuation boundaries.
///
/// Runs of upper-case letters stay together except for their last letter
/// when a lower-case run follows: `HTTPServer` → `HTTP`, `Server`;
/// `userApiId` → `user`, `Api`, `Id`; `v2Name` → `v`, `2`, `Name`.
pub fn split_words(identifier: &str) -> Vec<String> {
    let mut runs: Vec<Vec<char>> = Vec::new();
    let mut last_class = None;

    for c in identifier.chars() {
        let class = CharClass::of(c);
        if last_class == Some(class) {
            if let Some(run) = runs.last_mut() {
                run.push(c);
                continue;
            }
        }
        runs.push(vec![c]);
        last_class = Some(class);
    }

    for i in 0..runs.len().saturating_sub(1) {
        let upper_then_lower = runs[i].first().is_some_and(|c| c.is_uppercase())
            && runs[i + 1].first().is_some_and(|c| c.is_lowercase());
        if upper_then_lower {
            if let Some(moved) = runs[i].pop() {
                runs[i + 1].insert(0, moved);
            }
        }
    }

    runs.into_iter()
        .filter(|run| !run.is_empty())
        .map(|run| run.into_iter().collect())
        .collect()
}

/// Split an identifier and upper-case `id`/`api` words.
///
/// Only multi-word identifiers are re-cased: `userApiId` → `userAPIID`,
/// `GetUserIdResponse` → `GetUserIDResponse`, but a lone `id` stays `id`.
pub fn split_and_recase(identifier: &str) -> String {
    let words = split_words(identifier);
    let multi_word = words.len() > 1;

    words
        .into_iter()
        .map(|word| {
            let acronym = word.eq_ignore_ascii_case("id") || word.eq_ignore_ascii_case("api");
            if acronym && multi_word {
                word.to_uppercase()
            } else {
                word
            }
        })
        .collect()
}

/// Upper-case the first character: `getUser` → `GetUser`.
pub fn upper_first(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
