// SPDX-License-Identifier: Apache-2.0

/// Builds a `to_tsquery('simple', ...)` expression from free text (§4.E
/// rule 2, §9 tokenization policy): lowercase, replace non-word characters
/// with spaces, keep tokens longer than 2 characters, join with `&`.
pub fn build_tsquery(query_text: &str) -> String {
    query_text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.len() > 2)
        .collect::<Vec<_>>()
        .join(" & ")
}
