//! Term normalization shared by file names and language labels

/// Split `text` into lowercase alphanumeric tokens.
///
/// Every character outside `[a-z0-9]` after case folding is a separator,
/// runs of separators collapse and empty tokens are dropped.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokens for a language label, with `-` and `,` read as word breaks
pub fn label_terms(label: &str) -> Vec<String> {
    normalize(&label.replace(['-', ','], " "))
}
