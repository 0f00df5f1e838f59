//! Small string helpers shared by the store codecs and the filters.

/// Key normalization used for ids and project codes: surrounding
/// whitespace is never significant.
pub fn norm_key(s: &str) -> String {
    s.trim().to_string()
}

/// Email normalization: lowercased and trimmed, as stored in `Usuarios`.
pub fn norm_email(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive "contains" used by the free-text filters.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Deduplicate while keeping the first occurrence order, dropping empty
/// entries. Config lists are read through this.
pub fn dedup_non_empty(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for v in values {
        let v = v.trim().to_string();
        if v.is_empty() {
            continue;
        }
        if seen.insert(v.clone()) {
            out.push(v);
        }
    }
    out
}
