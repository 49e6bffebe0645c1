//! Domain name normalization shared by rules, blocklists and the cache key.

/// Lowercases `name` and strips one trailing root dot.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    trimmed
        .strip_suffix('.')
        .unwrap_or(trimmed)
        .to_ascii_lowercase()
}

/// Normalizes a suffix rule to its stored form, always dot-prefixed.
pub fn normalize_suffix(suffix: &str) -> String {
    let name = normalize_name(suffix);
    if name.starts_with('.') {
        name
    } else {
        format!(".{}", name)
    }
}
