// Writer identifier derivation

/// Separator placed between alphanumeric runs
pub const SEPARATOR: char = '-';

/// Derive a stable identifier token from a human-readable name.
///
/// Every maximal run of characters outside `[A-Za-z0-9]` collapses into a
/// single `-`, the result is lowercased, and leading/trailing separators are
/// dropped. Total: a name without any ASCII alphanumeric yields `""`.
pub fn derive_identifier(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
