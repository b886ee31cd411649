//! Free-text note merging.

/// Separator placed between merged note fragments.
pub const NOTE_SEPARATOR: &str = " • ";

/// Appends `addition` to `current`, skipping fragments already present.
///
/// Both inputs are trimmed. An addition already contained in `current`
/// (case-insensitively) leaves `current` unchanged, so applying the same
/// addition twice is a no-op after the first time.
pub fn merge_note(current: &str, addition: &str) -> String {
    let current = current.trim();
    let addition = addition.trim();

    if addition.is_empty() {
        return current.to_string();
    }
    if current.is_empty() {
        return addition.to_string();
    }
    if current.to_lowercase().contains(&addition.to_lowercase()) {
        return current.to_string();
    }
    format!("{current}{NOTE_SEPARATOR}{addition}")
}
