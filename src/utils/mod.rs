//! Shared text utilities.

/// Normalize display text before it is persisted or compared.
///
/// Lower-cases, replaces the Latin-1 accented vowels and `ñ` with their
/// unaccented equivalents, and strips periods and apostrophes.
pub fn normalize(text: &str) -> String {
    let mut normalized = text.to_lowercase();
    for (from, to) in [
        ("á", "a"),
        ("é", "e"),
        ("í", "i"),
        ("ó", "o"),
        ("ú", "u"),
        ("ñ", "n"),
        (".", ""),
        ("'", ""),
    ] {
        normalized = normalized.replace(from, to);
    }
    normalized
}
