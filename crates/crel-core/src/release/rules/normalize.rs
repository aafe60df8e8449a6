//! Text normalization for accent-, case- and punctuation-insensitive matching.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for fuzzy comparison.
///
/// Lowercases, decomposes (NFKD) and keeps only ASCII lowercase letters,
/// ASCII digits and ASCII whitespace. Combining marks left over from the
/// decomposition are dropped along with punctuation and any other symbol,
/// so `"Compañía Naviera, S.A."` becomes `"compania naviera sa"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfkd()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_ascii_whitespace())
        .collect()
}
