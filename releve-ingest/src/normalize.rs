//! Accent stripping for statement text.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// Remove every combining mark after compatibility decomposition.
///
/// `"Relevé d'échéance"` becomes `"Releve d'echeance"`. Total and idempotent.
pub fn strip_diacritics(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}
