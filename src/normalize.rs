//! Accent folding for Vietnamese search keys.
//!
//! `normalize` turns a display string into the key used on both sides of a
//! match: "Phường Hà Đông" → "phuong ha dong".

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a string to its lower-cased, diacritic-free search key.
///
/// 1. Lowercase
/// 2. NFD decompose (base character + combining marks)
/// 3. Drop every combining mark
/// 4. Replace the stroked `đ` (and `Đ`) with `d`
///
/// Lowercasing first keeps the function idempotent: some uppercase letters
/// (e.g. `İ`) lowercase into a base letter plus a combining mark, which the
/// later steps then remove.
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            other => other,
        })
        .collect()
}
