//! Collision-resistant stored-name derivation.
//!
//! Every upload gets a fresh stored name: the sanitized requested name with
//! a random suffix inserted before the extension. The suffix carries 64 bits
//! of randomness, so two uploads of the same name (even with identical
//! content) produce different stored names without a retry loop.

use rand::Rng;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;

/// Number of random bytes in the suffix (rendered as 16 hex characters).
const SUFFIX_BYTES: usize = 8;

/// Derive a unique, filesystem-safe stored name from a user-supplied name.
///
/// The result contains no path separators and cannot escape the storage
/// root. Fails with a validation error when nothing usable remains after
/// sanitization.
pub fn unique_name(requested: &str) -> AppResult<String> {
    let clean = sanitize(requested);
    if clean.is_empty() {
        return Err(AppError::validation(format!(
            "Unusable file name: {requested:?}"
        )));
    }

    let suffix = random_suffix();
    Ok(match clean.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{stem}_{suffix}.{ext}")
        }
        _ => format!("{clean}_{suffix}"),
    })
}

/// Strip path components and reduce to a conservative character set.
///
/// Keeps ASCII alphanumerics plus `.`, `-`, and `_`; everything else maps
/// to `_`. Leading dots are dropped so the result can never be a hidden
/// file or a `..` component.
fn sanitize(requested: &str) -> String {
    let base = requested
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

fn random_suffix() -> String {
    let bytes: [u8; SUFFIX_BYTES] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
