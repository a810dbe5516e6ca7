//! URL helpers: `data:` detection, relative resolution, local name derivation.

mod path;

pub use path::last_segment;

use url::Url;

/// True for `data:` URLs, ignoring ASCII case and leading whitespace.
///
/// `data:` URLs carry their payload inline and are never treated as assets.
pub fn is_data_url(reference: &str) -> bool {
    reference
        .trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Resolves `reference` against `base` with standard relative-URL rules.
///
/// Absolute references come back unchanged (modulo URL normalization).
pub fn resolve_against(base: &Url, reference: &str) -> Result<Url, url::ParseError> {
    base.join(reference)
}
