//! Filename sanitization for cache paths.
//!
//! Package identifiers and version strings come from manifests and feeds, so
//! anything that is not safe in a path component is replaced before they are
//! used as directory or file names.

/// Replace filesystem-invalid characters and whitespace with underscores.
///
/// Keeps alphanumerics, `.`, `-` and `_`; everything else (including path
/// separators and whitespace) becomes `_`.
pub fn sanitize_name(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
