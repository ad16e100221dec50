//! Configuration key conventions
//!
//! Hierarchical keys use `:` between sections (`logging:level`). Sources
//! that cannot carry a colon in their names (file names on *nix hosts,
//! environment variables) encode it as a double underscore.

/// Separator between sections of a hierarchical configuration key
pub const KEY_DELIMITER: &str = ":";

/// Encoding of [`KEY_DELIMITER`] in file and variable names
pub const ENCODED_DELIMITER: &str = "__";

/// Turn a raw entry name into a configuration key.
///
/// Every `__` becomes `:`, scanning left to right without overlap. Single
/// underscores are kept, so an odd run keeps its trailing underscore:
/// `a___b` becomes `a:_b` and `a_____b` becomes `a::_b`. Case is preserved.
pub fn normalize_key(name: &str) -> String {
    name.replace(ENCODED_DELIMITER, KEY_DELIMITER)
}

/// Case-folded form of a key, used for comparisons
pub(crate) fn fold_key(key: &str) -> String {
    key.to_lowercase()
}

/// Join section names into a hierarchical key
pub fn combine<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(KEY_DELIMITER)
}
