//! Environment variable helpers used by configuration loaders.

/// Return the first non-empty value among the given environment variables.
///
/// # Examples
///
/// ```
/// use rustsign_core::env_var;
///
/// assert_eq!(env_var(&["RUSTSIGN_DOC_SURELY_UNSET"]), None);
/// ```
#[must_use]
pub fn env_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

/// Read a comma-separated list from an environment variable.
///
/// Entries are trimmed and blank entries dropped. Returns `None` when the
/// variable is unset.
#[must_use]
pub fn env_list(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|raw| split_list(&raw))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
