//! String helpers shared by the registry and the parser.

/// Remove a leading `--` or `-` from `s`.
///
/// At most two hyphens are removed, so `---foo` becomes `-foo`.
pub fn strip_leading_hyphens(s: &str) -> &str {
    s.strip_prefix("--")
        .or_else(|| s.strip_prefix('-'))
        .unwrap_or(s)
}

/// Remove one layer of surrounding double quotes.
///
/// Only applies when the string both starts and ends with `"` and contains
/// no other `"`, so `"foo"bar"` is returned unchanged.
pub fn strip_leading_and_trailing_quotes(s: &str) -> &str {
    if s.len() > 1 && s.starts_with('"') && s.ends_with('"') {
        let inner = &s[1..s.len() - 1];
        if !inner.contains('"') {
            return inner;
        }
    }
    s
}
