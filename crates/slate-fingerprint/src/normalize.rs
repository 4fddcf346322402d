#![deny(unsafe_code)]

/// Normalize a header for schema identity.
///
/// Lowercases, maps every non-alphanumeric rune to `_`, collapses runs, and
/// trims leading/trailing underscores. `"Total Revenue (EUR)"` becomes
/// `"total_revenue_eur"`.
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Normalized header split into tokens for similarity scoring.
pub fn tokens(raw: &str) -> Vec<String> {
    normalize_header(raw)
        .split('_')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
