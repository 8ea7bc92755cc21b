//! Name search helpers.
//!
//! Lives in `core` so the repository layer and the handlers agree on what
//! counts as "no search".

/// Normalize a raw `search` query value. Blank input means no filter.
pub fn normalize_term(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|t| !t.is_empty())
}

/// Build an `ILIKE` pattern matching `term` as a literal substring.
///
/// `%`, `_` and `\` are escaped with `\`, PostgreSQL's default `LIKE` escape.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
