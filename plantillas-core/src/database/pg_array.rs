//! Parser for PostgreSQL's textual array output (`{a,b,"c d"}`).
//!
//! Deliberately lenient: any input produces a list. Elements are split on
//! every comma, so quoted elements that themselves contain commas are not
//! reassembled.

/// Parse a one-dimensional array literal into its elements.
///
/// Enclosing braces are trimmed, an empty body yields an empty list, and
/// each element has its surrounding double quotes removed.
pub fn parse_pg_array(input: &str) -> Vec<String> {
    let body = input.trim_matches(|c| c == '{' || c == '}');
    if body.is_empty() {
        return Vec::new();
    }

    body.split(',')
        .map(|part| part.trim_matches('"').to_string())
        .collect()
}
