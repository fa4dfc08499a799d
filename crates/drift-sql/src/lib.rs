//! SQL lexical helpers: identifier quoting and string literal escaping.
//!
//! Every DDL statement the catalog emits goes through these, so quoting
//! policy lives in exactly one place.

use std::fmt;

/// A PostgreSQL identifier wrapper.
///
/// Display writes the value double-quoted, with embedded double quotes
/// doubled.
///
/// # Example
/// ```
/// use drift_sql::Ident;
/// assert_eq!(format!("{}", Ident("user")), "\"user\"");
/// assert_eq!(format!("{}", Ident("we\"ird")), "\"we\"\"ird\"");
/// ```
pub struct Ident<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.as_ref().replace('"', "\"\""))
    }
}

/// A PostgreSQL string literal wrapper.
///
/// Display writes the value single-quoted, with embedded single quotes
/// doubled.
///
/// # Example
/// ```
/// use drift_sql::Lit;
/// assert_eq!(format!("{}", Lit("active")), "'active'");
/// assert_eq!(format!("{}", Lit("it's")), "'it''s'");
/// ```
pub struct Lit<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> fmt::Display for Lit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0.as_ref().replace('\'', "''"))
    }
}

/// Quote a PostgreSQL identifier.
///
/// Always quotes, so reserved keywords (`user`, `order`, `table`, …) never
/// need special-casing at call sites.
pub fn quote_ident(name: &str) -> String {
    Ident(name).to_string()
}

/// Escape a string as a SQL literal.
pub fn escape_string(s: &str) -> String {
    Lit(s).to_string()
}

/// Quote a schema-qualified name (`"schema"."name"`).
pub fn qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", Ident(schema), Ident(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_reserved_word() {
        assert_eq!(quote_ident("user"), "\"user\"");
        assert_eq!(quote_ident("order"), "\"order\"");
    }

    #[test]
    fn test_quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_escape_string_doubles_embedded_quotes() {
        assert_eq!(escape_string("o'clock"), "'o''clock'");
    }

    #[test]
    fn test_qualified() {
        assert_eq!(qualified("public", "account"), "\"public\".\"account\"");
    }
}
