//! # Query Text Sanitization
//!
//! Client-supplied search text ends up inside a `LIKE` pattern. Two things
//! must hold for that to be safe:
//!
//! - the text cannot break out of a quoted SQL literal (`sanitize`)
//! - `%`, `_` and the escape character itself match literally (`escape_like`)
//!
//! Queries bind the pattern as a parameter; the quoted rendering exists for
//! logging the effective statement.

/// Quoting character for SQL string literals
const QUOTE: char = '\'';

/// Escape character declared in `LIKE ... ESCAPE '\'`
pub const LIKE_ESCAPE: char = '\\';

/// Double every single quote so the text can sit inside `'...'`.
pub fn sanitize(text: &str) -> String {
    text.replace(QUOTE, "''")
}

/// Escape `LIKE` wildcards so the text is matched as-is.
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// A `LIKE` pattern matching any value that contains a substring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    pattern: String,
}

impl LikePattern {
    /// Containment pattern: `%<escaped text>%`
    pub fn contains(substring: &str) -> Self {
        Self {
            pattern: format!("%{}%", escape_like(substring)),
        }
    }

    /// Pattern value for bound parameter substitution
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Pattern as a quoted SQL literal
    pub fn to_sql_literal(&self) -> String {
        format!("{QUOTE}{}{QUOTE}", sanitize(&self.pattern))
    }
}
