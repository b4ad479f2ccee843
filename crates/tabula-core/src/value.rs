//! Literal quoting for values embedded in statement text.

/// Renders `value` as an SQL string literal.
///
/// The value is wrapped in single quotes and any embedded single quote is
/// doubled, so the literal always ends where the value ends.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    let escaped = value.replace('\'', "''");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value() {
        assert_eq!(quote_literal("Alice"), "'Alice'");
        assert_eq!(quote_literal(""), "''");
        assert_eq!(quote_literal("1"), "'1'");
    }

    #[test]
    fn test_embedded_quotes() {
        assert_eq!(quote_literal("O'Brien"), "'O''Brien'");
        assert_eq!(quote_literal("say \"hi\""), "'say \"hi\"'");
    }

    #[test]
    fn test_injection_stays_inside_literal() {
        assert_eq!(
            quote_literal("'); DROP TABLE users; --"),
            "'''); DROP TABLE users; --'"
        );
    }
}
