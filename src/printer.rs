use crate::types::Value;
use itertools::Itertools;

/// Render a value back to lisp-readable text. HTML fragments are ordinary
/// strings and print verbatim.
pub fn pr_str(object: &Value) -> String {
    match object {
        Value::List(elements) => format!("({})", elements.iter().map(pr_str).join(" ")),
        _ => object.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_str;

    #[test]
    fn numbers_round_trip() {
        for token in &["0", "42", "-7", "3.5", "-0.25"] {
            assert_eq!(pr_str(&read_str(token).unwrap()), *token);
        }
    }

    #[test]
    fn lists_are_space_joined_and_parenthesised() {
        let form = read_str("(+ 1 (* 2 3))").unwrap();
        assert_eq!(pr_str(&form), "(+ 1 (* 2 3))");
    }

    #[test]
    fn fragments_print_without_quoting() {
        let fragment = Value::Str("<p>hi</p>".into());
        assert_eq!(pr_str(&fragment), "<p>hi</p>");
    }

    #[test]
    fn nil_prints_as_nil() {
        assert_eq!(pr_str(&Value::Nil), "nil");
    }
}
