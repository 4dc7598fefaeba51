//! Predicate tree rendering

use rabridge_ir::{RaCondition, Value};

use crate::literal::encode_literal;

/// Render a predicate tree as a boolean SQL expression.
///
/// Connectives are always parenthesized, so the output never depends on
/// operator precedence. No simplification is performed.
pub fn compile_condition(condition: &RaCondition) -> String {
    match condition {
        RaCondition::Eq { column, value } => comparison(column, "=", value),
        RaCondition::Gt { column, value } => comparison(column, ">", value),
        RaCondition::Lt { column, value } => comparison(column, "<", value),
        RaCondition::And { left, right } => connective(left, "AND", right),
        RaCondition::Or { left, right } => connective(left, "OR", right),
    }
}

fn comparison(column: &str, op: &str, value: &Value) -> String {
    format!("{} {} {}", column, op, encode_literal(value))
}

fn connective(left: &RaCondition, keyword: &str, right: &RaCondition) -> String {
    format!(
        "({} {} {})",
        compile_condition(left),
        keyword,
        compile_condition(right)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparisons() {
        assert_eq!(compile_condition(&RaCondition::eq("u.id", 7)), "u.id = 7");
        assert_eq!(compile_condition(&RaCondition::gt("u.age", 18)), "u.age > 18");
        assert_eq!(
            compile_condition(&RaCondition::lt("price", 9.99)),
            "price < 9.99"
        );
        assert_eq!(
            compile_condition(&RaCondition::eq("country", "BW")),
            "country = 'BW'"
        );
    }

    #[test]
    fn test_connectives_parenthesized() {
        let cond = RaCondition::gt("age", 18).and(RaCondition::eq("active", true));
        assert_eq!(compile_condition(&cond), "(age > 18 AND active = TRUE)");

        let cond = RaCondition::eq("a", 1).or(RaCondition::eq("b", Value::Null));
        assert_eq!(compile_condition(&cond), "(a = 1 OR b = NULL)");
    }

    #[test]
    fn test_nested_connectives_keep_structure() {
        let cond = RaCondition::eq("a", 1)
            .or(RaCondition::eq("b", 2))
            .and(RaCondition::lt("c", 3).or(RaCondition::gt("d", 4)));

        assert_eq!(
            compile_condition(&cond),
            "((a = 1 OR b = 2) AND (c < 3 OR d > 4))"
        );
    }
}
