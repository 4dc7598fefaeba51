//! SQL literal rendering

use rabridge_ir::Value;

/// Render a primitive as an SQL literal.
///
/// Strings are single-quoted with embedded quotes doubled. Nothing else is
/// escaped; this is a quoting rule, not an injection guard. Non-finite
/// floats have no SQL literal form and render as `NULL`.
pub fn encode_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) if f.is_finite() => f.to_string(),
        Value::Float(_) => "NULL".to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_unmodified() {
        assert_eq!(encode_literal(&Value::Int(18)), "18");
        assert_eq!(encode_literal(&Value::Int(-3)), "-3");
        assert_eq!(encode_literal(&Value::Float(2.5)), "2.5");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(encode_literal(&Value::Float(f64::NAN)), "NULL");
        assert_eq!(encode_literal(&Value::Float(f64::INFINITY)), "NULL");
        assert_eq!(encode_literal(&Value::Float(f64::NEG_INFINITY)), "NULL");
    }

    #[test]
    fn test_booleans_and_null() {
        assert_eq!(encode_literal(&Value::Bool(true)), "TRUE");
        assert_eq!(encode_literal(&Value::Bool(false)), "FALSE");
        assert_eq!(encode_literal(&Value::Null), "NULL");
    }

    #[test]
    fn test_string_quotes_doubled() {
        assert_eq!(encode_literal(&Value::from("BW")), "'BW'");
        assert_eq!(encode_literal(&Value::from("O'Brien")), "'O''Brien'");
        assert_eq!(encode_literal(&Value::from("''")), "''''''");
    }

    #[test]
    fn test_backslash_passes_through() {
        assert_eq!(encode_literal(&Value::from(r"C:\tmp")), r"'C:\tmp'");
    }
}
