//! WHERE clause accumulation
//!
//! A clause carries only its boolean body. The `WHERE` keyword is added once,
//! when the clause is rendered into a statement.

use rabridge_ir::RaCondition;

use crate::condition::compile_condition;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    body: Option<String>,
}

impl WhereClause {
    /// Clause with no predicate
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    pub fn from_condition(condition: &RaCondition) -> Self {
        Self::new(compile_condition(condition))
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }

    /// Conjoin with `other`, keeping `self` first.
    ///
    /// An empty side yields the other side unchanged.
    pub fn and(self, other: WhereClause) -> WhereClause {
        match (self.body, other.body) {
            (None, None) => WhereClause::empty(),
            (Some(body), None) | (None, Some(body)) => WhereClause::new(body),
            (Some(a), Some(b)) => WhereClause::new(format!("{} AND {}", a, b)),
        }
    }

    /// `WHERE <body>`, or `None` when there is nothing to filter on
    pub fn render(&self) -> Option<String> {
        self.body.as_ref().map(|body| format!("WHERE {}", body))
    }
}

/// Merge two optional fragments; see [`WhereClause::and`]
pub fn merge(a: WhereClause, b: WhereClause) -> WhereClause {
    a.and(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_both_absent() {
        let merged = merge(WhereClause::empty(), WhereClause::empty());
        assert!(merged.is_empty());
        assert_eq!(merged.render(), None);
    }

    #[test]
    fn test_merge_single_side_unchanged() {
        let left = merge(WhereClause::new("a = 1"), WhereClause::empty());
        let right = merge(WhereClause::empty(), WhereClause::new("b = 2"));

        assert_eq!(left.body(), Some("a = 1"));
        assert_eq!(right.body(), Some("b = 2"));
    }

    #[test]
    fn test_merge_keeps_order() {
        let merged = merge(WhereClause::new("a = 1"), WhereClause::new("b = 2"));
        assert_eq!(merged.render().as_deref(), Some("WHERE a = 1 AND b = 2"));
    }

    #[test]
    fn test_chained_merge_is_flat() {
        let merged = WhereClause::new("p1")
            .and(WhereClause::new("p2"))
            .and(WhereClause::empty())
            .and(WhereClause::new("p3"));

        assert_eq!(merged.render().as_deref(), Some("WHERE p1 AND p2 AND p3"));
    }

    #[test]
    fn test_body_never_contains_keyword() {
        let clause = WhereClause::from_condition(&RaCondition::gt("u.age", 18));
        assert_eq!(clause.body(), Some("u.age > 18"));
    }
}
