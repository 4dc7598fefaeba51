//! Relational algebra intermediate representation (IR)
//!
//! Immutable value trees describing tables, selections, projections and joins,
//! plus the boolean predicate trees they carry. All nodes round-trip through
//! serde with an internal `kind` tag so IR documents can be stored as JSON or YAML.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

mod options;
pub use options::*;

/// A relational algebra expression.
///
/// Closed set of four node kinds. Every non-table node eventually bottoms
/// out in a [`Table`] leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RaExpression {
    Table(Table),
    Selection(Selection),
    Projection(Projection),
    Join(Join),
}

/// Physical relation, optionally aliased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Row filter over `from`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub from: Box<RaExpression>,
    pub predicate: RaCondition,
}

/// Column restriction over `from`. An empty column list renders as `*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub from: Box<RaExpression>,
    #[serde(default)]
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub left: Box<RaExpression>,
    pub right: Box<RaExpression>,
    pub on: RaCondition,
    #[serde(default, alias = "joinType")]
    pub join_type: JoinType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    /// SQL keyword preceding `JOIN`
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Full => "FULL",
        }
    }
}

/// Boolean predicate tree.
///
/// Deliberately minimal: three comparisons and two connectives, no negation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RaCondition {
    Eq {
        column: String,
        #[serde(default)]
        value: Value,
    },
    Gt {
        column: String,
        #[serde(default)]
        value: Value,
    },
    Lt {
        column: String,
        #[serde(default)]
        value: Value,
    },
    And {
        left: Box<RaCondition>,
        right: Box<RaCondition>,
    },
    Or {
        left: Box<RaCondition>,
        right: Box<RaCondition>,
    },
}

/// Primitive literal carried by a comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// NaN and infinities render as `NULL`
    Float(f64),
    String(String),
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

impl RaExpression {
    pub fn table(name: impl Into<String>) -> Self {
        RaExpression::Table(Table::new(name))
    }

    pub fn aliased_table(name: impl Into<String>, alias: impl Into<String>) -> Self {
        RaExpression::Table(Table::aliased(name, alias))
    }

    /// Wrap `self` in a selection filtered by `predicate`
    pub fn select(self, predicate: RaCondition) -> Self {
        RaExpression::Selection(Selection {
            from: Box::new(self),
            predicate,
        })
    }

    /// Wrap `self` in a projection over `columns`
    pub fn project<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RaExpression::Projection(Projection {
            from: Box::new(self),
            columns: columns.into_iter().map(Into::into).collect(),
        })
    }

    /// Inner join of `self` (left) with `right`
    pub fn join(self, right: RaExpression, on: RaCondition) -> Self {
        self.join_with(right, on, JoinType::Inner)
    }

    pub fn join_with(self, right: RaExpression, on: RaCondition, join_type: JoinType) -> Self {
        RaExpression::Join(Join {
            left: Box::new(self),
            right: Box::new(right),
            on,
            join_type,
        })
    }

    /// Node kind as it appears in the serialized `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            RaExpression::Table(_) => "table",
            RaExpression::Selection(_) => "selection",
            RaExpression::Projection(_) => "projection",
            RaExpression::Join(_) => "join",
        }
    }

    /// SHA-256 of the canonical JSON form, for log correlation
    pub fn fingerprint(&self) -> String {
        fingerprint_of(self)
    }
}

impl From<Table> for RaExpression {
    fn from(table: Table) -> Self {
        RaExpression::Table(table)
    }
}

impl RaCondition {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        RaCondition::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        RaCondition::Gt {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        RaCondition::Lt {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn and(self, right: RaCondition) -> Self {
        RaCondition::And {
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    pub fn or(self, right: RaCondition) -> Self {
        RaCondition::Or {
            left: Box::new(self),
            right: Box::new(right),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// A complete compilation request: the expression plus its hint options.
///
/// This is the document shape read by the command-line front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub expression: RaExpression,
    #[serde(default)]
    pub options: BridgeOptions,
}

impl BridgeRequest {
    pub fn new(expression: RaExpression, options: BridgeOptions) -> Self {
        Self { expression, options }
    }

    /// Calculate fingerprint (SHA-256) of expression and options together
    pub fn fingerprint(&self) -> String {
        fingerprint_of(self)
    }
}

fn fingerprint_of<T: Serialize>(value: &T) -> String {
    let mut hasher = Sha256::new();
    serde_json::to_writer(&mut hasher, value).expect("IR should always serialize");
    format!("{:x}", hasher.finalize())
}
