//! Expression compiler: relational algebra IR → SQL statement body

use rabridge_ir::{Join, Projection, RaExpression, Selection};
use tracing::trace;

use crate::clause::WhereClause;
use crate::condition::compile_condition;
use crate::error::{CompileError, Result};
use crate::resolve::{render_table_ref, resolve_table};

/// Recursive translator for [`RaExpression`] trees.
///
/// Output is the statement body only; hints are appended by [`crate::Bridge`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlCompiler;

impl SqlCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile an expression to `SELECT … FROM … [JOIN …] [WHERE …]`
    pub fn compile(&self, expr: &RaExpression) -> Result<String> {
        trace!(kind = expr.kind(), "compiling expression");

        match expr {
            RaExpression::Table(table) => Ok(format!("SELECT *\nFROM {}", render_table_ref(table))),
            RaExpression::Projection(projection) => self.compile_projection(projection),
            RaExpression::Selection(selection) => self.compile_selection(selection),
            RaExpression::Join(join) => self.compile_join(join),
        }
    }

    fn compile_projection(&self, projection: &Projection) -> Result<String> {
        let from = self.from_clause(&projection.from)?;
        let columns = if projection.columns.is_empty() {
            "*".to_string()
        } else {
            projection.columns.join(", ")
        };
        let filter = self.extract_where(&projection.from);

        Ok(assemble(&format!("SELECT {}", columns), &from, &filter))
    }

    fn compile_selection(&self, selection: &Selection) -> Result<String> {
        let from = self.from_clause(&selection.from)?;
        let filter = self
            .extract_where(&selection.from)
            .and(WhereClause::from_condition(&selection.predicate));

        Ok(assemble("SELECT *", &from, &filter))
    }

    fn compile_join(&self, join: &Join) -> Result<String> {
        let from = self.join_clause(join)?;
        let filter = self
            .extract_where(&join.left)
            .and(self.extract_where(&join.right));

        Ok(assemble("SELECT *", &from, &filter))
    }

    /// `FROM <left>\n<TYPE> JOIN <right> ON <on>`, both sides reduced to base tables
    fn join_clause(&self, join: &Join) -> Result<String> {
        let left = resolve_table(&join.left)?;
        let right = resolve_table(&join.right)?;

        Ok(format!(
            "FROM {}\n{} JOIN {} ON {}",
            render_table_ref(left),
            join.join_type.as_sql(),
            render_table_ref(right),
            compile_condition(&join.on)
        ))
    }

    /// Derive the FROM clause for the input of a selection or projection.
    ///
    /// A join is only rebuilt when it is the immediate input. Wrapper chains
    /// are unwrapped to their base table; a join found beneath them is rejected.
    fn from_clause(&self, input: &RaExpression) -> Result<String> {
        match input {
            RaExpression::Table(table) => Ok(format!("FROM {}", render_table_ref(table))),
            RaExpression::Join(join) => self.join_clause(join),
            RaExpression::Selection(_) | RaExpression::Projection(_) => {
                let table = resolve_table(input).map_err(|_| CompileError::UnsupportedFromClause {
                    found: input.kind(),
                })?;
                Ok(format!("FROM {}", render_table_ref(table)))
            }
        }
    }

    /// Predicates accumulated beneath `expr`, inner before outer, left before right.
    ///
    /// Join `on` conditions are never folded in.
    fn extract_where(&self, expr: &RaExpression) -> WhereClause {
        match expr {
            RaExpression::Table(_) => WhereClause::empty(),
            RaExpression::Selection(selection) => self
                .extract_where(&selection.from)
                .and(WhereClause::from_condition(&selection.predicate)),
            RaExpression::Projection(projection) => self.extract_where(&projection.from),
            RaExpression::Join(join) => self
                .extract_where(&join.left)
                .and(self.extract_where(&join.right)),
        }
    }
}

fn assemble(select: &str, from: &str, filter: &WhereClause) -> String {
    let mut lines = vec![select.to_string(), from.to_string()];
    lines.extend(filter.render());
    lines.join("\n")
}
