//! Base table resolution

use rabridge_ir::{Projection, RaExpression, Selection, Table};

use crate::error::{CompileError, Result};

/// Unwrap selection and projection wrappers down to the base table.
///
/// A join has no single input and cannot be reduced to one table.
pub fn resolve_table(expr: &RaExpression) -> Result<&Table> {
    match expr {
        RaExpression::Table(table) => Ok(table),
        RaExpression::Selection(Selection { from, .. })
        | RaExpression::Projection(Projection { from, .. }) => resolve_table(from),
        RaExpression::Join(_) => Err(CompileError::MissingTable { found: "join" }),
    }
}

/// `name`, or `name AS alias`
pub fn render_table_ref(table: &Table) -> String {
    match &table.alias {
        Some(alias) => format!("{} AS {}", table.name, alias),
        None => table.name.clone(),
    }
}
