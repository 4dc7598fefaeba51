//! Facade joining the compiled statement with its hint lines

use rabridge_ir::{BridgeOptions, BridgeRequest, RaExpression};
use tracing::debug;

use crate::compiler::SqlCompiler;
use crate::error::Result;
use crate::hints::emit_hints;

#[derive(Debug, Clone, Default)]
pub struct Bridge {
    compiler: SqlCompiler,
}

impl Bridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statement body followed by hint lines, newline separated.
    ///
    /// Deterministic: the same input always produces byte-identical output.
    pub fn to_sql(&self, expr: &RaExpression, options: &BridgeOptions) -> Result<String> {
        let body = self.compiler.compile(expr)?;
        let hints = emit_hints(options);

        let mut parts = Vec::with_capacity(1 + hints.len());
        if !body.is_empty() {
            parts.push(body);
        }
        let hint_count = hints.len();
        parts.extend(hints);
        let sql = parts.join("\n");

        debug!(
            kind = expr.kind(),
            hints = hint_count,
            bytes = sql.len(),
            "compiled relational expression"
        );
        Ok(sql)
    }

    pub fn translate(&self, request: &BridgeRequest) -> Result<String> {
        self.to_sql(&request.expression, &request.options)
    }
}

/// Compile `expr` with `options` using a default [`Bridge`]
pub fn to_sql(expr: &RaExpression, options: &BridgeOptions) -> Result<String> {
    Bridge::new().to_sql(expr, options)
}
