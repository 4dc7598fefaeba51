//! SQL compiler for the rabridge relational algebra IR
//!
//! Translates [`RaExpression`] trees into SQL text and appends the custom
//! `@time` / `@route` hint lines consumed by the downstream router.
//! Compilation is a pure function of its input: no I/O, no shared state.

mod bridge;
mod clause;
mod compiler;
mod condition;
mod error;
mod hints;
mod literal;
mod resolve;

pub use bridge::{to_sql, Bridge};
pub use clause::{merge, WhereClause};
pub use compiler::SqlCompiler;
pub use condition::compile_condition;
pub use error::{CompileError, Result};
pub use hints::{emit_hints, route_hint, time_hint};
pub use literal::encode_literal;
pub use resolve::{render_table_ref, resolve_table};

pub use rabridge_ir::{BridgeOptions, BridgeRequest, RaCondition, RaExpression};
