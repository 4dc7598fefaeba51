use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Table resolution hit a node with no single `from` input
    #[error("Cannot unwrap table from {found} expression")]
    MissingTable { found: &'static str },

    /// FROM derivation reached a join through selection/projection wrappers
    #[error("Unsupported expression in FROM clause: {found} wraps a join below its immediate input")]
    UnsupportedFromClause { found: &'static str },
}
