//! Legacy script front end
//!
//! Converts the small imperative script language (`OPEN`, `FILTER`, `SELECT`,
//! `TIME WINDOW`, `ROUTE`) into SQL text with the same hint syntax the IR
//! compiler emits. Filters stay opaque text; they are never parsed.

pub mod ast;
mod parser;
mod render;

pub use ast::{Directive, LegacyScript};
pub use parser::{normalize_target, parse, parse_directive};

use rabridge_ir::{RouteHint, TimeBlockHint};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("Legacy script missing OPEN statement")]
    MissingSourceTable,
}

/// Translated SQL plus the hints and source it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTranslation {
    pub sql: String,
    pub metadata: LegacyMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_block: Option<TimeBlockHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteHint>,
    pub original_script: String,
}

/// Parse and render a legacy script
pub fn translate(script: &str) -> Result<LegacyTranslation, LegacyError> {
    let parsed = parse(script);
    let sql = parsed.to_sql()?;

    debug!(
        filters = parsed.filters.len(),
        columns = parsed.select_columns.len(),
        "translated legacy script"
    );

    Ok(LegacyTranslation {
        sql,
        metadata: LegacyMetadata {
            time_block: parsed.time_block(),
            route: parsed.route(),
            original_script: script.to_string(),
        },
    })
}
