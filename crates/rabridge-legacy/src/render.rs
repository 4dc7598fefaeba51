//! SQL assembly for a parsed legacy script

use rabridge_ir::{BridgeOptions, RouteHint, TimeBlockHint};
use rabridge_sql::emit_hints;

use crate::ast::LegacyScript;
use crate::LegacyError;

impl LegacyScript {
    pub fn time_block(&self) -> Option<TimeBlockHint> {
        self.time_window.as_ref().map(TimeBlockHint::new)
    }

    pub fn route(&self) -> Option<RouteHint> {
        self.route_target.map(|target| RouteHint {
            target,
            lane: self.route_lane.clone(),
        })
    }

    /// Hints carried by the script, in the same shape the IR compiler takes
    pub fn to_bridge_options(&self) -> BridgeOptions {
        BridgeOptions {
            time_block: self.time_block(),
            route: self.route(),
        }
    }

    /// Render `SELECT … FROM … [WHERE …]` plus hint lines.
    ///
    /// Filters are joined with `AND` in encounter order, copied verbatim.
    pub fn to_sql(&self) -> Result<String, LegacyError> {
        let table = self.table.as_deref().ok_or(LegacyError::MissingSourceTable)?;

        let columns = if self.select_columns.is_empty() {
            "*".to_string()
        } else {
            self.select_columns.join(", ")
        };

        let mut parts = vec![format!("SELECT {}", columns), format!("FROM {}", table)];
        if !self.filters.is_empty() {
            parts.push(format!("WHERE {}", self.filters.join(" AND ")));
        }
        parts.extend(emit_hints(&self.to_bridge_options()));

        Ok(parts.join("\n"))
    }
}
