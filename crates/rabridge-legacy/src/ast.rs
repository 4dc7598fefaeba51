//! Parsed form of a legacy script

use rabridge_ir::BackendTarget;
use serde::{Deserialize, Serialize};

/// One recognized script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Open(String),
    Filter(String),
    Select(Vec<String>),
    TimeWindow(String),
    /// `lane` is `None` without a `lane=` token, `Some("")` for a bare `lane=`
    Route {
        target: BackendTarget,
        lane: Option<String>,
    },
}

/// Flat accumulation of every directive in a script.
///
/// Filters are raw text and are never parsed into predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyScript {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub filters: Vec<String>,
    pub select_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_target: Option<BackendTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_lane: Option<String>,
}

impl LegacyScript {
    /// Fold one directive into the script state
    pub fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Open(table) => self.table = Some(table),
            Directive::Filter(expr) => self.filters.push(expr),
            Directive::Select(columns) => self.select_columns.extend(columns),
            Directive::TimeWindow(window) => self.time_window = Some(window),
            Directive::Route { target, lane } => {
                self.route_target = Some(target);
                // A route line without a lane token keeps the earlier one; `lane=` clears it
                if let Some(lane) = lane {
                    self.route_lane = Some(lane).filter(|lane| !lane.is_empty());
                }
            }
        }
    }
}
