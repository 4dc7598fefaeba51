//! Hint options attached to a compilation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Backend a query may be routed to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendTarget {
    #[default]
    BigQuery,
    CloudSql,
    Firestore,
    Gcs,
}

impl BackendTarget {
    pub const ALL: [BackendTarget; 4] = [
        BackendTarget::BigQuery,
        BackendTarget::CloudSql,
        BackendTarget::Firestore,
        BackendTarget::Gcs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendTarget::BigQuery => "bigquery",
            BackendTarget::CloudSql => "cloudsql",
            BackendTarget::Firestore => "firestore",
            BackendTarget::Gcs => "gcs",
        }
    }
}

impl fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown backend target: {0} (expected one of bigquery, cloudsql, firestore, gcs)")]
pub struct ParseTargetError(pub String);

impl FromStr for BackendTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTargetError(s.to_string()))
    }
}

/// Opaque time-window expression, e.g. `LAST_7_DAYS`. Never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlockHint {
    pub value: String,
}

impl TimeBlockHint {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHint {
    pub target: BackendTarget,
    /// Opaque routing sub-selector, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane: Option<String>,
}

impl RouteHint {
    pub fn new(target: BackendTarget) -> Self {
        Self { target, lane: None }
    }

    pub fn with_lane(mut self, lane: impl Into<String>) -> Self {
        self.lane = Some(lane.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeOptions {
    #[serde(default, alias = "timeBlock", skip_serializing_if = "Option::is_none")]
    pub time_block: Option<TimeBlockHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteHint>,
}

impl BridgeOptions {
    pub fn with_time_block(mut self, value: impl Into<String>) -> Self {
        self.time_block = Some(TimeBlockHint::new(value));
        self
    }

    pub fn with_route(mut self, route: RouteHint) -> Self {
        self.route = Some(route);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.time_block.is_none() && self.route.is_none()
    }

    /// Fill whichever hints are absent here from `fallback`
    pub fn or(self, fallback: BridgeOptions) -> Self {
        Self {
            time_block: self.time_block.or(fallback.time_block),
            route: self.route.or(fallback.route),
        }
    }
}
