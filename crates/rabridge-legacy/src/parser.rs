//! Pest-based directive matcher for legacy scripts

use pest::Parser;
use pest_derive::Parser;
use rabridge_ir::BackendTarget;
use tracing::debug;

use crate::ast::*;

#[derive(Parser)]
#[grammar = "legacy.pest"]
pub struct LegacyParser;

/// Parse a whole script. Blank and unrecognized lines are skipped.
pub fn parse(script: &str) -> LegacyScript {
    let mut state = LegacyScript::default();

    for (index, line) in script.lines().map(str::trim).enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse_directive(line) {
            Some(directive) => state.apply(directive),
            None => debug!(line = index + 1, text = line, "skipping unrecognized legacy line"),
        }
    }

    state
}

/// Match a single trimmed line against the directive grammar
pub fn parse_directive(line: &str) -> Option<Directive> {
    let directive = LegacyParser::parse(Rule::directive, line).ok()?.next()?;
    let op = directive.into_inner().next()?;
    let rule = op.as_rule();
    let rest = op.into_inner().next()?.as_str().trim();

    match rule {
        Rule::open_op => Some(Directive::Open(rest.to_string())),
        Rule::filter_op => Some(Directive::Filter(rest.to_string())),
        Rule::select_op => Some(Directive::Select(
            rest.split(',')
                .map(str::trim)
                .filter(|col| !col.is_empty())
                .map(String::from)
                .collect(),
        )),
        Rule::time_window_op => Some(Directive::TimeWindow(rest.to_string())),
        Rule::route_op => Some(parse_route(rest)),
        _ => None,
    }
}

/// `<TARGET> [lane=<lane>]`, e.g. `BIGQUERY lane=events`
fn parse_route(rest: &str) -> Directive {
    let mut tokens = rest.split_whitespace();
    let target = normalize_target(tokens.next().unwrap_or_default());
    let lane = tokens
        .find(|token| token.starts_with("lane="))
        .map(|token| token.split('=').nth(1).unwrap_or_default().to_string());

    Directive::Route { target, lane }
}

/// Map a legacy target name onto a backend. Unknown names route to BigQuery.
pub fn normalize_target(raw: &str) -> BackendTarget {
    match raw.to_lowercase().as_str() {
        "bigquery" => BackendTarget::BigQuery,
        "cloudsql" | "cloud_sql" | "sql" => BackendTarget::CloudSql,
        "firestore" => BackendTarget::Firestore,
        "gcs" | "storage" => BackendTarget::Gcs,
        _ => BackendTarget::BigQuery,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(parse_directive("open users"), Some(Directive::Open("users".to_string())));
        assert_eq!(
            parse_directive("Time Window LAST_7_DAYS"),
            Some(Directive::TimeWindow("LAST_7_DAYS".to_string()))
        );
    }

    #[test]
    fn test_keyword_needs_trailing_space() {
        assert_eq!(parse_directive("OPEN"), None);
        assert_eq!(parse_directive("OPENED users"), None);
        assert_eq!(parse_directive("SELECTION a"), None);
    }

    #[test]
    fn test_filter_kept_verbatim() {
        assert_eq!(
            parse_directive("FILTER  country = \"BW\" "),
            Some(Directive::Filter("country = \"BW\"".to_string()))
        );
    }

    #[test]
    fn test_select_splits_and_trims() {
        assert_eq!(
            parse_directive("SELECT id,  name ,balance,"),
            Some(Directive::Select(vec![
                "id".to_string(),
                "name".to_string(),
                "balance".to_string(),
            ]))
        );
    }

    #[test]
    fn test_route_with_lane() {
        assert_eq!(
            parse_directive("ROUTE BIGQUERY lane=events"),
            Some(Directive::Route {
                target: BackendTarget::BigQuery,
                lane: Some("events".to_string()),
            })
        );
    }

    #[test]
    fn test_route_lane_stops_at_second_equals() {
        assert_eq!(
            parse_directive("ROUTE gcs priority=high lane=cold=archive"),
            Some(Directive::Route {
                target: BackendTarget::Gcs,
                lane: Some("cold".to_string()),
            })
        );
    }

    #[test]
    fn test_target_aliases() {
        assert_eq!(normalize_target("CLOUD_SQL"), BackendTarget::CloudSql);
        assert_eq!(normalize_target("sql"), BackendTarget::CloudSql);
        assert_eq!(normalize_target("Storage"), BackendTarget::Gcs);
        assert_eq!(normalize_target("firestore"), BackendTarget::Firestore);
        assert_eq!(normalize_target("snowflake"), BackendTarget::BigQuery);
        assert_eq!(normalize_target(""), BackendTarget::BigQuery);
    }

    #[test]
    fn test_parse_skips_noise() {
        let script = "\n  # comment\nOPEN t\n\nDROP TABLE t\nfilter x > 1\n";
        let parsed = parse(script);

        assert_eq!(parsed.table.as_deref(), Some("t"));
        assert_eq!(parsed.filters, vec!["x > 1"]);
    }

    #[test]
    fn test_later_route_keeps_lane() {
        let parsed = parse("ROUTE firestore lane=hot\nROUTE gcs");

        assert_eq!(parsed.route_target, Some(BackendTarget::Gcs));
        assert_eq!(parsed.route_lane.as_deref(), Some("hot"));
    }

    #[test]
    fn test_empty_lane_token() {
        assert_eq!(
            parse_directive("ROUTE gcs lane="),
            Some(Directive::Route {
                target: BackendTarget::Gcs,
                lane: Some(String::new()),
            })
        );
    }

    #[test]
    fn test_empty_lane_clears_earlier_lane() {
        let parsed = parse("ROUTE gcs lane=hot\nROUTE gcs lane=");

        assert_eq!(parsed.route_target, Some(BackendTarget::Gcs));
        assert_eq!(parsed.route_lane, None);
    }
}
