//! Trailing `@time` / `@route` annotation lines

use rabridge_ir::{BridgeOptions, RouteHint, TimeBlockHint};

/// Render the hint lines for `options`, time block first, then route.
///
/// Returns an empty vector when no hint is set.
pub fn emit_hints(options: &BridgeOptions) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(time_block) = &options.time_block {
        lines.push(time_hint(time_block));
    }
    if let Some(route) = &options.route {
        lines.push(route_hint(route));
    }
    lines
}

/// `@time(block => <value>)`. The value is inserted verbatim.
pub fn time_hint(hint: &TimeBlockHint) -> String {
    format!("@time(block => {})", hint.value)
}

/// `@route(target => '<target>'[, lane => '<lane>'])`. An empty lane is omitted.
pub fn route_hint(hint: &RouteHint) -> String {
    match &hint.lane {
        Some(lane) if !lane.is_empty() => {
            format!("@route(target => '{}', lane => '{}')", hint.target, lane)
        }
        _ => format!("@route(target => '{}')", hint.target),
    }
}
