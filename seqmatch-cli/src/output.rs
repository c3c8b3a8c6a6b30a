//! Formatting of metric values and match context lines.

use seqmatch_core::stats::ListMetric;
use seqmatch_core::MatchContext;

/// Formats a ratio as a percentage with two decimals, rounding half up.
pub fn format_percentage(ratio: f64) -> String {
    // Scale to hundredths of a percent; f64::round is half away from zero,
    // which matches half-up for the non-negative ratios used here.
    let scaled = (ratio * 10_000.0).round() as i64;
    format!("{}.{:02}%", scaled / 100, scaled % 100)
}

/// Formats a metric value: percentages with two decimals, counts as plain
/// integers.
pub fn format_metric_value(metric: ListMetric, value: f64) -> String {
    if metric.is_percentage() {
        format_percentage(value)
    } else {
        format!("{}", value.round() as i64)
    }
}

/// Renders one side of a match context: the identifier, the context tokens
/// separated by spaces, and the match span wrapped in brackets.
pub fn render_context_line(
    identifier: &str,
    tokens: &[String],
    match_start: usize,
    match_length: usize,
) -> String {
    let mut line = String::with_capacity(identifier.len() + 2 + tokens.len() * 8);
    line.push_str(identifier);
    line.push_str(": ");
    let match_end = match_start + match_length;
    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            line.push(' ');
        }
        if index == match_start {
            line.push('[');
        }
        line.push_str(token);
        if index + 1 == match_end {
            line.push(']');
        }
    }
    line
}

/// Renders both sides of a match context.
pub fn render_context(first_id: &str, second_id: &str, context: &MatchContext) -> [String; 2] {
    [
        render_context_line(
            first_id,
            &context.first_tokens,
            context.first_match_start,
            context.length,
        ),
        render_context_line(
            second_id,
            &context.second_tokens,
            context.second_match_start,
            context.length,
        ),
    ]
}
