//! Render verdicts and parsed-statement breakdowns for the CLI.

use std::fmt::Write as _;

use crate::checker::verdict::Verdict;
use crate::parser::statement::{AggregateFunction, ParsedStatement};

/// One-line plain-text rendering of a verdict.
pub fn render_text(verdict: &Verdict) -> String {
    let status = if verdict.is_valid { "correct" } else { "incorrect" };
    format!("{status}: {}", verdict.feedback)
}

/// Pretty-printed JSON rendering of a verdict.
pub fn render_json(verdict: &Verdict) -> Result<String, String> {
    serde_json::to_string_pretty(verdict).map_err(|e| format!("Failed to serialize verdict: {e}"))
}

/// Multi-line clause breakdown of a parsed statement, for `--verbose` output.
pub fn render_breakdown(label: &str, parsed: &ParsedStatement) -> String {
    let mut out = format!("{label}: {} query", parsed.kind);
    if parsed.distinct {
        out.push_str(" (distinct)");
    }
    out.push('\n');
    push_list(&mut out, "select", &parsed.select_list);
    push_list(&mut out, "from", &parsed.from_list);
    push_list(&mut out, "joins", &parsed.joins);
    push_list(&mut out, "where", &parsed.where_predicates);
    push_list(&mut out, "group by", &parsed.group_by);
    push_list(&mut out, "having", &parsed.having_predicates);
    push_list(&mut out, "order by", &parsed.order_by);
    if let Some(limit) = parsed.limit {
        let _ = writeln!(out, "  limit: {limit}");
    }
    if !parsed.functions.is_empty() {
        let names: Vec<&str> = parsed
            .functions
            .iter()
            .map(|function| AggregateFunction::name(*function))
            .collect();
        let _ = writeln!(out, "  functions: {}", names.join(", "));
    }
    if parsed.subquery_count > 0 {
        let _ = writeln!(out, "  subqueries: {}", parsed.subquery_count);
    }
    out
}

fn push_list(out: &mut String, name: &str, items: &[String]) {
    if !items.is_empty() {
        let _ = writeln!(out, "  {name}: {}", items.join(", "));
    }
}
