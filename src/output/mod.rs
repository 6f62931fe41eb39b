/// Plain-text and JSON rendering of verdicts and clause breakdowns.
pub mod formatter;
