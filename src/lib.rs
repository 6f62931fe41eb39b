//! Decide whether a learner-submitted SQL statement is "the same query" as a reference answer.
#![warn(missing_docs)]

/// Question bank loading and per-question answer checking.
pub mod bank;
/// Clause-by-clause equivalence comparison and verdict types.
pub mod checker;
/// Verdict and clause-breakdown rendering for CLI consumption.
pub mod output;
/// Statement normalization, keyword scanning, and clause extraction.
pub mod parser;
