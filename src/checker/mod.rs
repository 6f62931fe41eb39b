/// Fixed-order clause-by-clause equivalence comparison.
pub mod compare;
/// Entry points wiring normalization, extraction, and comparison together.
pub mod validate;
/// Verdict record and the closed set of mismatch reasons.
pub mod verdict;
