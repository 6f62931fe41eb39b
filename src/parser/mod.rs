/// Per-fragment canonicalization: aliases, table qualifiers, quoting, whitespace.
pub mod fragments;
/// Statement-level textual canonicalization and trivial-predicate removal.
pub mod normalize;
/// Depth-aware keyword scanning over normalized statement text.
pub mod scanner;
/// Clause extraction into a typed [`statement::ParsedStatement`].
pub mod statement;
