//! Entry points: validate one submission against one or many references.

use crate::checker::compare::compare;
use crate::checker::verdict::{Verdict, VerdictReason};
use crate::parser::normalize::normalize;
use crate::parser::statement::ParsedStatement;

/// Validate a submitted statement against a single reference statement.
///
/// Total: malformed input never raises. Input that normalizes to an empty
/// string cannot be compared and yields the fixed invalid-input verdict;
/// anything else degrades to ordinary clause mismatches.
pub fn validate(submitted: &str, reference: &str) -> Verdict {
    let user = normalize(submitted);
    let expected = normalize(reference);
    if user.is_empty() || expected.is_empty() {
        return Verdict::mismatch(VerdictReason::InvalidInput);
    }
    if user == expected {
        return Verdict::exact_match();
    }
    compare(
        &ParsedStatement::extract(&user),
        &ParsedStatement::extract(&expected),
    )
}

/// Validate a submission against an ordered set of acceptable references.
///
/// References are tried in order and the first match wins. On exhaustion:
/// an empty reference set yields the generic no-match verdict; a single
/// reference surfaces its specific mismatch feedback; several references
/// yield the generic no-match verdict (which reference's feedback to surface
/// is otherwise arbitrary, so none is).
pub fn validate_any<S: AsRef<str>>(submitted: &str, references: &[S]) -> Verdict {
    if let [reference] = references {
        return validate(submitted, reference.as_ref());
    }
    for reference in references {
        let verdict = validate(submitted, reference.as_ref());
        if verdict.is_valid {
            return verdict;
        }
    }
    Verdict::mismatch(VerdictReason::NoMatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_the_invalid_input_verdict() {
        let verdict = validate("   ;", "SELECT * FROM t");
        assert!(!verdict.is_valid);
        assert_eq!(verdict.reason, VerdictReason::InvalidInput);
    }

    #[test]
    fn identical_normalized_text_is_an_exact_match() {
        let verdict = validate("SELECT * FROM t;", "select  *  from t");
        assert!(verdict.is_valid);
        assert_eq!(verdict.feedback, "Perfect match!");
    }
}
