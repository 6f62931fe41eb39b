//! The structured result of comparing a submitted statement to a reference.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::statement::StatementKind;

/// Which check decided the comparison.
///
/// Produced fresh per comparison call, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictReason {
    /// All checks passed.
    Match,
    /// Statement kinds differ (e.g. SELECT vs DELETE).
    QueryType,
    /// One side uses DISTINCT and the other does not.
    Distinct,
    /// SELECT lists differ beyond aliasing and ordering.
    Select,
    /// FROM table lists differ beyond aliasing and ordering.
    From,
    /// Different number of JOIN clauses.
    JoinCount,
    /// WHERE predicates differ after trivial-form filtering.
    Where,
    /// GROUP BY column lists differ.
    GroupBy,
    /// HAVING predicates differ.
    Having,
    /// Different sets of aggregate functions are used.
    Functions,
    /// ORDER BY lists differ (position is significant here).
    OrderBy,
    /// LIMIT values differ, including present-vs-absent.
    Limit,
    /// Different number of subqueries.
    SubqueryCount,
    /// No reference in a multi-answer set matched.
    NoMatch,
    /// Input too degenerate to compare at all.
    InvalidInput,
}

impl VerdictReason {
    /// Learner-facing prose for this reason.
    pub fn prose(self) -> &'static str {
        match self {
            VerdictReason::Match => "Correct! Your query is semantically equivalent.",
            VerdictReason::QueryType => "Wrong query type",
            VerdictReason::Distinct => "DISTINCT usage differs",
            VerdictReason::Select => "SELECT clause differs",
            VerdictReason::From => "FROM clause differs",
            VerdictReason::JoinCount => "JOIN structure differs",
            VerdictReason::Where => "WHERE clause differs",
            VerdictReason::GroupBy => "GROUP BY clause differs",
            VerdictReason::Having => "HAVING clause differs",
            VerdictReason::Functions => "Aggregate functions differ",
            VerdictReason::OrderBy => "ORDER BY clause differs",
            VerdictReason::Limit => "LIMIT clause differs",
            VerdictReason::SubqueryCount => "Subquery structure differs",
            VerdictReason::NoMatch => "Your query does not match any of the expected answers.",
            VerdictReason::InvalidInput => "Invalid SQL syntax or structure",
        }
    }
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prose())
    }
}

/// Boolean verdict plus learner-facing feedback for one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Whether the submitted statement was accepted.
    pub is_valid: bool,
    /// Machine-readable reason for the verdict.
    pub reason: VerdictReason,
    /// Prose feedback shown to the learner.
    pub feedback: String,
}

impl Verdict {
    /// Both statements normalized to identical text.
    pub fn exact_match() -> Self {
        Self {
            is_valid: true,
            reason: VerdictReason::Match,
            feedback: "Perfect match!".to_string(),
        }
    }

    /// Every clause check passed.
    pub fn equivalent() -> Self {
        Self {
            is_valid: true,
            reason: VerdictReason::Match,
            feedback: VerdictReason::Match.prose().to_string(),
        }
    }

    /// A check failed; feedback is the reason's standard prose.
    pub fn mismatch(reason: VerdictReason) -> Self {
        Self {
            is_valid: false,
            reason,
            feedback: reason.prose().to_string(),
        }
    }

    /// The statement-kind check failed; feedback names the expected kind.
    pub fn wrong_kind(expected: StatementKind) -> Self {
        Self {
            is_valid: false,
            reason: VerdictReason::QueryType,
            feedback: format!("Wrong query type. Expected {expected}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serializes_with_camel_case_keys_and_kebab_case_reasons() {
        let json = serde_json::to_string(&Verdict::mismatch(VerdictReason::GroupBy))
            .expect("verdict should serialize");
        assert!(json.contains(r#""isValid":false"#));
        assert!(json.contains(r#""reason":"group-by""#));
        assert!(json.contains("GROUP BY clause differs"));
    }

    #[test]
    fn wrong_kind_feedback_names_the_expected_kind() {
        let verdict = Verdict::wrong_kind(StatementKind::Delete);
        assert_eq!(verdict.feedback, "Wrong query type. Expected DELETE");
        assert_eq!(verdict.reason, VerdictReason::QueryType);
    }
}
