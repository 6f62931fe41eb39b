//! Quiz question bank: questions grouped by difficulty, each with one or
//! more accepted reference answers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::checker::validate::validate_any;
use crate::checker::verdict::Verdict;

/// Difficulty tier of a quiz question.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Single-table, single-clause questions.
    Easy,
    /// Filtering, grouping, and sorting.
    Medium,
    /// Joins and aggregates.
    Hard,
    /// CTEs, window functions, and nested subqueries.
    Complicated,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Complicated => write!(f, "complicated"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "complicated" => Ok(Difficulty::Complicated),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

/// One quiz question with its accepted answers, ordered by preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier used for lookup.
    pub id: String,
    /// Prompt shown to the learner.
    pub prompt: String,
    /// Accepted reference statements; the first match wins.
    pub answers: Vec<String>,
}

/// Questions grouped by difficulty, loaded from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    questions: BTreeMap<Difficulty, Vec<Question>>,
}

impl QuestionBank {
    /// Parse a question bank from its JSON representation.
    pub fn load_from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse question bank: {e}"))
    }

    /// Look up a question by id across all difficulties.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions
            .values()
            .flatten()
            .find(|question| question.id == id)
    }

    /// Iterate over every question with its difficulty.
    pub fn questions(&self) -> impl Iterator<Item = (Difficulty, &Question)> {
        self.questions
            .iter()
            .flat_map(|(difficulty, questions)| {
                questions.iter().map(move |question| (*difficulty, question))
            })
    }

    /// Total number of questions across all difficulties.
    pub fn number_of_questions(&self) -> usize {
        self.questions.values().map(Vec::len).sum()
    }

    /// Validate a submission against the accepted answers of one question.
    ///
    /// Errs only when the question id is unknown; the validation itself is
    /// total and always yields a verdict.
    pub fn check(&self, question_id: &str, submitted: &str) -> Result<Verdict, String> {
        let question = self
            .question(question_id)
            .ok_or_else(|| format!("Unknown question id '{question_id}'"))?;
        Ok(validate_any(submitted, &question.answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn difficulty_parsing_is_case_insensitive() {
        assert_eq!(Difficulty::from_str("EASY"), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("Medium"), Ok(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("hard"), Ok(Difficulty::Hard));
        assert_eq!(
            Difficulty::from_str("complicated"),
            Ok(Difficulty::Complicated)
        );
        let err = Difficulty::from_str("impossible").expect_err("invalid tier should fail");
        assert!(err.contains("Invalid difficulty: impossible"));
    }

    #[test]
    fn malformed_json_surfaces_a_parse_error() {
        let err = QuestionBank::load_from_json("{not json").expect_err("should fail");
        assert!(err.contains("Failed to parse question bank"));
    }
}
