//! Clause extraction: splitting a normalized statement into typed fragments.

use std::collections::BTreeSet;
use std::fmt;

use crate::parser::normalize::is_trivial_predicate;
use crate::parser::scanner;

/// The detected statement kind, from the first keyword of the statement.
///
/// WITH-prefixed text stays [`StatementKind::Unknown`]: CTE prefixes are
/// passed through as opaque content rather than parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// A `SELECT` query.
    Select,
    /// An `INSERT` statement.
    Insert,
    /// An `UPDATE` statement.
    Update,
    /// A `DELETE` statement.
    Delete,
    /// Anything else, including empty input and CTE-prefixed text.
    #[default]
    Unknown,
}

impl StatementKind {
    fn of(normalized: &str) -> Self {
        match normalized.split_whitespace().next() {
            Some("select") => StatementKind::Select,
            Some("insert") => StatementKind::Insert,
            Some("update") => StatementKind::Update,
            Some("delete") => StatementKind::Delete,
            _ => StatementKind::Unknown,
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementKind::Select => write!(f, "SELECT"),
            StatementKind::Insert => write!(f, "INSERT"),
            StatementKind::Update => write!(f, "UPDATE"),
            StatementKind::Delete => write!(f, "DELETE"),
            StatementKind::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// An aggregate function whose presence anywhere in a statement is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AggregateFunction {
    /// `avg(...)`
    Avg,
    /// `count(...)`
    Count,
    /// `max(...)`
    Max,
    /// `min(...)`
    Min,
    /// `sum(...)`
    Sum,
}

impl AggregateFunction {
    /// Every recognized aggregate function.
    pub const ALL: [Self; 5] = [Self::Avg, Self::Count, Self::Max, Self::Min, Self::Sum];

    /// Lowercase SQL name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Count => "count",
            Self::Max => "max",
            Self::Min => "min",
            Self::Sum => "sum",
        }
    }
}

/// Keywords that terminate a FROM table list.
const FROM_BOUNDARIES: [&str; 9] = [
    "where", "join", "left", "right", "inner", "group by", "order by", "limit", "having",
];
/// Keywords that terminate a JOIN fragment.
const JOIN_BOUNDARIES: [&str; 5] = ["where", "group by", "order by", "limit", "having"];
/// Keywords that terminate a WHERE predicate list.
const WHERE_BOUNDARIES: [&str; 3] = ["group by", "order by", "limit"];
/// Keywords that terminate a GROUP BY column list.
const GROUP_BY_BOUNDARIES: [&str; 3] = ["having", "order by", "limit"];
/// Keywords that terminate a HAVING predicate list.
const HAVING_BOUNDARIES: [&str; 2] = ["order by", "limit"];

/// Typed clause fragments extracted from one normalized statement.
///
/// Every field is derived purely from the normalized text: two statements
/// that normalize identically parse identically. Malformed input yields
/// empty/default fields rather than an error; the comparator treats
/// under-extraction as an ordinary mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStatement {
    /// Statement kind from the leading keyword.
    pub kind: StatementKind,
    /// Whether `distinct` immediately follows the top-level `select`.
    pub distinct: bool,
    /// SELECT list items in source order (order is not compared).
    pub select_list: Vec<String>,
    /// FROM table references in source order.
    pub from_list: Vec<String>,
    /// Raw join fragments (`left join b on a.id = b.id`) in source order.
    pub joins: Vec<String>,
    /// Atomic WHERE predicates, trivial always-true forms already dropped.
    pub where_predicates: Vec<String>,
    /// GROUP BY column fragments.
    pub group_by: Vec<String>,
    /// Atomic HAVING predicates, trivial forms dropped.
    pub having_predicates: Vec<String>,
    /// ORDER BY fragments with their direction suffix (order is compared).
    pub order_by: Vec<String>,
    /// LIMIT row count, when present.
    pub limit: Option<u64>,
    /// Aggregate functions mentioned anywhere in the statement.
    pub functions: BTreeSet<AggregateFunction>,
    /// Number of `(select ...` occurrences anywhere in the statement.
    pub subquery_count: usize,
}

impl ParsedStatement {
    /// Extract clause fragments from an already-normalized statement.
    ///
    /// Clause boundaries are resolved by the nearest following keyword at
    /// parenthesis depth zero, so keywords inside subqueries or string
    /// literals never cut an outer clause short.
    pub fn extract(normalized: &str) -> Self {
        let mut parsed = Self {
            kind: StatementKind::of(normalized),
            ..Self::default()
        };
        if normalized.is_empty() {
            return parsed;
        }

        parsed.extract_select(normalized);
        parsed.extract_from(normalized);
        parsed.extract_joins(normalized);
        parsed.where_predicates = predicate_list(normalized, "where", &WHERE_BOUNDARIES);
        parsed.group_by = column_list(normalized, "group by", &GROUP_BY_BOUNDARIES);
        parsed.having_predicates = predicate_list(normalized, "having", &HAVING_BOUNDARIES);
        parsed.order_by = column_list(normalized, "order by", &["limit"]);
        parsed.extract_limit(normalized);

        for function in AggregateFunction::ALL {
            if mentions_call(normalized, function.name()) {
                parsed.functions.insert(function);
            }
        }
        parsed.subquery_count = count_subqueries(normalized);
        parsed
    }

    fn extract_select(&mut self, text: &str) {
        let Some(select_position) = scanner::find_keyword(text, "select", 0) else {
            return;
        };
        let mut list_start = select_position + "select".len();
        let after = &text[list_start..];
        if after == " distinct" || after.starts_with(" distinct ") {
            self.distinct = true;
            list_start += " distinct".len();
        }
        if let Some(from_position) = scanner::find_keyword(text, "from", list_start) {
            self.select_list = scanner::split_top_level_commas(&text[list_start..from_position]);
        }
    }

    fn extract_from(&mut self, text: &str) {
        let Some(from_position) = scanner::find_keyword(text, "from", 0) else {
            return;
        };
        let list_start = from_position + "from".len();
        let list_end = scanner::find_any_keyword(text, &FROM_BOUNDARIES, list_start)
            .map_or(text.len(), |(position, _)| position);
        self.from_list = scanner::split_top_level_commas(&text[list_start..list_end]);
    }

    fn extract_joins(&mut self, text: &str) {
        let join_positions = scanner::find_all_keywords(text, "join");
        let starts: Vec<usize> = join_positions
            .iter()
            .map(|&position| join_fragment_start(text, position))
            .collect();
        for (index, &join_position) in join_positions.iter().enumerate() {
            let mut end = starts.get(index + 1).copied().unwrap_or(text.len());
            if let Some((boundary, _)) =
                scanner::find_any_keyword(text, &JOIN_BOUNDARIES, join_position + "join".len())
            {
                end = end.min(boundary);
            }
            let fragment = text[starts[index]..end].trim();
            if !fragment.is_empty() {
                self.joins.push(fragment.to_string());
            }
        }
    }

    fn extract_limit(&mut self, text: &str) {
        let Some(limit_position) = scanner::find_keyword(text, "limit", 0) else {
            return;
        };
        let after = text[limit_position + "limit".len()..].trim_start();
        let digits: &str = &after[..after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len())];
        self.limit = digits.parse().ok();
    }
}

/// Start of a join fragment: the `join` keyword walked back over any
/// immediately preceding `left`/`right`/`inner`/`full`/`outer` qualifiers.
fn join_fragment_start(text: &str, join_position: usize) -> usize {
    let mut start = join_position;
    loop {
        let before = text[..start].trim_end();
        if before.is_empty() {
            break;
        }
        let word_start = before.rfind(' ').map_or(0, |space| space + 1);
        match &before[word_start..] {
            "left" | "right" | "inner" | "full" | "outer" => start = word_start,
            _ => break,
        }
    }
    start
}

/// Fragment between `keyword` and the nearest boundary, split into atomic
/// predicates on top-level `and`/`or`, with trivial forms dropped.
fn predicate_list(text: &str, keyword: &str, boundaries: &[&str]) -> Vec<String> {
    clause_fragment(text, keyword, boundaries).map_or_else(Vec::new, |fragment| {
        scanner::split_predicates(&fragment)
            .into_iter()
            .filter(|predicate| !is_trivial_predicate(predicate))
            .collect()
    })
}

/// Fragment between `keyword` and the nearest boundary, split on top-level commas.
fn column_list(text: &str, keyword: &str, boundaries: &[&str]) -> Vec<String> {
    clause_fragment(text, keyword, boundaries)
        .map_or_else(Vec::new, |fragment| scanner::split_top_level_commas(&fragment))
}

fn clause_fragment(text: &str, keyword: &str, boundaries: &[&str]) -> Option<String> {
    let keyword_position = scanner::find_keyword(text, keyword, 0)?;
    let fragment_start = keyword_position + keyword.len();
    let fragment_end = scanner::find_any_keyword(text, boundaries, fragment_start)
        .map_or(text.len(), |(position, _)| position);
    Some(text[fragment_start..fragment_end].trim().to_string())
}

/// True when `name(` occurs anywhere in the text, with at most one space
/// before the parenthesis (normalized text collapses whitespace runs).
fn mentions_call(text: &str, name: &str) -> bool {
    text.contains(&format!("{name}(")) || text.contains(&format!("{name} ("))
}

/// Count `(select ...` occurrences anywhere in the statement.
fn count_subqueries(text: &str) -> usize {
    text.match_indices('(')
        .filter(|(index, _)| text[index + 1..].trim_start().starts_with("select "))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_kind_from_leading_keyword() {
        assert_eq!(StatementKind::of("select * from t"), StatementKind::Select);
        assert_eq!(StatementKind::of("delete from t"), StatementKind::Delete);
        assert_eq!(
            StatementKind::of("with x as (select 1) select * from x"),
            StatementKind::Unknown
        );
        assert_eq!(StatementKind::of(""), StatementKind::Unknown);
    }

    #[test]
    fn trivial_where_in_reference_text_still_yields_the_table_list() {
        // A reference query may retain its trivial WHERE; the table list and
        // predicate list must come out as if it were absent.
        let parsed = ParsedStatement::extract("select * from customers where 1=1");
        assert_eq!(parsed.from_list, vec!["customers".to_string()]);
        assert!(parsed.where_predicates.is_empty());
    }

    #[test]
    fn join_fragment_start_walks_back_over_qualifiers() {
        let text = "select * from a left outer join b on a.i = b.i";
        let join_position = text.find("join").unwrap();
        assert_eq!(
            join_fragment_start(text, join_position),
            text.find("left").unwrap()
        );
    }

    #[test]
    fn subquery_counting_allows_a_space_after_the_parenthesis() {
        assert_eq!(count_subqueries("where a in (select b from u)"), 1);
        assert_eq!(count_subqueries("where a in ( select b from u)"), 1);
        assert_eq!(count_subqueries("where exists(select 1)"), 1);
        assert_eq!(count_subqueries("where a in (1, 2, 3)"), 0);
    }

    #[test]
    fn aggregate_mentions_tolerate_one_space_before_the_call() {
        assert!(mentions_call("select count(*) from t", "count"));
        assert!(mentions_call("select count (*) from t", "count"));
        assert!(!mentions_call("select counter from t", "count"));
    }
}
