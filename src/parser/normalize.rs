//! Lossy textual canonicalization of raw SQL statements.

use crate::parser::scanner;

/// Always-true WHERE/HAVING fragments eligible for removal before comparison.
pub const TRIVIAL_PREDICATES: [&str; 8] = [
    "1=1",
    "true",
    "1",
    "0=0",
    "true=true",
    "1<>0",
    "1 is not null",
    "exists(select 1)",
];

/// True when `fragment` is one of the trivial always-true forms.
///
/// Matching is case-insensitive and ignores internal whitespace runs.
pub fn is_trivial_predicate(fragment: &str) -> bool {
    let collapsed = fragment
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    TRIVIAL_PREDICATES.contains(&collapsed.as_str())
}

/// Canonicalize a raw SQL string for comparison.
///
/// Lowercases, collapses whitespace runs to single spaces, strips trailing
/// semicolons, rewrites double quotes to single quotes, and removes a WHERE
/// clause whose entire predicate is a trivial always-true form (together with
/// leading trivial conjuncts that would leave a dangling `and`/`or`).
///
/// Pure and total: empty or unrecognizable input yields a degenerate string
/// that downstream stages treat as a mismatch. Idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(sql: &str) -> String {
    let mut text = sql
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('"', "'");
    while text.ends_with(';') || text.ends_with(' ') {
        text.pop();
    }
    strip_trivial_where(&text)
}

/// Clause keywords that may follow a WHERE predicate.
const AFTER_WHERE: [&str; 4] = ["group by", "having", "order by", "limit"];

fn strip_trivial_where(text: &str) -> String {
    let Some(where_position) = scanner::find_keyword(text, "where", 0) else {
        return text.to_string();
    };
    let predicate_start = where_position + "where".len();
    let predicate_end = scanner::find_any_keyword(text, &AFTER_WHERE, predicate_start)
        .map_or(text.len(), |(position, _)| position);
    let predicate = text[predicate_start..predicate_end].trim();

    let mut rest = predicate;
    loop {
        if is_trivial_predicate(rest) {
            // The whole clause is trivial: drop `where <predicate>` entirely.
            return collapse(&format!(
                "{} {}",
                text[..where_position].trim_end(),
                text[predicate_end..].trim_start()
            ));
        }
        match strip_leading_trivial_conjunct(rest) {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }

    if rest == predicate {
        return text.to_string();
    }
    collapse(&format!(
        "{} {}{}",
        &text[..predicate_start],
        rest,
        &text[predicate_end..]
    ))
}

/// Remove one leading `<trivial-form> and ` / `<trivial-form> or ` conjunct.
fn strip_leading_trivial_conjunct(predicate: &str) -> Option<&str> {
    for form in TRIVIAL_PREDICATES {
        for connective in ["and", "or"] {
            if let Some(rest) = predicate.strip_prefix(&format!("{form} {connective} ")) {
                return Some(rest);
            }
        }
    }
    None
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_trivial_form() {
        for form in TRIVIAL_PREDICATES {
            assert!(is_trivial_predicate(form), "{form} should be trivial");
        }
        assert!(is_trivial_predicate("1  IS  NOT  NULL"));
        assert!(!is_trivial_predicate("10=10"));
        assert!(!is_trivial_predicate("price = price"));
    }

    #[test]
    fn strips_trivial_where_before_a_following_clause() {
        assert_eq!(
            normalize("SELECT * FROM t WHERE true ORDER BY a"),
            "select * from t order by a"
        );
    }

    #[test]
    fn strips_leading_trivial_conjuncts_but_keeps_the_rest() {
        assert_eq!(
            normalize("SELECT * FROM t WHERE 1=1 AND price > 5"),
            "select * from t where price > 5"
        );
        assert_eq!(
            normalize("SELECT * FROM t WHERE 1=1 AND 0=0 AND price > 5"),
            "select * from t where price > 5"
        );
    }

    #[test]
    fn a_where_made_entirely_of_trivial_conjuncts_is_dropped() {
        assert_eq!(
            normalize("SELECT * FROM t WHERE 1=1 AND true"),
            "select * from t"
        );
    }

    #[test]
    fn trivial_where_inside_a_subquery_is_left_alone() {
        let sql = "select * from t where a in (select b from u where 1=1)";
        assert_eq!(normalize(sql), sql);
    }
}
