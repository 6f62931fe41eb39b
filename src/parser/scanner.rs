//! Keyword scanning over normalized statement text.
//!
//! All searches walk the text left to right while tracking parenthesis depth
//! and string-literal state. A keyword only counts as a clause boundary at
//! depth zero and outside a literal, so clause keywords inside subqueries or
//! quoted values never terminate an outer clause.

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// True when `keyword` occurs at byte offset `at` with word boundaries on both sides.
///
/// Multi-word keywords such as `group by` are matched as written; normalized
/// text always separates words with a single space. `at` must be a char
/// boundary; anything else cannot start a keyword.
fn matches_keyword_at(text: &str, at: usize, keyword: &str) -> bool {
    if !text.is_char_boundary(at) || !text[at..].starts_with(keyword) {
        return false;
    }
    if text[..at].chars().next_back().is_some_and(is_word_char) {
        return false;
    }
    let end = at + keyword.len();
    !text[end..].chars().next().is_some_and(is_word_char)
}

/// Walk `text` and call `visit` at the start of every character that sits at
/// parenthesis depth zero outside a string literal. Stops early when `visit`
/// returns `true`.
fn walk_top_level<F>(text: &str, mut visit: F)
where
    F: FnMut(usize) -> bool,
{
    let mut depth = 0usize;
    let mut in_literal = false;
    for (index, ch) in text.char_indices() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                continue;
            }
            '(' if !in_literal => {
                depth += 1;
                continue;
            }
            ')' if !in_literal => {
                depth = depth.saturating_sub(1);
                continue;
            }
            _ => {}
        }
        if !in_literal && depth == 0 && visit(index) {
            return;
        }
    }
}

/// Byte offset of the first top-level occurrence of `keyword` at or after `start`.
pub fn find_keyword(text: &str, keyword: &str, start: usize) -> Option<usize> {
    find_any_keyword(text, &[keyword], start).map(|(position, _)| position)
}

/// Earliest top-level occurrence of any keyword in `keywords` at or after `start`.
///
/// Returns the byte offset together with the keyword that matched there.
pub fn find_any_keyword<'k>(
    text: &str,
    keywords: &[&'k str],
    start: usize,
) -> Option<(usize, &'k str)> {
    let mut found = None;
    walk_top_level(text, |index| {
        if index < start {
            return false;
        }
        for &keyword in keywords {
            if matches_keyword_at(text, index, keyword) {
                found = Some((index, keyword));
                return true;
            }
        }
        false
    });
    found
}

/// All top-level occurrences of `keyword`, in source order.
pub fn find_all_keywords(text: &str, keyword: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    walk_top_level(text, |index| {
        if matches_keyword_at(text, index, keyword) {
            positions.push(index);
        }
        false
    });
    positions
}

/// Split `text` on top-level commas, trimming fragments and dropping empties.
pub fn split_top_level_commas(text: &str) -> Vec<String> {
    let mut boundaries = Vec::new();
    walk_top_level(text, |index| {
        if text.as_bytes()[index] == b',' {
            boundaries.push(index);
        }
        false
    });
    collect_fragments(text, &boundaries, 1)
}

/// Split `text` into atomic predicates on top-level `and`/`or` connectives.
///
/// Trivial always-true fragments are not filtered here; that is the caller's
/// concern.
pub fn split_predicates(text: &str) -> Vec<String> {
    let mut boundaries = Vec::new();
    let mut widths = Vec::new();
    walk_top_level(text, |index| {
        for connective in ["and", "or"] {
            if matches_keyword_at(text, index, connective) {
                boundaries.push(index);
                widths.push(connective.len());
                break;
            }
        }
        false
    });

    let mut fragments = Vec::new();
    let mut segment_start = 0usize;
    for (boundary, width) in boundaries.iter().zip(&widths) {
        if *boundary >= segment_start {
            push_fragment(&mut fragments, &text[segment_start..*boundary]);
            segment_start = boundary + width;
        }
    }
    push_fragment(&mut fragments, &text[segment_start..]);
    fragments
}

fn collect_fragments(text: &str, boundaries: &[usize], separator_width: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut segment_start = 0usize;
    for boundary in boundaries {
        push_fragment(&mut fragments, &text[segment_start..*boundary]);
        segment_start = boundary + separator_width;
    }
    push_fragment(&mut fragments, &text[segment_start..]);
    fragments
}

fn push_fragment(fragments: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_inside_parentheses_are_not_boundaries() {
        let text = "select * from t where a > (select avg(b) from u where c = 1) order by a";
        let outer_where = text.find("where").unwrap();
        assert_eq!(find_keyword(text, "where", 0), Some(outer_where));
        // The inner `where` sits at depth one; the next top-level keyword is `order by`.
        let (position, keyword) =
            find_any_keyword(text, &["where", "order by"], outer_where + 1).unwrap();
        assert_eq!(keyword, "order by");
        assert_eq!(position, text.rfind("order by").unwrap());
    }

    #[test]
    fn keywords_inside_string_literals_are_ignored() {
        let text = "select * from t where name = 'group by order by'";
        assert_eq!(find_keyword(text, "group by", 0), None);
        assert_eq!(find_keyword(text, "order by", 0), None);
    }

    #[test]
    fn multibyte_text_is_scanned_without_panicking() {
        let text = "select * from café where name = 'Zoë'";
        assert_eq!(find_keyword(text, "from", 0), text.find("from"));
        assert_eq!(find_keyword(text, "where", 0), text.find("where"));
        assert_eq!(
            split_top_level_commas("café, 'naïve, still one', crème"),
            vec![
                "café".to_string(),
                "'naïve, still one'".to_string(),
                "crème".to_string(),
            ]
        );
    }

    #[test]
    fn multibyte_letters_count_as_word_characters_for_boundaries() {
        // `from` glued to an accented identifier is not a standalone keyword.
        let text = "select caféfrom from t";
        assert_eq!(find_keyword(text, "from", 0), Some(text.rfind("from").unwrap()));
    }

    #[test]
    fn keyword_matches_respect_word_boundaries() {
        let text = "select fromage from t";
        assert_eq!(find_keyword(text, "from", 0), Some(text.rfind("from").unwrap()));
        assert_eq!(find_keyword("select wherever", "where", 0), None);
    }

    #[test]
    fn commas_inside_calls_do_not_split() {
        assert_eq!(
            split_top_level_commas("concat(first, last), age"),
            vec!["concat(first, last)".to_string(), "age".to_string()]
        );
    }

    #[test]
    fn predicates_split_on_top_level_connectives_only() {
        assert_eq!(
            split_predicates("a = 1 and (b = 2 or c = 3) and d = 'x and y'"),
            vec![
                "a = 1".to_string(),
                "(b = 2 or c = 3)".to_string(),
                "d = 'x and y'".to_string(),
            ]
        );
    }

    #[test]
    fn find_all_keywords_reports_every_top_level_hit() {
        let text = "select * from a join b on a.i = b.i join c on b.i = c.i";
        assert_eq!(find_all_keywords(text, "join").len(), 2);
    }
}
