//! Canonicalization of individual clause fragments before comparison.
//!
//! These helpers make the equivalence checks blind to aliases, table
//! qualifiers, quoting style, and whitespace. They operate on fragments cut
//! from an already-normalized statement but lowercase defensively so they can
//! be called on raw text as well.

/// Canonicalize a column fragment from a SELECT, GROUP BY, or ORDER BY list.
///
/// Strips `as <alias>` suffixes and a leading `<identifier>.` table
/// qualifier, removes quotes and whitespace, and lowercases. A trailing
/// `asc`/`desc` direction survives because only alias and qualifier tokens
/// are removed: `c.Price DESC` becomes `pricedesc`.
pub fn normalize_column(fragment: &str) -> String {
    let without_alias = strip_as_aliases(&fragment.to_lowercase());
    strip_chars(strip_leading_qualifier(&without_alias))
}

/// Canonicalize a table reference from a FROM list.
///
/// Strips an `as <alias>` suffix or a bare trailing-identifier alias
/// (`Customers c`), removes quotes and whitespace, and lowercases.
pub fn normalize_table(fragment: &str) -> String {
    let lowered = fragment.trim().to_lowercase();
    let without_alias = strip_as_aliases(&lowered);
    let trimmed = without_alias.trim();
    let base = match trimmed.rfind(char::is_whitespace) {
        Some(split) if is_identifier(&trimmed[split + 1..]) => &trimmed[..split],
        _ => trimmed,
    };
    strip_chars(base)
}

/// Canonicalize an atomic WHERE/HAVING predicate.
///
/// Removes all whitespace and quote characters and lowercases. Applied only
/// after trivial always-true fragments have been filtered out on both sides.
pub fn normalize_predicate(fragment: &str) -> String {
    strip_chars(&fragment.to_lowercase())
}

/// Remove every ` as <identifier>` alias introduction from `fragment`.
fn strip_as_aliases(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;
    while let Some(position) = rest.find(" as ") {
        out.push_str(&rest[..position]);
        let after = &rest[position + " as ".len()..];
        let alias_end = after
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        rest = &after[alias_end..];
    }
    out.push_str(rest);
    out
}

/// Drop a leading `<identifier>.` table qualifier, as in `c.City` or `c.*`.
fn strip_leading_qualifier(fragment: &str) -> &str {
    match fragment.find('.') {
        Some(dot) if dot > 0 && is_identifier(&fragment[..dot]) => &fragment[dot + 1..],
        _ => fragment,
    }
}

fn is_identifier(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn strip_chars(fragment: &str) -> String {
    fragment
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\'' | '"' | '`'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_aliases_and_qualifiers_are_stripped() {
        assert_eq!(normalize_column("p.ProductName as name"), "productname");
        assert_eq!(normalize_column("c.*"), "*");
        assert_eq!(normalize_column("'City'"), "city");
    }

    #[test]
    fn column_direction_suffix_survives() {
        assert_eq!(normalize_column("c.Price DESC"), "pricedesc");
        assert_eq!(normalize_column("price asc"), "priceasc");
    }

    #[test]
    fn qualifier_inside_a_call_is_left_alone() {
        assert_eq!(
            normalize_column("sum(od.quantity * od.unitprice)"),
            "sum(od.quantity*od.unitprice)"
        );
    }

    #[test]
    fn table_aliases_are_stripped_in_both_spellings() {
        assert_eq!(normalize_table("Products AS p"), "products");
        assert_eq!(normalize_table("Customers c"), "customers");
        assert_eq!(normalize_table("customers"), "customers");
    }

    #[test]
    fn predicates_lose_whitespace_quotes_and_case() {
        assert_eq!(
            normalize_predicate("City = 'New York'"),
            "city=newyork"
        );
    }
}
