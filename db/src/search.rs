/// Split a free-text search string into its terms.
pub fn search_terms(input: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// An ILIKE pattern matching `term` anywhere in a column, with LIKE wildcards escaped.
pub fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_commas() {
        assert_eq!(
            search_terms("  real   madrid,barca "),
            vec!["real", "madrid", "barca"]
        );
        assert!(search_terms("   ").is_empty());
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("lakers"), "%lakers%");
    }
}
