//! Repositories for database operations

pub mod employee;
pub mod role;

pub use employee::EmployeeRepository;
pub use role::RoleRepository;

/// Split a search query into individual terms
pub fn search_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// Build a `%term%` LIKE pattern with metacharacters escaped
///
/// A literal `%` or `_` in a search term must match itself, not act as a
/// wildcard.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if c == '\\' || c == '%' || c == '_' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_terms_splits_on_whitespace() {
        assert_eq!(search_terms("john 2"), vec!["john", "2"]);
        assert_eq!(search_terms("  john \t smith "), vec!["john", "smith"]);
        assert!(search_terms("").is_empty());
        assert!(search_terms("   ").is_empty());
    }

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("john"), "%john%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
