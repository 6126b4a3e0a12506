//! Client-side search filter.

use super::record::TitleRecord;

/// Returns `true` if `name` contains `query` as a case-insensitive substring.
///
/// An empty query matches every name.
#[must_use]
pub fn matches_query(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Returns the indices of the records whose name matches `query`,
/// in their original order.
#[must_use]
pub fn filter_indices(titles: &[TitleRecord], query: &str) -> Vec<usize> {
    titles
        .iter()
        .enumerate()
        .filter(|(_, t)| matches_query(&t.name, query))
        .map(|(i, _)| i)
        .collect()
}

/// Returns the records whose name matches `query`, in their original order.
#[must_use]
pub fn filter_titles<'a>(titles: &'a [TitleRecord], query: &str) -> Vec<&'a TitleRecord> {
    filter_indices(titles, query)
        .into_iter()
        .filter_map(|i| titles.get(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(names: &[&str]) -> Vec<TitleRecord> {
        names
            .iter()
            .zip(1_u64..)
            .map(|(name, id)| TitleRecord {
                id,
                name: String::from(*name),
                overview: String::new(),
                vote_average: 0.0,
                backdrop_path: None,
                poster_path: None,
                release_date: None,
            })
            .collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        // Arrange
        let list = titles(&["Fight Club", "The Matrix", "Alien"]);

        // Act
        let filtered = filter_titles(&list, "");

        // Assert
        assert_eq!(filtered.len(), list.len());
        assert!(filtered.iter().zip(&list).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_case_insensitive_substring() {
        // Arrange
        let list = titles(&["Fight Club", "The Matrix", "Matrix Reloaded"]);

        // Act & Assert
        assert_eq!(filter_indices(&list, "MATRIX"), vec![1, 2]);
        assert_eq!(filter_indices(&list, "matrix"), vec![1, 2]);
        assert_eq!(filter_indices(&list, "t c"), vec![0]);
        assert_eq!(filter_indices(&list, "ub"), vec![0]);
    }

    #[test]
    fn test_every_query_result_satisfies_match() {
        // Arrange
        let list = titles(&["Fight Club", "The Matrix", "Alien", "Aliens", "ALF"]);

        // Act & Assert: result is exactly the set of matching names
        for query in ["a", "AL", "ien", "x", "zzz", " "] {
            let expected: Vec<usize> = list
                .iter()
                .enumerate()
                .filter(|(_, t)| matches_query(&t.name, query))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(filter_indices(&list, query), expected, "query {query:?}");
        }
    }

    #[test]
    fn test_non_ascii_names() {
        // Arrange
        let list = titles(&["SPY×FAMILY", "Ångström"]);

        // Act & Assert
        assert_eq!(filter_indices(&list, "spy×"), vec![0]);
        assert_eq!(filter_indices(&list, "ÅNG"), vec![1]);
    }

    #[test]
    fn test_no_match() {
        // Arrange
        let list = titles(&["Fight Club"]);

        // Act & Assert
        assert!(filter_titles(&list, "nonexistent").is_empty());
    }

    #[test]
    fn test_matches_query_empty() {
        // Arrange & Act & Assert
        assert!(matches_query("anything", ""));
        assert!(matches_query("", ""));
        assert!(!matches_query("", "a"));
    }
}
