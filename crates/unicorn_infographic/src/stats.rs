use itertools::Itertools;
use std::collections::HashMap;

/// Counts occurrences of each value.
///
/// The result is ordered by descending count; equal counts keep the order in
/// which the values first appeared.
pub fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut first_seen: Vec<&'a str> = Vec::new();
    let mut counts: HashMap<&'a str, usize> = HashMap::new();

    for value in values {
        let count = counts.entry(value).or_insert_with(|| {
            first_seen.push(value);
            0
        });
        *count += 1;
    }

    first_seen
        .into_iter()
        .map(|value| (value.to_string(), counts[value]))
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .collect()
}

/// Converts a count into a percentage of `total`. Zero when `total` is zero.
pub fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_orders_by_count() {
        let counts = value_counts(["b", "a", "a", "c", "a", "b"]);
        assert_eq!(
            counts,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_value_counts_ties_keep_first_appearance() {
        let counts = value_counts(["x", "y", "z", "y", "x", "z"]);
        let order: Vec<&str> = counts.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_value_counts_empty() {
        let counts = value_counts(std::iter::empty::<&str>());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(1, 4), 25.0);
        assert_eq!(percent_of(3, 0), 0.0);
    }
}
