use std::collections::BTreeMap;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Counts occurrences of each distinct value.
pub fn counts<T: Ord, I: IntoIterator<Item = T>>(values: I) -> BTreeMap<T, usize> {
    let mut out = BTreeMap::new();
    for v in values {
        *out.entry(v).or_insert(0) += 1;
    }
    out
}

/// Most frequent value, or `None` for empty input.
///
/// Ties resolve to the lowest value.
pub fn mode<T: Ord, I: IntoIterator<Item = T>>(values: I) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    // BTreeMap iterates in ascending order, so a strict `>` keeps the lowest tied value
    for (value, count) in counts(values) {
        if best.as_ref().is_none_or(|(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v)
}

/// Converts seconds to minutes, rounding up.
pub fn ceil_minutes(seconds: f64) -> u64 {
    (seconds / 60.0).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_mode_picks_most_frequent() {
        assert_eq!(mode([1, 1, 3, 1]), Some(1));
        assert_eq!(mode(["b", "a", "b"]), Some("b"));
    }

    #[test]
    fn test_mode_tie_resolves_to_lowest() {
        assert_eq!(mode([5, 3, 5, 3, 9]), Some(3));
        assert_eq!(mode(["Sunday", "Monday"]), Some("Monday"));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_counts() {
        let c = counts(["x", "y", "x"]);
        assert_eq!(c.get("x"), Some(&2));
        assert_eq!(c.get("y"), Some(&1));
    }

    #[test]
    fn test_ceil_minutes() {
        assert_eq!(ceil_minutes(360.0), 6);
        assert_eq!(ceil_minutes(361.0), 7);
        assert_eq!(ceil_minutes(0.5), 1);
        assert_eq!(ceil_minutes(0.0), 0);
    }
}
