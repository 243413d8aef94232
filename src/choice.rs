//! Prefix matching of user-typed names against a fixed set of options.

/// Outcome of matching an input string against a list of named options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Match(T),
    Ambiguous(Vec<T>),
    NoMatch,
}

/// Lower-cases and trims `input`, treating `_` and `-` as spaces.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            '_' | '-' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Resolves `input` against `options` (canonical lower-case names).
///
/// An exact name always wins. Otherwise every option starting with the input
/// is a candidate, and the result is a match only if there is exactly one.
pub fn match_choice<T: Clone>(input: &str, options: &[(&str, T)]) -> Choice<T> {
    let needle = normalize(input);
    if needle.is_empty() {
        return Choice::NoMatch;
    }

    if let Some((_, value)) = options.iter().find(|(name, _)| *name == needle) {
        return Choice::Match(value.clone());
    }

    let mut candidates: Vec<T> = options
        .iter()
        .filter(|(name, _)| name.starts_with(&needle))
        .map(|(_, value)| value.clone())
        .collect();

    match candidates.len() {
        0 => Choice::NoMatch,
        1 => Choice::Match(candidates.remove(0)),
        _ => Choice::Ambiguous(candidates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[(&str, u8)] = &[("march", 3), ("may", 5), ("june", 6), ("all", 0)];

    #[test]
    fn test_exact_match() {
        assert_eq!(match_choice("May", OPTIONS), Choice::Match(5));
    }

    #[test]
    fn test_unique_prefix() {
        assert_eq!(match_choice("jun", OPTIONS), Choice::Match(6));
        assert_eq!(match_choice("  A ", OPTIONS), Choice::Match(0));
    }

    #[test]
    fn test_ambiguous_prefix() {
        assert_eq!(match_choice("ma", OPTIONS), Choice::Ambiguous(vec![3, 5]));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_choice("july", OPTIONS), Choice::NoMatch);
        assert_eq!(match_choice("", OPTIONS), Choice::NoMatch);
    }

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize("New_York-City"), "new york city");
    }
}
