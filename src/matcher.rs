/// Outcome of resolving a token against a set of declared names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match<'a> {
    Exact(&'a str),
    Unique(&'a str),
    Ambiguous(Vec<&'a str>),
    None,
}

impl<'a> Match<'a> {
    /// The resolved name for an exact or unique abbreviated match.
    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Match::Exact(name) | Match::Unique(name) => Some(name),
            Match::Ambiguous(_) | Match::None => None,
        }
    }
}

/// Resolves `token` against `candidates`.
///
/// An exact match always wins. Otherwise, when `abbreviate` is set, every
/// candidate that `token` is a prefix of is collected: one is a unique
/// abbreviation, more are ambiguous (sorted, deduplicated).
pub fn resolve<'a>(
    token: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    abbreviate: bool,
) -> Match<'a> {
    let mut matches = Vec::new();
    for candidate in candidates {
        if candidate == token {
            return Match::Exact(candidate);
        } else if abbreviate && !token.is_empty() && candidate.starts_with(token) {
            matches.push(candidate);
        }
    }
    matches.sort_unstable();
    matches.dedup();
    match matches.len() {
        0 => Match::None,
        1 => Match::Unique(matches[0]),
        _ => Match::Ambiguous(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STACK: [&str; 2] = ["stack", "stash"];

    #[test]
    fn specificity_is_monotonic() {
        for token in ["s", "st", "sta"] {
            assert_eq!(
                resolve(token, STACK, true),
                Match::Ambiguous(vec!["stack", "stash"])
            );
        }
        assert_eq!(resolve("stac", STACK, true), Match::Unique("stack"));
        assert_eq!(resolve("stas", STACK, true), Match::Unique("stash"));
        assert_eq!(resolve("stack", STACK, true), Match::Exact("stack"));
        assert_eq!(resolve("stash", STACK, true), Match::Exact("stash"));
    }

    #[test]
    fn exact_match_beats_longer_candidates() {
        assert_eq!(resolve("add", ["addition", "add"], true), Match::Exact("add"));
    }

    #[test]
    fn without_abbreviation_only_exact_matches() {
        assert_eq!(resolve("stac", STACK, false), Match::None);
        assert_eq!(resolve("stack", STACK, false), Match::Exact("stack"));
    }

    #[test]
    fn no_match() {
        assert_eq!(resolve("pop", STACK, true), Match::None);
        assert_eq!(resolve("", STACK, true), Match::None);
        assert_eq!(resolve("stacks", STACK, true).name(), None);
    }
}
