//! Participant name matching
//!
//! Flows address participants by loosely-written names ("anthropic" for
//! "Anthropic", "gpt" for "OpenAI GPT"). Matching is case-insensitive and
//! accepts a substring relation in either direction. All name lookups in
//! the engines go through this module so the policy lives in one place.

/// Case-insensitive bidirectional substring match.
pub fn name_matches(candidate: &str, query: &str) -> bool {
    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();
    candidate.contains(&query) || query.contains(&candidate)
}

/// Outcome of resolving a query against a list of participant names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolution {
    /// No participant matched the query
    NotFound,
    /// Exactly one participant matched (index into the input list)
    Unique(usize),
    /// More than one participant matched (names of all matches)
    Ambiguous(Vec<String>),
}

/// Resolve `query` against `names`, requiring a unique match.
pub fn resolve_name(names: &[String], query: &str) -> NameResolution {
    let matches: Vec<usize> = names
        .iter()
        .enumerate()
        .filter(|(_, name)| name_matches(name, query))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => NameResolution::NotFound,
        [index] => NameResolution::Unique(*index),
        many => NameResolution::Ambiguous(many.iter().map(|&i| names[i].clone()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(name_matches("Anthropic", "anthropic"));
        assert!(name_matches("anthropic", "ANTHROPIC"));
    }

    #[test]
    fn test_match_substring_both_directions() {
        // query shorter than candidate
        assert!(name_matches("OpenAI GPT", "gpt"));
        // candidate shorter than query
        assert!(name_matches("gpt", "OpenAI GPT"));
        assert!(!name_matches("Gemini", "gpt"));
    }

    #[test]
    fn test_resolve_unique() {
        let participants = names(&["Anthropic", "OpenAI"]);
        assert_eq!(
            resolve_name(&participants, "anthropic"),
            NameResolution::Unique(0)
        );
    }

    #[test]
    fn test_resolve_not_found() {
        let participants = names(&["Anthropic", "OpenAI"]);
        assert_eq!(
            resolve_name(&participants, "mistral"),
            NameResolution::NotFound
        );
    }

    #[test]
    fn test_resolve_ambiguous() {
        let participants = names(&["OpenAI", "OpenAI Mini"]);
        let resolution = resolve_name(&participants, "openai");
        assert_eq!(
            resolution,
            NameResolution::Ambiguous(vec!["OpenAI".to_string(), "OpenAI Mini".to_string()])
        );
    }
}
