use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// "<name> in <place>": the first standalone "in" starts the location clause
static IN_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s+in\s+\S").expect("location clause pattern is valid")
});

/// Trailing words that name a place rather than a business, matched case-insensitively
const DEFAULT_LOCATION_PHRASES: &[&str] = &["salt lake city", "slc", "utah", "ut", "usa"];

/// Two-letter postal codes. Only stripped when written in capitals ("Provo UT"),
/// so names ending in "Co" or "In" survive.
const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Extracts the business-name part of a free-text "name + location" query.
///
/// Pure and infallible: when nothing looks like a location the whole query
/// comes back lowercased with whitespace collapsed.
pub struct QueryNormalizer {
    /// Tokenized phrases, longest first so "salt lake city" wins over shorter terms
    location_phrases: Vec<Vec<String>>,
    state_codes: HashSet<&'static str>,
}

impl QueryNormalizer {
    pub fn new() -> Self {
        Self::with_location_phrases(DEFAULT_LOCATION_PHRASES.iter().map(|s| s.to_string()))
    }

    /// Use a custom list of trailing location phrases (state codes still apply)
    pub fn with_location_phrases(phrases: impl IntoIterator<Item = String>) -> Self {
        let mut location_phrases: Vec<Vec<String>> = phrases
            .into_iter()
            .map(|p| p.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>())
            .filter(|tokens| !tokens.is_empty())
            .collect();
        location_phrases.sort_by(|a, b| b.len().cmp(&a.len()));

        Self {
            location_phrases,
            state_codes: STATE_CODES.iter().copied().collect(),
        }
    }

    pub fn normalize(&self, raw: &str) -> String {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let fallback = collapsed.to_lowercase();

        let clause = Self::strip_location_clause(&collapsed);
        let mut tokens: Vec<&str> = clause.split_whitespace().collect();
        self.strip_trailing_locations(&mut tokens);

        let name = tokens
            .join(" ")
            .to_lowercase()
            .trim_end_matches(|c: char| !c.is_alphanumeric())
            .to_string();

        if name.is_empty() {
            fallback
        } else {
            name
        }
    }

    /// Cut at the first " in <place>" or, failing that, at the first comma
    fn strip_location_clause(query: &str) -> &str {
        if let Some(name) = IN_CLAUSE.captures(query).and_then(|c| c.get(1)) {
            return name.as_str();
        }

        match query.split_once(',') {
            Some((head, _)) if !head.trim().is_empty() => head,
            _ => query,
        }
    }

    /// Repeatedly drop trailing location words, always keeping at least one token
    fn strip_trailing_locations(&self, tokens: &mut Vec<&str>) {
        loop {
            let Some(last) = tokens.last() else { return };
            let last = last.trim_matches(|c: char| !c.is_alphanumeric());

            if tokens.len() > 1 && self.state_codes.contains(last) {
                tokens.pop();
                continue;
            }

            let matched = self.location_phrases.iter().find(|phrase| {
                phrase.len() < tokens.len()
                    && tokens[tokens.len() - phrase.len()..]
                        .iter()
                        .zip(phrase.iter())
                        .all(|(token, word)| {
                            token
                                .trim_matches(|c: char| !c.is_alphanumeric())
                                .eq_ignore_ascii_case(word)
                        })
            });

            match matched {
                Some(phrase) => {
                    let keep = tokens.len() - phrase.len();
                    tokens.truncate(keep);
                }
                None => return,
            }
        }
    }
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
