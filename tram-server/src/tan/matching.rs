//! Fuzzy station-name matching.
//!
//! Users type or say stop names loosely ("foch", "mitterand", "pont
//! rousseau"). Names are compared after [`normalize_name`]; an exact match
//! wins, otherwise the Sørensen–Dice coefficient over character bigrams
//! picks the closest station.

use crate::domain::{Station, normalize_name};

/// Similarity between two names in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_name(a);
    let b = normalize_name(b);

    if a == b {
        return if a.is_empty() { 0.0 } else { 1.0 };
    }

    let left = bigrams(&a);
    let mut right = bigrams(&b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let total = left.len() + right.len();
    let mut shared = 0usize;
    for pair in &left {
        if let Some(pos) = right.iter().position(|p| p == pair) {
            right.swap_remove(pos);
            shared += 1;
        }
    }

    (2 * shared) as f64 / total as f64
}

/// Character bigrams, ignoring spaces.
fn bigrams(s: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// The single closest station to `query`.
///
/// Ties keep the earliest candidate. Returns `None` when there are no
/// candidates or nothing shares a single bigram with the query.
pub fn closest_station<'a>(query: &str, candidates: &'a [Station]) -> Option<&'a Station> {
    let mut best: Option<(&Station, f64)> = None;

    for station in candidates {
        let score = similarity(query, &station.name);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((station, score));
        }
    }

    best.filter(|(_, score)| *score > 0.0).map(|(s, _)| s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations(names: &[&str]) -> Vec<Station> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Station::new(format!("S{i}"), *n))
            .collect()
    }

    #[test]
    fn identical_names_score_one() {
        assert_eq!(similarity("Commerce", "commerce"), 1.0);
        assert_eq!(similarity("Hôtel Dieu", "hotel-dieu"), 1.0);
    }

    #[test]
    fn unrelated_names_score_low() {
        assert!(similarity("Beaujoire", "Jamet") < 0.2);
        assert_eq!(similarity("", "Jamet"), 0.0);
    }

    #[test]
    fn closest_prefers_best_overlap() {
        let candidates = stations(&[
            "Commerce",
            "Foch - Cathédrale",
            "François Mitterrand",
            "Gare de Pont Rousseau",
        ]);

        assert_eq!(
            closest_station("Foch", &candidates).map(|s| s.name.as_str()),
            Some("Foch - Cathédrale")
        );
        assert_eq!(
            closest_station("mitterand", &candidates).map(|s| s.name.as_str()),
            Some("François Mitterrand")
        );
        assert_eq!(
            closest_station("pont rousseau", &candidates).map(|s| s.name.as_str()),
            Some("Gare de Pont Rousseau")
        );
        assert_eq!(
            closest_station("COMMERCE", &candidates).map(|s| s.code.as_str()),
            Some("S0")
        );
    }

    #[test]
    fn ties_keep_first_candidate() {
        let candidates = stations(&["Jamet", "Jamet"]);
        assert_eq!(
            closest_station("jamet", &candidates).map(|s| s.code.as_str()),
            Some("S0")
        );
    }

    #[test]
    fn no_match_without_overlap() {
        let candidates = stations(&["Commerce"]);
        assert!(closest_station("xyz", &candidates).is_none());
        assert!(closest_station("Commerce", &[]).is_none());
    }
}
