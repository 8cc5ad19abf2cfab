//! The algorithm registry: scores pairs of strings by algorithm identifier.
//!
//! Pair primitives ([`score_pair`], [`containment_scores`], [`contains_pair`])
//! are what both dispatchers call. The bulk operations ([`execute_by_name`],
//! [`fuzzy_contains`]) are the library entry points for callers that want raw
//! results instead of a [`Report`](crate::format::Report); they go through
//! the same [`feed`] loop as the string-centric dispatcher.
use crate::algorithm::Algorithm;
use crate::contains::ContainmentMap;
use crate::dispatch::{feed, AnalysisConfig, StringSink};
use crate::result::SimilarityResult;

/// Score `similar` against `target` with every algorithm `algorithm` expands
/// to. Both sides are compared lowercased; the result keeps the original text.
pub fn score_pair(algorithm: Algorithm, similar: &str, target: &str) -> Vec<SimilarityResult> {
    let (s, t) = (similar.to_lowercase(), target.to_lowercase());

    algorithm
        .expand()
        .iter()
        .map(|a| SimilarityResult::new(similar, target, *a, a.score(&s, &t)))
        .collect()
}

/// How well `similar` is contained in `target`, one result per concrete
/// algorithm.
///
/// A literal substring scores `1.0`. Otherwise every window of `target` with
/// the same character length as `similar` is scored and the best valid score
/// is kept; a target shorter than `similar` is scored whole.
pub fn containment_scores(
    algorithm: Algorithm,
    similar: &str,
    target: &str,
) -> Vec<SimilarityResult> {
    let (s, t) = (similar.to_lowercase(), target.to_lowercase());
    let literal = t.contains(&s);

    algorithm
        .expand()
        .iter()
        .map(|a| {
            let score = if literal {
                Some(1.0)
            } else {
                best_window_score(*a, &s, &t)
            };
            SimilarityResult::new(similar, target, *a, score)
        })
        .collect()
}

/// Whether any concrete algorithm finds `similar` inside `target` with a
/// containment score of at least `threshold`.
pub fn contains_pair(algorithm: Algorithm, similar: &str, target: &str, threshold: f64) -> bool {
    containment_scores(algorithm, similar, target)
        .iter()
        .any(|r| r.passes(threshold))
}

fn best_window_score(algorithm: Algorithm, similar: &str, target: &str) -> Option<f64> {
    let width = similar.chars().count();
    let chars: Vec<char> = target.chars().collect();

    if chars.len() <= width {
        return algorithm.score(similar, target);
    }

    chars
        .windows(width)
        .map(|window| window.iter().collect::<String>())
        .filter_map(|window| algorithm.score(similar, &window))
        .fold(None, |best: Option<f64>, score| match best {
            Some(b) if b >= score => Some(b),
            _ => Some(score),
        })
}

/// Score every similar against every domain, similars outer.
pub fn execute_by_name<S, D>(
    algorithm: Algorithm,
    similars: &[S],
    domains: &[D],
) -> Vec<SimilarityResult>
where
    S: AsRef<str>,
    D: AsRef<str>,
{
    let config = AnalysisConfig {
        algorithm,
        ..AnalysisConfig::default()
    };

    let mut sink = StringSink::new(domains);
    feed(similars, &mut sink, &config);
    sink.into_parts().0
}

/// Containment outcome of every similar against every domain.
pub fn fuzzy_contains<S, D>(
    algorithm: Algorithm,
    similars: &[S],
    domains: &[D],
    threshold: f64,
) -> ContainmentMap
where
    S: AsRef<str>,
    D: AsRef<str>,
{
    let config = AnalysisConfig {
        contains_algorithm: algorithm,
        exec_contains: true,
        threshold,
        ..AnalysisConfig::default()
    };

    let mut sink = StringSink::new(domains);
    feed(similars, &mut sink, &config);
    sink.into_parts().1
}

/// Re-score only the pairs marked as contained in `contains`, keeping results
/// that are valid and score at least `threshold`.
pub fn similarity_for_matches_only(
    algorithm: Algorithm,
    contains: &ContainmentMap,
    threshold: f64,
) -> Vec<SimilarityResult> {
    contains
        .matches()
        .flat_map(|(similar, domain)| score_pair(algorithm, similar, domain))
        .filter(|r| r.passes(threshold))
        .collect()
}
