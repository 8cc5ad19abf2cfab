//! Runs a set of similars against a set of domains in one of three modes.
//!
//! The mode decision and the iteration order live in [`drive`]; what a
//! comparison actually does is up to the [`ComparisonSink`] it is given.
//! [`StringSink`] compares raw strings and produces flat results or a
//! [`ContainmentMap`], while [`DomainSink`] feeds per-domain
//! [`DomainInfo`] accumulators.
use crate::algorithm::Algorithm;
use crate::contains::ContainmentMap;
use crate::domain::{process_fqdn, DomainInfo};
use crate::format::Report;
use crate::result::SimilarityResult;
use crate::similarity::{contains_pair, score_pair, similarity_for_matches_only};
use crate::strings::StringSet;

use log::debug;

/// Everything that parameterises a run, fixed for its whole duration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Algorithm used for similarity scores (and for domain-centric
    /// containment).
    pub algorithm: Algorithm,

    /// Algorithm used to build the string-centric containment map.
    pub contains_algorithm: Algorithm,

    pub exec_contains: bool,
    pub exec_matches: bool,

    /// Minimum score for a containment or match to count.
    pub threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            algorithm: Algorithm::All,
            contains_algorithm: Algorithm::All,
            exec_contains: false,
            exec_matches: false,
            threshold: 0.0,
        }
    }
}

impl AnalysisConfig {
    pub fn mode(&self) -> Mode {
        Mode::select(self.exec_contains, self.exec_matches)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Score every pair.
    Similarity,
    /// Report whether each similar is contained in each domain.
    Contains,
    /// Score only contained pairs and keep those at or above the threshold.
    MatchesOnly,
}

impl Mode {
    /// Matches-only wins when both flags are set.
    pub fn select(exec_contains: bool, exec_matches: bool) -> Mode {
        match (exec_contains, exec_matches) {
            (_, true) => Mode::MatchesOnly,
            (true, false) => Mode::Contains,
            (false, false) => Mode::Similarity,
        }
    }
}

/// Receives one call per (similar, target) pair and assembles the output.
pub trait ComparisonSink {
    type Output;

    /// Number of targets each similar is compared against.
    fn target_count(&self) -> usize;

    fn similarity(&mut self, similar: &str, target: usize, config: &AnalysisConfig);

    fn containment(&mut self, similar: &str, target: usize, config: &AnalysisConfig);

    fn finish(self, mode: Mode, config: &AnalysisConfig) -> Self::Output;
}

/// Feed every (similar, target) pair to `sink`, similars outer and targets
/// inner, choosing the comparison from the configured mode.
pub fn feed<T, S>(similars: &[T], sink: &mut S, config: &AnalysisConfig)
where
    T: AsRef<str>,
    S: ComparisonSink,
{
    let mode = config.mode();
    debug!(
        "dispatching {:?} over {} similar(s) x {} target(s)",
        mode,
        similars.len(),
        sink.target_count()
    );

    for similar in similars {
        for target in 0..sink.target_count() {
            match mode {
                Mode::Similarity => sink.similarity(similar.as_ref(), target, config),
                Mode::Contains | Mode::MatchesOnly => {
                    sink.containment(similar.as_ref(), target, config)
                }
            }
        }
    }
}

/// [`feed`] every pair to `sink`, then let it assemble its output.
pub fn drive<T, S>(similars: &[T], mut sink: S, config: &AnalysisConfig) -> S::Output
where
    T: AsRef<str>,
    S: ComparisonSink,
{
    feed(similars, &mut sink, config);
    sink.finish(config.mode(), config)
}

/// Compares similars against domains as opaque strings.
#[derive(Debug)]
pub struct StringSink<'a, D> {
    domains: &'a [D],
    results: Vec<SimilarityResult>,
    contains: ContainmentMap,
}

impl<'a, D: AsRef<str>> StringSink<'a, D> {
    pub fn new(domains: &'a [D]) -> Self {
        StringSink {
            domains,
            results: Vec::new(),
            contains: ContainmentMap::new(),
        }
    }

    /// Raw similarity results and containment map collected so far.
    pub fn into_parts(self) -> (Vec<SimilarityResult>, ContainmentMap) {
        (self.results, self.contains)
    }
}

impl<D: AsRef<str>> ComparisonSink for StringSink<'_, D> {
    type Output = Report;

    fn target_count(&self) -> usize {
        self.domains.len()
    }

    fn similarity(&mut self, similar: &str, target: usize, config: &AnalysisConfig) {
        let domain = self.domains[target].as_ref();
        self.results.extend(score_pair(config.algorithm, similar, domain));
    }

    fn containment(&mut self, similar: &str, target: usize, config: &AnalysisConfig) {
        let domain = self.domains[target].as_ref();
        let contained = contains_pair(config.contains_algorithm, similar, domain, config.threshold);
        self.contains.insert(similar, domain, contained);
    }

    fn finish(self, mode: Mode, config: &AnalysisConfig) -> Report {
        let (results, contains) = self.into_parts();

        match mode {
            Mode::Similarity => Report::Similarity(results),
            Mode::Contains => Report::Containment(contains),
            Mode::MatchesOnly => Report::Similarity(similarity_for_matches_only(
                config.algorithm,
                &contains,
                config.threshold,
            )),
        }
    }
}

/// Records comparisons inside each domain's own accumulator.
#[derive(Debug)]
pub struct DomainSink {
    records: Vec<DomainInfo>,
}

impl DomainSink {
    pub fn new(records: Vec<DomainInfo>) -> Self {
        DomainSink { records }
    }
}

impl ComparisonSink for DomainSink {
    type Output = Report;

    fn target_count(&self) -> usize {
        self.records.len()
    }

    fn similarity(&mut self, similar: &str, target: usize, config: &AnalysisConfig) {
        self.records[target].measure_similarity(similar, config.threshold, config.algorithm);
    }

    fn containment(&mut self, similar: &str, target: usize, config: &AnalysisConfig) {
        self.records[target].compare_string(similar, config.threshold, config.algorithm);
    }

    fn finish(self, _: Mode, _: &AnalysisConfig) -> Report {
        Report::Domains(self.records)
    }
}

/// Compare similars against domains as raw strings.
pub fn perform_string_centric(
    similars: &StringSet,
    domains: &StringSet,
    config: &AnalysisConfig,
) -> Report {
    drive(&similars[..], StringSink::new(&domains[..]), config)
}

/// Decompose every domain and compare similars against its labels.
pub fn perform_domain_centric(
    similars: &StringSet,
    domains: &StringSet,
    config: &AnalysisConfig,
) -> Report {
    let records = domains.iter().map(|d| process_fqdn(d)).collect();
    drive(&similars[..], DomainSink::new(records), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::{execute_by_name, fuzzy_contains};
    use pretty_assertions::assert_eq;

    fn config(
        algorithm: Algorithm,
        exec_contains: bool,
        exec_matches: bool,
        threshold: f64,
    ) -> AnalysisConfig {
        AnalysisConfig {
            algorithm,
            contains_algorithm: algorithm,
            exec_contains,
            exec_matches,
            threshold,
        }
    }

    fn similarity_results(report: Report) -> Vec<SimilarityResult> {
        match report {
            Report::Similarity(results) => results,
            other => panic!("expected similarity results, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_select() {
        assert_eq!(Mode::select(false, false), Mode::Similarity);
        assert_eq!(Mode::select(true, false), Mode::Contains);
        assert_eq!(Mode::select(false, true), Mode::MatchesOnly);
        assert_eq!(Mode::select(true, true), Mode::MatchesOnly);
    }

    #[test]
    fn test_plain_mode_order() {
        let similars = StringSet::new(["goog"]);
        let domains = StringSet::new(["google.com", "bing.com"]);
        let cfg = config(Algorithm::Levenshtein, false, false, 0.0);

        let results = similarity_results(perform_string_centric(&similars, &domains, &cfg));
        let pairs: Vec<_> = results
            .iter()
            .map(|r| (r.left.as_str(), r.right.as_str()))
            .collect();

        assert_eq!(pairs, vec![("goog", "google.com"), ("goog", "bing.com")]);
    }

    #[test]
    fn test_plain_mode_cardinality_and_order() {
        let similars = StringSet::new(["a", "b"]);
        let domains = StringSet::new(["x.com", "y.com", "z.com"]);
        let cfg = config(Algorithm::Jaro, false, false, 0.0);

        let results = similarity_results(perform_string_centric(&similars, &domains, &cfg));
        let pairs: Vec<_> = results
            .iter()
            .map(|r| (r.left.as_str(), r.right.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("a", "x.com"),
                ("a", "y.com"),
                ("a", "z.com"),
                ("b", "x.com"),
                ("b", "y.com"),
                ("b", "z.com"),
            ]
        );
    }

    #[test]
    fn test_plain_mode_ignores_threshold() {
        let similars = StringSet::new(["zzzz"]);
        let domains = StringSet::new(["google.com"]);
        let cfg = config(Algorithm::Levenshtein, false, false, 0.99);

        let results = similarity_results(perform_string_centric(&similars, &domains, &cfg));
        assert_eq!(results.len(), 1);
        assert!(results[0].score < 0.99);
    }

    #[test]
    fn test_plain_mode_matches_registry() {
        let similars = StringSet::new(["goog", "amaz"]);
        let domains = StringSet::new(["google.com", "amazon.com"]);
        let cfg = config(Algorithm::All, false, false, 0.0);

        let results = similarity_results(perform_string_centric(&similars, &domains, &cfg));
        assert_eq!(results, execute_by_name(Algorithm::All, &similars[..], &domains[..]));
    }

    #[test]
    fn test_contains_mode() {
        let similars = StringSet::new(["goo"]);
        let domains = StringSet::new(["google.com"]);
        let cfg = config(Algorithm::All, true, false, 0.5);

        match perform_string_centric(&similars, &domains, &cfg) {
            Report::Containment(map) => {
                assert_eq!(map.get("goo", "google.com"), Some(true));
                let bulk = fuzzy_contains(Algorithm::All, &similars[..], &domains[..], 0.5);
                assert_eq!(map, bulk);
            }
            other => panic!("expected containment map, got {:?}", other),
        }
    }

    #[test]
    fn test_contains_mode_shape() {
        let similars = StringSet::new(["goo", "bin", "ama"]);
        let domains = StringSet::new(["google.com", "bing.com"]);
        let cfg = config(Algorithm::Levenshtein, true, false, 0.9);

        match perform_string_centric(&similars, &domains, &cfg) {
            Report::Containment(map) => {
                assert_eq!(map.len(), 3);
                assert!(similars.iter().all(|s| map.domains(s).unwrap().count() == 2));
            }
            other => panic!("expected containment map, got {:?}", other),
        }
    }

    #[test]
    fn test_contains_uses_contains_algorithm() {
        let similars = StringSet::new(["fone"]);
        let domains = StringSet::new(["phone.com"]);
        let cfg = AnalysisConfig {
            algorithm: Algorithm::Levenshtein,
            contains_algorithm: Algorithm::Metaphone,
            exec_contains: true,
            exec_matches: false,
            threshold: 1.0,
        };

        match perform_string_centric(&similars, &domains, &cfg) {
            Report::Containment(map) => assert_eq!(map.get("fone", "phone.com"), Some(true)),
            other => panic!("expected containment map, got {:?}", other),
        }
    }

    #[test]
    fn test_matches_mode_respects_threshold() {
        let similars = StringSet::new(["goog", "bing", "zzzz"]);
        let domains = StringSet::new(["google.com", "bing.com"]);
        let cfg = config(Algorithm::All, false, true, 0.6);

        let results = similarity_results(perform_string_centric(&similars, &domains, &cfg));

        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.is_valid() && r.score >= 0.6));
        assert!(results.iter().all(|r| r.left != "zzzz"));
    }

    #[test]
    fn test_matches_supersede_contains() {
        let similars = StringSet::new(["goo"]);
        let domains = StringSet::new(["google.com"]);

        let both = config(Algorithm::Jaro, true, true, 0.5);
        let matches_only = config(Algorithm::Jaro, false, true, 0.5);

        let both = perform_string_centric(&similars, &domains, &both);
        let matches = perform_string_centric(&similars, &domains, &matches_only);

        assert!(matches!(both, Report::Similarity(_)));
        assert_eq!(both, matches);
    }

    #[test]
    fn test_blank_entries_never_reach_output() {
        let similars = StringSet::new(["", "goog", "  "]);
        let domains = StringSet::new(["google.com", "\t", ""]);
        let cfg = config(Algorithm::Levenshtein, false, false, 0.0);

        let results = similarity_results(perform_string_centric(&similars, &domains, &cfg));
        assert_eq!(results.len(), 1);
        assert!(results
            .iter()
            .all(|r| !r.left.trim().is_empty() && !r.right.trim().is_empty()));
    }

    #[test]
    fn test_plain_mode_is_idempotent() {
        let similars = StringSet::new(["goog", "amaz"]);
        let domains = StringSet::new(["google.com", "amazon.com"]);
        let cfg = AnalysisConfig::default();

        assert_eq!(
            perform_string_centric(&similars, &domains, &cfg),
            perform_string_centric(&similars, &domains, &cfg)
        );
    }

    #[test]
    fn test_domain_centric_matches() {
        let similars = StringSet::new(["amaz"]);
        let domains = StringSet::new(["amazon.com", "ebay.com"]);
        let cfg = config(Algorithm::All, false, true, 0.9);

        match perform_domain_centric(&similars, &domains, &cfg) {
            Report::Domains(records) => {
                assert_eq!(records.len(), 2);
                assert!(records[0].has_matching_results());
                assert!(!records[1].has_matching_results());
                assert!(records[0].outcomes().iter().all(|o| o.label == "amazon"));
            }
            other => panic!("expected domain records, got {:?}", other),
        }
    }

    #[test]
    fn test_domain_centric_plain_measures_similarity() {
        let similars = StringSet::new(["goog", "bing"]);
        let domains = StringSet::new(["google.com"]);
        let cfg = config(Algorithm::Levenshtein, false, false, 0.0);

        match perform_domain_centric(&similars, &domains, &cfg) {
            Report::Domains(records) => {
                let outcomes = records[0].outcomes();
                assert_eq!(outcomes.len(), 2);
                assert!(outcomes
                    .iter()
                    .all(|o| o.comparison == crate::domain::Comparison::Similarity));
                assert_eq!(outcomes[0].result.left, "goog");
                assert_eq!(outcomes[1].result.left, "bing");
            }
            other => panic!("expected domain records, got {:?}", other),
        }
    }

    #[test]
    fn test_domain_centric_keeps_every_record() {
        let similars = StringSet::new(["goog"]);
        let domains = StringSet::new(["google.com", "", "localhost"]);
        let cfg = config(Algorithm::Levenshtein, true, false, 1.0);

        match perform_domain_centric(&similars, &domains, &cfg) {
            Report::Domains(records) => {
                let fqdns: Vec<_> = records.iter().map(|r| r.fqdn.as_str()).collect();
                assert_eq!(fqdns, vec!["google.com", "localhost"]);
            }
            other => panic!("expected domain records, got {:?}", other),
        }
    }
}
