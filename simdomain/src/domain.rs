//! Domain-centric analysis. A fully qualified domain is broken into its
//! registrable label (e.g. `google`), its public suffix (e.g. `com`) and any
//! subdomain labels, and candidate strings are compared against the labels
//! rather than against the raw FQDN.
//!
//! Example:
//!
//! ```
//! use simdomain::algorithm::Algorithm;
//! use simdomain::domain::DomainInfo;
//!
//! let mut domain = DomainInfo::new("mail.google.com").unwrap();
//! domain.compare_string("goog", 0.9, Algorithm::Levenshtein);
//!
//! assert!(domain.has_matching_results());
//! ```
use crate::algorithm::Algorithm;
use crate::error::Error;
use crate::result::SimilarityResult;
use crate::similarity::{containment_scores, score_pair};

use addr::parser::DomainName;
use addr::psl::List;
use log::{trace, warn};
use serde::Serialize;

#[derive(Clone, thiserror::Error, Debug)]
pub enum DomainError {
    #[error("invalid domain name, (expected {expected:?}, found {found:?})")]
    InvalidDomain { expected: String, found: String },
}

/// Which operation recorded an outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Similarity,
    Containment,
}

/// One recorded comparison of a similar against one label of the domain.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DomainOutcome {
    pub comparison: Comparison,

    /// The label that was compared (decoded from punycode where needed).
    pub label: String,

    pub result: SimilarityResult,

    /// Valid and at or above the threshold in force when it was recorded.
    pub matched: bool,
}

/// A decomposed domain plus every comparison recorded against it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DomainInfo {
    /// The domain as it was supplied.
    pub fqdn: String,

    /// The public suffix of the FQDN (e.g. `com`, `co.uk`).
    tld: String,

    /// The registrable label (e.g. `google`).
    domain: String,

    /// Labels left of the registrable label, outermost first.
    subdomains: Vec<String>,

    #[serde(skip)]
    outcomes: Vec<DomainOutcome>,
}

/// Decompose `fqdn`, falling back to a single opaque label when it cannot be
/// parsed as a domain name under the public suffix list.
pub fn process_fqdn(fqdn: &str) -> DomainInfo {
    DomainInfo::new(fqdn).unwrap_or_else(|e| {
        warn!("treating {:?} as an opaque label: {}", fqdn, e);
        DomainInfo::opaque(fqdn)
    })
}

impl DomainInfo {
    pub fn new(fqdn: &str) -> Result<DomainInfo, Error> {
        let parsed_domain = List
            .parse_domain_name(fqdn)
            .map_err(|_| DomainError::InvalidDomain {
                expected: "valid domain name that can be parsed".to_string(),
                found: fqdn.to_string(),
            })?;
        let root_domain = parsed_domain
            .root()
            .ok_or(DomainError::InvalidDomain {
                expected: "valid domain name with a root domain".to_string(),
                found: fqdn.to_string(),
            })?;
        let tld = parsed_domain.suffix().to_string();
        let domain = root_domain
            .find('.')
            .and_then(|offset| root_domain.get(..offset))
            .ok_or(DomainError::InvalidDomain {
                expected: "valid domain name with a root domain".to_string(),
                found: fqdn.to_string(),
            })?;
        let subdomains: Vec<String> = parsed_domain
            .prefix()
            .map(|prefix| prefix.split('.').map(decode_label).collect())
            .unwrap_or_default();

        Ok(DomainInfo {
            fqdn: fqdn.to_string(),
            tld,
            domain: decode_label(domain),
            subdomains,
            outcomes: Vec::new(),
        })
    }

    /// A record whose only label is the whole input.
    pub fn opaque(fqdn: &str) -> DomainInfo {
        DomainInfo {
            fqdn: fqdn.to_string(),
            tld: String::new(),
            domain: fqdn.to_string(),
            subdomains: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn subdomains(&self) -> &[String] {
        &self.subdomains
    }

    /// Registrable label first, then subdomains from left to right.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        let subdomains = self.subdomains.iter().map(String::as_str);
        std::iter::once(self.domain.as_str()).chain(subdomains)
    }

    /// Record how well `similar` is contained in each label.
    pub fn compare_string(&mut self, similar: &str, threshold: f64, algorithm: Algorithm) {
        let recorded: Vec<_> = self
            .labels()
            .flat_map(|label| {
                containment_scores(algorithm, similar, label)
                    .into_iter()
                    .map(move |result| (label.to_string(), result))
            })
            .collect();

        self.record(Comparison::Containment, recorded, threshold);
    }

    /// Record the similarity of `similar` to the registrable label.
    pub fn measure_similarity(&mut self, similar: &str, threshold: f64, algorithm: Algorithm) {
        let recorded: Vec<_> = score_pair(algorithm, similar, &self.domain)
            .into_iter()
            .map(|result| (self.domain.clone(), result))
            .collect();

        self.record(Comparison::Similarity, recorded, threshold);
    }

    fn record(
        &mut self,
        comparison: Comparison,
        recorded: Vec<(String, SimilarityResult)>,
        threshold: f64,
    ) {
        for (label, result) in recorded {
            let matched = result.passes(threshold);
            trace!(
                "{} {:?} {} -> {:.4} (matched: {})",
                self.fqdn,
                comparison,
                result.to_simple_string(),
                result.score,
                matched
            );
            self.outcomes.push(DomainOutcome {
                comparison,
                label,
                result,
                matched,
            });
        }
    }

    /// Every recorded outcome, in recording order.
    pub fn outcomes(&self) -> &[DomainOutcome] {
        &self.outcomes
    }

    pub fn matching_outcomes(&self) -> impl Iterator<Item = &DomainOutcome> + '_ {
        self.outcomes.iter().filter(|o| o.matched)
    }

    pub fn has_matching_results(&self) -> bool {
        self.outcomes.iter().any(|o| o.matched)
    }

    pub fn matching_simple_strings(&self) -> Vec<String> {
        self.matching_outcomes()
            .map(|o| {
                format!(
                    "{} ({}) ~ {} [{}] {:.4}",
                    self.fqdn, o.label, o.result.left, o.result.algorithm, o.result.score
                )
            })
            .collect()
    }
}

fn decode_label(label: &str) -> String {
    if label.starts_with("xn--") {
        let (decoded, outcome) = idna::domain_to_unicode(label);
        if outcome.is_ok() {
            return decoded;
        }
    }

    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decomposition() {
        let d = DomainInfo::new("www.mail.example.co.uk").unwrap();

        assert_eq!(d.tld(), "co.uk");
        assert_eq!(d.domain(), "example");
        assert_eq!(d.subdomains(), &["www".to_string(), "mail".to_string()]);
        assert_eq!(d.labels().collect::<Vec<_>>(), vec!["example", "www", "mail"]);
    }

    #[test]
    fn test_punycode_label_is_decoded() {
        let d = DomainInfo::new("xn--bcher-kva.com").unwrap();
        assert_eq!(d.domain(), "bücher");
        assert_eq!(d.fqdn, "xn--bcher-kva.com");
    }

    #[test]
    fn test_process_fqdn_falls_back_to_opaque() {
        let d = process_fqdn("localhost");

        assert_eq!(d.fqdn, "localhost");
        assert_eq!(d.domain(), "localhost");
        assert_eq!(d.tld(), "");
        assert!(d.subdomains().is_empty());
    }

    #[test]
    fn test_no_outcomes_means_no_matches() {
        let d = process_fqdn("google.com");
        assert!(!d.has_matching_results());
        assert!(d.matching_simple_strings().is_empty());
    }

    #[test]
    fn test_compare_string_matches_label() {
        let mut amazon = process_fqdn("amazon.com");
        let mut ebay = process_fqdn("ebay.com");

        amazon.compare_string("amaz", 0.9, Algorithm::All);
        ebay.compare_string("amaz", 0.9, Algorithm::All);

        assert!(amazon.has_matching_results());
        assert!(!ebay.has_matching_results());
        assert!(amazon
            .matching_simple_strings()
            .iter()
            .all(|s| s.starts_with("amazon.com (amazon) ~ amaz [")));
    }

    #[test]
    fn test_compare_string_checks_subdomains() {
        let mut d = process_fqdn("paypal.secure-login.com");
        d.compare_string("paypal", 1.0, Algorithm::Levenshtein);

        let matched: Vec<_> = d.matching_outcomes().map(|o| o.label.as_str()).collect();
        assert_eq!(matched, vec!["paypal"]);
        assert_eq!(d.domain(), "secure-login");
    }

    #[test]
    fn test_measure_similarity_uses_registrable_label() {
        let mut d = process_fqdn("www.google.com");
        d.measure_similarity("google", 1.0, Algorithm::Levenshtein);

        assert_eq!(
            d.matching_simple_strings(),
            vec!["www.google.com (google) ~ google [levenshtein] 1.0000".to_string()]
        );
    }

    #[test]
    fn test_outcomes_accumulate_in_order() {
        let mut d = process_fqdn("google.com");
        d.measure_similarity("goog", 0.0, Algorithm::Jaro);
        d.measure_similarity("bing", 0.0, Algorithm::Jaro);
        d.compare_string("oog", 0.0, Algorithm::Jaro);

        let similars: Vec<_> = d.outcomes().iter().map(|o| o.result.left.as_str()).collect();
        assert_eq!(similars, vec!["goog", "bing", "oog"]);
        assert_eq!(d.outcomes()[2].comparison, Comparison::Containment);
    }

    #[test]
    fn test_threshold_filters_matches() {
        let mut d = process_fqdn("google.com");
        d.measure_similarity("bing", 0.99, Algorithm::Levenshtein);
        d.measure_similarity("google", 0.99, Algorithm::Levenshtein);

        assert_eq!(d.outcomes().len(), 2);
        assert_eq!(d.matching_outcomes().count(), 1);
    }
}
