//! Rendering of dispatcher output, either as plain text lines or as a single
//! JSON document.
use crate::contains::ContainmentMap;
use crate::domain::{DomainInfo, DomainOutcome};
use crate::error::Error;
use crate::result::SimilarityResult;

use serde::Serialize;

/// The product of one dispatcher run. Which variant comes back depends on the
/// mode and on whether the run was domain-centric.
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    /// Plain similarity or matches-only results.
    Similarity(Vec<SimilarityResult>),

    /// String-centric containment outcomes.
    Containment(ContainmentMap),

    /// Domain-centric records, in input order.
    Domains(Vec<DomainInfo>),
}

#[derive(Serialize)]
struct DomainMatches<'a> {
    fqdn: &'a str,
    tld: &'a str,
    domain: &'a str,
    subdomains: &'a [String],
    matches: Vec<&'a DomainOutcome>,
}

impl Report {
    /// One line per surviving entry, in output order.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Report::Similarity(results) => results
                .iter()
                .filter(|r| r.is_valid())
                .map(SimilarityResult::to_simple_string)
                .collect(),
            Report::Containment(contains) => contains
                .iter()
                .map(|(similar, domain, contained)| {
                    format!("{} contains {} ? {}", domain, similar, contained)
                })
                .collect(),
            Report::Domains(records) => records
                .iter()
                .filter(|r| r.has_matching_results())
                .flat_map(DomainInfo::matching_simple_strings)
                .collect(),
        }
    }

    /// The same survivors as [`Report::lines`], as one JSON document.
    pub fn to_json(&self) -> Result<String, Error> {
        let json = match self {
            Report::Similarity(results) => {
                let valid: Vec<_> = results.iter().filter(|r| r.is_valid()).collect();
                serde_json::to_string_pretty(&valid)?
            }
            Report::Containment(contains) => serde_json::to_string_pretty(contains)?,
            Report::Domains(records) => {
                let matching: Vec<_> = records
                    .iter()
                    .filter(|r| r.has_matching_results())
                    .map(|r| DomainMatches {
                        fqdn: &r.fqdn,
                        tld: r.tld(),
                        domain: r.domain(),
                        subdomains: r.subdomains(),
                        matches: r.matching_outcomes().collect(),
                    })
                    .collect();
                serde_json::to_string_pretty(&matching)?
            }
        };

        Ok(json)
    }
}
