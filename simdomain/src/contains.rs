//! Per-pair containment outcomes, kept in evaluation order.
use std::collections::HashMap;

use crate::algorithm::Algorithm;
use crate::similarity::fuzzy_contains;

use serde::ser::{Serialize, Serializer};

/// Mapping of `similar -> (domain -> contained)`.
///
/// Both levels iterate in insertion order, which is the order pairs were
/// evaluated in (similars outer, domains inner). A repeated similar reuses its
/// existing row and a repeated domain overwrites its existing entry. Lookups
/// at either level go through a hash index, so building a map is linear in
/// the number of pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainmentMap {
    rows: Vec<ContainmentRow>,
    index: HashMap<String, usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct ContainmentRow {
    similar: String,
    domains: Vec<(String, bool)>,
    index: HashMap<String, usize>,
}

impl ContainmentRow {
    fn new(similar: &str) -> Self {
        ContainmentRow {
            similar: similar.to_string(),
            ..ContainmentRow::default()
        }
    }

    fn insert(&mut self, domain: &str, contained: bool) {
        match self.index.get(domain) {
            Some(&idx) => self.domains[idx].1 = contained,
            None => {
                self.index.insert(domain.to_string(), self.domains.len());
                self.domains.push((domain.to_string(), contained));
            }
        }
    }

    fn get(&self, domain: &str) -> Option<bool> {
        self.index.get(domain).map(|&idx| self.domains[idx].1)
    }
}

impl ContainmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every similar against every domain with `algorithm`, similars
    /// outer. Same as [`fuzzy_contains`].
    pub fn build<S, D>(similars: &[S], domains: &[D], algorithm: Algorithm, threshold: f64) -> Self
    where
        S: AsRef<str>,
        D: AsRef<str>,
    {
        fuzzy_contains(algorithm, similars, domains, threshold)
    }

    pub fn insert(&mut self, similar: &str, domain: &str, contained: bool) {
        let idx = match self.index.get(similar) {
            Some(&idx) => idx,
            None => {
                self.index.insert(similar.to_string(), self.rows.len());
                self.rows.push(ContainmentRow::new(similar));
                self.rows.len() - 1
            }
        };

        self.rows[idx].insert(domain, contained);
    }

    pub fn get(&self, similar: &str, domain: &str) -> Option<bool> {
        self.row(similar).and_then(|r| r.get(domain))
    }

    fn row(&self, similar: &str) -> Option<&ContainmentRow> {
        self.index.get(similar).map(|&idx| &self.rows[idx])
    }

    /// Number of similars (outer keys).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn similars(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.similar.as_str())
    }

    /// Inner entries recorded for `similar`, in insertion order.
    pub fn domains(&self, similar: &str) -> Option<impl Iterator<Item = (&str, bool)> + '_> {
        self.row(similar)
            .map(|r| r.domains.iter().map(|(d, c)| (d.as_str(), *c)))
    }

    /// Every `(similar, domain, contained)` triple, similars outer.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, bool)> + '_ {
        self.rows.iter().flat_map(|r| {
            r.domains
                .iter()
                .map(move |(d, c)| (r.similar.as_str(), d.as_str(), *c))
        })
    }

    /// Only the `(similar, domain)` pairs that were found to be contained.
    pub fn matches(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.iter()
            .filter(|(_, _, contained)| *contained)
            .map(|(s, d, _)| (s, d))
    }
}

struct RowEntries<'a>(&'a [(String, bool)]);

impl Serialize for RowEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(d, c)| (d, c)))
    }
}

impl Serialize for ContainmentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.rows
                .iter()
                .map(|r| (&r.similar, RowEntries(&r.domains))),
        )
    }
}
