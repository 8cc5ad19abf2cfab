//! Algorithm identifiers and the metrics they map to.
//!
//! Algorithms form a closed set. Parsing an identifier goes through the
//! [`ALGORITHM_NAMES`](../constants/static.ALGORITHM_NAMES.html) table, so an
//! unknown name is rejected before any comparison runs. Every concrete
//! algorithm resolves to a [`Metric`] returning a similarity in `[0, 1]`
//! where `1.0` means identical, or `None` when the pair cannot be scored.
//!
//! ```
//! use simdomain::algorithm::Algorithm;
//!
//! let algorithm: Algorithm = "jaro_winkler".parse().unwrap();
//! assert_eq!(algorithm.score("goog", "goog"), Some(1.0));
//! ```
use crate::constants::{ALGORITHM_NAMES, REGISTERED_ALGORITHMS, VALID_CHOICES};
use crate::error::Error;

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use rphonetic::{DoubleMetaphone, Encoder, Soundex};
use serde::Serialize;
use strsim::{
    jaro, jaro_winkler, levenshtein, normalized_damerau_levenshtein, normalized_levenshtein,
    sorensen_dice,
};

/// Scores a (similar, target) pair. Inputs are expected to be lowercased.
pub type Metric = fn(&str, &str) -> Option<f64>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Levenshtein,
    DamerauLevenshtein,
    Jaro,
    JaroWinkler,
    SorensenDice,
    Metaphone,
    Soundex,
    /// Aggregate: every registered algorithm, results merged in registry order.
    All,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Levenshtein => "levenshtein",
            Algorithm::DamerauLevenshtein => "damerau_levenshtein",
            Algorithm::Jaro => "jaro",
            Algorithm::JaroWinkler => "jaro_winkler",
            Algorithm::SorensenDice => "sorensen_dice",
            Algorithm::Metaphone => "metaphone",
            Algorithm::Soundex => "soundex",
            Algorithm::All => crate::constants::ALL,
        }
    }

    /// Concrete algorithms this identifier runs. A concrete algorithm expands
    /// to itself, `All` to the whole registry.
    pub fn expand(self) -> &'static [Algorithm] {
        match self {
            Algorithm::Levenshtein => &[Algorithm::Levenshtein],
            Algorithm::DamerauLevenshtein => &[Algorithm::DamerauLevenshtein],
            Algorithm::Jaro => &[Algorithm::Jaro],
            Algorithm::JaroWinkler => &[Algorithm::JaroWinkler],
            Algorithm::SorensenDice => &[Algorithm::SorensenDice],
            Algorithm::Metaphone => &[Algorithm::Metaphone],
            Algorithm::Soundex => &[Algorithm::Soundex],
            Algorithm::All => &REGISTERED_ALGORITHMS,
        }
    }

    /// The metric backing a concrete algorithm. `All` has no metric of its own.
    pub fn metric(self) -> Option<Metric> {
        match self {
            Algorithm::Levenshtein => Some(levenshtein_similarity),
            Algorithm::DamerauLevenshtein => Some(damerau_similarity),
            Algorithm::Jaro => Some(jaro_similarity),
            Algorithm::JaroWinkler => Some(jaro_winkler_similarity),
            Algorithm::SorensenDice => Some(dice_similarity),
            Algorithm::Metaphone => Some(metaphone_similarity),
            Algorithm::Soundex => Some(soundex_similarity),
            Algorithm::All => None,
        }
    }

    /// Score a single pair with a concrete algorithm.
    pub fn score(self, similar: &str, target: &str) -> Option<f64> {
        self.metric().and_then(|metric| metric(similar, target))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALGORITHM_NAMES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| Error::UnknownAlgorithm {
                expected: VALID_CHOICES.join(", "),
                found: s.to_string(),
            })
    }
}

fn levenshtein_similarity(similar: &str, target: &str) -> Option<f64> {
    Some(normalized_levenshtein(similar, target))
}

fn damerau_similarity(similar: &str, target: &str) -> Option<f64> {
    Some(normalized_damerau_levenshtein(similar, target))
}

fn jaro_similarity(similar: &str, target: &str) -> Option<f64> {
    Some(jaro(similar, target))
}

fn jaro_winkler_similarity(similar: &str, target: &str) -> Option<f64> {
    Some(jaro_winkler(similar, target))
}

fn dice_similarity(similar: &str, target: &str) -> Option<f64> {
    Some(sorensen_dice(similar, target))
}

/// Double Metaphone both sides and keep the closest of the four
/// primary/alternate pairings (ties go to the first, in the order
/// Ap-Bp, Ap-Bs, As-Bp, As-Bs).
fn metaphone_similarity(similar: &str, target: &str) -> Option<f64> {
    // Double Metaphone only works reliably with ASCII
    if !similar.is_ascii() || !target.is_ascii() {
        return None;
    }

    let encoder = DoubleMetaphone::default();
    let similar_encoding = encoder.double_metaphone(similar);
    let target_encoding = encoder.double_metaphone(target);

    let similar_keys = [
        String::from(similar_encoding.primary()),
        String::from(similar_encoding.alternate()),
    ];
    let target_keys = [
        String::from(target_encoding.primary()),
        String::from(target_encoding.alternate()),
    ];

    similar_keys
        .iter()
        .cartesian_product(target_keys.iter())
        .filter(|(s, t)| !s.is_empty() && !t.is_empty())
        .map(|(s, t)| normalized_distance(s, t))
        .fold(None, |best: Option<f64>, distance| match best {
            Some(b) if b <= distance => Some(b),
            _ => Some(distance),
        })
        .map(|distance| 1.0 - distance)
}

fn soundex_similarity(similar: &str, target: &str) -> Option<f64> {
    if !similar.is_ascii() || !target.is_ascii() {
        return None;
    }

    if !similar.chars().any(|c| c.is_ascii_alphabetic())
        || !target.chars().any(|c| c.is_ascii_alphabetic())
    {
        return None;
    }

    let encoder = Soundex::default();
    let similar_code = encoder.encode(similar);
    let target_code = encoder.encode(target);

    if similar_code.is_empty() || target_code.is_empty() {
        return None;
    }

    Some(1.0 - normalized_distance(&similar_code, &target_code))
}

/// Levenshtein distance divided by the longer length. Two empty strings are
/// treated as completely different (`1.0`).
fn normalized_distance(s1: &str, s2: &str) -> f64 {
    let max_len = s1.chars().count().max(s2.chars().count());

    if max_len == 0 {
        return 1.0;
    }

    levenshtein(s1, s2) as f64 / max_len as f64
}
