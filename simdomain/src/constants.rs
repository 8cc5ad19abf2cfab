use crate::algorithm::Algorithm;
use phf::phf_map;

/// Name of the aggregate algorithm that runs every registered metric.
pub const ALL: &str = "all";

/// Every identifier accepted on the command line, in registry order with the
/// aggregate last.
pub static VALID_CHOICES: [&str; 8] = [
    "levenshtein",
    "damerau_levenshtein",
    "jaro",
    "jaro_winkler",
    "sorensen_dice",
    "metaphone",
    "soundex",
    ALL,
];

/// Concrete algorithms in the order `all` expands to.
pub static REGISTERED_ALGORITHMS: [Algorithm; 7] = [
    Algorithm::Levenshtein,
    Algorithm::DamerauLevenshtein,
    Algorithm::Jaro,
    Algorithm::JaroWinkler,
    Algorithm::SorensenDice,
    Algorithm::Metaphone,
    Algorithm::Soundex,
];

/// Lookup table from identifier to algorithm.
pub static ALGORITHM_NAMES: phf::Map<&'static str, Algorithm> = phf_map! {
    "levenshtein" => Algorithm::Levenshtein,
    "damerau_levenshtein" => Algorithm::DamerauLevenshtein,
    "jaro" => Algorithm::Jaro,
    "jaro_winkler" => Algorithm::JaroWinkler,
    "sorensen_dice" => Algorithm::SorensenDice,
    "metaphone" => Algorithm::Metaphone,
    "soundex" => Algorithm::Soundex,
    "all" => Algorithm::All,
};
