//! Simdomain measures how closely a set of candidate strings ("similars")
//! resembles a set of domain names, using a selectable fuzzy-matching
//! algorithm.
//!
//! Two analysis modes are supported:
//!
//! - string-centric, where domains are compared as opaque strings (see
//!   [`perform_string_centric`](./dispatch/fn.perform_string_centric.html));
//! - domain-centric, where each domain is first broken into its labels and
//!   public suffix (see [`DomainInfo`](./domain/struct.DomainInfo.html)).
//!
//! Each mode can report plain similarity scores, containment checks, or
//! similarity restricted to contained pairs above a threshold.
//!
//! ### Example
//!
//! ```
//! use simdomain::algorithm::Algorithm;
//! use simdomain::dispatch::{perform_string_centric, AnalysisConfig};
//! use simdomain::strings::StringSet;
//!
//! let similars = StringSet::new(["goo"]);
//! let domains = StringSet::new(["google.com", "bing.com"]);
//!
//! let config = AnalysisConfig {
//!     contains_algorithm: Algorithm::Levenshtein,
//!     exec_contains: true,
//!     threshold: 0.5,
//!     ..AnalysisConfig::default()
//! };
//!
//! let report = perform_string_centric(&similars, &domains, &config);
//! assert_eq!(
//!     report.lines(),
//!     vec!["google.com contains goo ? true", "bing.com contains goo ? false"]
//! );
//! ```

#![deny(
    future_incompatible,
    nonstandard_style,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![deny(
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::decimal_literal_representation,
    clippy::doc_markdown,
    clippy::empty_enum,
    clippy::explicit_into_iter_loop,
    clippy::explicit_iter_loop,
    clippy::expl_impl_clone_on_copy,
    clippy::fallible_impl_from,
    clippy::manual_filter_map,
    clippy::filter_map_next,
    clippy::manual_find_map,
    clippy::get_unwrap,
    clippy::if_not_else,
    clippy::inline_always,
    clippy::invalid_upcast_comparisons,
    clippy::items_after_statements,
    clippy::map_flatten,
    clippy::match_same_arms,
    clippy::maybe_infinite_iter,
    clippy::mem_forget,
    clippy::multiple_inherent_impl,
    clippy::mut_mut,
    clippy::needless_borrow,
    clippy::needless_continue,
    clippy::map_unwrap_or,
    clippy::path_buf_push_overwrite,
    clippy::print_stdout,
    clippy::string_add,
    clippy::string_add_assign,
    clippy::type_repetition_in_bounds,
    clippy::unicode_not_nfc,
    clippy::unseparated_literal_suffix,
    clippy::used_underscore_binding,
    clippy::wildcard_dependencies,
)]
#![recursion_limit = "128"]

pub mod algorithm;
pub mod constants;
pub mod contains;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod format;
pub mod result;
pub mod similarity;
pub mod strings;

pub use crate::error::Error;
