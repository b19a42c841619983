//! Reconciles externally sourced package metadata (license curations,
//! canonical source-control locations) with a catalog of software package
//! identifiers.
//!
//! Three pieces carry the weight:
//!
//! - [`matcher`]: decides whether a loosely formatted release-artifact name
//!   denotes a given version, tolerating separator styles and noise affixes.
//! - [`vcs`]: canonicalizes the many syntactic forms a version-control URL
//!   can take into one comparable form.
//! - [`curation`]: the pluggable, network-backed provider contract that
//!   degrades gracefully under timeouts, malformed responses, or unreachable
//!   endpoints instead of failing the caller.
//!
//! Curation is an enrichment, not a dependency: a provider call yields a
//! (possibly empty) list of records and never a fault, so callers cannot and
//! need not distinguish "provider had nothing" from "provider was
//! unreachable".

pub mod config;
pub mod curation;
pub mod matcher;
pub mod vcs;
