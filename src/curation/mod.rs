//! Curation layer: fetching externally sourced package metadata
//!
//! This module provides the provider contract and the plumbing shared by its
//! implementations: the resilient fetch policy, result caching, one-time
//! credential installation, and the common value types.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Provider   │────▶│ ResilientFetch│────▶│   endpoint   │
//! │   (lookup)   │     │  (timeouts)  │     │   (remote)   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │                     │
//!        ▼                     ▼
//! ┌──────────────┐     ┌──────────────┐
//! │ ExpiringCache│     │ FetchOutcome │
//! │  (results)   │     │ (classified) │
//! └──────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`auth`]: idempotent process-wide credential installation
//! - [`cache`]: expiring in-memory cache, VCS-derived keys canonicalized
//! - [`error`]: classified transport failure taxonomy
//! - [`fetch`]: timeout-bounded HTTP wrapper that never propagates faults
//! - [`provider`]: the [`provider::CurationProvider`] trait and batch policy
//! - [`providers`]: concrete backends (coordinate catalog, release feeds)
//! - [`types`]: [`types::PackageIdentifier`] and [`types::CurationRecord`]

pub mod auth;
pub mod cache;
pub mod error;
pub mod fetch;
pub mod provider;
pub mod providers;
pub mod types;
