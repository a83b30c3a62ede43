//! # Profile Resolver
//!
//! Fetch-or-fallback lookup of player profiles. A single bounded fetch is
//! attempted against the remote profile source; a successful fetch is
//! written through to the [`PlayerRecordStore`](fs_records::PlayerRecordStore)
//! and returned fresh, any failure falls back to the last stored snapshot,
//! labelled stale with its age.

pub mod config;
pub mod resolver;
pub mod source;

pub use config::{ResolverConfig, API_FETCH_TIMEOUT};
pub use resolver::{humanize_age, CachedResult, ProfileResolver, Resolution};
pub use source::{FetchOutcome, HttpProfileSource, ProfileSource};
