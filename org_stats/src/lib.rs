//! GitHub organization contributor stats
//!
//! # Overview
//!
//! GitHub computes per-repository contributor statistics (commits, and weekly additions and deletions per author) lazily.
//! The first request for a repository usually answers with `202 Accepted` and an empty body while the numbers are being computed in the background.
//!
//! Library lists repositories of an organization, filters them by visibility and fetches contributor stats of each one in turn, polling while GitHub is still computing them.
//! Stats of every repository are then folded into organization-wide totals per contributor login.
//!
//! Repository level problems (unreadable stats, stats which never become ready) only skip that repository.
//! Organization level problems (not an organization, transport or authentication failure) end the scan, but totals merged so far are always reported.

pub mod aggregator;
pub mod api;
pub mod payload;
pub mod report;

#[cfg(feature = "scanner")]
pub mod fetcher;
#[cfg(feature = "scanner")]
pub mod lister;
#[cfg(feature = "scanner")]
pub mod policy;
#[cfg(feature = "scanner")]
pub mod scanner;

#[cfg(all(test, feature = "scanner"))]
mod testing;

pub use aggregator::{ContributorTotals, OrganizationAggregate};
pub use api::{Client, Error, Repository, Result, Scope};
#[cfg(feature = "scanner")]
pub use fetcher::{StatsFetcher, StatsOutcome};
#[cfg(feature = "scanner")]
pub use policy::{JitterPolicy, RetryPolicy};
#[cfg(feature = "scanner")]
pub use scanner::{OrgScanner, ScanReport};
