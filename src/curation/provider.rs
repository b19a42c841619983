//! Curation provider trait and batch execution policy

#[cfg(test)]
use mockall::automock;

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;

use crate::config::FETCH_STAGGER_DELAY_MS;
use crate::curation::types::{CurationRecord, PackageIdentifier};

/// Trait for fetching curations from an external source
///
/// Implementations differ in how they address the remote service (exact
/// coordinates, release feeds) but share one contract: every returned
/// record names one of the requested identifiers, and lookups that cannot
/// be completed degrade to "no curation" instead of failing the call.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CurationProvider: Send + Sync {
    /// Provider name used in provenance notes and logs
    fn name(&self) -> &str;

    /// Fetches curations for a batch of package identifiers.
    ///
    /// No result ordering is guaranteed. `deadline` bounds the whole batch:
    /// on expiry, unfinished lookups are abandoned and already completed
    /// results are still returned.
    async fn curations_for(
        &self,
        packages: &[PackageIdentifier],
        deadline: Option<Duration>,
    ) -> Vec<CurationRecord>;
}

/// Runs one lookup per package concurrently, with staggered start times to
/// avoid rate limiting. Each lookup's failure handling is independent; a
/// lookup still in flight when the deadline expires contributes nothing.
pub(crate) async fn run_batch<'a, F, Fut>(
    packages: &'a [PackageIdentifier],
    deadline: Option<Duration>,
    lookup: F,
) -> Vec<CurationRecord>
where
    F: Fn(&'a PackageIdentifier) -> Fut,
    Fut: Future<Output = Vec<CurationRecord>>,
{
    let deadline_at = deadline.map(|d| tokio::time::Instant::now() + d);

    let lookups = packages.iter().enumerate().map(|(i, package)| {
        let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
        let lookup = lookup(package);

        async move {
            sleep(delay).await;

            match deadline_at {
                Some(at) => tokio::time::timeout_at(at, lookup).await.unwrap_or_default(),
                None => lookup.await,
            }
        }
    });

    join_all(lookups).await.into_iter().flatten().collect()
}
