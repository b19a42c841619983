//! Provider backed by a service exposing per-repository release feeds
//!
//! Release feeds label artifacts with loose names ("v3.3.1",
//! "3.3.1-npm-packages"), so correlating a feed entry with a requested
//! identifier goes through the fuzzy version matcher.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::curation::auth;
use crate::curation::cache::{ExpiringCache, vcs_key};
use crate::curation::fetch::{FetchOutcome, ResilientFetch};
use crate::curation::provider::{CurationProvider, run_batch};
use crate::curation::types::{CurationRecord, PackageIdentifier};
use crate::matcher::filter_version_names;
use crate::vcs;

/// Project lookup response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectEntry {
    source_repository: Option<String>,
}

/// One release in a repository's feed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseEntry {
    name: String,
    declared_license: Option<String>,
    description: Option<String>,
}

/// Curation provider that resolves a package to its source repository and
/// then correlates the repository's release feed with the requested version.
pub struct ReleaseFeedProvider {
    fetch: ResilientFetch,
    feed_cache: ExpiringCache<Vec<ReleaseEntry>>,
    server_url: String,
}

impl ReleaseFeedProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        if let Some(credentials) = &config.credentials {
            auth::install(credentials.clone());
        }

        Self {
            fetch: ResilientFetch::new(config),
            feed_cache: ExpiringCache::new(config.cache_expiration()),
            server_url: config.server_url.trim_end_matches('/').to_string(),
        }
    }

    async fn lookup(&self, package: &PackageIdentifier) -> Vec<CurationRecord> {
        let namespace = if package.namespace.is_empty() {
            "-"
        } else {
            &package.namespace
        };
        let project_url = format!(
            "{}/projects/{}/{}/{}",
            self.server_url, package.ecosystem, namespace, package.name
        );

        let Some(project) = self
            .fetch
            .get_json::<ProjectEntry>(&project_url)
            .await
            .into_data()
        else {
            return Vec::new();
        };

        let Some(repository) = project.source_repository else {
            debug!("no source repository on record for {}", package);
            return Vec::new();
        };
        let repository = vcs::normalize_vcs_url(&repository);

        let entries = self.release_feed(&repository).await;
        let names: Vec<String> = entries.iter().map(|entry| entry.name.clone()).collect();
        let matching = filter_version_names(&package.version, &names, Some(&package.name));

        entries
            .into_iter()
            .filter(|entry| matching.contains(&entry.name))
            .map(|entry| CurationRecord {
                package: package.clone(),
                declared_license: entry.declared_license,
                vcs_url: Some(repository.clone()),
                description: entry.description,
                provenance: format!("releases:{}", self.server_url),
            })
            .collect()
    }

    /// Fetches a repository's release feed, cached under the canonicalized
    /// repository URL. Entries that fail to deserialize are skipped without
    /// invalidating their siblings.
    async fn release_feed(&self, repository: &str) -> Vec<ReleaseEntry> {
        let key = vcs_key(repository);

        if let Some(cached) = self.feed_cache.get(&key) {
            debug!("feed cache hit for {}", repository);
            return cached;
        }

        let url = format!("{}/releases", self.server_url);
        let outcome = self
            .fetch
            .get_json_with_query::<Vec<serde_json::Value>>(&url, &[("repository", repository)])
            .await;

        let entries: Vec<ReleaseEntry> = match outcome {
            FetchOutcome::Data(values) => values
                .into_iter()
                .filter_map(|value| {
                    serde_json::from_value::<ReleaseEntry>(value)
                        .map_err(|err| warn!("skipping malformed release entry: {}", err))
                        .ok()
                })
                .collect(),
            FetchOutcome::Empty => Vec::new(),
            // Transient failures are not worth caching as "no data".
            FetchOutcome::Failed(_) => return Vec::new(),
        };

        self.feed_cache.put(&key, entries.clone());

        entries
    }
}

#[async_trait::async_trait]
impl CurationProvider for ReleaseFeedProvider {
    fn name(&self) -> &str {
        "releases"
    }

    async fn curations_for(
        &self,
        packages: &[PackageIdentifier],
        deadline: Option<Duration>,
    ) -> Vec<CurationRecord> {
        run_batch(packages, deadline, |package| self.lookup(package)).await
    }
}
