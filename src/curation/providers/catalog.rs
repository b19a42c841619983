//! Provider backed by a catalog service addressing curations by exact
//! package coordinates

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::curation::auth;
use crate::curation::cache::ExpiringCache;
use crate::curation::fetch::{FetchOutcome, ResilientFetch};
use crate::curation::provider::{CurationProvider, run_batch};
use crate::curation::types::{CurationRecord, PackageIdentifier};
use crate::vcs;

/// Response entry from the catalog service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    declared_license: Option<String>,
    vcs_url: Option<String>,
    description: Option<String>,
}

/// Curation provider that looks up one record per identifier under
/// `{server}/curations/{ecosystem}/{namespace}/{name}/{version}`.
pub struct CatalogProvider {
    fetch: ResilientFetch,
    cache: ExpiringCache<Vec<CurationRecord>>,
    server_url: String,
}

impl CatalogProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        if let Some(credentials) = &config.credentials {
            auth::install(credentials.clone());
        }

        Self {
            fetch: ResilientFetch::new(config),
            cache: ExpiringCache::new(config.cache_expiration()),
            server_url: config.server_url.trim_end_matches('/').to_string(),
        }
    }

    async fn lookup(&self, package: &PackageIdentifier) -> Vec<CurationRecord> {
        let key = package.coordinates_path();

        if let Some(cached) = self.cache.get(&key) {
            debug!("cache hit for {}", package);
            return cached;
        }

        let url = format!("{}/curations/{}", self.server_url, key);

        let records = match self.fetch.get_json::<CatalogEntry>(&url).await {
            FetchOutcome::Data(entry) => vec![CurationRecord {
                package: package.clone(),
                declared_license: entry.declared_license,
                vcs_url: entry.vcs_url.as_deref().map(vcs::normalize_vcs_url),
                description: entry.description,
                provenance: format!("catalog:{}", self.server_url),
            }],
            FetchOutcome::Empty => Vec::new(),
            // Transient failures are not worth caching as "no data".
            FetchOutcome::Failed(_) => return Vec::new(),
        };

        self.cache.put(&key, records.clone());

        records
    }
}

#[async_trait::async_trait]
impl CurationProvider for CatalogProvider {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn curations_for(
        &self,
        packages: &[PackageIdentifier],
        deadline: Option<Duration>,
    ) -> Vec<CurationRecord> {
        run_batch(packages, deadline, |package| self.lookup(package)).await
    }
}
