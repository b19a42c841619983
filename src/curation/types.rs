//! Value types shared across curation providers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Uniquely identifies one package release, the correlation key between the
/// catalog and externally sourced curation data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageIdentifier {
    /// Package ecosystem, e.g. "npm" or "maven"
    pub ecosystem: String,
    /// Namespace within the ecosystem, empty when the ecosystem has none
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    pub version: String,
}

impl PackageIdentifier {
    pub fn new(ecosystem: &str, namespace: &str, name: &str, version: &str) -> Self {
        Self {
            ecosystem: ecosystem.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// Path form used when addressing a remote service, with an explicit
    /// placeholder for an empty namespace.
    pub fn coordinates_path(&self) -> String {
        let namespace = if self.namespace.is_empty() {
            "-"
        } else {
            &self.namespace
        };

        format!(
            "{}/{}/{}/{}",
            self.ecosystem, namespace, self.name, self.version
        )
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.ecosystem, self.namespace, self.name, self.version
        )
    }
}

/// Externally supplied correction or enrichment of a package's declared
/// metadata. Immutable once returned; callers persist or discard it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationRecord {
    /// The requested identifier this curation applies to
    pub package: PackageIdentifier,
    pub declared_license: Option<String>,
    /// Canonicalized source repository location
    pub vcs_url: Option<String>,
    pub description: Option<String>,
    /// Where this curation came from, for traceability
    pub provenance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_path_uses_placeholder_for_empty_namespace() {
        let package = PackageIdentifier::new("npm", "", "lodash", "4.17.21");

        assert_eq!(package.coordinates_path(), "npm/-/lodash/4.17.21");
    }

    #[test]
    fn coordinates_path_includes_namespace_when_present() {
        let package = PackageIdentifier::new("maven", "org.apache", "commons-io", "2.11.0");

        assert_eq!(
            package.coordinates_path(),
            "maven/org.apache/commons-io/2.11.0"
        );
    }

    #[test]
    fn display_renders_coordinates() {
        let package = PackageIdentifier::new("maven", "org.apache", "commons-io", "2.11.0");

        assert_eq!(package.to_string(), "maven:org.apache:commons-io:2.11.0");
    }

    #[test]
    fn identifier_equality_is_structural() {
        let a = PackageIdentifier::new("npm", "", "lodash", "4.17.21");
        let b = PackageIdentifier::new("npm", "", "lodash", "4.17.21");
        let c = PackageIdentifier::new("npm", "", "lodash", "4.17.20");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
