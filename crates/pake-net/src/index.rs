//! Aggregated package index across the known alien nodes.
//!
//! An alien is a remote node this client knows about, together with its
//! mirror list. Index construction asks each alien's mirrors in order for
//! `packages.json` (mirrors are assumed to be kept in sync, so the first one
//! that answers wins) and then fetches `packages/<name>/versions.json` for
//! every listed package. Failures never abort the build; they are collected
//! as error strings alongside the entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fetch::Fetcher;
use crate::node::resource_url;

/// A remote node and the mirrors it publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    /// Canonical URL of the node; used as the `origin` of its packages.
    pub url: String,
    /// Mirror URLs serving the node's resources.
    pub mirrors: Vec<String>,
}

impl Alien {
    /// Learn a node's mirrors by fetching its `mirrors.json`.
    ///
    /// If the list cannot be fetched (or is empty), the node URL itself is
    /// used as the only mirror.
    pub async fn discover(fetcher: &Fetcher, url: &str) -> Self {
        let url = url.trim_end_matches('/').to_string();
        let mut mirrors: Vec<String> = fetcher
            .get_or(&resource_url(&url, "mirrors.json"), Vec::new())
            .await;
        if mirrors.is_empty() {
            mirrors.push(url.clone());
        }
        Self { url, mirrors }
    }
}

/// One package discovered in the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Package name, as listed in the origin's `packages.json`.
    pub name: String,
    /// Canonical URL of the node providing the package.
    pub origin: String,
    /// Raw `versions.json` value for the package.
    pub versions: Value,
}

/// Result of an index build: entries plus the non-fatal errors hit on the way.
#[derive(Debug, Default, Serialize)]
pub struct NetworkIndex {
    /// Packages found across all aliens.
    pub entries: Vec<IndexEntry>,
    /// Human-readable descriptions of fetches that failed.
    pub errors: Vec<String>,
}

/// Build the package index for the given aliens.
///
/// A package whose `versions.json` cannot be fetched is omitted from the
/// index and its failure recorded; an alien with no reachable mirror
/// contributes no entries.
pub async fn build_index(fetcher: &Fetcher, aliens: &[Alien]) -> NetworkIndex {
    let mut index = NetworkIndex::default();

    for alien in aliens {
        let mut packages = Vec::new();
        let mut reachable = None;
        for mirror in &alien.mirrors {
            let url = resource_url(mirror, "packages.json");
            match fetcher.fetch::<Vec<String>>(&url).await {
                Ok(names) => {
                    packages = names;
                    reachable = Some(mirror.as_str());
                    break;
                }
                Err(e) => {
                    index
                        .errors
                        .push(format!("{e}: while getting packages from {mirror}"));
                }
            }
        }
        let Some(mirror) = reachable else { continue };

        for name in packages {
            let url = format!(
                "{}/packages/{}/versions.json",
                mirror.trim_end_matches('/'),
                name
            );
            match fetcher.json(&url).await {
                Ok(versions) => index.entries.push(IndexEntry {
                    name,
                    origin: alien.url.clone(),
                    versions,
                }),
                Err(e) => index.errors.push(format!("{e}: {url}")),
            }
        }
    }

    index
}
