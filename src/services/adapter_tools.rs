//! Adapter helpers over repository payloads.
//!
//! A repository payload maps adapter names to adapter objects. Keys starting
//! with `_` (such as `_repoInfo`) describe the repository itself and are never
//! treated as adapters.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::domain::error::RepositoryResult;
use crate::domain::models::RepositorySource;
use crate::domain::ports::RepositoryProvider;

/// Path segment prefix identifying an adapter repository.
const ADAPTER_PREFIX: &str = "iobroker.";

/// Host serving raw files of GitHub repositories.
const RAW_GITHUB_HOST: &str = "raw.githubusercontent.com";

/// Extract the adapter name from a repository or file URL.
///
/// Looks for a path segment `ioBroker.<name>` (case-insensitive, optional
/// `.git` suffix) and returns `<name>` in lowercase.
///
/// ```
/// use iobroker_repositories::extract_adapter_name;
///
/// assert_eq!(
///     extract_adapter_name("https://github.com/ioBroker/ioBroker.admin"),
///     Some("admin".to_string())
/// );
/// ```
pub fn extract_adapter_name(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();

    path.split('/').find_map(|segment| {
        let lower = segment.to_lowercase();
        let name = lower.strip_prefix(ADAPTER_PREFIX)?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// Adapter objects of a repository payload, keyed by adapter name.
pub fn adapter_entries(repo: &Value) -> BTreeMap<String, Value> {
    repo.as_object()
        .map(|adapters| {
            adapters
                .iter()
                .filter(|(name, entry)| !name.starts_with('_') && entry.is_object())
                .map(|(name, entry)| (name.clone(), entry.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Repository URL of every adapter that declares a `meta` file.
///
/// A `raw.githubusercontent.com/<owner>/<repo>/...` meta URL is turned into
/// `https://github.com/<owner>/<repo>`; any other meta URL is returned as is.
pub fn get_adapter_urls(repo: &Value) -> BTreeMap<String, String> {
    let Some(adapters) = repo.as_object() else {
        return BTreeMap::new();
    };

    adapters
        .iter()
        .filter(|(name, _)| !name.starts_with('_'))
        .filter_map(|(name, entry)| {
            let meta = entry.get("meta")?.as_str()?;
            let url = github_repository_url(meta).unwrap_or_else(|| meta.to_string());
            Some((name.clone(), url))
        })
        .collect()
}

/// Adapters of the latest repository (canonical origin).
pub async fn get_latest_adapters(
    provider: &dyn RepositoryProvider,
) -> RepositoryResult<BTreeMap<String, Value>> {
    adapters_from(provider, RepositorySource::Latest).await
}

/// Adapters of the stable repository (canonical origin).
pub async fn get_stable_adapters(
    provider: &dyn RepositoryProvider,
) -> RepositoryResult<BTreeMap<String, Value>> {
    adapters_from(provider, RepositorySource::Stable).await
}

async fn adapters_from(
    provider: &dyn RepositoryProvider,
    source: RepositorySource,
) -> RepositoryResult<BTreeMap<String, Value>> {
    let repo = provider.get_repo(source).await?;
    let adapters = adapter_entries(&repo);
    debug!(source = %source, count = adapters.len(), "Collected adapters");
    Ok(adapters)
}

fn github_repository_url(meta: &str) -> Option<String> {
    let rest = meta
        .strip_prefix("https://")
        .or_else(|| meta.strip_prefix("http://"))?
        .strip_prefix(RAW_GITHUB_HOST)?
        .strip_prefix('/')?;

    let mut parts = rest.split('/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo = parts.next().filter(|s| !s.is_empty())?;
    Some(format!("https://github.com/{owner}/{repo}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_repo() -> Value {
        json!({
            "_repoInfo": {"stable": true, "name": "Stable (default)"},
            "admin": {
                "meta": "https://raw.githubusercontent.com/ioBroker/ioBroker.admin/master/io-package.json",
                "icon": "https://raw.githubusercontent.com/ioBroker/ioBroker.admin/master/admin/admin.png",
                "version": "7.0.23"
            },
            "zigbee": {
                "meta": "https://raw.githubusercontent.com/ioBroker/ioBroker.zigbee/master/io-package.json",
                "version": "1.10.14"
            },
            "custom": {
                "meta": "https://example.com/ioBroker.custom/io-package.json"
            },
            "broken": {"version": "0.0.1"}
        })
    }

    #[test]
    fn test_extract_adapter_name() {
        assert_eq!(
            extract_adapter_name("https://github.com/ioBroker/ioBroker.admin"),
            Some("admin".to_string())
        );
        assert_eq!(
            extract_adapter_name("https://github.com/foo/ioBroker.Awesome-Thing.git"),
            Some("awesome-thing".to_string())
        );
        assert_eq!(
            extract_adapter_name("https://github.com/foo/ioBroker.git.git"),
            Some("git".to_string())
        );
        assert_eq!(
            extract_adapter_name(
                "https://raw.githubusercontent.com/ioBroker/ioBroker.zigbee/master/io-package.json"
            ),
            Some("zigbee".to_string())
        );
        assert_eq!(
            extract_adapter_name("https://github.com/ioBroker/ioBroker.admin?tab=readme#top"),
            Some("admin".to_string())
        );
    }

    #[test]
    fn test_extract_adapter_name_without_adapter_segment() {
        assert_eq!(extract_adapter_name("https://github.com/ioBroker/"), None);
        assert_eq!(extract_adapter_name("https://github.com/ioBroker/ioBroker."), None);
        assert_eq!(extract_adapter_name(""), None);
        assert_eq!(extract_adapter_name("https://github.com/foo/ioBroker..git"), None);
    }

    #[test]
    fn test_adapter_entries_skips_metadata_keys() {
        let adapters = adapter_entries(&sample_repo());
        let names: Vec<&str> = adapters.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["admin", "broken", "custom", "zigbee"]);
        assert_eq!(adapters["admin"]["version"], "7.0.23");
    }

    #[test]
    fn test_adapter_entries_of_non_object() {
        assert!(adapter_entries(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_get_adapter_urls() {
        let urls = get_adapter_urls(&sample_repo());
        assert_eq!(urls.len(), 3);
        assert_eq!(urls["admin"], "https://github.com/ioBroker/ioBroker.admin");
        assert_eq!(urls["zigbee"], "https://github.com/ioBroker/ioBroker.zigbee");
        assert_eq!(
            urls["custom"],
            "https://example.com/ioBroker.custom/io-package.json"
        );
        assert!(!urls.contains_key("broken"));
        assert!(!urls.contains_key("_repoInfo"));
    }

    #[test]
    fn test_adapter_urls_round_trip_names() {
        for (name, url) in get_adapter_urls(&sample_repo()) {
            assert_eq!(extract_adapter_name(&url), Some(name));
        }
    }
}
