use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::EndpointsConfig;

/// Canonical origin serving the repository files
pub const CANONICAL_BASE_URL: &str = "https://download.iobroker.net";

/// Mirror ("live") origin serving the same repository files
pub const MIRROR_BASE_URL: &str = "https://repo.iobroker.live";

const LATEST_FILE: &str = "sources-dist-latest.json";
const STABLE_FILE: &str = "sources-dist.json";

/// Latest repository on the canonical origin
pub const IOBROKER_SOURCES_LATEST: &str = "https://download.iobroker.net/sources-dist-latest.json";

/// Stable repository on the canonical origin
pub const IOBROKER_SOURCES_STABLE: &str = "https://download.iobroker.net/sources-dist.json";

/// Latest repository on the mirror origin
pub const IOBROKER_SOURCES_LATEST_LIVE: &str = "https://repo.iobroker.live/sources-dist-latest.json";

/// Stable repository on the mirror origin
pub const IOBROKER_SOURCES_STABLE_LIVE: &str = "https://repo.iobroker.live/sources-dist.json";

/// One of the fixed upstream repository endpoints
///
/// Each source is bound to a file name and an origin. The full URL is resolved
/// against the configured [`EndpointsConfig`], which defaults to the public
/// ioBroker hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositorySource {
    /// `sources-dist-latest.json` on the canonical origin
    Latest,
    /// `sources-dist.json` on the canonical origin
    Stable,
    /// `sources-dist-latest.json` on the mirror origin
    LatestLive,
    /// `sources-dist.json` on the mirror origin
    StableLive,
}

impl RepositorySource {
    /// Every source, in cache slot order
    pub const ALL: [Self; 4] = [Self::Latest, Self::Stable, Self::LatestLive, Self::StableLive];

    /// File name requested from the origin
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Latest | Self::LatestLive => LATEST_FILE,
            Self::Stable | Self::StableLive => STABLE_FILE,
        }
    }

    /// Whether this source is served by the mirror origin
    pub const fn is_mirror(self) -> bool {
        matches!(self, Self::LatestLive | Self::StableLive)
    }

    /// Whether this source carries the latest (unreleased) adapter versions
    pub const fn is_latest(self) -> bool {
        matches!(self, Self::Latest | Self::LatestLive)
    }

    /// Resolve the full URL against the given endpoints
    pub fn url(self, endpoints: &EndpointsConfig) -> String {
        let base = if self.is_mirror() {
            &endpoints.mirror_base
        } else {
            &endpoints.canonical_base
        };
        format!("{}/{}", base.trim_end_matches('/'), self.file_name())
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Latest => 0,
            Self::Stable => 1,
            Self::LatestLive => 2,
            Self::StableLive => 3,
        }
    }
}

impl fmt::Display for RepositorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Latest => "latest",
            Self::Stable => "stable",
            Self::LatestLive => "latest-live",
            Self::StableLive => "stable-live",
        };
        f.write_str(name)
    }
}
