use serde::{Deserialize, Serialize};

/// One row of a crawl-status export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRow {
    pub url: String,
    pub last_crawled: String,
}

impl StatusRow {
    pub fn new(url: impl Into<String>, last_crawled: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            last_crawled: last_crawled.into(),
        }
    }
}

/// A redirect rule keyed by its normalized source path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    /// The `source` cell as exported.
    pub source_raw: String,
    /// Leading-slash, lowercase form of the source.
    pub source: String,
    pub destination: String,
    pub kind: String,
    pub status: String,
}

/// An affiliate link record. Served on the old site at `/recommends/{slug}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateLink {
    pub slug: String,
    pub name: String,
    pub destination_url: String,
    pub category: String,
    pub has_geo_links: bool,
}
