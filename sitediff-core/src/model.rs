use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// A (page_type, group) classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageLabel {
    pub page_type: String,
    pub group: String,
}

impl PageLabel {
    pub fn new(page_type: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            page_type: page_type.into(),
            group: group.into(),
        }
    }
}

/// Which input mentioned an old-site path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Sitemap,
    Status(String),
    RedirectSource,
    Affiliate,
}

impl Provenance {
    pub fn tag(&self) -> String {
        match self {
            Provenance::Sitemap => "sitemap".to_string(),
            Provenance::Status(label) => format!("status:{}", label),
            Provenance::RedirectSource => "redirect-source".to_string(),
            Provenance::Affiliate => "affiliate".to_string(),
        }
    }
}

/// Crawl status observed for one host + path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: String,
    pub last_crawled: String,
    pub raw_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectInfo {
    pub destination: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateInfo {
    pub name: String,
    pub destination_url: String,
}

/// Everything known about one old-site path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OldRecord {
    pub path: String,
    /// First raw URL seen for the path; empty when only derived sources mention it.
    pub raw_url: String,
    pub sources: BTreeSet<String>,
    pub label: PageLabel,
    pub status: Option<StatusEntry>,
    pub redirect: Option<RedirectInfo>,
    pub affiliate: Option<AffiliateInfo>,
    pub new_site_path: Option<String>,
    pub notes: Vec<String>,
}

impl OldRecord {
    pub fn new(path: impl Into<String>, raw_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw_url: raw_url.into(),
            sources: BTreeSet::new(),
            label: PageLabel::default(),
            status: None,
            redirect: None,
            affiliate: None,
            new_site_path: None,
            notes: Vec::new(),
        }
    }

    pub fn has_source(&self, provenance: &Provenance) -> bool {
        self.sources.contains(&provenance.tag())
    }

    pub fn exists_on_new_site(&self) -> bool {
        self.new_site_path.is_some()
    }
}

/// Everything known about one new-site path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub path: String,
    pub url: String,
    pub sitemap_source: String,
    pub label: PageLabel,
    /// The old site has this exact path in its sitemaps.
    pub has_old_equivalent: bool,
    /// Identical path, or the first equivalence candidate.
    pub old_site_path: Option<String>,
    pub notes: Vec<String>,
}

impl NewRecord {
    pub fn new(
        path: impl Into<String>,
        url: impl Into<String>,
        sitemap_source: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            sitemap_source: sitemap_source.into(),
            label: PageLabel::default(),
            has_old_equivalent: false,
            old_site_path: None,
            notes: Vec::new(),
        }
    }
}

pub type OldSiteMap = BTreeMap<String, OldRecord>;
pub type NewSiteMap = BTreeMap<String, NewRecord>;

/// A set of canonical paths that can be checked for membership.
pub trait KnownPaths {
    fn contains_path(&self, path: &str) -> bool;
}

impl<V> KnownPaths for BTreeMap<String, V> {
    fn contains_path(&self, path: &str) -> bool {
        self.contains_key(path)
    }
}

impl KnownPaths for BTreeSet<String> {
    fn contains_path(&self, path: &str) -> bool {
        self.contains(path)
    }
}

impl KnownPaths for HashSet<String> {
    fn contains_path(&self, path: &str) -> bool {
        self.contains(path)
    }
}
