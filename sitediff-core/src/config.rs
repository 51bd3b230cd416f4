// Lookup tables and file conventions for an inventory run

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Every fixed table the engine consults. Sections missing from a TOML file keep
/// their built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub sites: SiteConfig,
    pub inputs: InputConfig,
    pub status: StatusConfig,
    pub junk: JunkFilterConfig,
    pub notes: NotesConfig,
    pub classify: ClassifyConfig,
    pub matcher: MatcherConfig,
}

impl MigrationConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// Sites and inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Hostnames whose crawl-status entries belong to the old site.
    pub old_hosts: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            old_hosts: strings(&["eridehero.com", "www.eridehero.com"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub old_dir: String,
    pub new_dir: String,
    pub gsc_dir: String,
    /// File name of the table inside each crawl-status folder.
    pub status_table: String,
    /// Old-site sitemap file names, read in this order.
    pub old_sitemaps: Vec<String>,
    pub redirect_prefix: String,
    pub affiliate_prefix: String,
    pub new_sitemap_suffix: String,
    /// New-site paths with these endings are sitemap self-references, not pages.
    pub non_page_suffixes: Vec<String>,
    pub old_report: String,
    pub new_report: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            old_dir: "old site".to_string(),
            new_dir: "new site".to_string(),
            gsc_dir: "old site/GSC".to_string(),
            status_table: "Table.csv".to_string(),
            old_sitemaps: strings(&[
                "Posts XML Sitemap - ERideHero.xml",
                "Pages XML Sitemap - ERideHero.xml",
                "Category XML Sitemap - ERideHero.xml",
            ]),
            redirect_prefix: "eridehero_rank-math-redirections".to_string(),
            affiliate_prefix: "thirstyaffiliates-export".to_string(),
            new_sitemap_suffix: ".xml".to_string(),
            non_page_suffixes: strings(&[".xml", ".kml"]),
            old_report: "old_site_inventory.csv".to_string(),
            new_report: "new_site_inventory.csv".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Crawl status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFolder {
    pub folder: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Status that always wins over any other once observed.
    pub preferred: String,
    /// Folder name to status label, in ingestion order.
    pub folders: Vec<StatusFolder>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        let folders = [
            ("Indexed pages", "indexed"),
            ("Page with redirect", "redirect"),
            ("Not found (404)", "404"),
            ("Excluded by noindex tag", "noindex"),
            ("Crawled - currently not indexed", "crawled-not-indexed"),
            ("Discovered – currently not indexed", "discovered-not-indexed"),
            ("Blocked by robots.txt", "blocked-robots"),
            ("Alternative page with proper canonical tag", "canonical-alt"),
        ];
        Self {
            preferred: "indexed".to_string(),
            folders: folders
                .iter()
                .map(|(folder, status)| StatusFolder {
                    folder: folder.to_string(),
                    status: status.to_string(),
                })
                .collect(),
        }
    }
}

/// Crawl-status URLs that never become records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JunkFilterConfig {
    /// Substrings of the raw URL.
    pub url_markers: Vec<String>,
    /// Substrings of the canonical path.
    pub path_markers: Vec<String>,
    /// Homepage query keys that mark an internal search or listing page.
    pub homepage_search_keys: Vec<String>,
    /// Homepage variants whose query keys all fall in this set are tracking noise.
    pub tracking_keys: Vec<String>,
}

impl Default for JunkFilterConfig {
    fn default() -> Self {
        Self {
            url_markers: strings(&["cx_tag_filter", "unapproved=", "moderation-hash="]),
            path_markers: strings(&["ck/a?"]),
            homepage_search_keys: strings(&["s", "page_posts"]),
            tracking_keys: strings(&[
                "utm_source",
                "utm_medium",
                "utm_campaign",
                "affiliate",
                "gspk",
                "gsxid",
                "trk",
                "ref",
                "fbclid",
                "stream",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Page-builder artifact suffix whose base path may exist on the new site.
    pub builder_suffix: String,
    pub opt_suffix: String,
    /// Trailing segments left behind by bots and browser user agents.
    pub bot_suffixes: Vec<String>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            builder_suffix: "/1000".to_string(),
            opt_suffix: "/opt".to_string(),
            bot_suffixes: strings(&["firefox", "chrome", "edge", "crios", "webkit", "opr", "version"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapLabel {
    pub file: String,
    pub page_type: String,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    pub category_paths: Vec<String>,
    pub subcategory_pattern: String,
    pub info_paths: Vec<String>,
    pub listicle_prefixes: Vec<String>,
    /// New-site sitemaps whose name starts with this are always products.
    pub products_sitemap_prefix: String,
    pub new_sitemaps: Vec<SitemapLabel>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        let new_sitemaps = [
            ("post-sitemap.xml", "post", "Posts"),
            ("page-sitemap.xml", "page", "Pages"),
            ("tool-sitemap.xml", "tool", "Tools"),
            ("category-sitemap.xml", "category", "Category Archives"),
            ("compare-sitemap.xml", "compare", "Compare Pages"),
            ("comparison-sitemap.xml", "comparison-cpt", "Curated Comparisons"),
            ("coupons-sitemap.xml", "coupons", "Coupons"),
            ("local-sitemap.xml", "local", "Local Sitemap"),
        ];
        Self {
            category_paths: strings(&[
                "/electric-scooters",
                "/hoverboards",
                "/electric-skateboards",
                "/electric-unicycles",
                "/skating",
                "/electric-bikes",
            ]),
            subcategory_pattern: "^/electric-scooters/(reviews|articles|buying-guides)".to_string(),
            info_paths: strings(&[
                "/about",
                "/contact",
                "/how-we-test",
                "/disclaimers",
                "/privacy-policy",
                "/privacy",
                "/terms-conditions",
                "/terms",
                "/editorial-policy",
                "/editorial",
                "/cookies",
                "/opt-out-preferences",
            ]),
            listicle_prefixes: strings(&[
                "best-", "fastest-", "how-to-", "how-", "what-", "where-", "can-you-", "are-",
            ]),
            products_sitemap_prefix: "products-sitemap".to_string(),
            new_sitemaps: new_sitemaps
                .iter()
                .map(|(file, page_type, group)| SitemapLabel {
                    file: file.to_string(),
                    page_type: page_type.to_string(),
                    group: group.to_string(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Equivalence matching
// ---------------------------------------------------------------------------

/// A renamed tool slug. `old_slug = None` marks a tool with no old-site equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRename {
    pub new_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMapping {
    pub new_path: String,
    pub old_path: String,
}

/// `/{root}/{category}` on the new site was `/tool/{singular category}{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRoot {
    pub root: String,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub new_tool_dir: String,
    pub old_tool_dir: String,
    pub tool_renames: Vec<ToolRename>,
    pub hub_roots: Vec<PathMapping>,
    pub page_renames: Vec<PathMapping>,
    pub category_roots: Vec<CategoryRoot>,
    pub finder_suffix: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        let renames = [
            ("battery-charging-time-calculator", Some("battery-charge-time-calculator")),
            ("electric-scooter-range-calculator", Some("electric-scooter-range-calculator")),
            ("electric-scooter-laws-by-state", None),
            ("electric-bike-laws-by-state", None),
        ];
        let mapping = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(new_path, old_path)| PathMapping {
                    new_path: new_path.to_string(),
                    old_path: old_path.to_string(),
                })
                .collect::<Vec<_>>()
        };
        Self {
            new_tool_dir: "/tools/".to_string(),
            old_tool_dir: "/tool/".to_string(),
            tool_renames: renames
                .iter()
                .map(|(new_slug, old_slug)| ToolRename {
                    new_slug: new_slug.to_string(),
                    old_slug: old_slug.map(String::from),
                })
                .collect(),
            hub_roots: mapping(&[
                ("/reviews", "/electric-scooters/reviews"),
                ("/articles", "/electric-scooters/articles"),
                ("/buying-guides", "/electric-scooters/buying-guides"),
            ]),
            page_renames: mapping(&[
                ("/editorial", "/editorial-policy"),
                ("/terms", "/terms-conditions"),
                ("/privacy", "/privacy-policy"),
                (
                    "/tools/electric-scooter-range-calculator",
                    "/electric-scooter-range-calculator",
                ),
            ]),
            category_roots: [("deals", "-deals"), ("coupons", "-coupons"), ("compare", "-comparison")]
                .iter()
                .map(|(root, suffix)| CategoryRoot {
                    root: root.to_string(),
                    suffix: suffix.to_string(),
                })
                .collect(),
            finder_suffix: "-finder".to_string(),
        }
    }
}
