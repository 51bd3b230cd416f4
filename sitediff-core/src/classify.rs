// Ordered first-match-wins page classification

use crate::config::{ClassifyConfig, ConfigError, SitemapLabel};
use crate::model::PageLabel;
use regex::Regex;

/// A test applied to a canonical path.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Path starts with any of the prefixes.
    Prefix(Vec<String>),
    /// Path equals any of the values.
    Exact(Vec<String>),
    /// Path contains any of the substrings.
    Contains(Vec<String>),
    /// Path ends with any of the suffixes.
    Suffix(Vec<String>),
    Pattern(Regex),
    /// Exactly one non-empty segment once surrounding slashes are trimmed.
    SingleSegment,
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Predicate::Prefix(values) => values.iter().any(|v| path.starts_with(v.as_str())),
            Predicate::Exact(values) => values.iter().any(|v| path == v),
            Predicate::Contains(values) => values.iter().any(|v| path.contains(v.as_str())),
            Predicate::Suffix(values) => values.iter().any(|v| path.ends_with(v.as_str())),
            Predicate::Pattern(regex) => regex.is_match(path),
            Predicate::SingleSegment => {
                let trimmed = path.trim_matches('/');
                !trimmed.is_empty() && !trimmed.contains('/')
            }
            Predicate::All(parts) => parts.iter().all(|p| p.matches(path)),
            Predicate::Any(parts) => parts.iter().any(|p| p.matches(path)),
        }
    }
}

fn list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub predicate: Predicate,
    pub label: PageLabel,
}

impl Rule {
    pub fn new(name: &str, predicate: Predicate, page_type: &str, group: &str) -> Self {
        Self {
            name: name.to_string(),
            predicate,
            label: PageLabel::new(page_type, group),
        }
    }
}

/// Rules evaluated top to bottom; the first match decides.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback: PageLabel,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, fallback: PageLabel) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The matching rule, or `None` when the fallback applies.
    pub fn matching_rule(&self, path: &str) -> Option<&Rule> {
        let path = path.to_lowercase();
        self.rules.iter().find(|rule| rule.predicate.matches(&path))
    }

    pub fn classify(&self, path: &str) -> PageLabel {
        self.matching_rule(path)
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

pub fn uncategorised() -> PageLabel {
    PageLabel::new("unknown", "Uncategorised")
}

/// Old-site rules in priority order. Specific prefixes come before generic
/// segment-count rules; reordering changes results.
pub fn old_site_rules(tables: &ClassifyConfig) -> Result<RuleSet, ConfigError> {
    use Predicate::*;

    let subcategory = Regex::new(&tables.subcategory_pattern).map_err(|source| {
        ConfigError::PatternError {
            pattern: tables.subcategory_pattern.clone(),
            source,
        }
    })?;
    let tools = || Prefix(list(&["/tool/", "/tools/"]));
    let tool_with = |keyword: &str| All(vec![tools(), Contains(list(&[keyword]))]);
    let listicles = tables
        .listicle_prefixes
        .iter()
        .map(|prefix| format!("/{}", prefix.to_lowercase()))
        .collect();

    let rules = vec![
        Rule::new("products", Prefix(list(&["/products/"])), "product", "Products"),
        Rule::new("tools-finder", tool_with("finder"), "tool", "Tools — Finders"),
        Rule::new("tools-comparison", tool_with("comparison"), "tool", "Tools — Comparison"),
        Rule::new("tools-deals", tool_with("deals"), "tool", "Tools — Deals"),
        Rule::new("tools-coupons", tool_with("coupons"), "tool", "Tools — Coupons"),
        Rule::new("tools-calculator", tool_with("calculator"), "tool", "Tools — Calculators"),
        Rule::new("tools-other", tools(), "tool", "Tools — Other"),
        Rule::new(
            "affiliate-go",
            Prefix(list(&["/go/"])),
            "affiliate-redirect",
            "Affiliate Redirects (/go/)",
        ),
        Rule::new(
            "affiliate-recommends",
            Prefix(list(&["/recommends/"])),
            "affiliate-redirect",
            "Affiliate Redirects (/recommends/)",
        ),
        Rule::new(
            "author-pagination",
            All(vec![Prefix(list(&["/author/"])), Contains(list(&["/page/"]))]),
            "author-pagination",
            "Author Pages — Pagination",
        ),
        Rule::new("author", Prefix(list(&["/author/"])), "author", "Author Pages"),
        Rule::new(
            "category",
            Exact(lowercased(&tables.category_paths)),
            "category",
            "Category Archives",
        ),
        Rule::new("subcategory", Pattern(subcategory), "archive", "Sub-category Archives"),
        Rule::new("pagination", Contains(list(&["/page/"])), "pagination", "Pagination"),
        Rule::new("compare", Prefix(list(&["/compare/"])), "compare", "Compare Pages"),
        Rule::new("deals", Prefix(list(&["/deals/"])), "deals", "Deals Pages"),
        Rule::new("info", Exact(lowercased(&tables.info_paths)), "page", "Info / Legal Pages"),
        Rule::new("login", Prefix(list(&["/login", "/log-in"])), "page", "Login / Auth Pages"),
        Rule::new(
            "blog-prefix",
            Prefix(list(&["/blog/"])),
            "post",
            "Posts (blog/ prefix — old URL)",
        ),
        Rule::new(
            "review-prefix",
            Prefix(list(&["/review/"])),
            "post",
            "Posts (review/ prefix — old URL)",
        ),
        Rule::new(
            "feed",
            Any(vec![Suffix(list(&["/feed", "/feed/"])), Contains(list(&["feed/"]))]),
            "feed",
            "RSS Feeds",
        ),
        Rule::new("homepage", Exact(list(&["/", ""])), "page", "Homepage"),
        Rule::new("review-slug", Suffix(list(&["-review", "-review/"])), "post", "Reviews"),
        Rule::new("listicle", Prefix(listicles), "post", "Guides / Listicles"),
        Rule::new("single-segment", SingleSegment, "post", "Posts — Other"),
    ];

    Ok(RuleSet::new(rules, uncategorised()))
}

/// Paths are lowercased before matching, so configured tables must be too.
fn lowercased(paths: &[String]) -> Vec<String> {
    paths.iter().map(|path| path.to_lowercase()).collect()
}

/// New-site classification keyed on the sitemap a path came from.
#[derive(Debug, Clone)]
pub struct NewSiteClassifier {
    products_prefix: String,
    table: Vec<SitemapLabel>,
}

impl NewSiteClassifier {
    pub fn new(tables: &ClassifyConfig) -> Self {
        Self {
            products_prefix: tables.products_sitemap_prefix.clone(),
            table: tables.new_sitemaps.clone(),
        }
    }

    pub fn classify(&self, sitemap_source: &str) -> PageLabel {
        if !self.products_prefix.is_empty() && sitemap_source.starts_with(&self.products_prefix) {
            return PageLabel::new("product", "Products");
        }
        self.table
            .iter()
            .find(|entry| entry.file == sitemap_source)
            .map(|entry| PageLabel::new(entry.page_type.clone(), entry.group.clone()))
            .unwrap_or_else(uncategorised)
    }
}

/// Both site classifiers, built once per run.
#[derive(Debug, Clone)]
pub struct Classifiers {
    pub old_site: RuleSet,
    pub new_site: NewSiteClassifier,
}

impl Classifiers {
    pub fn from_config(tables: &ClassifyConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            old_site: old_site_rules(tables)?,
            new_site: NewSiteClassifier::new(tables),
        })
    }
}
