// Old-site equivalents for new-site paths that changed shape

use crate::classify::Classifiers;
use crate::config::MatcherConfig;
use crate::model::{KnownPaths, NewSiteMap, OldSiteMap, Provenance};

/// A proposed old-site path and the heuristic that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: String,
    pub heuristic: &'static str,
}

type Heuristic = fn(&MatcherConfig, &str) -> Vec<String>;

/// Heuristics in priority order. Each proposes paths without checking existence.
const HEURISTICS: &[(&str, Heuristic)] = &[
    ("tool-directory", tool_directory),
    ("tool-rename", tool_rename),
    ("hub-root", hub_root),
    ("page-rename", page_rename),
    ("category-root", category_root),
    ("finder-page", finder_page),
];

/// Trim every trailing `s`: `electric-scooters` -> `electric-scooter`.
fn singular(slug: &str) -> &str {
    slug.trim_end_matches('s')
}

fn tool_directory(config: &MatcherConfig, path: &str) -> Vec<String> {
    path.strip_prefix(config.new_tool_dir.as_str())
        .map(|slug| vec![format!("{}{}", config.old_tool_dir, slug)])
        .unwrap_or_default()
}

fn tool_rename(config: &MatcherConfig, path: &str) -> Vec<String> {
    let Some(slug) = path.strip_prefix(config.new_tool_dir.as_str()) else {
        return Vec::new();
    };
    config
        .tool_renames
        .iter()
        .filter(|rename| rename.new_slug == slug)
        .filter_map(|rename| rename.old_slug.as_deref())
        .filter(|old| !old.is_empty())
        .map(|old| format!("{}{}", config.old_tool_dir, old))
        .collect()
}

fn hub_root(config: &MatcherConfig, path: &str) -> Vec<String> {
    config
        .hub_roots
        .iter()
        .filter(|m| m.new_path == path)
        .map(|m| m.old_path.clone())
        .collect()
}

fn page_rename(config: &MatcherConfig, path: &str) -> Vec<String> {
    config
        .page_renames
        .iter()
        .filter(|m| m.new_path == path)
        .map(|m| m.old_path.clone())
        .collect()
}

fn category_root(config: &MatcherConfig, path: &str) -> Vec<String> {
    config
        .category_roots
        .iter()
        .filter_map(|root| {
            let category = path.strip_prefix(&format!("/{}/", root.root))?;
            let category = category.trim_end_matches('/');
            Some(format!(
                "{}{}{}",
                config.old_tool_dir,
                singular(category),
                root.suffix
            ))
        })
        .collect()
}

fn finder_page(config: &MatcherConfig, path: &str) -> Vec<String> {
    if config.finder_suffix.is_empty()
        || !path.ends_with(config.finder_suffix.as_str())
        || path.starts_with(config.old_tool_dir.trim_end_matches('/'))
    {
        return Vec::new();
    }
    vec![format!("{}{}", config.old_tool_dir, path.trim_matches('/'))]
}

pub struct EquivalenceMatcher {
    config: MatcherConfig,
}

impl EquivalenceMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// A tool listed in the rename table without an old slug is new on this site.
    fn has_no_old_equivalent(&self, path: &str) -> bool {
        let Some(slug) = path.strip_prefix(self.config.new_tool_dir.as_str()) else {
            return false;
        };
        self.config.tool_renames.iter().any(|rename| {
            rename.new_slug == slug && rename.old_slug.as_deref().is_none_or(str::is_empty)
        })
    }

    pub fn heuristic_names() -> Vec<&'static str> {
        HEURISTICS.iter().map(|(name, _)| *name).collect()
    }

    /// Every candidate that exists on the old site, in heuristic order, without
    /// duplicates. Tools marked as having no old equivalent get none.
    pub fn candidates(&self, new_path: &str, old_site: &impl KnownPaths) -> Vec<Candidate> {
        let path = new_path.to_lowercase();
        let mut found: Vec<Candidate> = Vec::new();
        if self.has_no_old_equivalent(&path) {
            return found;
        }

        for &(name, heuristic) in HEURISTICS {
            for proposed in heuristic(&self.config, &path) {
                if old_site.contains_path(&proposed) && !found.iter().any(|c| c.path == proposed) {
                    found.push(Candidate {
                        path: proposed,
                        heuristic: name,
                    });
                }
            }
        }

        found
    }

    /// The candidate a report uses.
    pub fn best(&self, new_path: &str, old_site: &impl KnownPaths) -> Option<Candidate> {
        self.candidates(new_path, old_site).into_iter().next()
    }
}

/// Label every new-site record and link it to the old site: an identical path from
/// an old sitemap first, otherwise the first equivalence candidate.
pub fn resolve_new_site(
    new_site: &mut NewSiteMap,
    old_site: &OldSiteMap,
    classifiers: &Classifiers,
    matcher: &EquivalenceMatcher,
) {
    for (path, record) in new_site.iter_mut() {
        record.label = classifiers.new_site.classify(&record.sitemap_source);

        record.has_old_equivalent = old_site
            .get(path)
            .is_some_and(|old| old.has_source(&Provenance::Sitemap));
        if record.has_old_equivalent {
            record.old_site_path = Some(path.clone());
            continue;
        }

        let candidates = matcher.candidates(path, old_site);
        let Some((first, others)) = candidates.split_first() else {
            continue;
        };
        record.old_site_path = Some(first.path.clone());
        record.notes.push(format!("Guessed via {}", first.heuristic));
        if !others.is_empty() {
            let rest: Vec<&str> = others.iter().map(|c| c.path.as_str()).collect();
            record
                .notes
                .push(format!("Other candidates: {}", rest.join(", ")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_trims_all_trailing_s() {
        assert_eq!(singular("electric-scooters"), "electric-scooter");
        assert_eq!(singular("bikes"), "bike");
        assert_eq!(singular("class"), "cla");
        assert_eq!(singular("skating"), "skating");
    }

    #[test]
    fn category_root_proposals() {
        let config = MatcherConfig::default();
        assert_eq!(
            category_root(&config, "/compare/electric-scooters"),
            vec!["/tool/electric-scooter-comparison".to_string()]
        );
        assert!(category_root(&config, "/deals").is_empty());
    }

    #[test]
    fn finder_page_skips_tool_paths() {
        let config = MatcherConfig::default();
        assert!(finder_page(&config, "/tool/x-finder").is_empty());
        assert!(finder_page(&config, "/tools/x-finder").is_empty());
        assert_eq!(
            finder_page(&config, "/electric-scooter-finder"),
            vec!["/tool/electric-scooter-finder".to_string()]
        );
    }
}
