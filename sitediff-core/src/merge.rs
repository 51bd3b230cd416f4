// Multi-source record merging for both sites

use crate::classify::Classifiers;
use crate::config::MigrationConfig;
use crate::filter::is_junk_status_url;
use crate::model::{
    AffiliateInfo, NewRecord, NewSiteMap, OldRecord, OldSiteMap, Provenance, RedirectInfo,
    StatusEntry,
};
use crate::normalize::{canonical_host_path, canonical_path, host_of};
use crate::notes::record_notes;
use sitediff_ingest::{AffiliateLink, RedirectRule, StatusRow};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Outcome of offering a newly observed status to a slot that may already hold one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDecision {
    Keep,
    Replace,
}

/// Status precedence: the preferred status is never displaced and always displaces;
/// otherwise the first non-empty status stays.
pub fn merge_status(
    existing: Option<&StatusEntry>,
    incoming: &StatusEntry,
    preferred: &str,
) -> StatusDecision {
    match existing {
        None => StatusDecision::Replace,
        Some(current) if current.status == preferred => StatusDecision::Keep,
        Some(_) if incoming.status == preferred => StatusDecision::Replace,
        Some(current) if current.status.is_empty() => StatusDecision::Replace,
        Some(_) => StatusDecision::Keep,
    }
}

/// Rows of one crawl-status folder, tagged with the folder's status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable {
    pub status: String,
    pub rows: Vec<StatusRow>,
}

impl StatusTable {
    pub fn new(status: impl Into<String>, rows: Vec<StatusRow>) -> Self {
        Self {
            status: status.into(),
            rows,
        }
    }
}

/// Deduplicate crawl-status rows per canonical host + path, in first-seen order.
pub fn collect_status_entries(tables: &[StatusTable], preferred: &str) -> Vec<StatusEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut entries: HashMap<String, StatusEntry> = HashMap::new();

    for table in tables {
        for row in &table.rows {
            let key = canonical_host_path(&row.url);
            let incoming = StatusEntry {
                status: table.status.clone(),
                last_crawled: row.last_crawled.clone(),
                raw_url: row.url.clone(),
            };
            if merge_status(entries.get(&key), &incoming, preferred) == StatusDecision::Replace {
                if !entries.contains_key(&key) {
                    order.push(key.clone());
                }
                entries.insert(key, incoming);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| entries.remove(&key))
        .collect()
}

/// Everything ingested about the old site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OldSiteInputs {
    pub sitemap_urls: Vec<String>,
    pub status_tables: Vec<StatusTable>,
    pub redirects: Vec<RedirectRule>,
    pub affiliates: Vec<AffiliateLink>,
}

/// A new-site sitemap file and its `<loc>` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSitemap {
    pub file: String,
    pub locs: Vec<String>,
}

/// Build the new-site map. The first sitemap to mention a path owns it.
pub fn build_new_site(sitemaps: &[NewSitemap], config: &MigrationConfig) -> NewSiteMap {
    let mut records = NewSiteMap::new();
    for sitemap in sitemaps {
        for loc in &sitemap.locs {
            let path = canonical_path(loc);
            if config
                .inputs
                .non_page_suffixes
                .iter()
                .any(|suffix| path.ends_with(suffix.as_str()))
            {
                continue;
            }
            records
                .entry(path.clone())
                .or_insert_with(|| NewRecord::new(path, loc.clone(), sitemap.file.clone()));
        }
    }
    records
}

/// Accumulates old-site records. Records are created on first mention and only
/// enriched afterwards.
struct OldSiteBuilder<'a> {
    config: &'a MigrationConfig,
    records: OldSiteMap,
    redirects: BTreeMap<String, RedirectRule>,
}

impl<'a> OldSiteBuilder<'a> {
    fn new(config: &'a MigrationConfig) -> Self {
        Self {
            config,
            records: OldSiteMap::new(),
            redirects: BTreeMap::new(),
        }
    }

    fn ensure(&mut self, path: &str, raw_url: &str) -> &mut OldRecord {
        let record = self
            .records
            .entry(path.to_string())
            .or_insert_with(|| OldRecord::new(path, raw_url));
        if record.raw_url.is_empty() && !raw_url.is_empty() {
            record.raw_url = raw_url.to_string();
        }
        record
    }

    fn add_sitemap_urls(&mut self, urls: &[String]) {
        for url in urls {
            let path = canonical_path(url);
            self.ensure(&path, url).sources.insert(Provenance::Sitemap.tag());
        }
    }

    fn add_status_entries(&mut self, entries: &[StatusEntry]) {
        let preferred = self.config.status.preferred.clone();
        let mut skipped = 0usize;

        for entry in entries {
            let on_old_site = host_of(&entry.raw_url)
                .is_some_and(|host| self.config.sites.old_hosts.iter().any(|h| h == &host));
            if !on_old_site || is_junk_status_url(&entry.raw_url, &self.config.junk) {
                skipped += 1;
                continue;
            }

            let path = canonical_path(&entry.raw_url);
            let record = self.ensure(&path, &entry.raw_url);
            record
                .sources
                .insert(Provenance::Status(entry.status.clone()).tag());
            if merge_status(record.status.as_ref(), entry, &preferred) == StatusDecision::Replace {
                record.status = Some(entry.clone());
            }
        }

        debug!("Skipped {} off-site or junk crawl-status entries", skipped);
    }

    fn add_redirect_rules(&mut self, rules: &[RedirectRule]) {
        for rule in rules {
            self.redirects.insert(canonical_path(&rule.source), rule.clone());
        }
        let redirects = std::mem::take(&mut self.redirects);
        for (source, rule) in &redirects {
            let record = self.ensure(source, "");
            record.sources.insert(Provenance::RedirectSource.tag());
            record.redirect = Some(redirect_info(rule));
        }
        self.redirects = redirects;
    }

    fn add_affiliate_links(&mut self, links: &[AffiliateLink]) {
        for link in links {
            let path = canonical_path(&format!("/recommends/{}", link.slug.trim_matches('/')));
            let record = self.ensure(&path, "");
            record.sources.insert(Provenance::Affiliate.tag());
            record.affiliate = Some(AffiliateInfo {
                name: link.name.clone(),
                destination_url: link.destination_url.clone(),
            });
        }
    }

    /// Classify, attach missing redirects, check the new site, annotate.
    fn finish(self, new_site: &NewSiteMap, classifiers: &Classifiers) -> OldSiteMap {
        let Self {
            config,
            mut records,
            redirects,
        } = self;

        for (path, record) in records.iter_mut() {
            record.label = classifiers.old_site.classify(path);

            if record.redirect.is_none()
                && let Some(rule) = redirects.get(path)
            {
                record.redirect = Some(redirect_info(rule));
            }

            if new_site.contains_key(path) {
                record.new_site_path = Some(path.clone());
            }

            record.notes = record_notes(path, &record.raw_url, new_site, &config.notes);
        }

        records
    }
}

fn redirect_info(rule: &RedirectRule) -> RedirectInfo {
    RedirectInfo {
        destination: rule.destination.clone(),
        kind: rule.kind.clone(),
    }
}

/// Build the old-site map, visiting sources in a fixed order: sitemaps, crawl
/// status, redirect rules, affiliate links.
pub fn build_old_site(
    inputs: &OldSiteInputs,
    new_site: &NewSiteMap,
    config: &MigrationConfig,
    classifiers: &Classifiers,
) -> OldSiteMap {
    let mut builder = OldSiteBuilder::new(config);

    builder.add_sitemap_urls(&inputs.sitemap_urls);
    let entries = collect_status_entries(&inputs.status_tables, &config.status.preferred);
    builder.add_status_entries(&entries);
    builder.add_redirect_rules(&inputs.redirects);
    builder.add_affiliate_links(&inputs.affiliates);

    builder.finish(new_site, classifiers)
}
