// Report rows, CSV output and run summaries

use crate::model::{NewSiteMap, OldSiteMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// One row of the old-site inventory. Field order is column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldSiteRow {
    pub path: String,
    pub page_type: String,
    pub group: String,
    pub sources: String,
    pub gsc_status: String,
    pub gsc_last_crawled: String,
    pub has_rankmath_redirect: String,
    pub rankmath_type: String,
    pub rankmath_dest: String,
    pub is_thirstyaffiliate: String,
    pub ta_name: String,
    pub ta_dest_url: String,
    pub exists_on_new_site: String,
    pub new_site_path: String,
    pub notes: String,
}

/// One row of the new-site inventory. Field order is column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSiteRow {
    pub path: String,
    pub page_type: String,
    pub group: String,
    pub sitemap_source: String,
    pub has_old_equivalent: String,
    pub old_site_path: String,
    pub notes: String,
}

fn yes_or_empty(flag: bool) -> String {
    if flag { "yes".to_string() } else { String::new() }
}

fn yes_or_no(flag: bool) -> String {
    if flag { "yes".to_string() } else { "no".to_string() }
}

/// Old-site rows sorted by (group, path).
pub fn old_site_rows(records: &OldSiteMap) -> Vec<OldSiteRow> {
    let mut rows: Vec<OldSiteRow> = records
        .values()
        .map(|record| {
            let status = record.status.as_ref();
            let redirect = record.redirect.as_ref();
            let affiliate = record.affiliate.as_ref();
            OldSiteRow {
                path: record.path.clone(),
                page_type: record.label.page_type.clone(),
                group: record.label.group.clone(),
                sources: record.sources.iter().cloned().collect::<Vec<_>>().join(", "),
                gsc_status: status.map(|s| s.status.clone()).unwrap_or_default(),
                gsc_last_crawled: status.map(|s| s.last_crawled.clone()).unwrap_or_default(),
                has_rankmath_redirect: yes_or_empty(redirect.is_some()),
                rankmath_type: redirect.map(|r| r.kind.clone()).unwrap_or_default(),
                rankmath_dest: redirect.map(|r| r.destination.clone()).unwrap_or_default(),
                is_thirstyaffiliate: yes_or_empty(affiliate.is_some()),
                ta_name: affiliate.map(|a| a.name.clone()).unwrap_or_default(),
                ta_dest_url: affiliate
                    .map(|a| a.destination_url.clone())
                    .unwrap_or_default(),
                exists_on_new_site: yes_or_no(record.exists_on_new_site()),
                new_site_path: record.new_site_path.clone().unwrap_or_default(),
                notes: record.notes.join("; "),
            }
        })
        .collect();

    rows.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.path.cmp(&b.path)));
    rows
}

/// New-site rows sorted by path.
pub fn new_site_rows(records: &NewSiteMap) -> Vec<NewSiteRow> {
    // BTreeMap iteration is already path order
    records
        .values()
        .map(|record| NewSiteRow {
            path: record.path.clone(),
            page_type: record.label.page_type.clone(),
            group: record.label.group.clone(),
            sitemap_source: record.sitemap_source.clone(),
            has_old_equivalent: yes_or_no(record.has_old_equivalent),
            old_site_path: record.old_site_path.clone().unwrap_or_default(),
            notes: record.notes.join("; "),
        })
        .collect()
}

/// Write rows as CSV with a header line taken from the row's field names.
pub fn write_csv<T: Serialize>(rows: &[T], path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Totals for the side-channel summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub old_total: usize,
    pub old_by_group: BTreeMap<String, usize>,
    pub old_by_status: BTreeMap<String, usize>,
    pub indexed: usize,
    pub with_redirect: usize,
    pub affiliate_links: usize,
    pub on_new_site: usize,
    pub new_total: usize,
    pub new_by_group: BTreeMap<String, usize>,
    pub new_with_old_equivalent: usize,
    pub new_guessed: usize,
    pub warnings: Vec<String>,
}

impl InventorySummary {
    pub fn from_rows(old: &[OldSiteRow], new: &[NewSiteRow], warnings: &[String]) -> Self {
        let mut summary = InventorySummary {
            old_total: old.len(),
            new_total: new.len(),
            warnings: warnings.to_vec(),
            ..Default::default()
        };

        for row in old {
            *summary.old_by_group.entry(row.group.clone()).or_insert(0) += 1;
            if !row.gsc_status.is_empty() {
                *summary.old_by_status.entry(row.gsc_status.clone()).or_insert(0) += 1;
            }
            if row.gsc_status == "indexed" {
                summary.indexed += 1;
            }
            if row.has_rankmath_redirect == "yes" {
                summary.with_redirect += 1;
            }
            if row.is_thirstyaffiliate == "yes" {
                summary.affiliate_links += 1;
            }
            if row.exists_on_new_site == "yes" {
                summary.on_new_site += 1;
            }
        }

        for row in new {
            *summary.new_by_group.entry(row.group.clone()).or_insert(0) += 1;
            if row.has_old_equivalent == "yes" {
                summary.new_with_old_equivalent += 1;
            } else if !row.old_site_path.is_empty() {
                summary.new_guessed += 1;
            }
        }

        summary
    }
}

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

fn section(report: &mut String, title: &str) {
    report.push_str(RULE);
    report.push_str(title);
    report.push('\n');
    report.push_str(RULE);
    report.push('\n');
}

fn push_counts(report: &mut String, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        report.push_str("  (none)\n");
        return;
    }
    let width = counts.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (name, count) in counts {
        let pad = width - name.chars().count();
        report.push_str(&format!("  {}{}  {:>6}\n", name, " ".repeat(pad), count));
    }
}

pub fn generate_text_summary(summary: &InventorySummary) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                        SITE MIGRATION URL INVENTORY\n");
    report.push_str(RULE);
    report.push('\n');

    section(&mut report, "OLD SITE");
    report.push_str(&format!("Total URLs:                     {}\n", summary.old_total));
    report.push_str(&format!("Indexed:                        {}\n", summary.indexed));
    report.push_str(&format!("With redirect rule:             {}\n", summary.with_redirect));
    report.push_str(&format!("Affiliate links:                {}\n", summary.affiliate_links));
    report.push_str(&format!("Also on new site (same path):   {}\n", summary.on_new_site));
    report.push_str("\nBy group:\n");
    push_counts(&mut report, &summary.old_by_group);
    report.push_str("\nBy crawl status:\n");
    push_counts(&mut report, &summary.old_by_status);
    report.push('\n');

    section(&mut report, "NEW SITE");
    report.push_str(&format!("Total URLs:                     {}\n", summary.new_total));
    report.push_str(&format!(
        "Old equivalent (same path):     {}\n",
        summary.new_with_old_equivalent
    ));
    report.push_str(&format!("Old equivalent (guessed):       {}\n", summary.new_guessed));
    report.push_str("\nBy group:\n");
    push_counts(&mut report, &summary.new_by_group);
    report.push('\n');

    if !summary.warnings.is_empty() {
        section(&mut report, "WARNINGS");
        for warning in &summary.warnings {
            report.push_str(&format!("  ! {}\n", warning));
        }
        report.push('\n');
    }

    report
}

pub fn generate_json_summary(summary: &InventorySummary) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "sitediff",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "old_site": {
                "total": summary.old_total,
                "indexed": summary.indexed,
                "with_redirect": summary.with_redirect,
                "affiliate_links": summary.affiliate_links,
                "on_new_site": summary.on_new_site,
                "by_group": summary.old_by_group,
                "by_status": summary.old_by_status
            },
            "new_site": {
                "total": summary.new_total,
                "with_old_equivalent": summary.new_with_old_equivalent,
                "guessed": summary.new_guessed,
                "by_group": summary.new_by_group
            },
            "warnings": summary.warnings
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
