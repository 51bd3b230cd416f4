// Readers for exported CSV tables: crawl status, redirect rules, affiliate links

use crate::error::Result;
use crate::records::{AffiliateLink, RedirectRule, StatusRow};
use csv::StringRecord;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

pub const STATUS_URL_COLUMN: &str = "URL";
pub const STATUS_LAST_CRAWLED_COLUMN: &str = "Last crawled";

pub const REDIRECT_SOURCE_COLUMN: &str = "source";
pub const REDIRECT_DESTINATION_COLUMN: &str = "destination";
pub const REDIRECT_TYPE_COLUMN: &str = "type";
pub const REDIRECT_STATUS_COLUMN: &str = "status";

pub const AFFILIATE_SLUG_COLUMN: &str = "Slug";
pub const AFFILIATE_NAME_COLUMN: &str = "Name";
pub const AFFILIATE_DESTINATION_COLUMN: &str = "Destination URL";
pub const AFFILIATE_CATEGORIES_COLUMN: &str = "Categories (separated by semicolons)";
pub const AFFILIATE_GEO_COLUMN: &str =
    "Geolocations Links (format: AU:http://google.com.au separated by semicolon)";

/// A header-indexed view over one CSV file.
///
/// Columns are looked up by exact header text. A column missing from the header
/// reads as an empty string on every row.
struct Table {
    reader: csv::Reader<File>,
    headers: StringRecord,
    source: String,
}

impl Table {
    fn open(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers = reader.headers()?.clone();
        Ok(Self {
            reader,
            headers,
            source: path.display().to_string(),
        })
    }

    fn column(&self, name: &str) -> Option<usize> {
        let index = self
            .headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name);
        if index.is_none() {
            debug!("{}: no '{}' column", self.source, name);
        }
        index
    }

    /// Visit every readable row. Unreadable rows are logged and skipped.
    fn for_each_row(mut self, mut visit: impl FnMut(&StringRecord)) {
        let mut record = StringRecord::new();
        let mut row = 1usize;
        loop {
            row += 1;
            match self.reader.read_record(&mut record) {
                Ok(true) => visit(&record),
                Ok(false) => break,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    warn!("{}: stopped at row {}: {}", self.source, row, e);
                    break;
                }
                Err(e) => warn!("{}: skipping row {}: {}", self.source, row, e),
            }
        }
    }
}

fn cell(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Read a crawl-status table into `(URL, Last crawled)` rows.
///
/// A missing file is an empty table. Rows without a URL are skipped.
pub fn read_status_table(path: &Path) -> Result<Vec<StatusRow>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let table = Table::open(path)?;
    let url_col = table.column(STATUS_URL_COLUMN);
    let crawled_col = table.column(STATUS_LAST_CRAWLED_COLUMN);

    let mut rows = Vec::new();
    table.for_each_row(|record| {
        let url = cell(record, url_col);
        if !url.is_empty() {
            rows.push(StatusRow::new(url, cell(record, crawled_col)));
        }
    });
    Ok(rows)
}

/// Normalize a redirect `source` cell to a leading-slash lowercase path.
pub fn redirect_source_path(source: &str) -> String {
    format!("/{}", source.trim().trim_matches('/')).to_lowercase()
}

/// Read a redirect-rule export, one rule per row with a non-empty source.
pub fn read_redirect_rules(path: &Path) -> Result<Vec<RedirectRule>> {
    let table = Table::open(path)?;
    let source_col = table.column(REDIRECT_SOURCE_COLUMN);
    let dest_col = table.column(REDIRECT_DESTINATION_COLUMN);
    let type_col = table.column(REDIRECT_TYPE_COLUMN);
    let status_col = table.column(REDIRECT_STATUS_COLUMN);

    let mut rules = Vec::new();
    table.for_each_row(|record| {
        let source_raw = cell(record, source_col);
        if source_raw.is_empty() {
            return;
        }
        rules.push(RedirectRule {
            source: redirect_source_path(&source_raw),
            source_raw,
            destination: cell(record, dest_col),
            kind: cell(record, type_col),
            status: cell(record, status_col),
        });
    });
    Ok(rules)
}

/// Read an affiliate-link export, one link per row with a non-empty slug.
pub fn read_affiliate_links(path: &Path) -> Result<Vec<AffiliateLink>> {
    let table = Table::open(path)?;
    let slug_col = table.column(AFFILIATE_SLUG_COLUMN);
    let name_col = table.column(AFFILIATE_NAME_COLUMN);
    let dest_col = table.column(AFFILIATE_DESTINATION_COLUMN);
    let cat_col = table.column(AFFILIATE_CATEGORIES_COLUMN);
    let geo_col = table.column(AFFILIATE_GEO_COLUMN);

    let mut links = Vec::new();
    table.for_each_row(|record| {
        let slug = cell(record, slug_col);
        if slug.is_empty() {
            return;
        }
        links.push(AffiliateLink {
            slug,
            name: cell(record, name_col),
            destination_url: cell(record, dest_col),
            category: cell(record, cat_col),
            has_geo_links: !cell(record, geo_col).is_empty(),
        });
    });
    Ok(links)
}
