// Crawl-status junk filtering

use crate::config::JunkFilterConfig;
use crate::normalize::{canonical_path, is_root_with_query, query_keys};

/// True when a crawl-status URL is noise that must not become an old-site record:
/// search-engine redirect junk, comment moderation links, internal search pages and
/// tracking-only homepage variants.
pub fn is_junk_status_url(raw_url: &str, junk: &JunkFilterConfig) -> bool {
    if junk.url_markers.iter().any(|m| raw_url.contains(m.as_str())) {
        return true;
    }

    let path = canonical_path(raw_url);
    if junk.path_markers.iter().any(|m| path.contains(m.as_str())) {
        return true;
    }

    if is_root_with_query(raw_url) {
        let keys = query_keys(raw_url);
        if keys.iter().any(|k| junk.homepage_search_keys.contains(k)) {
            return true;
        }
        if !keys.is_empty() && keys.iter().all(|k| junk.tracking_keys.contains(k)) {
            return true;
        }
    }

    false
}
