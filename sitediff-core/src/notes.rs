// Free-text annotations for old-site records

use crate::config::NotesConfig;
use crate::model::KnownPaths;
use crate::normalize::query_keys;

/// Notes for an old-site record, in a fixed order: builder artifact suffix,
/// double slashes, query parameters, `/opt` suffix, bot suffix.
pub fn record_notes(
    path: &str,
    raw_url: &str,
    new_site: &impl KnownPaths,
    config: &NotesConfig,
) -> Vec<String> {
    let mut notes = Vec::new();

    if !config.builder_suffix.is_empty()
        && let Some(base) = path.strip_suffix(config.builder_suffix.as_str())
    {
        notes.push(format!(
            "Has {} suffix (Oxygen Builder artifact)",
            config.builder_suffix
        ));
        if new_site.contains_path(base) {
            notes.push(format!("Base path {} exists on new site", base));
        }
    }

    if path.contains("//") && !path.starts_with("//") {
        notes.push("Contains double-slash (malformed URL)".to_string());
    }

    if let Some(note) = query_note(raw_url) {
        notes.push(note);
    }

    if !config.opt_suffix.is_empty() && path.ends_with(config.opt_suffix.as_str()) {
        notes.push("Product URL with /OPT/ suffix (likely Oxygen)".to_string());
    }

    if let Some(bot) = config
        .bot_suffixes
        .iter()
        .find(|name| path.ends_with(&format!("/{}", name)))
    {
        notes.push(format!("Product URL with /{}/ suffix (bot/junk)", bot));
    }

    notes
}

fn query_note(raw_url: &str) -> Option<String> {
    if raw_url.is_empty() {
        return None;
    }
    let keys = query_keys(raw_url);
    let has = |name: &str| keys.iter().any(|k| k == name);

    if has("ids") {
        Some("Comparison tool URL with product IDs".to_string())
    } else if has("tag") {
        Some("Has affiliate ?tag= parameter".to_string())
    } else if has("ref") {
        Some("Has ?ref= tracking parameter".to_string())
    } else if !keys.is_empty() {
        Some(format!("Has query params: {}", keys.join(", ")))
    } else {
        None
    }
}
