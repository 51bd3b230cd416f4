// URL normalization into comparison keys

use url::Url;

/// Parse a URL string, accepting bare paths (`/foo`, `foo/bar`) as well as absolute URLs.
fn parse_loose(url: &str) -> Option<Url> {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(parsed) => Some(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            // set_path rather than join: a bare "//x" is a path here, not a host
            let mut base = Url::parse("http://relative.invalid/").ok()?;
            let without_fragment = trimmed.split('#').next().unwrap_or_default();
            let (path, query) = match without_fragment.split_once('?') {
                Some((path, query)) => (path, Some(query)),
                None => (without_fragment, None),
            };
            if path.starts_with('/') {
                base.set_path(path);
            } else {
                base.set_path(&format!("/{}", path));
            }
            base.set_query(query);
            Some(base)
        }
        Err(_) => None,
    }
}

fn strip_trailing_slashes(path: &str) -> String {
    let stripped = path.trim_end_matches('/');
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// Canonical path of a URL: lowercase path, no trailing slashes, `/` for root.
///
/// Scheme, host, query and fragment are discarded. Unparseable input yields `/`.
pub fn canonical_path(url: &str) -> String {
    let path = parse_loose(url)
        .map(|u| u.path().to_lowercase())
        .unwrap_or_default();
    if path.starts_with('/') {
        strip_trailing_slashes(&path)
    } else {
        // opaque URLs such as mailto: have no leading slash
        strip_trailing_slashes(&format!("/{}", path))
    }
}

/// Canonical host + path: lowercase hostname followed by the canonical path.
pub fn canonical_host_path(url: &str) -> String {
    let host = host_of(url).unwrap_or_default();
    format!("{}{}", host, canonical_path(url))
}

/// Lowercase hostname of an absolute URL.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// Query parameter names with a non-blank value, in first-seen order.
pub fn query_keys(url: &str) -> Vec<String> {
    let Some(parsed) = parse_loose(url) else {
        return Vec::new();
    };
    let mut keys: Vec<String> = Vec::new();
    for (key, value) in parsed.query_pairs() {
        if value.is_empty() {
            continue;
        }
        if !keys.iter().any(|k| k == key.as_ref()) {
            keys.push(key.into_owned());
        }
    }
    keys
}

/// True when the URL addresses the site root and carries a query string.
pub fn is_root_with_query(url: &str) -> bool {
    parse_loose(url)
        .map(|u| u.path() == "/" && u.query().is_some_and(|q| !q.is_empty()))
        .unwrap_or(false)
}
