// Tests for URL normalization and junk filtering

use sitediff_core::config::JunkFilterConfig;
use sitediff_core::filter::is_junk_status_url;
use sitediff_core::normalize::{
    canonical_host_path, canonical_path, host_of, is_root_with_query, query_keys,
};

// ============================================================================
// Canonical path
// ============================================================================

#[test]
fn test_canonical_path_lowercases_and_strips_trailing_slash() {
    assert_eq!(canonical_path("https://Example.com/Foo/"), "/foo");
    assert_eq!(canonical_path("https://example.com/a/b/"), "/a/b");
}

#[test]
fn test_canonical_path_root() {
    assert_eq!(canonical_path("https://example.com/"), "/");
    assert_eq!(canonical_path("https://example.com"), "/");
    assert_eq!(canonical_path("/"), "/");
}

#[test]
fn test_canonical_path_discards_query_and_fragment() {
    assert_eq!(canonical_path("https://example.com/post/?ref=home#top"), "/post");
    assert_eq!(canonical_path("/post?tag=aff-20"), "/post");
}

#[test]
fn test_canonical_path_accepts_bare_paths() {
    assert_eq!(canonical_path("/Foo/"), "/foo");
    assert_eq!(canonical_path("foo/bar/"), "/foo/bar");
}

#[test]
fn test_canonical_path_unparseable_is_root() {
    assert_eq!(canonical_path("http://[::1"), "/");
}

#[test]
fn test_canonical_path_keeps_inner_double_slash() {
    assert_eq!(canonical_path("https://example.com/a//b/"), "/a//b");
}

#[test]
fn test_canonical_path_is_idempotent() {
    let inputs = [
        "https://Example.com/Foo/",
        "https://example.com/",
        "https://example.com/a//b/",
        "https://example.com//leading",
        "https://example.com/a%20b/",
        "https://example.com/a/../b",
        "/already/canonical",
        "relative/path/",
        "http://[::1",
    ];
    for input in inputs {
        let once = canonical_path(input);
        assert_eq!(canonical_path(&once), once, "input: {}", input);
    }
}

// ============================================================================
// Canonical host + path
// ============================================================================

#[test]
fn test_canonical_host_path() {
    assert_eq!(
        canonical_host_path("https://WWW.Example.com/Foo/"),
        "www.example.com/foo"
    );
    assert_eq!(canonical_host_path("https://example.com/"), "example.com/");
}

#[test]
fn test_canonical_host_path_distinguishes_hosts() {
    assert_ne!(
        canonical_host_path("https://example.com/a"),
        canonical_host_path("https://www.example.com/a")
    );
    assert_eq!(
        canonical_host_path("http://example.com/a/"),
        canonical_host_path("https://example.com/a")
    );
}

#[test]
fn test_canonical_host_path_without_host() {
    assert_eq!(canonical_host_path("/just/a/path/"), "/just/a/path");
    assert_eq!(host_of("/just/a/path"), None);
}

// ============================================================================
// Query helpers
// ============================================================================

#[test]
fn test_query_keys_skip_blank_values() {
    let keys = query_keys("https://example.com/?utm_source=x&s=&ref=y&utm_source=z");
    assert_eq!(keys, vec!["utm_source".to_string(), "ref".to_string()]);
}

#[test]
fn test_is_root_with_query() {
    assert!(is_root_with_query("https://example.com/?s=scooter"));
    assert!(is_root_with_query("https://example.com?s=scooter"));
    assert!(!is_root_with_query("https://example.com/"));
    assert!(!is_root_with_query("https://example.com/post?s=scooter"));
}

// ============================================================================
// Junk filter
// ============================================================================

#[test]
fn test_junk_markers_in_raw_url() {
    let junk = JunkFilterConfig::default();
    assert!(is_junk_status_url(
        "https://eridehero.com/shop?cx_tag_filter=1",
        &junk
    ));
    assert!(is_junk_status_url(
        "https://eridehero.com/post/?unapproved=12&moderation-hash=ab",
        &junk
    ));
}

#[test]
fn test_junk_homepage_search() {
    let junk = JunkFilterConfig::default();
    assert!(is_junk_status_url("https://eridehero.com/?s=scooter", &junk));
    assert!(is_junk_status_url("https://eridehero.com/?page_posts=3", &junk));
}

#[test]
fn test_junk_homepage_tracking_only() {
    let junk = JunkFilterConfig::default();
    assert!(is_junk_status_url(
        "https://eridehero.com/?utm_source=fb&ref=newsletter",
        &junk
    ));
    assert!(!is_junk_status_url(
        "https://eridehero.com/?utm_source=fb&color=red",
        &junk
    ));
}

#[test]
fn test_not_junk() {
    let junk = JunkFilterConfig::default();
    assert!(!is_junk_status_url("https://eridehero.com/", &junk));
    assert!(!is_junk_status_url("https://eridehero.com/?s=", &junk));
    assert!(!is_junk_status_url(
        "https://eridehero.com/best-scooters?utm_source=fb",
        &junk
    ));
}
