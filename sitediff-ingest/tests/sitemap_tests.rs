// Tests for sitemap <loc> extraction

use sitediff_ingest::error::IngestError;
use sitediff_ingest::sitemap::{SitemapMode, parse_sitemap, read_sitemap};
use std::io::Write;
use tempfile::NamedTempFile;

const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc> https://example.com/first/ </loc>
    <lastmod>2024-01-01</lastmod>
  </url>
  <url><loc>https://example.com/second?a=1&amp;b=2</loc></url>
</urlset>"#;

const INDEX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/post-sitemap.xml</loc></sitemap>
  <sitemap><loc>https://example.com/page-sitemap.xml</loc></sitemap>
</sitemapindex>"#;

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_urlset_in_document_order() {
    let locs = parse_sitemap(URLSET, SitemapMode::UrlsOnly).unwrap();
    assert_eq!(
        locs,
        vec![
            "https://example.com/first/".to_string(),
            "https://example.com/second?a=1&b=2".to_string(),
        ]
    );
}

#[test]
fn test_parse_index_entries_only_when_requested() {
    assert!(parse_sitemap(INDEX, SitemapMode::UrlsOnly).unwrap().is_empty());

    let locs = parse_sitemap(INDEX, SitemapMode::WithIndex).unwrap();
    assert_eq!(locs.len(), 2);
    assert_eq!(locs[0], "https://example.com/post-sitemap.xml");
}

#[test]
fn test_parse_without_namespace() {
    let xml = "<urlset><url><loc>https://example.com/bare</loc></url></urlset>";
    let locs = parse_sitemap(xml, SitemapMode::UrlsOnly).unwrap();
    assert_eq!(locs, vec!["https://example.com/bare".to_string()]);
}

#[test]
fn test_parse_with_prefixed_namespace() {
    let xml = r#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
        <sm:url><sm:loc>https://example.com/prefixed</sm:loc></sm:url>
    </sm:urlset>"#;
    let locs = parse_sitemap(xml, SitemapMode::UrlsOnly).unwrap();
    assert_eq!(locs, vec!["https://example.com/prefixed".to_string()]);
}

#[test]
fn test_parse_ignores_loc_outside_url() {
    let xml = "<urlset><loc>https://example.com/stray</loc><url><loc>https://example.com/ok</loc></url></urlset>";
    let locs = parse_sitemap(xml, SitemapMode::WithIndex).unwrap();
    assert_eq!(locs, vec!["https://example.com/ok".to_string()]);
}

#[test]
fn test_parse_skips_empty_loc() {
    let xml = "<urlset><url><loc>  </loc></url><url><loc>https://example.com/a</loc></url></urlset>";
    let locs = parse_sitemap(xml, SitemapMode::UrlsOnly).unwrap();
    assert_eq!(locs.len(), 1);
}

#[test]
fn test_parse_resolves_references_and_cdata() {
    let xml = "<urlset>\
        <url><loc>https://example.com/&#47;a&#x2F;b?x=1&amp;y=&quot;2&quot;</loc></url>\
        <url><loc><![CDATA[ https://example.com/c?p=1&q=2 ]]></loc></url>\
        <url><loc>https://example.com/d&unknown;e</loc></url>\
        </urlset>";
    let locs = parse_sitemap(xml, SitemapMode::UrlsOnly).unwrap();
    assert_eq!(
        locs,
        vec![
            "https://example.com//a/b?x=1&y=\"2\"".to_string(),
            "https://example.com/c?p=1&q=2".to_string(),
            "https://example.com/d&unknown;e".to_string(),
        ]
    );
}

#[test]
fn test_parse_truncated_document_is_an_error() {
    let xml = "<urlset><url><loc>https://example.com/a</loc></url>";
    assert!(parse_sitemap(xml, SitemapMode::UrlsOnly).is_err());
}

#[test]
fn test_parse_mismatched_tags_is_an_error() {
    let xml = "<urlset><url><loc>https://example.com/a</loc></wrong></urlset>";
    assert!(parse_sitemap(xml, SitemapMode::UrlsOnly).is_err());
}

#[test]
fn test_parse_non_xml_is_an_error() {
    assert!(parse_sitemap("this is not a sitemap", SitemapMode::UrlsOnly).is_err());
    assert!(parse_sitemap("", SitemapMode::UrlsOnly).is_err());
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_read_sitemap_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{}", URLSET)?;

    let locs = read_sitemap(file.path(), SitemapMode::WithIndex)?;
    assert_eq!(locs.len(), 2);
    Ok(())
}

#[test]
fn test_read_malformed_sitemap_reports_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "<urlset><url>").unwrap();

    let err = read_sitemap(file.path(), SitemapMode::UrlsOnly).unwrap_err();
    match err {
        IngestError::XmlError { path, .. } => {
            assert_eq!(path, file.path().display().to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_read_missing_sitemap_is_io_error() {
    let err = read_sitemap(
        std::path::Path::new("/definitely/not/here.xml"),
        SitemapMode::UrlsOnly,
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::IoError(_)));
}
