// Tests for old-site and new-site classification

use sitediff_core::classify::{
    Classifiers, NewSiteClassifier, Predicate, Rule, RuleSet, old_site_rules, uncategorised,
};
use sitediff_core::config::{ClassifyConfig, ConfigError, MigrationConfig};
use sitediff_core::model::PageLabel;

fn old_rules() -> RuleSet {
    old_site_rules(&ClassifyConfig::default()).unwrap()
}

fn label(path: &str) -> (String, String) {
    let label = old_rules().classify(path);
    (label.page_type, label.group)
}

fn expect(path: &str, page_type: &str, group: &str) {
    assert_eq!(
        label(path),
        (page_type.to_string(), group.to_string()),
        "path: {}",
        path
    );
}

// ============================================================================
// Old-site rules
// ============================================================================

#[test]
fn test_products() {
    expect("/products/segway-ninebot-max", "product", "Products");
}

#[test]
fn test_tool_groups() {
    expect("/tool/electric-scooter-finder", "tool", "Tools — Finders");
    expect("/tools/scooter-comparison", "tool", "Tools — Comparison");
    expect("/tool/electric-scooter-deals", "tool", "Tools — Deals");
    expect("/tool/electric-bike-coupons", "tool", "Tools — Coupons");
    expect("/tool/battery-charge-time-calculator", "tool", "Tools — Calculators");
    expect("/tool/weight-limits", "tool", "Tools — Other");
}

#[test]
fn test_tool_keyword_order() {
    // finder is checked before comparison
    expect("/tool/finder-comparison", "tool", "Tools — Finders");
}

#[test]
fn test_affiliate_redirects() {
    expect("/go/segway", "affiliate-redirect", "Affiliate Redirects (/go/)");
    expect(
        "/recommends/some-brand",
        "affiliate-redirect",
        "Affiliate Redirects (/recommends/)",
    );
}

#[test]
fn test_author_pages() {
    expect("/author/jane/page/2", "author-pagination", "Author Pages — Pagination");
    expect("/author/jane", "author", "Author Pages");
}

#[test]
fn test_archives_before_pagination() {
    expect("/electric-scooters", "category", "Category Archives");
    expect("/electric-scooters/reviews", "archive", "Sub-category Archives");
    expect("/electric-scooters/reviews/page/2", "archive", "Sub-category Archives");
    expect("/hoverboards/page/3", "pagination", "Pagination");
}

#[test]
fn test_pagination_before_blog_prefix() {
    expect("/blog/page/3", "pagination", "Pagination");
    expect("/blog/old-post", "post", "Posts (blog/ prefix — old URL)");
    expect("/review/old-review", "post", "Posts (review/ prefix — old URL)");
}

#[test]
fn test_compare_and_deals() {
    expect("/compare/a-vs-b", "compare", "Compare Pages");
    expect("/deals/electric-scooters", "deals", "Deals Pages");
}

#[test]
fn test_info_and_login_pages() {
    expect("/about", "page", "Info / Legal Pages");
    expect("/privacy-policy", "page", "Info / Legal Pages");
    expect("/login", "page", "Login / Auth Pages");
    expect("/log-in/reset", "page", "Login / Auth Pages");
}

#[test]
fn test_feeds() {
    expect("/feed", "feed", "RSS Feeds");
    expect("/some-post/feed", "feed", "RSS Feeds");
    expect("/category/feed/atom", "feed", "RSS Feeds");
}

#[test]
fn test_homepage() {
    expect("/", "page", "Homepage");
}

#[test]
fn test_reviews_before_listicles() {
    expect("/segway-ninebot-max-review", "post", "Reviews");
    expect("/best-scooter-review", "post", "Reviews");
}

#[test]
fn test_listicles() {
    expect("/best-electric-scooters", "post", "Guides / Listicles");
    expect("/how-to-fold-a-scooter", "post", "Guides / Listicles");
    expect("/are-scooters-legal", "post", "Guides / Listicles");
}

#[test]
fn test_single_segment_and_fallback() {
    expect("/scooter-maintenance-tips", "post", "Posts — Other");
    expect("/some/nested/page", "unknown", "Uncategorised");
}

#[test]
fn test_classification_ignores_case() {
    expect("/Products/Thing", "product", "Products");
}

#[test]
fn test_matching_rule_names() {
    let rules = old_rules();
    assert_eq!(
        rules.matching_rule("/tool/electric-scooter-finder").map(|r| r.name.as_str()),
        Some("tools-finder")
    );
    assert_eq!(
        rules.matching_rule("/best-electric-scooters").map(|r| r.name.as_str()),
        Some("listicle")
    );
    assert!(rules.matching_rule("/a/b/c").is_none());
}

#[test]
fn test_rule_names_are_unique() {
    let rules = old_rules();
    let mut names: Vec<&str> = rules.rules().iter().map(|r| r.name.as_str()).collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

// ============================================================================
// Substituted rule lists
// ============================================================================

#[test]
fn test_custom_rule_list_first_match_wins() {
    let rules = RuleSet::new(
        vec![
            Rule::new("docs", Predicate::Prefix(vec!["/docs/".into()]), "doc", "Docs"),
            Rule::new("any", Predicate::SingleSegment, "page", "Pages"),
        ],
        uncategorised(),
    );

    assert_eq!(rules.classify("/docs/intro"), PageLabel::new("doc", "Docs"));
    assert_eq!(rules.classify("/pricing"), PageLabel::new("page", "Pages"));
    assert_eq!(rules.classify("/a/b"), PageLabel::new("unknown", "Uncategorised"));
}

#[test]
fn test_combined_predicates() {
    let both = Predicate::All(vec![
        Predicate::Prefix(vec!["/shop/".into()]),
        Predicate::Suffix(vec!["-sale".into()]),
    ]);
    assert!(both.matches("/shop/summer-sale"));
    assert!(!both.matches("/shop/summer"));

    let either = Predicate::Any(vec![
        Predicate::Exact(vec!["/a".into()]),
        Predicate::Contains(vec!["xyz".into()]),
    ]);
    assert!(either.matches("/a"));
    assert!(either.matches("/qxyzq"));
    assert!(!either.matches("/b"));
}

#[test]
fn test_configured_tables_match_regardless_of_case() {
    let config = MigrationConfig::from_toml_str(
        "[classify]\n\
         category_paths = [\"/Electric-Unicycles\"]\n\
         info_paths = [\"/About-Us\"]\n\
         listicle_prefixes = [\"Top-\"]\n",
    )
    .unwrap();
    let rules = old_site_rules(&config.classify).unwrap();

    assert_eq!(
        rules.classify("/electric-unicycles"),
        PageLabel::new("category", "Category Archives")
    );
    assert_eq!(
        rules.classify("/About-Us"),
        PageLabel::new("page", "Info / Legal Pages")
    );
    assert_eq!(
        rules.classify("/top-10-scooters/x"),
        PageLabel::new("post", "Guides / Listicles")
    );
}

#[test]
fn test_invalid_subcategory_pattern() {
    let tables = ClassifyConfig {
        subcategory_pattern: "(unclosed".to_string(),
        ..ClassifyConfig::default()
    };
    let result = old_site_rules(&tables);
    assert!(matches!(result, Err(ConfigError::PatternError { .. })));
}

// ============================================================================
// New-site classification
// ============================================================================

#[test]
fn test_new_site_products_prefix() {
    let classifier = NewSiteClassifier::new(&ClassifyConfig::default());
    assert_eq!(
        classifier.classify("products-sitemap2.xml"),
        PageLabel::new("product", "Products")
    );
}

#[test]
fn test_new_site_table_lookup() {
    let classifier = NewSiteClassifier::new(&ClassifyConfig::default());
    assert_eq!(classifier.classify("post-sitemap.xml"), PageLabel::new("post", "Posts"));
    assert_eq!(
        classifier.classify("comparison-sitemap.xml"),
        PageLabel::new("comparison-cpt", "Curated Comparisons")
    );
    assert_eq!(
        classifier.classify("mystery-sitemap.xml"),
        PageLabel::new("unknown", "Uncategorised")
    );
}

#[test]
fn test_classifiers_from_config() {
    let classifiers = Classifiers::from_config(&ClassifyConfig::default()).unwrap();
    assert_eq!(classifiers.old_site.classify("/").group, "Homepage");
    assert_eq!(classifiers.new_site.classify("tool-sitemap.xml").group, "Tools");
}
