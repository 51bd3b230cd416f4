pub mod discover;
pub mod error;
pub mod records;
pub mod sitemap;
pub mod tables;

pub use error::{IngestError, Result};
pub use records::{AffiliateLink, RedirectRule, StatusRow};
pub use sitemap::{SitemapMode, parse_sitemap, read_sitemap};
pub use tables::{read_affiliate_links, read_redirect_rules, read_status_table};
