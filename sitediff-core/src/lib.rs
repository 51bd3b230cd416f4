pub mod classify;
pub mod config;
pub mod equivalence;
pub mod filter;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod notes;
pub mod pipeline;
pub mod report;

pub use classify::{Classifiers, NewSiteClassifier, Predicate, Rule, RuleSet, old_site_rules};
pub use config::{ConfigError, MigrationConfig};
pub use equivalence::{Candidate, EquivalenceMatcher, resolve_new_site};
pub use merge::{StatusDecision, merge_status};
pub use model::{NewRecord, OldRecord, PageLabel, Provenance};
pub use normalize::{canonical_host_path, canonical_path};
pub use pipeline::{Diagnostics, InputLayout, Inventory, InventoryPipeline, reconcile};

const BANNER: &str = r#"
     _ _           _ _  __  __
 ___(_) |_ ___  __| (_)/ _|/ _|
/ __| | __/ _ \/ _` | | |_| |_
\__ \ | ||  __/ (_| | |  _|  _|
|___/_|\__\___|\__,_|_|_| |_|
"#;

pub fn print_banner() {
    println!("{}", BANNER);
    println!(
        "  sitediff v{} - old/new site URL inventory\n",
        env!("CARGO_PKG_VERSION")
    );
}
