// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

pub use handlers::{
    describe_candidates, describe_classification, expand_path, load_config, load_sitemap_paths,
    resolve_layout,
};
