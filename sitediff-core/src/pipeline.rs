// End-to-end inventory run over the fixed input layout

use crate::classify::Classifiers;
use crate::config::{ConfigError, InputConfig, MigrationConfig};
use crate::equivalence::{EquivalenceMatcher, resolve_new_site};
use crate::merge::{NewSitemap, OldSiteInputs, StatusTable, build_new_site, build_old_site};
use crate::model::{NewSiteMap, OldSiteMap};
use crate::report::{InventorySummary, NewSiteRow, OldSiteRow, new_site_rows, old_site_rows};
use sitediff_ingest::discover::list_files;
use sitediff_ingest::{
    IngestError, SitemapMode, read_affiliate_links, read_redirect_rules, read_sitemap,
    read_status_table,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Recoverable ingestion problems collected over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// Turn an ingestion result into a value. A missing file is silently empty;
    /// any other failure is empty plus a warning.
    pub fn absorb<T: Default>(&mut self, source: &Path, result: sitediff_ingest::Result<T>) -> T {
        match result {
            Ok(value) => value,
            Err(IngestError::IoError(e)) if e.kind() == ErrorKind::NotFound => T::default(),
            Err(IngestError::XmlError { path, .. }) => {
                self.warn(format!("Could not parse {}", path));
                T::default()
            }
            Err(e) => {
                self.warn(format!("Could not read {}: {}", source.display(), e));
                T::default()
            }
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

/// Where the three input directories live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    pub old_dir: PathBuf,
    pub new_dir: PathBuf,
    pub gsc_dir: PathBuf,
}

impl InputLayout {
    /// The conventional layout beneath a project root.
    pub fn under(root: &Path, inputs: &InputConfig) -> Self {
        Self {
            old_dir: root.join(&inputs.old_dir),
            new_dir: root.join(&inputs.new_dir),
            gsc_dir: root.join(&inputs.gsc_dir),
        }
    }
}

/// Raw contributions of every input, before any merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedInputs {
    pub old: OldSiteInputs,
    pub new_sitemaps: Vec<NewSitemap>,
}

/// The reconciled result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub old_site: OldSiteMap,
    pub new_site: NewSiteMap,
    pub warnings: Vec<String>,
}

impl Inventory {
    pub fn old_rows(&self) -> Vec<OldSiteRow> {
        old_site_rows(&self.old_site)
    }

    pub fn new_rows(&self) -> Vec<NewSiteRow> {
        new_site_rows(&self.new_site)
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary::from_rows(&self.old_rows(), &self.new_rows(), &self.warnings)
    }
}

/// Merge, classify and match already-loaded inputs.
pub fn reconcile(
    inputs: &LoadedInputs,
    config: &MigrationConfig,
) -> Result<(OldSiteMap, NewSiteMap), ConfigError> {
    let classifiers = Classifiers::from_config(&config.classify)?;
    let matcher = EquivalenceMatcher::new(config.matcher.clone());

    let mut new_site = build_new_site(&inputs.new_sitemaps, config);
    let old_site = build_old_site(&inputs.old, &new_site, config, &classifiers);
    resolve_new_site(&mut new_site, &old_site, &classifiers, &matcher);

    Ok((old_site, new_site))
}

pub struct InventoryPipeline {
    layout: InputLayout,
    config: MigrationConfig,
    progress_callback: Option<ProgressCallback>,
}

impl InventoryPipeline {
    pub fn new(layout: InputLayout, config: MigrationConfig) -> Self {
        Self {
            layout,
            config,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    fn progress(&self, message: String) {
        if let Some(ref callback) = self.progress_callback {
            callback(message);
        }
    }

    fn load_old_sitemaps(&self, diagnostics: &mut Diagnostics) -> Vec<String> {
        let mut urls = Vec::new();
        for name in &self.config.inputs.old_sitemaps {
            let path = self.layout.old_dir.join(name);
            if !path.is_file() {
                continue;
            }
            let locs = diagnostics.absorb(&path, read_sitemap(&path, SitemapMode::WithIndex));
            info!("{}: {} URLs", name, locs.len());
            urls.extend(locs);
        }
        urls
    }

    fn load_status_tables(&self, diagnostics: &mut Diagnostics) -> Vec<StatusTable> {
        self.config
            .status
            .folders
            .iter()
            .map(|folder| {
                let path = self
                    .layout
                    .gsc_dir
                    .join(&folder.folder)
                    .join(&self.config.inputs.status_table);
                let rows = diagnostics.absorb(&path, read_status_table(&path));
                info!("{}: {} URLs", folder.folder, rows.len());
                StatusTable::new(folder.status.clone(), rows)
            })
            .collect()
    }

    fn load_discovered<T>(
        &self,
        prefix: &str,
        diagnostics: &mut Diagnostics,
        read: fn(&Path) -> sitediff_ingest::Result<Vec<T>>,
    ) -> Vec<T> {
        let mut items = Vec::new();
        for name in list_files(&self.layout.old_dir, prefix, "") {
            let path = self.layout.old_dir.join(&name);
            items.extend(diagnostics.absorb(&path, read(&path)));
        }
        items
    }

    fn load_new_sitemaps(&self, diagnostics: &mut Diagnostics) -> Vec<NewSitemap> {
        list_files(
            &self.layout.new_dir,
            "",
            &self.config.inputs.new_sitemap_suffix,
        )
        .into_iter()
        .map(|file| {
            let path = self.layout.new_dir.join(&file);
            let locs = diagnostics.absorb(&path, read_sitemap(&path, SitemapMode::WithIndex));
            NewSitemap { file, locs }
        })
        .collect()
    }

    /// Read every input. Nothing here fails; problems land in `diagnostics`.
    pub fn load(&self, diagnostics: &mut Diagnostics) -> LoadedInputs {
        self.progress("Parsing old-site sitemaps...".to_string());
        let sitemap_urls = self.load_old_sitemaps(diagnostics);

        self.progress("Parsing crawl-status tables...".to_string());
        let status_tables = self.load_status_tables(diagnostics);

        self.progress("Parsing redirect rules...".to_string());
        let redirects = self.load_discovered(
            &self.config.inputs.redirect_prefix,
            diagnostics,
            read_redirect_rules,
        );
        info!("Redirect rules: {}", redirects.len());

        self.progress("Parsing affiliate links...".to_string());
        let affiliates = self.load_discovered(
            &self.config.inputs.affiliate_prefix,
            diagnostics,
            read_affiliate_links,
        );
        info!("Affiliate links: {}", affiliates.len());

        self.progress("Parsing new-site sitemaps...".to_string());
        let new_sitemaps = self.load_new_sitemaps(diagnostics);

        LoadedInputs {
            old: OldSiteInputs {
                sitemap_urls,
                status_tables,
                redirects,
                affiliates,
            },
            new_sitemaps,
        }
    }

    pub fn run(&self) -> Result<Inventory, ConfigError> {
        let mut diagnostics = Diagnostics::new();
        let inputs = self.load(&mut diagnostics);

        self.progress("Reconciling inventories...".to_string());
        let (old_site, new_site) = reconcile(&inputs, &self.config)?;
        info!(
            "Reconciled {} old-site and {} new-site paths",
            old_site.len(),
            new_site.len()
        );

        Ok(Inventory {
            old_site,
            new_site,
            warnings: diagnostics.into_warnings(),
        })
    }
}
