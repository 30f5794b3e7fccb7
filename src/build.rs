//! Build orchestration.
//!
//! [`run`] drives one full site build: load config and content, assemble
//! every page through the change-aware writer, check companion assets, then
//! resolve lastmod dates and regenerate the sitemap. The sitemap always
//! comes last so the ledger has seen the complete changed-file set.

use crate::assets;
use crate::config::{self, ConfigError};
use crate::content::{self, ContentError, SiteLayout};
use crate::ledger::{Ledger, LedgerError};
use crate::output;
use crate::pages::{self, AssemblyError, Templates};
use crate::sitemap;
use crate::writer::SiteWriter;
use chrono::Local;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of a full build, for the CLI summary.
#[derive(Debug, Clone, Copy)]
pub struct BuildSummary {
    pub changed: usize,
}

/// Run one complete build against the site rooted at `root`.
pub fn run(root: &Path, minify: bool) -> Result<BuildSummary, BuildError> {
    let layout = SiteLayout::new(root);
    let config = config::load_config(&layout.config_file())?;
    let templates = Templates::load(&layout)?;
    let categories = content::load_categories(&layout, &config.categories)?;
    let ledger = Ledger::load(&layout.ledger_file())?;

    let sitemap_paths = content::collect_site_paths(&categories, false);
    let fuzzy_paths = content::collect_site_paths(&categories, true);

    let mut writer = SiteWriter::new(root, minify);

    pages::build_frontpage(&layout, &config, &templates, &categories, &mut writer)?;
    pages::build_not_found_page(&config, &templates, &fuzzy_paths, &mut writer)?;
    pages::build_demo_pages(&layout, &config, &templates, &categories, &mut writer)?;
    pages::build_standalone_pages(&layout, &config, &templates, &categories, &mut writer)?;

    output::print_missing_images(&assets::check_images(&categories, root));

    // Asset freshness may force-mark pages as changed, so this must run
    // before the ledger is resolved.
    for bumped in assets::check_demo_assets(&categories, &layout, &ledger, &mut writer) {
        output::print_asset_bump(&bumped);
    }

    let today = Local::now().date_naive();
    let resolved = ledger.resolve(&sitemap_paths, writer.changed_files(), today);
    resolved.save(&layout.ledger_file())?;

    let xml = sitemap::render(&sitemap_paths, &resolved, &config.base_url);
    let outcome = writer.write("sitemap.xml", &xml)?;
    output::print_write(outcome, "sitemap.xml");

    Ok(BuildSummary {
        changed: writer.changed_count(),
    })
}
