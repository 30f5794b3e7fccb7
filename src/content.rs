//! Content data model and loading.
//!
//! The site's content lives in JSON files, one per category, each holding an
//! ordered list of demo records. Field names are camelCase in the JSON:
//!
//! ```json
//! {
//!     "sectionTitle": "Games",
//!     "sectionDescription": "Playable things.",
//!     "demos": [
//!         {
//!             "title": "Match Guru",
//!             "folder": "match-guru",
//!             "tech": "Solar2D",
//!             "descriptionShort": "A match-3 puzzle.",
//!             "repository": "https://github.com/...",
//!             "seo": { "ogTitle": "...", "ogImage": "..." }
//!         },
//!         { "title": "Elsewhere", "externalUrl": "https://..." }
//!     ]
//! }
//! ```
//!
//! ## Site Layout
//!
//! Everything is addressed relative to one site root directory, which is
//! also the output root (pages are written directly into it):
//!
//! ```text
//! <root>/                          # Site root = output root
//! ├── index.html                   # Generated
//! ├── 404.html                     # Generated
//! ├── sitemap.xml                  # Generated
//! ├── demo/<folder>/index.html     # Generated demo pages
//! └── tools/
//!     ├── components/
//!     │   ├── site.toml            # Optional site config
//!     │   ├── templates/*.html     # HTML templates with {{tokens}}
//!     │   └── data/*.json          # Category data, frontpage data, ledger
//!     └── standalone/<folder>/     # Self-contained page sources
//! ```

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("missing required file: {0}")]
    Missing(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Hash-anchor sections on the frontpage, used only for 404 fuzzy matching.
const ANCHOR_SECTIONS: &[&str] = &["me", "learn"];

/// Resolved directory layout for one site root.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    /// Site root — also the output root pages are written into.
    pub root: PathBuf,
    /// HTML template directory (`tools/components/templates`).
    pub templates: PathBuf,
    /// JSON data directory (`tools/components/data`).
    pub data: PathBuf,
    /// Standalone page sources (`tools/standalone`).
    pub standalone: PathBuf,
}

impl SiteLayout {
    pub fn new(root: &Path) -> Self {
        let components = root.join("tools").join("components");
        Self {
            root: root.to_path_buf(),
            templates: components.join("templates"),
            data: components.join("data"),
            standalone: root.join("tools").join("standalone"),
        }
    }

    /// Location of the optional `site.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("tools").join("components").join("site.toml")
    }

    /// Location of the persisted lastmod ledger.
    pub fn ledger_file(&self) -> PathBuf {
        self.data.join("sitemap_dates.json")
    }
}

/// One project entry in a category's demo list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoEntry {
    pub title: String,
    /// Output folder under `demo/` for locally hosted entries.
    pub folder: Option<String>,
    /// Non-empty value makes this an external link card.
    pub external_url: Option<String>,
    /// Card image for external entries (local ones derive theirs).
    pub image: Option<String>,
    pub tech: Option<String>,
    pub description_short: String,
    pub description_long: Option<String>,
    /// Public repository URL; absent means the source is private.
    pub repository: Option<String>,
    /// `"standalone"` marks entries built from their own source templates.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub seo: Option<SeoData>,
}

impl DemoEntry {
    pub fn is_external(&self) -> bool {
        self.external_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn is_standalone(&self) -> bool {
        self.kind.as_deref() == Some("standalone")
    }
}

/// Open Graph / Twitter card fields. All optional in the JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoData {
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_image_alt: String,
    pub meta_description: String,
}

/// One category's data file: section heading plus its demo list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryData {
    pub section_title: String,
    pub section_description: String,
    pub demos: Vec<DemoEntry>,
}

/// Frontpage metadata from `frontpage.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontpageData {
    pub page_title: String,
    pub meta_description: String,
    pub meta_keywords: Option<String>,
    pub seo: Option<SeoData>,
}

/// Optional per-page overrides from a standalone project's `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandaloneConfig {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub seo: Option<SeoData>,
}

/// Read a required file, mapping a missing file to [`ContentError::Missing`].
pub fn read_required(path: &Path) -> Result<String, ContentError> {
    match fs::read_to_string(path) {
        Ok(c) => Ok(c),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ContentError::Missing(path.to_path_buf()))
        }
        Err(e) => Err(ContentError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Load and parse a required JSON file from the data directory.
pub fn load_json<T: DeserializeOwned>(layout: &SiteLayout, name: &str) -> Result<T, ContentError> {
    let path = layout.data.join(name);
    let content = read_required(&path)?;
    serde_json::from_str(&content).map_err(|source| ContentError::Json { path, source })
}

/// Load category data files in configured display order.
///
/// Categories without a data file are simply skipped — their frontpage
/// token is removed during assembly.
pub fn load_categories(
    layout: &SiteLayout,
    names: &[String],
) -> Result<Vec<(String, CategoryData)>, ContentError> {
    let mut categories = Vec::new();
    for name in names {
        let file = format!("{name}.json");
        if !layout.data.join(&file).exists() {
            continue;
        }
        let data: CategoryData = load_json(layout, &file)?;
        categories.push((name.clone(), data));
    }
    Ok(categories)
}

/// Collect all valid page paths on the site, in category order.
///
/// With `include_hashes`, frontpage anchor sections (`/#me`, `/#games`, ...)
/// are included as well — those feed the 404 page's fuzzy redirect list and
/// never appear in the sitemap.
pub fn collect_site_paths(
    categories: &[(String, CategoryData)],
    include_hashes: bool,
) -> Vec<String> {
    let mut paths = vec!["/".to_string()];

    if include_hashes {
        for section in ANCHOR_SECTIONS {
            paths.push(format!("/#{section}"));
        }
        for (name, _) in categories {
            paths.push(format!("/#{name}"));
        }
    }

    for (_, data) in categories {
        for demo in &data.demos {
            if demo.is_external() {
                continue;
            }
            if let Some(folder) = demo.folder.as_deref().filter(|f| !f.is_empty()) {
                paths.push(format!("/demo/{folder}/"));
            }
        }
    }

    paths
}
