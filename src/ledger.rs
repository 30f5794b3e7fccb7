//! Persistent lastmod ledger for sitemap dates.
//!
//! Search engines treat `<lastmod>` as a crawl hint, so a page's date should
//! only move when its content actually changed. The ledger is a JSON file
//! mapping each logical URL path (`/`, `/demo/foo/`, ...) to an ISO-8601
//! date. It is the sole owner of historical dates between runs:
//!
//! - a path whose output file landed in this run's changed set gets today,
//! - a path with a prior recorded date keeps it verbatim,
//! - a path seen for the first time gets today.
//!
//! [`Ledger::resolve`] produces a complete new mapping which supersedes the
//! persisted one entirely — paths removed from the site drop out. Running
//! the resolver twice with no underlying change yields identical output.
//!
//! A missing ledger file simply means "everything is new". A ledger that
//! exists but fails to parse is a hard error: silently discarding it would
//! reset every lastmod on the site.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("ledger is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ledger has invalid date {value:?} for path {path:?}")]
    InvalidDate { path: String, value: String },
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapping from logical URL path to last-modified date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    dates: BTreeMap<String, NaiveDate>,
}

impl Ledger {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the ledger from `path`. A missing file is an empty ledger;
    /// malformed JSON or a malformed date is fatal.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::empty()),
            Err(e) => return Err(e.into()),
        };
        let raw: BTreeMap<String, String> = serde_json::from_str(&content)?;

        let mut dates = BTreeMap::new();
        for (path, value) in raw {
            let date = NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| {
                LedgerError::InvalidDate {
                    path: path.clone(),
                    value: value.clone(),
                }
            })?;
            dates.insert(path, date);
        }
        Ok(Self { dates })
    }

    /// Persist as pretty-printed JSON with sorted keys and a trailing newline.
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let raw: BTreeMap<&str, String> = self
            .dates
            .iter()
            .map(|(p, d)| (p.as_str(), d.format(DATE_FORMAT).to_string()))
            .collect();
        let mut json = serde_json::to_string_pretty(&raw)?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }

    /// The stored date for a logical path, if any.
    pub fn date_for(&self, path: &str) -> Option<NaiveDate> {
        self.dates.get(path).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Resolve the final date for every site path.
    ///
    /// `changed` holds the output files rewritten during this run. The
    /// returned ledger contains exactly the given paths — it replaces the
    /// old mapping wholesale when saved.
    pub fn resolve(&self, paths: &[String], changed: &BTreeSet<String>, today: NaiveDate) -> Ledger {
        let mut dates = BTreeMap::new();
        for path in paths {
            let output_file = output_file_for(path);
            let date = if changed.contains(&output_file) {
                today
            } else if let Some(prior) = self.dates.get(path) {
                *prior
            } else {
                today
            };
            dates.insert(path.clone(), date);
        }
        Ledger { dates }
    }
}

/// Map a logical URL path to the output file it derives to.
///
/// `/` → `index.html`; any other path is stripped of surrounding slashes
/// and given `/index.html` (`/demo/foo/` → `demo/foo/index.html`).
pub fn output_file_for(path: &str) -> String {
    if path == "/" {
        "index.html".to_string()
    } else {
        format!("{}/index.html", path.trim_matches('/'))
    }
}
