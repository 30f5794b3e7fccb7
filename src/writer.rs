//! Change-aware output writing.
//!
//! Every generated file goes through [`SiteWriter::write`], which compares
//! the new content against what is already on disk and skips the write when
//! they are byte-identical. Files that *are* written get recorded in a
//! build-scoped changed-file set (forward-slash paths relative to the site
//! root), which the lastmod ledger later consults to decide which sitemap
//! dates to bump.
//!
//! The writer also owns the minification flag: when enabled, HTML content
//! is minified before the identity comparison, so a page whose minified
//! form matches the on-disk file correctly reports [`WriteOutcome::Unchanged`].
//!
//! Both the flag and the changed set live in this struct for exactly one
//! build invocation — there is no ambient global state.

use crate::minify::minify_html;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of a single change-aware write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content differed (or the file was new) and was written to disk.
    Written,
    /// On-disk content was already byte-identical; nothing was touched.
    Unchanged,
}

/// Writes generated files under a site root, tracking which ones changed.
#[derive(Debug)]
pub struct SiteWriter {
    root: PathBuf,
    minify: bool,
    changed: BTreeSet<String>,
}

impl SiteWriter {
    pub fn new(root: &Path, minify: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            minify,
            changed: BTreeSet::new(),
        }
    }

    /// Write `content` to `rel_path` (forward-slash, relative to the root)
    /// unless the file already holds identical bytes.
    ///
    /// Parent directories are created as needed. HTML files are minified
    /// first when the minify flag is set — before the comparison, not after.
    pub fn write(&mut self, rel_path: &str, content: &str) -> io::Result<WriteOutcome> {
        let content: Cow<'_, str> = if self.minify && rel_path.ends_with(".html") {
            Cow::Owned(minify_html(content))
        } else {
            Cow::Borrowed(content)
        };

        let rel = rel_path.replace('\\', "/");
        let path = self.root.join(&rel);

        if path.exists() && fs::read(&path)? == content.as_bytes() {
            return Ok(WriteOutcome::Unchanged);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content.as_bytes())?;
        self.changed.insert(rel);
        Ok(WriteOutcome::Written)
    }

    /// Force-record a path as changed without writing anything.
    ///
    /// Used by the companion-asset freshness check: the generated HTML may be
    /// unchanged while an asset next to it is newer than the stored lastmod.
    pub fn mark_changed(&mut self, rel_path: &str) {
        self.changed.insert(rel_path.replace('\\', "/"));
    }

    pub fn has_changed(&self, rel_path: &str) -> bool {
        self.changed.contains(rel_path)
    }

    /// Paths written (or force-marked) during this run.
    pub fn changed_files(&self) -> &BTreeSet<String> {
        &self.changed
    }

    pub fn changed_count(&self) -> usize {
        self.changed.len()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
