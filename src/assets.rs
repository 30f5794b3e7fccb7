//! Companion asset checks.
//!
//! Generated demo pages depend on files the generator does not produce:
//! card and hero images, app payloads under `demo/<folder>/app/`, and the
//! source files of standalone projects. This module verifies those assets
//! exist and detects when one changed after the page's recorded lastmod.
//!
//! ## Freshness Escalation
//!
//! A demo page's HTML often stays byte-identical while the app binary next
//! to it is redeployed. Crawlers would never revisit the page if the sitemap
//! date only tracked the HTML. [`check_demo_assets`] therefore walks each
//! demo's companion directories and, when any non-generated file's
//! modification date is strictly newer than the stored ledger date, marks
//! the page's output file changed so the ledger bumps its date. Pages with
//! no stored date are skipped — they get today's date anyway.

use crate::content::{CategoryData, SiteLayout};
use crate::ledger::Ledger;
use crate::writer::SiteWriter;
use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Verify that every expected image exists on disk.
///
/// Local demos (regular and standalone) expect
/// `demo/<folder>/<folder>-small.jpg` and `-large.jpg`; external entries
/// expect their declared `image` path. Returns the missing ones as display
/// strings for the end-of-run warning summary.
pub fn check_images(categories: &[(String, CategoryData)], root: &Path) -> Vec<String> {
    let mut missing = Vec::new();

    for (_, data) in categories {
        for demo in &data.demos {
            if demo.is_external() {
                if let Some(image) = demo.image.as_deref().filter(|i| !i.is_empty())
                    && !root.join(image).is_file()
                {
                    missing.push(format!("{} (external: {})", image, demo.title));
                }
            } else if let Some(folder) = demo.folder.as_deref().filter(|f| !f.is_empty()) {
                for suffix in ["small", "large"] {
                    let name = format!("{folder}-{suffix}.jpg");
                    if !root.join("demo").join(folder).join(&name).is_file() {
                        missing.push(format!("demo/{folder}/{name}"));
                    }
                }
            }
        }
    }

    missing
}

/// Find `.bin` payload names (without extension) in a demo's app directory.
///
/// Returned sorted so that "pick the first" is a deterministic tie-break
/// when a directory unexpectedly holds more than one payload.
pub fn find_app_binaries(app_dir: &Path) -> io::Result<Vec<String>> {
    if !app_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(app_dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            name.strip_suffix(".bin").map(str::to_string)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Escalate asset changes into the changed-file set.
///
/// Returns a human-readable line per bumped demo for the build output.
pub fn check_demo_assets(
    categories: &[(String, CategoryData)],
    layout: &SiteLayout,
    ledger: &Ledger,
    writer: &mut SiteWriter,
) -> Vec<String> {
    let mut bumped = Vec::new();

    for (_, data) in categories {
        for demo in &data.demos {
            if demo.is_external() {
                continue;
            }
            let Some(folder) = demo.folder.as_deref().filter(|f| !f.is_empty()) else {
                continue;
            };

            // New pages get today's date from the ledger regardless.
            let Some(stored) = ledger.date_for(&format!("/demo/{folder}/")) else {
                continue;
            };

            let output_file = format!("demo/{folder}/index.html");
            if writer.has_changed(&output_file) {
                continue;
            }

            let demo_dir = layout.root.join("demo").join(folder);
            let mut scan_dirs = Vec::new();
            let mut generated: BTreeSet<String> = BTreeSet::new();
            generated.insert(output_file.clone());

            if demo.is_standalone() {
                scan_dirs.push(demo_dir);
                let source_dir = layout.standalone.join(folder);
                if source_dir.is_dir() {
                    scan_dirs.push(source_dir);
                }
            } else {
                let app_dir = demo_dir.join("app");
                if app_dir.is_dir() {
                    scan_dirs.push(app_dir);
                }
                generated.insert(format!("demo/{folder}/app/index.html"));
            }

            if dirs_hold_newer_file(&scan_dirs, &layout.root, &generated, stored) {
                writer.mark_changed(&output_file);
                bumped.push(format!("demo/{folder}/"));
            }
        }
    }

    bumped
}

/// Whether any non-generated file under `dirs` was modified after `stored`.
fn dirs_hold_newer_file(
    dirs: &[std::path::PathBuf],
    root: &Path,
    generated: &BTreeSet<String>,
    stored: NaiveDate,
) -> bool {
    for dir in dirs {
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            if generated.contains(&rel) {
                continue;
            }
            if let Some(mtime) = modified_date(entry.path())
                && mtime > stored
            {
                return true;
            }
        }
    }
    false
}

/// A file's modification timestamp truncated to a local calendar date.
fn modified_date(path: &Path) -> Option<NaiveDate> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).date_naive())
}
