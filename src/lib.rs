//! # Sitesmith
//!
//! A template-stamping site builder for a hand-written portfolio site. The
//! HTML templates are plain files with `{{token}}` placeholders — no template
//! language — and the content lives in JSON data files next to them. The
//! builder stamps content into templates and writes the finished pages
//! straight into the site root.
//!
//! # Architecture: Build, Compare, Record
//!
//! Every run regenerates every page, but only files whose bytes actually
//! differ from what is on disk get written:
//!
//! ```text
//! 1. Assemble   templates + JSON  →  finished HTML pages
//! 2. Write      page → disk        (skipped when byte-identical)
//! 3. Record     changed files      →  lastmod ledger → sitemap.xml
//! ```
//!
//! The changed-file set is the heart of the design: it keeps file mtimes
//! meaningful for deploy tooling, and it drives the sitemap's `<lastmod>`
//! dates so a page's date only moves forward when its content (or a
//! companion asset) really changed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`template`] | `{{token}}` substitution — inline and indent-preserving modes, explicit ordering |
//! | [`content`] | JSON data model (categories, demos, SEO) and the site directory layout |
//! | [`pages`] | Page assembly — frontpage, 404, demo pages, standalone pages |
//! | [`writer`] | Change-aware file writing and the per-run changed-file set |
//! | [`minify`] | Regex-based HTML minification, applied before the identity compare |
//! | [`ledger`] | Persistent path → lastmod date map with non-regression resolution |
//! | [`sitemap`] | `sitemap.xml` rendering from the resolved ledger |
//! | [`assets`] | Missing-image checks and companion-asset freshness escalation |
//! | [`config`] | Optional `site.toml` site configuration |
//! | [`build`] | Orchestration — one full build run, end to end |
//! | [`output`] | CLI output formatting |

pub mod assets;
pub mod build;
pub mod config;
pub mod content;
pub mod ledger;
pub mod minify;
pub mod output;
pub mod pages;
pub mod sitemap;
pub mod template;
pub mod writer;
