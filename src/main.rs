use clap::Parser;
use sitesmith::{build, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitesmith")]
#[command(about = "Template-stamping site builder")]
#[command(long_about = "\
Template-stamping site builder

Stamps JSON content into plain {{token}} HTML templates and writes the
finished pages into the site root. Only files whose bytes actually changed
are rewritten, and the sitemap's <lastmod> dates follow that changed set.

Site structure:

  <root>/
  ├── index.html                   # Generated
  ├── 404.html                     # Generated
  ├── sitemap.xml                  # Generated
  ├── demo/<folder>/index.html     # Generated project pages
  └── tools/
      ├── components/
      │   ├── site.toml            # Site config (optional)
      │   ├── templates/*.html     # Templates with {{tokens}}
      │   └── data/*.json          # Category data, frontpage data, dates
      └── standalone/<folder>/     # Self-contained page sources

Pass 'min' to minify HTML output before the change comparison.")]
#[command(version)]
struct Cli {
    /// Build mode: pass "min" to minify generated HTML
    mode: Option<String>,

    /// Site root directory
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let minify = cli.mode.as_deref() == Some("min");

    println!(
        "Building site ({})...",
        if minify { "minified" } else { "standard" }
    );
    let summary = build::run(&cli.root, minify)?;
    output::print_summary(summary.changed);
    println!("Build complete.");
    Ok(())
}
