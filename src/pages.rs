//! Page assembly.
//!
//! Fills the HTML templates with content and writes each page through the
//! change-aware writer. Every page goes through the same pipeline: render a
//! body from its own template, then wrap it in the base template via
//! [`PageShell::render`].
//!
//! ## Generated Pages
//!
//! - **Frontpage** (`index.html`): contact snippet plus one section of
//!   project cards per configured category
//! - **404 page** (`404.html`): carries the valid-path list for the
//!   client-side fuzzy redirect
//! - **Demo pages** (`demo/<folder>/index.html`): hero image, long
//!   description, repository panel, plus an `app/index.html` iframe loader
//!   for the demo's `.bin` payload
//! - **Standalone pages**: same output location as demo pages, but the body
//!   and extra head content come from the project's own source files under
//!   `tools/standalone/<folder>/`
//!
//! ## Token Order
//!
//! [`PageShell::render`] owns the base-template substitution order: inline
//! metadata first, then the structural blocks, then `{{basePath}}` strictly
//! last, because injected blocks (navbar, extra head) refer to it.

use crate::assets::find_app_binaries;
use crate::config::SiteConfig;
use crate::content::{
    self, CategoryData, ContentError, DemoEntry, FrontpageData, SeoData, SiteLayout,
    StandaloneConfig,
};
use crate::output;
use crate::template::{self, Substitution};
use crate::writer::SiteWriter;
use std::fs;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// All HTML templates, loaded once per run. Any missing file is fatal.
#[derive(Debug)]
pub struct Templates {
    pub base: String,
    pub navbar: String,
    pub footer: String,
    pub contact: String,
    pub frontpage: String,
    pub not_found: String,
    pub demo: String,
    pub iframe: String,
    pub card: String,
    pub section: String,
    pub repo_panel: String,
    pub repo_panel_private: String,
}

impl Templates {
    pub fn load(layout: &SiteLayout) -> Result<Self, ContentError> {
        let read = |name: &str| content::read_required(&layout.templates.join(name));
        Ok(Self {
            base: read("base.html")?,
            navbar: read("navbar.html")?,
            footer: read("footer.html")?,
            contact: read("contact.html")?,
            frontpage: read("frontpage.html")?,
            not_found: read("404.html")?,
            demo: read("demo.html")?,
            iframe: read("iframe.html")?,
            card: read("card.html")?,
            section: read("section.html")?,
            repo_panel: read("repo-panel.html")?,
            repo_panel_private: read("repo-panel-private.html")?,
        })
    }
}

/// Per-page values injected into the base template.
#[derive(Debug, Default)]
pub struct PageVars {
    pub page_title: String,
    pub body: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_tags: String,
    pub extra_head: String,
    /// Relative prefix back to the site root (`""` or `"../../"`).
    pub base_path: String,
}

/// The base template plus the site-wide snippets injected into every page.
#[derive(Debug, Clone, Copy)]
pub struct PageShell<'a> {
    base: &'a str,
    navbar: &'a str,
    footer: &'a str,
}

impl<'a> PageShell<'a> {
    pub fn new(templates: &'a Templates) -> Self {
        Self {
            base: &templates.base,
            navbar: &templates.navbar,
            footer: &templates.footer,
        }
    }

    /// Wrap body content in the base template.
    ///
    /// Substitution order is a contract: structural blocks are resolved
    /// before `{{basePath}}`, which may occur inside any injected block.
    pub fn render(&self, vars: &PageVars) -> String {
        let rules = [
            Substitution::inline("metaKeywords", &vars.meta_keywords),
            Substitution::inline("metaDescription", &vars.meta_description),
            Substitution::inline("pageTitle", &vars.page_title),
            Substitution::indented("ogTags", &vars.og_tags),
            Substitution::indented("extraHead", &vars.extra_head),
            Substitution::indented("navbar", self.navbar),
            Substitution::indented("bodyContent", &vars.body),
            Substitution::indented("footer", self.footer),
            Substitution::inline("basePath", &vars.base_path),
        ];
        template::apply(self.base, &rules)
    }
}

// ============================================================================
// HTML fragments
// ============================================================================

/// Generate a single project card from the card template.
pub fn render_card(demo: &DemoEntry, card_template: &str) -> String {
    let (href, target, image, external_html) = if demo.is_external() {
        (
            demo.external_url.clone().unwrap_or_default(),
            " target=\"_blank\"".to_string(),
            demo.image.clone().unwrap_or_default(),
            r#"<p class="external-notice">External: This link opens in a new tab.</p>"#.to_string(),
        )
    } else {
        let folder = demo.folder.as_deref().unwrap_or_default();
        (
            format!("demo/{folder}/"),
            String::new(),
            format!("demo/{folder}/{folder}-small.jpg"),
            String::new(),
        )
    };

    let tech_html = demo
        .tech
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| format!(r#"<p class="tech"><b>Tech:</b> {t}</p>"#))
        .unwrap_or_default();

    let rules = [
        Substitution::inline("cardHref", href),
        Substitution::inline("cardTarget", target),
        Substitution::inline("cardTitle", demo.title.as_str()),
        Substitution::inline("cardImage", image),
        Substitution::inline("cardDescription", demo.description_short.as_str()),
        Substitution::inline("cardTech", tech_html),
        Substitution::inline("cardExternal", external_html),
    ];
    template::apply(card_template, &rules)
        .trim_end_matches('\n')
        .to_string()
}

/// Generate a full frontpage section from the section and card templates.
pub fn render_section(
    name: &str,
    data: &CategoryData,
    card_template: &str,
    section_template: &str,
) -> String {
    let cards: Vec<String> = data
        .demos
        .iter()
        .map(|demo| render_card(demo, card_template))
        .collect();

    let rules = [
        Substitution::inline("sectionId", name),
        Substitution::inline("sectionTitle", data.section_title.as_str()),
        Substitution::inline("sectionDescription", data.section_description.as_str()),
        Substitution::indented("sectionCards", cards.join("\n")),
    ];
    template::apply(section_template, &rules)
        .trim_end_matches('\n')
        .to_string()
}

/// Generate the repository link panel, or the private-source variant.
pub fn render_repo_panel(repository: Option<&str>, panel: &str, private_panel: &str) -> String {
    match repository.filter(|r| !r.is_empty()) {
        Some(url) => template::apply(panel, &[Substitution::inline("repository", url)])
            .trim_end_matches('\n')
            .to_string(),
        None => private_panel.trim_end_matches('\n').to_string(),
    }
}

/// Generate Open Graph and Twitter/X Card meta tags.
///
/// Absent fields are omitted; the Twitter block mirrors the OG values.
pub fn social_tags(site_name: &str, seo: &SeoData, url: &str) -> String {
    let mut og = vec![
        "<!-- Open Graph meta tags -->".to_string(),
        format!(r#"<meta property="og:site_name" content="{site_name}">"#),
        r#"<meta property="og:type" content="website">"#.to_string(),
    ];
    if !url.is_empty() {
        og.push(format!(r#"<meta property="og:url" content="{url}">"#));
    }
    if !seo.og_title.is_empty() {
        og.push(format!(
            r#"<meta property="og:title" content="{}">"#,
            seo.og_title
        ));
    }
    if !seo.og_description.is_empty() {
        og.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            seo.og_description
        ));
    }
    if !seo.og_image.is_empty() {
        og.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            seo.og_image
        ));
    }
    if !seo.og_image_alt.is_empty() {
        og.push(format!(
            r#"<meta property="og:image:alt" content="{}">"#,
            seo.og_image_alt
        ));
    }

    let mut twitter = vec![
        "<!-- Twitter/X Card meta tags -->".to_string(),
        r#"<meta name="twitter:card" content="summary_large_image">"#.to_string(),
    ];
    if !seo.og_title.is_empty() {
        twitter.push(format!(
            r#"<meta name="twitter:title" content="{}">"#,
            seo.og_title
        ));
    }
    if !seo.og_description.is_empty() {
        twitter.push(format!(
            r#"<meta name="twitter:description" content="{}">"#,
            seo.og_description
        ));
    }
    if !seo.og_image.is_empty() {
        twitter.push(format!(
            r#"<meta name="twitter:image" content="{}">"#,
            seo.og_image
        ));
    }
    if !seo.og_image_alt.is_empty() {
        twitter.push(format!(
            r#"<meta name="twitter:image:alt" content="{}">"#,
            seo.og_image_alt
        ));
    }

    format!("{}\n\n{}", og.join("\n"), twitter.join("\n"))
}

// ============================================================================
// Page builders
// ============================================================================

/// Build `index.html` from the frontpage template and category data.
pub fn build_frontpage(
    layout: &SiteLayout,
    config: &SiteConfig,
    templates: &Templates,
    categories: &[(String, CategoryData)],
    writer: &mut SiteWriter,
) -> Result<(), AssemblyError> {
    let mut rules = vec![Substitution::indented("contact", templates.contact.as_str())];

    // One token per configured category; categories without a data file
    // get their token removed.
    for name in &config.categories {
        match categories.iter().find(|(n, _)| n == name) {
            Some((_, data)) => rules.push(Substitution::indented(
                name,
                render_section(name, data, &templates.card, &templates.section),
            )),
            None => rules.push(Substitution::inline(name, "")),
        }
    }
    let body = template::apply(&templates.frontpage, &rules);

    let frontpage: FrontpageData = content::load_json(layout, "frontpage.json")?;
    let og_tags = frontpage
        .seo
        .as_ref()
        .map(|seo| social_tags(&config.site_name, seo, &format!("{}/", config.base_url)))
        .unwrap_or_default();

    let page = PageShell::new(templates).render(&PageVars {
        page_title: frontpage.page_title,
        body,
        meta_description: frontpage.meta_description,
        meta_keywords: frontpage
            .meta_keywords
            .unwrap_or_else(|| config.default_keywords.clone()),
        og_tags,
        ..PageVars::default()
    });

    let outcome = writer.write("index.html", &page)?;
    output::print_write(outcome, "index.html");
    Ok(())
}

/// Build `404.html`, injecting the valid-path list for the fuzzy redirect.
pub fn build_not_found_page(
    config: &SiteConfig,
    templates: &Templates,
    valid_paths: &[String],
    writer: &mut SiteWriter,
) -> Result<(), AssemblyError> {
    let paths_json = serde_json::to_string(valid_paths)?;
    let body = template::apply(
        &templates.not_found,
        &[Substitution::inline("validPaths", paths_json)],
    );

    let page = PageShell::new(templates).render(&PageVars {
        page_title: format!("{} - 404", config.site_name),
        body,
        meta_description: format!(
            "This is the 404 page for {}. If you are seeing this, then you are lost.",
            config.site_name
        ),
        meta_keywords: config.default_keywords.clone(),
        ..PageVars::default()
    });

    let outcome = writer.write("404.html", &page)?;
    output::print_write(outcome, "404.html");
    Ok(())
}

/// Build individual demo pages for all regular (non-external, non-standalone)
/// entries, plus each demo's `app/index.html` iframe loader.
pub fn build_demo_pages(
    layout: &SiteLayout,
    config: &SiteConfig,
    templates: &Templates,
    categories: &[(String, CategoryData)],
    writer: &mut SiteWriter,
) -> Result<(), AssemblyError> {
    let shell = PageShell::new(templates);

    for (_, data) in categories {
        for demo in &data.demos {
            if demo.is_external() || demo.is_standalone() {
                continue;
            }
            let Some(folder) = demo.folder.as_deref().filter(|f| !f.is_empty()) else {
                continue;
            };

            let description_long = demo
                .description_long
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(&demo.description_short);
            let repo_panel = render_repo_panel(
                demo.repository.as_deref(),
                &templates.repo_panel,
                &templates.repo_panel_private,
            );
            let body = template::apply(
                &templates.demo,
                &[
                    Substitution::inline("demoTitle", demo.title.as_str()),
                    Substitution::inline("demoImage", format!("{folder}-large.jpg")),
                    Substitution::inline("demoDescriptionLong", description_long),
                    Substitution::indented("demoRepository", repo_panel),
                ],
            );

            let demo_url = format!("{}/demo/{folder}/", config.base_url);
            let mut seo = demo.seo.clone().unwrap_or_default();
            let meta_description = if seo.meta_description.is_empty() {
                demo.description_short.clone()
            } else {
                seo.meta_description.clone()
            };
            // The hero image is always the canonical social preview.
            seo.og_image = format!("{}/demo/{folder}/{folder}-large.jpg", config.base_url);
            let og_tags = social_tags(&config.site_name, &seo, &demo_url);

            let page = shell.render(&PageVars {
                page_title: format!("{} - {}", config.site_name, demo.title),
                body,
                meta_description,
                meta_keywords: config.default_keywords.clone(),
                og_tags,
                base_path: "../../".to_string(),
                ..PageVars::default()
            });

            let page_path = format!("demo/{folder}/index.html");
            let outcome = writer.write(&page_path, &page)?;
            output::print_write(outcome, &page_path);

            // Iframe loader for the app payload.
            let binaries = find_app_binaries(&layout.root.join("demo").join(folder).join("app"))?;
            let Some(bin_name) = binaries.first() else {
                output::print_warning(&format!(
                    "no .bin payload found in demo/{folder}/app/ - app page skipped"
                ));
                continue;
            };
            if binaries.len() > 1 {
                output::print_warning(&format!(
                    "multiple .bin payloads in demo/{folder}/app/ ({}), using {bin_name}",
                    binaries.join(", ")
                ));
            }

            let iframe = template::apply(
                &templates.iframe,
                &[
                    Substitution::inline("demoTitle", demo.title.as_str()),
                    Substitution::inline("demoBinName", bin_name.as_str()),
                    Substitution::inline("demoDescription", demo.description_short.as_str()),
                ],
            );
            let iframe_path = format!("demo/{folder}/app/index.html");
            let outcome = writer.write(&iframe_path, &iframe)?;
            output::print_write(outcome, &iframe_path);
        }
    }
    Ok(())
}

/// Build pages for standalone projects that ship their own content files.
///
/// Sources live in `tools/standalone/<folder>/`: `content.html` (required),
/// `head.html` (optional extra head content), `config.json` (optional
/// title/meta overrides).
pub fn build_standalone_pages(
    layout: &SiteLayout,
    config: &SiteConfig,
    templates: &Templates,
    categories: &[(String, CategoryData)],
    writer: &mut SiteWriter,
) -> Result<(), AssemblyError> {
    let shell = PageShell::new(templates);

    for (_, data) in categories {
        for demo in &data.demos {
            if !demo.is_standalone() || demo.is_external() {
                continue;
            }
            let Some(folder) = demo.folder.as_deref().filter(|f| !f.is_empty()) else {
                continue;
            };

            let source_dir = layout.standalone.join(folder);
            if !source_dir.is_dir() {
                output::print_warning(&format!("standalone folder not found: {folder}"));
                continue;
            }

            let body = content::read_required(&source_dir.join("content.html"))?;
            let extra_head = match fs::read_to_string(source_dir.join("head.html")) {
                Ok(head) => head,
                Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
                Err(e) => return Err(e.into()),
            };
            let overrides = match fs::read_to_string(source_dir.join("config.json")) {
                Ok(json) => serde_json::from_str::<StandaloneConfig>(&json)?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => StandaloneConfig::default(),
                Err(e) => return Err(e.into()),
            };

            let title = overrides.title.unwrap_or_else(|| demo.title.clone());
            let meta_description = overrides
                .meta_description
                .unwrap_or_else(|| demo.description_short.clone());
            let meta_keywords = overrides
                .meta_keywords
                .unwrap_or_else(|| config.default_keywords.clone());

            let demo_url = format!("{}/demo/{folder}/", config.base_url);
            let mut seo = overrides.seo.unwrap_or_default();
            seo.og_image = format!("{}/demo/{folder}/{folder}-large.jpg", config.base_url);
            let og_tags = social_tags(&config.site_name, &seo, &demo_url);

            // Output lives two levels below the site root, like demo pages.
            let page = shell.render(&PageVars {
                page_title: format!("{} - {}", config.site_name, title),
                body,
                meta_description,
                meta_keywords,
                og_tags,
                extra_head,
                base_path: "../../".to_string(),
            });

            let page_path = format!("demo/{folder}/index.html");
            let outcome = writer.write(&page_path, &page)?;
            output::print_write(outcome, &page_path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CARD_TPL: &str = "<a class=\"card\" href=\"{{cardHref}}\"{{cardTarget}}>\n\
                            <img src=\"{{cardImage}}\" alt=\"{{cardTitle}}\">\n\
                            <h3>{{cardTitle}}</h3>\n\
                            <p>{{cardDescription}}</p>\n\
                            {{cardTech}}\n\
                            {{cardExternal}}\n\
                            </a>\n";

    fn local_demo(title: &str, folder: &str) -> DemoEntry {
        DemoEntry {
            title: title.to_string(),
            folder: Some(folder.to_string()),
            description_short: "Short pitch.".to_string(),
            ..DemoEntry::default()
        }
    }

    // =========================================================================
    // Cards and sections
    // =========================================================================

    #[test]
    fn local_card_links_into_demo_folder() {
        let html = render_card(&local_demo("Foo", "foo"), CARD_TPL);
        assert!(html.contains(r#"href="demo/foo/""#));
        assert!(html.contains("demo/foo/foo-small.jpg"));
        assert!(!html.contains("target="));
        assert!(!html.contains("external-notice"));
        assert!(!html.ends_with('\n'));
    }

    #[test]
    fn external_card_opens_in_new_tab_with_notice() {
        let demo = DemoEntry {
            title: "Ext".to_string(),
            external_url: Some("https://a.test/x".to_string()),
            image: Some("img/x.jpg".to_string()),
            ..DemoEntry::default()
        };
        let html = render_card(&demo, CARD_TPL);
        assert!(html.contains(r#"href="https://a.test/x" target="_blank""#));
        assert!(html.contains("img/x.jpg"));
        assert!(html.contains("external-notice"));
    }

    #[test]
    fn tech_line_only_when_present() {
        let mut demo = local_demo("Foo", "foo");
        assert!(!render_card(&demo, CARD_TPL).contains("Tech:"));

        demo.tech = Some("Solar2D".to_string());
        assert!(render_card(&demo, CARD_TPL).contains("<b>Tech:</b> Solar2D"));
    }

    #[test]
    fn section_embeds_cards_with_indent() {
        let section_tpl =
            "<section id=\"{{sectionId}}\">\n    <h2>{{sectionTitle}}</h2>\n    {{sectionCards}}\n</section>";
        let data = CategoryData {
            section_title: "Games".to_string(),
            section_description: String::new(),
            demos: vec![local_demo("A", "a"), local_demo("B", "b")],
        };
        let html = render_section("games", &data, "<div>{{cardTitle}}</div>", section_tpl);

        assert!(html.contains(r#"id="games""#));
        assert!(html.contains("<h2>Games</h2>"));
        // Second card indented to the token's level.
        assert!(html.contains("<div>A</div>\n    <div>B</div>"));
    }

    #[test]
    fn repo_panel_variants() {
        let panel = "<a href=\"{{repository}}\">Source</a>\n";
        let private = "<p>Private source.</p>\n";

        assert_eq!(
            render_repo_panel(Some("https://g.test/r"), panel, private),
            "<a href=\"https://g.test/r\">Source</a>"
        );
        assert_eq!(render_repo_panel(None, panel, private), "<p>Private source.</p>");
        assert_eq!(render_repo_panel(Some(""), panel, private), "<p>Private source.</p>");
    }

    // =========================================================================
    // Social tags
    // =========================================================================

    #[test]
    fn social_tags_mirror_og_into_twitter() {
        let seo = SeoData {
            og_title: "Title".to_string(),
            og_image: "https://x.test/i.jpg".to_string(),
            ..SeoData::default()
        };
        let tags = social_tags("XeduR", &seo, "https://x.test/");

        assert!(tags.contains(r#"<meta property="og:site_name" content="XeduR">"#));
        assert!(tags.contains(r#"<meta property="og:url" content="https://x.test/">"#));
        assert!(tags.contains(r#"<meta property="og:title" content="Title">"#));
        assert!(tags.contains(r#"<meta name="twitter:title" content="Title">"#));
        assert!(tags.contains(r#"<meta name="twitter:image" content="https://x.test/i.jpg">"#));
        // Absent fields stay absent.
        assert!(!tags.contains("og:description"));
        assert!(!tags.contains("og:image:alt"));
    }

    #[test]
    fn social_tags_without_url() {
        let tags = social_tags("XeduR", &SeoData::default(), "");
        assert!(!tags.contains("og:url"));
        assert!(tags.contains("summary_large_image"));
    }

    // =========================================================================
    // Base template wrapping
    // =========================================================================

    fn shell_templates() -> Templates {
        Templates {
            base: "<head>\n    <title>{{pageTitle}}</title>\n    <meta name=\"description\" content=\"{{metaDescription}}\">\n    <meta name=\"keywords\" content=\"{{metaKeywords}}\">\n    {{ogTags}}\n    {{extraHead}}\n</head>\n<body>\n    {{navbar}}\n    {{bodyContent}}\n    {{footer}}\n</body>\n".to_string(),
            navbar: "<nav><a href=\"{{basePath}}index.html\">Home</a></nav>".to_string(),
            footer: "<footer>bye</footer>".to_string(),
            contact: String::new(),
            frontpage: String::new(),
            not_found: String::new(),
            demo: String::new(),
            iframe: String::new(),
            card: String::new(),
            section: String::new(),
            repo_panel: String::new(),
            repo_panel_private: String::new(),
        }
    }

    #[test]
    fn shell_injects_all_blocks() {
        let templates = shell_templates();
        let page = PageShell::new(&templates).render(&PageVars {
            page_title: "Home".to_string(),
            body: "<main>\n<p>hi</p>\n</main>".to_string(),
            meta_description: "desc".to_string(),
            meta_keywords: "kw".to_string(),
            ..PageVars::default()
        });

        assert!(page.contains("<title>Home</title>"));
        assert!(page.contains("    <main>\n    <p>hi</p>\n    </main>"));
        assert!(page.contains("<footer>bye</footer>"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn base_path_resolves_inside_injected_navbar() {
        // The navbar references {{basePath}}; it must resolve even though
        // the navbar itself is injected content.
        let templates = shell_templates();
        let page = PageShell::new(&templates).render(&PageVars {
            base_path: "../../".to_string(),
            ..PageVars::default()
        });
        assert!(page.contains(r#"href="../../index.html""#));
    }

    #[test]
    fn empty_og_tags_leave_no_blank_tokens() {
        let templates = shell_templates();
        let page = PageShell::new(&templates).render(&PageVars::default());
        assert!(!page.contains("{{ogTags}}"));
        assert!(!page.contains("{{extraHead}}"));
    }

    // =========================================================================
    // Builders (filesystem-backed)
    // =========================================================================

    fn fixture_site() -> (TempDir, SiteLayout) {
        let tmp = TempDir::new().unwrap();
        let layout = SiteLayout::new(tmp.path());
        fs::create_dir_all(&layout.templates).unwrap();
        fs::create_dir_all(&layout.data).unwrap();

        let t = &layout.templates;
        fs::write(t.join("base.html"), "<title>{{pageTitle}}</title>\n<desc>{{metaDescription}}</desc>\n<kw>{{metaKeywords}}</kw>\n    {{ogTags}}\n    {{extraHead}}\n    {{navbar}}\n    {{bodyContent}}\n    {{footer}}\n").unwrap();
        fs::write(t.join("navbar.html"), "<nav>{{basePath}}</nav>").unwrap();
        fs::write(t.join("footer.html"), "<footer/>").unwrap();
        fs::write(t.join("contact.html"), "<address/>").unwrap();
        fs::write(t.join("frontpage.html"), "<main>\n    {{contact}}\n    {{games}}\n    {{other}}\n</main>").unwrap();
        fs::write(t.join("404.html"), "<script>const valid = {{validPaths}};</script>").unwrap();
        fs::write(t.join("demo.html"), "<h1>{{demoTitle}}</h1>\n<img src=\"{{demoImage}}\">\n<p>{{demoDescriptionLong}}</p>\n    {{demoRepository}}\n").unwrap();
        fs::write(t.join("iframe.html"), "<title>{{demoTitle}}</title><iframe data-bin=\"{{demoBinName}}\"></iframe><p>{{demoDescription}}</p>").unwrap();
        fs::write(t.join("card.html"), CARD_TPL).unwrap();
        fs::write(t.join("section.html"), "<section id=\"{{sectionId}}\">\n    {{sectionCards}}\n</section>\n").unwrap();
        fs::write(t.join("repo-panel.html"), "<a href=\"{{repository}}\">src</a>\n").unwrap();
        fs::write(t.join("repo-panel-private.html"), "<p>private</p>\n").unwrap();

        fs::write(
            layout.data.join("frontpage.json"),
            r#"{"pageTitle": "Home", "metaDescription": "front"}"#,
        )
        .unwrap();

        (tmp, layout)
    }

    #[test]
    fn frontpage_renders_sections_and_removes_missing_category_tokens() {
        let (tmp, layout) = fixture_site();
        let config = SiteConfig {
            categories: vec!["games".to_string(), "other".to_string()],
            ..SiteConfig::default()
        };
        let templates = Templates::load(&layout).unwrap();
        let categories = vec![(
            "games".to_string(),
            CategoryData {
                demos: vec![local_demo("Foo", "foo")],
                ..CategoryData::default()
            },
        )];
        let mut writer = SiteWriter::new(tmp.path(), false);

        build_frontpage(&layout, &config, &templates, &categories, &mut writer).unwrap();

        let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains(r#"id="games""#));
        assert!(html.contains("demo/foo/"));
        assert!(!html.contains("{{other}}"));
        assert!(writer.has_changed("index.html"));
    }

    #[test]
    fn not_found_page_embeds_valid_paths_json() {
        let (tmp, layout) = fixture_site();
        let config = SiteConfig::default();
        let templates = Templates::load(&layout).unwrap();
        let paths = vec!["/".to_string(), "/#games".to_string()];
        let mut writer = SiteWriter::new(tmp.path(), false);

        build_not_found_page(&config, &templates, &paths, &mut writer).unwrap();

        let html = fs::read_to_string(tmp.path().join("404.html")).unwrap();
        assert!(html.contains(r#"const valid = ["/","/#games"];"#));
        assert!(html.contains("XeduR - 404"));
    }

    #[test]
    fn demo_page_and_iframe_written() {
        let (tmp, layout) = fixture_site();
        let app_dir = tmp.path().join("demo/foo/app");
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join("game.bin"), "payload").unwrap();

        let config = SiteConfig::default();
        let templates = Templates::load(&layout).unwrap();
        let mut demo = local_demo("Foo Game", "foo");
        demo.repository = Some("https://g.test/foo".to_string());
        let categories = vec![(
            "games".to_string(),
            CategoryData {
                demos: vec![demo],
                ..CategoryData::default()
            },
        )];
        let mut writer = SiteWriter::new(tmp.path(), false);

        build_demo_pages(&layout, &config, &templates, &categories, &mut writer).unwrap();

        let page = fs::read_to_string(tmp.path().join("demo/foo/index.html")).unwrap();
        assert!(page.contains("<h1>Foo Game</h1>"));
        assert!(page.contains("foo-large.jpg"));
        assert!(page.contains(r#"<a href="https://g.test/foo">src</a>"#));
        assert!(page.contains("<nav>../../</nav>"));
        assert!(page.contains(r#"og:image" content="https://www.xedur.com/demo/foo/foo-large.jpg"#));

        let iframe = fs::read_to_string(tmp.path().join("demo/foo/app/index.html")).unwrap();
        assert!(iframe.contains(r#"data-bin="game""#));
    }

    #[test]
    fn demo_without_payload_skips_iframe_only() {
        let (tmp, layout) = fixture_site();
        let config = SiteConfig::default();
        let templates = Templates::load(&layout).unwrap();
        let categories = vec![(
            "games".to_string(),
            CategoryData {
                demos: vec![local_demo("Foo", "foo")],
                ..CategoryData::default()
            },
        )];
        let mut writer = SiteWriter::new(tmp.path(), false);

        build_demo_pages(&layout, &config, &templates, &categories, &mut writer).unwrap();

        assert!(tmp.path().join("demo/foo/index.html").is_file());
        assert!(!tmp.path().join("demo/foo/app/index.html").exists());
    }

    #[test]
    fn standalone_page_uses_own_sources_and_overrides() {
        let (tmp, layout) = fixture_site();
        let src = layout.standalone.join("solo");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("content.html"), "<article>custom</article>").unwrap();
        fs::write(src.join("head.html"), "<link href=\"{{basePath}}solo.css\">").unwrap();
        fs::write(src.join("config.json"), r#"{"title": "Solo Override"}"#).unwrap();

        let config = SiteConfig::default();
        let templates = Templates::load(&layout).unwrap();
        let mut demo = local_demo("Solo", "solo");
        demo.kind = Some("standalone".to_string());
        let categories = vec![(
            "other".to_string(),
            CategoryData {
                demos: vec![demo],
                ..CategoryData::default()
            },
        )];
        let mut writer = SiteWriter::new(tmp.path(), false);

        build_standalone_pages(&layout, &config, &templates, &categories, &mut writer).unwrap();

        let page = fs::read_to_string(tmp.path().join("demo/solo/index.html")).unwrap();
        assert!(page.contains("<article>custom</article>"));
        assert!(page.contains("XeduR - Solo Override"));
        // {{basePath}} inside the injected head resolves because the
        // path-prefix substitution runs last.
        assert!(page.contains(r#"<link href="../../solo.css">"#));
    }

    #[test]
    fn standalone_missing_folder_is_skipped_not_fatal() {
        let (tmp, layout) = fixture_site();
        let config = SiteConfig::default();
        let templates = Templates::load(&layout).unwrap();
        let mut demo = local_demo("Ghost", "ghost");
        demo.kind = Some("standalone".to_string());
        let categories = vec![(
            "other".to_string(),
            CategoryData {
                demos: vec![demo],
                ..CategoryData::default()
            },
        )];
        let mut writer = SiteWriter::new(tmp.path(), false);

        build_standalone_pages(&layout, &config, &templates, &categories, &mut writer).unwrap();
        assert!(!tmp.path().join("demo/ghost/index.html").exists());
    }

    #[test]
    fn missing_template_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let layout = SiteLayout::new(tmp.path());
        fs::create_dir_all(&layout.templates).unwrap();

        assert!(matches!(
            Templates::load(&layout),
            Err(ContentError::Missing(_))
        ));
    }
}
