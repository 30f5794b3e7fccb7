//! Sitemap XML rendering.
//!
//! One `<url>` element per known site path, each with a `<loc>` (base URL
//! plus the path) and a `<lastmod>` taken from the resolved ledger. Entries
//! appear in path iteration order, matching the order pages were collected.

use crate::ledger::Ledger;

/// XML namespace for sitemap 0.9 documents.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render the full sitemap document for `paths`, in order.
pub fn render(paths: &[String], dates: &Ledger, base_url: &str) -> String {
    let mut xml = String::with_capacity(256 + paths.len() * 128);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!("<urlset xmlns=\"{SITEMAP_NS}\">\n"));

    for path in paths {
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}{}</loc>\n",
            escape_xml(base_url),
            escape_xml(path)
        ));
        if let Some(date) = dates.date_for(path) {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date.format("%Y-%m-%d")));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn resolved(paths: &[&str], day: &str) -> (Vec<String>, Ledger) {
        let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        let today = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
        let ledger = Ledger::empty().resolve(&paths, &BTreeSet::new(), today);
        (paths, ledger)
    }

    #[test]
    fn renders_loc_and_lastmod_per_path() {
        let (paths, dates) = resolved(&["/", "/demo/foo/"], "2025-02-03");
        let xml = render(&paths, &dates, "https://www.example.com");

        assert!(xml.contains("<loc>https://www.example.com/</loc>"));
        assert!(xml.contains("<loc>https://www.example.com/demo/foo/</loc>"));
        assert_eq!(xml.matches("<lastmod>2025-02-03</lastmod>").count(), 2);
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn document_structure() {
        let (paths, dates) = resolved(&["/"], "2025-02-03");
        let xml = render(&paths, &dates, "https://www.example.com");

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert!(lines[1].contains(SITEMAP_NS));
        assert_eq!(*lines.last().unwrap(), "</urlset>");
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn paths_keep_iteration_order() {
        let (paths, dates) = resolved(&["/", "/b/", "/a/"], "2025-02-03");
        let xml = render(&paths, &dates, "https://x.test");

        let root = xml.find("<loc>https://x.test/</loc>").unwrap();
        let b = xml.find("<loc>https://x.test/b/</loc>").unwrap();
        let a = xml.find("<loc>https://x.test/a/</loc>").unwrap();
        assert!(root < b && b < a);
    }

    #[test]
    fn escapes_special_characters_in_urls() {
        let (paths, dates) = resolved(&["/a&b/"], "2025-02-03");
        let xml = render(&paths, &dates, "https://x.test");
        assert!(xml.contains("<loc>https://x.test/a&amp;b/</loc>"));
    }

    #[test]
    fn empty_path_list_renders_empty_urlset() {
        let (paths, dates) = resolved(&[], "2025-02-03");
        let xml = render(&paths, &dates, "https://x.test");
        assert!(!xml.contains("<url>"));
        assert!(xml.contains("</urlset>"));
    }
}
