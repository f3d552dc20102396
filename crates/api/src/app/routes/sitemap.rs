use std::borrow::Cow;
use std::sync::Arc;

use axum::{extract::Extension, http::header, response::IntoResponse};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::app::site::{SitePage, site_pages, static_pages};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// `GET /sitemap.xml`. Falls back to the static pages when the catalog
/// cannot be read.
pub async fn sitemap(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let pages = match services.catalog().await {
        Ok(catalog) => site_pages(&catalog),
        Err(e) => {
            tracing::warn!(error = %e, "sitemap built without products");
            static_pages()
        }
    };

    let lastmod = Utc::now().format("%Y-%m-%d").to_string();
    let xml = render(&services.site_url, &pages, &lastmod);
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response()
}

fn render(site_url: &str, pages: &[SitePage], lastmod: &str) -> String {
    let mut xml = String::with_capacity(256 + pages.len() * 160);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for page in pages {
        let loc = format!("{site_url}{}", page.path);
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&loc));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(lastmod);
        xml.push_str("</lastmod>\n    <changefreq>");
        xml.push_str(page.change_frequency);
        xml.push_str("</changefreq>\n    <priority>");
        xml.push_str(&format!("{:.1}", page.priority));
        xml.push_str("</priority>\n  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
