use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use partsfront_core::{Category, DomainError, DomainResult, sanitize_slug};

use crate::frontmatter::{self, MalformedList, RawFrontmatter};

/// Bytes left as-is in a URL path segment: RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Availability assumed when a content file does not state one.
pub const DEFAULT_AVAILABILITY: &str = "In Stock";

/// A catalog product, normalized from one content file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Filename-derived identifier (the legacy URL slug).
    pub slug: String,
    pub title: String,
    /// Category as authored; see [`Product::bucket`] for routing.
    pub category: String,
    pub brands: Vec<String>,
    pub part_numbers: Vec<String>,
    pub sizes: Vec<String>,
    pub image: String,
    /// Markdown body.
    pub content: String,
    /// Manual sort rank within a listing; lower first, absent last.
    pub priority: Option<f64>,
    pub availability: String,
}

impl Product {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            category: category.into(),
            brands: Vec::new(),
            part_numbers: Vec::new(),
            sizes: Vec::new(),
            image: String::new(),
            content: String::new(),
            priority: None,
            availability: DEFAULT_AVAILABILITY.to_string(),
        }
    }

    /// Build a product from parsed frontmatter and body.
    ///
    /// `title`, `category` and `image` are required. Malformed multi-valued
    /// fields are logged and read as empty.
    pub fn from_frontmatter(slug: &str, raw: &RawFrontmatter, body: &str) -> DomainResult<Self> {
        let title = required(slug, "title", raw.title.as_ref())?;
        let category = required(slug, "category", raw.category.as_ref())?;
        let image = required(slug, "image", raw.image.as_ref())?;

        let brands = coalesce_brands(slug, raw);
        let part_numbers = list_field(slug, "part_number", raw.part_number.as_ref(), Some('/'));
        let sizes = list_field(slug, "sizes", raw.sizes.as_ref(), Some(','));
        let priority = raw.priority.as_ref().and_then(frontmatter::priority);
        let availability = raw
            .availability
            .as_ref()
            .and_then(frontmatter::scalar_text)
            .unwrap_or_else(|| DEFAULT_AVAILABILITY.to_string());

        Ok(Self {
            slug: slug.to_string(),
            title,
            category,
            brands,
            part_numbers,
            sizes,
            image,
            content: body.to_string(),
            priority,
            availability,
        })
    }

    /// Routing bucket, if the authored category has one.
    pub fn bucket(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }

    /// Bucket used in this product's URLs.
    pub fn route_category(&self) -> Category {
        Category::routing(&self.category)
    }

    /// URL slug: the sanitized part number when there is one, else the
    /// filename slug.
    pub fn canonical_slug(&self) -> String {
        if !self.part_numbers.is_empty() {
            let sanitized = sanitize_slug(&self.part_numbers.join("/"));
            if !sanitized.is_empty() {
                return sanitized;
            }
        }
        self.slug.clone()
    }

    /// Site-relative canonical URL path, percent-encoded.
    pub fn canonical_path(&self) -> String {
        product_path(self.route_category(), &self.canonical_slug())
    }

    /// Stock-keeping identifier: part numbers when known, else the slug.
    pub fn sku(&self) -> String {
        if self.part_numbers.is_empty() {
            self.slug.clone()
        } else {
            self.part_numbers.join("/")
        }
    }

    /// Image alt text taken from the image file name without its extension,
    /// falling back to the title.
    pub fn alt_text(&self) -> &str {
        let file = self.image.rsplit('/').next().unwrap_or_default();
        let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
        if stem.is_empty() { self.title.as_str() } else { stem }
    }

    /// Image as an absolute URL under `base_url` unless it already is one.
    pub fn image_url(&self, base_url: &str) -> String {
        if self.image.starts_with("http://") || self.image.starts_with("https://") {
            return self.image.clone();
        }
        let base = base_url.trim_end_matches('/');
        if self.image.starts_with('/') {
            format!("{base}{}", self.image)
        } else {
            format!("{base}/{}", self.image)
        }
    }

    /// Lowercased text that free-text search runs against.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.content.len() + 64);
        text.push_str(&self.title);
        for value in self.brands.iter().chain(&self.part_numbers) {
            text.push(' ');
            text.push_str(value);
        }
        // as authored, so `abc/123` finds a product listed under ABC/123
        if self.part_numbers.len() > 1 {
            text.push(' ');
            text.push_str(&self.part_numbers.join("/"));
        }
        text.push(' ');
        text.push_str(&self.content);
        text.to_lowercase()
    }
}

/// `/products/{category}/{slug}` with the slug percent-encoded. Filename
/// slugs may carry spaces or non-ASCII letters.
pub fn product_path(category: Category, slug: &str) -> String {
    format!("/products/{}/{}", category.slug(), utf8_percent_encode(slug, PATH_SEGMENT))
}

fn required(slug: &str, field: &str, value: Option<&serde_yaml::Value>) -> DomainResult<String> {
    value
        .and_then(frontmatter::scalar_text)
        .ok_or_else(|| DomainError::validation(format!("{slug}: missing required field `{field}`")))
}

fn list_field(slug: &str, field: &str, value: Option<&serde_yaml::Value>, delimiter: Option<char>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    match frontmatter::text_list(value, delimiter) {
        Ok(items) => items,
        Err(MalformedList) => {
            tracing::warn!(slug, field, "ignoring malformed list field");
            Vec::new()
        }
    }
}

/// First non-empty brand alias wins.
fn coalesce_brands(slug: &str, raw: &RawFrontmatter) -> Vec<String> {
    raw.brand_aliases()
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| list_field(slug, field, Some(v), None)))
        .find(|brands| !brands.is_empty())
        .unwrap_or_default()
}
