//! Content directory loader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::LoadError;
use crate::frontmatter::{RawFrontmatter, split_document};
use crate::product::Product;

const CONTENT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// A content file left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Parse one content document. `slug` is the file name without extension.
pub fn parse_product(slug: &str, source: &str) -> Result<Product, LoadError> {
    let (yaml, body) = split_document(source)?;
    let raw = RawFrontmatter::parse(yaml)?;
    Ok(Product::from_frontmatter(slug, &raw, body)?)
}

/// Load every product file in `dir`.
///
/// A missing directory is an empty catalog. Files that fail to read or parse
/// are skipped with a warning and listed in [`Catalog::skipped`]. Files are
/// visited in file-name order.
pub fn load_catalog(dir: &Path) -> Result<Catalog, LoadError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "content directory missing; catalog is empty");
            return Ok(Catalog::empty());
        }
        Err(e) => return Err(LoadError::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && is_content_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    let mut products = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();

    for path in files {
        let Some(slug) = file_slug(&path) else {
            continue;
        };

        let parsed = fs::read_to_string(&path)
            .map_err(|e| LoadError::io(&path, e))
            .and_then(|source| parse_product(&slug, &source));

        match parsed {
            Ok(product) => products.push(product),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping product file");
                skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    let catalog = Catalog::with_skipped(products, skipped);
    for collision in catalog.collisions() {
        tracing::warn!(
            canonical_slug = %collision.canonical_slug,
            products = ?collision.products,
            "canonical slug shared by several products; first one wins"
        );
    }
    for shadow in catalog.shadowed() {
        tracing::warn!(
            slug = %shadow.slug,
            canonical_owner = %shadow.canonical_owner,
            "legacy slug now resolves to another product's canonical url"
        );
    }
    tracing::debug!(
        dir = %dir.display(),
        products = catalog.len(),
        skipped = catalog.skipped().len(),
        "catalog loaded"
    );

    Ok(catalog)
}

fn is_content_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| CONTENT_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)));
    !hidden && extension_ok
}

fn file_slug(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
