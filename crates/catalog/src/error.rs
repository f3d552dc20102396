use std::path::PathBuf;

use thiserror::Error;

use partsfront_core::DomainError;

/// Failure while loading the catalog or a single content file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document does not start with a frontmatter block")]
    MissingFrontmatter,

    #[error("frontmatter block is not closed")]
    UnclosedFrontmatter,

    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
