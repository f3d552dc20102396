//! Product category taxonomy.
//!
//! Content authors write categories freely (`Loader`, `Motor Grader`,
//! `grader`, ...). Routing only knows three buckets; everything that reaches a
//! URL goes through [`Category::from_label`] or [`Category::routing`].

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Routing bucket for a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Loader,
    Excavator,
    Grader,
}

impl Category {
    /// All buckets, in navigation order.
    pub const ALL: [Category; 3] = [Category::Loader, Category::Excavator, Category::Grader];

    /// Normalize an authored label or URL key onto a bucket.
    ///
    /// Case, surrounding whitespace and `-`/`_` separators are ignored, so
    /// `"Motor Grader"`, `"motor-grader"` and `"GRADER"` all land in
    /// [`Category::Grader`].
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "loader" => Some(Self::Loader),
            "excavator" => Some(Self::Excavator),
            "grader" | "motor grader" => Some(Self::Grader),
            _ => None,
        }
    }

    /// Bucket used when building URLs for an authored label.
    ///
    /// Labels with no bucket route under `loader`.
    pub fn routing(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Self::Loader)
    }

    /// URL path segment.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Loader => "loader",
            Self::Excavator => "excavator",
            Self::Grader => "grader",
        }
    }

    /// Human-readable listing name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loader => "Loader Spare Parts",
            Self::Excavator => "Excavator Spare Parts",
            Self::Grader => "Grader Spare Parts",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| DomainError::unknown_category(s))
    }
}
