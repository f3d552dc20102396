//! YAML frontmatter extraction and field normalization.
//!
//! Authors have written product files by hand for years, so every field is
//! read as a loose [`serde_yaml::Value`] and normalized here. Nothing past this
//! module sees comma- or slash-delimited strings.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::LoadError;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---[ \t]*\r?$").expect("frontmatter fence pattern"));

/// Brand keys in coalescing order.
pub const BRAND_ALIASES: [&str; 4] = ["brand", "brand_loader", "brand_grader", "brand_excavator"];

/// Split a markdown document into its frontmatter YAML and body.
///
/// The document must open with a `---` line; the block ends at the next
/// `---` line. One line break after the closing fence is dropped.
pub fn split_document(source: &str) -> Result<(&str, &str), LoadError> {
    let text = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut fences = FENCE.find_iter(text);
    let open = match fences.next() {
        Some(m) if m.start() == 0 => m,
        _ => return Err(LoadError::MissingFrontmatter),
    };
    let close = fences.next().ok_or(LoadError::UnclosedFrontmatter)?;

    let yaml = &text[open.end()..close.start()];
    let rest = &text[close.end()..];
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    Ok((yaml, body))
}

/// Frontmatter as authored. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawFrontmatter {
    pub title: Option<Value>,
    pub category: Option<Value>,
    pub brand: Option<Value>,
    pub brand_loader: Option<Value>,
    pub brand_grader: Option<Value>,
    pub brand_excavator: Option<Value>,
    pub part_number: Option<Value>,
    pub sizes: Option<Value>,
    pub image: Option<Value>,
    pub priority: Option<Value>,
    pub availability: Option<Value>,
}

impl RawFrontmatter {
    pub fn parse(yaml: &str) -> Result<Self, LoadError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Brand values in [`BRAND_ALIASES`] order.
    pub fn brand_aliases(&self) -> [(&'static str, Option<&Value>); 4] {
        [
            (BRAND_ALIASES[0], self.brand.as_ref()),
            (BRAND_ALIASES[1], self.brand_loader.as_ref()),
            (BRAND_ALIASES[2], self.brand_grader.as_ref()),
            (BRAND_ALIASES[3], self.brand_excavator.as_ref()),
        ]
    }
}

/// A multi-valued field had a shape that cannot be read as a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedList;

/// Scalar value as trimmed text; `None` for blanks, nulls and collections.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => return scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Read a field that may hold one value, a delimited string, or a list.
///
/// Strings are split on `delimiter` when one is given. Entries are trimmed and
/// blanks dropped. Mappings are rejected.
pub fn text_list(value: &Value, delimiter: Option<char>) -> Result<Vec<String>, MalformedList> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(split_trimmed(s, delimiter)),
        Value::Number(_) | Value::Bool(_) => Ok(scalar_text(value).into_iter().collect()),
        Value::Sequence(items) => Ok(items
            .iter()
            .filter_map(scalar_text)
            .flat_map(|item| split_trimmed(&item, delimiter))
            .collect()),
        Value::Tagged(tagged) => text_list(&tagged.value, delimiter),
        Value::Mapping(_) => Err(MalformedList),
    }
}

fn split_trimmed(s: &str, delimiter: Option<char>) -> Vec<String> {
    let parts: Vec<&str> = match delimiter {
        Some(d) => s.split(d).collect(),
        None => vec![s],
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Numeric priority; non-numeric and non-finite values count as absent.
pub fn priority(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Tagged(tagged) => return priority(&tagged.value),
        _ => None,
    };
    parsed.filter(|p| p.is_finite())
}
