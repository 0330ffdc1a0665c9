//! URL template compilation and rendering
//!
//! Handles `{{ variable }}` placeholders in the token service URL. A Go-style
//! leading dot (`{{.db_name}}`) is accepted as well. Templates are compiled
//! once at configuration time and rendered per lookup.
//!
//! Substituted values are inserted verbatim; any URL-encoding is up to the
//! template author.

use crate::error::{Error, Result};
use crate::types::UrlTemplateParams;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Regex for matching placeholders: {{ name }} or {{.name}}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*\.?([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").unwrap());

/// Renders the request URL for a lookup
///
/// This is the only capability the credential client needs from a template
/// engine; [`UrlTemplate`] is the built-in implementation.
pub trait RenderUrl: Send + Sync + fmt::Debug {
    /// Render the URL for the given parameters
    fn render(&self, params: &UrlTemplateParams<'_>) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A compiled URL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Compile a template string
    ///
    /// Fails if the string contains a `{{` that does not open a valid
    /// placeholder.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut last = 0;

        for cap in PLACEHOLDER_REGEX.captures_iter(source) {
            let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            push_literal(&mut segments, &source[last..whole.start()], source)?;
            segments.push(Segment::Variable(name.as_str().to_string()));
            last = whole.end();
        }
        push_literal(&mut segments, &source[last..], source)?;

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Placeholder names in order of appearance
    pub fn variables(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Variable(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str, source: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    if let Some(pos) = text.find("{{") {
        let snippet: String = text[pos..].chars().take(16).collect();
        return Err(Error::template(format!(
            "invalid placeholder near '{snippet}' in '{source}'"
        )));
    }
    segments.push(Segment::Literal(text.to_string()));
    Ok(())
}

impl RenderUrl for UrlTemplate {
    fn render(&self, params: &UrlTemplateParams<'_>) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => {
                    let value = params.get(name).ok_or_else(|| Error::undefined_var(name))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}
