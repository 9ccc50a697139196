use anyhow::{Result, Context};
use log::debug;
use regex::Regex;

use crate::class::types::DEFAULT_ANNOTATION_MARKERS;

/// Text with annotation lines removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedText {
    /// Remaining text
    pub text: String,

    /// Number of annotation lines removed
    pub removed: usize,
}

/// Removes decorative annotation lines such as `[Newtonsoft.Json.JsonProperty(...)]`
#[derive(Debug, Clone)]
pub struct AnnotationStripper {
    /// One pattern per marker token, applied in order
    patterns: Vec<Regex>,
}

impl AnnotationStripper {
    /// Create a stripper for the given marker tokens
    pub fn new(markers: &[String]) -> Result<Self> {
        let patterns = markers
            .iter()
            .map(|marker| {
                // A whole line holding "[<marker>...]", terminator included
                let pattern = format!(r"(?m)^.*\[{}.*\]\r?\n", regex::escape(marker));
                Regex::new(&pattern)
                    .with_context(|| format!("Invalid annotation marker {:?}", marker))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Create a stripper for the default `Newtonsoft` and `System` markers
    pub fn with_defaults() -> Result<Self> {
        let markers: Vec<String> = DEFAULT_ANNOTATION_MARKERS.iter().map(|m| m.to_string()).collect();
        Self::new(&markers)
    }

    /// Remove every annotation line from the text
    pub fn strip(&self, text: &str) -> StrippedText {
        let mut text = text.to_string();
        let mut removed = 0;

        for pattern in &self.patterns {
            let count = pattern.find_iter(&text).count();
            if count > 0 {
                text = pattern.replace_all(&text, "").into_owned();
                removed += count;
            }
        }

        debug!("Stripped {} annotation lines", removed);
        StrippedText { text, removed }
    }
}
