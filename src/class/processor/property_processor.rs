use log::{debug, trace};
use regex::Regex;
use lazy_static::lazy_static;

use crate::class::types::{ExpandedProperty, PropertyLayout, PropertyShorthand, SourceLine};
use crate::utils::naming::{to_lower_first, to_upper_first};

lazy_static! {
    // "<modifier> <type> <name> { get; set; } = <expr>;"
    static ref SHORTHAND_RE: Regex = Regex::new(
        r"(?i)^[A-Za-z]+\s+[A-Za-z0-9_.<>]+\s+[A-Za-z0-9_.<>]+ \{ get; set; \}\s+=(.*);$"
    ).unwrap();
}

/// Rewritten source produced by the expander
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenSource {
    /// Full text with every convertible line expanded
    pub text: String,

    /// Number of lines that were expanded
    pub expanded: usize,
}

/// Expands shorthand properties into a backing field plus explicit accessors
#[derive(Debug, Default, Clone)]
pub struct PropertyExpander {
    /// Layout of the emitted property
    layout: PropertyLayout,
}

impl PropertyExpander {
    /// Create a new property expander with the given layout
    pub fn new(layout: PropertyLayout) -> Self {
        Self { layout }
    }

    /// Check whether a line is a convertible shorthand property
    pub fn is_convertible(&self, line: &str) -> bool {
        SHORTHAND_RE.is_match(line.trim())
    }

    /// Decompose a shorthand property line
    ///
    /// Returns `None` for lines that are not convertible.
    pub fn parse(&self, line: &str) -> Option<PropertyShorthand> {
        let line = line.trim_end();
        let trimmed = line.trim_start();
        if !SHORTHAND_RE.is_match(trimmed) {
            return None;
        }

        let mut parts = trimmed.split(' ');
        let access_modifier = parts.next()?.to_string();
        let type_name = parts.next()?.to_string();
        let name = parts.next()?.to_string();

        let (_, default_value) = trimmed.split_once('=')?;
        let default_value = default_value.trim_matches(';').trim().to_string();

        let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        let indent = indent.replace("    ", "\t");

        Some(PropertyShorthand {
            access_modifier,
            type_name,
            name,
            default_value,
            indent,
        })
    }

    /// Derive the field and property names for a shorthand
    pub fn expand(&self, shorthand: &PropertyShorthand) -> ExpandedProperty {
        ExpandedProperty {
            indent: shorthand.indent.clone(),
            access_modifier: shorthand.access_modifier.clone(),
            type_name: shorthand.type_name.clone(),
            public_name: to_upper_first(&shorthand.name),
            backing_field: to_lower_first(&shorthand.name),
            default_value: shorthand.default_value.clone(),
        }
    }

    /// Render an expanded property as source text
    pub fn render(&self, property: &ExpandedProperty) -> String {
        let ExpandedProperty {
            indent,
            access_modifier,
            type_name,
            public_name,
            backing_field,
            default_value,
        } = property;

        let field = format!("{indent}private {type_name} {backing_field} = {default_value};");

        match self.layout {
            PropertyLayout::Inline => format!(
                "{field}\n{indent}{access_modifier} {type_name} {public_name} \
                 {{ get {{ return {backing_field}; }} set {{ {backing_field} = value; }} }}"
            ),
            PropertyLayout::Block => [
                field,
                format!("{indent}{access_modifier} {type_name} {public_name}"),
                format!("{indent}{{"),
                format!("{indent}\tget {{ return {backing_field}; }}"),
                format!("{indent}\tset {{ {backing_field} = value; }}"),
                format!("{indent}}}"),
            ]
            .join("\n"),
        }
    }

    /// Expand a single line, or `None` if it is not convertible
    pub fn rewrite_line(&self, line: &str) -> Option<String> {
        let shorthand = self.parse(line)?;
        trace!("Expanding property {} {}", shorthand.type_name, shorthand.name);
        Some(self.render(&self.expand(&shorthand)))
    }

    /// Expand every convertible line, passing all others through unchanged
    pub fn rewrite_lines(&self, lines: &[SourceLine]) -> RewrittenSource {
        let mut expanded = 0;
        let rewritten: Vec<String> = lines
            .iter()
            .map(|line| match self.rewrite_line(&line.text) {
                Some(text) => {
                    expanded += 1;
                    text
                }
                None => line.text.clone(),
            })
            .collect();

        debug!("Expanded {} of {} lines", expanded, lines.len());
        RewrittenSource {
            text: SourceLine::join(&rewritten),
            expanded,
        }
    }
}
