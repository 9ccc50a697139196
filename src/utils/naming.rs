//! Identifier case conversions used by the expander and the schema loader.

/// Upper-case the first character, leaving the rest untouched
pub fn to_upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first character, leaving the rest untouched
pub fn to_lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Convert snake_case, kebab-case, dotted or spaced names to PascalCase
///
/// Anything but ASCII letters and digits acts as a word break, so the result
/// stays within the identifiers the line regexes accept. A name starting with a
/// digit gets a leading underscore.
pub fn to_pascal_case(s: &str) -> String {
    let pascal: String = s
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(to_upper_first)
        .collect();

    if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", pascal)
    } else {
        pascal
    }
}
