use log::trace;
use regex::Regex;
use lazy_static::lazy_static;

lazy_static! {
    // "public partial class Name", optionally followed by a base list
    static ref CLASS_HEADER_RE: Regex = Regex::new(
        r"(?i)^public partial class\s+(.*?)$"
    ).unwrap();

    // "public <type> <name> { get; set; } ..." with anything after the accessors
    static ref PROPERTY_RE: Regex = Regex::new(
        r"(?i)^public\s+(.+?)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{\s*get;\s*set;\s*\}(.*)$"
    ).unwrap();

    // "public <type> <name>" with an optional trailing ";"
    static ref FIELD_RE: Regex = Regex::new(
        r"(?i)^public\s+(.+?)\s+([A-Za-z_][A-Za-z0-9_]*)\s*;?$"
    ).unwrap();

    static ref PUBLIC_MEMBER_RE: Regex = Regex::new(r"(?i)^public\s").unwrap();
}

/// Declaration shape a member name was recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberShape {
    /// `public <type> <name>;`
    Field,

    /// `public <type> <name> { get; set; } ...`
    Property,
}

/// Classification of a single line of generated source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken {
    /// Opening line of a top-level class
    ClassHeader { name: String },

    /// A line consisting solely of `{`
    OpenBrace,

    /// A line consisting solely of `}`
    CloseBrace,

    /// A field or property declaration
    Member { name: String, shape: MemberShape },

    /// A `public` line matching neither member shape
    UnrecognizedMember,

    /// Anything else
    Other,
}

/// Classify one line of generated source
///
/// Braces are only recognized when they stand alone on their line.
pub fn classify_line(line: &str) -> LineToken {
    let trimmed = line.trim();

    let token = match trimmed {
        "{" => LineToken::OpenBrace,
        "}" => LineToken::CloseBrace,
        _ if CLASS_HEADER_RE.is_match(trimmed) => {
            // The name is the fourth token: "public partial class <Name>"
            match trimmed.split_whitespace().nth(3) {
                Some(name) => LineToken::ClassHeader { name: name.to_string() },
                None => LineToken::UnrecognizedMember,
            }
        }
        _ => parse_member(trimmed),
    };

    trace!("{:?} <- {}", token, trimmed);
    token
}

/// Recover a member name from a trimmed line using the two member shapes
fn parse_member(trimmed: &str) -> LineToken {
    if let Some(cap) = PROPERTY_RE.captures(trimmed) {
        return LineToken::Member {
            name: cap[2].to_string(),
            shape: MemberShape::Property,
        };
    }

    if let Some(cap) = FIELD_RE.captures(trimmed) {
        return LineToken::Member {
            name: cap[2].to_string(),
            shape: MemberShape::Field,
        };
    }

    if PUBLIC_MEMBER_RE.is_match(trimmed) {
        LineToken::UnrecognizedMember
    } else {
        LineToken::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn member(name: &str, shape: MemberShape) -> LineToken {
        LineToken::Member { name: name.to_string(), shape }
    }

    #[test_case("{", LineToken::OpenBrace ; "open brace")]
    #[test_case("    }\r", LineToken::CloseBrace ; "indented close brace with carriage return")]
    #[test_case("    public partial class Widget", LineToken::ClassHeader { name: "Widget".to_string() } ; "class header")]
    #[test_case("public partial class Widget : Base", LineToken::ClassHeader { name: "Widget".to_string() } ; "class header with base")]
    #[test_case("PUBLIC PARTIAL CLASS Widget", LineToken::ClassHeader { name: "Widget".to_string() } ; "class header any case")]
    #[test_case("public int Count { get; set; }", member("Count", MemberShape::Property) ; "auto property")]
    #[test_case("public string Name { get; set; } = \"foo\";", member("Name", MemberShape::Property) ; "shorthand property")]
    #[test_case("public System.Collections.Generic.IDictionary<string, object> Extra { get; set; }", member("Extra", MemberShape::Property) ; "generic property")]
    #[test_case("public int count;", member("count", MemberShape::Field) ; "field")]
    #[test_case("public string Name", member("Name", MemberShape::Field) ; "explicit property header")]
    #[test_case("public string ToJson()", LineToken::UnrecognizedMember ; "method")]
    #[test_case("public Widget()", LineToken::UnrecognizedMember ; "constructor")]
    #[test_case("private string name = \"foo\";", LineToken::Other ; "private field")]
    #[test_case("{ get; set; }", LineToken::Other ; "brace sharing a line")]
    #[test_case("", LineToken::Other ; "empty")]
    fn test_classify_line(line: &str, expected: LineToken) {
        assert_eq!(classify_line(line), expected);
    }
}
