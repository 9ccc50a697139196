pub mod annotation;
pub mod line_parser;

use anyhow::Result;
use log::{debug, warn};

use crate::class::types::{ClassDefinition, Diagnostic, DiagnosticKind, SourceLine};

// Re-export from submodules
pub use annotation::{AnnotationStripper, StrippedText};
pub use line_parser::{classify_line, LineToken, MemberShape};

/// Everything the block scanner found in one pass
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Finalized classes in the order they closed
    pub classes: Vec<ClassDefinition>,

    /// Findings about rejected lines
    pub diagnostics: Vec<Diagnostic>,
}

/// Scanner state; the brace depth only exists while a class is open
#[derive(Debug)]
enum ScanState {
    OutsideClass,
    InsideClass { class: ClassDefinition, depth: i64 },
}

/// Brace-depth state machine delimiting top-level class bodies
///
/// Each brace must stand alone on its line. A brace sharing a line with other
/// code is not counted and throws the depth off for the rest of the input.
#[derive(Debug, Default)]
pub struct ClassScanner {
    /// Findings collected during the current scan
    diagnostics: Vec<Diagnostic>,
}

impl ClassScanner {
    /// Create a new class scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan lines for classes, discarding the per-class callback
    pub fn collect(lines: &[SourceLine]) -> Result<ScanOutcome> {
        ClassScanner::new().scan(lines, |_| Ok(()))
    }

    /// Scan lines for classes
    ///
    /// `on_class` runs the moment a class closes, before scanning resumes. An
    /// error from it aborts the scan.
    pub fn scan<F>(mut self, lines: &[SourceLine], mut on_class: F) -> Result<ScanOutcome>
    where
        F: FnMut(&ClassDefinition) -> Result<()>,
    {
        let mut classes = Vec::new();
        let mut state = ScanState::OutsideClass;

        for line in lines {
            let token = classify_line(&line.text);

            state = match state {
                ScanState::OutsideClass => match token {
                    LineToken::ClassHeader { name } => {
                        debug!("Entering class {} at line {}", name, line.number);
                        ScanState::InsideClass {
                            class: ClassDefinition::new(name, line.number),
                            depth: 0,
                        }
                    }
                    _ => ScanState::OutsideClass,
                },
                ScanState::InsideClass { mut class, mut depth } => {
                    self.step(&mut class, &mut depth, token, line);

                    if depth == 0 {
                        debug!(
                            "Closing class {} with {} properties at line {}",
                            class.name,
                            class.properties.len(),
                            line.number
                        );
                        on_class(&class)?;
                        classes.push(class);
                        ScanState::OutsideClass
                    } else {
                        ScanState::InsideClass { class, depth }
                    }
                }
            };
        }

        if let ScanState::InsideClass { class, depth } = state {
            self.report(
                class.line,
                DiagnosticKind::UnterminatedClass,
                format!("class {} is still open at end of input (depth {})", class.name, depth),
            );
        }

        Ok(ScanOutcome {
            classes,
            diagnostics: self.diagnostics,
        })
    }

    /// Apply one token to the open class
    fn step(&mut self, class: &mut ClassDefinition, depth: &mut i64, token: LineToken, line: &SourceLine) {
        match token {
            LineToken::OpenBrace => *depth += 1,
            LineToken::CloseBrace => {
                *depth -= 1;
                if *depth < 0 {
                    self.report(
                        line.number,
                        DiagnosticKind::NegativeBraceDepth,
                        format!("unbalanced '}}' in class {} (depth {})", class.name, depth),
                    );
                }
            }
            LineToken::Member { name, .. } => class.properties.push(name),
            LineToken::UnrecognizedMember => self.report(
                line.number,
                DiagnosticKind::UnrecognizedMember,
                format!("skipping unrecognized member in class {}: {}", class.name, line.text.trim()),
            ),
            LineToken::ClassHeader { name } => self.report(
                line.number,
                DiagnosticKind::NestedClass,
                format!("ignoring class {} declared inside class {}", name, class.name),
            ),
            LineToken::Other => {}
        }
    }

    fn report(&mut self, line: usize, kind: DiagnosticKind, message: String) {
        warn!("line {}: {}", line, message);
        self.diagnostics.push(Diagnostic { line, kind, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<SourceLine> {
        SourceLine::split(text)
    }

    #[test]
    fn test_single_class() -> Result<()> {
        let input = lines("public partial class Widget\n{\npublic int Count { get; set; }\n}");

        let outcome = ClassScanner::collect(&input)?;

        assert_eq!(outcome.classes.len(), 1);
        assert_eq!(outcome.classes[0].name, "Widget");
        assert_eq!(outcome.classes[0].properties, vec!["Count".to_string()]);
        assert!(outcome.diagnostics.is_empty());
        Ok(())
    }

    #[test]
    fn test_properties_keep_declaration_order() -> Result<()> {
        let names = ["Zeta", "Alpha", "Mid", "Beta"];
        let mut text = String::from("namespace Gen\n{\n    public partial class Ordered\n    {\n");
        for name in names {
            text.push_str(&format!("        public string {} {{ get; set; }}\n\n", name));
        }
        text.push_str("    }\n}\n");

        let outcome = ClassScanner::collect(&lines(&text))?;

        assert_eq!(outcome.classes.len(), 1);
        assert_eq!(outcome.classes[0].properties, names.iter().map(|n| n.to_string()).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_nested_braces_and_multiple_classes() -> Result<()> {
        let input = lines(
            "public partial class First\n\
             {\n\
             public System.Collections.Generic.IDictionary<string, object> Extra\n\
             {\n\
             get { return _extra; }\n\
             set { _extra = value; }\n\
             }\n\
             public int Count;\n\
             }\n\
             public partial class Second\n\
             {\n\
             public bool Flag { get; set; } = true;\n\
             }",
        );

        let mut closed = Vec::new();
        let outcome = ClassScanner::new().scan(&input, |class| {
            closed.push(class.name.clone());
            Ok(())
        })?;

        assert_eq!(closed, vec!["First".to_string(), "Second".to_string()]);
        assert_eq!(outcome.classes[0].properties, vec!["Extra".to_string(), "Count".to_string()]);
        assert_eq!(outcome.classes[1].properties, vec!["Flag".to_string()]);
        Ok(())
    }

    #[test]
    fn test_unrecognized_member_is_reported_not_collected() -> Result<()> {
        let input = lines("public partial class Widget\n{\npublic string ToJson()\npublic int Count;\n}");

        let outcome = ClassScanner::collect(&input)?;

        assert_eq!(outcome.classes[0].properties, vec!["Count".to_string()]);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::UnrecognizedMember);
        assert_eq!(outcome.diagnostics[0].line, 3);
        Ok(())
    }

    #[test]
    fn test_line_after_header_without_brace_closes_class() -> Result<()> {
        // Depth is still zero after the first body line
        let input = lines("public partial class Early\npublic int Count;\n{\n}");

        let outcome = ClassScanner::collect(&input)?;

        assert_eq!(outcome.classes.len(), 1);
        assert_eq!(outcome.classes[0].properties, vec!["Count".to_string()]);
        Ok(())
    }

    #[test]
    fn test_brace_sharing_a_line_is_not_counted() -> Result<()> {
        let input = lines("public partial class Inline {\npublic int Count;\n}");

        let outcome = ClassScanner::collect(&input)?;

        // The brace on the header line is not counted, so the first body line
        // closes the class at depth zero
        assert_eq!(outcome.classes.len(), 1);
        assert_eq!(outcome.classes[0].properties, vec!["Count".to_string()]);
        Ok(())
    }

    #[test]
    fn test_negative_depth_and_unterminated_class() -> Result<()> {
        let input = lines("public partial class Broken\n}\npublic int Count;");

        let outcome = ClassScanner::collect(&input)?;

        assert!(outcome.classes.is_empty());
        let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::NegativeBraceDepth, DiagnosticKind::UnterminatedClass]);
        Ok(())
    }

    #[test]
    fn test_nested_class_header_is_reported() -> Result<()> {
        let input = lines("public partial class Outer\n{\npublic partial class Inner\n{\n}\n}");

        let outcome = ClassScanner::collect(&input)?;

        assert_eq!(outcome.classes.len(), 1);
        assert_eq!(outcome.classes[0].name, "Outer");
        assert!(outcome.classes[0].properties.is_empty());
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::NestedClass);
        Ok(())
    }

    #[test]
    fn test_callback_error_aborts_scan() {
        let input = lines("public partial class A\n{\n}\npublic partial class B\n{\n}");

        let mut seen = 0;
        let result = ClassScanner::new().scan(&input, |_| {
            seen += 1;
            Err(anyhow!("disk full"))
        });

        assert!(result.is_err());
        assert_eq!(seen, 1);
    }
}
