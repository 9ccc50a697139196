use serde::{Serialize, Deserialize};

/// Counters collected during a generation run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Lines of the generated source before stripping
    pub input_lines: usize,

    /// Annotation lines removed by the stripper
    pub stripped_annotations: usize,

    /// Shorthand properties rewritten by the expander
    pub expanded_properties: usize,

    /// Classes finalized by the block scanner
    pub classes_found: usize,

    /// Property names collected across all classes
    pub properties_found: usize,

    /// Wrapper artifacts handed to the writer
    pub wrappers_written: usize,

    /// Diagnostics raised by the block scanner
    pub diagnostics: usize,
}

impl GenerationStats {
    /// Create a new stats instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another stats instance into this one
    pub fn merge(&mut self, other: &Self) {
        self.input_lines += other.input_lines;
        self.stripped_annotations += other.stripped_annotations;
        self.expanded_properties += other.expanded_properties;
        self.classes_found += other.classes_found;
        self.properties_found += other.properties_found;
        self.wrappers_written += other.wrappers_written;
        self.diagnostics += other.diagnostics;
    }

    /// Average number of properties per class
    pub fn avg_properties_per_class(&self) -> f64 {
        if self.classes_found == 0 {
            return 0.0;
        }

        self.properties_found as f64 / self.classes_found as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_and_average() {
        let mut stats = GenerationStats {
            classes_found: 1,
            properties_found: 3,
            ..Default::default()
        };
        let other = GenerationStats {
            classes_found: 1,
            properties_found: 1,
            diagnostics: 2,
            ..Default::default()
        };

        stats.merge(&other);

        assert_eq!(stats.classes_found, 2);
        assert_eq!(stats.diagnostics, 2);
        assert_eq!(stats.avg_properties_per_class(), 2.0);
        assert_eq!(GenerationStats::new().avg_properties_per_class(), 0.0);
    }
}
