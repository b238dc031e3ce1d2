//! Warning aggregation for batch operations
//!
//! Collects warnings by category and emits a single summary line per
//! category instead of flooding the log with repetitive warnings.

use serde::Serialize;

use crate::logger::Logger;

/// Default number of example details kept per category
pub const DEFAULT_MAX_EXAMPLES: usize = 3;

/// Summary of one warning category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedWarning {
    /// Category identifier
    pub category: String,

    /// Number of occurrences
    pub count: usize,

    /// First message seen for this category
    pub message: String,

    /// First N unique detail strings
    pub examples: Vec<String>,
}

impl AggregatedWarning {
    /// The single line emitted by [`WarningAggregator::flush`]
    pub fn summary_line(&self) -> String {
        let count_text = if self.count == 1 {
            "1 occurrence".to_string()
        } else {
            format!("{} occurrences", self.count)
        };
        let examples_text = if self.examples.is_empty() {
            String::new()
        } else {
            format!(" [{}]", self.examples.join(", "))
        };
        format!(
            "{}: {} (e.g., {}){}",
            self.category, count_text, self.message, examples_text
        )
    }
}

/// Collects warnings by category
///
/// ```
/// use termkit_core::WarningAggregator;
///
/// let mut warnings = WarningAggregator::new();
/// warnings.add("image-size", "Size '512x512' not supported", Some("file1.png"));
/// warnings.add("image-size", "Size '512x512' not supported", Some("file2.png"));
/// warnings.add("image-quality", "Quality 'low' not supported", None);
///
/// assert_eq!(warnings.count("image-size"), 2);
/// assert_eq!(warnings.total_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct WarningAggregator {
    max_examples: usize,
    buckets: Vec<AggregatedWarning>,
}

impl Default for WarningAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl WarningAggregator {
    /// Create an aggregator keeping up to three examples per category
    pub fn new() -> Self {
        Self::with_max_examples(DEFAULT_MAX_EXAMPLES)
    }

    /// Create an aggregator keeping up to `max_examples` examples per category
    pub fn with_max_examples(max_examples: usize) -> Self {
        Self {
            max_examples,
            buckets: Vec::new(),
        }
    }

    /// Add a warning
    ///
    /// The first message of a category is kept as its representative.
    pub fn add(&mut self, category: &str, message: &str, detail: Option<&str>) {
        let index = match self.buckets.iter().position(|b| b.category == category) {
            Some(index) => index,
            None => {
                self.buckets.push(AggregatedWarning {
                    category: category.to_string(),
                    count: 0,
                    message: message.to_string(),
                    examples: Vec::new(),
                });
                self.buckets.len() - 1
            }
        };

        let bucket = &mut self.buckets[index];
        bucket.count += 1;

        if let Some(detail) = detail
            && !detail.is_empty()
            && bucket.examples.len() < self.max_examples
            && !bucket.examples.iter().any(|e| e == detail)
        {
            bucket.examples.push(detail.to_string());
        }
    }

    /// Number of warnings in a category
    pub fn count(&self, category: &str) -> usize {
        self.buckets
            .iter()
            .find(|b| b.category == category)
            .map_or(0, |b| b.count)
    }

    /// Number of warnings across all categories
    pub fn total_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Summary of all categories, in the order they were first seen
    pub fn summary(&self) -> Vec<AggregatedWarning> {
        self.buckets.clone()
    }

    /// Emit one warning per category through `logger`, then reset
    pub fn flush(&mut self, logger: &Logger) {
        for bucket in &self.buckets {
            logger.warn(bucket.summary_line());
        }
        self.reset();
    }

    /// Clear all aggregated warnings
    pub fn reset(&mut self) {
        self.buckets.clear();
    }

    pub fn has_warnings(&self) -> bool {
        !self.buckets.is_empty()
    }
}
