//! Response validation.
//!
//! Scores a generated explanation against the level's acceptance criteria
//! without contacting the provider. Checks run in a fixed order and each
//! contributes at most one deficiency message:
//! 1. word-count band
//! 2. required section markers
//! 3. expressive-marker count (child level only)

use super::level::Level;
use serde::{Deserialize, Serialize};

/// Inclusive word-count band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRange {
    pub min: usize,
    pub max: usize,
}

impl WordRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl std::fmt::Display for WordRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Acceptable length of a response for a level
pub fn word_range(level: Level) -> WordRange {
    match level {
        Level::Child => WordRange::new(120, 180),
        Level::Teen => WordRange::new(230, 300),
        Level::Professional => WordRange::new(320, 420),
    }
}

/// Case-insensitive substrings that must all appear, in report order
pub fn required_sections(level: Level) -> &'static [&'static str] {
    match level {
        Level::Child => &["For Kids", "What Is It", "Types", "Example", "Awesome", "Where"],
        Level::Teen => &[
            "Teen Version",
            "What Is It",
            "Types",
            "Examples",
            "Matters",
            "Tech",
            "Bottom Line",
        ],
        Level::Professional => &[
            "Professional",
            "Summary",
            "Definition",
            "Categories",
            "Applications",
            "Advantages",
            "Technology",
            "Takeaway",
        ],
    }
}

/// Whitespace-separated token count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Heuristic for emoji usage in child-level responses: count characters whose
/// code point lies strictly between the two bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressiveMarkerRule {
    pub min_count: usize,
    pub lower_exclusive: u32,
    pub upper_exclusive: u32,
}

impl Default for ExpressiveMarkerRule {
    fn default() -> Self {
        Self {
            min_count: 8,
            lower_exclusive: 127,
            upper_exclusive: 0x1F600,
        }
    }
}

impl ExpressiveMarkerRule {
    pub fn count(&self, text: &str) -> usize {
        text.chars()
            .map(u32::from)
            .filter(|&c| c > self.lower_exclusive && c < self.upper_exclusive)
            .count()
    }
}

/// Diagnostic view of a validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub word_count: usize,
    pub word_range: WordRange,
    pub deficiencies: Vec<String>,
    pub level: Level,
}

/// Pure scorer for generated responses
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    expressive: ExpressiveMarkerRule,
}

impl ResponseValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expressive_rule(mut self, rule: ExpressiveMarkerRule) -> Self {
        self.expressive = rule;
        self
    }

    pub fn expressive_rule(&self) -> &ExpressiveMarkerRule {
        &self.expressive
    }

    /// Returns `(is_valid, deficiencies)`; valid iff no deficiencies.
    pub fn validate(&self, response: &str, level: Level) -> (bool, Vec<String>) {
        let deficiencies = self.deficiencies(response, level);
        (deficiencies.is_empty(), deficiencies)
    }

    /// Same checks as [`validate`](Self::validate) plus the band used.
    pub fn report(&self, response: &str, level: Level) -> ValidationReport {
        let (valid, deficiencies) = self.validate(response, level);
        ValidationReport {
            valid,
            word_count: word_count(response),
            word_range: word_range(level),
            deficiencies,
            level,
        }
    }

    fn deficiencies(&self, response: &str, level: Level) -> Vec<String> {
        let mut issues = Vec::new();

        let words = word_count(response);
        let range = word_range(level);
        if words < range.min {
            issues.push(format!("Too short: {} words (minimum: {})", words, range.min));
        } else if words > range.max {
            issues.push(format!("Too long: {} words (maximum: {})", words, range.max));
        }

        let haystack = response.to_lowercase();
        let missing: Vec<&str> = required_sections(level)
            .iter()
            .copied()
            .filter(|marker| !haystack.contains(&marker.to_lowercase()))
            .collect();
        if !missing.is_empty() {
            issues.push(format!("Missing sections: {}", missing.join(", ")));
        }

        if level == Level::Child {
            let markers = self.expressive.count(response);
            if markers < self.expressive.min_count {
                issues.push(format!(
                    "Not enough expressive markers: {} (minimum: {})",
                    markers, self.expressive.min_count
                ));
            }
        }

        issues
    }
}
