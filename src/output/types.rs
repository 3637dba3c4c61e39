//! Report types for drill commands
//!
//! One-shot reports are JSON-first; the text renderings live in
//! [`super::text`].

use serde::{Deserialize, Serialize};

/// A single capture group's value and span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupValue {
    /// Group number (0 is the whole match, capturing groups start at 1)
    pub group: usize,
    /// Named group name (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Captured text
    pub text: String,
    /// Start byte position (0-indexed)
    pub start: usize,
    /// End byte position (exclusive)
    pub end: usize,
}

/// The first match found by `match` or `search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundMatch {
    /// Full matched text
    pub text: String,
    /// Start byte position (0-indexed)
    pub start: usize,
    /// End byte position (exclusive)
    pub end: usize,
    /// Capture groups that participated (empty if none)
    pub groups: Vec<GroupValue>,
}

/// Result of the `match` and `search` commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// The pattern that was applied
    pub pattern: String,
    /// Which engine ran it (regex or fancy-regex)
    pub engine: String,
    /// "match" (anchored at start) or "search" (anywhere)
    pub mode: String,
    /// Length of input in bytes
    pub input_length: usize,
    /// Whether the attempt succeeded
    pub matched: bool,
    /// The match, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<FoundMatch>,
}

/// Result of the `extract` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractReport {
    /// The pattern that was applied
    pub pattern: String,
    /// Which engine ran it
    pub engine: String,
    /// Length of input in bytes
    pub input_length: usize,
    /// Whether the search succeeded
    pub matched: bool,
    /// Group values with spans; the whole match as group 0 when the pattern
    /// has no capturing groups
    pub groups: Vec<GroupValue>,
    /// Template expanded against the captures (with --template)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,
    /// Input with replacement text spliced into group spans
    /// (with --replace-group)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spliced: Option<String>,
}

/// Result of the `sub` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubReport {
    /// The pattern that was applied
    pub pattern: String,
    /// Which engine ran it
    pub engine: String,
    /// Replacement template, or the transform description
    pub replacement: String,
    /// Original input
    pub original: String,
    /// Input after replacement
    pub result: String,
    /// Number of replacements made
    pub replacements_made: usize,
}

/// Error details for an invalid pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckError {
    /// Error kind (unclosed_group, unclosed_class, ...)
    pub kind: String,
    /// Byte position in the pattern where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Human-readable error message
    pub message: String,
}

/// Result of the `check` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// The pattern that was checked
    pub pattern: String,
    /// Whether the pattern compiles
    pub valid: bool,
    /// Which engine is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_required: Option<String>,
    /// Why that engine is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Error details (if invalid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckError>,
    /// Suggested fix (if invalid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Generic error response printed to stderr by `main`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always true for errors
    pub error: bool,
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
        }
    }
}
