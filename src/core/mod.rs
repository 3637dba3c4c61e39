//! Core regex operations behind the drill commands

pub mod check;
pub mod engine;
pub mod extract;
pub mod matching;
pub mod session;
pub mod substitute;

// Re-export commonly used types
pub use check::check_pattern;
pub use engine::{EngineKind, Pattern};
pub use matching::{match_at_start, search};
pub use session::{DrillOp, DrillSummary};
pub use substitute::{CaseTransform, Replacement, Substitution};
