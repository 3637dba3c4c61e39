//! Output formatting for drill reports
//!
//! Provides JSON (default) and text formats.

pub mod json;
pub mod text;
pub mod types;

pub use types::*;
