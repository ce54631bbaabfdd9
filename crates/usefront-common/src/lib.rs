//! Common types and utilities for the usefront rewriter.
//!
//! This crate provides foundational types used across all usefront crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, diagnostic codes)
//! - Line/column mapping for byte offsets (`LineMap`, `Position`)
//! - Parser and printer limits

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes, format_message};

pub mod position;
pub use position::{LineMap, Position};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
