//! Tree rewrites applied between parsing and printing.

pub mod use_state;
