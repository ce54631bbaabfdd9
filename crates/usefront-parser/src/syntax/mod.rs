//! Tree utilities shared by transforms: traversal and node helpers.

pub mod transform_utils;
pub mod visitor;

pub use visitor::{NodeVisitor, VisitResult, traverse};
