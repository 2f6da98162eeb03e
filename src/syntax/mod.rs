//! Syntax tree types and the generic rewrite seam.

pub mod rewrite;
pub mod tree;

pub use rewrite::{Rewrite, walk};
pub use tree::{
    BindingField, BindingPattern, ExportSpecifier, ImportClause, ImportSpecifier, ObjectProperty,
    PropertyKey, SyntaxTree,
};
