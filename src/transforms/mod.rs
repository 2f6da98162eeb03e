//! Syntax-tree transforms
//!
//! Transforms consume an input tree and produce a new tree; the printer turns
//! output trees into JavaScript text. Nodes are never mutated in place, so a
//! transform is a pure function over its input and whatever resolved-module
//! state it was constructed with.
//!
//! The only transform currently here is the module lowering pass, which
//! rewrites import/export/alias syntax into plain declarations registered
//! against the runtime module registry.

pub mod module_script;

pub use module_script::{
    MODULE_LOADER_KEY, ModuleScriptTransformer, RUNTIME_REGISTRY, TempNameScopes,
};
