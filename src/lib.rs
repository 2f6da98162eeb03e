//! modlower: lowers ES-module syntax trees to plain-script form
//!
//! The pass consumes a module's already-parsed top-level tree plus its
//! already-resolved export table, and produces an equivalent tree built only
//! from ordinary declarations, object literals, and function values, loadable
//! by a runtime with no native module support. Live-binding semantics survive
//! the lowering: the namespace object returned by a transformed module exposes
//! one getter per export, reading the current value of the underlying binding.
//!
//! Parsing, symbol resolution, and specifier-to-file resolution happen
//! upstream; this crate only defines the interfaces it consumes from them
//! ([`Project`], [`Module`], [`ExportSymbol`]).
//!
//! ```
//! use modlower::{Module, ExportSymbol, Project, ModuleScriptTransformer, SyntaxTree};
//!
//! let project = Project::new();
//! let mut module = Module::new("answer.js");
//! module.add_export(ExportSymbol::own("answer"));
//!
//! let tree = SyntaxTree::ModuleBody {
//!     statements: vec![SyntaxTree::ExportDeclaration(Box::new(
//!         SyntaxTree::var_decl("answer", Some(SyntaxTree::number("42"))),
//!     ))],
//! };
//!
//! let lowered = ModuleScriptTransformer::new(&project).transform_module(&module, tree);
//! let js = modlower::printer::print(&lowered);
//! assert!(js.contains("registerModule"));
//! ```

// Syntax tree and the generic rewrite seam
pub mod syntax;
pub use syntax::{Rewrite, SyntaxTree, walk};

// Resolved modules and the specifier registry
pub mod module_graph;
pub use module_graph::{ExportOrigin, ExportSymbol, Module, ModuleId, Project};

// The lowering pass
pub mod transforms;
pub use transforms::{MODULE_LOADER_KEY, ModuleScriptTransformer, RUNTIME_REGISTRY};

// JavaScript text output
pub mod printer;

// Env-driven tracing setup
pub mod tracing_config;
pub use tracing_config::init_tracing;
