//! Script-form Module Transform
//!
//! Lowers a module-scoped syntax tree to a plain script that registers itself
//! against the runtime module registry:
//!
//! ```text
//! import { foo, bar as baz } from "./dep";
//! export var answer = 42;
//! export { a } from "./other";
//! ```
//!
//! Becomes:
//!
//! ```text
//! "use strict";
//! System.get("@modlower/module").registerModule("app.js", function () {
//!   var { foo, bar: baz } = System.get("./dep");
//!   var answer = 42;
//!   var $other_1 = System.get("./other");
//!   return Object.preventExtensions(Object.create(null, {
//!     answer: { get: function () { return answer; }, enumerable: true },
//!     a: { get: function () { return $other_1.a; }, enumerable: true }
//!   }));
//! }, this);
//! ```
//!
//! Exports stay live: each namespace property is a getter reading the current
//! value of the underlying binding. Every distinct specifier value referenced
//! by re-exports is bound to exactly one generated temp name, so a re-exported
//! module is looked up once at runtime no matter how many exports name it.
//!
//! All failure modes here are internal-invariant violations (unresolved
//! export table, malformed tree shape), not user input errors. They panic and
//! abandon the transform; there is no partial output.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::module_graph::{ExportOrigin, ExportSymbol, Module, Project, normalize_specifier};
use crate::syntax::rewrite::{Rewrite, walk};
use crate::syntax::tree::{
    BindingField, BindingPattern, ImportClause, ObjectProperty, SyntaxTree,
};

/// Well-known global holding the runtime module registry.
pub const RUNTIME_REGISTRY: &str = "System";

/// Registry key of the module-runtime service. Constant across all generated
/// modules; the registration call is keyed by it.
pub const MODULE_LOADER_KEY: &str = "@modlower/module";

// =============================================================================
// Scoped temp-name allocator
// =============================================================================

/// Stack of mappings from normalized specifier value to a generated local
/// binding name.
///
/// One scope is pushed per transform invocation and popped on return; the
/// mechanism nests so a reentrant transform gets its own self-contained
/// mapping (inner scopes do not search outer ones). Allocation is idempotent
/// per scope: two lookups for the same specifier value return the identical
/// name. Generated names live in a reserved `$`-prefixed namespace and carry
/// a sequence number, so they collide neither with user-authored identifiers
/// nor with each other.
#[derive(Debug, Default)]
pub struct TempNameScopes {
    scopes: Vec<FxHashMap<String, String>>,
    next_seq: u32,
}

impl TempNameScopes {
    pub fn new() -> Self {
        TempNameScopes::default()
    }

    /// Push a new empty mapping.
    pub fn enter(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost mapping, discarding it.
    pub fn leave(&mut self) {
        let popped = self.scopes.pop();
        debug_assert!(popped.is_some(), "leave() without matching enter()");
    }

    /// The name already allocated for `specifier` in the innermost scope, if
    /// any. Never allocates; statement lowering uses this to emit the lookup
    /// declaration exactly once per specifier value.
    pub fn existing(&self, specifier: &str) -> Option<&str> {
        let key = normalize_specifier(specifier);
        self.scopes.last()?.get(&key).map(String::as_str)
    }

    /// The name for `specifier` in the innermost scope, allocating a fresh
    /// one on first reference.
    pub fn name_for(&mut self, specifier: &str) -> String {
        let key = normalize_specifier(specifier);
        let Some(scope) = self.scopes.last_mut() else {
            panic!("temp-name allocation outside any scope");
        };
        if let Some(existing) = scope.get(&key) {
            return existing.clone();
        }
        self.next_seq += 1;
        let name = format!("${}_{}", sanitize_module_specifier(&key), self.next_seq);
        trace!(specifier = %key, name = %name, "allocated module temp name");
        scope.insert(key, name.clone());
        name
    }
}

/// Sanitize a module specifier for use as the stem of a generated name.
/// `"./foo/bar-baz"` -> `"foo_bar_baz"`. The stem never contains `$`, so the
/// `$`-prefixed names built from it stay out of user namespace.
pub fn sanitize_module_specifier(specifier: &str) -> String {
    let mut stem = specifier;
    loop {
        let trimmed = stem
            .trim_start_matches("./")
            .trim_start_matches("../");
        if trimmed == stem {
            break;
        }
        stem = trimmed;
    }
    let stem = stem.replace(['/', '-', '.', '@', '$', ':'], "_");
    if stem.is_empty() {
        "module".to_string()
    } else {
        stem
    }
}

// =============================================================================
// The transform
// =============================================================================

/// Lowers module syntax for one project. Reusable across modules; each
/// transform invocation pushes and pops its own temp-name scope.
pub struct ModuleScriptTransformer<'p> {
    project: &'p Project,
    temp_scopes: TempNameScopes,
}

impl<'p> ModuleScriptTransformer<'p> {
    pub fn new(project: &'p Project) -> Self {
        ModuleScriptTransformer {
            project,
            temp_scopes: TempNameScopes::new(),
        }
    }

    /// Transform a module's top-level tree into the registration script.
    ///
    /// The tree must be module-kind and the module's URL must resolve (its
    /// own, or the project fallback); either violation is a defect in the
    /// upstream pipeline and panics.
    pub fn transform_module(&mut self, module: &Module, tree: SyntaxTree) -> SyntaxTree {
        let url = match self.project.resolved_url(module) {
            Some(url) => url.to_string(),
            None => panic!("module has no resolvable url"),
        };
        let kind = tree.kind_name();
        let SyntaxTree::ModuleBody { statements } = tree else {
            panic!("transform_module expects a module-kind tree, got {kind}");
        };
        debug!(url = %url, statements = statements.len(), "lowering module body");

        self.temp_scopes.enter();
        let mut body: Vec<SyntaxTree> = statements
            .into_iter()
            .filter_map(|stmt| self.rewrite_statement(stmt))
            .collect();
        body.push(self.export_return(module));
        self.temp_scopes.leave();

        SyntaxTree::Script {
            statements: vec![SyntaxTree::UseStrict, registration_statement(&url, body)],
        }
    }

    /// Rewrite module-flavored statements inside a plain script, in place.
    /// No registration wrapper and no namespace return; everything else is
    /// copied structurally unchanged.
    pub fn transform_script(&mut self, tree: SyntaxTree) -> SyntaxTree {
        let kind = tree.kind_name();
        let SyntaxTree::Script { statements } = tree else {
            panic!("transform_script expects a script-kind tree, got {kind}");
        };
        self.temp_scopes.enter();
        let statements = statements
            .into_iter()
            .filter_map(|stmt| self.rewrite_statement(stmt))
            .collect();
        self.temp_scopes.leave();
        SyntaxTree::Script { statements }
    }

    // -------------------------------------------------------------------------
    // Import/alias lowering
    // -------------------------------------------------------------------------

    /// `import {...} from "m"` -> `var {...} = System.get("m");`
    ///
    /// A wildcard clause is expanded eagerly into one identically-named field
    /// per export of the already-resolved target module; a target with no
    /// exports yields an empty pattern.
    fn lower_import(&mut self, clause: ImportClause, module_specifier: SyntaxTree) -> SyntaxTree {
        let fields = match clause {
            ImportClause::Named(specifiers) => specifiers
                .into_iter()
                .map(|spec| match spec.local {
                    None => BindingField::shorthand(spec.remote),
                    Some(local) => BindingField::aliased(spec.remote, local),
                })
                .collect(),
            ImportClause::Wildcard => {
                let token = specifier_token(&module_specifier);
                let Some(target) = self.project.resolve_module_for_specifier(token) else {
                    panic!("wildcard import target `{token}` has not been resolved");
                };
                target
                    .exports()
                    .map(|sym| BindingField::shorthand(sym.name.clone()))
                    .collect()
            }
        };
        SyntaxTree::var_pattern(BindingPattern::new(fields), self.rewrite(module_specifier))
    }

    /// `export {...} from "m"` -> `var $m_1 = System.get("m");`, emitted only
    /// on the first reference to that specifier value. Without a specifier the
    /// statement is purely a table annotation and contributes nothing.
    fn lower_named_export(
        &mut self,
        module_specifier: Option<Box<SyntaxTree>>,
    ) -> Option<SyntaxTree> {
        let spec_tree = module_specifier?;
        let token = specifier_token(&spec_tree).to_string();
        if self.temp_scopes.existing(&token).is_some() {
            return None;
        }
        let name = self.temp_scopes.name_for(&token);
        Some(SyntaxTree::var_decl(name, Some(self.rewrite(*spec_tree))))
    }

    // -------------------------------------------------------------------------
    // Export emission
    // -------------------------------------------------------------------------

    /// The final `return Object.preventExtensions(Object.create(null, {...}))`
    /// statement, one getter descriptor per export in table order.
    fn export_return(&mut self, module: &Module) -> SyntaxTree {
        let descriptors: Vec<ObjectProperty> = module
            .exports()
            .map(|sym| self.export_descriptor(sym))
            .collect();
        let namespace = SyntaxTree::call(
            SyntaxTree::prop(SyntaxTree::id("Object"), "create"),
            vec![SyntaxTree::NullLiteral, SyntaxTree::object(descriptors)],
        );
        SyntaxTree::ret(Some(SyntaxTree::call(
            SyntaxTree::prop(SyntaxTree::id("Object"), "preventExtensions"),
            vec![namespace],
        )))
    }

    /// `name: { get: function () { return <read>; }, enumerable: true }`
    fn export_descriptor(&mut self, symbol: &ExportSymbol) -> ObjectProperty {
        let read = match symbol.origin {
            ExportOrigin::OwnBinding => SyntaxTree::id(&symbol.local_name),
            ExportOrigin::ReExportSingle => match symbol.related_specifier.as_deref() {
                // Specifier optional: the re-export may bind locally first.
                None => SyntaxTree::id(&symbol.local_name),
                Some(spec) => SyntaxTree::prop(
                    SyntaxTree::id(self.temp_scopes.name_for(spec)),
                    &symbol.local_name,
                ),
            },
            ExportOrigin::ReExportStar => {
                let Some(spec) = symbol.related_specifier.as_deref() else {
                    panic!("star re-export `{}` carries no module specifier", symbol.name);
                };
                SyntaxTree::prop(SyntaxTree::id(self.temp_scopes.name_for(spec)), &symbol.name)
            }
        };
        let getter = SyntaxTree::func_expr(None, vec![], vec![SyntaxTree::ret(Some(read))]);
        ObjectProperty::init(
            &symbol.name,
            SyntaxTree::object(vec![
                ObjectProperty::init("get", getter),
                ObjectProperty::init("enumerable", SyntaxTree::BooleanLiteral(true)),
            ]),
        )
    }
}

impl Rewrite for ModuleScriptTransformer<'_> {
    fn rewrite(&mut self, tree: SyntaxTree) -> SyntaxTree {
        match tree {
            SyntaxTree::ModuleSpecifierExpr { token } => specifier_lookup(&token),
            other => walk(self, other),
        }
    }

    fn rewrite_statement(&mut self, stmt: SyntaxTree) -> Option<SyntaxTree> {
        match stmt {
            SyntaxTree::ImportDeclaration {
                clause,
                module_specifier,
            } => Some(self.lower_import(clause, *module_specifier)),
            // `module x = y.z;` -> `var x = y.z;`
            SyntaxTree::ModuleAlias { name, initializer } => {
                Some(SyntaxTree::var_decl(name, Some(self.rewrite(*initializer))))
            }
            // The wrapper contributes nothing; its effect lives in the export
            // table. The wrapped declaration is transformed by its own rule.
            SyntaxTree::ExportDeclaration(decl) => self.rewrite_statement(*decl),
            SyntaxTree::NamedExport {
                module_specifier, ..
            } => self.lower_named_export(module_specifier),
            other => Some(self.rewrite(other)),
        }
    }
}

// =============================================================================
// Runtime-registry construction
// =============================================================================

/// `System.get("<token>")`, the sole point where lowering touches the
/// runtime loader's contract.
fn specifier_lookup(token: &str) -> SyntaxTree {
    SyntaxTree::call(
        SyntaxTree::prop(SyntaxTree::id(RUNTIME_REGISTRY), "get"),
        vec![SyntaxTree::string(token)],
    )
}

/// `System.get("@modlower/module").registerModule(url, function () {...}, this);`
fn registration_statement(url: &str, body: Vec<SyntaxTree>) -> SyntaxTree {
    let loader = SyntaxTree::call(
        SyntaxTree::prop(SyntaxTree::id(RUNTIME_REGISTRY), "get"),
        vec![SyntaxTree::string(MODULE_LOADER_KEY)],
    );
    SyntaxTree::expr_stmt(SyntaxTree::call(
        SyntaxTree::prop(loader, "registerModule"),
        vec![
            SyntaxTree::string(url),
            SyntaxTree::func_expr(None, vec![], body),
            SyntaxTree::This,
        ],
    ))
}

fn specifier_token(tree: &SyntaxTree) -> &str {
    match tree {
        SyntaxTree::ModuleSpecifierExpr { token } => token,
        other => panic!(
            "expected a module-specifier expression, got {}",
            other.kind_name()
        ),
    }
}
