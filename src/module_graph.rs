//! Resolved modules and the specifier registry
//!
//! The lowering pass consumes modules that have already been resolved by an
//! upstream pass: each [`Module`] carries its canonical URL and an ordered
//! export table. A `Module` value existing at all means resolution succeeded,
//! which is what lets wildcard imports be expanded eagerly at transform time.
//!
//! [`Project`] is the registry mapping a module-specifier token to its
//! resolved module. Specifier identity is the normalized textual value of the
//! token, not tree identity.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// Unique identifier for a module in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(pub u32);

impl ModuleId {
    pub const NONE: ModuleId = ModuleId(u32::MAX);

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// How an exported name originates in its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOrigin {
    /// Declared in the module itself: `export var a = 1;`
    OwnBinding,
    /// Named re-export: `export { a as b }`, optionally `from "mod"`.
    ReExportSingle,
    /// Wildcard re-export: `export * from "mod"`. Always carries a specifier.
    ReExportStar,
}

/// One entry of a module's export table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSymbol {
    /// Exported name: the property key on the namespace object.
    pub name: String,
    /// Left-hand (local) name. Equals `name` except for aliased re-exports.
    pub local_name: String,
    pub origin: ExportOrigin,
    /// Source-module specifier for re-exports. Required for `ReExportStar`.
    pub related_specifier: Option<String>,
}

impl ExportSymbol {
    /// Export of a binding declared in the module itself.
    pub fn own(name: impl Into<String>) -> Self {
        let name = name.into();
        ExportSymbol {
            local_name: name.clone(),
            name,
            origin: ExportOrigin::OwnBinding,
            related_specifier: None,
        }
    }

    /// Named re-export: `export { local as name }`, with the source specifier
    /// when the re-export names one (`from "mod"`).
    pub fn re_export(
        name: impl Into<String>,
        local_name: impl Into<String>,
        specifier: Option<&str>,
    ) -> Self {
        ExportSymbol {
            name: name.into(),
            local_name: local_name.into(),
            origin: ExportOrigin::ReExportSingle,
            related_specifier: specifier.map(normalize_specifier),
        }
    }

    /// One expanded entry of `export * from "mod"`.
    pub fn star(name: impl Into<String>, specifier: &str) -> Self {
        let name = name.into();
        ExportSymbol {
            local_name: name.clone(),
            name,
            origin: ExportOrigin::ReExportStar,
            related_specifier: Some(normalize_specifier(specifier)),
        }
    }
}

/// A resolved compilation unit: canonical URL plus ordered export table.
///
/// Insertion order of the table is the emission order of the namespace
/// object's properties, which is observable.
#[derive(Debug, Clone, Default)]
pub struct Module {
    /// Canonical URL. Falls back to [`Project::url`] when absent.
    pub url: Option<String>,
    exports: IndexMap<String, ExportSymbol>,
}

impl Module {
    pub fn new(url: impl Into<String>) -> Self {
        Module {
            url: Some(url.into()),
            exports: IndexMap::new(),
        }
    }

    /// A module with no URL of its own; usable only under a project fallback.
    pub fn anonymous() -> Self {
        Module::default()
    }

    /// Record an export. Insertion order is preserved; re-adding a name keeps
    /// its original position (upstream validation owns duplicate handling).
    pub fn add_export(&mut self, symbol: ExportSymbol) -> &mut Self {
        self.exports.insert(symbol.name.clone(), symbol);
        self
    }

    /// The export table in declaration order.
    pub fn exports(&self) -> impl Iterator<Item = &ExportSymbol> {
        self.exports.values()
    }

    pub fn export_count(&self) -> usize {
        self.exports.len()
    }
}

/// Registry of resolved modules, keyed by normalized specifier value.
#[derive(Debug, Default)]
pub struct Project {
    /// Fallback URL for modules that carry none of their own.
    pub url: Option<String>,
    modules: Vec<Module>,
    by_specifier: FxHashMap<String, ModuleId>,
}

impl Project {
    pub fn new() -> Self {
        Project::default()
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Project {
            url: Some(url.into()),
            ..Project::default()
        }
    }

    /// Register a resolved module under a specifier value.
    pub fn add_module(&mut self, specifier: &str, module: Module) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(module);
        self.by_specifier.insert(normalize_specifier(specifier), id);
        id
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.0 as usize)
    }

    /// Look up the resolved module for a specifier token, by normalized value.
    pub fn resolve_module_for_specifier(&self, specifier: &str) -> Option<&Module> {
        let id = self.by_specifier.get(&normalize_specifier(specifier))?;
        self.module(*id)
    }

    /// A module's URL, falling back to the project URL. Empty strings count
    /// as absent.
    pub fn resolved_url<'a>(&'a self, module: &'a Module) -> Option<&'a str> {
        module
            .url
            .as_deref()
            .or(self.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// Normalized textual value of a specifier token. De-duplication of runtime
/// lookups keys off this value.
pub fn normalize_specifier(specifier: &str) -> String {
    specifier.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_table_preserves_insertion_order() {
        let mut module = Module::new("lib.js");
        module
            .add_export(ExportSymbol::own("b"))
            .add_export(ExportSymbol::own("a"))
            .add_export(ExportSymbol::own("c"));

        let names: Vec<_> = module.exports().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn specifier_resolution_is_value_keyed() {
        let mut project = Project::new();
        project.add_module("./dep", Module::new("dep.js"));

        assert!(project.resolve_module_for_specifier("./dep").is_some());
        assert!(project.resolve_module_for_specifier(" ./dep ").is_some());
        assert!(project.resolve_module_for_specifier("./other").is_none());
    }

    #[test]
    fn resolved_url_falls_back_to_project() {
        let mut project = Project::with_url("app.js");
        let anon = Module::anonymous();
        let own = Module::new("lib.js");

        assert_eq!(project.resolved_url(&anon), Some("app.js"));
        assert_eq!(project.resolved_url(&own), Some("lib.js"));

        project.url = Some(String::new());
        assert_eq!(project.resolved_url(&anon), None);
    }
}
