//! Tagged syntax tree for module lowering
//!
//! One closed enum covers everything the lowering pass consumes and produces:
//! the module-flavored input statements (imports, export wrappers, module
//! aliases, specifier expressions) and the plain-script constructs the pass
//! emits (variable declarations, object literals, function values).
//!
//! Trees are owned data. Constructing a composite node takes ownership of its
//! children; a child is never shared between two trees. Rewriting never
//! mutates a node in place; it consumes the old tree and produces a new one.

/// A node in the syntax tree: a kind tag plus owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxTree {
    // =========================================================================
    // Top-level kinds
    // =========================================================================
    /// A plain script: the output form, and the input form for the
    /// script-level entry point.
    Script { statements: Vec<SyntaxTree> },

    /// The top level of a module before lowering.
    ModuleBody { statements: Vec<SyntaxTree> },

    // =========================================================================
    // Names and literals
    // =========================================================================
    /// Identifier reference: `foo`
    Identifier(String),

    /// String literal: `"hello"`
    StringLiteral(String),

    /// Numeric literal, kept as source text: `42`, `3.14`
    NumericLiteral(String),

    /// Boolean literal: `true`, `false`
    BooleanLiteral(bool),

    /// Null literal: `null`
    NullLiteral,

    /// This expression: `this`
    This,

    // =========================================================================
    // Expressions
    // =========================================================================
    /// Call expression: `callee(args)`
    CallExpr {
        callee: Box<SyntaxTree>,
        arguments: Vec<SyntaxTree>,
    },

    /// Property access: `object.property`
    PropertyAccess {
        object: Box<SyntaxTree>,
        property: String,
    },

    /// Binary expression: `left op right`
    BinaryExpr {
        left: Box<SyntaxTree>,
        operator: String,
        right: Box<SyntaxTree>,
    },

    /// Object literal: `{ key: value, ... }`
    ObjectLiteral(Vec<ObjectProperty>),

    /// Array literal: `[a, b, c]`
    ArrayLiteral(Vec<SyntaxTree>),

    /// Function expression: `function name(params) { body }`
    FunctionExpr {
        name: Option<String>,
        parameters: Vec<String>,
        body: Vec<SyntaxTree>,
    },

    /// Parenthesized expression: `(expr)`
    Parenthesized(Box<SyntaxTree>),

    // =========================================================================
    // Statements
    // =========================================================================
    /// Strict-mode directive: `"use strict";`
    UseStrict,

    /// Variable declaration with a simple name: `var x = value;`
    VarDecl {
        name: String,
        initializer: Option<Box<SyntaxTree>>,
    },

    /// Variable declaration destructuring an object: `var { a, b: c } = value;`
    VarDeclPattern {
        pattern: BindingPattern,
        initializer: Box<SyntaxTree>,
    },

    /// Expression statement: `expr;`
    ExpressionStatement(Box<SyntaxTree>),

    /// Return statement: `return expr;`
    ReturnStatement(Option<Box<SyntaxTree>>),

    /// Block statement: `{ statements }`
    Block(Vec<SyntaxTree>),

    /// Function declaration: `function name(params) { body }`
    FunctionDecl {
        name: String,
        parameters: Vec<String>,
        body: Vec<SyntaxTree>,
    },

    /// Empty statement: `;`
    EmptyStatement,

    // =========================================================================
    // Module-flavored input kinds (consumed by the lowering pass)
    // =========================================================================
    /// Import declaration: `import { a, b as c } from "mod";` or the wildcard
    /// form importing the whole export set.
    ImportDeclaration {
        clause: ImportClause,
        module_specifier: Box<SyntaxTree>,
    },

    /// Export wrapper around another declaration: `export var x = 1;`
    ExportDeclaration(Box<SyntaxTree>),

    /// Named export statement: `export { a as b };`, `export { a } from "mod";`
    /// or `export * from "mod";`. The specifier list is only a table
    /// annotation; the module's export table is what drives emission.
    NamedExport {
        specifiers: Vec<ExportSpecifier>,
        star: bool,
        module_specifier: Option<Box<SyntaxTree>>,
    },

    /// Module alias declaration: `module x = y.z;`
    ModuleAlias {
        name: String,
        initializer: Box<SyntaxTree>,
    },

    /// A module-specifier token in expression position: the source of an
    /// import, re-export, or alias. Lowered to a runtime registry lookup.
    ModuleSpecifierExpr { token: String },
}

/// Destructuring shape for lowered imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingPattern {
    pub fields: Vec<BindingField>,
}

/// One field of a binding pattern: `property_name` on the source object bound
/// to `local_name` in scope. Prints as shorthand when the two coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingField {
    pub property_name: String,
    pub local_name: String,
}

/// The bindings requested by an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportClause {
    /// `import { a, b as c } from ...`
    Named(Vec<ImportSpecifier>),
    /// Wildcard import of the target module's entire export set, expanded
    /// eagerly at transform time from the resolved export table.
    Wildcard,
}

/// One specifier in a named import clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    /// Left-hand name: the property on the source module.
    pub remote: String,
    /// Right-hand alias, when the local binding differs from the remote name.
    pub local: Option<String>,
}

/// One specifier in a named export clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpecifier {
    /// Left-hand (local) name.
    pub local: String,
    /// Right-hand exported alias, when it differs.
    pub exported: Option<String>,
}

/// Property in an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectProperty {
    pub key: PropertyKey,
    pub value: SyntaxTree,
}

/// Object property key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey {
    Identifier(String),
    StringLiteral(String),
}

// =========================================================================
// Builder helpers
// =========================================================================

impl SyntaxTree {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        SyntaxTree::Identifier(name.into())
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        SyntaxTree::StringLiteral(s.into())
    }

    /// Create a numeric literal
    pub fn number(n: impl Into<String>) -> Self {
        SyntaxTree::NumericLiteral(n.into())
    }

    /// Create a call expression
    pub fn call(callee: SyntaxTree, args: Vec<SyntaxTree>) -> Self {
        SyntaxTree::CallExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a property access
    pub fn prop(object: SyntaxTree, property: impl Into<String>) -> Self {
        SyntaxTree::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Create a binary expression
    pub fn binary(left: SyntaxTree, op: impl Into<String>, right: SyntaxTree) -> Self {
        SyntaxTree::BinaryExpr {
            left: Box::new(left),
            operator: op.into(),
            right: Box::new(right),
        }
    }

    /// Create a var declaration
    pub fn var_decl(name: impl Into<String>, init: Option<SyntaxTree>) -> Self {
        SyntaxTree::VarDecl {
            name: name.into(),
            initializer: init.map(Box::new),
        }
    }

    /// Create a destructuring var declaration
    pub fn var_pattern(pattern: BindingPattern, init: SyntaxTree) -> Self {
        SyntaxTree::VarDeclPattern {
            pattern,
            initializer: Box::new(init),
        }
    }

    /// Create a return statement
    pub fn ret(expr: Option<SyntaxTree>) -> Self {
        SyntaxTree::ReturnStatement(expr.map(Box::new))
    }

    /// Create a function expression
    pub fn func_expr(name: Option<String>, params: Vec<String>, body: Vec<SyntaxTree>) -> Self {
        SyntaxTree::FunctionExpr {
            name,
            parameters: params,
            body,
        }
    }

    /// Create an expression statement
    pub fn expr_stmt(expr: SyntaxTree) -> Self {
        SyntaxTree::ExpressionStatement(Box::new(expr))
    }

    /// Create an object literal
    pub fn object(props: Vec<ObjectProperty>) -> Self {
        SyntaxTree::ObjectLiteral(props)
    }

    /// Create a module-specifier expression
    pub fn specifier(token: impl Into<String>) -> Self {
        SyntaxTree::ModuleSpecifierExpr {
            token: token.into(),
        }
    }

    /// Human-readable kind tag, for precondition failures and trace output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SyntaxTree::Script { .. } => "Script",
            SyntaxTree::ModuleBody { .. } => "ModuleBody",
            SyntaxTree::Identifier(_) => "Identifier",
            SyntaxTree::StringLiteral(_) => "StringLiteral",
            SyntaxTree::NumericLiteral(_) => "NumericLiteral",
            SyntaxTree::BooleanLiteral(_) => "BooleanLiteral",
            SyntaxTree::NullLiteral => "NullLiteral",
            SyntaxTree::This => "This",
            SyntaxTree::CallExpr { .. } => "CallExpr",
            SyntaxTree::PropertyAccess { .. } => "PropertyAccess",
            SyntaxTree::BinaryExpr { .. } => "BinaryExpr",
            SyntaxTree::ObjectLiteral(_) => "ObjectLiteral",
            SyntaxTree::ArrayLiteral(_) => "ArrayLiteral",
            SyntaxTree::FunctionExpr { .. } => "FunctionExpr",
            SyntaxTree::Parenthesized(_) => "Parenthesized",
            SyntaxTree::UseStrict => "UseStrict",
            SyntaxTree::VarDecl { .. } => "VarDecl",
            SyntaxTree::VarDeclPattern { .. } => "VarDeclPattern",
            SyntaxTree::ExpressionStatement(_) => "ExpressionStatement",
            SyntaxTree::ReturnStatement(_) => "ReturnStatement",
            SyntaxTree::Block(_) => "Block",
            SyntaxTree::FunctionDecl { .. } => "FunctionDecl",
            SyntaxTree::EmptyStatement => "EmptyStatement",
            SyntaxTree::ImportDeclaration { .. } => "ImportDeclaration",
            SyntaxTree::ExportDeclaration(_) => "ExportDeclaration",
            SyntaxTree::NamedExport { .. } => "NamedExport",
            SyntaxTree::ModuleAlias { .. } => "ModuleAlias",
            SyntaxTree::ModuleSpecifierExpr { .. } => "ModuleSpecifierExpr",
        }
    }
}

impl BindingPattern {
    pub fn new(fields: Vec<BindingField>) -> Self {
        BindingPattern { fields }
    }
}

impl BindingField {
    /// Shorthand field: `{ name }`
    pub fn shorthand(name: impl Into<String>) -> Self {
        let name = name.into();
        BindingField {
            property_name: name.clone(),
            local_name: name,
        }
    }

    /// Aliased field: `{ property: local }`
    pub fn aliased(property: impl Into<String>, local: impl Into<String>) -> Self {
        BindingField {
            property_name: property.into(),
            local_name: local.into(),
        }
    }
}

impl ImportSpecifier {
    /// `import { name }`
    pub fn named(remote: impl Into<String>) -> Self {
        ImportSpecifier {
            remote: remote.into(),
            local: None,
        }
    }

    /// `import { remote as local }`
    pub fn aliased(remote: impl Into<String>, local: impl Into<String>) -> Self {
        ImportSpecifier {
            remote: remote.into(),
            local: Some(local.into()),
        }
    }
}

impl ExportSpecifier {
    /// `export { name }`
    pub fn named(local: impl Into<String>) -> Self {
        ExportSpecifier {
            local: local.into(),
            exported: None,
        }
    }

    /// `export { local as exported }`
    pub fn aliased(local: impl Into<String>, exported: impl Into<String>) -> Self {
        ExportSpecifier {
            local: local.into(),
            exported: Some(exported.into()),
        }
    }
}

impl ObjectProperty {
    /// Property with identifier key: `{ key: value }`
    pub fn init(key: impl Into<String>, value: SyntaxTree) -> Self {
        ObjectProperty {
            key: PropertyKey::Identifier(key.into()),
            value,
        }
    }

    /// Property with string literal key: `{ "key": value }`
    pub fn init_string(key: impl Into<String>, value: SyntaxTree) -> Self {
        ObjectProperty {
            key: PropertyKey::StringLiteral(key.into()),
            value,
        }
    }
}
