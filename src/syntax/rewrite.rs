//! Generic tree rewriting
//!
//! [`Rewrite`] is the seam every transform hangs off: `rewrite` dispatches on
//! node kind and defaults to [`walk`], which reconstructs the node recursively
//! without change. A transform overrides `rewrite` (and, for statements that
//! may disappear from their list, `rewrite_statement`) for the kinds it
//! handles and falls through to `walk` for everything else, so unhandled
//! statements are copied structurally unchanged.

use crate::syntax::tree::{ObjectProperty, SyntaxTree};

pub trait Rewrite {
    /// Rewrite a single node. The default is the identity reconstruction.
    fn rewrite(&mut self, tree: SyntaxTree) -> SyntaxTree {
        walk(self, tree)
    }

    /// Rewrite a statement in list position. Returning `None` removes the
    /// statement from the enclosing list. The default defers to [`rewrite`].
    ///
    /// [`rewrite`]: Rewrite::rewrite
    fn rewrite_statement(&mut self, stmt: SyntaxTree) -> Option<SyntaxTree> {
        Some(self.rewrite(stmt))
    }
}

/// Identity reconstruction: rebuild `tree` with every child passed back
/// through the rewriter. Leaves are returned as-is.
pub fn walk<R: Rewrite + ?Sized>(r: &mut R, tree: SyntaxTree) -> SyntaxTree {
    match tree {
        SyntaxTree::Script { statements } => SyntaxTree::Script {
            statements: walk_statements(r, statements),
        },
        SyntaxTree::ModuleBody { statements } => SyntaxTree::ModuleBody {
            statements: walk_statements(r, statements),
        },

        SyntaxTree::CallExpr { callee, arguments } => SyntaxTree::CallExpr {
            callee: Box::new(r.rewrite(*callee)),
            arguments: arguments.into_iter().map(|a| r.rewrite(a)).collect(),
        },
        SyntaxTree::PropertyAccess { object, property } => SyntaxTree::PropertyAccess {
            object: Box::new(r.rewrite(*object)),
            property,
        },
        SyntaxTree::BinaryExpr {
            left,
            operator,
            right,
        } => SyntaxTree::BinaryExpr {
            left: Box::new(r.rewrite(*left)),
            operator,
            right: Box::new(r.rewrite(*right)),
        },
        SyntaxTree::ObjectLiteral(props) => SyntaxTree::ObjectLiteral(
            props
                .into_iter()
                .map(|p| ObjectProperty {
                    key: p.key,
                    value: r.rewrite(p.value),
                })
                .collect(),
        ),
        SyntaxTree::ArrayLiteral(elements) => {
            SyntaxTree::ArrayLiteral(elements.into_iter().map(|e| r.rewrite(e)).collect())
        }
        SyntaxTree::FunctionExpr {
            name,
            parameters,
            body,
        } => SyntaxTree::FunctionExpr {
            name,
            parameters,
            body: walk_statements(r, body),
        },
        SyntaxTree::Parenthesized(inner) => {
            SyntaxTree::Parenthesized(Box::new(r.rewrite(*inner)))
        }

        SyntaxTree::VarDecl { name, initializer } => SyntaxTree::VarDecl {
            name,
            initializer: initializer.map(|i| Box::new(r.rewrite(*i))),
        },
        SyntaxTree::VarDeclPattern {
            pattern,
            initializer,
        } => SyntaxTree::VarDeclPattern {
            pattern,
            initializer: Box::new(r.rewrite(*initializer)),
        },
        SyntaxTree::ExpressionStatement(expr) => {
            SyntaxTree::ExpressionStatement(Box::new(r.rewrite(*expr)))
        }
        SyntaxTree::ReturnStatement(expr) => {
            SyntaxTree::ReturnStatement(expr.map(|e| Box::new(r.rewrite(*e))))
        }
        SyntaxTree::Block(statements) => SyntaxTree::Block(walk_statements(r, statements)),
        SyntaxTree::FunctionDecl {
            name,
            parameters,
            body,
        } => SyntaxTree::FunctionDecl {
            name,
            parameters,
            body: walk_statements(r, body),
        },

        SyntaxTree::ImportDeclaration {
            clause,
            module_specifier,
        } => SyntaxTree::ImportDeclaration {
            clause,
            module_specifier: Box::new(r.rewrite(*module_specifier)),
        },
        SyntaxTree::ExportDeclaration(decl) => {
            SyntaxTree::ExportDeclaration(Box::new(r.rewrite(*decl)))
        }
        SyntaxTree::NamedExport {
            specifiers,
            star,
            module_specifier,
        } => SyntaxTree::NamedExport {
            specifiers,
            star,
            module_specifier: module_specifier.map(|s| Box::new(r.rewrite(*s))),
        },
        SyntaxTree::ModuleAlias { name, initializer } => SyntaxTree::ModuleAlias {
            name,
            initializer: Box::new(r.rewrite(*initializer)),
        },

        // Leaves carry no child trees.
        leaf @ (SyntaxTree::Identifier(_)
        | SyntaxTree::StringLiteral(_)
        | SyntaxTree::NumericLiteral(_)
        | SyntaxTree::BooleanLiteral(_)
        | SyntaxTree::NullLiteral
        | SyntaxTree::This
        | SyntaxTree::UseStrict
        | SyntaxTree::EmptyStatement
        | SyntaxTree::ModuleSpecifierExpr { .. }) => leaf,
    }
}

fn walk_statements<R: Rewrite + ?Sized>(r: &mut R, stmts: Vec<SyntaxTree>) -> Vec<SyntaxTree> {
    stmts
        .into_iter()
        .filter_map(|s| r.rewrite_statement(s))
        .collect()
}
