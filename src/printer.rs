//! JavaScript printer for lowered trees
//!
//! Walks an output tree and emits JavaScript text. Small objects and
//! single-statement function bodies fold onto one line, so getter descriptors
//! print as `{ get: function () { return a; }, enumerable: true }` while the
//! registration wrapper and namespace object stay multi-line.
//!
//! The printer only understands script-form trees. Handing it unlowered
//! module syntax (imports, export wrappers, specifier expressions) is a
//! pipeline defect and panics.

use crate::syntax::tree::{BindingPattern, PropertyKey, SyntaxTree};

const INDENT: &str = "  ";

pub struct Printer {
    out: String,
    indent: usize,
}

/// Print a lowered tree as JavaScript text.
pub fn print(tree: &SyntaxTree) -> String {
    let mut printer = Printer::new(0);
    match tree {
        SyntaxTree::Script { statements } => {
            for stmt in statements {
                printer.write_statement(stmt);
            }
        }
        stmt if is_statement(stmt) => printer.write_statement(stmt),
        expr => {
            printer.write_expr(expr);
            printer.out.push('\n');
        }
    }
    printer.out
}

fn is_statement(tree: &SyntaxTree) -> bool {
    matches!(
        tree,
        SyntaxTree::UseStrict
            | SyntaxTree::VarDecl { .. }
            | SyntaxTree::VarDeclPattern { .. }
            | SyntaxTree::ExpressionStatement(_)
            | SyntaxTree::ReturnStatement(_)
            | SyntaxTree::Block(_)
            | SyntaxTree::FunctionDecl { .. }
            | SyntaxTree::EmptyStatement
    )
}

impl Printer {
    fn new(indent: usize) -> Self {
        Printer {
            out: String::new(),
            indent,
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn write_statement(&mut self, stmt: &SyntaxTree) {
        self.write_indent();
        self.write_statement_inline(stmt);
        self.out.push('\n');
    }

    /// Statement text without leading indent or trailing newline.
    fn write_statement_inline(&mut self, stmt: &SyntaxTree) {
        match stmt {
            SyntaxTree::UseStrict => self.out.push_str("\"use strict\";"),
            SyntaxTree::VarDecl { name, initializer } => {
                self.out.push_str("var ");
                self.out.push_str(name);
                if let Some(init) = initializer {
                    self.out.push_str(" = ");
                    self.write_expr(init);
                }
                self.out.push(';');
            }
            SyntaxTree::VarDeclPattern {
                pattern,
                initializer,
            } => {
                self.out.push_str("var ");
                self.write_pattern(pattern);
                self.out.push_str(" = ");
                self.write_expr(initializer);
                self.out.push(';');
            }
            SyntaxTree::ExpressionStatement(expr) => {
                self.write_expr(expr);
                self.out.push(';');
            }
            SyntaxTree::ReturnStatement(expr) => {
                self.out.push_str("return");
                if let Some(expr) = expr {
                    self.out.push(' ');
                    self.write_expr(expr);
                }
                self.out.push(';');
            }
            SyntaxTree::Block(statements) => {
                self.out.push_str("{\n");
                self.indent += 1;
                for stmt in statements {
                    self.write_statement(stmt);
                }
                self.indent -= 1;
                self.write_indent();
                self.out.push('}');
            }
            SyntaxTree::FunctionDecl {
                name,
                parameters,
                body,
            } => {
                self.out.push_str("function ");
                self.out.push_str(name);
                self.out.push('(');
                self.write_parameters(parameters);
                self.out.push_str(") ");
                self.write_function_body(body);
            }
            SyntaxTree::EmptyStatement => self.out.push(';'),
            other => panic!(
                "cannot print unlowered module syntax: {}",
                other.kind_name()
            ),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn write_expr(&mut self, expr: &SyntaxTree) {
        match expr {
            SyntaxTree::Identifier(name) => self.out.push_str(name),
            SyntaxTree::StringLiteral(text) => self.write_string_literal(text),
            SyntaxTree::NumericLiteral(text) => self.out.push_str(text),
            SyntaxTree::BooleanLiteral(value) => {
                self.out.push_str(if *value { "true" } else { "false" })
            }
            SyntaxTree::NullLiteral => self.out.push_str("null"),
            SyntaxTree::This => self.out.push_str("this"),
            SyntaxTree::CallExpr { callee, arguments } => {
                self.write_expr(callee);
                self.out.push('(');
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write_expr(arg);
                }
                self.out.push(')');
            }
            SyntaxTree::PropertyAccess { object, property } => {
                self.write_expr(object);
                self.out.push('.');
                self.out.push_str(property);
            }
            SyntaxTree::BinaryExpr {
                left,
                operator,
                right,
            } => {
                self.write_expr(left);
                self.out.push(' ');
                self.out.push_str(operator);
                self.out.push(' ');
                self.write_expr(right);
            }
            SyntaxTree::ObjectLiteral(props) => self.write_object(props),
            SyntaxTree::ArrayLiteral(elements) => {
                self.out.push('[');
                for (i, elem) in elements.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write_expr(elem);
                }
                self.out.push(']');
            }
            SyntaxTree::FunctionExpr {
                name,
                parameters,
                body,
            } => {
                self.out.push_str("function ");
                if let Some(name) = name {
                    self.out.push_str(name);
                }
                self.out.push('(');
                self.write_parameters(parameters);
                self.out.push_str(") ");
                self.write_function_body(body);
            }
            SyntaxTree::Parenthesized(inner) => {
                self.out.push('(');
                self.write_expr(inner);
                self.out.push(')');
            }
            other => panic!(
                "cannot print unlowered module syntax: {}",
                other.kind_name()
            ),
        }
    }

    /// Function body, folded onto one line when it is a single short
    /// statement: `{ return a; }`.
    fn write_function_body(&mut self, body: &[SyntaxTree]) {
        if let [only] = body {
            let rendered = self.render_inline(|p| p.write_statement_inline(only));
            if let Some(text) = rendered {
                self.out.push_str("{ ");
                self.out.push_str(&text);
                self.out.push_str(" }");
                return;
            }
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for stmt in body {
            self.write_statement(stmt);
        }
        self.indent -= 1;
        self.write_indent();
        self.out.push('}');
    }

    /// Object literal. Folds onto one line when no value is itself an object
    /// and every value renders without a line break.
    fn write_object(&mut self, props: &[crate::syntax::tree::ObjectProperty]) {
        if props.is_empty() {
            self.out.push_str("{}");
            return;
        }
        let nested_object = props
            .iter()
            .any(|p| matches!(p.value, SyntaxTree::ObjectLiteral(_)));
        if !nested_object {
            let mut parts = Vec::with_capacity(props.len());
            let mut flat = true;
            for prop in props {
                match self.render_inline(|p| {
                    p.write_property_key(&prop.key);
                    p.out.push_str(": ");
                    p.write_expr(&prop.value);
                }) {
                    Some(text) => parts.push(text),
                    None => {
                        flat = false;
                        break;
                    }
                }
            }
            if flat {
                self.out.push_str("{ ");
                self.out.push_str(&parts.join(", "));
                self.out.push_str(" }");
                return;
            }
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for (i, prop) in props.iter().enumerate() {
            self.write_indent();
            self.write_property_key(&prop.key);
            self.out.push_str(": ");
            self.write_expr(&prop.value);
            if i + 1 < props.len() {
                self.out.push(',');
            }
            self.out.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        self.out.push('}');
    }

    fn write_property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(name) => self.out.push_str(name),
            PropertyKey::StringLiteral(text) => self.write_string_literal(text),
        }
    }

    fn write_pattern(&mut self, pattern: &BindingPattern) {
        if pattern.fields.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{ ");
        for (i, field) in pattern.fields.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(&field.property_name);
            if field.local_name != field.property_name {
                self.out.push_str(": ");
                self.out.push_str(&field.local_name);
            }
        }
        self.out.push_str(" }");
    }

    fn write_parameters(&mut self, parameters: &[String]) {
        for (i, param) in parameters.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(param);
        }
    }

    fn write_string_literal(&mut self, text: &str) {
        self.out.push('"');
        for ch in text.chars() {
            match ch {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                other => self.out.push(other),
            }
        }
        self.out.push('"');
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    /// Render a fragment at this printer's indent; `None` if it spans lines.
    fn render_inline(&self, f: impl FnOnce(&mut Printer)) -> Option<String> {
        let mut scratch = Printer::new(self.indent);
        f(&mut scratch);
        if scratch.out.contains('\n') {
            None
        } else {
            Some(scratch.out)
        }
    }
}
