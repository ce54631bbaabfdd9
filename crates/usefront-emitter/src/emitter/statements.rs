//! Statement and declaration emission.

use super::Printer;
use usefront_parser::parser::node::{
    BindingElementData, ExportDeclData, FunctionData, ImportDeclData, Node, SpecifierData,
};
use usefront_parser::{NodeIndex, NodeList};
use usefront_scanner::OperatorPrecedence;

impl<'a> Printer<'a> {
    pub(super) fn emit_source_file(&mut self, statements: &NodeList) {
        if self.options.retain_lines {
            for &stmt in &statements.nodes {
                let line = self.source_line_of(stmt);
                self.move_to_line(line);
                self.emit_statement(stmt);
            }
            if !self.writer.is_empty() {
                self.write_line();
            }
        } else {
            for &stmt in &statements.nodes {
                self.emit_statement(stmt);
                self.write_line();
            }
        }
    }

    pub(super) fn emit_statement(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(index) else {
            return;
        };
        match node {
            Node::SourceFile(file) => self.emit_source_file(&file.statements),
            Node::VariableStatement(list) => {
                self.write(list.kind.as_str());
                self.write_space();
                self.emit_comma_list(&list.declarations, Self::emit_variable_declaration);
                self.write_semicolon();
            }
            Node::FunctionDeclaration(func) => self.emit_function(func, "function"),
            Node::Block(_) => self.emit_block(index),
            Node::ExpressionStatement(stmt) => {
                self.emit_expression_statement_head(stmt.expression);
                self.write_semicolon();
            }
            Node::ReturnStatement(ret) => {
                self.write("return");
                if ret.expression.is_some() {
                    self.write_space();
                    self.emit_expression(ret.expression);
                }
                self.write_semicolon();
            }
            Node::IfStatement(stmt) => {
                self.write("if (");
                self.emit_expression(stmt.expression);
                self.write(")");
                self.emit_embedded_statement(stmt.then_statement);
                if stmt.else_statement.is_some() {
                    self.write(" else");
                    self.emit_embedded_statement(stmt.else_statement);
                }
            }
            Node::WhileStatement(stmt) => {
                self.write("while (");
                self.emit_expression(stmt.condition);
                self.write(")");
                self.emit_embedded_statement(stmt.statement);
            }
            Node::DoStatement(stmt) => {
                self.write("do");
                self.emit_embedded_statement(stmt.statement);
                self.write(" while (");
                self.emit_expression(stmt.condition);
                self.write(")");
                self.write_semicolon();
            }
            Node::ForStatement(stmt) => {
                self.write("for (");
                self.emit_for_initializer(stmt.initializer);
                self.write(";");
                if stmt.condition.is_some() {
                    self.write_space();
                    self.emit_expression(stmt.condition);
                }
                self.write(";");
                if stmt.incrementor.is_some() {
                    self.write_space();
                    self.emit_expression(stmt.incrementor);
                }
                self.write(")");
                self.emit_embedded_statement(stmt.statement);
            }
            Node::ForInStatement(stmt) | Node::ForOfStatement(stmt) => {
                let keyword = if matches!(node, Node::ForInStatement(_)) {
                    " in "
                } else {
                    " of "
                };
                self.write("for (");
                self.emit_for_initializer(stmt.initializer);
                self.write(keyword);
                self.emit_expression(stmt.expression);
                self.write(")");
                self.emit_embedded_statement(stmt.statement);
            }
            Node::BreakStatement(jump) | Node::ContinueStatement(jump) => {
                let keyword = if matches!(node, Node::BreakStatement(_)) {
                    "break"
                } else {
                    "continue"
                };
                self.write(keyword);
                if jump.label.is_some() {
                    self.write_space();
                    self.write_identifier_text(jump.label);
                }
                self.write_semicolon();
            }
            Node::ThrowStatement(stmt) => {
                self.write("throw ");
                self.emit_expression(stmt.expression);
                self.write_semicolon();
            }
            Node::EmptyStatement => self.write_semicolon(),
            Node::ImportDeclaration(import) => self.emit_import_declaration(import),
            Node::ExportDeclaration(export) => self.emit_export_declaration(export),
            Node::ExportAssignment(export) => {
                self.write("export default ");
                self.emit_expression_in(export.expression, OperatorPrecedence::Assignment);
                self.write_semicolon();
            }
            _ => self.emit_expression(index),
        }
    }

    /// Body of `if`/`while`/`for`: blocks open on the same line, other
    /// statements follow a single space.
    fn emit_embedded_statement(&mut self, index: NodeIndex) {
        self.write_space();
        self.emit_statement(index);
    }

    /// Expression statements that would otherwise start with `{` or
    /// `function` are parenthesized.
    fn emit_expression_statement_head(&mut self, expression: NodeIndex) {
        let needs_parens = matches!(
            self.arena.get(expression),
            Some(Node::ObjectLiteralExpression(_) | Node::FunctionExpression(_))
        );
        if needs_parens {
            self.write("(");
            self.emit_expression(expression);
            self.write(")");
        } else {
            self.emit_expression(expression);
        }
    }

    pub(super) fn emit_for_initializer(&mut self, initializer: NodeIndex) {
        let arena = self.arena;
        match arena.get(initializer) {
            Some(Node::VariableDeclarationList(list)) => {
                self.write(list.kind.as_str());
                self.write_space();
                self.emit_comma_list(&list.declarations, Self::emit_variable_declaration);
            }
            Some(_) => self.emit_expression(initializer),
            None => {}
        }
    }

    pub(super) fn emit_block(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(Node::Block(block)) = arena.get(index) else {
            return;
        };
        self.write("{");
        if block.statements.is_empty() {
            self.write("}");
            return;
        }

        self.increase_indent();
        if self.options.retain_lines {
            for &stmt in &block.statements.nodes {
                let line = self.source_line_of(stmt);
                self.move_to_line(line);
                self.emit_statement(stmt);
            }
            self.decrease_indent();
            let close_line = self.source_end_line_of(index);
            self.move_to_line(close_line);
        } else {
            for &stmt in &block.statements.nodes {
                self.write_line();
                self.emit_statement(stmt);
            }
            self.decrease_indent();
            self.write_line();
        }
        self.write("}");
    }

    pub(super) fn emit_variable_declaration(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(decl) = arena.get_variable_declaration(index) else {
            return;
        };
        self.emit_binding_name(decl.name);
        if decl.initializer.is_some() {
            self.write(" = ");
            self.emit_expression_in(decl.initializer, OperatorPrecedence::Assignment);
        }
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    pub(super) fn emit_binding_name(&mut self, index: NodeIndex) {
        let arena = self.arena;
        match arena.get(index) {
            Some(Node::ArrayBindingPattern(pattern)) => {
                self.write("[");
                self.emit_comma_list(&pattern.elements, Self::emit_binding_element);
                if pattern
                    .elements
                    .nodes
                    .last()
                    .is_some_and(|&last| matches!(arena.get(last), Some(Node::OmittedExpression)))
                {
                    self.write(",");
                }
                self.write("]");
            }
            Some(Node::ObjectBindingPattern(pattern)) => {
                self.write("{");
                self.emit_comma_list(&pattern.elements, Self::emit_binding_element);
                self.write("}");
            }
            Some(_) => self.emit_expression(index),
            None => {}
        }
    }

    pub(super) fn emit_binding_element(&mut self, index: NodeIndex) {
        let arena = self.arena;
        match arena.get(index) {
            Some(Node::BindingElement(element)) => self.emit_binding_element_data(element),
            Some(Node::OmittedExpression) | None => {}
            Some(_) => self.emit_binding_name(index),
        }
    }

    fn emit_binding_element_data(&mut self, element: &BindingElementData) {
        if element.dot_dot_dot {
            self.write("...");
        }
        if element.property_name.is_some() {
            self.emit_property_name(element.property_name);
            self.write(": ");
        }
        self.emit_binding_name(element.name);
        if element.initializer.is_some() {
            self.write(" = ");
            self.emit_expression_in(element.initializer, OperatorPrecedence::Assignment);
        }
    }

    pub(super) fn emit_parameter(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(Node::Parameter(param)) = arena.get(index) else {
            return;
        };
        if param.dot_dot_dot {
            self.write("...");
        }
        self.emit_binding_name(param.name);
        if param.initializer.is_some() {
            self.write(" = ");
            self.emit_expression_in(param.initializer, OperatorPrecedence::Assignment);
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `[async] function [name](params) { body }`
    pub(super) fn emit_function(&mut self, func: &FunctionData, keyword: &str) {
        if func.is_async {
            self.write("async ");
        }
        self.write(keyword);
        if func.name.is_some() {
            self.write_space();
            self.write_identifier_text(func.name);
        } else {
            self.write_space();
        }
        self.write("(");
        self.emit_comma_list(&func.parameters, Self::emit_parameter);
        self.write(") ");
        self.emit_block(func.body);
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn emit_import_declaration(&mut self, import: &ImportDeclData) {
        self.write("import ");
        let mut has_clause = false;
        if import.default_binding.is_some() {
            self.write_identifier_text(import.default_binding);
            has_clause = true;
        }
        if import.namespace_binding.is_some() {
            if has_clause {
                self.write(", ");
            }
            self.write("* as ");
            self.write_identifier_text(import.namespace_binding);
            has_clause = true;
        }
        if let Some(named) = &import.named_bindings {
            if has_clause {
                self.write(", ");
            }
            self.emit_specifiers(named);
            has_clause = true;
        }
        if has_clause {
            self.write(" from ");
        }
        self.emit_expression(import.module_specifier);
        self.write_semicolon();
    }

    fn emit_export_declaration(&mut self, export: &ExportDeclData) {
        self.write("export ");
        if export.is_default {
            self.write("default ");
        }
        if export.declaration.is_some() {
            self.emit_statement(export.declaration);
            return;
        }
        match &export.named_exports {
            Some(named) => self.emit_specifiers(named),
            None => self.write("*"),
        }
        if export.module_specifier.is_some() {
            self.write(" from ");
            self.emit_expression(export.module_specifier);
        }
        self.write_semicolon();
    }

    fn emit_specifiers(&mut self, specifiers: &NodeList) {
        if specifiers.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        self.emit_comma_list(specifiers, Self::emit_specifier);
        self.write(" }");
    }

    pub(super) fn emit_specifier(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let spec: &SpecifierData = match arena.get(index) {
            Some(Node::ImportSpecifier(spec) | Node::ExportSpecifier(spec)) => spec,
            _ => return,
        };
        if spec.property_name.is_some() {
            self.write_identifier_text(spec.property_name);
            self.write(" as ");
        }
        self.write_identifier_text(spec.name);
    }
}
