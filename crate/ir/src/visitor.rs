use crate::ast::{
    Expression, FunctionDefStmt, LiteralValue, Statement,
};

/// Visitor pattern over the AST, parameterized by the return type `T`.
///
/// Rather than virtual-dispatching through per-node types, traversal is a
/// match on the variant tag (`visit_statement`/`visit_expression`), which
/// keeps dispatch exhaustive and lets the compiler flag missing arms when a
/// new node variant is added. Implementors override the leaf `visit_*`
/// methods; the two dispatch methods have default bodies.
pub trait Visitor<T> {
    fn visit_statement(&mut self, stmt: &Statement) -> T {
        match stmt {
            Statement::VarDecl(name, value, loc) => self.visit_var_decl(name, value, *loc),
            Statement::Assignment(name, value, loc) => self.visit_assignment(name, value, *loc),
            Statement::PropertyAssignment(target, name, value, loc) => {
                self.visit_property_assignment(target, name, value, *loc)
            }
            Statement::IndexAssignment(target, index, value, loc) => {
                self.visit_index_assignment(target, index, value, *loc)
            }
            Statement::ExpressionStmt(expr, loc) => self.visit_expression_statement(expr, *loc),
            Statement::Block(stmts, loc) => self.visit_block(stmts, *loc),
            Statement::If(cond, then_branch, elifs, else_branch, loc) => {
                self.visit_if(cond, then_branch, elifs, else_branch.as_deref(), *loc)
            }
            Statement::While(cond, body, loc) => self.visit_while(cond, body, *loc),
            Statement::ForEach(var, iterable, body, loc) => {
                self.visit_for_each(var, iterable, body, *loc)
            }
            Statement::Break(loc) => self.visit_break(*loc),
            Statement::Continue(loc) => self.visit_continue(*loc),
            Statement::FunctionDef(def) => self.visit_function_def(def),
            Statement::Return(value, loc) => self.visit_return(value.as_ref(), *loc),
            Statement::ClassDef(name, parent, methods, loc) => {
                self.visit_class_def(name, parent.as_deref(), methods, *loc)
            }
            Statement::Try(body, catch_var, catch_body, finally, loc) => {
                self.visit_try(body, catch_var, catch_body, finally.as_deref(), *loc)
            }
            Statement::Throw(value, loc) => self.visit_throw(value, *loc),
            Statement::Print(args, newline, loc) => self.visit_print(args, *newline, *loc),
            Statement::Input(name, prompt, loc) => {
                self.visit_input(name, prompt.as_deref(), *loc)
            }
            Statement::Import(name, loc) => self.visit_import(name, *loc),
        }
    }

    fn visit_expression(&mut self, expr: &Expression) -> T {
        match expr {
            Expression::Literal(value, loc) => self.visit_literal(value, *loc),
            Expression::List(items, loc) => self.visit_list(items, *loc),
            Expression::Dict(entries, loc) => self.visit_dict(entries, *loc),
            Expression::Variable(name, loc) => self.visit_variable(name, *loc),
            Expression::BinaryOp(op, left, right, loc) => {
                self.visit_binary_op(*op, left, right, *loc)
            }
            Expression::UnaryOp(op, operand, loc) => self.visit_unary_op(*op, operand, *loc),
            Expression::Parenthesized(inner, loc) => self.visit_parenthesized(inner, *loc),
            Expression::FunctionCall(callee, args, loc) => {
                self.visit_function_call(callee, args, *loc)
            }
            Expression::Lambda(params, body, loc) => self.visit_lambda(params, body, *loc),
            Expression::NewObject(class_name, args, loc) => {
                self.visit_new_object(class_name, args, *loc)
            }
            Expression::MethodCall(target, name, args, loc) => {
                self.visit_method_call(target, name, args, *loc)
            }
            Expression::PropertyAccess(target, name, loc) => {
                self.visit_property_access(target, name, *loc)
            }
            Expression::Index(target, index, loc) => self.visit_index(target, index, *loc),
            Expression::This(loc) => self.visit_this(*loc),
            Expression::Super(args, loc) => self.visit_super(args, *loc),
        }
    }

    fn visit_var_decl(&mut self, name: &str, value: &Expression, loc: crate::SourceLocation) -> T;
    fn visit_assignment(&mut self, name: &str, value: &Expression, loc: crate::SourceLocation) -> T;
    fn visit_property_assignment(
        &mut self,
        target: &Expression,
        name: &str,
        value: &Expression,
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_index_assignment(
        &mut self,
        target: &Expression,
        index: &Expression,
        value: &Expression,
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_expression_statement(&mut self, expr: &Expression, loc: crate::SourceLocation) -> T;
    fn visit_block(&mut self, stmts: &[Statement], loc: crate::SourceLocation) -> T;
    fn visit_if(
        &mut self,
        cond: &Expression,
        then_branch: &[Statement],
        elifs: &[(Expression, Vec<Statement>)],
        else_branch: Option<&[Statement]>,
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_while(&mut self, cond: &Expression, body: &[Statement], loc: crate::SourceLocation) -> T;
    fn visit_for_each(
        &mut self,
        var: &str,
        iterable: &Expression,
        body: &[Statement],
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_break(&mut self, loc: crate::SourceLocation) -> T;
    fn visit_continue(&mut self, loc: crate::SourceLocation) -> T;
    fn visit_function_def(&mut self, def: &FunctionDefStmt) -> T;
    fn visit_return(&mut self, value: Option<&Expression>, loc: crate::SourceLocation) -> T;
    fn visit_class_def(
        &mut self,
        name: &str,
        parent: Option<&str>,
        methods: &[FunctionDefStmt],
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_try(
        &mut self,
        body: &[Statement],
        catch_var: &str,
        catch_body: &[Statement],
        finally: Option<&[Statement]>,
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_throw(&mut self, value: &Expression, loc: crate::SourceLocation) -> T;
    fn visit_print(&mut self, args: &[Expression], newline: bool, loc: crate::SourceLocation) -> T;
    fn visit_input(&mut self, name: &str, prompt: Option<&str>, loc: crate::SourceLocation) -> T;
    fn visit_import(&mut self, name: &str, loc: crate::SourceLocation) -> T;

    fn visit_literal(&mut self, value: &LiteralValue, loc: crate::SourceLocation) -> T;
    fn visit_list(&mut self, items: &[Expression], loc: crate::SourceLocation) -> T;
    fn visit_dict(&mut self, entries: &[(Expression, Expression)], loc: crate::SourceLocation) -> T;
    fn visit_variable(&mut self, name: &str, loc: crate::SourceLocation) -> T;
    fn visit_binary_op(
        &mut self,
        op: crate::ast::BinaryOperator,
        left: &Expression,
        right: &Expression,
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_unary_op(
        &mut self,
        op: crate::ast::UnaryOperator,
        operand: &Expression,
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_parenthesized(&mut self, inner: &Expression, loc: crate::SourceLocation) -> T;
    fn visit_function_call(
        &mut self,
        callee: &Expression,
        args: &[Expression],
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_lambda(&mut self, params: &[String], body: &Expression, loc: crate::SourceLocation) -> T;
    fn visit_new_object(&mut self, class_name: &str, args: &[Expression], loc: crate::SourceLocation) -> T;
    fn visit_method_call(
        &mut self,
        target: &Expression,
        name: &str,
        args: &[Expression],
        loc: crate::SourceLocation,
    ) -> T;
    fn visit_property_access(&mut self, target: &Expression, name: &str, loc: crate::SourceLocation) -> T;
    fn visit_index(&mut self, target: &Expression, index: &Expression, loc: crate::SourceLocation) -> T;
    fn visit_this(&mut self, loc: crate::SourceLocation) -> T;
    fn visit_super(&mut self, args: &[Expression], loc: crate::SourceLocation) -> T;
}
