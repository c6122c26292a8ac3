use crate::ast::{BinaryOperator, Expression, FunctionDefStmt, LiteralValue, Statement, UnaryOperator};
use crate::visitor::Visitor;
use crate::SourceLocation;

/// Renders a parsed program back into a lisp-like textual form.
///
/// Used by tests and the `--ast` CLI flag to confirm the parser produced the
/// tree a test expects, without comparing `Debug` output variant-by-variant.
#[derive(Default)]
pub struct AstPrinter {
    indent: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter { indent: 0 }
    }

    pub fn print_program(&mut self, program: &crate::ast::Program) -> String {
        program
            .statements
            .iter()
            .map(|s| self.visit_statement(s))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn pad(&self) -> String {
        "  ".repeat(self.indent)
    }

    fn block(&mut self, stmts: &[Statement]) -> String {
        self.indent += 1;
        let body = stmts
            .iter()
            .map(|s| format!("{}{}", self.pad(), self.visit_statement(s)))
            .collect::<Vec<_>>()
            .join("\n");
        self.indent -= 1;
        body
    }

    fn args(&mut self, args: &[Expression]) -> String {
        args.iter()
            .map(|a| self.visit_expression(a))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Visitor<String> for AstPrinter {
    fn visit_var_decl(&mut self, name: &str, value: &Expression, _loc: SourceLocation) -> String {
        format!("(let {} {})", name, self.visit_expression(value))
    }

    fn visit_assignment(&mut self, name: &str, value: &Expression, _loc: SourceLocation) -> String {
        format!("(set {} {})", name, self.visit_expression(value))
    }

    fn visit_property_assignment(
        &mut self,
        target: &Expression,
        name: &str,
        value: &Expression,
        _loc: SourceLocation,
    ) -> String {
        format!(
            "(set-prop {} {} {})",
            self.visit_expression(target),
            name,
            self.visit_expression(value)
        )
    }

    fn visit_index_assignment(
        &mut self,
        target: &Expression,
        index: &Expression,
        value: &Expression,
        _loc: SourceLocation,
    ) -> String {
        format!(
            "(set-index {} {} {})",
            self.visit_expression(target),
            self.visit_expression(index),
            self.visit_expression(value)
        )
    }

    fn visit_expression_statement(&mut self, expr: &Expression, _loc: SourceLocation) -> String {
        self.visit_expression(expr)
    }

    fn visit_block(&mut self, stmts: &[Statement], _loc: SourceLocation) -> String {
        format!("(block\n{})", self.block(stmts))
    }

    fn visit_if(
        &mut self,
        cond: &Expression,
        then_branch: &[Statement],
        elifs: &[(Expression, Vec<Statement>)],
        else_branch: Option<&[Statement]>,
        _loc: SourceLocation,
    ) -> String {
        let mut out = format!(
            "(if {}\n{}",
            self.visit_expression(cond),
            self.block(then_branch)
        );
        for (econd, ebody) in elifs {
            out.push_str(&format!(
                "\n{}(elif {}\n{})",
                self.pad(),
                self.visit_expression(econd),
                self.block(ebody)
            ));
        }
        if let Some(body) = else_branch {
            out.push_str(&format!("\n{}(else\n{})", self.pad(), self.block(body)));
        }
        out.push(')');
        out
    }

    fn visit_while(&mut self, cond: &Expression, body: &[Statement], _loc: SourceLocation) -> String {
        format!("(while {}\n{})", self.visit_expression(cond), self.block(body))
    }

    fn visit_for_each(
        &mut self,
        var: &str,
        iterable: &Expression,
        body: &[Statement],
        _loc: SourceLocation,
    ) -> String {
        format!(
            "(for {} in {}\n{})",
            var,
            self.visit_expression(iterable),
            self.block(body)
        )
    }

    fn visit_break(&mut self, _loc: SourceLocation) -> String {
        "(break)".to_string()
    }

    fn visit_continue(&mut self, _loc: SourceLocation) -> String {
        "(continue)".to_string()
    }

    fn visit_function_def(&mut self, def: &FunctionDefStmt) -> String {
        format!(
            "(defn {} ({})\n{})",
            def.name,
            def.params.join(" "),
            self.block(&def.body)
        )
    }

    fn visit_return(&mut self, value: Option<&Expression>, _loc: SourceLocation) -> String {
        match value {
            Some(v) => format!("(return {})", self.visit_expression(v)),
            None => "(return)".to_string(),
        }
    }

    fn visit_class_def(
        &mut self,
        name: &str,
        parent: Option<&str>,
        methods: &[FunctionDefStmt],
        _loc: SourceLocation,
    ) -> String {
        let parent_part = parent.map(|p| format!(" extends {p}")).unwrap_or_default();
        self.indent += 1;
        let body = methods
            .iter()
            .map(|m| format!("{}{}", self.pad(), self.visit_function_def(m)))
            .collect::<Vec<_>>()
            .join("\n");
        self.indent -= 1;
        format!("(class {name}{parent_part}\n{body})")
    }

    fn visit_try(
        &mut self,
        body: &[Statement],
        catch_var: &str,
        catch_body: &[Statement],
        finally: Option<&[Statement]>,
        _loc: SourceLocation,
    ) -> String {
        let mut out = format!(
            "(try\n{}\n{}(catch {}\n{})",
            self.block(body),
            self.pad(),
            catch_var,
            self.block(catch_body)
        );
        if let Some(f) = finally {
            out.push_str(&format!("\n{}(finally\n{})", self.pad(), self.block(f)));
        }
        out.push(')');
        out
    }

    fn visit_throw(&mut self, value: &Expression, _loc: SourceLocation) -> String {
        format!("(throw {})", self.visit_expression(value))
    }

    fn visit_print(&mut self, args: &[Expression], newline: bool, _loc: SourceLocation) -> String {
        let name = if newline { "likho" } else { "likho_online" };
        format!("({name} {})", self.args(args))
    }

    fn visit_input(&mut self, name: &str, prompt: Option<&str>, _loc: SourceLocation) -> String {
        match prompt {
            Some(p) => format!("(poocho {name} \"{p}\")"),
            None => format!("(poocho {name})"),
        }
    }

    fn visit_import(&mut self, name: &str, _loc: SourceLocation) -> String {
        format!("(import {name})")
    }

    fn visit_literal(&mut self, value: &LiteralValue, _loc: SourceLocation) -> String {
        match value {
            LiteralValue::Int(i) => i.to_string(),
            LiteralValue::Float(f) => f.to_string(),
            LiteralValue::String(s) => format!("\"{s}\""),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::None => "none".to_string(),
        }
    }

    fn visit_list(&mut self, items: &[Expression], _loc: SourceLocation) -> String {
        format!("[{}]", self.args(items))
    }

    fn visit_dict(&mut self, entries: &[(Expression, Expression)], _loc: SourceLocation) -> String {
        let body = entries
            .iter()
            .map(|(k, v)| format!("({} . {})", self.visit_expression(k), self.visit_expression(v)))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{{{body}}}")
    }

    fn visit_variable(&mut self, name: &str, _loc: SourceLocation) -> String {
        name.to_string()
    }

    fn visit_binary_op(
        &mut self,
        op: BinaryOperator,
        left: &Expression,
        right: &Expression,
        _loc: SourceLocation,
    ) -> String {
        format!(
            "({} {} {})",
            op,
            self.visit_expression(left),
            self.visit_expression(right)
        )
    }

    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &Expression, _loc: SourceLocation) -> String {
        format!("({} {})", op, self.visit_expression(operand))
    }

    fn visit_parenthesized(&mut self, inner: &Expression, _loc: SourceLocation) -> String {
        self.visit_expression(inner)
    }

    fn visit_function_call(
        &mut self,
        callee: &Expression,
        args: &[Expression],
        _loc: SourceLocation,
    ) -> String {
        format!("(call {} {})", self.visit_expression(callee), self.args(args))
    }

    fn visit_lambda(&mut self, params: &[String], body: &Expression, _loc: SourceLocation) -> String {
        format!("(lambda ({}) {})", params.join(" "), self.visit_expression(body))
    }

    fn visit_new_object(&mut self, class_name: &str, args: &[Expression], _loc: SourceLocation) -> String {
        format!("(new {} {})", class_name, self.args(args))
    }

    fn visit_method_call(
        &mut self,
        target: &Expression,
        name: &str,
        args: &[Expression],
        _loc: SourceLocation,
    ) -> String {
        format!(
            "(method-call {} {} {})",
            self.visit_expression(target),
            name,
            self.args(args)
        )
    }

    fn visit_property_access(&mut self, target: &Expression, name: &str, _loc: SourceLocation) -> String {
        format!("(prop {} {})", self.visit_expression(target), name)
    }

    fn visit_index(&mut self, target: &Expression, index: &Expression, _loc: SourceLocation) -> String {
        format!(
            "(index {} {})",
            self.visit_expression(target),
            self.visit_expression(index)
        )
    }

    fn visit_this(&mut self, _loc: SourceLocation) -> String {
        "this".to_string()
    }

    fn visit_super(&mut self, args: &[Expression], _loc: SourceLocation) -> String {
        format!("(super {})", self.args(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Program;

    #[test]
    fn prints_var_decl_and_arithmetic() {
        let loc = SourceLocation::new(1, 1);
        let program = Program {
            statements: vec![Statement::VarDecl(
                "x".to_string(),
                Expression::BinaryOp(
                    BinaryOperator::Add,
                    Box::new(Expression::Literal(LiteralValue::Int(1), loc)),
                    Box::new(Expression::Literal(LiteralValue::Int(2), loc)),
                    loc,
                ),
                loc,
            )],
        };
        let mut printer = AstPrinter::new();
        assert_eq!(printer.print_program(&program), "(let x (+ 1 2))");
    }

    #[test]
    fn prints_nested_call_on_call_result() {
        let loc = SourceLocation::new(1, 1);
        let callee = Expression::FunctionCall(
            Box::new(Expression::Variable("make_adder".to_string(), loc)),
            vec![Expression::Literal(LiteralValue::Int(5), loc)],
            loc,
        );
        let expr = Expression::FunctionCall(
            Box::new(callee),
            vec![Expression::Literal(LiteralValue::Int(3), loc)],
            loc,
        );
        let program = Program {
            statements: vec![Statement::ExpressionStmt(expr, loc)],
        };
        let mut printer = AstPrinter::new();
        assert_eq!(
            printer.print_program(&program),
            "(call (call make_adder 5) 3)"
        );
    }
}
