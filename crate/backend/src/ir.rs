//! Three-address code (3AC) generation. Diagnostic-only: the instructions
//! produced here are never executed, only dumped for inspection (`--dump-ir`).

use hindustani_ir::ast::{BinaryOperator, Expression, FunctionDefStmt, LiteralValue, Statement};
use hindustani_ir::ast::UnaryOperator;
use hindustani_ir::{Program, Visitor};

/// A single 3AC instruction. Operands are rendered operand strings: either a
/// temp (`t0`, `t1`, ...), a variable name, or a literal's textual form --
/// anything already addressable needs no further instruction to produce it.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Assign(String, String),
    Copy(String, String),
    BinOp(String, BinaryOperator, String, String),
    UnaryOp(String, UnaryOperator, String),
    Label(String),
    Jump(String),
    CondJump(String, String, String),
    FuncLabel(String),
    Param(String),
    Call(String, String, usize),
    Return(Option<String>),
    NewObj(String, String),
    FieldLoad(String, String, String),
    FieldStore(String, String, String),
    IndexLoad(String, String, String),
    IndexStore(String, String, String),
    Print(Vec<String>, bool),
    Input(String, Option<String>),
    Throw(String),
    TryBegin(String),
    TryEnd,
    CatchBegin(String),
    ClassDef(String, Option<String>),
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Assign(dest, lit) => write!(f, "{dest} = {lit}"),
            Instruction::Copy(dest, src) => write!(f, "{dest} = {src}"),
            Instruction::BinOp(result, op, left, right) => write!(f, "{result} = {left} {op} {right}"),
            Instruction::UnaryOp(result, op, operand) => write!(f, "{result} = {op} {operand}"),
            Instruction::Label(name) => write!(f, "{name}:"),
            Instruction::Jump(label) => write!(f, "GOTO {label}"),
            Instruction::CondJump(cond, then_lbl, else_lbl) => {
                write!(f, "IF {cond} GOTO {then_lbl} ELSE {else_lbl}")
            }
            Instruction::FuncLabel(name) => write!(f, "FUNC {name}:"),
            Instruction::Param(operand) => write!(f, "PARAM {operand}"),
            Instruction::Call(result, name, arg_count) => write!(f, "{result} = CALL {name} {arg_count}"),
            Instruction::Return(Some(value)) => write!(f, "RETURN {value}"),
            Instruction::Return(None) => write!(f, "RETURN"),
            Instruction::NewObj(result, class) => write!(f, "{result} = NEW {class}"),
            Instruction::FieldLoad(result, target, field) => write!(f, "{result} = {target}.{field}"),
            Instruction::FieldStore(target, field, value) => write!(f, "{target}.{field} = {value}"),
            Instruction::IndexLoad(result, target, index) => write!(f, "{result} = {target}[{index}]"),
            Instruction::IndexStore(target, index, value) => write!(f, "{target}[{index}] = {value}"),
            Instruction::Print(operands, true) => write!(f, "PRINT {}", operands.join(", ")),
            Instruction::Print(operands, false) => write!(f, "PRINT_INLINE {}", operands.join(", ")),
            Instruction::Input(name, Some(prompt)) => write!(f, "INPUT {name} \"{prompt}\""),
            Instruction::Input(name, None) => write!(f, "INPUT {name}"),
            Instruction::Throw(value) => write!(f, "THROW {value}"),
            Instruction::TryBegin(catch_label) => write!(f, "TRY_BEGIN {catch_label}"),
            Instruction::TryEnd => write!(f, "TRY_END"),
            Instruction::CatchBegin(var) => write!(f, "CATCH_BEGIN {var}"),
            Instruction::ClassDef(name, Some(parent)) => write!(f, "CLASS {name} extends {parent}:"),
            Instruction::ClassDef(name, None) => write!(f, "CLASS {name}:"),
        }
    }
}

/// The flat instruction listing produced by [`IRGenerator::generate`].
#[derive(Debug, Default)]
pub struct IRProgram {
    pub instructions: Vec<Instruction>,
}

impl IRProgram {
    /// One instruction per line, in the format shown in the language spec.
    pub fn dump(&self) -> String {
        self.instructions
            .iter()
            .map(Instruction::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lowers a semantically-analyzed AST into 3AC. Every expression yields an
/// operand string usable directly by the next instruction; statements yield
/// nothing.
#[derive(Default)]
pub struct IRGenerator {
    instructions: Vec<Instruction>,
    temp_counter: usize,
    label_counter: usize,
    loop_labels: Vec<(String, String)>,
}

impl IRGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(mut self, program: &Program) -> IRProgram {
        for stmt in &program.statements {
            self.visit_statement(stmt);
        }
        IRProgram {
            instructions: self.instructions,
        }
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn new_temp(&mut self) -> String {
        let t = format!("t{}", self.temp_counter);
        self.temp_counter += 1;
        t
    }

    fn new_label(&mut self, prefix: &str) -> String {
        let label = format!("{prefix}_{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    fn lower_if(
        &mut self,
        cond: &Expression,
        then_branch: &[Statement],
        elifs: &[(Expression, Vec<Statement>)],
        else_branch: Option<&[Statement]>,
    ) {
        let then_lbl = self.new_label("if_then");
        let else_lbl = self.new_label("if_else");
        let end_lbl = self.new_label("if_end");

        let cond_op = self.visit_expression(cond).unwrap();
        self.emit(Instruction::CondJump(cond_op, then_lbl.clone(), else_lbl.clone()));
        self.emit(Instruction::Label(then_lbl));
        for stmt in then_branch {
            self.visit_statement(stmt);
        }
        self.emit(Instruction::Jump(end_lbl.clone()));
        self.emit(Instruction::Label(else_lbl));
        match elifs.split_first() {
            Some(((elif_cond, elif_body), rest)) => self.lower_if(elif_cond, elif_body, rest, else_branch),
            None => {
                if let Some(body) = else_branch {
                    for stmt in body {
                        self.visit_statement(stmt);
                    }
                }
            }
        }
        self.emit(Instruction::Label(end_lbl));
    }

    fn lower_call_args(&mut self, args: &[Expression]) -> usize {
        let mut count = 0;
        for arg in args {
            let operand = self.visit_expression(arg).unwrap();
            self.emit(Instruction::Param(operand));
            count += 1;
        }
        count
    }
}

impl Visitor<Option<String>> for IRGenerator {
    fn visit_var_decl(&mut self, name: &str, value: &Expression, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let value_op = self.visit_expression(value).unwrap();
        self.emit(Instruction::Copy(name.to_string(), value_op));
        None
    }

    fn visit_assignment(&mut self, name: &str, value: &Expression, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let value_op = self.visit_expression(value).unwrap();
        self.emit(Instruction::Copy(name.to_string(), value_op));
        None
    }

    fn visit_property_assignment(
        &mut self,
        target: &Expression,
        name: &str,
        value: &Expression,
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        let target_op = self.visit_expression(target).unwrap();
        let value_op = self.visit_expression(value).unwrap();
        self.emit(Instruction::FieldStore(target_op, name.to_string(), value_op));
        None
    }

    fn visit_index_assignment(
        &mut self,
        target: &Expression,
        index: &Expression,
        value: &Expression,
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        let target_op = self.visit_expression(target).unwrap();
        let index_op = self.visit_expression(index).unwrap();
        let value_op = self.visit_expression(value).unwrap();
        self.emit(Instruction::IndexStore(target_op, index_op, value_op));
        None
    }

    fn visit_expression_statement(&mut self, expr: &Expression, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        self.visit_expression(expr);
        None
    }

    fn visit_block(&mut self, stmts: &[Statement], _loc: hindustani_ir::SourceLocation) -> Option<String> {
        for stmt in stmts {
            self.visit_statement(stmt);
        }
        None
    }

    fn visit_if(
        &mut self,
        cond: &Expression,
        then_branch: &[Statement],
        elifs: &[(Expression, Vec<Statement>)],
        else_branch: Option<&[Statement]>,
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        self.lower_if(cond, then_branch, elifs, else_branch);
        None
    }

    fn visit_while(&mut self, cond: &Expression, body: &[Statement], _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let start = self.new_label("while_start");
        let body_lbl = self.new_label("while_body");
        let end = self.new_label("while_end");

        self.emit(Instruction::Label(start.clone()));
        let cond_op = self.visit_expression(cond).unwrap();
        self.emit(Instruction::CondJump(cond_op, body_lbl.clone(), end.clone()));
        self.emit(Instruction::Label(body_lbl));
        self.loop_labels.push((start.clone(), end.clone()));
        for stmt in body {
            self.visit_statement(stmt);
        }
        self.loop_labels.pop();
        self.emit(Instruction::Jump(start));
        self.emit(Instruction::Label(end));
        None
    }

    fn visit_for_each(
        &mut self,
        var: &str,
        iterable: &Expression,
        body: &[Statement],
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        // Lowered as `index = 0; while index < length(list) { var = list[index]; body; index += 1 }`.
        let list_op = self.visit_expression(iterable).unwrap();
        let index = self.new_temp();
        self.emit(Instruction::Assign(index.clone(), "0".to_string()));

        let start = self.new_label("foreach_start");
        let body_lbl = self.new_label("foreach_body");
        let end = self.new_label("foreach_end");

        self.emit(Instruction::Label(start.clone()));
        self.emit(Instruction::Param(list_op.clone()));
        let len_temp = self.new_temp();
        self.emit(Instruction::Call(len_temp.clone(), "length".to_string(), 1));
        let cond_temp = self.new_temp();
        self.emit(Instruction::BinOp(
            cond_temp.clone(),
            BinaryOperator::LessThan,
            index.clone(),
            len_temp,
        ));
        self.emit(Instruction::CondJump(cond_temp, body_lbl.clone(), end.clone()));
        self.emit(Instruction::Label(body_lbl));

        let elem_temp = self.new_temp();
        self.emit(Instruction::IndexLoad(elem_temp.clone(), list_op.clone(), index.clone()));
        self.emit(Instruction::Copy(var.to_string(), elem_temp));

        self.loop_labels.push((start.clone(), end.clone()));
        for stmt in body {
            self.visit_statement(stmt);
        }
        self.loop_labels.pop();

        let one_temp = self.new_temp();
        self.emit(Instruction::Assign(one_temp.clone(), "1".to_string()));
        let next_index = self.new_temp();
        self.emit(Instruction::BinOp(next_index.clone(), BinaryOperator::Add, index.clone(), one_temp));
        self.emit(Instruction::Copy(index, next_index));
        self.emit(Instruction::Jump(start));
        self.emit(Instruction::Label(end));
        None
    }

    fn visit_break(&mut self, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        if let Some((_, end)) = self.loop_labels.last() {
            self.emit(Instruction::Jump(end.clone()));
        }
        None
    }

    fn visit_continue(&mut self, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        if let Some((start, _)) = self.loop_labels.last() {
            self.emit(Instruction::Jump(start.clone()));
        }
        None
    }

    fn visit_function_def(&mut self, def: &FunctionDefStmt) -> Option<String> {
        self.emit(Instruction::FuncLabel(def.name.clone()));
        for stmt in &def.body {
            self.visit_statement(stmt);
        }
        self.emit(Instruction::Return(None));
        None
    }

    fn visit_return(&mut self, value: Option<&Expression>, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let value_op = value.map(|v| self.visit_expression(v).unwrap());
        self.emit(Instruction::Return(value_op));
        None
    }

    fn visit_class_def(
        &mut self,
        name: &str,
        parent: Option<&str>,
        methods: &[FunctionDefStmt],
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        self.emit(Instruction::ClassDef(name.to_string(), parent.map(str::to_string)));
        for method in methods {
            self.visit_function_def(method);
        }
        None
    }

    fn visit_try(
        &mut self,
        body: &[Statement],
        catch_var: &str,
        catch_body: &[Statement],
        finally: Option<&[Statement]>,
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        let catch_lbl = self.new_label("catch");
        let end_lbl = self.new_label("try_end");

        self.emit(Instruction::TryBegin(catch_lbl.clone()));
        for stmt in body {
            self.visit_statement(stmt);
        }
        self.emit(Instruction::TryEnd);
        self.emit(Instruction::Jump(end_lbl.clone()));
        self.emit(Instruction::Label(catch_lbl));
        self.emit(Instruction::CatchBegin(catch_var.to_string()));
        for stmt in catch_body {
            self.visit_statement(stmt);
        }
        self.emit(Instruction::Label(end_lbl));
        if let Some(finally_body) = finally {
            for stmt in finally_body {
                self.visit_statement(stmt);
            }
        }
        None
    }

    fn visit_throw(&mut self, value: &Expression, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let value_op = self.visit_expression(value).unwrap();
        self.emit(Instruction::Throw(value_op));
        None
    }

    fn visit_print(&mut self, args: &[Expression], newline: bool, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let operands: Vec<String> = args.iter().map(|a| self.visit_expression(a).unwrap()).collect();
        self.emit(Instruction::Print(operands, newline));
        None
    }

    fn visit_input(&mut self, name: &str, prompt: Option<&str>, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        self.emit(Instruction::Input(name.to_string(), prompt.map(str::to_string)));
        None
    }

    fn visit_import(&mut self, _name: &str, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        None
    }

    fn visit_literal(&mut self, value: &LiteralValue, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let literal = match value {
            LiteralValue::Int(i) => i.to_string(),
            LiteralValue::Float(f) => f.to_string(),
            LiteralValue::String(s) => format!("\"{s}\""),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::None => "khaali".to_string(),
        };
        let temp = self.new_temp();
        self.emit(Instruction::Assign(temp.clone(), literal));
        Some(temp)
    }

    fn visit_list(&mut self, items: &[Expression], _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let count = self.lower_call_args(items);
        let result = self.new_temp();
        self.emit(Instruction::Call(result.clone(), "__list__".to_string(), count));
        Some(result)
    }

    fn visit_dict(&mut self, entries: &[(Expression, Expression)], _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let mut count = 0;
        for (key, value) in entries {
            let key_op = self.visit_expression(key).unwrap();
            self.emit(Instruction::Param(key_op));
            let value_op = self.visit_expression(value).unwrap();
            self.emit(Instruction::Param(value_op));
            count += 2;
        }
        let result = self.new_temp();
        self.emit(Instruction::Call(result.clone(), "__dict__".to_string(), count));
        Some(result)
    }

    fn visit_variable(&mut self, name: &str, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        Some(name.to_string())
    }

    fn visit_binary_op(
        &mut self,
        op: BinaryOperator,
        left: &Expression,
        right: &Expression,
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        let left_op = self.visit_expression(left).unwrap();
        let right_op = self.visit_expression(right).unwrap();
        let result = self.new_temp();
        self.emit(Instruction::BinOp(result.clone(), op, left_op, right_op));
        Some(result)
    }

    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &Expression, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let operand_op = self.visit_expression(operand).unwrap();
        let result = self.new_temp();
        self.emit(Instruction::UnaryOp(result.clone(), op, operand_op));
        Some(result)
    }

    fn visit_parenthesized(&mut self, inner: &Expression, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        self.visit_expression(inner)
    }

    fn visit_function_call(
        &mut self,
        callee: &Expression,
        args: &[Expression],
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        let name = match callee {
            Expression::Variable(n, _) => n.clone(),
            other => self.visit_expression(other).unwrap(),
        };
        let count = self.lower_call_args(args);
        let result = self.new_temp();
        self.emit(Instruction::Call(result.clone(), name, count));
        Some(result)
    }

    fn visit_lambda(&mut self, _params: &[String], body: &Expression, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let label = self.new_label("lambda");
        self.emit(Instruction::FuncLabel(label.clone()));
        let body_op = self.visit_expression(body).unwrap();
        self.emit(Instruction::Return(Some(body_op)));
        let result = self.new_temp();
        self.emit(Instruction::Assign(result.clone(), label));
        Some(result)
    }

    fn visit_new_object(&mut self, class_name: &str, args: &[Expression], _loc: hindustani_ir::SourceLocation) -> Option<String> {
        self.lower_call_args(args);
        let result = self.new_temp();
        self.emit(Instruction::NewObj(result.clone(), class_name.to_string()));
        Some(result)
    }

    fn visit_method_call(
        &mut self,
        target: &Expression,
        name: &str,
        args: &[Expression],
        _loc: hindustani_ir::SourceLocation,
    ) -> Option<String> {
        let target_op = self.visit_expression(target).unwrap();
        self.emit(Instruction::Param(target_op));
        let arg_count = self.lower_call_args(args);
        let result = self.new_temp();
        self.emit(Instruction::Call(result.clone(), name.to_string(), arg_count + 1));
        Some(result)
    }

    fn visit_property_access(&mut self, target: &Expression, name: &str, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let target_op = self.visit_expression(target).unwrap();
        let result = self.new_temp();
        self.emit(Instruction::FieldLoad(result.clone(), target_op, name.to_string()));
        Some(result)
    }

    fn visit_index(&mut self, target: &Expression, index: &Expression, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let target_op = self.visit_expression(target).unwrap();
        let index_op = self.visit_expression(index).unwrap();
        let result = self.new_temp();
        self.emit(Instruction::IndexLoad(result.clone(), target_op, index_op));
        Some(result)
    }

    fn visit_this(&mut self, _loc: hindustani_ir::SourceLocation) -> Option<String> {
        Some("yeh".to_string())
    }

    fn visit_super(&mut self, args: &[Expression], _loc: hindustani_ir::SourceLocation) -> Option<String> {
        let arg_count = self.lower_call_args(args);
        let result = self.new_temp();
        self.emit(Instruction::Call(result.clone(), "upar".to_string(), arg_count));
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hindustani_frontend::{parse, tokenize};

    fn generate(source: &str) -> IRProgram {
        let tokens = tokenize(source).expect("lex");
        let program = parse(&tokens).expect("parse");
        IRGenerator::new().generate(&program)
    }

    #[test]
    fn arithmetic_assignment_lowers_to_temps() {
        let ir = generate("maan x = 3 + 4");
        assert_eq!(ir.dump(), "t0 = 3\nt1 = 4\nt2 = t0 + t1\nx = t2");
    }

    #[test]
    fn while_loop_lowers_with_start_body_end_labels() {
        let ir = generate("maan i = 0\njab_tak i < 10 { i = i + 1 }");
        let dump = ir.dump();
        assert!(dump.contains("while_start_0:"));
        assert!(dump.contains("IF t2 GOTO while_body_1 ELSE while_end_2"));
        assert!(dump.contains("GOTO while_start_0"));
    }

    #[test]
    fn break_and_continue_jump_to_loop_labels() {
        let ir = generate("jab_tak sach { ruk }");
        let dump = ir.dump();
        assert!(dump.contains("GOTO while_end_2"));
    }

    #[test]
    fn function_call_lowers_params_before_call() {
        let ir = generate("kaam add(a, b) { wapas a + b }\nadd(1, 2)");
        let dump = ir.dump();
        assert!(dump.contains("FUNC add:"));
        assert!(dump.contains("PARAM t"));
        assert!(dump.contains("= CALL add 2"));
    }

    #[test]
    fn if_elif_else_chains_nest_at_lowering_time() {
        let ir = generate("agar sach { likho(1) } warna_agar jhoot { likho(2) } warna { likho(3) }");
        let dump = ir.dump();
        assert!(dump.contains("if_then_0:"));
        assert!(dump.contains("if_then_3:"));
    }
}
