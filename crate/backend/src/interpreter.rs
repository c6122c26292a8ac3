use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write as _;
use std::rc::Rc;

use hindustani_error::{
    AttributeError, DivisionByZeroError, IndexError, LocalizedMessage, NameError, RecursionError,
    RuntimeError, TypeError, UserException,
};
use hindustani_ir::ast::{BinaryOperator, LiteralValue, UnaryOperator};
use hindustani_ir::{Expression, FunctionDefStmt, Program, SourceLocation, Statement, Visitor};
use indexmap::IndexMap;

use crate::builtins;
use crate::environment::Environment;
use crate::value::{
    ArithmeticOps, ClassValue, ComparisonOps, FunctionBody, FunctionValue, InstanceValue,
    Value,
};

/// Caps call-stack depth so runaway recursion surfaces as a catchable
/// `RecursionError` instead of a real stack overflow.
pub const MAX_RECURSION_DEPTH: usize = 1000;

/// Non-local control flow threaded back up through `Result::Err` by every
/// `visit_*` method. Only `Throw` (from `uchalo`) is catchable by a user
/// `koshish`/`pakad`; `Fatal` carries an internal `RuntimeError` (type
/// errors, undefined names, division by zero, ...) which halts the program
/// the same way whether or not it occurred inside a `koshish` block (spec
/// §4.5, §7: "no attempt to continue past a runtime error unless caught").
#[derive(Debug, Clone)]
pub enum Signal {
    Break,
    Continue,
    Return(Value),
    Throw(Value, SourceLocation),
    Fatal(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Fatal(err)
    }
}

type EvalResult = Result<Value, Signal>;

/// A tree-walking evaluator over the AST, implemented via the shared
/// `Visitor` trait (mirroring the semantic analyzer's use of the same
/// trait with a different `T`). Every `visit_*` returns `EvalResult` so
/// `break`/`continue`/`return`/`throw` all unwind through `?` uniformly.
pub struct Interpreter {
    env: Environment,
    call_depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            env: Environment::root(),
            call_depth: 0,
        }
    }

    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for stmt in &program.statements {
            match self.visit_statement(stmt) {
                Ok(_) => {}
                Err(Signal::Throw(value, location)) => {
                    return Err(RuntimeError::from(UserException {
                        value: value.to_string(),
                        location,
                    }));
                }
                Err(Signal::Fatal(err)) => return Err(err),
                Err(Signal::Return(_)) => {
                    return Err(self.misplaced_signal("wapas", stmt.location()));
                }
                Err(Signal::Break) => return Err(self.misplaced_signal("ruk", stmt.location())),
                Err(Signal::Continue) => return Err(self.misplaced_signal("age_badho", stmt.location())),
            }
        }
        Ok(())
    }

    fn misplaced_signal(&self, keyword: &str, location: SourceLocation) -> RuntimeError {
        RuntimeError::from(hindustani_error::TypeError {
            message: LocalizedMessage::new(
                format!("'{keyword}' used outside of its enclosing construct"),
                format!("'{keyword}' उसके परिवेष्टित संरचना के बाहर प्रयोग किया गया"),
            ),
            location,
        })
    }

    fn name_error(&self, name: &str, location: SourceLocation) -> Signal {
        let visible = self.env.visible_names();
        let suggestions = hindustani_shared::suggest_similar(name, visible.iter().map(String::as_str), 3);
        let hint = if suggestions.is_empty() {
            String::new()
        } else {
            format!(" (did you mean: {})", suggestions.join(", "))
        };
        Signal::from(RuntimeError::from(NameError {
            message: LocalizedMessage::new(
                format!("undefined name '{name}'{hint}"),
                format!("अपरिभाषित नाम '{name}'{hint}"),
            ),
            location,
        }))
    }

    fn type_error(&self, message: impl Into<String>, message_hi: impl Into<String>, location: SourceLocation) -> Signal {
        Signal::from(RuntimeError::from(TypeError {
            message: LocalizedMessage::new(message, message_hi),
            location,
        }))
    }

    fn attribute_error(&self, message: impl Into<String>, location: SourceLocation) -> Signal {
        let message = message.into();
        Signal::from(RuntimeError::from(AttributeError {
            message: LocalizedMessage::new(message.clone(), message),
            location,
        }))
    }

    fn index_error(&self, message: impl Into<String>, location: SourceLocation) -> Signal {
        let message = message.into();
        Signal::from(RuntimeError::from(IndexError {
            message: LocalizedMessage::new(message.clone(), message),
            location,
        }))
    }

    fn division_error(&self, location: SourceLocation) -> Signal {
        Signal::from(RuntimeError::from(DivisionByZeroError {
            message: LocalizedMessage::new("division by zero", "शून्य से विभाजन"),
            location,
        }))
    }

    fn begin_scope(&mut self) -> Environment {
        let outer = self.env.clone();
        self.env = Environment::child(&outer);
        outer
    }

    fn end_scope(&mut self, outer: Environment) {
        self.env = outer;
    }

    fn exec_block(&mut self, stmts: &[Statement]) -> Result<(), Signal> {
        let outer = self.begin_scope();
        let result = self.exec_statements(stmts);
        self.end_scope(outer);
        result
    }

    fn exec_statements(&mut self, stmts: &[Statement]) -> Result<(), Signal> {
        for stmt in stmts {
            self.visit_statement(stmt)?;
        }
        Ok(())
    }

    fn call_function(
        &mut self,
        func: &FunctionValue,
        args: Vec<Value>,
        this: Option<Value>,
        location: SourceLocation,
    ) -> EvalResult {
        if func.params.len() != args.len() {
            return Err(self.type_error(
                format!(
                    "'{}' expects {} argument(s), found {}",
                    func.name,
                    func.params.len(),
                    args.len()
                ),
                format!("'{}' को {} तर्क चाहिए, {} मिले", func.name, func.params.len(), args.len()),
                location,
            ));
        }
        self.call_depth += 1;
        if self.call_depth > MAX_RECURSION_DEPTH {
            self.call_depth -= 1;
            return Err(Signal::from(RuntimeError::from(
                RecursionError::depth_exceeded(self.call_depth, MAX_RECURSION_DEPTH, location),
            )));
        }

        let call_env = Environment::child(&func.closure);
        if let Some(this_value) = this {
            call_env.define("yeh", this_value);
        }
        for (param, arg) in func.params.iter().zip(args.into_iter()) {
            call_env.define(param.clone(), arg);
        }

        let outer = std::mem::replace(&mut self.env, call_env);
        let result = match &func.body {
            FunctionBody::Block(stmts) => match self.exec_statements(stmts) {
                Ok(()) => Ok(Value::None),
                Err(Signal::Return(value)) => Ok(value),
                Err(other) => Err(other),
            },
            FunctionBody::Expression(expr) => self.visit_expression(expr),
        };
        self.env = outer;
        self.call_depth -= 1;
        result
    }

    fn call_value(&mut self, callee: Value, args: Vec<Value>, location: SourceLocation) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(&func, args, None, location),
            Value::Native(native) => {
                if let Some(arity) = native.arity {
                    if arity != args.len() {
                        return Err(self.type_error(
                            format!("'{}' expects {} argument(s), found {}", native.name, arity, args.len()),
                            format!("'{}' को {} तर्क चाहिए, {} मिले", native.name, arity, args.len()),
                            location,
                        ));
                    }
                }
                (native.func)(&args).map_err(|msg| self.type_error(msg.clone(), msg, location))
            }
            Value::Class(class) => self.instantiate(class, args, location),
            other => Err(self.type_error(
                format!("'{}' is not callable", other.type_name()),
                format!("'{}' कॉल करने योग्य नहीं है", other.type_name()),
                location,
            )),
        }
    }

    fn instantiate(&mut self, class: Rc<ClassValue>, args: Vec<Value>, location: SourceLocation) -> EvalResult {
        let instance = Rc::new(RefCell::new(InstanceValue {
            class: class.clone(),
            fields: RefCell::new(IndexMap::new()),
        }));
        if let Some((ctor, owner)) = class.find_method("__init__") {
            let ctor_func = self.make_function_value(&ctor, owner.method_closure.clone());
            self.call_function(&ctor_func, args, Some(Value::Instance(instance.clone())), location)?;
        }
        Ok(Value::Instance(instance))
    }

    fn make_function_value(&self, def: &Rc<FunctionDefStmt>, closure: Environment) -> FunctionValue {
        FunctionValue {
            name: def.name.clone(),
            params: def.params.clone(),
            body: FunctionBody::Block(Rc::new(clone_statements(&def.body))),
            closure,
        }
    }

    fn eval_args(&mut self, args: &[Expression]) -> Result<Vec<Value>, Signal> {
        args.iter().map(|a| self.visit_expression(a)).collect()
    }

    fn resolve_this(&self, location: SourceLocation) -> EvalResult {
        self.env
            .get("yeh")
            .ok_or_else(|| self.type_error("'yeh' used outside of a method", "'यह' विधि के बाहर प्रयोग किया गया", location))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// `FunctionDefStmt.body` is owned, but method bodies are shared across every
/// call via `Rc`; this clones the statement list once at closure-creation
/// time rather than re-parsing, since `Statement` has no `Clone` derive.
fn clone_statements(stmts: &[Statement]) -> Vec<Statement> {
    stmts.iter().map(clone_statement).collect()
}

fn clone_statement(stmt: &Statement) -> Statement {
    // AST nodes are rebuilt by structural recursion rather than deriving
    // Clone on `Statement`/`Expression`, keeping those types free of a
    // trait bound the parser and printer never need.
    match stmt {
        Statement::VarDecl(name, expr, loc) => Statement::VarDecl(name.clone(), clone_expr(expr), *loc),
        Statement::Assignment(name, expr, loc) => Statement::Assignment(name.clone(), clone_expr(expr), *loc),
        Statement::PropertyAssignment(target, name, value, loc) => {
            Statement::PropertyAssignment(clone_expr(target), name.clone(), clone_expr(value), *loc)
        }
        Statement::IndexAssignment(target, index, value, loc) => {
            Statement::IndexAssignment(clone_expr(target), clone_expr(index), clone_expr(value), *loc)
        }
        Statement::ExpressionStmt(expr, loc) => Statement::ExpressionStmt(clone_expr(expr), *loc),
        Statement::Block(stmts, loc) => Statement::Block(clone_statements(stmts), *loc),
        Statement::If(cond, then_branch, elifs, else_branch, loc) => Statement::If(
            clone_expr(cond),
            clone_statements(then_branch),
            elifs.iter().map(|(c, b)| (clone_expr(c), clone_statements(b))).collect(),
            else_branch.as_ref().map(|b| clone_statements(b)),
            *loc,
        ),
        Statement::While(cond, body, loc) => Statement::While(clone_expr(cond), clone_statements(body), *loc),
        Statement::ForEach(var, iterable, body, loc) => {
            Statement::ForEach(var.clone(), clone_expr(iterable), clone_statements(body), *loc)
        }
        Statement::Break(loc) => Statement::Break(*loc),
        Statement::Continue(loc) => Statement::Continue(*loc),
        Statement::FunctionDef(def) => Statement::FunctionDef(FunctionDefStmt {
            name: def.name.clone(),
            params: def.params.clone(),
            body: clone_statements(&def.body),
            location: def.location,
        }),
        Statement::Return(value, loc) => Statement::Return(value.as_ref().map(clone_expr), *loc),
        Statement::ClassDef(name, parent, methods, loc) => Statement::ClassDef(
            name.clone(),
            parent.clone(),
            methods
                .iter()
                .map(|m| FunctionDefStmt {
                    name: m.name.clone(),
                    params: m.params.clone(),
                    body: clone_statements(&m.body),
                    location: m.location,
                })
                .collect(),
            *loc,
        ),
        Statement::Try(body, catch_var, catch_body, finally, loc) => Statement::Try(
            clone_statements(body),
            catch_var.clone(),
            clone_statements(catch_body),
            finally.as_ref().map(|f| clone_statements(f)),
            *loc,
        ),
        Statement::Throw(expr, loc) => Statement::Throw(clone_expr(expr), *loc),
        Statement::Print(args, newline, loc) => Statement::Print(args.iter().map(clone_expr).collect(), *newline, *loc),
        Statement::Input(name, prompt, loc) => Statement::Input(name.clone(), prompt.clone(), *loc),
        Statement::Import(name, loc) => Statement::Import(name.clone(), *loc),
    }
}

fn clone_expr(expr: &Expression) -> Expression {
    match expr {
        Expression::Literal(value, loc) => Expression::Literal(clone_literal(value), *loc),
        Expression::List(items, loc) => Expression::List(items.iter().map(clone_expr).collect(), *loc),
        Expression::Dict(entries, loc) => {
            Expression::Dict(entries.iter().map(|(k, v)| (clone_expr(k), clone_expr(v))).collect(), *loc)
        }
        Expression::Variable(name, loc) => Expression::Variable(name.clone(), *loc),
        Expression::BinaryOp(op, left, right, loc) => {
            Expression::BinaryOp(*op, Box::new(clone_expr(left)), Box::new(clone_expr(right)), *loc)
        }
        Expression::UnaryOp(op, operand, loc) => Expression::UnaryOp(*op, Box::new(clone_expr(operand)), *loc),
        Expression::Parenthesized(inner, loc) => Expression::Parenthesized(Box::new(clone_expr(inner)), *loc),
        Expression::FunctionCall(callee, args, loc) => {
            Expression::FunctionCall(Box::new(clone_expr(callee)), args.iter().map(clone_expr).collect(), *loc)
        }
        Expression::Lambda(params, body, loc) => Expression::Lambda(params.clone(), Box::new(clone_expr(body)), *loc),
        Expression::NewObject(name, args, loc) => {
            Expression::NewObject(name.clone(), args.iter().map(clone_expr).collect(), *loc)
        }
        Expression::MethodCall(target, name, args, loc) => Expression::MethodCall(
            Box::new(clone_expr(target)),
            name.clone(),
            args.iter().map(clone_expr).collect(),
            *loc,
        ),
        Expression::PropertyAccess(target, name, loc) => {
            Expression::PropertyAccess(Box::new(clone_expr(target)), name.clone(), *loc)
        }
        Expression::Index(target, index, loc) => {
            Expression::Index(Box::new(clone_expr(target)), Box::new(clone_expr(index)), *loc)
        }
        Expression::This(loc) => Expression::This(*loc),
        Expression::Super(args, loc) => Expression::Super(args.iter().map(clone_expr).collect(), *loc),
    }
}

fn clone_literal(value: &LiteralValue) -> LiteralValue {
    match value {
        LiteralValue::Int(i) => LiteralValue::Int(*i),
        LiteralValue::Float(f) => LiteralValue::Float(*f),
        LiteralValue::String(s) => LiteralValue::String(s.clone()),
        LiteralValue::Boolean(b) => LiteralValue::Boolean(*b),
        LiteralValue::None => LiteralValue::None,
    }
}

impl Visitor<EvalResult> for Interpreter {
    fn visit_var_decl(&mut self, name: &str, value: &Expression, _loc: SourceLocation) -> EvalResult {
        let value = self.visit_expression(value)?;
        self.env.define(name.to_string(), value.clone());
        Ok(value)
    }

    fn visit_assignment(&mut self, name: &str, value: &Expression, loc: SourceLocation) -> EvalResult {
        let value = self.visit_expression(value)?;
        if self.env.assign(name, value.clone()) {
            Ok(value)
        } else {
            Err(self.name_error(name, loc))
        }
    }

    fn visit_property_assignment(
        &mut self,
        target: &Expression,
        name: &str,
        value: &Expression,
        loc: SourceLocation,
    ) -> EvalResult {
        let target_value = self.visit_expression(target)?;
        let value = self.visit_expression(value)?;
        match target_value {
            Value::Instance(instance) => {
                instance.borrow().fields.borrow_mut().insert(name.to_string(), value.clone());
                Ok(value)
            }
            other => Err(self.attribute_error(
                format!("cannot set property '{name}' on a {}", other.type_name()),
                loc,
            )),
        }
    }

    fn visit_index_assignment(
        &mut self,
        target: &Expression,
        index: &Expression,
        value: &Expression,
        loc: SourceLocation,
    ) -> EvalResult {
        let target_value = self.visit_expression(target)?;
        let index_value = self.visit_expression(index)?;
        let value = self.visit_expression(value)?;
        match target_value {
            Value::List(list) => {
                let idx = self.index_into_list(list.borrow().len(), &index_value, loc)?;
                list.borrow_mut()[idx] = value.clone();
                Ok(value)
            }
            Value::Dict(dict) => {
                let key = self.dict_key(&index_value, loc)?;
                dict.borrow_mut().insert(key, value.clone());
                Ok(value)
            }
            other => Err(self.type_error(
                format!("cannot index-assign into a {}", other.type_name()),
                format!("'{}' में अनुक्रमणिका निर्धारित नहीं की जा सकती", other.type_name()),
                loc,
            )),
        }
    }

    fn visit_expression_statement(&mut self, expr: &Expression, _loc: SourceLocation) -> EvalResult {
        self.visit_expression(expr)
    }

    fn visit_block(&mut self, stmts: &[Statement], _loc: SourceLocation) -> EvalResult {
        self.exec_block(stmts)?;
        Ok(Value::None)
    }

    fn visit_if(
        &mut self,
        cond: &Expression,
        then_branch: &[Statement],
        elifs: &[(Expression, Vec<Statement>)],
        else_branch: Option<&[Statement]>,
        _loc: SourceLocation,
    ) -> EvalResult {
        if self.visit_expression(cond)?.is_truthy() {
            self.exec_block(then_branch)?;
            return Ok(Value::None);
        }
        for (elif_cond, elif_body) in elifs {
            if self.visit_expression(elif_cond)?.is_truthy() {
                self.exec_block(elif_body)?;
                return Ok(Value::None);
            }
        }
        if let Some(else_body) = else_branch {
            self.exec_block(else_body)?;
        }
        Ok(Value::None)
    }

    fn visit_while(&mut self, cond: &Expression, body: &[Statement], _loc: SourceLocation) -> EvalResult {
        while self.visit_expression(cond)?.is_truthy() {
            match self.exec_block(body) {
                Ok(()) => {}
                Err(Signal::Break) => break,
                Err(Signal::Continue) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(Value::None)
    }

    fn visit_for_each(&mut self, var: &str, iterable: &Expression, body: &[Statement], loc: SourceLocation) -> EvalResult {
        let iterable_value = self.visit_expression(iterable)?;
        let items: Vec<Value> = match iterable_value {
            Value::List(list) => list.borrow().clone(),
            Value::String(s) => s.chars().map(|c| Value::String(Rc::from(c.to_string()))).collect(),
            Value::Dict(dict) => dict.borrow().keys().map(|k| Value::String(Rc::from(k.as_str()))).collect(),
            other => {
                return Err(self.type_error(
                    format!("cannot iterate over a {}", other.type_name()),
                    format!("'{}' पर पुनरावृति नहीं की जा सकती", other.type_name()),
                    loc,
                ))
            }
        };
        for item in items {
            let outer = self.begin_scope();
            self.env.define(var.to_string(), item);
            let result = self.exec_statements(body);
            self.end_scope(outer);
            match result {
                Ok(()) => {}
                Err(Signal::Break) => break,
                Err(Signal::Continue) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(Value::None)
    }

    fn visit_break(&mut self, _loc: SourceLocation) -> EvalResult {
        Err(Signal::Break)
    }

    fn visit_continue(&mut self, _loc: SourceLocation) -> EvalResult {
        Err(Signal::Continue)
    }

    fn visit_function_def(&mut self, def: &FunctionDefStmt) -> EvalResult {
        let value = Value::Function(Rc::new(FunctionValue {
            name: def.name.clone(),
            params: def.params.clone(),
            body: FunctionBody::Block(Rc::new(clone_statements(&def.body))),
            closure: self.env.clone(),
        }));
        self.env.define(def.name.clone(), value.clone());
        Ok(value)
    }

    fn visit_return(&mut self, value: Option<&Expression>, _loc: SourceLocation) -> EvalResult {
        let value = match value {
            Some(expr) => self.visit_expression(expr)?,
            None => Value::None,
        };
        Err(Signal::Return(value))
    }

    fn visit_class_def(
        &mut self,
        name: &str,
        parent: Option<&str>,
        methods: &[FunctionDefStmt],
        loc: SourceLocation,
    ) -> EvalResult {
        let parent_class = match parent {
            Some(parent_name) => match self.env.get(parent_name) {
                Some(Value::Class(class)) => Some(class),
                Some(_) => {
                    return Err(self.type_error(
                        format!("'{parent_name}' is not a class"),
                        format!("'{parent_name}' एक वर्ग नहीं है"),
                        loc,
                    ))
                }
                None => return Err(self.name_error(parent_name, loc)),
            },
            None => None,
        };

        let method_map: HashMap<String, Rc<FunctionDefStmt>> = methods
            .iter()
            .map(|m| {
                (
                    m.name.clone(),
                    Rc::new(FunctionDefStmt {
                        name: m.name.clone(),
                        params: m.params.clone(),
                        body: clone_statements(&m.body),
                        location: m.location,
                    }),
                )
            })
            .collect();

        let class = Rc::new(ClassValue {
            name: name.to_string(),
            parent: parent_class,
            methods: RefCell::new(method_map),
            method_closure: self.env.clone(),
        });
        let value = Value::Class(class);
        self.env.define(name.to_string(), value.clone());
        Ok(value)
    }

    fn visit_try(
        &mut self,
        body: &[Statement],
        catch_var: &str,
        catch_body: &[Statement],
        finally: Option<&[Statement]>,
        _loc: SourceLocation,
    ) -> EvalResult {
        let result = self.exec_block(body);
        let outcome = match result {
            Ok(()) => Ok(Value::None),
            Err(Signal::Throw(value, _)) => {
                let outer = self.begin_scope();
                self.env.define(catch_var.to_string(), value);
                let caught = self.exec_statements(catch_body);
                self.end_scope(outer);
                caught.map(|()| Value::None)
            }
            Err(other) => Err(other),
        };
        if let Some(finally_body) = finally {
            self.exec_block(finally_body)?;
        }
        outcome
    }

    fn visit_throw(&mut self, value: &Expression, loc: SourceLocation) -> EvalResult {
        let value = self.visit_expression(value)?;
        Err(Signal::Throw(value, loc))
    }

    fn visit_print(&mut self, args: &[Expression], newline: bool, _loc: SourceLocation) -> EvalResult {
        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            parts.push(self.visit_expression(arg)?.to_string());
        }
        let text = parts.join(" ");
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if newline {
            let _ = writeln!(handle, "{text}");
        } else {
            let _ = write!(handle, "{text}");
            let _ = handle.flush();
        }
        Ok(Value::None)
    }

    fn visit_input(&mut self, name: &str, prompt: Option<&str>, _loc: SourceLocation) -> EvalResult {
        if let Some(prompt) = prompt {
            print!("{prompt}");
            let _ = std::io::stdout().flush();
        }
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let value = Value::String(Rc::from(line.trim_end_matches(['\n', '\r'])));
        self.env.define(name.to_string(), value.clone());
        Ok(value)
    }

    fn visit_import(&mut self, _name: &str, _loc: SourceLocation) -> EvalResult {
        Ok(Value::None)
    }

    fn visit_literal(&mut self, value: &LiteralValue, _loc: SourceLocation) -> EvalResult {
        Ok(match value {
            LiteralValue::Int(i) => Value::Int(*i),
            LiteralValue::Float(f) => Value::Float(*f),
            LiteralValue::String(s) => Value::String(Rc::from(s.as_str())),
            LiteralValue::Boolean(b) => Value::Bool(*b),
            LiteralValue::None => Value::None,
        })
    }

    fn visit_list(&mut self, items: &[Expression], _loc: SourceLocation) -> EvalResult {
        let values = self.eval_args(items)?;
        Ok(Value::List(Rc::new(RefCell::new(values))))
    }

    fn visit_dict(&mut self, entries: &[(Expression, Expression)], loc: SourceLocation) -> EvalResult {
        let mut map = IndexMap::new();
        for (key_expr, value_expr) in entries {
            let key_value = self.visit_expression(key_expr)?;
            let key = self.dict_key(&key_value, loc)?;
            let value = self.visit_expression(value_expr)?;
            map.insert(key, value);
        }
        Ok(Value::Dict(Rc::new(RefCell::new(map))))
    }

    fn visit_variable(&mut self, name: &str, loc: SourceLocation) -> EvalResult {
        self.env.get(name).ok_or_else(|| self.name_error(name, loc))
    }

    fn visit_binary_op(&mut self, op: BinaryOperator, left: &Expression, right: &Expression, loc: SourceLocation) -> EvalResult {
        if matches!(op, BinaryOperator::And) {
            let left = self.visit_expression(left)?;
            return if !left.is_truthy() { Ok(left) } else { self.visit_expression(right) };
        }
        if matches!(op, BinaryOperator::Or) {
            let left = self.visit_expression(left)?;
            return if left.is_truthy() { Ok(left) } else { self.visit_expression(right) };
        }

        let left = self.visit_expression(left)?;
        let right = self.visit_expression(right)?;
        let is_division = matches!(op, BinaryOperator::Divide | BinaryOperator::Modulo);
        let result = match op {
            BinaryOperator::Add => left.add(&right),
            BinaryOperator::Subtract => left.subtract(&right),
            BinaryOperator::Multiply => left.multiply(&right),
            BinaryOperator::Divide => left.divide(&right),
            BinaryOperator::Modulo => left.modulo(&right),
            BinaryOperator::Equal => return Ok(Value::Bool(left.value_eq(&right))),
            BinaryOperator::NotEqual => return Ok(Value::Bool(!left.value_eq(&right))),
            BinaryOperator::GreaterThan => return self.compare_to_bool(&left, &right, loc, |o| o.is_gt()),
            BinaryOperator::LessThan => return self.compare_to_bool(&left, &right, loc, |o| o.is_lt()),
            BinaryOperator::GreaterThanOrEqual => return self.compare_to_bool(&left, &right, loc, |o| o.is_ge()),
            BinaryOperator::LessThanOrEqual => return self.compare_to_bool(&left, &right, loc, |o| o.is_le()),
            BinaryOperator::And | BinaryOperator::Or => unreachable!("handled above"),
        };
        result.map_err(|msg| {
            if is_division && msg.contains("division by zero") {
                self.division_error(loc)
            } else {
                self.type_error(msg.clone(), msg, loc)
            }
        })
    }

    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &Expression, loc: SourceLocation) -> EvalResult {
        let operand = self.visit_expression(operand)?;
        match op {
            UnaryOperator::Negate => operand.negate().map_err(|msg| self.type_error(msg.clone(), msg, loc)),
            UnaryOperator::Not => Ok(Value::Bool(!operand.is_truthy())),
        }
    }

    fn visit_parenthesized(&mut self, inner: &Expression, _loc: SourceLocation) -> EvalResult {
        self.visit_expression(inner)
    }

    fn visit_function_call(&mut self, callee: &Expression, args: &[Expression], loc: SourceLocation) -> EvalResult {
        if let Expression::Variable(name, _) = callee {
            if self.env.get(name).is_none() {
                if let Some((func, arity)) = builtins::lookup(name) {
                    let values = self.eval_args(args)?;
                    if let Some(arity) = arity {
                        if arity != values.len() {
                            return Err(self.type_error(
                                format!("'{name}' expects {arity} argument(s), found {}", values.len()),
                                format!("'{name}' को {arity} तर्क चाहिए, {} मिले", values.len()),
                                loc,
                            ));
                        }
                    }
                    return func(&values).map_err(|msg| self.type_error(msg.clone(), msg, loc));
                }
            }
        }
        let callee_value = self.visit_expression(callee)?;
        let args = self.eval_args(args)?;
        self.call_value(callee_value, args, loc)
    }

    fn visit_lambda(&mut self, params: &[String], body: &Expression, _loc: SourceLocation) -> EvalResult {
        Ok(Value::Function(Rc::new(FunctionValue {
            name: "lambda".to_string(),
            params: params.to_vec(),
            body: FunctionBody::Expression(Rc::new(clone_expr(body))),
            closure: self.env.clone(),
        })))
    }

    fn visit_new_object(&mut self, class_name: &str, args: &[Expression], loc: SourceLocation) -> EvalResult {
        let class = match self.env.get(class_name) {
            Some(Value::Class(class)) => class,
            Some(_) => {
                return Err(self.type_error(
                    format!("'{class_name}' is not a class"),
                    format!("'{class_name}' एक वर्ग नहीं है"),
                    loc,
                ))
            }
            None => return Err(self.name_error(class_name, loc)),
        };
        let args = self.eval_args(args)?;
        self.instantiate(class, args, loc)
    }

    fn visit_method_call(&mut self, target: &Expression, name: &str, args: &[Expression], loc: SourceLocation) -> EvalResult {
        let target_value = self.visit_expression(target)?;
        let args = self.eval_args(args)?;
        match &target_value {
            Value::Instance(instance) => {
                let class = instance.borrow().class.clone();
                let (method, owner) = class
                    .find_method(name)
                    .ok_or_else(|| self.attribute_error(format!("'{}' has no method '{name}'", class.name), loc))?;
                let func = self.make_function_value(&method, owner.method_closure.clone());
                self.call_function(&func, args, Some(target_value.clone()), loc)
            }
            other => Err(self.attribute_error(format!("'{}' has no method '{name}'", other.type_name()), loc)),
        }
    }

    fn visit_property_access(&mut self, target: &Expression, name: &str, loc: SourceLocation) -> EvalResult {
        let target_value = self.visit_expression(target)?;
        match &target_value {
            Value::Instance(instance) => {
                if let Some(value) = instance.borrow().fields.borrow().get(name) {
                    return Ok(value.clone());
                }
                let class = instance.borrow().class.clone();
                if let Some((method, owner)) = class.find_method(name) {
                    let func = self.make_function_value(&method, owner.method_closure.clone());
                    return Ok(Value::Function(Rc::new(FunctionValue {
                        name: func.name,
                        params: func.params,
                        body: func.body,
                        closure: {
                            let bound = Environment::child(&func.closure);
                            bound.define("yeh", target_value.clone());
                            bound
                        },
                    })));
                }
                Err(self.attribute_error(format!("'{}' has no property '{name}'", class.name), loc))
            }
            other => Err(self.attribute_error(format!("'{}' has no property '{name}'", other.type_name()), loc)),
        }
    }

    fn visit_index(&mut self, target: &Expression, index: &Expression, loc: SourceLocation) -> EvalResult {
        let target_value = self.visit_expression(target)?;
        let index_value = self.visit_expression(index)?;
        match &target_value {
            Value::List(list) => {
                let idx = self.index_into_list(list.borrow().len(), &index_value, loc)?;
                Ok(list.borrow()[idx].clone())
            }
            Value::Dict(dict) => {
                let key = self.dict_key(&index_value, loc)?;
                dict.borrow()
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| self.index_error(format!("key '{key}' not found"), loc))
            }
            Value::String(s) => {
                let idx = self.index_into_list(s.chars().count(), &index_value, loc)?;
                Ok(Value::String(Rc::from(s.chars().nth(idx).unwrap().to_string())))
            }
            other => Err(self.type_error(
                format!("cannot index a {}", other.type_name()),
                format!("'{}' में अनुक्रमित नहीं किया जा सकता", other.type_name()),
                loc,
            )),
        }
    }

    fn visit_this(&mut self, loc: SourceLocation) -> EvalResult {
        self.resolve_this(loc)
    }

    fn visit_super(&mut self, args: &[Expression], loc: SourceLocation) -> EvalResult {
        let this = self.resolve_this(loc)?;
        let instance = match &this {
            Value::Instance(instance) => instance.clone(),
            _ => return Err(self.type_error("'upar' used outside of a method", "'ऊपर' विधि के बाहर प्रयोग किया गया", loc)),
        };
        let class = instance.borrow().class.clone();
        let parent = class
            .parent
            .clone()
            .ok_or_else(|| self.type_error(format!("'{}' has no parent class", class.name), format!("'{}' का कोई मूल वर्ग नहीं है", class.name), loc))?;
        let (ctor, owner) = parent
            .find_method("__init__")
            .ok_or_else(|| self.attribute_error(format!("'{}' has no constructor", parent.name), loc))?;
        let func = self.make_function_value(&ctor, owner.method_closure.clone());
        let args = self.eval_args(args)?;
        self.call_function(&func, args, Some(this), loc)
    }
}

impl Interpreter {
    fn compare_to_bool(
        &self,
        left: &Value,
        right: &Value,
        loc: SourceLocation,
        predicate: impl Fn(std::cmp::Ordering) -> bool,
    ) -> EvalResult {
        left.compare(right)
            .map(|ord| Value::Bool(predicate(ord)))
            .map_err(|msg| self.type_error(msg.clone(), msg, loc))
    }

    fn index_into_list(&self, len: usize, index_value: &Value, loc: SourceLocation) -> Result<usize, Signal> {
        let raw = match index_value {
            Value::Int(i) => *i,
            other => return Err(self.type_error(format!("index must be a number, found {}", other.type_name()), format!("अनुक्रमणिका एक संख्या होनी चाहिए, मिला {}", other.type_name()), loc)),
        };
        let idx = if raw < 0 { raw + len as i64 } else { raw };
        if idx < 0 || idx as usize >= len {
            return Err(self.index_error(format!("index {raw} out of bounds for length {len}"), loc));
        }
        Ok(idx as usize)
    }

    fn dict_key(&self, key_value: &Value, loc: SourceLocation) -> Result<String, Signal> {
        match key_value {
            Value::String(s) => Ok(s.to_string()),
            Value::Int(i) => Ok(i.to_string()),
            other => Err(self.type_error(
                format!("dict keys must be strings or numbers, found {}", other.type_name()),
                format!("डिक्ट कुंजी स्ट्रिंग या संख्या होनी चाहिए, मिला {}", other.type_name()),
                loc,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hindustani_frontend::{parse, tokenize};

    /// Runs on a thread with a generous stack: `MAX_RECURSION_DEPTH` call
    /// frames through the tree-walking evaluator exceed the default 8MB
    /// thread stack well before the guard trips, in debug builds especially.
    fn run_source(source: &str) -> Result<(), RuntimeError> {
        let source = source.to_string();
        std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(move || {
                let tokens = tokenize(&source).expect("lex");
                let program = parse(&tokens).expect("parse");
                let mut interpreter = Interpreter::new();
                interpreter.run(&program)
            })
            .expect("spawn interpreter thread")
            .join()
            .expect("interpreter thread panicked")
    }

    #[test]
    fn runs_arithmetic_and_variables() {
        assert!(run_source("maan x = 2 + 3 * 4\nagar x == 14 { } warna { uchalo \"wrong\" }").is_ok());
    }

    #[test]
    fn closures_capture_enclosing_locals() {
        let source = r#"
            kaam banao_counter() {
                maan count = 0
                kaam bado() {
                    count = count + 1
                    wapas count
                }
                wapas bado
            }
            maan counter = banao_counter()
            maan a = counter()
            maan b = counter()
            agar b != 2 { uchalo "closure broken" }
        "#;
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn inheritance_dispatches_through_super() {
        let source = r#"
            class Janwar {
                kaam __init__(naam) {
                    yeh.naam = naam
                }
                kaam bolo() {
                    wapas "..."
                }
            }
            class Kutta extends Janwar {
                kaam bolo() {
                    wapas "Woof"
                }
            }
            maan k = naya Kutta("Tommy")
            agar k.bolo() != "Woof" { uchalo "dispatch broken" }
        "#;
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn division_by_zero_raises_runtime_error() {
        let err = run_source("maan x = 1 / 0").unwrap_err();
        assert!(matches!(err, RuntimeError::DivisionByZero(_)));
    }

    #[test]
    fn undefined_variable_raises_name_error() {
        let err = run_source("likho(nahi_bana)").unwrap_err();
        assert!(matches!(err, RuntimeError::Name(_)));
    }

    #[test]
    fn try_catch_handles_thrown_value() {
        let source = r#"
            maan caught = jhoot
            koshish {
                uchalo "boom"
            } pakad err {
                caught = sach
            }
            agar caught != sach { uchalo "catch failed" }
        "#;
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn recursion_past_limit_is_caught() {
        let source = r#"
            kaam spiral(n) {
                wapas spiral(n + 1)
            }
            spiral(0)
        "#;
        let err = run_source(source).unwrap_err();
        assert!(matches!(err, RuntimeError::Recursion(_)));
    }
}
