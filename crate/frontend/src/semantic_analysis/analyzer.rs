use hindustani_error::{LocalizedMessage, RedefinitionError, SemanticError, UndefinedNameError};
use hindustani_ir::{
    Expression, FunctionDefStmt, LiteralValue, Program, SourceLocation, Statement, Visitor,
};
use hindustani_shared::{suggest_similar, CompilationContext, Symbol, SymbolKind};
use hindustani_types::Type;

use super::operations;

/// Runs semantic analysis over a whole program, returning the full batch of
/// errors found (spec §4.3: the walk never aborts early).
pub fn analyze(program: &Program) -> Result<(), Vec<SemanticError>> {
    let mut analyzer = SemanticAnalyzer::new();
    for stmt in &program.statements {
        analyzer.visit_statement(stmt);
    }
    if analyzer.errors.is_empty() {
        Ok(())
    } else {
        Err(analyzer.errors)
    }
}

/// Walks the AST once, resolving names against a scoped symbol table and
/// performing best-effort type inference. Every `visit_*` method records
/// errors into `self.errors` rather than returning `Result`, which is what
/// lets the walk continue past the first problem (spec §4.3/§7).
pub struct SemanticAnalyzer {
    context: CompilationContext,
    errors: Vec<SemanticError>,
    loop_depth: usize,
    function_depth: usize,
    class_depth: usize,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer {
            context: CompilationContext::new(),
            errors: Vec::new(),
            loop_depth: 0,
            function_depth: 0,
            class_depth: 0,
        }
    }

    fn undefined_name(&mut self, name: &str, location: SourceLocation) {
        let suggestions = suggest_similar(name, self.context.visible_names(), 3);
        self.errors.push(SemanticError::UndefinedName(UndefinedNameError {
            name: name.to_string(),
            message: LocalizedMessage::new(
                format!("undefined name '{name}'"),
                format!("अपरिभाषित नाम '{name}'"),
            ),
            location,
            suggestions,
        }));
    }

    fn other_error(&mut self, message: impl Into<String>, hindi: impl Into<String>, location: SourceLocation) {
        self.errors.push(SemanticError::other(LocalizedMessage::new(message, hindi), location));
    }

    fn define_or_redefine(&mut self, symbol: Symbol, location: SourceLocation) {
        let name = symbol.name.clone();
        let previous_line = self.context.lookup_symbol(&name).map(|s| s.line);
        if self.context.defined_in_current_scope(&name) {
            let previous_location = SourceLocation::new(previous_line.unwrap_or(0), 0);
            self.errors.push(SemanticError::Redefinition(RedefinitionError {
                name: name.clone(),
                message: LocalizedMessage::new(
                    format!("'{name}' is already defined in this scope"),
                    format!("'{name}' इस स्कोप में पहले से परिभाषित है"),
                ),
                location,
                previous_location,
            }));
        } else {
            self.context
                .define_symbol(symbol)
                .expect("just checked not defined in current scope");
        }
    }

    fn visit_block_scoped(&mut self, stmts: &[Statement]) {
        self.context.begin_scope();
        for stmt in stmts {
            self.visit_statement(stmt);
        }
        self.context.end_scope();
    }

    fn check_arity(&mut self, callee: &Expression, arg_count: usize, location: SourceLocation) {
        if let Expression::Variable(name, _) = callee {
            if let Some(symbol) = self.context.lookup_symbol(name) {
                if symbol.kind == SymbolKind::Function {
                    if let Some(expected) = symbol.param_count {
                        if expected != arg_count {
                            self.other_error(
                                format!(
                                    "'{name}' expects {expected} argument(s), found {arg_count}"
                                ),
                                format!(
                                    "'{name}' को {expected} तर्क चाहिए, {arg_count} मिले"
                                ),
                                location,
                            );
                        }
                    }
                }
            }
        }
    }
}

impl Visitor<Type> for SemanticAnalyzer {
    fn visit_var_decl(&mut self, name: &str, value: &Expression, loc: SourceLocation) -> Type {
        let value_type = self.visit_expression(value);
        self.define_or_redefine(Symbol::variable(name, value_type, loc.line), loc);
        Type::None
    }

    fn visit_assignment(&mut self, name: &str, value: &Expression, loc: SourceLocation) -> Type {
        self.visit_expression(value);
        if self.context.lookup_symbol(name).is_none() {
            self.undefined_name(name, loc);
        }
        Type::None
    }

    fn visit_property_assignment(
        &mut self,
        target: &Expression,
        _name: &str,
        value: &Expression,
        _loc: SourceLocation,
    ) -> Type {
        self.visit_expression(target);
        self.visit_expression(value);
        Type::None
    }

    fn visit_index_assignment(
        &mut self,
        target: &Expression,
        index: &Expression,
        value: &Expression,
        _loc: SourceLocation,
    ) -> Type {
        self.visit_expression(target);
        self.visit_expression(index);
        self.visit_expression(value);
        Type::None
    }

    fn visit_expression_statement(&mut self, expr: &Expression, _loc: SourceLocation) -> Type {
        self.visit_expression(expr)
    }

    fn visit_block(&mut self, stmts: &[Statement], _loc: SourceLocation) -> Type {
        self.visit_block_scoped(stmts);
        Type::None
    }

    fn visit_if(
        &mut self,
        cond: &Expression,
        then_branch: &[Statement],
        elifs: &[(Expression, Vec<Statement>)],
        else_branch: Option<&[Statement]>,
        _loc: SourceLocation,
    ) -> Type {
        self.visit_expression(cond);
        self.visit_block_scoped(then_branch);
        for (econd, ebody) in elifs {
            self.visit_expression(econd);
            self.visit_block_scoped(ebody);
        }
        if let Some(body) = else_branch {
            self.visit_block_scoped(body);
        }
        Type::None
    }

    fn visit_while(&mut self, cond: &Expression, body: &[Statement], _loc: SourceLocation) -> Type {
        self.visit_expression(cond);
        self.loop_depth += 1;
        self.visit_block_scoped(body);
        self.loop_depth -= 1;
        Type::None
    }

    fn visit_for_each(
        &mut self,
        var: &str,
        iterable: &Expression,
        body: &[Statement],
        loc: SourceLocation,
    ) -> Type {
        self.visit_expression(iterable);
        self.loop_depth += 1;
        self.context.begin_scope();
        let _ = self.context.define_symbol(Symbol::variable(var, Type::Any, loc.line));
        for stmt in body {
            self.visit_statement(stmt);
        }
        self.context.end_scope();
        self.loop_depth -= 1;
        Type::None
    }

    fn visit_break(&mut self, loc: SourceLocation) -> Type {
        if self.loop_depth == 0 {
            self.other_error("'ruk' used outside a loop", "'ruk' का प्रयोग लूप के बाहर किया गया", loc);
        }
        Type::None
    }

    fn visit_continue(&mut self, loc: SourceLocation) -> Type {
        if self.loop_depth == 0 {
            self.other_error(
                "'age_badho' used outside a loop",
                "'age_badho' का प्रयोग लूप के बाहर किया गया",
                loc,
            );
        }
        Type::None
    }

    fn visit_function_def(&mut self, def: &FunctionDefStmt) -> Type {
        self.define_or_redefine(
            Symbol::function(&def.name, def.params.len(), def.location.line),
            def.location,
        );
        self.function_depth += 1;
        self.context.begin_scope();
        for param in &def.params {
            let _ = self.context.define_symbol(Symbol::parameter(param, def.location.line));
        }
        for stmt in &def.body {
            self.visit_statement(stmt);
        }
        self.context.end_scope();
        self.function_depth -= 1;
        Type::Func
    }

    fn visit_return(&mut self, value: Option<&Expression>, loc: SourceLocation) -> Type {
        if self.function_depth == 0 {
            self.other_error("'wapas' used outside a function", "'wapas' का प्रयोग फ़ंक्शन के बाहर किया गया", loc);
        }
        if let Some(v) = value {
            self.visit_expression(v);
        }
        Type::None
    }

    fn visit_class_def(
        &mut self,
        name: &str,
        parent: Option<&str>,
        methods: &[FunctionDefStmt],
        loc: SourceLocation,
    ) -> Type {
        self.define_or_redefine(Symbol::class(name, loc.line), loc);
        if let Some(parent_name) = parent {
            match self.context.lookup_symbol(parent_name) {
                Some(sym) if sym.kind == SymbolKind::Class => {}
                Some(_) => self.other_error(
                    format!("'{parent_name}' is not a class"),
                    format!("'{parent_name}' एक क्लास नहीं है"),
                    loc,
                ),
                None => self.undefined_name(parent_name, loc),
            }
        }
        self.class_depth += 1;
        for method in methods {
            self.function_depth += 1;
            self.context.begin_scope();
            for param in &method.params {
                let _ = self.context.define_symbol(Symbol::parameter(param, method.location.line));
            }
            for stmt in &method.body {
                self.visit_statement(stmt);
            }
            self.context.end_scope();
            self.function_depth -= 1;
        }
        self.class_depth -= 1;
        Type::Class
    }

    fn visit_try(
        &mut self,
        body: &[Statement],
        catch_var: &str,
        catch_body: &[Statement],
        finally: Option<&[Statement]>,
        loc: SourceLocation,
    ) -> Type {
        self.visit_block_scoped(body);
        self.context.begin_scope();
        let _ = self.context.define_symbol(Symbol::variable(catch_var, Type::Any, loc.line));
        for stmt in catch_body {
            self.visit_statement(stmt);
        }
        self.context.end_scope();
        if let Some(f) = finally {
            self.visit_block_scoped(f);
        }
        Type::None
    }

    fn visit_throw(&mut self, value: &Expression, _loc: SourceLocation) -> Type {
        self.visit_expression(value);
        Type::None
    }

    fn visit_print(&mut self, args: &[Expression], _newline: bool, _loc: SourceLocation) -> Type {
        for arg in args {
            self.visit_expression(arg);
        }
        Type::None
    }

    fn visit_input(&mut self, name: &str, _prompt: Option<&str>, loc: SourceLocation) -> Type {
        if !self.context.defined_in_current_scope(name) {
            let _ = self.context.define_symbol(Symbol::variable(name, Type::String, loc.line));
        }
        Type::None
    }

    fn visit_import(&mut self, _name: &str, _loc: SourceLocation) -> Type {
        Type::None
    }

    fn visit_literal(&mut self, value: &LiteralValue, _loc: SourceLocation) -> Type {
        match value {
            LiteralValue::Int(_) | LiteralValue::Float(_) => Type::Number,
            LiteralValue::String(_) => Type::String,
            LiteralValue::Boolean(_) => Type::Bool,
            LiteralValue::None => Type::None,
        }
    }

    fn visit_list(&mut self, items: &[Expression], _loc: SourceLocation) -> Type {
        for item in items {
            self.visit_expression(item);
        }
        Type::List
    }

    fn visit_dict(&mut self, entries: &[(Expression, Expression)], _loc: SourceLocation) -> Type {
        for (k, v) in entries {
            self.visit_expression(k);
            self.visit_expression(v);
        }
        Type::Dict
    }

    fn visit_variable(&mut self, name: &str, loc: SourceLocation) -> Type {
        match self.context.lookup_symbol(name) {
            Some(symbol) => symbol.inferred_type,
            None => {
                self.undefined_name(name, loc);
                Type::Any
            }
        }
    }

    fn visit_binary_op(
        &mut self,
        op: hindustani_ir::BinaryOperator,
        left: &Expression,
        right: &Expression,
        loc: SourceLocation,
    ) -> Type {
        let left_type = self.visit_expression(left);
        let right_type = self.visit_expression(right);
        match operations::check_binary_op(op, left_type, right_type, loc) {
            Ok(t) => t,
            Err(e) => {
                self.errors.push(e);
                Type::Any
            }
        }
    }

    fn visit_unary_op(&mut self, op: hindustani_ir::UnaryOperator, operand: &Expression, loc: SourceLocation) -> Type {
        let operand_type = self.visit_expression(operand);
        match operations::check_unary_op(op, operand_type, loc) {
            Ok(t) => t,
            Err(e) => {
                self.errors.push(e);
                Type::Any
            }
        }
    }

    fn visit_parenthesized(&mut self, inner: &Expression, _loc: SourceLocation) -> Type {
        self.visit_expression(inner)
    }

    fn visit_function_call(&mut self, callee: &Expression, args: &[Expression], loc: SourceLocation) -> Type {
        self.visit_expression(callee);
        for arg in args {
            self.visit_expression(arg);
        }
        self.check_arity(callee, args.len(), loc);
        Type::Any
    }

    fn visit_lambda(&mut self, params: &[String], body: &Expression, loc: SourceLocation) -> Type {
        self.function_depth += 1;
        self.context.begin_scope();
        for param in params {
            let _ = self.context.define_symbol(Symbol::parameter(param, loc.line));
        }
        self.visit_expression(body);
        self.context.end_scope();
        self.function_depth -= 1;
        Type::Func
    }

    fn visit_new_object(&mut self, class_name: &str, args: &[Expression], loc: SourceLocation) -> Type {
        match self.context.lookup_symbol(class_name) {
            Some(sym) if sym.kind == SymbolKind::Class => {}
            Some(_) => self.other_error(
                format!("'{class_name}' is not a class"),
                format!("'{class_name}' एक क्लास नहीं है"),
                loc,
            ),
            None => self.undefined_name(class_name, loc),
        }
        for arg in args {
            self.visit_expression(arg);
        }
        Type::Any
    }

    fn visit_method_call(&mut self, target: &Expression, _name: &str, args: &[Expression], _loc: SourceLocation) -> Type {
        self.visit_expression(target);
        for arg in args {
            self.visit_expression(arg);
        }
        Type::Any
    }

    fn visit_property_access(&mut self, target: &Expression, _name: &str, _loc: SourceLocation) -> Type {
        self.visit_expression(target);
        Type::Any
    }

    fn visit_index(&mut self, target: &Expression, index: &Expression, _loc: SourceLocation) -> Type {
        self.visit_expression(target);
        self.visit_expression(index);
        Type::Any
    }

    fn visit_this(&mut self, loc: SourceLocation) -> Type {
        if self.class_depth == 0 {
            self.other_error("'yeh' used outside a method", "'yeh' का प्रयोग मेथड के बाहर किया गया", loc);
        }
        Type::Any
    }

    fn visit_super(&mut self, args: &[Expression], loc: SourceLocation) -> Type {
        if self.class_depth == 0 {
            self.other_error("'upar' used outside a method", "'upar' का प्रयोग मेथड के बाहर किया गया", loc);
        }
        for arg in args {
            self.visit_expression(arg);
        }
        Type::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parser::parse};

    fn analyze_source(source: &str) -> Result<(), Vec<SemanticError>> {
        let tokens = tokenize(source).expect("lex ok");
        let program = parse(&tokens).expect("parse ok");
        analyze(&program)
    }

    #[test]
    fn accepts_well_formed_program() {
        assert!(analyze_source("maan x = 1\nlikho(x)").is_ok());
    }

    #[test]
    fn reports_undefined_variable_with_suggestion() {
        let errors = analyze_source("maan naam = \"a\"\nlikho(naem)").unwrap_err();
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            SemanticError::UndefinedName(e) => assert!(e.suggestions.contains(&"naam".to_string())),
            other => panic!("expected UndefinedName, got {other:?}"),
        }
    }

    #[test]
    fn reports_redefinition_in_same_scope() {
        let errors = analyze_source("maan x = 1\nmaan x = 2").unwrap_err();
        assert!(matches!(errors[0], SemanticError::Redefinition(_)));
    }

    #[test]
    fn allows_shadowing_in_nested_scope() {
        assert!(analyze_source("maan x = 1\n{ maan x = 2\nlikho(x) }").is_ok());
    }

    #[test]
    fn rejects_break_outside_loop() {
        let errors = analyze_source("ruk").unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn accepts_break_inside_while() {
        assert!(analyze_source("jab_tak sach { ruk }").is_ok());
    }

    #[test]
    fn rejects_wrong_arity_call() {
        let errors = analyze_source("kaam add(a, b) { wapas a + b }\nlikho(add(1))").unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_string_minus_string() {
        let errors = analyze_source("likho(\"a\" - \"b\")").unwrap_err();
        assert!(matches!(errors[0], SemanticError::TypeCheck(_)));
    }

    #[test]
    fn rejects_this_outside_class() {
        let errors = analyze_source("likho(yeh)").unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn accepts_inheritance_and_super_in_method() {
        let source = "class A { kaam __init__(n) { yeh.n = n } }\nclass B extends A { kaam __init__(n) { upar(n) } }";
        assert!(analyze_source(source).is_ok());
    }
}
