use crate::token::{Token, Tokentype};
use hindustani_error::{ParserError, ParserErrorCollection};
use hindustani_ir::{
    BinaryOperator, Expression, FunctionDefStmt, LiteralValue, Program, SourceLocation, Statement,
    UnaryOperator,
};

/// Token types that begin a new statement; used both to decide which
/// `statement()` branch to take and as the panic-mode synchronization set
/// (spec §4.2).
const STATEMENT_START: &[Tokentype] = &[
    Tokentype::Agar,
    Tokentype::JabTak,
    Tokentype::Kaam,
    Tokentype::Class,
    Tokentype::Wapas,
    Tokentype::Koshish,
    Tokentype::Maan,
    Tokentype::Har,
    Tokentype::Likho,
    Tokentype::LikhoOnline,
    Tokentype::Poocho,
    Tokentype::Uchalo,
    Tokentype::Ruk,
    Tokentype::AageBadho,
];

/// Recursive-descent, precedence-climbing parser over the token stream.
///
/// Grounded on the teacher's `Parser<'a>` shape: a token slice, a cursor,
/// and an accumulating error list with `match_token`/`check`/`advance`
/// helpers. Unlike the teacher, every parse error is recorded rather than
/// aborting — the parser calls `synchronize()` and keeps going, so one pass
/// reports every syntax error in the file (spec §4.2/§7).
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    errors: ParserErrorCollection,
}

pub fn parse(tokens: &[Token]) -> Result<Program, ParserErrorCollection> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            current: 0,
            errors: ParserErrorCollection::default(),
        }
    }

    fn parse_program(&mut self) -> Result<Program, ParserErrorCollection> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }
        if self.errors.is_empty() {
            Ok(Program { statements })
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_next(&self) -> &Token {
        &self.tokens[(self.current + 1).min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == Tokentype::Eof
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, token_type: Tokentype) -> bool {
        self.peek().token_type == token_type
    }

    fn check_next(&self, token_type: Tokentype) -> bool {
        self.peek_next().token_type == token_type
    }

    fn match_token(&mut self, token_type: Tokentype) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_any(&mut self, types: &[Tokentype]) -> bool {
        types.iter().any(|t| self.check(*t)) && {
            self.advance();
            true
        }
    }

    fn consume(&mut self, token_type: Tokentype, expected: &str) -> Result<&Token, ParserError> {
        if self.check(token_type) {
            Ok(self.advance())
        } else {
            let found = self.peek().lexeme.clone();
            let loc = self.peek().location;
            Err(ParserError::expected_token(
                expected,
                if found.is_empty() { "<EOF>" } else { &found },
                loc,
            ))
        }
    }

    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().token_type == Tokentype::RightBrace {
                return;
            }
            if STATEMENT_START.contains(&self.peek().token_type) {
                return;
            }
            self.advance();
        }
    }

    // --- statements ---------------------------------------------------

    fn statement(&mut self) -> Result<Statement, ParserError> {
        match self.peek().token_type {
            Tokentype::Maan => self.var_decl(),
            Tokentype::Agar => self.if_statement(),
            Tokentype::JabTak => self.while_statement(),
            Tokentype::Har => self.for_each_statement(),
            Tokentype::Kaam => self.function_def().map(Statement::FunctionDef),
            Tokentype::Class => self.class_def(),
            Tokentype::Wapas => self.return_statement(),
            Tokentype::Ruk => {
                let loc = self.advance().location;
                Ok(Statement::Break(loc))
            }
            Tokentype::AageBadho => {
                let loc = self.advance().location;
                Ok(Statement::Continue(loc))
            }
            Tokentype::Koshish => self.try_statement(),
            Tokentype::Uchalo => self.throw_statement(),
            Tokentype::Likho => self.print_statement(true),
            Tokentype::LikhoOnline => self.print_statement(false),
            Tokentype::Poocho => self.input_statement(),
            Tokentype::Lao => self.import_statement(),
            Tokentype::LeftBrace => self.block().map(|(stmts, loc)| Statement::Block(stmts, loc)),
            Tokentype::Identifier if self.check_next(Tokentype::Equal) => self.assignment_statement(),
            _ => self.expression_or_assignment_statement(),
        }
    }

    fn var_decl(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'maan'
        let name = self.identifier_name()?;
        self.consume(Tokentype::Equal, "=")?;
        let value = self.expression()?;
        Ok(Statement::VarDecl(name, value, loc))
    }

    fn identifier_name(&mut self) -> Result<String, ParserError> {
        if self.check(Tokentype::Identifier) {
            Ok(self.advance().lexeme.clone())
        } else {
            let found = self.peek().lexeme.clone();
            Err(ParserError::expected_token(
                "identifier",
                if found.is_empty() { "<EOF>" } else { &found },
                self.peek().location,
            ))
        }
    }

    fn block(&mut self) -> Result<(Vec<Statement>, SourceLocation), ParserError> {
        let loc = self.consume(Tokentype::LeftBrace, "{")?.location;
        let mut statements = Vec::new();
        while !self.check(Tokentype::RightBrace) && !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                    if self.check(Tokentype::RightBrace) {
                        break;
                    }
                }
            }
        }
        if !self.check(Tokentype::RightBrace) {
            self.errors.push(ParserError::missing_token("}", self.peek().location));
        } else {
            self.advance();
        }
        Ok((statements, loc))
    }

    fn if_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'agar'
        let cond = self.expression()?;
        let (then_branch, _) = self.block()?;
        let mut elifs = Vec::new();
        while self.match_token(Tokentype::WarnaAgar) {
            let econd = self.expression()?;
            let (ebody, _) = self.block()?;
            elifs.push((econd, ebody));
        }
        let else_branch = if self.match_token(Tokentype::Warna) {
            Some(self.block()?.0)
        } else {
            None
        };
        Ok(Statement::If(cond, then_branch, elifs, else_branch, loc))
    }

    fn while_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'jab_tak'
        let cond = self.expression()?;
        let (body, _) = self.block()?;
        Ok(Statement::While(cond, body, loc))
    }

    fn for_each_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'har'
        let var = self.identifier_name()?;
        self.consume(Tokentype::Mein, "mein")?;
        let iterable = self.expression()?;
        let (body, _) = self.block()?;
        Ok(Statement::ForEach(var, iterable, body, loc))
    }

    fn function_def(&mut self) -> Result<FunctionDefStmt, ParserError> {
        let loc = self.advance().location; // 'kaam'
        let name = self.identifier_name()?;
        let params = self.param_list()?;
        let (body, _) = self.block()?;
        Ok(FunctionDefStmt {
            name,
            params,
            body,
            location: loc,
        })
    }

    fn param_list(&mut self) -> Result<Vec<String>, ParserError> {
        self.consume(Tokentype::LeftParen, "(")?;
        let mut params = Vec::new();
        if !self.check(Tokentype::RightParen) {
            loop {
                params.push(self.identifier_name()?);
                if !self.match_token(Tokentype::Comma) {
                    break;
                }
            }
        }
        self.consume(Tokentype::RightParen, ")")?;
        Ok(params)
    }

    fn class_def(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'class'
        let name = self.identifier_name()?;
        let parent = if self.match_token(Tokentype::Extends) {
            Some(self.identifier_name()?)
        } else {
            None
        };
        self.consume(Tokentype::LeftBrace, "{")?;
        let mut methods = Vec::new();
        while !self.check(Tokentype::RightBrace) && !self.is_at_end() {
            if self.check(Tokentype::Kaam) {
                match self.function_def() {
                    Ok(m) => methods.push(m),
                    Err(e) => {
                        self.errors.push(e);
                        self.synchronize();
                    }
                }
            } else {
                let found = self.peek().lexeme.clone();
                self.errors.push(ParserError::expected_token(
                    "method definition",
                    if found.is_empty() { "<EOF>" } else { &found },
                    self.peek().location,
                ));
                self.synchronize();
            }
        }
        if !self.check(Tokentype::RightBrace) {
            self.errors.push(ParserError::missing_token("}", self.peek().location));
        } else {
            self.advance();
        }
        Ok(Statement::ClassDef(name, parent, methods, loc))
    }

    fn return_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'wapas'
        if self.at_statement_boundary() {
            Ok(Statement::Return(None, loc))
        } else {
            Ok(Statement::Return(Some(self.expression()?), loc))
        }
    }

    fn at_statement_boundary(&self) -> bool {
        self.is_at_end()
            || self.check(Tokentype::RightBrace)
            || STATEMENT_START.contains(&self.peek().token_type)
    }

    fn try_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'koshish'
        let (body, _) = self.block()?;
        self.consume(Tokentype::Pakad, "pakad")?;
        let catch_var = self.identifier_name()?;
        let (catch_body, _) = self.block()?;
        let finally = if self.match_token(Tokentype::Aakhir) {
            Some(self.block()?.0)
        } else {
            None
        };
        Ok(Statement::Try(body, catch_var, catch_body, finally, loc))
    }

    fn throw_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'uchalo'
        let value = self.expression()?;
        Ok(Statement::Throw(value, loc))
    }

    fn print_statement(&mut self, newline: bool) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'likho' | 'likho_online'
        self.consume(Tokentype::LeftParen, "(")?;
        let args = self.arg_list()?;
        self.consume(Tokentype::RightParen, ")")?;
        Ok(Statement::Print(args, newline, loc))
    }

    fn input_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'poocho'
        let name = self.identifier_name()?;
        let prompt = if self.check(Tokentype::StringLiteral) {
            Some(self.advance().lexeme.clone())
        } else {
            None
        };
        Ok(Statement::Input(name, prompt, loc))
    }

    fn import_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.advance().location; // 'lao'
        let name = self.identifier_name()?;
        Ok(Statement::Import(name, loc))
    }

    fn assignment_statement(&mut self) -> Result<Statement, ParserError> {
        let name_tok = self.advance().clone(); // identifier
        self.consume(Tokentype::Equal, "=")?;
        let value = self.expression()?;
        Ok(Statement::Assignment(name_tok.lexeme, value, name_tok.location))
    }

    /// A bare expression statement — but one whose target is a property or
    /// index expression followed by `=` is really an assignment in
    /// disguise, so postfix parsing happens first and the `=` is checked
    /// afterward (mirrors the grammar's `postfix '=' expression` shape).
    fn expression_or_assignment_statement(&mut self) -> Result<Statement, ParserError> {
        let loc = self.peek().location;
        let expr = self.expression()?;
        if self.match_token(Tokentype::Equal) {
            let value = self.expression()?;
            return match expr {
                Expression::PropertyAccess(target, name, _) => {
                    Ok(Statement::PropertyAssignment(*target, name, value, loc))
                }
                Expression::Index(target, index, _) => {
                    Ok(Statement::IndexAssignment(*target, *index, value, loc))
                }
                other => Err(ParserError::invalid_syntax(
                    "invalid assignment target",
                    other.location(),
                )),
            };
        }
        Ok(Statement::ExpressionStmt(expr, loc))
    }

    // --- expressions ----------------------------------------------------

    fn expression(&mut self) -> Result<Expression, ParserError> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.logical_and()?;
        while self.match_token(Tokentype::Ya) {
            let loc = self.previous().location;
            let right = self.logical_and()?;
            expr = Expression::BinaryOp(BinaryOperator::Or, Box::new(expr), Box::new(right), loc);
        }
        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.equality()?;
        while self.match_token(Tokentype::Aur) {
            let loc = self.previous().location;
            let right = self.equality()?;
            expr = Expression::BinaryOp(BinaryOperator::And, Box::new(expr), Box::new(right), loc);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.comparison()?;
        while self.match_any(&[Tokentype::EqualEqual, Tokentype::NotEqual]) {
            let op = match self.previous().token_type {
                Tokentype::EqualEqual => BinaryOperator::Equal,
                Tokentype::NotEqual => BinaryOperator::NotEqual,
                _ => unreachable!(),
            };
            let loc = self.previous().location;
            let right = self.comparison()?;
            expr = Expression::BinaryOp(op, Box::new(expr), Box::new(right), loc);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.addition()?;
        while self.match_any(&[
            Tokentype::Greater,
            Tokentype::Less,
            Tokentype::GreaterEqual,
            Tokentype::LessEqual,
        ]) {
            let op = match self.previous().token_type {
                Tokentype::Greater => BinaryOperator::GreaterThan,
                Tokentype::Less => BinaryOperator::LessThan,
                Tokentype::GreaterEqual => BinaryOperator::GreaterThanOrEqual,
                Tokentype::LessEqual => BinaryOperator::LessThanOrEqual,
                _ => unreachable!(),
            };
            let loc = self.previous().location;
            let right = self.addition()?;
            expr = Expression::BinaryOp(op, Box::new(expr), Box::new(right), loc);
        }
        Ok(expr)
    }

    fn addition(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.multiplication()?;
        while self.match_any(&[Tokentype::Plus, Tokentype::Minus]) {
            let op = match self.previous().token_type {
                Tokentype::Plus => BinaryOperator::Add,
                Tokentype::Minus => BinaryOperator::Subtract,
                _ => unreachable!(),
            };
            let loc = self.previous().location;
            let right = self.multiplication()?;
            expr = Expression::BinaryOp(op, Box::new(expr), Box::new(right), loc);
        }
        Ok(expr)
    }

    fn multiplication(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.unary()?;
        while self.match_any(&[Tokentype::Star, Tokentype::Slash, Tokentype::Percent]) {
            let op = match self.previous().token_type {
                Tokentype::Star => BinaryOperator::Multiply,
                Tokentype::Slash => BinaryOperator::Divide,
                Tokentype::Percent => BinaryOperator::Modulo,
                _ => unreachable!(),
            };
            let loc = self.previous().location;
            let right = self.unary()?;
            expr = Expression::BinaryOp(op, Box::new(expr), Box::new(right), loc);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expression, ParserError> {
        if self.match_any(&[Tokentype::Minus, Tokentype::Nahi]) {
            let op = match self.previous().token_type {
                Tokentype::Minus => UnaryOperator::Negate,
                Tokentype::Nahi => UnaryOperator::Not,
                _ => unreachable!(),
            };
            let loc = self.previous().location;
            let operand = self.unary()?;
            return Ok(Expression::UnaryOp(op, Box::new(operand), loc));
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.primary()?;
        loop {
            if self.match_token(Tokentype::LeftBracket) {
                let loc = self.previous().location;
                let index = self.expression()?;
                self.consume(Tokentype::RightBracket, "]")?;
                expr = Expression::Index(Box::new(expr), Box::new(index), loc);
            } else if self.match_token(Tokentype::Dot) {
                let loc = self.previous().location;
                let name = self.identifier_name()?;
                if self.match_token(Tokentype::LeftParen) {
                    let args = self.arg_list()?;
                    self.consume(Tokentype::RightParen, ")")?;
                    expr = Expression::MethodCall(Box::new(expr), name, args, loc);
                } else {
                    expr = Expression::PropertyAccess(Box::new(expr), name, loc);
                }
            } else if self.match_token(Tokentype::LeftParen) {
                let loc = self.previous().location;
                let args = self.arg_list()?;
                self.consume(Tokentype::RightParen, ")")?;
                expr = Expression::FunctionCall(Box::new(expr), args, loc);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn arg_list(&mut self) -> Result<Vec<Expression>, ParserError> {
        let mut args = Vec::new();
        if !self.check(Tokentype::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_token(Tokentype::Comma) {
                    break;
                }
            }
        }
        Ok(args)
    }

    fn primary(&mut self) -> Result<Expression, ParserError> {
        let tok = self.peek().clone();
        match tok.token_type {
            Tokentype::IntegerLiteral => {
                self.advance();
                let value = tok.lexeme.parse::<i64>().unwrap_or(0);
                Ok(Expression::Literal(LiteralValue::Int(value), tok.location))
            }
            Tokentype::FloatLiteral => {
                self.advance();
                let sanitized = sanitize_float_lexeme(&tok.lexeme);
                let value = sanitized.parse::<f64>().unwrap_or(0.0);
                Ok(Expression::Literal(LiteralValue::Float(value), tok.location))
            }
            Tokentype::StringLiteral => {
                self.advance();
                Ok(Expression::Literal(LiteralValue::String(tok.lexeme), tok.location))
            }
            Tokentype::Sach => {
                self.advance();
                Ok(Expression::Literal(LiteralValue::Boolean(true), tok.location))
            }
            Tokentype::Jhoot => {
                self.advance();
                Ok(Expression::Literal(LiteralValue::Boolean(false), tok.location))
            }
            Tokentype::Khaali => {
                self.advance();
                Ok(Expression::Literal(LiteralValue::None, tok.location))
            }
            Tokentype::Yeh => {
                self.advance();
                Ok(Expression::This(tok.location))
            }
            Tokentype::Upar => {
                self.advance();
                self.consume(Tokentype::LeftParen, "(")?;
                let args = self.arg_list()?;
                self.consume(Tokentype::RightParen, ")")?;
                Ok(Expression::Super(args, tok.location))
            }
            Tokentype::Naya => {
                self.advance();
                let class_name = self.identifier_name()?;
                self.consume(Tokentype::LeftParen, "(")?;
                let args = self.arg_list()?;
                self.consume(Tokentype::RightParen, ")")?;
                Ok(Expression::NewObject(class_name, args, tok.location))
            }
            Tokentype::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.consume(Tokentype::RightParen, ")")?;
                Ok(Expression::Parenthesized(Box::new(inner), tok.location))
            }
            Tokentype::LeftBracket => {
                self.advance();
                let mut items = Vec::new();
                if !self.check(Tokentype::RightBracket) {
                    loop {
                        items.push(self.expression()?);
                        if !self.match_token(Tokentype::Comma) {
                            break;
                        }
                    }
                }
                self.consume(Tokentype::RightBracket, "]")?;
                Ok(Expression::List(items, tok.location))
            }
            Tokentype::LeftBrace => {
                self.advance();
                let mut entries = Vec::new();
                if !self.check(Tokentype::RightBrace) {
                    loop {
                        let key = self.expression()?;
                        self.consume(Tokentype::Colon, ":")?;
                        let value = self.expression()?;
                        entries.push((key, value));
                        if !self.match_token(Tokentype::Comma) {
                            break;
                        }
                    }
                }
                self.consume(Tokentype::RightBrace, "}")?;
                Ok(Expression::Dict(entries, tok.location))
            }
            Tokentype::Lambda => {
                self.advance();
                let params = self.param_list()?;
                self.consume(Tokentype::Arrow, "->")?;
                let body = self.expression()?;
                Ok(Expression::Lambda(params, Box::new(body), tok.location))
            }
            Tokentype::Identifier => {
                self.advance();
                Ok(Expression::Variable(tok.lexeme, tok.location))
            }
            _ => {
                let found = tok.lexeme.clone();
                Err(ParserError::invalid_syntax(
                    format!(
                        "expected expression, found {}",
                        if found.is_empty() { "<EOF>" } else { &found }
                    ),
                    tok.location,
                ))
            }
        }
    }
}

/// Strips every `.` past the first one, matching the lexer's best-effort
/// recovery for a number like `1.2.3` (spec §4.1).
fn sanitize_float_lexeme(lexeme: &str) -> String {
    let mut seen_dot = false;
    lexeme
        .chars()
        .filter(|&c| {
            if c == '.' {
                if seen_dot {
                    return false;
                }
                seen_dot = true;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use hindustani_ir::ast_printer::AstPrinter;

    fn parse_source(source: &str) -> Program {
        let tokens = tokenize(source).expect("lex ok");
        parse(&tokens).expect("parse ok")
    }

    #[test]
    fn parses_hello_world() {
        let program = parse_source("maan naam = \"Duniya\"\nlikho(\"hi\")");
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn parses_closure_example() {
        let program = parse_source(
            "kaam make_adder(n) { wapas lambda(x) -> x + n }\nmaan add5 = make_adder(5)\nlikho(add5(3))",
        );
        assert_eq!(program.statements.len(), 3);
        let mut printer = AstPrinter::new();
        let printed = printer.print_program(&program);
        assert!(printed.contains("lambda"));
    }

    #[test]
    fn parses_inheritance_and_super() {
        let program = parse_source(
            "class A { kaam __init__(n) { yeh.n = n } }\nclass B extends A { kaam __init__(n) { upar(n) } }",
        );
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn round_trips_through_ast_printer() {
        let source = "maan x = 10\n{ maan x = x + 5\nlikho(x) }\nlikho(x)";
        let program = parse_source(source);
        let mut printer = AstPrinter::new();
        let first_print = printer.print_program(&program);

        let reparsed_tokens = tokenize(source).unwrap();
        let reparsed = parse(&reparsed_tokens).unwrap();
        let mut printer2 = AstPrinter::new();
        let second_print = printer2.print_program(&reparsed);
        assert_eq!(first_print, second_print);
    }

    #[test]
    fn missing_closing_paren_is_reported_and_parsing_continues() {
        let tokens = tokenize("maan x = 1\nlikho(\"ok\"\nlikho(\"done\")").unwrap();
        let result = parse(&tokens);
        assert!(result.is_err());
        let errors = result.unwrap_err();
        assert!(!errors.errors.is_empty());
    }

    #[test]
    fn assigns_into_property_and_index_targets() {
        let program = parse_source("yeh.n = 5\nxs[0] = 1");
        assert!(matches!(program.statements[0], Statement::PropertyAssignment(..)));
        assert!(matches!(program.statements[1], Statement::IndexAssignment(..)));
    }
}
