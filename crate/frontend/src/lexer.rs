use crate::token::{Token, Tokentype};
use hindustani_error::{LexerError, LexerErrorCollection};
use hindustani_ir::SourceLocation;

fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || is_devanagari(c)
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_devanagari(c)
}

/// Lexer state for tracking position during tokenization.
///
/// Mirrors the teacher's `LexerState` shape (a peekable char iterator plus
/// per-character `handle_*` dispatch) but tracks line *and* column, and
/// records errors into a batch instead of emitting an `Invalid` token.
struct LexerState<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    errors: LexerErrorCollection,
}

impl<'a> LexerState<'a> {
    fn new(input: &'a str) -> Self {
        LexerState {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            tokens: Vec::new(),
            errors: LexerErrorCollection::default(),
        }
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(c) = c {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_second(&mut self) -> Option<char> {
        let mut clone = self.chars.clone();
        clone.next();
        clone.next()
    }

    fn add_token(&mut self, token_type: Tokentype, lexeme: String, location: SourceLocation) {
        self.tokens.push(Token::new(token_type, lexeme, location));
    }
}

/// Tokenizes `input`, returning the full token stream or failing with the
/// batch of every lexical error found (spec §4.1).
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexerErrorCollection> {
    let (tokens, errors) = tokenize_safe(input);
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(LexerErrorCollection { errors })
    }
}

/// Tokenizes `input`, always returning the (possibly partial) token stream
/// alongside whatever errors were collected, never failing outright.
pub fn tokenize_safe(input: &str) -> (Vec<Token>, Vec<LexerError>) {
    let mut state = LexerState::new(input);

    while let Some(c) = state.peek() {
        match c {
            c if c.is_whitespace() => {
                state.advance();
            }
            '/' if state.peek_second() == Some('/') => scan_line_comment(&mut state),
            c if c.is_ascii_digit() => scan_number(&mut state),
            '"' | '\'' => scan_string(&mut state, c),
            c if is_identifier_start(c) => scan_identifier(&mut state),
            _ => scan_operator(&mut state),
        }
    }

    let eof_loc = state.location();
    state.add_token(Tokentype::Eof, String::new(), eof_loc);
    (state.tokens, state.errors.errors)
}

fn scan_line_comment(state: &mut LexerState) {
    state.advance();
    state.advance();
    while let Some(c) = state.peek() {
        if c == '\n' {
            break;
        }
        state.advance();
    }
}

fn scan_number(state: &mut LexerState) {
    let start_loc = state.location();
    let mut text = String::new();
    let mut is_float = false;
    let mut reported_extra_dot = false;

    while let Some(c) = state.peek() {
        if c.is_ascii_digit() {
            text.push(c);
            state.advance();
        } else if c == '.' {
            if is_float {
                if !reported_extra_dot {
                    state
                        .errors
                        .push(LexerError::invalid_number(&text, start_loc));
                    reported_extra_dot = true;
                }
                state.advance();
            } else {
                is_float = true;
                text.push(c);
                state.advance();
            }
        } else {
            break;
        }
    }

    let token_type = if is_float {
        Tokentype::FloatLiteral
    } else {
        Tokentype::IntegerLiteral
    };
    state.add_token(token_type, text, start_loc);
}

fn scan_string(state: &mut LexerState, quote: char) {
    let start_loc = state.location();
    state.advance();
    let mut text = String::new();
    let mut closed = false;

    while let Some(c) = state.peek() {
        if c == quote {
            state.advance();
            closed = true;
            break;
        }
        if c == '\n' {
            break;
        }
        text.push(c);
        state.advance();
    }

    if !closed {
        state.errors.push(LexerError::unterminated_string(start_loc));
    }
    state.add_token(Tokentype::StringLiteral, text, start_loc);
}

fn scan_identifier(state: &mut LexerState) {
    let start_loc = state.location();
    let mut text = String::new();
    while let Some(c) = state.peek() {
        if is_identifier_continue(c) {
            text.push(c);
            state.advance();
        } else {
            break;
        }
    }
    let token_type = Tokentype::keyword(&text).unwrap_or(Tokentype::Identifier);
    state.add_token(token_type, text, start_loc);
}

fn scan_operator(state: &mut LexerState) {
    let start_loc = state.location();
    let c = state.advance().unwrap();

    macro_rules! two_char {
        ($second:expr, $both:expr, $single:expr) => {{
            if state.peek() == Some($second) {
                state.advance();
                state.add_token($both, format!("{c}{}", $second), start_loc);
            } else {
                state.add_token($single, c.to_string(), start_loc);
            }
        }};
    }

    match c {
        '+' => state.add_token(Tokentype::Plus, "+".to_string(), start_loc),
        '-' => two_char!('>', Tokentype::Arrow, Tokentype::Minus),
        '*' => state.add_token(Tokentype::Star, "*".to_string(), start_loc),
        '/' => state.add_token(Tokentype::Slash, "/".to_string(), start_loc),
        '%' => state.add_token(Tokentype::Percent, "%".to_string(), start_loc),
        '=' => two_char!('=', Tokentype::EqualEqual, Tokentype::Equal),
        '!' => {
            if state.peek() == Some('=') {
                state.advance();
                state.add_token(Tokentype::NotEqual, "!=".to_string(), start_loc);
            } else {
                state
                    .errors
                    .push(LexerError::unexpected_character(c, start_loc));
            }
        }
        '>' => two_char!('=', Tokentype::GreaterEqual, Tokentype::Greater),
        '<' => two_char!('=', Tokentype::LessEqual, Tokentype::Less),
        '&' => {
            if state.peek() == Some('&') {
                state.advance();
                state.add_token(Tokentype::Aur, "&&".to_string(), start_loc);
            } else {
                state
                    .errors
                    .push(LexerError::unexpected_character(c, start_loc));
            }
        }
        '|' => {
            if state.peek() == Some('|') {
                state.advance();
                state.add_token(Tokentype::Ya, "||".to_string(), start_loc);
            } else {
                state
                    .errors
                    .push(LexerError::unexpected_character(c, start_loc));
            }
        }
        '(' => state.add_token(Tokentype::LeftParen, "(".to_string(), start_loc),
        ')' => state.add_token(Tokentype::RightParen, ")".to_string(), start_loc),
        '[' => state.add_token(Tokentype::LeftBracket, "[".to_string(), start_loc),
        ']' => state.add_token(Tokentype::RightBracket, "]".to_string(), start_loc),
        '{' => state.add_token(Tokentype::LeftBrace, "{".to_string(), start_loc),
        '}' => state.add_token(Tokentype::RightBrace, "}".to_string(), start_loc),
        ',' => state.add_token(Tokentype::Comma, ",".to_string(), start_loc),
        '.' => state.add_token(Tokentype::Dot, ".".to_string(), start_loc),
        ':' => state.add_token(Tokentype::Colon, ":".to_string(), start_loc),
        _ => state
            .errors
            .push(LexerError::unexpected_character(c, start_loc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_hello_world() {
        let (tokens, errors) = tokenize_safe("maan naam = \"Duniya\"\nlikho(\"hi\")");
        assert!(errors.is_empty());
        let types: Vec<_> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(types[0], Tokentype::Maan);
        assert_eq!(types[1], Tokentype::Identifier);
        assert_eq!(types[2], Tokentype::Equal);
        assert_eq!(types[3], Tokentype::StringLiteral);
        assert_eq!(*types.last().unwrap(), Tokentype::Eof);
    }

    #[test]
    fn positions_are_non_decreasing_and_ends_with_eof() {
        let (tokens, _) = tokenize_safe("maan x = 1\nmaan y = 2");
        let mut last = (0, 0);
        for t in &tokens {
            let pos = (t.location.line, t.location.column);
            assert!(pos >= last);
            last = pos;
        }
        assert_eq!(tokens.last().unwrap().token_type, Tokentype::Eof);
    }

    #[test]
    fn unexpected_character_is_recorded_but_lexing_continues() {
        let (tokens, errors) = tokenize_safe("maan x = @\nlikho(x)");
        assert_eq!(errors.len(), 1);
        assert!(tokens.iter().any(|t| t.token_type == Tokentype::Likho));
    }

    #[test]
    fn unterminated_string_is_one_error_and_lexing_continues() {
        let (tokens, errors) = tokenize_safe("likho(\"ok\nlikho(\"done\")");
        assert_eq!(errors.len(), 1);
        assert!(tokens.iter().filter(|t| t.token_type == Tokentype::Likho).count() >= 2);
    }

    #[test]
    fn devanagari_identifier_is_accepted() {
        let (tokens, errors) = tokenize_safe("maan नाम = \"Duniya\"");
        assert!(errors.is_empty());
        assert_eq!(tokens[1].token_type, Tokentype::Identifier);
        assert_eq!(tokens[1].lexeme, "नाम");
    }

    #[test]
    fn double_ampersand_and_pipe_are_synonyms() {
        let (tokens, errors) = tokenize_safe("sach && jhoot || sach");
        assert!(errors.is_empty());
        assert_eq!(tokens[1].token_type, Tokentype::Aur);
        assert_eq!(tokens[3].token_type, Tokentype::Ya);
    }
}
