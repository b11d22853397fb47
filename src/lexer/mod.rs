//! Lexer for Sn.
//!
//! This module implements the tokenization stage of the compiler. Sn is
//! indentation-delimited, so besides ordinary tokens the lexer synthesizes
//! `INDENT`, `DEDENT` and `NEWLINE` layout markers from whitespace: the
//! indent stack starts at `[0]`, every increase of the leading whitespace
//! of a line pushes exactly once and emits one `INDENT`, every decrease
//! pops and emits one `DEDENT` per popped level, and at end-of-input all
//! still-open blocks are closed with trailing `DEDENT`s.
//!
//! Lexical errors never abort the lexer; they surface as in-stream
//! [`TokenKind::Error`] tokens carrying a human-readable message, and the
//! parser folds them into its diagnostics.
mod token;
mod tokens;

pub use token::*;
pub use tokens::*;

use std::collections::HashMap;

use once_cell::sync::Lazy;

macro_rules! keyword {
    ($map:ident, $name:ident, $value:expr) => {
        $map.insert($value, TokenKind::$name);
    };
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();

    keyword!(m, Fn, "fn");
    keyword!(m, Var, "var");
    keyword!(m, Return, "return");
    keyword!(m, If, "if");
    keyword!(m, Else, "else");
    keyword!(m, For, "for");
    keyword!(m, While, "while");
    keyword!(m, Import, "import");
    keyword!(m, Nil, "nil");
    keyword!(m, And, "and");
    keyword!(m, Or, "or");
    keyword!(m, True, "true");
    keyword!(m, False, "false");
    keyword!(m, TyInt, "int");
    keyword!(m, TyLong, "long");
    keyword!(m, TyDouble, "double");
    keyword!(m, TyChar, "char");
    keyword!(m, TyStr, "str");
    keyword!(m, TyBool, "bool");
    keyword!(m, TyVoid, "void");

    m
});

pub struct Lexer<'a> {
    bytes: &'a [u8],
    position: usize,
    line: usize,
    col: usize,
    file: String,
    indent_stack: Vec<usize>,
    /// First observed indent increment; later increments must match it.
    indent_unit: Option<usize>,
    pending_dedents: usize,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, file: impl ToString) -> Self {
        Self {
            bytes: input.as_bytes(),
            position: 0,
            line: 1,
            col: 1,
            file: file.to_string(),
            indent_stack: vec![0],
            indent_unit: None,
            pending_dedents: 0,
            at_line_start: true,
        }
    }

    /// Lex the whole input, up to and including the end-of-input token.
    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = vec![];

        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Pull the next token. Layout markers, error tokens and the trailing
    /// end-of-input token all come out of this single interface.
    pub fn next_token(&mut self) -> Token {
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            return self.layout_token(TokenKind::Dedent);
        }

        if self.at_line_start {
            if let Some(token) = self.handle_line_start() {
                return token;
            }
        }

        self.skip_line_whitespace();

        let Some(byte) = self.peek() else {
            // Close all still-open blocks, one DEDENT per call.
            if self.indent_stack.len() > 1 {
                self.indent_stack.pop();
                return self.layout_token(TokenKind::Dedent);
            }
            return self.layout_token(TokenKind::Eof);
        };

        if byte == b'\n' {
            let token = self.layout_token(TokenKind::Newline);
            self.advance();
            self.line += 1;
            self.col = 1;
            self.at_line_start = true;
            return token;
        }

        self.scan_token()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.position + 1).copied()
    }

    fn advance(&mut self) -> u8 {
        let byte = self.bytes[self.position];
        self.position += 1;
        self.col += 1;
        byte
    }

    fn match_next(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            return true;
        }
        false
    }

    fn current_position(&self) -> Position {
        (self.file.clone(), self.line, self.col)
    }

    fn layout_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, "", self.current_position())
    }

    fn error_token(&self, message: impl ToString) -> Token {
        Token::new(TokenKind::Error, message, self.current_position())
    }

    /// Compare the leading whitespace of the next layout-relevant line to
    /// the indent stack and emit INDENT/DEDENT markers accordingly.
    /// Returns `None` when the line continues at the current level (or the
    /// input ended) and the caller should scan an ordinary token.
    fn handle_line_start(&mut self) -> Option<Token> {
        loop {
            let mut indent = 0;
            let mut pos = self.position;

            while let Some(byte) = self.bytes.get(pos) {
                match byte {
                    b' ' | b'\t' => {
                        indent += 1;
                        pos += 1;
                    }
                    b'\r' => pos += 1,
                    _ => break,
                }
            }

            let Some(byte) = self.bytes.get(pos).copied() else {
                self.position = pos;
                self.at_line_start = false;
                return None;
            };

            // Blank and comment-only lines are layout-irrelevant.
            if byte == b'\n' {
                self.position = pos + 1;
                self.line += 1;
                self.col = 1;
                continue;
            }
            if byte == b'/' && self.bytes.get(pos + 1) == Some(&b'/') {
                let mut end = pos;
                while end < self.bytes.len() && self.bytes[end] != b'\n' {
                    end += 1;
                }
                if end == self.bytes.len() {
                    self.position = end;
                    self.at_line_start = false;
                    return None;
                }
                self.position = end + 1;
                self.line += 1;
                self.col = 1;
                continue;
            }

            self.position = pos;
            self.col = indent + 1;
            self.at_line_start = false;

            let top = *self.indent_stack.last().expect("indent stack is never empty");

            if indent == top {
                return None;
            }

            if indent > top {
                let step = indent - top;
                match self.indent_unit {
                    None => self.indent_unit = Some(step),
                    Some(unit) if step != unit => {
                        return Some(self.error_token(format!(
                            "Inconsistent indentation: expected an increment of {unit} but got {step}"
                        )));
                    }
                    Some(_) => {}
                }
                self.indent_stack.push(indent);
                return Some(self.layout_token(TokenKind::Indent));
            }

            // indent < top: pop one level per emitted DEDENT.
            while let Some(&top) = self.indent_stack.last() {
                if indent == top {
                    break;
                }
                if indent > top {
                    return Some(self.error_token(format!(
                        "Inconsistent indentation: no enclosing block is indented by {indent}"
                    )));
                }
                self.indent_stack.pop();
                self.pending_dedents += 1;
            }
            self.pending_dedents -= 1;
            return Some(self.layout_token(TokenKind::Dedent));
        }
    }

    /// Skip spaces, tabs, carriage returns and line comments within the
    /// current logical line. The terminating newline is left in place.
    fn skip_line_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\r' => {
                    self.advance();
                }
                b'/' if self.peek_next() == Some(b'/') => {
                    while self.peek().is_some_and(|b| b != b'\n') {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn scan_token(&mut self) -> Token {
        let position = self.current_position();
        let start = self.position;
        let byte = self.advance();

        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier(start, position),
            b'0'..=b'9' => self.scan_number(start, position),
            b'"' => self.scan_string(start, position, TokenKind::Str),
            b'$' => {
                if self.match_next(b'"') {
                    self.scan_string(start, position, TokenKind::InterpStr)
                } else {
                    Token::new(TokenKind::Error, "Unexpected character '$'", position)
                }
            }
            b'\'' => self.scan_character(start, position),
            b'(' => Token::new(TokenKind::LParen, "(", position),
            b')' => Token::new(TokenKind::RParen, ")", position),
            b'{' => Token::new(TokenKind::LBrace, "{", position),
            b'}' => Token::new(TokenKind::RBrace, "}", position),
            b'[' => Token::new(TokenKind::LBracket, "[", position),
            b']' => Token::new(TokenKind::RBracket, "]", position),
            b',' => Token::new(TokenKind::Comma, ",", position),
            b'.' => Token::new(TokenKind::Dot, ".", position),
            b':' => Token::new(TokenKind::Colon, ":", position),
            b';' => Token::new(TokenKind::Semicolon, ";", position),
            b'*' => Token::new(TokenKind::Star, "*", position),
            b'/' => Token::new(TokenKind::Slash, "/", position),
            b'%' => Token::new(TokenKind::Percent, "%", position),
            b'+' => {
                if self.match_next(b'+') {
                    Token::new(TokenKind::PlusPlus, "++", position)
                } else {
                    Token::new(TokenKind::Plus, "+", position)
                }
            }
            b'-' => {
                if self.match_next(b'-') {
                    Token::new(TokenKind::MinusMinus, "--", position)
                } else if self.match_next(b'>') {
                    Token::new(TokenKind::Arrow, "->", position)
                } else {
                    Token::new(TokenKind::Minus, "-", position)
                }
            }
            b'=' => {
                if self.match_next(b'=') {
                    Token::new(TokenKind::Equal, "==", position)
                } else if self.match_next(b'>') {
                    Token::new(TokenKind::Arrow, "=>", position)
                } else {
                    Token::new(TokenKind::Assign, "=", position)
                }
            }
            b'!' => {
                if self.match_next(b'=') {
                    Token::new(TokenKind::NotEqual, "!=", position)
                } else {
                    Token::new(TokenKind::Bang, "!", position)
                }
            }
            b'<' => {
                if self.match_next(b'=') {
                    Token::new(TokenKind::LessEqual, "<=", position)
                } else {
                    Token::new(TokenKind::Less, "<", position)
                }
            }
            b'>' => {
                if self.match_next(b'=') {
                    Token::new(TokenKind::GreaterEqual, ">=", position)
                } else {
                    Token::new(TokenKind::Greater, ">", position)
                }
            }
            _ => Token::new(
                TokenKind::Error,
                format!("Unexpected character '{}'", byte as char),
                position,
            ),
        }
    }

    fn scan_identifier(&mut self, start: usize, position: Position) -> Token {
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.advance();
        }

        let lexeme = self.lexeme(start);

        match KEYWORDS.get(lexeme.as_str()) {
            Some(TokenKind::True) => {
                Token::with_literal(TokenKind::True, lexeme, Literal::Bool(true), position)
            }
            Some(TokenKind::False) => {
                Token::with_literal(TokenKind::False, lexeme, Literal::Bool(false), position)
            }
            Some(kind) => Token::new(*kind, lexeme, position),
            None => Token::new(TokenKind::Identifier, lexeme, position),
        }
    }

    fn scan_number(&mut self, start: usize, position: Position) -> Token {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }

        // A decimal point followed by digits makes this a double; an
        // optional trailing 'd' is accepted and consumed.
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.advance();
            }
            let digits = self.lexeme(start);
            self.match_next(b'd');

            return match digits.parse::<f64>() {
                Ok(value) => Token::with_literal(
                    TokenKind::Double,
                    self.lexeme(start),
                    Literal::Float(value),
                    position,
                ),
                Err(_) => Token::new(
                    TokenKind::Error,
                    format!("Invalid number literal '{digits}'"),
                    position,
                ),
            };
        }

        let digits = self.lexeme(start);
        let kind = if self.match_next(b'l') {
            TokenKind::Long
        } else {
            TokenKind::Int
        };

        match digits.parse::<i64>() {
            Ok(value) => {
                let literal = match kind {
                    TokenKind::Long => Literal::Long(value),
                    _ => Literal::Int(value),
                };
                Token::with_literal(kind, self.lexeme(start), literal, position)
            }
            Err(_) => Token::new(
                TokenKind::Error,
                format!("Number literal '{digits}' is too long"),
                position,
            ),
        }
    }

    fn scan_string(&mut self, start: usize, position: Position, kind: TokenKind) -> Token {
        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Token::new(TokenKind::Error, "Unterminated string", position);
                }
                Some(b'"') => {
                    self.advance();
                    return Token::with_literal(kind, self.lexeme(start), Literal::Str(value), position);
                }
                Some(b'\\') => {
                    self.advance();
                    let Some(escaped) = self.peek() else {
                        return Token::new(TokenKind::Error, "Unterminated string", position);
                    };
                    self.advance();
                    match escaped {
                        b'\\' => value.push('\\'),
                        b'n' => value.push('\n'),
                        b'r' => value.push('\r'),
                        b't' => value.push('\t'),
                        b'"' => value.push('"'),
                        other => {
                            return Token::new(
                                TokenKind::Error,
                                format!("Invalid escape sequence '\\{}'", other as char),
                                position,
                            );
                        }
                    }
                }
                Some(byte) => {
                    self.advance();
                    value.push(byte as char);
                }
            }
        }
    }

    fn scan_character(&mut self, start: usize, position: Position) -> Token {
        let value = match self.peek() {
            None | Some(b'\n') => {
                return Token::new(TokenKind::Error, "Unterminated character literal", position);
            }
            Some(b'\'') => {
                self.advance();
                return Token::new(TokenKind::Error, "Empty character literal", position);
            }
            Some(b'\\') => {
                self.advance();
                let Some(escaped) = self.peek() else {
                    return Token::new(TokenKind::Error, "Unterminated character literal", position);
                };
                self.advance();
                match escaped {
                    b'\\' => b'\\',
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'"' => b'"',
                    b'\'' => b'\'',
                    other => {
                        return Token::new(
                            TokenKind::Error,
                            format!("Invalid escape sequence '\\{}'", other as char),
                            position,
                        );
                    }
                }
            }
            Some(byte) => {
                self.advance();
                byte
            }
        };

        if !self.match_next(b'\'') {
            return Token::new(TokenKind::Error, "Unterminated character literal", position);
        }

        Token::with_literal(
            TokenKind::Char,
            self.lexeme(start),
            Literal::Char(value),
            position,
        )
    }

    fn lexeme(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.bytes[start..self.position]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input, "test.sn")
            .lex()
            .iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_lex_identifier() {
        let tokens = Lexer::new("letter", "test.sn").lex();

        assert_eq!(TokenKind::Identifier, tokens[0].kind);
        assert_eq!("letter", tokens[0].lexeme);
    }

    #[test]
    fn test_lex_keywords() {
        assert_eq!(
            vec![
                TokenKind::Fn,
                TokenKind::Var,
                TokenKind::While,
                TokenKind::TyInt,
                TokenKind::Eof
            ],
            kinds("fn var while int")
        );
    }

    #[test]
    fn test_lex_int_and_long() {
        let tokens = Lexer::new("1337 42l", "test.sn").lex();

        assert_eq!(TokenKind::Int, tokens[0].kind);
        assert_eq!(Some(Literal::Int(1337)), tokens[0].literal);
        assert_eq!(TokenKind::Long, tokens[1].kind);
        assert_eq!(Some(Literal::Long(42)), tokens[1].literal);
    }

    #[test]
    fn test_lex_double_with_suffix() {
        let tokens = Lexer::new("3.14d", "test.sn").lex();

        assert_eq!(TokenKind::Double, tokens[0].kind);
        assert_eq!(Some(Literal::Float(3.14)), tokens[0].literal);
        assert_eq!(TokenKind::Eof, tokens[1].kind);
    }

    #[test]
    fn test_lex_string_with_escapes() {
        let tokens = Lexer::new("\"hi\\n\"", "test.sn").lex();

        assert_eq!(TokenKind::Str, tokens[0].kind);
        assert_eq!(Some(Literal::Str("hi\n".to_string())), tokens[0].literal);
    }

    #[test]
    fn test_lex_invalid_escape() {
        let tokens = Lexer::new("\"\\q\"", "test.sn").lex();

        assert_eq!(TokenKind::Error, tokens[0].kind);
        assert!(tokens[0].lexeme.contains("Invalid escape sequence"));
    }

    #[test]
    fn test_lex_character() {
        let tokens = Lexer::new("'x' '\\n'", "test.sn").lex();

        assert_eq!(Some(Literal::Char(b'x')), tokens[0].literal);
        assert_eq!(Some(Literal::Char(b'\n')), tokens[1].literal);
    }

    #[test]
    fn test_lex_interpolated_string_is_tagged() {
        let tokens = Lexer::new("$\"i={i}\"", "test.sn").lex();

        assert_eq!(TokenKind::InterpStr, tokens[0].kind);
        assert_eq!(Some(Literal::Str("i={i}".to_string())), tokens[0].literal);
    }

    #[test]
    fn test_both_arrows_lex_to_one_kind() {
        assert_eq!(
            vec![TokenKind::Arrow, TokenKind::Arrow, TokenKind::Eof],
            kinds("-> =>")
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            vec![
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Assign,
                TokenKind::Bang,
                TokenKind::Eof
            ],
            kinds("++ -- == != <= >= = !")
        );
    }

    #[test]
    fn test_indent_and_dedent_are_symmetric() {
        let source = "fn main():void =>\n    var x:int = 1\n    if x < 2 =>\n        x = 2\nvar y:int = 3\n";
        let tokens = Lexer::new(source, "test.sn").lex();

        let indents = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Indent)
            .count();
        let dedents = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Dedent)
            .count();

        assert_eq!(indents, dedents);
        assert_eq!(2, indents);
    }

    #[test]
    fn test_two_dedents_before_eof() {
        // The file ends two levels deep without a trailing newline.
        let source = "if a =>\n    if b =>\n        c";
        let tokens = Lexer::new(source, "test.sn").lex();

        let tail: Vec<TokenKind> = tokens.iter().rev().take(3).map(|t| t.kind).collect();
        assert_eq!(
            vec![TokenKind::Eof, TokenKind::Dedent, TokenKind::Dedent],
            tail
        );
    }

    #[test]
    fn test_inconsistent_indentation_unit() {
        // First block indents by 2, the next one by 3.
        let source = "if a =>\n  x = 1\nif b =>\n   x = 2\n";
        let tokens = Lexer::new(source, "test.sn").lex();

        let error = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Error)
            .expect("expected an indentation error token");
        assert!(error.lexeme.contains("Inconsistent indentation"));
    }

    #[test]
    fn test_dedent_to_unknown_level_is_an_error() {
        let source = "if a =>\n    if b =>\n        x = 1\n      y = 2\n";
        let tokens = Lexer::new(source, "test.sn").lex();

        let error = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Error)
            .expect("expected an indentation error token");
        assert!(error.lexeme.contains("Inconsistent indentation"));
    }

    #[test]
    fn test_blank_and_comment_lines_are_layout_irrelevant() {
        let source = "if a =>\n    x = 1\n\n    // a comment\n    x = 2\n";
        let tokens = Lexer::new(source, "test.sn").lex();

        let indents = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Indent)
            .count();
        let dedents = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Dedent)
            .count();
        assert_eq!(1, indents);
        assert_eq!(1, dedents);
    }

    #[test]
    fn test_comment_does_not_consume_newline() {
        let tokens = Lexer::new("x = 1 // trailing\ny = 2\n", "test.sn").lex();

        let newlines = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Newline)
            .count();
        assert_eq!(2, newlines);
    }

    #[test]
    fn test_relexing_yields_the_same_kinds() {
        let source = "fn add(a:int, b:int):int =>\n    return a + b\n";
        assert_eq!(kinds(source), kinds(source));
    }

    #[test]
    fn test_line_positions() {
        let tokens = Lexer::new("a\nb\n", "test.sn").lex();

        assert_eq!(("test.sn".to_string(), 1, 1), tokens[0].position);
        // tokens[1] is the newline; `b` starts line 2.
        assert_eq!(2, tokens[2].position.1);
    }
}
