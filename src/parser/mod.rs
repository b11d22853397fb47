//! Parser for Sn.
//!
//! A recursive-descent parser over the lexer's token stream, using one
//! token of look-ahead. Blocks are delimited by an arrow (`=>` or `->`)
//! followed by either a single inline statement or a NEWLINE/INDENT …
//! DEDENT group; expressions use precedence climbing; interpolated
//! strings are split into their parts here, once, so later stages never
//! re-parse anything.
//!
//! On a parse error the parser records a diagnostic and skips ahead to
//! the next newline or statement-introducing keyword, so a single run
//! surfaces as many problems as possible.
pub mod ast;

use std::{error::Error, fmt::Display};

use crate::lexer::{Lexer, Literal, Position, Token, TokenKind, Tokens};

use self::ast::{
    ArrayAccess, ArrayLiteral, Assignment, Ast, BinaryExpression, BinaryOperator, Block,
    CallExpression, Expression, ForLoop, FunctionDeclaration, IfStatement, Import,
    InterpolatedString, InterpolationPart, LiteralExpression, Parameter, ReturnStatement,
    Statement, StepExpression, TypeName, UnaryExpression, UnaryOperator, Variable,
    VariableDeclaration, WhileLoop,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (file, line, col) = &self.position;
        write!(f, "{} ({}:{}:{})", self.message, file, line, col)
    }
}

impl Error for ParseError {}

type PResult<T> = Result<T, ParseError>;

pub struct Parser {
    tokens: Tokens<Token>,
    file: String,
    errors: Vec<ParseError>,
    /// Set when the statement just parsed ended by consuming a DEDENT;
    /// such statements need no further terminator.
    just_closed_block: bool,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: impl ToString) -> Self {
        Self {
            tokens: Tokens::new(tokens),
            file: file.to_string(),
            errors: vec![],
            just_closed_block: false,
        }
    }

    /// Parse a whole module. All diagnostics of the run are returned
    /// together; an `Ok` therefore means a fully well-formed module.
    pub fn parse(mut self) -> Result<Ast<()>, Vec<ParseError>> {
        let mut nodes = vec![];

        loop {
            self.skip_newlines();
            if self.peek_kind() == TokenKind::Eof {
                break;
            }

            match self.parse_statement(true) {
                Ok(statement) => {
                    nodes.push(statement);
                    if let Err(error) = self.expect_statement_end() {
                        self.errors.push(error);
                        self.synchronize();
                    }
                }
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(Ast::from_nodes(nodes, self.file))
        } else {
            Err(self.errors)
        }
    }

    fn peek(&mut self) -> Option<Token> {
        self.tokens.peek()
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.tokens
            .peek()
            .map(|token| token.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn next_token(&mut self) -> Token {
        self.tokens.next().unwrap_or_else(|| {
            Token::new(TokenKind::Eof, "", (self.file.clone(), 0, 0))
        })
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.next_token();
            return true;
        }
        false
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        let token = self.next_token();
        if token.kind == kind {
            return Ok(token);
        }
        if token.kind == TokenKind::Error {
            return Err(ParseError {
                message: token.lexeme,
                position: token.position,
            });
        }
        Err(ParseError {
            message: format!("Expected {what} but found {token}"),
            position: token.position,
        })
    }

    fn skip_newlines(&mut self) {
        while self.peek_kind() == TokenKind::Newline {
            self.next_token();
        }
    }

    /// Consume the terminator of the statement just parsed: a newline or
    /// semicolon, or (without consuming) a DEDENT or end-of-input, so no
    /// trailing newline is required.
    fn expect_statement_end(&mut self) -> PResult<()> {
        if self.just_closed_block {
            self.just_closed_block = false;
            return Ok(());
        }

        let Some(token) = self.peek() else {
            return Ok(());
        };
        match token.kind {
            TokenKind::Newline | TokenKind::Semicolon => {
                self.next_token();
                Ok(())
            }
            TokenKind::Dedent | TokenKind::Eof => Ok(()),
            TokenKind::Error => {
                self.next_token();
                Err(ParseError {
                    message: token.lexeme,
                    position: token.position,
                })
            }
            _ => Err(ParseError {
                message: format!("Expected end of statement but found {token}"),
                position: token.position,
            }),
        }
    }

    /// Skip ahead to the next newline or statement-introducing keyword so
    /// parsing can resume after an error.
    fn synchronize(&mut self) {
        loop {
            let Some(token) = self.peek() else { return };
            match token.kind {
                TokenKind::Newline | TokenKind::Semicolon => {
                    self.next_token();
                    return;
                }
                TokenKind::Dedent | TokenKind::Eof => return,
                TokenKind::Fn
                | TokenKind::Var
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Import => return,
                _ => {
                    self.next_token();
                }
            }
        }
    }

    fn parse_statement(&mut self, top_level: bool) -> PResult<Statement<()>> {
        self.just_closed_block = false;

        let Some(token) = self.peek() else {
            return Err(ParseError {
                message: "Unexpected end of input".to_string(),
                position: (self.file.clone(), 0, 0),
            });
        };

        match token.kind {
            TokenKind::Error => {
                self.next_token();
                Err(ParseError {
                    message: token.lexeme,
                    position: token.position,
                })
            }
            TokenKind::Import => self.parse_import(),
            TokenKind::Fn => {
                if !top_level {
                    self.next_token();
                    return Err(ParseError {
                        message: "Functions may only be declared at the top level".to_string(),
                        position: token.position,
                    });
                }
                self.parse_function()
            }
            TokenKind::Var => self.parse_variable_declaration(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            _ => {
                let expression = self.parse_expression()?;
                Ok(Statement::Expression(expression))
            }
        }
    }

    fn parse_import(&mut self) -> PResult<Statement<()>> {
        let keyword = self.expect(TokenKind::Import, "'import'")?;
        let name = self.expect(TokenKind::Identifier, "a module name")?;

        Ok(Statement::Import(Import {
            module: name.lexeme,
            position: keyword.position,
        }))
    }

    fn parse_function(&mut self) -> PResult<Statement<()>> {
        let keyword = self.expect(TokenKind::Fn, "'fn'")?;
        let name = self.expect(TokenKind::Identifier, "a function name")?;

        self.expect(TokenKind::LParen, "'('")?;
        let mut params = vec![];
        if self.peek_kind() != TokenKind::RParen {
            loop {
                let param_name = self.expect(TokenKind::Identifier, "a parameter name")?;
                self.expect(TokenKind::Colon, "':'")?;
                let type_name = self.parse_type_name()?;
                params.push(Parameter {
                    name: param_name.lexeme,
                    type_name,
                    position: param_name.position,
                });
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        self.expect(TokenKind::Colon, "':'")?;
        let return_type = self.parse_type_name()?;
        self.expect(TokenKind::Arrow, "'=>' or '->'")?;

        let body = self.parse_arrow_block(true)?;

        Ok(Statement::Function(FunctionDeclaration {
            name: name.lexeme,
            params,
            return_type,
            body,
            info: (),
            position: keyword.position,
        }))
    }

    fn parse_variable_declaration(&mut self) -> PResult<Statement<()>> {
        let keyword = self.expect(TokenKind::Var, "'var'")?;
        let name = self.expect(TokenKind::Identifier, "a variable name")?;
        self.expect(TokenKind::Colon, "':'")?;
        let type_name = self.parse_type_name()?;

        let initializer = if self.matches(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Statement::VariableDeclaration(VariableDeclaration {
            name: name.lexeme,
            type_name,
            initializer,
            info: (),
            position: keyword.position,
        }))
    }

    fn parse_return(&mut self) -> PResult<Statement<()>> {
        let keyword = self.expect(TokenKind::Return, "'return'")?;

        let value = match self.peek_kind() {
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Dedent | TokenKind::Eof => None,
            _ => Some(self.parse_expression()?),
        };

        Ok(Statement::Return(ReturnStatement {
            value,
            position: keyword.position,
        }))
    }

    fn parse_if(&mut self) -> PResult<Statement<()>> {
        let keyword = self.expect(TokenKind::If, "'if'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Arrow, "'=>' or '->'")?;
        let then_block = self.parse_arrow_block(false)?;

        // An `else` may follow inline, or on the line after the indented
        // block.
        let checkpoint = self.tokens.get_index();
        let closed = self.just_closed_block;
        self.skip_newlines();
        let else_block = if self.matches(TokenKind::Else) {
            self.expect(TokenKind::Arrow, "'=>' or '->'")?;
            Some(self.parse_arrow_block(false)?)
        } else {
            self.tokens.set_index(checkpoint);
            self.just_closed_block = closed;
            None
        };

        Ok(Statement::If(IfStatement {
            condition,
            then_block,
            else_block,
            position: keyword.position,
        }))
    }

    fn parse_while(&mut self) -> PResult<Statement<()>> {
        let keyword = self.expect(TokenKind::While, "'while'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Arrow, "'=>' or '->'")?;
        let body = self.parse_arrow_block(false)?;

        Ok(Statement::While(WhileLoop {
            condition,
            body,
            position: keyword.position,
        }))
    }

    fn parse_for(&mut self) -> PResult<Statement<()>> {
        let keyword = self.expect(TokenKind::For, "'for'")?;

        let initializer = match self.peek_kind() {
            TokenKind::Semicolon => None,
            TokenKind::Var => Some(self.parse_variable_declaration()?),
            _ => Some(Statement::Expression(self.parse_expression()?)),
        };
        self.expect(TokenKind::Semicolon, "';'")?;

        let condition = match self.peek_kind() {
            TokenKind::Semicolon => None,
            _ => Some(self.parse_expression()?),
        };
        self.expect(TokenKind::Semicolon, "';'")?;

        let increment = match self.peek_kind() {
            TokenKind::Arrow => None,
            _ => Some(self.parse_expression()?),
        };
        self.expect(TokenKind::Arrow, "'=>' or '->'")?;

        let body = self.parse_arrow_block(false)?;

        Ok(Statement::For(Box::new(ForLoop {
            initializer,
            condition,
            increment,
            body,
            position: keyword.position,
        })))
    }

    fn parse_type_name(&mut self) -> PResult<TypeName> {
        let token = self.next_token();
        let mut type_name = match token.kind {
            TokenKind::TyInt
            | TokenKind::TyLong
            | TokenKind::TyDouble
            | TokenKind::TyChar
            | TokenKind::TyStr
            | TokenKind::TyBool
            | TokenKind::TyVoid => TypeName::Primitive(token.lexeme),
            _ => {
                return Err(ParseError {
                    message: format!("Expected a type but found {token}"),
                    position: token.position,
                });
            }
        };

        while self.matches(TokenKind::LBracket) {
            self.expect(TokenKind::RBracket, "']'")?;
            type_name = TypeName::Array(Box::new(type_name));
        }

        Ok(type_name)
    }

    /// Parse the body introduced by an arrow: either `NEWLINE INDENT …
    /// DEDENT`, or one inline statement (`multi` additionally allows a
    /// `;`-separated inline sequence, as used for function bodies).
    fn parse_arrow_block(&mut self, multi: bool) -> PResult<Block<()>> {
        let position = self
            .peek()
            .map(|token| token.position)
            .unwrap_or_else(|| (self.file.clone(), 0, 0));

        if self.matches(TokenKind::Newline) {
            self.expect(TokenKind::Indent, "an indented block")?;

            let mut statements = vec![];
            loop {
                self.skip_newlines();
                match self.peek_kind() {
                    TokenKind::Dedent => {
                        self.next_token();
                        break;
                    }
                    TokenKind::Eof => break,
                    _ => {}
                }

                match self.parse_statement(false) {
                    Ok(statement) => {
                        statements.push(statement);
                        if let Err(error) = self.expect_statement_end() {
                            self.errors.push(error);
                            self.synchronize();
                        }
                    }
                    Err(error) => {
                        self.errors.push(error);
                        self.synchronize();
                    }
                }
            }

            self.just_closed_block = true;
            return Ok(Block {
                statements,
                position,
            });
        }

        let mut statements = vec![self.parse_statement(false)?];
        if multi {
            while self.matches(TokenKind::Semicolon) {
                match self.peek_kind() {
                    TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof | TokenKind::Else => {
                        break
                    }
                    _ => statements.push(self.parse_statement(false)?),
                }
            }
        }

        Ok(Block {
            statements,
            position,
        })
    }

    pub fn parse_expression(&mut self) -> PResult<Expression<()>> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> PResult<Expression<()>> {
        let expression = self.parse_or()?;

        if self.matches(TokenKind::Assign) {
            // Right-associative.
            let value = self.parse_assignment()?;
            return match expression {
                Expression::Variable(variable) => Ok(Expression::Assign(Box::new(Assignment {
                    name: variable.name,
                    value,
                    info: (),
                    position: variable.position,
                }))),
                other => Err(ParseError {
                    message: "Invalid assignment target".to_string(),
                    position: other.position(),
                }),
            };
        }

        Ok(expression)
    }

    fn parse_or(&mut self) -> PResult<Expression<()>> {
        let mut left = self.parse_and()?;

        while self.peek_kind() == TokenKind::Or {
            let token = self.next_token();
            let right = self.parse_and()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                operator: BinaryOperator::Or,
                left,
                right,
                info: (),
                position: token.position,
            }));
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> PResult<Expression<()>> {
        let mut left = self.parse_comparison()?;

        while self.peek_kind() == TokenKind::And {
            let token = self.next_token();
            let right = self.parse_comparison()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                operator: BinaryOperator::And,
                left,
                right,
                info: (),
                position: token.position,
            }));
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> PResult<Expression<()>> {
        let mut left = self.parse_term()?;

        loop {
            let operator = match self.peek_kind() {
                TokenKind::Equal => BinaryOperator::Equal,
                TokenKind::NotEqual => BinaryOperator::NotEqual,
                TokenKind::Less => BinaryOperator::LessThan,
                TokenKind::LessEqual => BinaryOperator::LessOrEqual,
                TokenKind::Greater => BinaryOperator::GreaterThan,
                TokenKind::GreaterEqual => BinaryOperator::GreaterOrEqual,
                _ => break,
            };
            let token = self.next_token();
            let right = self.parse_term()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                operator,
                left,
                right,
                info: (),
                position: token.position,
            }));
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> PResult<Expression<()>> {
        let mut left = self.parse_factor()?;

        loop {
            let operator = match self.peek_kind() {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            let token = self.next_token();
            let right = self.parse_factor()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                operator,
                left,
                right,
                info: (),
                position: token.position,
            }));
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> PResult<Expression<()>> {
        let mut left = self.parse_unary()?;

        loop {
            let operator = match self.peek_kind() {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                TokenKind::Percent => BinaryOperator::Modulo,
                _ => break,
            };
            let token = self.next_token();
            let right = self.parse_unary()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                operator,
                left,
                right,
                info: (),
                position: token.position,
            }));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Expression<()>> {
        let operator = match self.peek_kind() {
            TokenKind::Minus => UnaryOperator::Negate,
            TokenKind::Bang => UnaryOperator::Not,
            _ => return self.parse_postfix(),
        };
        let token = self.next_token();
        let operand = self.parse_unary()?;

        Ok(Expression::Unary(Box::new(UnaryExpression {
            operator,
            operand,
            info: (),
            position: token.position,
        })))
    }

    fn parse_postfix(&mut self) -> PResult<Expression<()>> {
        let mut expression = self.parse_primary()?;

        loop {
            match self.peek_kind() {
                TokenKind::LParen => {
                    let token = self.next_token();
                    let mut args = vec![];
                    if self.peek_kind() != TokenKind::RParen {
                        loop {
                            args.push(self.parse_expression()?);
                            if !self.matches(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(TokenKind::RParen, "')'")?;
                    expression = Expression::Call(Box::new(CallExpression {
                        callee: expression,
                        args,
                        info: (),
                        position: token.position,
                    }));
                }
                TokenKind::LBracket => {
                    let token = self.next_token();
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    expression = Expression::ArrayAccess(Box::new(ArrayAccess {
                        array: expression,
                        index,
                        info: (),
                        position: token.position,
                    }));
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let token = self.next_token();
                    if !matches!(expression, Expression::Variable(_)) {
                        return Err(ParseError {
                            message: format!("Invalid operand of '{}'", token.lexeme),
                            position: token.position,
                        });
                    }
                    let step = Box::new(StepExpression {
                        operand: expression,
                        info: (),
                        position: token.position.clone(),
                    });
                    expression = if token.kind == TokenKind::PlusPlus {
                        Expression::Increment(step)
                    } else {
                        Expression::Decrement(step)
                    };
                }
                _ => break,
            }
        }

        Ok(expression)
    }

    fn parse_primary(&mut self) -> PResult<Expression<()>> {
        let token = self.next_token();

        let literal = |value: Literal, token: &Token| {
            Expression::Literal(LiteralExpression {
                value,
                info: (),
                position: token.position.clone(),
            })
        };

        match token.kind {
            TokenKind::Int
            | TokenKind::Long
            | TokenKind::Double
            | TokenKind::Char
            | TokenKind::Str
            | TokenKind::True
            | TokenKind::False => {
                let value = token
                    .literal
                    .clone()
                    .expect("literal token without payload");
                Ok(literal(value, &token))
            }
            TokenKind::Nil => Ok(literal(Literal::Nil, &token)),
            TokenKind::InterpStr => self.parse_interpolation(&token),
            TokenKind::Identifier => Ok(Expression::Variable(Variable {
                name: token.lexeme,
                info: (),
                position: token.position,
            })),
            TokenKind::LParen => {
                let expression = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expression)
            }
            TokenKind::LBracket => {
                let mut elements = vec![];
                if self.peek_kind() != TokenKind::RBracket {
                    loop {
                        elements.push(self.parse_expression()?);
                        if !self.matches(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RBracket, "']'")?;
                Ok(Expression::Array(ArrayLiteral {
                    elements,
                    info: (),
                    position: token.position,
                }))
            }
            TokenKind::Error => Err(ParseError {
                message: token.lexeme,
                position: token.position,
            }),
            _ => Err(ParseError {
                message: format!("Unexpected token {token}"),
                position: token.position,
            }),
        }
    }

    /// Split the raw content of an interpolated string into literal
    /// fragments and embedded expressions. Each `{…}` section is parsed
    /// by a fresh lexer/parser over the enclosed bytes.
    fn parse_interpolation(&mut self, token: &Token) -> PResult<Expression<()>> {
        let Some(Literal::Str(content)) = token.literal.clone() else {
            return Err(ParseError {
                message: "Malformed interpolated string".to_string(),
                position: token.position.clone(),
            });
        };

        let mut parts = vec![];
        let mut rest = content.as_str();

        loop {
            match rest.find('{') {
                None => {
                    if !rest.is_empty() {
                        parts.push(InterpolationPart::Fragment(rest.to_string()));
                    }
                    break;
                }
                Some(open) => {
                    if open > 0 {
                        parts.push(InterpolationPart::Fragment(rest[..open].to_string()));
                    }
                    let after = &rest[open + 1..];
                    let Some(close) = after.find('}') else {
                        return Err(ParseError {
                            message: "Unterminated '{' in interpolated string".to_string(),
                            position: token.position.clone(),
                        });
                    };
                    let expression = self.parse_embedded(&after[..close], &token.position)?;
                    parts.push(InterpolationPart::Expression(expression));
                    rest = &after[close + 1..];
                }
            }
        }

        Ok(Expression::Interpolated(InterpolatedString {
            parts,
            info: (),
            position: token.position.clone(),
        }))
    }

    fn parse_embedded(&self, source: &str, position: &Position) -> PResult<Expression<()>> {
        // Leading whitespace would otherwise look like indentation to the
        // sub-lexer.
        let source = source.trim();
        let tokens = Lexer::new(source, self.file.clone()).lex();
        let mut parser = Parser::new(tokens, self.file.clone());

        let expression = parser.parse_expression().map_err(|error| ParseError {
            message: error.message,
            position: position.clone(),
        })?;

        parser.skip_newlines();
        if parser.peek_kind() != TokenKind::Eof {
            return Err(ParseError {
                message: format!("Unexpected input after interpolated expression '{source}'"),
                position: position.clone(),
            });
        }

        Ok(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_source(source: &str) -> Result<Ast<()>, Vec<ParseError>> {
        let tokens = Lexer::new(source, "test.sn").lex();
        Parser::new(tokens, "test.sn").parse()
    }

    fn parse_expr(source: &str) -> Expression<()> {
        let tokens = Lexer::new(source, "test.sn").lex();
        let mut parser = Parser::new(tokens, "test.sn");
        parser.parse_expression().expect("expression should parse")
    }

    #[test]
    fn test_parse_inline_factorial() {
        let source = "fn factorial(n:int):int => if n <= 1 => return 1; return n * factorial(n - 1)\n";
        let ast = parse_source(source).expect("factorial should parse");
        let nodes = ast.nodes();

        let Statement::Function(function) = &nodes[0] else {
            panic!("expected a function, got {:?}", nodes[0]);
        };
        assert_eq!("factorial", function.name);
        assert_eq!(1, function.params.len());
        assert_eq!(TypeName::Primitive("int".to_string()), function.return_type);
        // The inline body holds the `if` and the unconditional return.
        assert_eq!(2, function.body.statements.len());
        let Statement::If(if_statement) = &function.body.statements[0] else {
            panic!("expected an if statement");
        };
        assert_eq!(1, if_statement.then_block.statements.len());
    }

    #[test]
    fn test_parse_indented_function() {
        let source = "fn main():void =>\n    var x:int = 1\n    print($\"{x}\")\n";
        let ast = parse_source(source).expect("should parse");

        let Statement::Function(function) = &ast.nodes()[0] else {
            panic!("expected a function");
        };
        assert_eq!(2, function.body.statements.len());
    }

    #[test]
    fn test_parse_multiplicative_precedence() {
        let Expression::Binary(outer) = parse_expr("1 + 2 * 3") else {
            panic!("expected a binary expression");
        };

        assert_eq!(BinaryOperator::Add, outer.operator);
        let Expression::Binary(right) = &outer.right else {
            panic!("expected the product on the right");
        };
        assert_eq!(BinaryOperator::Multiply, right.operator);
    }

    #[test]
    fn test_parse_logical_precedence() {
        let Expression::Binary(outer) = parse_expr("a < b and c or d") else {
            panic!("expected a binary expression");
        };

        assert_eq!(BinaryOperator::Or, outer.operator);
        let Expression::Binary(left) = &outer.left else {
            panic!("expected the conjunction on the left");
        };
        assert_eq!(BinaryOperator::And, left.operator);
    }

    #[test]
    fn test_parse_assignment_is_right_associative() {
        let Expression::Assign(outer) = parse_expr("a = b = 1") else {
            panic!("expected an assignment");
        };

        assert_eq!("a", outer.name);
        assert!(matches!(outer.value, Expression::Assign(_)));
    }

    #[test]
    fn test_invalid_assignment_target() {
        let tokens = Lexer::new("1 = 2", "test.sn").lex();
        let mut parser = Parser::new(tokens, "test.sn");
        let error = parser.parse_expression().unwrap_err();

        assert!(error.message.contains("Invalid assignment target"));
    }

    #[test]
    fn test_parse_postfix_increment() {
        let expression = parse_expr("i++");
        assert!(matches!(expression, Expression::Increment(_)));

        let tokens = Lexer::new("f()++", "test.sn").lex();
        let mut parser = Parser::new(tokens, "test.sn");
        assert!(parser.parse_expression().is_err());
    }

    #[test]
    fn test_parse_interpolation_parts() {
        let Expression::Interpolated(interpolated) = parse_expr("$\"i={i} done\"") else {
            panic!("expected an interpolated string");
        };

        assert_eq!(3, interpolated.parts.len());
        assert!(matches!(
            &interpolated.parts[0],
            InterpolationPart::Fragment(f) if f == "i="
        ));
        assert!(matches!(
            &interpolated.parts[1],
            InterpolationPart::Expression(Expression::Variable(v)) if v.name == "i"
        ));
        assert!(matches!(
            &interpolated.parts[2],
            InterpolationPart::Fragment(f) if f == " done"
        ));
    }

    #[test]
    fn test_parse_interpolation_with_call() {
        let Expression::Interpolated(interpolated) = parse_expr("$\"{factorial(5)}\"") else {
            panic!("expected an interpolated string");
        };

        assert_eq!(1, interpolated.parts.len());
        assert!(matches!(
            &interpolated.parts[0],
            InterpolationPart::Expression(Expression::Call(_))
        ));
    }

    #[test]
    fn test_unterminated_interpolation_brace() {
        let tokens = Lexer::new("$\"x={y\"", "test.sn").lex();
        let mut parser = Parser::new(tokens, "test.sn");
        let error = parser.parse_expression().unwrap_err();

        assert!(error.message.contains("Unterminated '{'"));
    }

    #[test]
    fn test_parse_for_loop() {
        let source = "fn f():void =>\n    for var i:int = 0; i < 3; i++ =>\n        print($\"{i}\")\n";
        let ast = parse_source(source).expect("should parse");

        let Statement::Function(function) = &ast.nodes()[0] else {
            panic!("expected a function");
        };
        let Statement::For(for_loop) = &function.body.statements[0] else {
            panic!("expected a for loop");
        };
        assert!(for_loop.initializer.is_some());
        assert!(for_loop.condition.is_some());
        assert!(matches!(for_loop.increment, Some(Expression::Increment(_))));
    }

    #[test]
    fn test_parse_else_after_indented_block() {
        let source = "fn f():void =>\n    if a =>\n        x = 1\n    else =>\n        x = 2\n";
        let ast = parse_source(source).expect("should parse");

        let Statement::Function(function) = &ast.nodes()[0] else {
            panic!("expected a function");
        };
        let Statement::If(if_statement) = &function.body.statements[0] else {
            panic!("expected an if");
        };
        assert!(if_statement.else_block.is_some());
    }

    #[test]
    fn test_parse_array_type_and_literal() {
        let source = "var xs:int[] = [1, 2, 3]\n";
        let ast = parse_source(source).expect("should parse");

        let Statement::VariableDeclaration(declaration) = &ast.nodes()[0] else {
            panic!("expected a declaration");
        };
        assert_eq!(
            TypeName::Array(Box::new(TypeName::Primitive("int".to_string()))),
            declaration.type_name
        );
        assert!(matches!(
            declaration.initializer,
            Some(Expression::Array(_))
        ));
    }

    #[test]
    fn test_parse_import() {
        let ast = parse_source("import math\n").expect("should parse");
        assert!(matches!(ast.nodes()[0], Statement::Import(_)));
    }

    #[test]
    fn test_missing_arrow_is_an_error() {
        let errors = parse_source("fn f():void\n    return\n").unwrap_err();
        assert!(errors[0].message.contains("'=>' or '->'"));
    }

    #[test]
    fn test_errors_on_later_lines_are_still_reported() {
        // Two disjoint malformed statements on separate lines.
        let errors = parse_source("var x:\nvar y:\n").unwrap_err();
        assert_eq!(2, errors.len());
    }

    #[test]
    fn test_lexical_error_becomes_a_diagnostic() {
        let errors = parse_source("var x:int = @\n").unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.message.contains("Unexpected character")));
    }

    #[test]
    fn test_no_trailing_newline_required() {
        let ast = parse_source("fn f():void =>\n    return").expect("should parse");
        assert_eq!(1, ast.nodes().len());
    }
}
