mod expr;
pub mod printer;
pub mod visitor;

pub use expr::{Expr, LiteralValue};
pub use printer::AstPrinter;
pub use visitor::Visitor;

use diagnostics::Diagnostics;
use scanner::{Token, TokenData, TokenType};

use TokenType::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct ParseError<'a> {
    pub error: ParseErrorType,
    pub token: Token<'a>,
}

impl<'a> ParseError<'a> {
    fn new(error: ParseErrorType, token: Token<'a>) -> Self {
        Self { error, token }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expect end of expression.")]
    ExpectedEndOfExpression,
}

pub type Result<'a, T> = std::result::Result<T, ParseError<'a>>;

/// Recursive descent parser for a single expression.
///
/// ```text
/// expression → equality
/// equality   → comparison ( ( "!=" | "==" ) comparison )*
/// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
/// term       → factor ( ( "+" | "-" ) factor )*
/// factor     → unary ( ( "*" | "/" ) unary )*
/// unary      → ( "!" | "-" ) unary | primary
/// primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        // Every helper relies on a trailing Eof
        if tokens.last().map(Token::ty) != Some(Eof) {
            let line = tokens.last().map(Token::line).unwrap_or_default();
            tokens.push(Token::eof(line));
        }
        Self { tokens, current: 0 }
    }

    /// Parses one expression that spans all remaining tokens. The first error
    /// aborts the parse; it is reported to `diagnostics` and returned.
    pub fn parse(&mut self, diagnostics: &mut Diagnostics) -> Result<'a, Expr<'a>> {
        let result = self.expression().and_then(|expr| {
            self.consume_or_error(Eof, ParseErrorType::ExpectedEndOfExpression)?;
            Ok(expr)
        });

        result.map_err(|e| {
            log::trace!("Hit parse error: {:?}", e);
            diagnostics.report_parse_issue(&e.token, e.error);
            e
        })
    }

    /// Skips tokens until a likely statement boundary: just after a `;`, or
    /// in front of a keyword that starts a statement, or at the end.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().ty() == Semicolon {
                return;
            }

            if self.peek().starts_statement() {
                return;
            }

            self.advance();
        }
    }

    fn expression(&mut self) -> Result<'a, Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<'a, Expr<'a>> {
        let mut expr = self.comparison()?;

        while let BangEqual | EqualEqual = self.peek() {
            let operator = self.advance();
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<'a, Expr<'a>> {
        let mut expr = self.term()?;

        while let Greater | GreaterEqual | Less | LessEqual = self.peek() {
            let operator = self.advance();
            let right = self.term()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<'a, Expr<'a>> {
        let mut expr = self.factor()?;

        while let Plus | Minus = self.peek() {
            let operator = self.advance();
            let right = self.factor()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<'a, Expr<'a>> {
        let mut expr = self.unary()?;

        while let Star | Slash = self.peek() {
            let operator = self.advance();
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<'a, Expr<'a>> {
        if let Bang | Minus = self.peek() {
            let operator = self.advance();
            let right = self.unary()?;
            return Ok(Expr::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<'a, Expr<'a>> {
        let literal = match self.peek_token().data.clone() {
            TokenData::False => LiteralValue::Boolean(false),
            TokenData::True => LiteralValue::Boolean(true),
            TokenData::Nil => LiteralValue::Nil,
            TokenData::Number(n) => LiteralValue::Number(n),
            TokenData::Str(s) => LiteralValue::Str(s),
            TokenData::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume_or_error(RightParen, ParseErrorType::ExpectedRightParen)?;
                return Ok(Expr::grouping(expr));
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorType::ExpectedExpression,
                    self.peek_token().clone(),
                ))
            }
        };

        self.advance();
        Ok(Expr::Literal(literal))
    }
}

// Helpers
impl<'a> Parser<'a> {
    fn consume(&mut self, ty: TokenType) -> Option<Token<'a>> {
        (self.peek() == ty).then(|| self.advance())
    }

    fn consume_or_error(&mut self, ty: TokenType, error: ParseErrorType) -> Result<'a, Token<'a>> {
        match self.consume(ty) {
            Some(token) => Ok(token),
            None => Err(ParseError::new(error, self.peek_token().clone())),
        }
    }

    fn peek_token(&self) -> &Token<'a> {
        &self.tokens[self.current]
    }

    fn peek(&self) -> TokenType {
        self.peek_token().ty()
    }

    fn previous(&self) -> &Token<'a> {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Returns the current token and moves past it, but never past `Eof`.
    fn advance(&mut self) -> Token<'a> {
        let token = self.peek_token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek() == Eof
    }
}
