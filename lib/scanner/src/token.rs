use std::fmt::Display;

use cursor::Line;
use diagnostics::{Location, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub data: TokenData<'a>,
    pub lexeme: &'a str,
    pub line: Line,
}

impl<'a> Token<'a> {
    pub fn new(data: TokenData<'a>, lexeme: &'a str, line: Line) -> Token<'a> {
        Self { data, lexeme, line }
    }

    pub fn eof(line: Line) -> Token<'a> {
        Self::new(TokenData::Eof, "", line)
    }

    pub fn ty(&self) -> TokenType {
        TokenType::from(&self.data)
    }

    pub fn lexeme(&self) -> &'a str {
        self.lexeme
    }

    pub fn line(&self) -> Line {
        self.line
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

impl Position for Token<'_> {
    fn line(&self) -> Line {
        self.line
    }

    fn location(&self) -> Location {
        match self.data {
            TokenData::Eof => Location::End,
            _ => Location::Lexeme(self.lexeme.to_string()),
        }
    }
}

/// The kind of a token together with its decoded literal, if it has one.
/// [`TokenType`] is the same set of kinds without the payloads.
#[derive(Debug, Clone, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(name(TokenType), derive(Hash))]
pub enum TokenData<'a> {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    Str(&'a str),
    Number(f64),

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
    Eof,
}

impl<'a> TokenData<'a> {
    pub fn keyword(text: &str) -> Option<TokenData<'a>> {
        use TokenData::*;
        Some(match text {
            "and" => And,
            "class" => Class,
            "else" => Else,
            "false" => False,
            "for" => For,
            "fun" => Fun,
            "if" => If,
            "nil" => Nil,
            "or" => Or,
            "print" => Print,
            "return" => Return,
            "super" => Super,
            "this" => This,
            "true" => True,
            "var" => Var,
            "while" => While,
            _ => return None,
        })
    }
}

impl TokenType {
    pub fn is_binary_operator(self) -> bool {
        use TokenType::*;
        matches!(
            self,
            BangEqual
                | EqualEqual
                | Greater
                | GreaterEqual
                | Less
                | LessEqual
                | Minus
                | Plus
                | Slash
                | Star
        )
    }

    pub fn is_unary_operator(self) -> bool {
        matches!(self, TokenType::Bang | TokenType::Minus)
    }

    /// Keywords that begin a statement, used to find a recovery point after a
    /// parse error.
    pub fn starts_statement(self) -> bool {
        use TokenType::*;
        matches!(self, Class | Fun | Var | For | If | While | Print | Return)
    }
}
