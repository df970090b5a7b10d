use cursor::{Cursor, Line};
use diagnostics::{Diagnostics, Location};

pub mod token;
pub use token::{Token, TokenData, TokenType};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[error("Unexpected character '{0}'.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
}

/// Turns source text into tokens.
///
/// Iterating yields tokens lazily and ends with exactly one `Eof` token. Lexical
/// errors never stop the scan: the offending input is skipped and the error is
/// kept until [`Scanner::scan_tokens`] hands it to a [`Diagnostics`].
#[derive(Debug)]
pub struct Scanner<'a> {
    start: Cursor<'a>,
    current: Cursor<'a>,
    errors: Vec<ScanError>,
    finished: bool,
}

/// Scans the whole source, reporting lexical errors to `diagnostics`.
pub fn scan<'a>(source: &'a str, diagnostics: &mut Diagnostics) -> Vec<Token<'a>> {
    Scanner::new(source).scan_tokens(diagnostics)
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        let cursor = Cursor::new(source);
        Self { start: cursor.clone(), current: cursor, errors: Vec::new(), finished: false }
    }

    pub fn scan_tokens(mut self, diagnostics: &mut Diagnostics) -> Vec<Token<'a>> {
        let tokens: Vec<_> = self.by_ref().collect();
        self.report(diagnostics);
        tokens
    }

    /// Hands the errors found so far to `diagnostics`.
    pub fn report(self, diagnostics: &mut Diagnostics) {
        for e in self.errors {
            diagnostics.report_lex_or_parse_issue(e.line, Location::Unknown, e.error);
        }
    }

    /// Errors found so far.
    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    fn error(&mut self, error: ScanErrorType) {
        log::trace!("Scan error on line {}: {:?}", self.current.line(), error);
        self.errors.push(ScanError { error, line: self.current.line() });
    }

    fn lexeme(&self) -> &'a str {
        self.start.slice_until(&self.current)
    }

    fn make_token(&self, data: TokenData<'a>) -> Token<'a> {
        let token = Token::new(data, self.lexeme(), self.current.line());
        log::trace!("Scanned {:?}", token);
        token
    }

    fn either(&mut self, second: char, matched: TokenData<'a>, single: TokenData<'a>) -> TokenData<'a> {
        if self.current.next_if_eq(second) {
            matched
        } else {
            single
        }
    }

    fn string(&mut self) -> Option<TokenData<'a>> {
        self.current.advance_while(|c| c != '"');
        if !self.current.next_if_eq('"') {
            self.error(ScanErrorType::UnterminatedString);
            return None;
        }

        let lexeme = self.lexeme();
        Some(Str(&lexeme[1..lexeme.len() - 1]))
    }

    fn number(&mut self) -> TokenData<'a> {
        self.current.advance_while(|c| c.is_ascii_digit());

        // A trailing '.' without digits is left for the next token
        if self.current.peek() == Some('.')
            && self.current.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.current.next();
            self.current.advance_while(|c| c.is_ascii_digit());
        }

        Number(self.lexeme().parse().expect("digits with an optional fraction are a valid f64"))
    }

    fn identifier(&mut self) -> TokenData<'a> {
        self.current.advance_while(is_identifier_char);
        TokenData::keyword(self.lexeme()).unwrap_or(Identifier)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }

        loop {
            self.start = self.current.clone();

            let Some(c) = self.current.next() else {
                self.finished = true;
                return Some(Token::eof(self.current.line()));
            };

            let data = match c {
                '(' => LeftParen,
                ')' => RightParen,
                '{' => LeftBrace,
                '}' => RightBrace,
                ',' => Comma,
                '.' => Dot,
                '-' => Minus,
                '+' => Plus,
                ';' => Semicolon,
                '*' => Star,

                '!' => self.either('=', BangEqual, Bang),
                '=' => self.either('=', EqualEqual, Equal),
                '<' => self.either('=', LessEqual, Less),
                '>' => self.either('=', GreaterEqual, Greater),

                '/' => {
                    if self.current.next_if_eq('/') {
                        // Comment
                        self.current.advance_while(|c| c != '\n');
                        continue;
                    }
                    Slash
                }

                // The cursor counts lines itself
                ' ' | '\r' | '\t' | '\n' => continue,

                '"' => match self.string() {
                    Some(data) => data,
                    None => continue,
                },

                d if d.is_ascii_digit() => self.number(),
                c if is_identifier_start(c) => self.identifier(),

                c => {
                    self.error(ScanErrorType::UnexpectedCharacter(c));
                    continue;
                }
            };

            return Some(self.make_token(data));
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut diagnostics = Diagnostics::default();
        let tokens = scan(source, &mut diagnostics);
        assert!(!diagnostics.has_issues(), "{}", diagnostics);
        tokens
    }

    fn types(source: &str) -> Vec<TokenType> {
        tokens(source).iter().map(Token::ty).collect()
    }

    fn eof(line: usize) -> Token<'static> {
        Token::eof(Line(line))
    }

    #[test]
    fn string_literals() {
        assert_eq!(
            tokens("\"hello world\""),
            vec![Token::new(Str("hello world"), "\"hello world\"", Line(1)), eof(1)]
        );

        assert_eq!(
            tokens("\"multi\nline\" 1"),
            vec![
                Token::new(Str("multi\nline"), "\"multi\nline\"", Line(2)),
                Token::new(Number(1.0), "1", Line(2)),
                eof(2),
            ]
        );

        assert_eq!(tokens("\"\""), vec![Token::new(Str(""), "\"\"", Line(1)), eof(1)]);
    }

    #[test]
    fn unterminated_string() {
        let mut diagnostics = Diagnostics::default();
        let tokens = scan("1 + \"abc\ndef", &mut diagnostics);

        assert_eq!(
            tokens.iter().map(Token::ty).collect::<Vec<_>>(),
            vec![TokenType::Number, TokenType::Plus, TokenType::Eof]
        );
        assert_eq!(diagnostics.to_string(), "[line 2] Error: Unterminated string.");
        assert!(diagnostics.had_parse_error());
    }

    #[test]
    fn two_char_tokens() {
        use TokenType::*;
        assert_eq!(
            types("! != = == < <= > >="),
            vec![Bang, BangEqual, Equal, EqualEqual, Less, LessEqual, Greater, GreaterEqual, Eof]
        );
        // maximal munch
        assert_eq!(types("!==="), vec![BangEqual, EqualEqual, Eof]);
        assert_eq!(types("<=="), vec![LessEqual, Equal, Eof]);
    }

    #[test]
    fn single_char_tokens() {
        use TokenType::*;
        assert_eq!(
            types("=(){},.-+;*/!<>"),
            vec![
                Equal, LeftParen, RightParen, LeftBrace, RightBrace, Comma, Dot, Minus, Plus,
                Semicolon, Star, Slash, Bang, Less, Greater, Eof
            ]
        );
    }

    #[test]
    fn comments() {
        assert_eq!(
            tokens("a // comment\nb // trailing"),
            vec![
                Token::new(Identifier, "a", Line(1)),
                Token::new(Identifier, "b", Line(2)),
                eof(2),
            ]
        );
        assert_eq!(tokens("//"), vec![eof(1)]);
    }

    #[test]
    fn numbers() {
        assert_eq!(
            tokens("123 45.67 0"),
            vec![
                Token::new(Number(123.0), "123", Line(1)),
                Token::new(Number(45.67), "45.67", Line(1)),
                Token::new(Number(0.0), "0", Line(1)),
                eof(1),
            ]
        );

        // The dot is only part of the number if a digit follows
        assert_eq!(
            tokens("1.foo"),
            vec![
                Token::new(Number(1.0), "1", Line(1)),
                Token::new(Dot, ".", Line(1)),
                Token::new(Identifier, "foo", Line(1)),
                eof(1),
            ]
        );
        assert_eq!(types("1."), vec![TokenType::Number, TokenType::Dot, TokenType::Eof]);

        // No signs or exponents
        assert_eq!(
            types("-1e5"),
            vec![TokenType::Minus, TokenType::Number, TokenType::Identifier, TokenType::Eof]
        );
    }

    #[test]
    fn identifiers_and_keywords() {
        use TokenType::*;
        assert_eq!(
            types("and class else false for fun if nil or print return super this true var while"),
            vec![
                And, Class, Else, False, For, Fun, If, Nil, Or, Print, Return, Super, This, True,
                Var, While, Eof
            ]
        );
        assert_eq!(
            tokens("_under score9 orchid"),
            vec![
                Token::new(TokenData::Identifier, "_under", Line(1)),
                Token::new(TokenData::Identifier, "score9", Line(1)),
                Token::new(TokenData::Identifier, "orchid", Line(1)),
                eof(1),
            ]
        );
    }

    #[test]
    fn unexpected_characters_are_skipped() {
        let mut diagnostics = Diagnostics::default();
        let tokens = scan("1 @ 2\n# $", &mut diagnostics);

        assert_eq!(
            tokens,
            vec![
                Token::new(Number(1.0), "1", Line(1)),
                Token::new(Number(2.0), "2", Line(1)),
                eof(2),
            ]
        );
        assert_eq!(
            diagnostics.to_string(),
            "[line 1] Error: Unexpected character '@'.\n\
             [line 2] Error: Unexpected character '#'.\n\
             [line 2] Error: Unexpected character '$'."
        );
    }

    #[test]
    fn scanning_is_total() {
        for source in ["", "\n\n", "\"", "@@@", "1 + (2", "é", "\"open\n\n", "// only"] {
            let mut diagnostics = Diagnostics::default();
            let tokens = scan(source, &mut diagnostics);
            assert_eq!(
                tokens.iter().filter(|t| t.ty() == TokenType::Eof).count(),
                1,
                "{source:?}"
            );
            assert_eq!(tokens.last().map(Token::ty), Some(TokenType::Eof));
        }
    }

    #[test]
    fn iterator_stops_after_eof() {
        let mut scanner = Scanner::new("1");
        assert_eq!(scanner.next().map(|t| t.ty()), Some(TokenType::Number));
        assert_eq!(scanner.next().map(|t| t.ty()), Some(TokenType::Eof));
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
        assert!(scanner.errors().is_empty());
    }

    #[test]
    fn lexemes_rescan_to_the_same_kind() {
        let source = "(1 + 2.5) * -x != \"s\" and !y <= z // c\n>= == = / . , ; { } nil";
        for token in tokens(source) {
            if token.ty() == TokenType::Eof {
                continue;
            }
            let rescanned = tokens(token.lexeme);
            assert_eq!(rescanned.len(), 2, "{:?}", token);
            assert_eq!(rescanned[0].ty(), token.ty());
            assert_eq!(rescanned[0].data, token.data);
        }
    }
}
