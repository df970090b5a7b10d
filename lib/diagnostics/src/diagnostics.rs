use std::fmt::Display;

use itertools::Itertools;

pub use cursor::Line;

/// Where on a line an issue was found, rendered as a suffix of `Error`.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum Location {
    #[display(fmt = "")]
    Unknown,
    #[display(fmt = " at end")]
    End,
    #[display(fmt = " at '{}'", _0)]
    Lexeme(String),
}

/// Anything that can point at a place in the source, usually a token.
pub trait Position {
    fn line(&self) -> Line;
    fn location(&self) -> Location;
}

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum Diagnostic {
    #[error("[line {line}] Error{location}: {message}")]
    LexOrParse { line: Line, location: Location, message: String },
    #[error("[line {line}] Runtime error{location}: {message}")]
    Runtime { line: Line, location: Location, message: String },
}

impl Diagnostic {
    pub fn line(&self) -> Line {
        match self {
            Diagnostic::LexOrParse { line, .. } | Diagnostic::Runtime { line, .. } => *line,
        }
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, Diagnostic::Runtime { .. })
    }
}

/// Collects every issue found while running one piece of source.
///
/// One collector belongs to one session. The host reads the flags after a
/// run to pick an exit status and calls [`Diagnostics::reset`] before the next
/// line in interactive mode.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    issues: Vec<Diagnostic>,
    had_parse_error: bool,
    had_runtime_error: bool,
}

/// Exit status for a lexical or parse error.
pub const EXIT_PARSE_ERROR: u8 = 65;
/// Exit status for a runtime error.
pub const EXIT_RUNTIME_ERROR: u8 = 70;

impl Diagnostics {
    pub fn report_lex_or_parse_issue(
        &mut self,
        line: Line,
        location: Location,
        message: impl Display,
    ) {
        let issue = Diagnostic::LexOrParse { line, location, message: message.to_string() };
        log::debug!("Reporting {:?}", issue);
        self.issues.push(issue);
        self.had_parse_error = true;
    }

    pub fn report_parse_issue(&mut self, token: &impl Position, message: impl Display) {
        self.report_lex_or_parse_issue(token.line(), token.location(), message)
    }

    pub fn report_runtime_issue(&mut self, token: &impl Position, message: impl Display) {
        let issue = Diagnostic::Runtime {
            line: token.line(),
            location: token.location(),
            message: message.to_string(),
        };
        log::debug!("Reporting {:?}", issue);
        self.issues.push(issue);
        self.had_runtime_error = true;
    }

    pub fn had_parse_error(&self) -> bool {
        self.had_parse_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn issues(&self) -> &[Diagnostic] {
        &self.issues
    }

    /// Removes the collected issues but keeps the flags, so the host can print
    /// as it goes and still decide on an exit status at the end.
    pub fn take_issues(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.issues)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn exit_code(&self) -> u8 {
        if self.had_parse_error {
            EXIT_PARSE_ERROR
        } else if self.had_runtime_error {
            EXIT_RUNTIME_ERROR
        } else {
            0
        }
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.issues.iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct At(usize, Option<&'static str>);

    impl Position for At {
        fn line(&self) -> Line {
            Line(self.0)
        }

        fn location(&self) -> Location {
            match self.1 {
                Some(lexeme) => Location::Lexeme(lexeme.to_string()),
                None => Location::End,
            }
        }
    }

    #[test]
    fn formatting() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.report_lex_or_parse_issue(Line(1), Location::Unknown, "Unterminated string.");
        diagnostics.report_parse_issue(&At(2, None), "Expect expression.");
        diagnostics.report_parse_issue(&At(3, Some(")")), "Expect expression.");
        diagnostics.report_runtime_issue(&At(4, Some("-")), "Operand must be a number.");

        assert_eq!(
            diagnostics.to_string(),
            "[line 1] Error: Unterminated string.\n\
             [line 2] Error at end: Expect expression.\n\
             [line 3] Error at ')': Expect expression.\n\
             [line 4] Runtime error at '-': Operand must be a number."
        );
    }

    #[test]
    fn flags_are_independent() {
        let mut diagnostics = Diagnostics::default();
        assert!(!diagnostics.had_parse_error());
        assert!(!diagnostics.had_runtime_error());
        assert_eq!(diagnostics.exit_code(), 0);

        diagnostics.report_runtime_issue(&At(1, Some("+")), "Operands must be numbers.");
        assert!(!diagnostics.had_parse_error());
        assert!(diagnostics.had_runtime_error());
        assert_eq!(diagnostics.exit_code(), EXIT_RUNTIME_ERROR);

        diagnostics.report_parse_issue(&At(1, None), "Expect expression.");
        assert!(diagnostics.had_parse_error());
        assert_eq!(diagnostics.exit_code(), EXIT_PARSE_ERROR);
    }

    #[test]
    fn take_issues_keeps_flags_and_reset_clears_them() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.report_lex_or_parse_issue(Line(7), Location::Unknown, "Unexpected character '@'.");

        let issues = diagnostics.take_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line(), Line(7));
        assert!(!issues[0].is_runtime());
        assert!(!diagnostics.has_issues());
        assert!(diagnostics.had_parse_error());

        diagnostics.reset();
        assert_eq!(diagnostics, Diagnostics::default());
        assert_eq!(diagnostics.exit_code(), 0);
    }
}
