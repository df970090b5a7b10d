use std::io::{self, Write};

use diagnostics::Diagnostics;
use parser::{AstPrinter, Expr, Parser};
use scanner::Scanner;

use crate::Interpreter;

/// Runs source text through scanner, parser and interpreter, collecting every
/// issue in its own [`Diagnostics`].
#[derive(Debug, Default)]
pub struct Lox {
    interpreter: Interpreter,
    diagnostics: Diagnostics,
}

impl Lox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Evaluates `source` and writes the value's display form to `output`.
    ///
    /// Lexical, parse and runtime errors end up in [`Lox::diagnostics`]; only
    /// failures to write to `output` are returned.
    pub fn run_source(&mut self, source: &str, output: &mut impl Write) -> io::Result<()> {
        let Some(expr) = self.parse(source) else {
            return Ok(());
        };

        if let Some(value) = self.interpreter.interpret(&expr, &mut self.diagnostics) {
            writeln!(output, "{}", value)?;
        }
        Ok(())
    }

    /// Writes the syntax tree of `source` instead of evaluating it.
    pub fn print_ast(&mut self, source: &str, output: &mut impl Write) -> io::Result<()> {
        if let Some(expr) = self.parse(source) {
            writeln!(output, "{}", AstPrinter.print(&expr))?;
        }
        Ok(())
    }

    fn parse<'a>(&mut self, source: &'a str) -> Option<Expr<'a>> {
        let mut scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.by_ref().collect();
        let skipped_input = !scanner.errors().is_empty();
        scanner.report(&mut self.diagnostics);

        let expr = Parser::new(tokens).parse(&mut self.diagnostics).ok()?;

        // The tree may not be what was written if the scanner skipped input
        if skipped_input {
            log::debug!("Not running {:?} because of lexical errors", source);
            return None;
        }
        Some(expr)
    }
}
