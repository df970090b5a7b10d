use diagnostics::Diagnostics;
use parser::{Expr, LiteralValue, Visitor};
use scanner::{Token, TokenType};

mod value;
pub use value::Value;

mod session;
pub use session::Lox;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorType {
    #[error("Operand must be a number.")]
    OperandMustBeNumber,
    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings,
    /// Only reachable for trees built by hand with a non-operator token.
    #[error("Unknown operator.")]
    UnknownOperator,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct RuntimeError<'a> {
    pub error: RuntimeErrorType,
    /// The operator that could not be applied.
    pub token: Token<'a>,
}

impl<'a> RuntimeError<'a> {
    fn new(error: RuntimeErrorType, token: &Token<'a>) -> Self {
        Self { error, token: token.clone() }
    }
}

pub type Result<'a, T> = std::result::Result<T, RuntimeError<'a>>;

/// Evaluates expression trees to values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `expr` and reports a runtime error to `diagnostics` instead
    /// of returning it. On success, returns the value's display form.
    pub fn interpret(&mut self, expr: &Expr, diagnostics: &mut Diagnostics) -> Option<String> {
        match self.evaluate(expr) {
            Ok(value) => Some(value.to_string()),
            Err(e) => {
                diagnostics.report_runtime_issue(&e.token, e.error);
                None
            }
        }
    }

    pub fn evaluate<'a>(&mut self, expr: &Expr<'a>) -> Result<'a, Value> {
        expr.accept(self)
    }
}

impl<'a> Visitor<'a> for Interpreter {
    type Output = Result<'a, Value>;

    fn visit_literal(&mut self, value: &LiteralValue<'a>) -> Self::Output {
        Ok(value.into())
    }

    fn visit_grouping(&mut self, inner: &Expr<'a>) -> Self::Output {
        self.evaluate(inner)
    }

    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> Self::Output {
        let right = self.evaluate(right)?;
        log::trace!("Evaluating {} {:?}", operator, right);

        match (operator.ty(), right) {
            (TokenType::Minus, Value::Number(n)) => Ok((-n).into()),
            (TokenType::Minus, _) => {
                Err(RuntimeError::new(RuntimeErrorType::OperandMustBeNumber, operator))
            }
            (TokenType::Bang, v) => Ok((!v.is_truthy()).into()),
            _ => Err(RuntimeError::new(RuntimeErrorType::UnknownOperator, operator)),
        }
    }

    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>) -> Self::Output {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        log::trace!("Evaluating {:?} {} {:?}", left, operator, right);

        use TokenType::*;
        match (&left, &right, operator.ty()) {
            (Value::Number(l), Value::Number(r), Minus) => Ok((l - r).into()),
            // Division by zero follows IEEE 754
            (Value::Number(l), Value::Number(r), Slash) => Ok((l / r).into()),
            (Value::Number(l), Value::Number(r), Star) => Ok((l * r).into()),
            (Value::Number(l), Value::Number(r), Plus) => Ok((l + r).into()),

            (Value::Str(l), Value::Str(r), Plus) => Ok((l.clone() + r).into()),
            #[cfg(not(feature = "strict"))]
            (Value::Str(_), _, Plus) | (_, Value::Str(_), Plus) => {
                Ok(format!("{}{}", left, right).into())
            }
            (_, _, Plus) => Err(RuntimeError::new(
                RuntimeErrorType::OperandsMustBeNumbersOrStrings,
                operator,
            )),

            (Value::Number(l), Value::Number(r), Greater) => Ok((l > r).into()),
            (Value::Number(l), Value::Number(r), GreaterEqual) => Ok((l >= r).into()),
            (Value::Number(l), Value::Number(r), Less) => Ok((l < r).into()),
            (Value::Number(l), Value::Number(r), LessEqual) => Ok((l <= r).into()),

            (_, _, EqualEqual) => Ok(left.eq_in_lox(&right).into()),
            (_, _, BangEqual) => Ok((!left.eq_in_lox(&right)).into()),

            (_, _, Minus | Slash | Star | Greater | GreaterEqual | Less | LessEqual) => {
                log::trace!(
                    "Unsupported operands for {}: {} and {}",
                    operator,
                    left.type_name(),
                    right.type_name()
                );
                Err(RuntimeError::new(RuntimeErrorType::OperandsMustBeNumbers, operator))
            }

            _ => Err(RuntimeError::new(RuntimeErrorType::UnknownOperator, operator)),
        }
    }
}
