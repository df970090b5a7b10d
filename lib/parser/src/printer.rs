use scanner::Token;

use crate::{visitor::Visitor, Expr, LiteralValue};

/// Renders a tree in prefix form, e.g. `(* (- 123) (group 45.67))`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }
}

impl<'a> Visitor<'a> for AstPrinter {
    type Output = String;

    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>) -> String {
        format!("({} {} {})", operator, left.accept(self), right.accept(self))
    }

    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> String {
        format!("({} {})", operator, right.accept(self))
    }

    fn visit_grouping(&mut self, inner: &Expr<'a>) -> String {
        format!("(group {})", inner.accept(self))
    }

    fn visit_literal(&mut self, value: &LiteralValue<'a>) -> String {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use cursor::Line;
    use pretty_assertions::assert_eq;
    use scanner::TokenData;

    use super::*;

    #[test]
    fn prints_hand_built_tree() {
        let expr = Expr::binary(
            Expr::unary(
                Token::new(TokenData::Minus, "-", Line(1)),
                Expr::Literal(LiteralValue::Number(123.0)),
            ),
            Token::new(TokenData::Star, "*", Line(1)),
            Expr::grouping(Expr::Literal(LiteralValue::Number(45.67))),
        );

        assert_eq!(AstPrinter.print(&expr), "(* (- 123) (group 45.67))");
        assert_eq!(expr.to_string(), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn prints_literals() {
        for (value, printed) in [
            (LiteralValue::Nil, "nil"),
            (LiteralValue::Boolean(true), "true"),
            (LiteralValue::Boolean(false), "false"),
            (LiteralValue::Str("hi there"), "hi there"),
            (LiteralValue::Number(0.5), "0.5"),
        ] {
            assert_eq!(Expr::Literal(value).to_string(), printed);
        }
    }
}
