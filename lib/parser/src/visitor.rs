use scanner::Token;

use crate::{Expr, LiteralValue};

/// One operation per expression variant. A new consumer of the tree only needs
/// a new implementation of this trait; [`Expr::accept`] does the dispatch.
pub trait Visitor<'a> {
    type Output;

    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>)
        -> Self::Output;
    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> Self::Output;
    fn visit_grouping(&mut self, inner: &Expr<'a>) -> Self::Output;
    fn visit_literal(&mut self, value: &LiteralValue<'a>) -> Self::Output;
}
