use crate::ast::*;
use crate::error::CompileResult;
use crate::lexeme::Lexeme;
use crate::span::Spanned;

use super::Parser;

impl Parser {
    pub(super) fn parse_expr(&mut self) -> CompileResult<Spanned<Expr>> {
        self.enter_nesting()?;
        let expr = self.parse_expr_bp(0);
        self.exit_nesting();
        expr
    }

    /// Precedence climbing. Every level is left-associative, so
    /// `a - b - c` is `(a - b) - c`.
    fn parse_expr_bp(&mut self, min_bp: u8) -> CompileResult<Spanned<Expr>> {
        let mut lhs = self.parse_term()?;
        // Each fold deepens the tree by one level. A parse error abandons the
        // whole class, so the depth only needs restoring on success.
        let mut folds = 0;

        loop {
            let op = match self.peek() {
                Lexeme::Plus => BinOp::Add,
                Lexeme::Minus => BinOp::Sub,
                Lexeme::Star => BinOp::Mul,
                Lexeme::Slash => BinOp::Div,
                Lexeme::Amp => BinOp::And,
                Lexeme::Pipe => BinOp::Or,
                Lexeme::Lt => BinOp::Lt,
                Lexeme::Gt => BinOp::Gt,
                Lexeme::Eq => BinOp::Eq,
                _ => break,
            };

            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break;
            }

            self.advance(); // consume operator
            self.enter_nesting()?;
            folds += 1;
            let rhs = self.parse_expr_bp(r_bp)?;
            let span = lhs.span.merge(rhs.span);
            lhs = Spanned::new(
                Expr::BinOp {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        for _ in 0..folds {
            self.exit_nesting();
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> CompileResult<Spanned<Expr>> {
        let start = self.current_span();

        let expr = match self.peek().clone() {
            Lexeme::Integer(n) => {
                self.advance();
                Expr::IntConst(n)
            }
            Lexeme::Str(s) => {
                self.advance();
                Expr::StringConst(s)
            }
            Lexeme::True => {
                self.advance();
                Expr::BoolConst(true)
            }
            Lexeme::False => {
                self.advance();
                Expr::BoolConst(false)
            }
            Lexeme::Null => {
                self.advance();
                Expr::NullConst
            }
            Lexeme::This => {
                self.advance();
                Expr::ThisRef
            }
            Lexeme::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&Lexeme::RParen)?;
                Expr::Group(Box::new(inner))
            }
            Lexeme::Minus | Lexeme::Tilde => {
                let op = if self.at(&Lexeme::Minus) {
                    UnaryOp::Neg
                } else {
                    UnaryOp::Not
                };
                self.advance();
                self.enter_nesting()?;
                let operand = self.parse_term()?;
                self.exit_nesting();
                Expr::UnaryOp {
                    op,
                    operand: Box::new(operand),
                }
            }
            Lexeme::Ident(_) => {
                let name = self.expect_ident()?;
                match self.peek() {
                    Lexeme::LBracket => {
                        self.advance();
                        let index = self.parse_expr()?;
                        self.expect(&Lexeme::RBracket)?;
                        Expr::ArrayAccess {
                            name,
                            index: Box::new(index),
                        }
                    }
                    Lexeme::LParen | Lexeme::Dot => Expr::Call(self.parse_call_rest(name)?),
                    _ => Expr::VarRef(name.node),
                }
            }
            other => {
                return Err(self.error_at_current(&format!(
                    "expected expression, found {}",
                    other.description()
                )))
            }
        };

        Ok(Spanned::new(expr, start.merge(self.prev_span())))
    }

    /// Parse the rest of a call whose first identifier is already consumed:
    /// `(args)` or `.name(args)`.
    pub(super) fn parse_call_rest(
        &mut self,
        first: Spanned<String>,
    ) -> CompileResult<SubroutineCall> {
        let (receiver, name) = if self.eat(&Lexeme::Dot) {
            (Some(first), self.expect_ident()?)
        } else {
            (None, first)
        };

        self.expect(&Lexeme::LParen)?;
        let mut args = Vec::new();
        if !self.at(&Lexeme::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(&Lexeme::Comma) {
                    break;
                }
            }
        }
        self.expect(&Lexeme::RParen)?;

        Ok(SubroutineCall {
            receiver,
            name,
            args,
        })
    }
}
