use crate::ast::*;
use crate::error::CompileResult;
use crate::lexeme::Lexeme;
use crate::span::Spanned;

use super::Parser;

impl Parser {
    pub(super) fn parse_class_decl(&mut self) -> CompileResult<Class> {
        self.expect(&Lexeme::Class)?;
        let name = self.expect_ident()?;
        self.expect(&Lexeme::LBrace)?;

        let mut var_decs = Vec::new();
        while self.at(&Lexeme::Static) || self.at(&Lexeme::Field) {
            var_decs.extend(self.parse_class_var_dec()?);
        }

        let mut subroutines = Vec::new();
        while self.at(&Lexeme::Constructor) || self.at(&Lexeme::Function) || self.at(&Lexeme::Method)
        {
            subroutines.push(self.parse_subroutine()?);
        }

        self.expect(&Lexeme::RBrace)?;
        Ok(Class {
            name,
            var_decs,
            subroutines,
        })
    }

    /// `static|field type name (, name)* ;`
    fn parse_class_var_dec(&mut self) -> CompileResult<Vec<VarDec>> {
        let kind = if self.eat(&Lexeme::Static) {
            ClassVarKind::Static
        } else {
            self.expect(&Lexeme::Field)?;
            ClassVarKind::Field
        };
        let ty = self.parse_type()?;
        let names = self.parse_name_list()?;
        Ok(names
            .into_iter()
            .map(|name| VarDec {
                ty: ty.clone(),
                name,
                kind,
            })
            .collect())
    }

    fn parse_subroutine(&mut self) -> CompileResult<Subroutine> {
        let kind = match self.peek() {
            Lexeme::Constructor => SubroutineKind::Constructor,
            Lexeme::Method => SubroutineKind::Method,
            _ => SubroutineKind::Function,
        };
        self.advance();

        let return_type = if self.eat(&Lexeme::Void) {
            Type::Void
        } else {
            self.parse_type()?
        };
        let name = self.expect_ident()?;

        self.expect(&Lexeme::LParen)?;
        let params = self.parse_params()?;
        self.expect(&Lexeme::RParen)?;

        self.expect(&Lexeme::LBrace)?;
        let mut locals = Vec::new();
        while self.eat(&Lexeme::Var) {
            let ty = self.parse_type()?;
            for name in self.parse_name_list()? {
                locals.push(TypedName {
                    ty: ty.clone(),
                    name,
                });
            }
        }
        let statements = self.parse_statements()?;
        self.expect(&Lexeme::RBrace)?;

        Ok(Subroutine {
            kind,
            return_type,
            name,
            params,
            locals,
            statements,
        })
    }

    fn parse_params(&mut self) -> CompileResult<Vec<TypedName>> {
        let mut params = Vec::new();
        if self.at(&Lexeme::RParen) {
            return Ok(params);
        }
        loop {
            let ty = self.parse_type()?;
            let name = self.expect_ident()?;
            params.push(TypedName { ty, name });
            if !self.eat(&Lexeme::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// `name (, name)* ;`
    fn parse_name_list(&mut self) -> CompileResult<Vec<Spanned<String>>> {
        let mut names = vec![self.expect_ident()?];
        while self.eat(&Lexeme::Comma) {
            names.push(self.expect_ident()?);
        }
        self.expect(&Lexeme::Semicolon)?;
        Ok(names)
    }

    fn parse_type(&mut self) -> CompileResult<Type> {
        let ty = match self.peek().clone() {
            Lexeme::Int => Type::Int,
            Lexeme::Char => Type::Char,
            Lexeme::Boolean => Type::Boolean,
            Lexeme::Ident(name) => Type::Class(name),
            other => {
                return Err(self.error_at_current(&format!(
                    "expected type, found {}",
                    other.description()
                )))
            }
        };
        self.advance();
        Ok(ty)
    }

    // --- Statements ---

    fn parse_statements(&mut self) -> CompileResult<Vec<Spanned<Stmt>>> {
        let mut stmts = Vec::new();
        while !self.at(&Lexeme::RBrace) && !self.at(&Lexeme::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_block(&mut self) -> CompileResult<Vec<Spanned<Stmt>>> {
        self.expect(&Lexeme::LBrace)?;
        self.enter_nesting()?;
        let stmts = self.parse_statements()?;
        self.exit_nesting();
        self.expect(&Lexeme::RBrace)?;
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> CompileResult<Spanned<Stmt>> {
        let start = self.current_span();
        let stmt = match self.peek() {
            Lexeme::Let => self.parse_let_stmt()?,
            Lexeme::If => self.parse_if_stmt()?,
            Lexeme::While => self.parse_while_stmt()?,
            Lexeme::Do => {
                self.advance();
                let name = self.expect_ident()?;
                let call = self.parse_call_rest(name)?;
                self.expect(&Lexeme::Semicolon)?;
                Stmt::Do(call)
            }
            Lexeme::Return => {
                self.advance();
                let value = if self.at(&Lexeme::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(&Lexeme::Semicolon)?;
                Stmt::Return(value)
            }
            other => {
                return Err(self.error_at_current(&format!(
                    "expected statement, found {}",
                    other.description()
                )))
            }
        };
        Ok(Spanned::new(stmt, start.merge(self.prev_span())))
    }

    fn parse_let_stmt(&mut self) -> CompileResult<Stmt> {
        self.expect(&Lexeme::Let)?;
        let target = self.expect_ident()?;
        let index = if self.eat(&Lexeme::LBracket) {
            let index = self.parse_expr()?;
            self.expect(&Lexeme::RBracket)?;
            Some(index)
        } else {
            None
        };
        self.expect(&Lexeme::Eq)?;
        let value = self.parse_expr()?;
        self.expect(&Lexeme::Semicolon)?;
        Ok(Stmt::Let {
            target,
            index,
            value,
        })
    }

    fn parse_if_stmt(&mut self) -> CompileResult<Stmt> {
        self.expect(&Lexeme::If)?;
        let cond = self.parse_paren_expr()?;
        let then_body = self.parse_block()?;
        let else_body = if self.eat(&Lexeme::Else) {
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok(Stmt::If {
            cond,
            then_body,
            else_body,
        })
    }

    fn parse_while_stmt(&mut self) -> CompileResult<Stmt> {
        self.expect(&Lexeme::While)?;
        let cond = self.parse_paren_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_paren_expr(&mut self) -> CompileResult<Spanned<Expr>> {
        self.expect(&Lexeme::LParen)?;
        let expr = self.parse_expr()?;
        self.expect(&Lexeme::RParen)?;
        Ok(expr)
    }
}
