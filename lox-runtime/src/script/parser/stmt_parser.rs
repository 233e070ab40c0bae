//! # 语句解析
//!
//! ```text
//! declaration → varDecl | statement
//! varDecl     → "var" IDENTIFIER ( "=" expression )? ";"
//! statement   → printStmt | block | exprStmt
//! printStmt   → "print" expression ";"
//! block       → "{" declaration* "}"
//! exprStmt    → expression ";"
//! ```

use crate::script::ast::Stmt;
use crate::script::token::TokenType;

use super::{ParseResult, Parser};

impl Parser {
    /// 语句级入口，也是错误同步点
    ///
    /// 出错时同步到下一条语句边界并返回 `None`。
    pub(super) fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_any(&[TokenType::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(_) => {
                self.synchronize();
                None
            }
        }
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenType::Identifier, "Expect variable name.")?;

        let initializer = if self.match_any(&[TokenType::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenType::Semicolon,
            "Expect ';' after variable declaration.",
        )?;
        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.match_any(&[TokenType::Print]) {
            return self.print_statement();
        }
        if self.match_any(&[TokenType::LeftBrace]) {
            return Ok(Stmt::Block(self.block()?));
        }
        self.expression_statement()
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let value = self.expression()?;
        self.consume(TokenType::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    /// 块内部的错误在各自的声明处同步，不影响同块其余语句
    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenType::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }
}
