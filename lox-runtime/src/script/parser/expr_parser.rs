//! # 表达式解析
//!
//! 优先级从低到高：
//!
//! ```text
//! expression → assignment
//! assignment → IDENTIFIER "=" assignment | equality
//! equality   → comparison ( ( "!=" | "==" ) comparison )*
//! comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       → factor ( ( "-" | "+" ) factor )*
//! factor     → unary ( ( "/" | "*" ) unary )*
//! unary      → ( "!" | "-" ) unary | primary
//! primary    → NUMBER | STRING | "true" | "false" | "nil" | IDENTIFIER | "(" expression ")"
//! ```

use crate::script::ast::Expr;
use crate::script::token::{Literal, TokenType};
use crate::value::Value;

use super::{ParseResult, Parser};

impl Parser {
    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// 赋值，右结合
    ///
    /// 先按普通表达式解析左侧，遇到 `=` 后再检查左侧是否为变量。
    /// 非法目标只上报，不中止解析。
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.equality()?;

        if self.match_any(&[TokenType::Equal]) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            if let Expr::Variable { name } = expr {
                return Ok(Expr::assign(name, value));
            }

            self.error(&equals, "Invalid assignment target.");
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        self.left_assoc(
            &[TokenType::BangEqual, TokenType::EqualEqual],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        self.left_assoc(
            &[
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::Less,
                TokenType::LessEqual,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> ParseResult<Expr> {
        self.left_assoc(&[TokenType::Minus, TokenType::Plus], Self::factor)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        self.left_assoc(&[TokenType::Slash, TokenType::Star], Self::unary)
    }

    /// 左结合的二元层级：每匹配一个运算符就把已有结果折叠为左操作数
    fn left_assoc(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut expr = operand(self)?;

        while self.match_any(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.match_any(&[TokenType::Bang, TokenType::Minus]) {
            let operator = self.previous().clone();
            let operand = self.unary()?;
            return Ok(Expr::unary(operator, operand));
        }
        self.primary()
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_any(&[TokenType::False]) {
            return Ok(Expr::literal(false));
        }
        if self.match_any(&[TokenType::True]) {
            return Ok(Expr::literal(true));
        }
        if self.match_any(&[TokenType::Nil]) {
            return Ok(Expr::nil());
        }
        if self.match_any(&[TokenType::Number, TokenType::String]) {
            let value = match &self.previous().literal {
                Some(Literal::Number(n)) => Value::Number(*n),
                Some(Literal::String(s)) => Value::String(s.clone()),
                None => Value::Nil,
            };
            return Ok(Expr::Literal(value));
        }
        if self.match_any(&[TokenType::Identifier]) {
            return Ok(Expr::variable(self.previous().clone()));
        }
        if self.match_any(&[TokenType::LeftParen]) {
            let expr = self.expression()?;
            self.consume(TokenType::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::grouping(expr));
        }

        let token = self.peek().clone();
        Err(self.error(&token, "Expected expression."))
    }
}
