//! # 游标辅助
//!
//! token 游标的前瞻、消费，以及 panic-mode 错误同步。

use crate::diagnostic::Diagnostic;
use crate::script::token::{Token, TokenType};

use super::{ParseResult, Parser, Unwind};

impl Parser {
    /// 当前 token 是否为 `Eof`
    pub(super) fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// 查看当前 token，不消费
    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// 最近消费的 token
    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(super) fn check(&self, kind: TokenType) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// 消费当前 token；到达 `Eof` 后游标不再前进
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// 当前 token 属于 `kinds` 之一时消费它
    pub(super) fn match_any(&mut self, kinds: &[TokenType]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 要求当前 token 为 `kind`，否则上报错误并中止
    pub(super) fn consume(&mut self, kind: TokenType, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        let token = self.peek().clone();
        Err(self.error(&token, message))
    }

    /// 上报语法错误
    ///
    /// 返回中止信号，由调用方决定是否真的中止。
    pub(super) fn error(&mut self, token: &Token, message: &str) -> Unwind {
        self.diagnostics.push(Diagnostic::syntax(token, message));
        Unwind
    }

    /// panic-mode 同步
    ///
    /// 丢弃 token，直到刚越过一个 `;`，或停在可以开始新语句的关键字前。
    pub(super) fn synchronize(&mut self) {
        let from = self.current;
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenType::Semicolon {
                break;
            }
            if self.peek().kind.starts_statement() {
                break;
            }
            self.advance();
        }

        tracing::debug!(
            line = self.peek().line,
            skipped = self.current - from,
            "parser synchronized"
        );
    }
}
