//! # 词法分析器
//!
//! 将源码文本切分为以 `Eof` 结尾的 token 序列。
//!
//! 扫描是全函数：遇到非法字符或未闭合的字符串时向 [`DiagnosticResult`]
//! 上报词法错误，然后继续扫描，一遍就能暴露多个错误。

use crate::diagnostic::{Diagnostic, DiagnosticResult};
use crate::script::token::{Literal, Token, TokenType};

/// 扫描源码
///
/// 返回的序列末尾总是恰好有一个 `Eof` token。
pub fn scan(source: &str, diagnostics: &mut DiagnosticResult) -> Vec<Token> {
    Lexer::new(source).scan_tokens(diagnostics)
}

/// 词法分析器
///
/// `start` 指向当前 lexeme 的首字节，`pos` 指向下一个待读字符。
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    start: usize,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            pos: 0,
            line: 1,
        }
    }

    /// 扫描全部输入
    pub fn scan_tokens(mut self, diagnostics: &mut DiagnosticResult) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.pos;
            self.scan_token(diagnostics);
        }

        self.tokens.push(Token::eof(self.line));
        self.tokens
    }

    fn scan_token(&mut self, diagnostics: &mut DiagnosticResult) {
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),

            '!' => self.add_paired('=', TokenType::BangEqual, TokenType::Bang),
            '=' => self.add_paired('=', TokenType::EqualEqual, TokenType::Equal),
            '<' => self.add_paired('=', TokenType::LessEqual, TokenType::Less),
            '>' => self.add_paired('=', TokenType::GreaterEqual, TokenType::Greater),

            '/' => {
                if self.match_char('/') {
                    // 行注释：吃掉到行尾，换行符留给下一轮计数
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.string(diagnostics),

            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),

            _ => diagnostics.push(Diagnostic::lexical(self.line, "Unexpected character.")),
        }
    }

    /// 字符串字面量，允许跨行
    fn string(&mut self, diagnostics: &mut DiagnosticResult) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            diagnostics.push(Diagnostic::lexical(self.line, "Unterminated string."));
            return;
        }

        // 结束引号
        self.advance();

        let value = &self.source[self.start + 1..self.pos - 1];
        self.add_literal(TokenType::String, Literal::String(value.to_string()));
    }

    /// 数字字面量：`digits ("." digits)?`
    fn number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // 小数点后必须至少有一位数字，否则 `.` 留给下一个 token
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // 上面只接受 `digits ("." digits)?`，解析不会失败
        let n = self.source[self.start..self.pos]
            .parse::<f64>()
            .unwrap_or_default();
        self.add_literal(TokenType::Number, Literal::Number(n));
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        let text = &self.source[self.start..self.pos];
        let kind = TokenType::keyword(text).unwrap_or(TokenType::Identifier);
        self.add_token(kind);
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn add_paired(&mut self, second: char, paired: TokenType, single: TokenType) {
        let kind = if self.match_char(second) {
            paired
        } else {
            single
        };
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenType) {
        let text = &self.source[self.start..self.pos];
        self.tokens.push(Token::new(kind, text, None, self.line));
    }

    fn add_literal(&mut self, kind: TokenType, literal: Literal) {
        let text = &self.source[self.start..self.pos];
        self.tokens.push(Token::new(kind, text, Some(literal), self.line));
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
