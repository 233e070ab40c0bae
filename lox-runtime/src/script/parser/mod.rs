//! # Parser 模块
//!
//! 手写递归下降解析器：token 序列 → 语句列表。
//!
//! ## 架构
//!
//! ```text
//! Vec<Token> → [declaration*] → Vec<Stmt>
//!                  │
//!                  └─ 语法错误 → 上报诊断 → 同步到下一条语句边界 → 继续
//! ```
//!
//! ## 设计原则
//!
//! - 每条文法规则对应一个方法，优先级由调用层次决定
//! - 语法错误不使用栈展开：规则方法返回 [`Unwind`]，由语句循环捕获并同步
//! - 一遍解析收集所有相互独立的语法错误
//!
//! ## 模块结构
//!
//! - `helpers`: token 游标操作与错误同步
//! - `expr_parser`: 表达式优先级阶梯
//! - `stmt_parser`: 声明与语句

mod expr_parser;
mod helpers;
mod stmt_parser;


use crate::diagnostic::DiagnosticResult;
use crate::script::ast::{Expr, Stmt};
use crate::script::token::Token;

/// 解析中止信号
///
/// 诊断已在产生时上报，此值只负责把控制流带回语句循环。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Unwind;

pub(crate) type ParseResult<T> = Result<T, Unwind>;

/// 语法解析器
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    diagnostics: DiagnosticResult,
}

impl Parser {
    /// 创建新的解析器
    ///
    /// 序列末尾若缺少 `Eof` 会自动补上。
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }
        Self {
            tokens,
            current: 0,
            diagnostics: DiagnosticResult::new(),
        }
    }

    /// 解析整个程序
    ///
    /// `program → declaration* EOF`。出错的声明被跳过，不出现在结果中；
    /// 只要 [`diagnostics`](Self::diagnostics) 非空，结果就不应被执行。
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        tracing::trace!(
            statements = statements.len(),
            errors = self.diagnostics.error_count(),
            "parse finished"
        );
        statements
    }

    /// 解析单个表达式，之后必须紧跟输入结尾
    ///
    /// 出现任何语法错误时返回 `None`。
    pub fn parse_expression(&mut self) -> Option<Expr> {
        let expr = self.expression().ok()?;
        if !self.is_at_end() {
            let token = self.peek().clone();
            self.error(&token, "Expect end of expression.");
            return None;
        }
        if !self.diagnostics.is_empty() {
            return None;
        }
        Some(expr)
    }

    /// 解析过程中上报的语法错误
    pub fn diagnostics(&self) -> &DiagnosticResult {
        &self.diagnostics
    }

    /// 取出诊断结果
    pub fn take_diagnostics(&mut self) -> DiagnosticResult {
        std::mem::take(&mut self.diagnostics)
    }
}

/// 解析 token 序列，语法错误合并进 `diagnostics`
pub fn parse_program(tokens: Vec<Token>, diagnostics: &mut DiagnosticResult) -> Vec<Stmt> {
    let mut parser = Parser::new(tokens);
    let statements = parser.parse();
    diagnostics.merge(parser.take_diagnostics());
    statements
}
