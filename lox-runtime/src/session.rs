//! # Session 模块
//!
//! 一次解释器会话：源码 → token → 语句 → 执行。
//!
//! 会话持有唯一的 [`Interpreter`]，因此同一会话内多次 [`Session::run`]
//! 共享全局变量，REPL 每一行都运行在同一个会话上。
//!
//! 错误状态保存在会话上而不是进程全局：
//!
//! - `had_error`：最近一次运行出现词法/语法错误，程序未执行
//! - `had_runtime_error`：出现过运行时错误

use std::io::Write;

use tracing::debug;

use crate::diagnostic::DiagnosticResult;
use crate::error::{LoxError, LoxResult};
use crate::runtime::Interpreter;
use crate::script::{Parser, Stmt, Token, parse_program, scan};
use crate::value::Value;

/// 词法分析，返回 token 序列和词法诊断
pub fn tokens(source: &str) -> (Vec<Token>, DiagnosticResult) {
    let mut diagnostics = DiagnosticResult::new();
    let tokens = scan(source, &mut diagnostics);
    (tokens, diagnostics)
}

/// 词法 + 语法分析
///
/// 任一阶段出错时返回 [`LoxError::Static`]，包含全部诊断。
pub fn parse(source: &str) -> LoxResult<Vec<Stmt>> {
    let (tokens, mut diagnostics) = tokens(source);
    let statements = parse_program(tokens, &mut diagnostics);
    if !diagnostics.is_empty() {
        return Err(LoxError::Static(diagnostics));
    }
    Ok(statements)
}

/// 解释器会话
#[derive(Debug)]
pub struct Session<W: Write> {
    interpreter: Interpreter<W>,
    had_error: bool,
    had_runtime_error: bool,
}

impl<W: Write> Session<W> {
    /// 创建会话，`print` 输出写入 `out`
    pub fn new(out: W) -> Self {
        Self {
            interpreter: Interpreter::new(out),
            had_error: false,
            had_runtime_error: false,
        }
    }

    /// 运行一段完整源码
    ///
    /// 有任何词法/语法错误时整段不执行。
    pub fn run(&mut self, source: &str) -> LoxResult<()> {
        let statements = parse(source).inspect_err(|e| self.record(e))?;
        self.execute(&statements)
    }

    /// 运行 REPL 输入的一行
    ///
    /// 整行恰好是一个表达式时求值并返回结果供回显，否则按程序运行并返回 `None`。
    pub fn run_repl_line(&mut self, line: &str) -> LoxResult<Option<Value>> {
        let (tokens, diagnostics) = tokens(line);
        if !diagnostics.is_empty() {
            let err = LoxError::Static(diagnostics);
            self.record(&err);
            return Err(err);
        }

        // 先按单个表达式试探，失败时丢弃试探产生的诊断
        let mut trial = Parser::new(tokens.clone());
        if let Some(expr) = trial.parse_expression() {
            debug!("repl line is a bare expression");
            return self
                .interpreter
                .evaluate(&expr)
                .map(Some)
                .map_err(LoxError::from)
                .inspect_err(|e| self.record(e));
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();
        let diagnostics = parser.take_diagnostics();
        if !diagnostics.is_empty() {
            let err = LoxError::Static(diagnostics);
            self.record(&err);
            return Err(err);
        }

        self.execute(&statements).map(|()| None)
    }

    /// 执行已解析的语句
    pub fn execute(&mut self, statements: &[Stmt]) -> LoxResult<()> {
        debug!(count = statements.len(), "execute statements");
        self.interpreter
            .interpret(statements)
            .map_err(LoxError::from)
            .inspect_err(|e| self.record(e))
    }

    /// 清除语法错误标记
    ///
    /// REPL 中上一行的错误不影响下一行。
    pub fn reset_error(&mut self) {
        self.had_error = false;
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn interpreter(&self) -> &Interpreter<W> {
        &self.interpreter
    }

    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }

    fn record(&mut self, err: &LoxError) {
        match err {
            LoxError::Static(diagnostics) => {
                debug!(
                    errors = diagnostics.error_count(),
                    "static errors, skip execution"
                );
                self.had_error = true;
            }
            LoxError::Runtime(e) => {
                debug!(line = ?e.line(), "runtime error: {}", e);
                self.had_runtime_error = true;
            }
        }
    }
}
