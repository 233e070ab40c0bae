//! # Interpreter 模块
//!
//! 语句执行器。
//!
//! ## 执行模型
//!
//! ```text
//! interpret(&[Stmt]) -> Result<(), RuntimeError>
//! ```
//!
//! 1. 按顺序执行每条语句
//! 2. `print` 写入输出，每条语句一行
//! 3. 块语句进入一层新作用域，无论正常结束还是出错都会退出
//! 4. 第一个运行时错误立即中止，之前已产生的输出保留

use std::io::Write;

use crate::error::RuntimeError;
use crate::runtime::environment::Environment;
use crate::runtime::evaluator::evaluate;
use crate::script::{Expr, Stmt};
use crate::value::Value;

/// 树遍历解释器
///
/// 持有全局环境，多次调用 [`interpret`](Self::interpret) 之间变量保持不变。
///
/// # 使用示例
///
/// ```ignore
/// let mut interpreter = Interpreter::new(Vec::new());
/// interpreter.interpret(&statements)?;
/// let output = interpreter.into_output();
/// ```
#[derive(Debug)]
pub struct Interpreter<W: Write> {
    /// 全局环境
    globals: Environment,
    /// print 语句的输出
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self {
            globals: Environment::new(),
            out,
        }
    }

    /// 执行语句列表
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            execute(stmt, &mut self.globals, &mut self.out)?;
        }
        Ok(())
    }

    /// 在全局环境中对单个表达式求值
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        evaluate(expr, &mut self.globals)
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// 执行单条语句
fn execute<W: Write>(
    stmt: &Stmt,
    env: &mut Environment,
    out: &mut W,
) -> Result<(), RuntimeError> {
    match stmt {
        Stmt::Expression(expr) => {
            evaluate(expr, env)?;
        }

        Stmt::Print(expr) => {
            let value = evaluate(expr, env)?;
            writeln!(out, "{}", value)?;
        }

        Stmt::Var { name, initializer } => {
            let value = match initializer {
                Some(expr) => evaluate(expr, env)?,
                None => Value::Nil,
            };
            env.define(name.lexeme.as_str(), value);
        }

        Stmt::Block(statements) => {
            // scope drop 时恢复外层环境，`?` 提前返回同样会触发
            let mut scope = env.enter_scope();
            for stmt in statements {
                execute(stmt, &mut scope, out)?;
            }
        }
    }
    Ok(())
}
