//! # Lox Runtime
//!
//! Lox 语言子集的核心解释器库。
//!
//! ## 架构概述
//!
//! `lox-runtime` 是纯逻辑核心，除 `print` 的输出 writer 外不做任何 IO。
//! 一段源码经过三个阶段：
//!
//! ```text
//! source ──scan──► Vec<Token> ──parse──► Vec<Stmt> ──interpret──► output
//!           │                    │                      │
//!           └─ 词法诊断 ─────────┴─ 语法诊断            └─ RuntimeError
//! ```
//!
//! 任一阶段产生词法/语法诊断时程序不执行；运行时错误在第一个出错点中止。
//!
//! ## 核心类型
//!
//! - [`Session`]：一次解释器会话，持有全局环境和错误标记
//! - [`Value`]：运行时值
//! - [`Stmt`] / [`Expr`]：语法树
//! - [`DiagnosticResult`]：词法/语法诊断集合
//! - [`LoxError`]：统一错误类型
//!
//! ## 使用示例
//!
//! ```ignore
//! use lox_runtime::Session;
//!
//! let mut session = Session::new(std::io::stdout());
//! session.run("var a = 1; { var a = 2; print a; } print a;")?;
//! ```
//!
//! ## 模块结构
//!
//! - [`diagnostic`]：诊断定义
//! - [`error`]：错误类型定义
//! - [`value`]：运行时值
//! - [`script`]：词法、AST 与解析器
//! - [`runtime`]：作用域链、求值与执行
//! - [`session`]：完整的运行流水线

pub mod diagnostic;
pub mod error;
pub mod runtime;
pub mod script;
pub mod session;
pub mod value;

// 重导出核心类型
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticResult, Location};
pub use error::{LoxError, LoxResult, RuntimeError};
pub use runtime::{Environment, Interpreter};
pub use script::{Expr, Literal, Parser, Stmt, Token, TokenType, print_program};
pub use session::Session;
pub use value::Value;
