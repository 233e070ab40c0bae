//! # Runtime 模块
//!
//! 执行引擎核心：作用域链、表达式求值和语句执行。
//!
//! ## 模块结构
//!
//! - [`environment`]：变量作用域链
//! - [`evaluator`]：表达式求值
//! - [`interpreter`]：语句执行与全局环境

pub mod environment;
pub mod evaluator;
pub mod interpreter;

pub use environment::{Environment, Scope};
pub use evaluator::{EvalContext, evaluate};
pub use interpreter::Interpreter;
