//! # Script 模块
//!
//! 源码前端：词法分析、AST 定义和语法解析。
//!
//! ## 模块结构
//!
//! - [`token`]：Token 与 TokenType 定义
//! - [`lexer`]：源码 → token 序列
//! - [`ast`]：表达式与语句树
//! - [`parser`]：递归下降解析器
//! - [`printer`]：AST 的括号前缀打印

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use ast::{Expr, Stmt};
pub use lexer::{Lexer, scan};
pub use parser::{Parser, parse_program};
pub use printer::{print_expr, print_program, print_stmt};
pub use token::{Literal, Token, TokenType};
