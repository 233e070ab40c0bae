//! # AST 模块
//!
//! 定义脚本的抽象语法树（Abstract Syntax Tree）。
//!
//! ## 设计说明
//!
//! 表达式和语句都是封闭的枚举。每种操作（求值、打印）各自对节点做一次
//! 穷尽匹配，新增变体时编译器会指出所有需要补充的地方。
//!
//! 节点构造后不可变，解释器只读取 AST。

use serde::{Deserialize, Serialize};

use crate::script::token::Token;
use crate::value::Value;

/// 表达式节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// 字面量值
    Literal(Value),

    /// 括号分组
    Grouping(Box<Expr>),

    /// 一元运算 `!x` / `-x`
    Unary { operator: Token, operand: Box<Expr> },

    /// 二元运算
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// 变量引用
    ///
    /// 保留原始标识符 token，运行时错误据此定位行号
    Variable { name: Token },

    /// 赋值 `name = value`
    Assign { name: Token, value: Box<Expr> },
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    pub fn nil() -> Self {
        Self::Literal(Value::Nil)
    }

    pub fn grouping(inner: Expr) -> Self {
        Self::Grouping(Box::new(inner))
    }

    pub fn unary(operator: Token, operand: Expr) -> Self {
        Self::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Self::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn variable(name: Token) -> Self {
        Self::Variable { name }
    }

    pub fn assign(name: Token, value: Expr) -> Self {
        Self::Assign {
            name,
            value: Box::new(value),
        }
    }
}

/// 语句节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// 表达式语句，结果被丢弃
    Expression(Expr),

    /// `print expr;`
    Print(Expr),

    /// `var name (= initializer)?;`
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    /// `{ ... }`，执行时引入一层新作用域
    Block(Vec<Stmt>),
}
