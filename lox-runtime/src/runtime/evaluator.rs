//! # 表达式求值
//!
//! 后序遍历表达式树：先求操作数，再应用运算符自身的语义。
//!
//! ## 设计原则
//!
//! - 求值是**确定性**的，只依赖表达式和上下文中的变量
//! - 类型检查在运行时进行，不做隐式转换
//! - 错误携带运算符或变量名 token，便于报告行号

use crate::error::RuntimeError;
use crate::runtime::environment::Environment;
use crate::script::{Expr, Token, TokenType};
use crate::value::Value;

/// 表达式求值上下文
///
/// 提供变量读取与赋值能力
pub trait EvalContext {
    /// 获取变量值
    fn get_var(&self, name: &Token) -> Result<Value, RuntimeError>;

    /// 给已有变量赋值
    fn assign_var(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError>;
}

impl EvalContext for Environment {
    fn get_var(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.get(name)
    }

    fn assign_var(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        self.assign(name, value)
    }
}

/// 对表达式求值
pub fn evaluate(expr: &Expr, ctx: &mut impl EvalContext) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),

        Expr::Grouping(inner) => evaluate(inner, ctx),

        Expr::Variable { name } => ctx.get_var(name),

        Expr::Assign { name, value } => {
            let value = evaluate(value, ctx)?;
            ctx.assign_var(name, value.clone())?;
            Ok(value)
        }

        Expr::Unary { operator, operand } => {
            let operand = evaluate(operand, ctx)?;
            unary(operator, operand)
        }

        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let left = evaluate(left, ctx)?;
            let right = evaluate(right, ctx)?;
            binary(operator, left, right)
        }
    }
}

fn unary(operator: &Token, operand: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenType::Minus => {
            let n = number_operand(operator, &operand)?;
            Ok(Value::Number(-n))
        }
        TokenType::Bang => Ok(Value::Bool(!operand.is_truthy())),
        _ => Err(unknown_operator(operator)),
    }
}

fn binary(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    let value = match operator.kind {
        TokenType::EqualEqual => Value::Bool(values_equal(&left, &right)),
        TokenType::BangEqual => Value::Bool(!values_equal(&left, &right)),

        TokenType::Plus => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (Value::String(a), Value::String(b)) => Value::String(a + &b),
            (left, right) => {
                return Err(type_mismatch(
                    operator,
                    &[&left, &right],
                    "Operands must be two numbers or two strings.",
                ));
            }
        },

        TokenType::Minus => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Number(a - b)
        }
        TokenType::Slash => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Number(a / b)
        }
        TokenType::Star => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Number(a * b)
        }

        TokenType::Greater => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Bool(a > b)
        }
        TokenType::GreaterEqual => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Bool(a >= b)
        }
        TokenType::Less => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Bool(a < b)
        }
        TokenType::LessEqual => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Bool(a <= b)
        }

        _ => return Err(unknown_operator(operator)),
    };
    Ok(value)
}

/// 判断两个值是否相等
///
/// 不同类型的值永远不相等，`nil` 只等于 `nil`
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}

fn number_operand(operator: &Token, operand: &Value) -> Result<f64, RuntimeError> {
    operand
        .as_number()
        .ok_or_else(|| type_mismatch(operator, &[operand], "Operand must be a number."))
}

fn number_operands(
    operator: &Token,
    left: &Value,
    right: &Value,
) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(type_mismatch(operator, &[left, right], "Operands must be numbers.")),
    }
}

/// 操作数类型错误，实际类型只记入日志
fn type_mismatch(operator: &Token, operands: &[&Value], message: &str) -> RuntimeError {
    let types: Vec<_> = operands.iter().map(|v| v.type_name()).collect();
    tracing::debug!(operator = %operator.lexeme, line = operator.line, ?types, "type mismatch");
    RuntimeError::type_error(operator, message)
}

// 解析器不会构造这种节点，只有手工拼装的 AST 才会走到这里
fn unknown_operator(operator: &Token) -> RuntimeError {
    RuntimeError::type_error(operator, format!("Unknown operator '{}'.", operator.lexeme))
}
