//! # AST 打印
//!
//! 以全括号前缀形式输出 AST，用于调试和测试优先级。
//!
//! ```text
//! -123 * (45.67)   =>   (* (- 123) (group 45.67))
//! ```

use crate::script::ast::{Expr, Stmt};

/// 打印表达式
pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(value) => value.to_string(),
        Expr::Grouping(inner) => parenthesize("group", &[inner.as_ref()]),
        Expr::Unary { operator, operand } => parenthesize(&operator.lexeme, &[operand.as_ref()]),
        Expr::Binary {
            left,
            operator,
            right,
        } => parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()]),
        Expr::Variable { name } => name.lexeme.clone(),
        Expr::Assign { name, value } => format!("(= {} {})", name.lexeme, print_expr(value)),
    }
}

/// 打印语句
pub fn print_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Expression(expr) => parenthesize(";", &[expr]),
        Stmt::Print(expr) => parenthesize("print", &[expr]),
        Stmt::Var {
            name,
            initializer: Some(init),
        } => format!("(var {} {})", name.lexeme, print_expr(init)),
        Stmt::Var {
            name,
            initializer: None,
        } => format!("(var {})", name.lexeme),
        Stmt::Block(statements) => {
            let mut out = String::from("(block");
            for s in statements {
                out.push(' ');
                out.push_str(&print_stmt(s));
            }
            out.push(')');
            out
        }
    }
}

/// 打印整个程序，每条顶层语句一行
pub fn print_program(statements: &[Stmt]) -> String {
    statements
        .iter()
        .map(print_stmt)
        .collect::<Vec<_>>()
        .join("\n")
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut out = format!("({}", name);
    for expr in exprs {
        out.push(' ');
        out.push_str(&print_expr(expr));
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::token::{Token, TokenType};

    fn op(kind: TokenType, lexeme: &str) -> Token {
        Token::new(kind, lexeme, None, 1)
    }

    #[test]
    fn test_print_hand_built_expression() {
        let expr = Expr::binary(
            Expr::unary(op(TokenType::Minus, "-"), Expr::literal(123.0)),
            op(TokenType::Star, "*"),
            Expr::grouping(Expr::literal(45.67)),
        );
        insta::assert_snapshot!(print_expr(&expr), @"(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_print_literals_and_variables() {
        assert_eq!(print_expr(&Expr::nil()), "nil");
        assert_eq!(print_expr(&Expr::literal(true)), "true");
        assert_eq!(print_expr(&Expr::literal("text")), "text");

        let name = op(TokenType::Identifier, "a");
        assert_eq!(print_expr(&Expr::variable(name.clone())), "a");
        assert_eq!(
            print_expr(&Expr::assign(name, Expr::literal(2.0))),
            "(= a 2)"
        );
    }

    #[test]
    fn test_print_statements() {
        let name = op(TokenType::Identifier, "a");
        let program = vec![
            Stmt::Var {
                name: name.clone(),
                initializer: Some(Expr::literal(1.0)),
            },
            Stmt::Block(vec![
                Stmt::Var {
                    name: name.clone(),
                    initializer: None,
                },
                Stmt::Print(Expr::variable(name.clone())),
            ]),
            Stmt::Expression(Expr::assign(name, Expr::nil())),
        ];

        insta::assert_snapshot!(print_program(&program), @r"
        (var a 1)
        (block (var a) (print a))
        (; (= a nil))
        ");
    }
}
