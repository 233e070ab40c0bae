//! # Error 模块
//!
//! 定义 lox-runtime 中使用的错误类型。
//!
//! 词法和语法错误以 [`Diagnostic`](crate::diagnostic::Diagnostic) 形式收集，
//! 运行时错误使用 [`RuntimeError`]，一经产生即中止本次执行。

use thiserror::Error;

use crate::diagnostic::DiagnosticResult;
use crate::script::Token;

/// 运行时错误
///
/// `Display` 只输出消息本身，带行号的完整格式见 [`RuntimeError::report`]。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 操作数类型不匹配
    #[error("{message}")]
    TypeError { token: Token, message: String },

    /// 读取或赋值未定义的变量
    #[error("Undefined variable '{}'.", .name.lexeme)]
    UndefinedVariable { name: Token },

    /// 输出写入失败
    #[error("Output error: {message}")]
    Output { message: String },
}

impl RuntimeError {
    pub fn type_error(token: &Token, message: impl Into<String>) -> Self {
        Self::TypeError {
            token: token.clone(),
            message: message.into(),
        }
    }

    pub fn undefined_variable(name: &Token) -> Self {
        Self::UndefinedVariable { name: name.clone() }
    }

    /// 出错位置的 token
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::TypeError { token, .. } => Some(token),
            Self::UndefinedVariable { name } => Some(name),
            Self::Output { .. } => None,
        }
    }

    /// 出错行号
    pub fn line(&self) -> Option<usize> {
        self.token().map(|t| t.line)
    }

    /// 面向用户的报告格式：`<message>\n[line <N>]`
    pub fn report(&self) -> String {
        match self.line() {
            Some(line) => format!("{}\n[line {}]", self, line),
            None => self.to_string(),
        }
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Output {
            message: e.to_string(),
        }
    }
}

/// lox-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoxError {
    /// 词法/语法错误，程序未被执行
    #[error("{0}")]
    Static(DiagnosticResult),

    /// 运行时错误
    #[error("{}", .0.report())]
    Runtime(#[from] RuntimeError),
}

impl From<DiagnosticResult> for LoxError {
    fn from(diagnostics: DiagnosticResult) -> Self {
        Self::Static(diagnostics)
    }
}

/// Result 类型别名
pub type LoxResult<T> = Result<T, LoxError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostic;
    use crate::script::TokenType;

    #[test]
    fn test_runtime_error_report_format() {
        let token = Token::new(TokenType::Plus, "+", None, 4);
        let err = RuntimeError::type_error(&token, "Operands must be two numbers or two strings.");
        assert_eq!(
            err.to_string(),
            "Operands must be two numbers or two strings."
        );
        assert_eq!(
            err.report(),
            "Operands must be two numbers or two strings.\n[line 4]"
        );
    }

    #[test]
    fn test_undefined_variable_message() {
        let name = Token::new(TokenType::Identifier, "a", None, 2);
        let err = RuntimeError::undefined_variable(&name);
        assert_eq!(err.to_string(), "Undefined variable 'a'.");
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_output_error_has_no_line() {
        let err = RuntimeError::from(std::io::Error::other("broken pipe"));
        assert_eq!(err.line(), None);
        assert_eq!(err.report(), "Output error: broken pipe");
    }

    #[test]
    fn test_lox_error_display() {
        let mut diagnostics = DiagnosticResult::new();
        diagnostics.push(Diagnostic::lexical(1, "Unexpected character."));
        let err = LoxError::from(diagnostics);
        assert_eq!(err.to_string(), "[line 1] Error: Unexpected character.");

        let name = Token::new(TokenType::Identifier, "x", None, 9);
        let err = LoxError::from(RuntimeError::undefined_variable(&name));
        assert_eq!(err.to_string(), "Undefined variable 'x'.\n[line 9]");
    }
}
