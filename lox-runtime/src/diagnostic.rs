//! # 诊断模块
//!
//! 收集词法与语法阶段的静态错误，不依赖 IO。
//!
//! ## 设计原则
//!
//! - 扫描器和解析器只负责**上报**，由调用方决定如何输出
//! - 一次扫描/解析尽可能多地收集错误，不在第一个错误处停止
//! - 每条诊断自带行号和位置，无需查看内部状态即可定位

use thiserror::Error;

use crate::script::Token;

/// 诊断类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// 词法错误（非法字符、未闭合字符串）
    Lexical,
    /// 语法错误（缺失或多余的 token）
    Syntax,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Syntax => write!(f, "syntax"),
        }
    }
}

/// 错误位置
///
/// 决定输出中 `Error` 之后的部分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// 只有行号（词法错误）
    Line,
    /// 在输入末尾
    AtEnd,
    /// 在某个 token 处
    At(String),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line => Ok(()),
            Self::AtEnd => write!(f, " at end"),
            Self::At(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// 诊断条目
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 行号（从 1 开始）
    pub line: usize,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    /// 创建词法错误
    pub fn lexical(line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Lexical,
            line,
            location: Location::Line,
            message: message.into(),
        }
    }

    /// 创建定位到 token 的语法错误
    pub fn syntax(token: &Token, message: impl Into<String>) -> Self {
        let location = if token.is_eof() {
            Location::AtEnd
        } else {
            Location::At(token.lexeme.clone())
        };
        Self {
            kind: DiagnosticKind::Syntax,
            line: token.line,
            location,
            message: message.into(),
        }
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticResult {
    /// 诊断条目列表（按上报顺序）
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(kind = %diagnostic.kind, line = diagnostic.line, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// 是否没有任何诊断
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按类别过滤
    pub fn filter_by_kind(&self, kind: DiagnosticKind) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind == kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl std::fmt::Display for DiagnosticResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::TokenType;

    #[test]
    fn test_lexical_display_has_no_location() {
        let diag = Diagnostic::lexical(3, "Unexpected character.");
        assert_eq!(diag.to_string(), "[line 3] Error: Unexpected character.");
    }

    #[test]
    fn test_syntax_display_at_token() {
        let token = Token::new(TokenType::Identifier, "foo", None, 7);
        let diag = Diagnostic::syntax(&token, "Expect ';' after value.");
        assert_eq!(
            diag.to_string(),
            "[line 7] Error at 'foo': Expect ';' after value."
        );
    }

    #[test]
    fn test_syntax_display_at_end() {
        let diag = Diagnostic::syntax(&Token::eof(2), "Expect ')' after expression.");
        assert_eq!(
            diag.to_string(),
            "[line 2] Error at end: Expect ')' after expression."
        );
        assert_eq!(diag.location, Location::AtEnd);
    }

    #[test]
    fn test_diagnostic_result_filter_and_merge() {
        let mut result = DiagnosticResult::new();
        assert!(result.is_empty());

        result.push(Diagnostic::lexical(1, "Unterminated string."));
        result.push(Diagnostic::syntax(&Token::eof(1), "Expected expression."));

        let mut other = DiagnosticResult::new();
        other.push(Diagnostic::lexical(4, "Unexpected character."));
        result.merge(other);

        assert!(!result.is_empty());
        assert_eq!(result.error_count(), 3);
        assert_eq!(result.filter_by_kind(DiagnosticKind::Lexical).len(), 2);
        assert_eq!(result.filter_by_kind(DiagnosticKind::Syntax).len(), 1);
    }

    #[test]
    fn test_diagnostic_result_display_one_per_line() {
        let mut result = DiagnosticResult::new();
        result.push(Diagnostic::lexical(1, "Unexpected character."));
        result.push(Diagnostic::lexical(2, "Unexpected character."));

        assert_eq!(
            result.to_string(),
            "[line 1] Error: Unexpected character.\n[line 2] Error: Unexpected character."
        );
    }
}
