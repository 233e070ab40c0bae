//! # Token 模块
//!
//! 词法单元定义：类别枚举、字面量以及 [`Token`] 记录。

use serde::{Deserialize, Serialize};

/// 词法类别
///
/// 固定的封闭集合。部分关键字（如 `class`、`fun`）当前语法未使用，
/// 但仍会被识别为保留字，参与错误恢复时的语句边界判断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    // 单字符
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // 一或两个字符
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // 字面量
    Identifier,
    String,
    Number,

    // 关键字
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenType {
    /// 查找保留字
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "and" => Self::And,
            "class" => Self::Class,
            "else" => Self::Else,
            "false" => Self::False,
            "for" => Self::For,
            "fun" => Self::Fun,
            "if" => Self::If,
            "nil" => Self::Nil,
            "or" => Self::Or,
            "print" => Self::Print,
            "return" => Self::Return,
            "super" => Self::Super,
            "this" => Self::This,
            "true" => Self::True,
            "var" => Self::Var,
            "while" => Self::While,
            _ => return None,
        };
        Some(kind)
    }

    /// 是否可以作为一条语句的开头（用于 panic-mode 同步）
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Fun
                | Self::Var
                | Self::For
                | Self::If
                | Self::While
                | Self::Print
                | Self::Return
        )
    }
}

/// 扫描阶段解码出的字面量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    String(String),
}

/// 词法单元
///
/// 创建后不可变。`lexeme` 保留源码中的原始文本，`line` 从 1 开始。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenType,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    pub fn new(
        kind: TokenType,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    /// 文件结束标记
    pub fn eof(line: usize) -> Self {
        Self::new(TokenType::Eof, "", None, line)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenType::Eof
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {}", self.kind, self.lexeme)?;
        match &self.literal {
            Some(Literal::Number(n)) => write!(f, " {}", n),
            Some(Literal::String(s)) => write!(f, " {}", s),
            None => Ok(()),
        }
    }
}
