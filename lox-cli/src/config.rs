//! # Config 模块
//!
//! 解释器驱动配置。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件（`--config` 指定，否则当前目录下的 `lox.json`）
//! 3. 默认值（最低）

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::Level;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "lox.json";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// REPL 提示符
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// 日志级别（`error` / `warn` / `info` / `debug` / `trace`）
    #[serde(default)]
    pub log_level: Option<String>,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

/// 调试配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 运行前以 JSON 行输出 token 序列
    #[serde(default)]
    pub dump_tokens: bool,

    /// 运行前输出 AST
    #[serde(default)]
    pub dump_ast: bool,
}

fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            log_level: None,
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))
    }

    /// 按优先级查找并加载配置
    ///
    /// 未指定路径且默认文件不存在时直接使用默认值；
    /// 文件无法读取或解析时同样回退到默认值，并把错误一并返回，
    /// 由调用方在日志初始化后输出警告。
    pub fn discover(explicit: Option<&Path>) -> (Self, Option<anyhow::Error>) {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return (Self::default(), None);
                }
                path
            }
        };

        match Self::load(&path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// 配置文件中的日志级别，无法识别时为 `None`
    pub fn level(&self) -> Option<Level> {
        self.log_level.as_deref()?.parse().ok()
    }
}
