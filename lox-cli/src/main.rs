//! # Lox CLI
//!
//! Lox 解释器驱动：运行脚本文件，或进入交互式提示符。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p lox-cli -- script.lox
//! cargo run -p lox-cli -- script.lox --tokens --ast -vv
//! cargo run -p lox-cli                     # 交互模式
//! cargo run -p lox-cli -- --config lox.json
//! ```
//!
//! ## 退出码
//!
//! | 退出码 | 含义 |
//! |--------|------|
//! | 0  | 成功 |
//! | 64 | 命令行用法错误 |
//! | 65 | 词法/语法错误，脚本未执行 |
//! | 70 | 运行时错误 |
//! | 74 | 读写失败 |

mod config;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use lox_runtime::{LoxError, RuntimeError, Session, print_program, session};
use tracing::{Level, debug, info, warn};

use config::AppConfig;

/// sysexits 风格的退出码
mod exit {
    pub const USAGE: u8 = 64;
    pub const DATA_ERR: u8 = 65;
    pub const SOFTWARE: u8 = 70;
    pub const IO_ERR: u8 = 74;
}

#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(about = "Lox 解释器 - 运行脚本文件或交互式提示符")]
#[command(version)]
struct Cli {
    /// 脚本文件，省略时进入交互模式
    script: Option<PathBuf>,

    /// 配置文件（默认：当前目录下的 lox.json）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 运行前输出 token 序列（JSON 行）
    #[arg(long)]
    tokens: bool,

    /// 运行前输出 AST
    #[arg(long)]
    ast: bool,

    /// 日志详细程度（-v / -vv / -vvv）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// 合并命令行与配置文件后的运行选项
#[derive(Debug)]
struct Options {
    dump_tokens: bool,
    dump_ast: bool,
    prompt: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(exit::USAGE),
            };
        }
    };

    let (config, warning) = AppConfig::discover(cli.config.as_deref());
    init_logging(log_level(cli.verbose, &config));
    if let Some(e) = warning {
        warn!(error = format!("{e:#}"), "配置文件无效，使用默认配置");
    }

    let options = Options {
        dump_tokens: cli.tokens || config.debug.dump_tokens,
        dump_ast: cli.ast || config.debug.dump_ast,
        prompt: config.prompt,
    };
    debug!(?options, "options resolved");

    match cli.script {
        Some(path) => run_file(&path, &options),
        None => match run_prompt(&options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ {e:#}");
                ExitCode::from(exit::IO_ERR)
            }
        },
    }
}

/// 命令行 `-v` 优先，其次是配置文件，默认 WARN
fn log_level(verbose: u8, config: &AppConfig) -> Level {
    match verbose {
        0 => config.level().unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// 日志写到 stderr，不与程序输出混在一起
fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_file(path: &Path, options: &Options) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ 无法读取脚本 {}: {}", path.display(), e);
            return ExitCode::from(exit::IO_ERR);
        }
    };
    info!(path = %path.display(), bytes = source.len(), "run script");

    if let Err(e) = dump(&source, options) {
        eprintln!("❌ {e:#}");
        return ExitCode::from(exit::IO_ERR);
    }

    let mut session = Session::new(io::stdout());
    match session.run(&source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run_prompt(options: &Options) -> anyhow::Result<()> {
    info!("enter interactive prompt");
    let stdin = io::stdin();
    let mut session = Session::new(io::stdout());
    let mut line = String::new();

    loop {
        print!("{}", options.prompt);
        io::stdout().flush().context("刷新标准输出失败")?;

        line.clear();
        let read = stdin.lock().read_line(&mut line).context("读取输入失败")?;
        if read == 0 {
            // EOF
            println!();
            break;
        }

        dump(&line, options)?;
        match session.run_repl_line(&line) {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {}
            Err(e) => eprintln!("{e}"),
        }
        // 上一行的错误不影响下一行
        session.reset_error();
    }

    Ok(())
}

/// 按选项输出 token 与 AST，写到 stderr
fn dump(source: &str, options: &Options) -> anyhow::Result<()> {
    let mut err = io::stderr().lock();

    if options.dump_tokens {
        let (tokens, _) = session::tokens(source);
        for token in &tokens {
            let json = serde_json::to_string(token).context("序列化 token 失败")?;
            writeln!(err, "{json}")?;
        }
    }

    if options.dump_ast {
        // 有错误时不输出，错误由执行阶段统一报告
        if let Ok(statements) = session::parse(source) {
            writeln!(err, "{}", print_program(&statements))?;
        }
    }

    Ok(())
}

fn exit_code(e: &LoxError) -> u8 {
    match e {
        LoxError::Static(_) => exit::DATA_ERR,
        LoxError::Runtime(RuntimeError::Output { .. }) => exit::IO_ERR,
        LoxError::Runtime(_) => exit::SOFTWARE,
    }
}
