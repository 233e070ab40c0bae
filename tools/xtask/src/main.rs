//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 lox-runtime 覆盖率
//! - `script-check`: 检查 `.lox` 脚本（词法、语法），不执行

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use lox_runtime::{DiagnosticKind, DiagnosticResult, session};
use walkdir::WalkDir;

/// script-check 默认目录（相对于 workspace root）
const DEFAULT_SCRIPTS_DIR: &str = "scripts";

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(["llvm-cov", "--version"])
        .status();
    match status {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets"]);
            run("cargo clippy --workspace --all-targets", &mut clippy)?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        "cov-runtime" => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "lox-runtime", "--html"]);
            run("cargo llvm-cov -p lox-runtime --html", &mut cov)?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "script-check" => {
            let path = args.next();
            script_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-runtime     运行 lox-runtime 覆盖率报告
  script-check    检查脚本文件

SCRIPT-CHECK:
  cargo xtask script-check [path]

  不带参数：检查 scripts/ 下所有 .lox 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - 词法错误（非法字符、未闭合字符串）
    - 语法错误（所有相互独立的错误都会列出）

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo cov-runtime   -> cargo xtask cov-runtime
  cargo script-check  -> cargo xtask script-check
"#
    );
}

//=============================================================================
// script-check 命令实现
//=============================================================================

/// 单个脚本的检查结果
struct ScriptReport {
    path: PathBuf,
    statements: usize,
    diagnostics: DiagnosticResult,
}

/// 执行脚本检查
fn script_check(path: Option<&str>) -> anyhow::Result<()> {
    let root = PathBuf::from(path.unwrap_or(DEFAULT_SCRIPTS_DIR));
    if !root.exists() {
        match path {
            Some(p) => anyhow::bail!("路径不存在: {}", p),
            None => anyhow::bail!(
                "默认脚本目录不存在: {}\n请在 workspace 根目录运行，或指定脚本路径",
                root.display()
            ),
        }
    }

    let files = collect_script_files(&root)?;
    if files.is_empty() {
        eprintln!("未找到脚本文件（.lox）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个脚本文件...\n", files.len());

    let mut reports = Vec::with_capacity(files.len());
    let mut read_errors = 0;
    for file in &files {
        match std::fs::read_to_string(file) {
            Ok(source) => reports.push(check_source(file, &source)),
            Err(e) => {
                eprintln!("[ERROR] {}: 无法读取文件 - {}", file.display(), e);
                read_errors += 1;
            }
        }
    }

    let error_count = print_reports(&reports) + read_errors;
    if error_count > 0 {
        anyhow::bail!("脚本检查发现 {} 个错误", error_count);
    }

    Ok(())
}

/// 收集 `.lox` 文件，`root` 本身是文件时直接返回
fn collect_script_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && is_lox_script(path) {
            files.push(path.to_path_buf());
        }
    }
    // 显式指定的单个文件不要求扩展名
    if files.is_empty() && root.is_file() {
        files.push(root.to_path_buf());
    }
    Ok(files)
}

fn is_lox_script(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "lox")
}

/// 词法 + 语法检查，不执行
fn check_source(path: &Path, source: &str) -> ScriptReport {
    match session::parse(source) {
        Ok(statements) => ScriptReport {
            path: path.to_path_buf(),
            statements: statements.len(),
            diagnostics: DiagnosticResult::new(),
        },
        Err(lox_runtime::LoxError::Static(diagnostics)) => ScriptReport {
            path: path.to_path_buf(),
            statements: 0,
            diagnostics,
        },
        // parse 只产生静态错误
        Err(lox_runtime::LoxError::Runtime(_)) => ScriptReport {
            path: path.to_path_buf(),
            statements: 0,
            diagnostics: DiagnosticResult::new(),
        },
    }
}

/// 输出检查结果，返回错误总数
fn print_reports(reports: &[ScriptReport]) -> usize {
    for report in reports {
        if report.diagnostics.is_empty() {
            eprintln!(
                "[OK] {}: {} 条顶层语句",
                report.path.display(),
                report.statements
            );
            continue;
        }
        for diag in report.diagnostics.iter() {
            eprintln!("[ERROR] {}: {}", report.path.display(), diag);
        }
    }

    let total: usize = reports.iter().map(|r| r.diagnostics.error_count()).sum();
    let lexical: usize = reports
        .iter()
        .map(|r| r.diagnostics.filter_by_kind(DiagnosticKind::Lexical).len())
        .sum();

    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个脚本", reports.len());
    if total > 0 {
        eprintln!(
            "❌ {} 个错误（词法 {}，语法 {}）",
            total,
            lexical,
            total - lexical
        );
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
    total
}
