//! # Pdfpress - 并行 PDF 批量压缩工具
//!
//! 通过 PDF 库的流压缩能力（清除未引用对象、压缩内容流、语法规整）
//! 批量重新保存目录中的 PDF 文件，并行处理并汇总压缩统计。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   ├── batch/      (文件收集与并行执行)
//!   ├── compressor/ (压缩引擎)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod compressor;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
