//! # 命令执行模块
//!
//! 实现批量压缩的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `compressor/`, `utils/`

pub mod compress;

use crate::cli::Cli;
use crate::error::Result;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    compress::execute(cli)
}
