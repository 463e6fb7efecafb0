//! # 工具函数模块
//!
//! 提供美化输出、进度条、文件大小格式化等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `batch/` 模块使用
//! - 子模块: output, progress, size

pub mod output;
pub mod progress;
pub mod size;
