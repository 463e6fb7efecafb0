//! # 批量处理模块
//!
//! 提供统一的文件批量处理能力。
//!
//! ## 功能
//! - 收集匹配文件列表（排序，保证提交顺序确定）
//! - 并行处理
//! - 进度反馈与结果汇总
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, BatchSummary, FileRecord, TaskOutcome};
