//! # 批量执行器
//!
//! 并行执行批量压缩任务并汇总统计。
//!
//! ## 功能
//! - 基于 rayon 的固定大小线程池
//! - 进度条显示，完成回调注入（测试可捕获输出）
//! - 结果归约：计数与字节总量的可交换累加，与完成顺序无关
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 单个文件的压缩记录
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// 文件名
    pub file: String,
    /// 原始大小（字节）
    pub original_bytes: u64,
    /// 压缩后大小（字节）
    pub compressed_bytes: u64,
}

impl FileRecord {
    /// 压缩率（百分比），输出变大时为负
    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.original_bytes, self.compressed_bytes)
    }
}

/// 压缩率（百分比）：`(1 - compressed/original) * 100`
///
/// 原始大小为 0 时定义为 0，避免除零。
pub fn reduction_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    // 先取差值再除，整数可表示的百分比不受浮点舍入影响
    (original as f64 - compressed as f64) * 100.0 / original as f64
}

/// 单个任务处理结果
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    /// 压缩成功
    Compressed(FileRecord),
    /// 跳过（如输出文件已存在）
    Skipped(String),
    /// 处理失败
    Failed {
        /// 文件名
        file: String,
        /// 错误信息
        error: String,
    },
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// 成功数量
    pub compressed: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 成功文件的原始字节总量
    pub total_original_bytes: u64,
    /// 成功文件的压缩后字节总量
    pub total_compressed_bytes: u64,
    /// 成功文件明细
    pub records: Vec<FileRecord>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    /// 合并处理结果
    ///
    /// 字节总量只累加成功结果，失败与跳过只计数。
    pub fn merge(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Compressed(record) => {
                self.compressed += 1;
                self.total_original_bytes += record.original_bytes;
                self.total_compressed_bytes += record.compressed_bytes;
                self.records.push(record);
            }
            TaskOutcome::Skipped(_) => self.skipped += 1,
            TaskOutcome::Failed { file, error } => {
                self.failed += 1;
                self.failures.push((file, error));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.compressed + self.skipped + self.failed
    }

    /// 总体压缩率（百分比），无成功结果时为 0
    pub fn overall_reduction_percent(&self) -> f64 {
        reduction_percent(self.total_original_bytes, self.total_compressed_bytes)
    }

    /// 节省的字节数
    pub fn space_saved_bytes(&self) -> u64 {
        self.total_original_bytes
            .saturating_sub(self.total_compressed_bytes)
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行工作线程数
    workers: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 = 自动检测 CPU 数）
    pub fn new(workers: usize) -> Self {
        let workers = if workers == 0 { num_cpus::get() } else { workers };
        Self { workers }
    }

    /// 实际使用的工作线程数
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 并行处理文件列表
    ///
    /// `processor` 对每个文件执行压缩并返回结果；`report` 在每个结果
    /// 产生时被调用（通过进度条 suspend，保证输出不与进度条交错）。
    /// 提交顺序即 `files` 顺序，完成顺序不确定；汇总与顺序无关。
    pub fn run<F, R>(&self, files: Vec<PathBuf>, processor: F, report: R) -> BatchSummary
    where
        F: Fn(&Path) -> TaskOutcome + Sync + Send,
        R: Fn(&TaskOutcome) + Sync + Send,
    {
        let total = files.len();
        let pb = progress::create_progress_bar(total as u64, "Compressing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .unwrap();

        let outcomes: Vec<TaskOutcome> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let outcome = processor(file);
                    pb.suspend(|| report(&outcome));
                    pb.inc(1);
                    outcome
                })
                .collect()
        });

        pb.finish_and_clear();

        // 单线程归约，工作线程之间无共享可变状态
        let mut summary = BatchSummary::default();
        for outcome in outcomes {
            summary.merge(outcome);
        }

        summary
    }
}
