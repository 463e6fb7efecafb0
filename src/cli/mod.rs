//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 参数结构
//! - 输入/输出目录
//! - 压缩引擎透传参数（图像质量、DPI）
//! - 并行与批量控制（workers、pattern、recursive、overwrite）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/compress.rs`

use clap::Parser;
use std::path::PathBuf;

/// Pdfpress - 并行 PDF 批量压缩工具
#[derive(Parser, Debug)]
#[command(name = "pdfpress")]
#[command(version)]
#[command(about = "Compress PDF files in batch using stream-level optimization", long_about = None)]
pub struct Cli {
    /// Input directory containing PDF files
    #[arg(short, long, default_value = "papers")]
    pub input_dir: PathBuf,

    /// Output directory for compressed files
    #[arg(short, long, default_value = "papers_compressed")]
    pub output_dir: PathBuf,

    /// Image quality hint forwarded to the compression engine (0-100)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub image_quality: u8,

    /// Target image DPI hint forwarded to the compression engine
    #[arg(long, default_value_t = 150)]
    pub image_dpi: u32,

    /// Number of parallel workers (0 = auto)
    #[arg(short = 'j', long, default_value_t = 2)]
    pub workers: usize,

    /// Glob pattern for input files (comma-separated, case-insensitive)
    #[arg(long, default_value = "*.pdf")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
