//! # 统一错误处理模块
//!
//! 定义 Pdfpress 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Pdfpress 统一错误类型
#[derive(Error, Debug)]
pub enum PdfpressError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to create directory: {path}")]
    DirectoryCreateError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Input directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // PDF 处理错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to process PDF: {path}\nReason: {reason}")]
    PdfError { path: String, reason: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PdfpressError>;
