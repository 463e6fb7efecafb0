//! # 文件大小格式化
//!
//! 字节数与 MB 显示之间的换算。
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 使用

/// 字节数换算为 MB
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// 格式化为 "x.xx MB"
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes_to_mb(bytes))
}
