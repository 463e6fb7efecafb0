//! # 压缩引擎模块
//!
//! 定义压缩引擎接口与 lopdf 实现。
//!
//! ## 功能
//! - `Compressor` trait：引擎可注入、可在测试中替换
//! - `LopdfEngine`：基于 lopdf 的流级压缩
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 使用
//! - 使用 `lopdf` 进行 PDF 解析与重存

pub mod engine;

pub use engine::{Compressor, LopdfEngine};

/// 压缩配置
///
/// 图像参数由命令行透传给引擎。流级压缩不重编码图像数据，
/// 这些参数目前仅作提示记录。
#[derive(Debug, Clone, Copy)]
pub struct CompressOptions {
    /// 图像质量提示 (0-100)
    pub image_quality: u8,
    /// 图像目标 DPI 提示
    pub image_dpi: u32,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            image_quality: 50,
            image_dpi: 150,
        }
    }
}
