//! # lopdf 压缩引擎
//!
//! 通过重新保存 PDF 实现流级压缩：
//! 1. 清除未引用对象（垃圾回收）
//! 2. 对象重编号（压实交叉引用表）
//! 3. 压缩内容流（deflate）
//!
//! 不重编码图像，不改变页面内容。
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 通过 `Compressor` trait 调用
//! - 使用 `lopdf` crate

use crate::compressor::CompressOptions;
use crate::error::{PdfpressError, Result};

use lopdf::Document;
use std::path::Path;

/// 压缩引擎接口
///
/// 以 trait 注入，测试可用桩实现替换真实引擎。
pub trait Compressor: Sync + Send {
    /// 将 `input` 压缩保存到 `output`
    fn compress(&self, input: &Path, output: &Path) -> Result<()>;
}

/// 基于 lopdf 的流压缩引擎
pub struct LopdfEngine {
    options: CompressOptions,
}

impl LopdfEngine {
    /// 创建新的压缩引擎
    pub fn new(options: CompressOptions) -> Self {
        Self { options }
    }

    /// 引擎描述（用于运行前回显）
    pub fn describe(&self) -> String {
        format!(
            "lopdf stream compaction (quality hint {}, dpi hint {})",
            self.options.image_quality, self.options.image_dpi
        )
    }
}

impl Compressor for LopdfEngine {
    fn compress(&self, input: &Path, output: &Path) -> Result<()> {
        let mut doc = Document::load(input).map_err(|e| PdfpressError::PdfError {
            path: input.display().to_string(),
            reason: e.to_string(),
        })?;

        // 垃圾回收：剔除未从 Root 可达的对象，再压实对象编号
        doc.prune_objects();
        doc.renumber_objects();

        // deflate 内容流
        doc.compress();

        doc.save(output).map_err(|e| PdfpressError::PdfError {
            path: output.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}
