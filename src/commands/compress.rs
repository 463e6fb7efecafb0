//! # 批量压缩命令实现
//!
//! 收集输入目录中的 PDF 文件，通过工作线程池并行压缩到输出目录，
//! 汇总并打印前后大小统计。
//!
//! ## 功能
//! - 输出目录幂等创建
//! - 空输入集正常退出（非错误）
//! - 单文件失败不中断整个批次
//! - 完成时输出逐文件结果与汇总表格
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的 Cli
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `compressor/` 模块执行实际压缩

use crate::batch::{BatchRunner, BatchSummary, FileCollector, FileRecord, TaskOutcome};
use crate::cli::Cli;
use crate::compressor::{CompressOptions, Compressor, LopdfEngine};
use crate::error::{PdfpressError, Result};
use crate::utils::output;
use crate::utils::size::format_mb;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 批量任务上下文（工作线程间共享，只读）
struct BatchContext {
    input_dir: PathBuf,
    output_dir: PathBuf,
    overwrite: bool,
    engine: Arc<dyn Compressor>,
}

/// 执行批量压缩
pub fn execute(args: Cli) -> Result<()> {
    output::print_header("PDF Batch Compression");

    if !args.input_dir.is_dir() {
        return Err(PdfpressError::DirectoryNotFound {
            path: args.input_dir.display().to_string(),
        });
    }

    // 收集文件（排序，保证提交顺序确定）
    let collector = FileCollector::new(args.input_dir.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive);

    let files = collector.collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matching '{}' found in '{}'",
            args.pattern,
            args.input_dir.display()
        ));
        return Ok(());
    }

    // 确保输出目录存在
    fs::create_dir_all(&args.output_dir).map_err(|e| PdfpressError::DirectoryCreateError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let options = CompressOptions {
        image_quality: args.image_quality,
        image_dpi: args.image_dpi,
    };
    let engine = LopdfEngine::new(options);

    let runner = BatchRunner::new(args.workers);

    output::print_info(&format!("Found {} PDF files to compress", files.len()));
    output::print_info(&format!("Engine: {}", engine.describe()));
    output::print_info(&format!("Workers: {}", runner.workers()));

    let ctx = Arc::new(BatchContext {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        overwrite: args.overwrite,
        engine: Arc::new(engine),
    });

    let summary = runner.run(files, |file| process_file(file, &ctx), report_outcome);

    print_summary(&summary);

    Ok(())
}

/// 处理单个文件：计算输出路径，调用引擎，测量前后大小
///
/// 输出路径镜像输入目录下的相对子路径，递归模式中不同子目录的
/// 同名文件不会互相覆盖。引擎抛出的任何错误都在此处转换为
/// Failed 结果，不向上传播。
fn process_file(input: &Path, ctx: &BatchContext) -> TaskOutcome {
    let rel = match input.strip_prefix(&ctx.input_dir) {
        Ok(rel) if rel.file_name().is_some() => rel.to_path_buf(),
        _ => match input.file_name() {
            Some(name) => PathBuf::from(name),
            None => {
                return TaskOutcome::Failed {
                    file: input.display().to_string(),
                    error: "path has no file name".to_string(),
                }
            }
        },
    };
    let name = rel.display().to_string();
    let output_file = ctx.output_dir.join(&rel);

    if output_file.exists() && !ctx.overwrite {
        return TaskOutcome::Skipped(format!("Output exists, skipping: {}", output_file.display()));
    }

    if let Some(parent) = output_file.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            return TaskOutcome::Failed {
                file: name,
                error: PdfpressError::DirectoryCreateError {
                    path: parent.display().to_string(),
                    source: e,
                }
                .to_string(),
            };
        }
    }

    let original_bytes = fs::metadata(input).map(|m| m.len()).unwrap_or(0);

    match ctx.engine.compress(input, &output_file) {
        Ok(()) => {
            let compressed_bytes = fs::metadata(&output_file).map(|m| m.len()).unwrap_or(0);
            TaskOutcome::Compressed(FileRecord {
                file: name,
                original_bytes,
                compressed_bytes,
            })
        }
        Err(e) => TaskOutcome::Failed {
            file: name,
            error: e.to_string(),
        },
    }
}

/// 每个结果完成时的逐文件输出
fn report_outcome(outcome: &TaskOutcome) {
    match outcome {
        TaskOutcome::Compressed(record) => {
            output::print_success(&format!(
                "{}: {} -> {} ({:.1}% reduction)",
                record.file,
                format_mb(record.original_bytes),
                format_mb(record.compressed_bytes),
                record.reduction_percent()
            ));
        }
        TaskOutcome::Skipped(msg) => output::print_skip(msg),
        TaskOutcome::Failed { file, error } => {
            output::print_error(&format!("{}: {}", file, error));
        }
    }
}

/// 打印最终汇总
fn print_summary(summary: &BatchSummary) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct FileRow {
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Before")]
        before: String,
        #[tabled(rename = "After")]
        after: String,
        #[tabled(rename = "Reduction")]
        reduction: String,
    }

    output::print_header("Compression Summary");

    if !summary.records.is_empty() {
        let rows: Vec<FileRow> = summary
            .records
            .iter()
            .map(|r| FileRow {
                file: r.file.clone(),
                before: format_mb(r.original_bytes),
                after: format_mb(r.compressed_bytes),
                reduction: format!("{:.1}%", r.reduction_percent()),
            })
            .collect();

        let table = Table::new(&rows);
        println!("{}", table);
    }

    output::print_separator();
    output::print_info(&format!("Total files processed: {}", summary.total()));
    output::print_info(&format!("Successful compressions: {}", summary.compressed));
    output::print_info(&format!("Skipped files: {}", summary.skipped));
    output::print_info(&format!("Failed compressions: {}", summary.failed));
    output::print_info(&format!(
        "Total original size: {}",
        format_mb(summary.total_original_bytes)
    ));
    output::print_info(&format!(
        "Total compressed size: {}",
        format_mb(summary.total_compressed_bytes)
    ));
    output::print_info(&format!(
        "Overall size reduction: {:.1}%",
        summary.overall_reduction_percent()
    ));
    output::print_info(&format!(
        "Space saved: {}",
        format_mb(summary.space_saved_bytes())
    ));
    output::print_separator();

    if !summary.failures.is_empty() {
        output::print_warning("Failed files:");
        for (file, error) in summary.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", file, error));
        }
        if summary.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", summary.failures.len() - 10));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    /// 桩引擎：按文件名决定成败，输出写入固定内容
    struct StubEngine {
        fail_marker: &'static str,
    }

    impl Compressor for StubEngine {
        fn compress(&self, input: &Path, output: &Path) -> Result<()> {
            let name = input.file_name().unwrap().to_string_lossy();
            if name.contains(self.fail_marker) {
                return Err(PdfpressError::PdfError {
                    path: input.display().to_string(),
                    reason: "stub failure".to_string(),
                });
            }
            fs::write(output, b"pdf").map_err(|e| PdfpressError::PdfError {
                path: output.display().to_string(),
                reason: e.to_string(),
            })
        }
    }

    fn setup_dirs(tag: &str) -> (PathBuf, PathBuf) {
        let base = std::env::temp_dir().join(format!("pdfpress_cmd_{}_{}", tag, std::process::id()));
        let input = base.join("in");
        let output = base.join("out");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();
        (input, output)
    }

    fn ctx(input_dir: PathBuf, output_dir: PathBuf, overwrite: bool) -> BatchContext {
        BatchContext {
            input_dir,
            output_dir,
            overwrite,
            engine: Arc::new(StubEngine { fail_marker: "bad" }),
        }
    }

    #[test]
    fn test_process_file_success_measures_sizes() {
        let (input_dir, output_dir) = setup_dirs("ok");
        let input = input_dir.join("good.pdf");
        fs::write(&input, vec![0u8; 1000]).unwrap();

        let outcome = process_file(&input, &ctx(input_dir.clone(), output_dir.clone(), false));
        match outcome {
            TaskOutcome::Compressed(record) => {
                assert_eq!(record.file, "good.pdf");
                assert_eq!(record.original_bytes, 1000);
                assert_eq!(record.compressed_bytes, 3);
                assert!(output_dir.join("good.pdf").is_file());
            }
            other => panic!("expected Compressed, got {:?}", other),
        }

        fs::remove_dir_all(input_dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_process_file_failure_is_contained() {
        let (input_dir, output_dir) = setup_dirs("fail");
        let input = input_dir.join("bad.pdf");
        fs::write(&input, b"whatever").unwrap();

        let outcome = process_file(&input, &ctx(input_dir.clone(), output_dir, false));
        match outcome {
            TaskOutcome::Failed { file, error } => {
                assert_eq!(file, "bad.pdf");
                assert!(error.contains("stub failure"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }

        fs::remove_dir_all(input_dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_process_file_skips_existing_output() {
        let (input_dir, output_dir) = setup_dirs("skip");
        let input = input_dir.join("dup.pdf");
        fs::write(&input, b"whatever").unwrap();
        fs::write(output_dir.join("dup.pdf"), b"already there").unwrap();

        let outcome = process_file(&input, &ctx(input_dir.clone(), output_dir.clone(), false));
        assert!(matches!(outcome, TaskOutcome::Skipped(_)));

        // --overwrite 时重新压缩
        let outcome = process_file(&input, &ctx(input_dir.clone(), output_dir, true));
        assert!(matches!(outcome, TaskOutcome::Compressed(_)));

        fs::remove_dir_all(input_dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_batch_mixed_results() {
        let (input_dir, output_dir) = setup_dirs("mixed");
        fs::write(input_dir.join("a.pdf"), vec![0u8; 100]).unwrap();
        fs::write(input_dir.join("b.pdf"), vec![0u8; 200]).unwrap();
        fs::write(input_dir.join("bad.pdf"), b"x").unwrap();

        let files = FileCollector::new(input_dir.clone())
            .with_pattern("*.pdf")
            .collect();
        assert_eq!(files.len(), 3);

        let context = ctx(input_dir.clone(), output_dir, false);
        let summary =
            BatchRunner::new(2).run(files, |file| process_file(file, &context), |_| {});

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.compressed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 0);
        // 字节总量只含成功文件
        assert_eq!(summary.total_original_bytes, 300);
        assert_eq!(summary.failures[0].0, "bad.pdf");

        fs::remove_dir_all(input_dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_recursive_same_name_mirrors_subdirs() {
        let (input_dir, output_dir) = setup_dirs("mirror");
        fs::create_dir_all(input_dir.join("a")).unwrap();
        fs::create_dir_all(input_dir.join("b")).unwrap();
        fs::write(input_dir.join("a").join("x.pdf"), vec![0u8; 10]).unwrap();
        fs::write(input_dir.join("b").join("x.pdf"), vec![0u8; 20]).unwrap();

        let files = FileCollector::new(input_dir.clone())
            .with_pattern("*.pdf")
            .recursive(true)
            .collect();
        assert_eq!(files.len(), 2);

        let context = ctx(input_dir.clone(), output_dir.clone(), false);
        let summary =
            BatchRunner::new(2).run(files, |file| process_file(file, &context), |_| {});

        // 同名文件互不覆盖，各自落在镜像的子目录下
        assert_eq!(summary.compressed, 2);
        assert!(output_dir.join("a").join("x.pdf").is_file());
        assert!(output_dir.join("b").join("x.pdf").is_file());

        fs::remove_dir_all(input_dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_execute_uncreatable_output_dir_is_fatal() {
        let (input_dir, output_dir) = setup_dirs("fatal");
        fs::write(input_dir.join("a.pdf"), b"x").unwrap();
        // 用普通文件挡住输出目录路径
        let blocker = output_dir.join("blocker");
        fs::write(&blocker, b"file").unwrap();

        let cli = Cli {
            input_dir: input_dir.clone(),
            output_dir: blocker.join("nested"),
            image_quality: 50,
            image_dpi: 150,
            workers: 1,
            pattern: "*.pdf".to_string(),
            recursive: false,
            overwrite: false,
        };

        let result = execute(cli);
        assert!(matches!(
            result,
            Err(PdfpressError::DirectoryCreateError { .. })
        ));

        fs::remove_dir_all(input_dir.parent().unwrap()).unwrap();
    }
}
