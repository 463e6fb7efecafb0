//! # 文件收集器
//!
//! 根据输入目录和模式收集待处理文件列表。
//!
//! ## 功能
//! - glob 模式匹配（`*` / `?`，大小写不敏感）
//! - 可选递归目录搜索
//! - 按文件名排序，保证任务提交顺序确定
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `walkdir` 遍历目录

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec!["*".to_string()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.patterns.is_empty() {
            self.patterns = vec!["*".to_string()];
        }
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件，按文件名排序
    pub fn collect(&self) -> Vec<PathBuf> {
        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.input)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// 检查文件是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.patterns
            .iter()
            .any(|pattern| Self::glob_match(pattern, filename))
    }

    /// 简单 glob 匹配（支持 * 和 ? 通配符，大小写不敏感）
    ///
    /// 迭代回溯实现，多个 `*` 的模式仍为线性复杂度。
    fn glob_match(pattern: &str, text: &str) -> bool {
        let pattern = pattern.as_bytes();
        let text = text.as_bytes();

        let mut p = 0;
        let mut t = 0;
        let mut star_p = None;
        let mut star_t = 0;

        while t < text.len() {
            if p < pattern.len()
                && (pattern[p] == b'?' || pattern[p].eq_ignore_ascii_case(&text[t]))
            {
                p += 1;
                t += 1;
            } else if p < pattern.len() && pattern[p] == b'*' {
                star_p = Some(p);
                star_t = t;
                p += 1;
            } else if let Some(sp) = star_p {
                p = sp + 1;
                star_t += 1;
                t = star_t;
            } else {
                return false;
            }
        }

        while p < pattern.len() && pattern[p] == b'*' {
            p += 1;
        }

        p == pattern.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_glob_match() {
        assert!(FileCollector::glob_match("*.pdf", "paper.pdf"));
        assert!(FileCollector::glob_match("*.pdf", "attention-is-all-you-need.pdf"));
        assert!(FileCollector::glob_match("*.pdf", "SCAN.PDF"));
        assert!(!FileCollector::glob_match("*.pdf", "notes.txt"));
        assert!(!FileCollector::glob_match("*.pdf", "pdf"));
        assert!(FileCollector::glob_match("draft?.pdf", "draft1.pdf"));
        assert!(!FileCollector::glob_match("draft?.pdf", "draft12.pdf"));
        assert!(FileCollector::glob_match("*", "anything"));
    }

    #[test]
    fn test_glob_match_many_stars() {
        // 多 * 模式不会指数回溯，且结果正确
        let text = "a".repeat(64);
        assert!(!FileCollector::glob_match("*a*a*a*a*a*a*a*a*a*b", &text));
        assert!(FileCollector::glob_match("*a*a*a*a*b", "xaxaxaxaxb"));
        assert!(FileCollector::glob_match("**.pdf", "double.pdf"));
    }

    #[test]
    fn test_with_pattern_splits_and_trims() {
        let collector = FileCollector::new(PathBuf::from(".")).with_pattern(" *.pdf , *.ps ,");
        assert_eq!(collector.patterns, vec!["*.pdf", "*.ps"]);

        let collector = FileCollector::new(PathBuf::from(".")).with_pattern("  ");
        assert_eq!(collector.patterns, vec!["*"]);
    }

    #[test]
    fn test_collect_sorted_and_filtered() {
        let dir = std::env::temp_dir().join(format!("pdfpress_collect_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["b.pdf", "a.pdf", "c.txt"] {
            fs::write(dir.join(name), b"x").unwrap();
        }

        let files = FileCollector::new(dir.clone()).with_pattern("*.pdf").collect();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_collect_missing_directory_is_empty() {
        let files = FileCollector::new(PathBuf::from("/nonexistent/pdfpress")).collect();
        assert!(files.is_empty());
    }
}
