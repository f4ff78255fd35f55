//! Search index schema definition / 搜索索引的 Schema 定义

use std::collections::HashMap;

use crate::analysis::NGramPolicy;

/// Stored, untokenized unique path / 存储的完整路径（不分词）
pub const PATH_FIELD: &str = "path";
/// Full path, n-gram analyzed / 完整路径（N-gram 分析）
pub const CONTENT_FIELD: &str = "content";
/// Last path segment, n-gram analyzed / 文件名（N-gram 分析）
pub const FILENAME_FIELD: &str = "filename";

/// Path document - one per indexed path / 路径文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDocument {
    /// File path / 文件路径
    pub path: String,
    /// File name / 文件名
    pub filename: String,
}

impl PathDocument {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let filename = Self::extract_filename(&path).to_string();
        Self { path, filename }
    }

    /// Extract filename from path / 从路径中提取文件名
    ///
    /// The text after the last `/`; the whole string when there is no `/`
    /// or nothing follows it.
    pub fn extract_filename(path: &str) -> &str {
        match path.rfind('/') {
            Some(pos) if pos + 1 < path.len() => &path[pos + 1..],
            _ => path,
        }
    }

    /// Analyze into an engine document / 转换为索引文档
    pub fn to_index_document(&self, ngram: &NGramPolicy) -> IndexDocument {
        IndexDocument::new()
            .store(PATH_FIELD, self.path.clone())
            .index(PATH_FIELD, vec![self.path.clone()])
            .index(CONTENT_FIELD, ngram.analyze(&self.path))
            .index(FILENAME_FIELD, ngram.analyze(&self.filename))
    }
}

/// Analyzed document handed to the index engine / 交给索引引擎的已分析文档
#[derive(Debug, Clone, Default)]
pub struct IndexDocument {
    /// Stored field values / 存储字段
    pub stored: HashMap<String, String>,
    /// Indexed terms per field / 每个字段的索引词项
    pub indexed: HashMap<String, Vec<String>>,
}

impl IndexDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, field: &str, value: impl Into<String>) -> Self {
        self.stored.insert(field.to_string(), value.into());
        self
    }

    pub fn index(mut self, field: &str, terms: Vec<String>) -> Self {
        self.indexed.entry(field.to_string()).or_default().extend(terms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename() {
        assert_eq!(PathDocument::extract_filename("a/b/plus.gif"), "plus.gif");
        assert_eq!(PathDocument::extract_filename("plus.gif"), "plus.gif");
        assert_eq!(PathDocument::extract_filename("docs/"), "docs/");
        assert_eq!(PathDocument::extract_filename("/"), "/");
        assert_eq!(PathDocument::extract_filename("/x"), "x");
    }

    #[test]
    fn test_filename_non_empty_for_non_empty_path() {
        for path in ["a", "/", "a/", "//", "a/b", "lqd///gif"] {
            assert!(!PathDocument::new(path).filename.is_empty(), "{}", path);
        }
    }

    #[test]
    fn test_to_index_document() {
        let doc = PathDocument::new("img/Plus.gif");
        let indexed = doc.to_index_document(&NGramPolicy::default());

        assert_eq!(indexed.stored.get(PATH_FIELD).unwrap(), "img/Plus.gif");
        assert_eq!(indexed.indexed[PATH_FIELD], vec!["img/Plus.gif"]);
        assert!(indexed.indexed[CONTENT_FIELD].contains(&"img/plus".to_string()));
        assert!(indexed.indexed[FILENAME_FIELD].contains(&"plus.gif".to_string()));
        assert!(!indexed.indexed[FILENAME_FIELD].contains(&"img".to_string()));
    }
}
