//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// Search configuration / 搜索配置
    #[serde(default)]
    pub search: SearchConfig,
    /// Index source configuration / 索引来源配置
    #[serde(default)]
    pub index: IndexConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Search configuration / 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Shortest indexed gram / 最小 gram 长度
    pub min_gram: usize,
    /// Longest indexed gram / 最大 gram 长度
    pub max_gram: usize,
    /// Maximum edit distance for fuzzy clauses (clamped to 0..=2) / 模糊搜索最大编辑距离
    pub max_edits: u8,
    /// Number of hits returned per search / 每次搜索返回的结果数
    pub top_k: usize,
}

/// Index source configuration / 索引来源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Paths indexed at startup / 启动时索引的路径
    pub paths: Vec<String>,
    /// Optional newline-separated path list appended after `paths` / 可选路径列表文件
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths_file: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_gram: 2,
            max_gram: 10,
            max_edits: 2,
            top_k: 10,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                "lucene/queryparser/docs/xml/img/plus.gif".to_string(),
                "lucene/queryparser/docs/xml/img/join.gif".to_string(),
                "lucene/queryparser/docs/xml/img/minusbottom.gif".to_string(),
            ],
            paths_file: None,
        }
    }
}

impl SearchConfig {
    /// Edit distance actually used by fuzzy clauses / 实际使用的编辑距离
    pub fn effective_max_edits(&self) -> u8 {
        self.max_edits.min(2)
    }

    /// Gram bounds actually used: min >= 1, max >= min / 实际使用的 gram 范围
    pub fn effective_gram_range(&self) -> (usize, usize) {
        let min_gram = self.min_gram.max(1);
        (min_gram, self.max_gram.max(min_gram))
    }

    /// Clamp values that would make every search empty / 修正无效的搜索参数
    fn normalize(&mut self) {
        let (min_gram, max_gram) = self.effective_gram_range();
        if (min_gram, max_gram) != (self.min_gram, self.max_gram) {
            tracing::warn!(
                "Invalid gram range {}..={}, using {}..={}",
                self.min_gram,
                self.max_gram,
                min_gram,
                max_gram
            );
            self.min_gram = min_gram;
            self.max_gram = max_gram;
        }
        if self.max_edits > 2 {
            tracing::warn!("max_edits {} exceeds 2, clamping", self.max_edits);
            self.max_edits = 2;
        }
    }
}

impl AppConfig {
    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Collect every path to index: inline list first, then the paths file / 收集所有待索引路径
    pub fn load_index_paths(&self) -> anyhow::Result<Vec<String>> {
        let mut paths = self.index.paths.clone();

        if let Some(ref file) = self.index.paths_file {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read paths file {}", file))?;
            paths.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        }

        Ok(paths)
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from config.json in the working directory / 加载配置文件
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(&get_config_path())
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config_from(config_path: &Path) -> anyhow::Result<AppConfig> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {:?}", config_path))?;

        let mut config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", config_path))?;
        config.search.normalize();

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config_to(&config, config_path)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config_to(config: &AppConfig, config_path: &Path) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write config file {:?}", config_path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.search.min_gram, 2);
        assert_eq!(config.search.max_gram, 10);
        assert_eq!(config.search.top_k, 10);
        assert_eq!(config.index.paths.len(), 3);

        // Second load reads the file that was just written
        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.index.paths, config.index.paths);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"server": {"host": "127.0.0.1", "port": 9000}}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.get_bind_address(), "127.0.0.1:9000");
        assert_eq!(config.search.max_edits, 2);
        assert!(!config.index.paths.is_empty());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_paths_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("paths.txt");
        std::fs::write(&list, "src/main.rs\n\n  docs/readme.md  \n").unwrap();

        let mut config = AppConfig::default();
        config.index.paths = vec!["Cargo.toml".to_string()];
        config.index.paths_file = Some(list.to_string_lossy().to_string());

        let paths = config.load_index_paths().unwrap();
        assert_eq!(paths, vec!["Cargo.toml", "src/main.rs", "docs/readme.md"]);
    }

    #[test]
    fn test_max_edits_is_clamped() {
        let search = SearchConfig {
            max_edits: 5,
            ..SearchConfig::default()
        };
        assert_eq!(search.effective_max_edits(), 2);
    }

    #[test]
    fn test_empty_gram_range_is_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"search": {"min_gram": 4, "max_gram": 2, "max_edits": 9, "top_k": 10}}"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.search.min_gram, 4);
        assert_eq!(config.search.max_gram, 4);
        assert_eq!(config.search.max_edits, 2);
    }

    #[test]
    fn test_zero_grams_are_clamped() {
        let search = SearchConfig {
            min_gram: 0,
            max_gram: 0,
            ..SearchConfig::default()
        };
        assert_eq!(search.effective_gram_range(), (1, 1));
    }
}
