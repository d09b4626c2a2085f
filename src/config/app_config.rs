// ==========================================
// 员工画像看板 - 应用配置
// ==========================================
// 来源: 环境变量优先，其次用户数据目录
// ==========================================

use crate::db::resolve_location;
use std::path::PathBuf;
use std::time::Duration;

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    /// 数据源地址（本地路径或 URL）
    pub const DB_LOCATION: &str = "TALENT_BOARD_DB";
    /// 相对路径数据源的基准目录
    pub const DATA_DIR: &str = "TALENT_BOARD_DATA_DIR";
    /// 远程数据源下载超时（秒）
    pub const FETCH_TIMEOUT_SECONDS: &str = "TALENT_BOARD_FETCH_TIMEOUT_SECONDS";

    // AI 画像服务
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    pub const GEMINI_TIMEOUT_SECONDS: &str = "GEMINI_TIMEOUT_SECONDS";
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 60;

/// 应用目录名
pub const APP_DIR_NAME: &str = "talent-board";

// ==========================================
// NarrativeConfig - AI 画像服务配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeConfig {
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
        }
    }
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 已解析的数据源地址
    pub db_location: String,
    pub fetch_timeout: Duration,
    pub narrative: NarrativeConfig,
}

impl AppConfig {
    /// 使用指定数据源地址，其余取默认值
    pub fn with_location(db_location: impl Into<String>) -> Self {
        Self {
            db_location: db_location.into(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            narrative: NarrativeConfig::default(),
        }
    }

    /// 从环境变量读取配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置（便于测试）
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_secs = |key: &str, default: u64| {
            let raw = get(key);
            match raw.as_deref().map(str::parse::<u64>) {
                Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
                Some(_) => {
                    tracing::warn!(config_key = key, raw_value = ?raw, "超时配置格式错误，使用默认值");
                    Duration::from_secs(default)
                }
                None => Duration::from_secs(default),
            }
        };

        let base_dir = get(config_keys::DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let db_location = resolve_location(get(config_keys::DB_LOCATION).as_deref(), &base_dir);

        Self {
            db_location,
            fetch_timeout: get_secs(config_keys::FETCH_TIMEOUT_SECONDS, DEFAULT_FETCH_TIMEOUT_SECS),
            narrative: NarrativeConfig {
                model: get(config_keys::GEMINI_MODEL)
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: get(config_keys::GEMINI_BASE_URL)
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                timeout: get_secs(config_keys::GEMINI_TIMEOUT_SECONDS, DEFAULT_GEMINI_TIMEOUT_SECS),
            },
        }
    }
}

/// 默认数据目录: <用户数据目录>/talent-board，取不到时为当前目录
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}
