// ==========================================
// 员工画像看板 - 配置层
// ==========================================
// 职责: 应用配置（环境变量）与 AI 密钥存储
// ==========================================

pub mod app_config;
pub mod credential_store;
pub mod error;

// 重导出
pub use app_config::{config_keys, default_data_dir, AppConfig, NarrativeConfig};
pub use credential_store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{ConfigError, ConfigResult};
