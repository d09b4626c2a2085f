// ==========================================
// 员工画像看板 - AI 密钥存储
// ==========================================
// 职责: 持久化单个用户级密钥（get / set / clear）
// 约束: "未设置" 与 "设置为空串" 必须可区分
// ==========================================

use crate::config::app_config::APP_DIR_NAME;
use crate::config::error::{ConfigError, ConfigResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 密钥文件名
pub const CREDENTIAL_FILE_NAME: &str = "gemini_api_key";

// ==========================================
// CredentialStore Trait
// ==========================================
pub trait CredentialStore: Send + Sync {
    /// 读取密钥；未设置返回 None
    fn get(&self) -> ConfigResult<Option<String>>;

    /// 写入密钥（允许空串）
    fn set(&self, value: &str) -> ConfigResult<()>;

    /// 清除密钥
    fn clear(&self) -> ConfigResult<()>;
}

// ==========================================
// FileCredentialStore - 用户配置目录下的文件
// ==========================================
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认位置: <用户配置目录>/talent-board/gemini_api_key
    pub fn in_user_config_dir() -> ConfigResult<Self> {
        let dir = dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?;
        Ok(Self::new(dir.join(APP_DIR_NAME).join(CREDENTIAL_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::CredentialIo {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> ConfigResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn set(&self, value: &str) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, value).map_err(|e| self.io_error(e))?;
        tracing::info!(path = %self.path.display(), "AI 密钥已保存");
        Ok(())
    }

    fn clear(&self) -> ConfigResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "AI 密钥已清除");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// ==========================================
// MemoryCredentialStore - 进程内存储
// ==========================================
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }

    fn lock(&self) -> ConfigResult<std::sync::MutexGuard<Option<String>>> {
        self.value
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> ConfigResult<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn set(&self, value: &str) -> ConfigResult<()> {
        *self.lock()? = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> ConfigResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}
