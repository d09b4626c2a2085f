// ==========================================
// 员工画像看板 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("无法定位用户配置目录")]
    ConfigDirUnavailable,

    #[error("密钥读写失败 ({path}): {source}")]
    CredentialIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("锁获取失败: {0}")]
    LockError(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
