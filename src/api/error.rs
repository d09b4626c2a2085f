// ==========================================
// 员工画像看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository/Config错误为用户可读的错误消息
// 约束: 加载失败对调用方只暴露 DataSourceUnavailable
// ==========================================

use crate::config::error::ConfigError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 数据源错误
    // ==========================================
    #[error("数据源不可用 ({location}): {reason}")]
    DataSourceUnavailable { location: String, reason: String },

    // ==========================================
    // 业务错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("密钥存储失败: {0}")]
    CredentialStoreError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 将加载过程中的任意仓储错误归并为 DataSourceUnavailable
    ///
    /// # 参数
    /// - location: 本次加载的数据源地址
    /// - err: 仓储层错误
    pub fn data_source(location: &str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::DataSourceUnavailable { location, reason } => {
                ApiError::DataSourceUnavailable { location, reason }
            }
            other => ApiError::DataSourceUnavailable {
                location: location.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DataSourceUnavailable { location, reason } => {
                ApiError::DataSourceUnavailable { location, reason }
            }
            RepositoryError::UnsupportedLocation(location) => ApiError::DataSourceUnavailable {
                reason: format!("不支持的数据源地址: {}", location),
                location,
            },
            RepositoryError::LockError(msg) => {
                ApiError::InternalError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => {
                ApiError::InternalError(format!("数据库查询失败: {}", msg))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(e) => ApiError::Other(e),
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::LockError(msg) => ApiError::InternalError(format!("锁获取失败: {}", msg)),
            other => ApiError::CredentialStoreError(other.to_string()),
        }
    }
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_errors_become_data_source_unavailable() {
        let err = ApiError::data_source(
            "/srv/hr.db",
            RepositoryError::DatabaseQueryError("no such column: seq".to_string()),
        );
        match err {
            ApiError::DataSourceUnavailable { location, reason } => {
                assert_eq!(location, "/srv/hr.db");
                assert!(reason.contains("no such column"));
            }
            other => panic!("期望 DataSourceUnavailable, 实际: {:?}", other),
        }

        // 已经携带地址的错误保持原样
        let err = ApiError::data_source(
            "/srv/hr.db",
            RepositoryError::unavailable("https://example.com/hr.db", "HTTP 404"),
        );
        assert!(matches!(
            err,
            ApiError::DataSourceUnavailable { ref location, .. } if location == "https://example.com/hr.db"
        ));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ApiError = ConfigError::ConfigDirUnavailable.into();
        assert!(matches!(err, ApiError::CredentialStoreError(_)));

        let err: ApiError = ConfigError::LockError("poisoned".into()).into();
        assert!(matches!(err, ApiError::InternalError(_)));
    }
}
