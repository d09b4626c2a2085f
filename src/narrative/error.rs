// ==========================================
// 员工画像看板 - AI 画像服务错误类型
// ==========================================
// 仅在适配器内部使用；对外统一转换为固定画像
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("API Key 缺失")]
    MissingCredential,

    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("服务返回错误状态 {status}: {message}")]
    Status { status: u16, message: String },

    #[error("服务未返回内容")]
    EmptyResponse,

    #[error("响应解析失败: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
