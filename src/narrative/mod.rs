// ==========================================
// 员工画像看板 - AI 画像服务
// ==========================================
// 输入: 标准记录 + 密钥
// 输出: {persona, diagnosis}；任何失败都返回固定画像，不向上抛错
// 约束: 只做定性分析，提示词要求服务不计算、不引用分数
// ==========================================

pub mod error;
pub mod gemini;
pub mod prompt;

use crate::domain::analysis::Narrative;
use crate::domain::employee::Employee;
use async_trait::async_trait;

pub use error::NarrativeError;
pub use gemini::GeminiNarrativeService;

// ==========================================
// NarrativeService Trait
// ==========================================
#[async_trait]
pub trait NarrativeService: Send + Sync {
    /// 生成 AI 画像
    ///
    /// 不会失败：失败时返回 `Narrative::sentinel()`
    async fn analyze(&self, employee: &Employee, credential: &str) -> Narrative;
}
