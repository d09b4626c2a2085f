// ==========================================
// 员工画像看板 - API 层
// ==========================================
// 职责: 对外业务接口（加载、检索、看板、AI 画像、密钥）
// ==========================================

pub mod employee_api;
pub mod error;

// 重导出
pub use employee_api::{AnalyzeOutcome, DashboardSummary, EmployeeApi, RankingEntry};
pub use error::{ApiError, ApiResult};
