// ==========================================
// 员工画像看板 - 引擎层
// ==========================================
// 红线: 引擎只做纯计算，不做 I/O
// ==========================================
// 记录构建: 关系行 → 标准记录（缺省值策略）
// 综合评分: 标准记录 → 0-100 整数
// ==========================================

pub mod record_builder;
pub mod scoring;

// 重导出核心引擎
pub use record_builder::{build_employees, RecordBuilder};
pub use scoring::{calculate_employee_score, level_score, ScoreBreakdown};
