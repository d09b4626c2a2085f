// ==========================================
// 员工画像看板 - 领域层
// ==========================================
// 职责: 标准员工记录、等级/评分类型、AI 画像
// ==========================================

pub mod analysis;
pub mod employee;
pub mod types;

// 重导出核心类型
pub use analysis::{AnalyzedEmployee, Narrative, SENTINEL_DIAGNOSIS, SENTINEL_PERSONA};
pub use employee::{
    AbilityRequirements, BasicInfo, CategoryGroup, Competency, Education, Employee,
    KnowledgeSkills, PersonalityTraits, ProfessionalSkills, Values, WorkExperience,
};
pub use types::{Level, LevelLabel, Score, PLACEHOLDER_TEXT};
