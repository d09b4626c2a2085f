// ==========================================
// 员工画像看板 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// ==========================================

pub mod employee_source_repo;
pub mod error;

// 重导出核心仓储
pub use employee_source_repo::{
    AbilityScoreRow, BasicRow, EducationRow, EmployeeSourceRepository, PersonRow, SourceRows,
    WorkRow,
};
pub use error::{RepositoryError, RepositoryResult};
