// ==========================================
// 员工画像看板 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + Gemini
// 系统定位: 员工数据归一、综合评分与 AI 定性画像
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 标准记录与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 记录构建与评分
pub mod engine;

// 配置层 - 应用配置与密钥
pub mod config;

// 数据库基础设施（数据源打开/只读 PRAGMA）
pub mod db;

// 日志系统
pub mod logging;

// AI 画像服务
pub mod narrative;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Level, LevelLabel, Score};

// 领域实体
pub use domain::{AnalyzedEmployee, CategoryGroup, Employee, Narrative};

// 引擎
pub use engine::{build_employees, calculate_employee_score, RecordBuilder, ScoreBreakdown};

// 配置
pub use config::{AppConfig, CredentialStore, FileCredentialStore, MemoryCredentialStore};

// AI 画像
pub use narrative::{GeminiNarrativeService, NarrativeService};

// API
pub use api::{AnalyzeOutcome, ApiError, ApiResult, DashboardSummary, EmployeeApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "北区客户部员工画像看板";
