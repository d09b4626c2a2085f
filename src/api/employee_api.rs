// ==========================================
// 员工画像看板 - 员工 API
// ==========================================
// 职责: 加载数据源、持有内存记录集、检索与看板汇总、AI 画像调度
// 架构: API 层 → db/Repository（阻塞任务）→ Engine（纯计算）
// 并发: 记录集整体替换（RwLock）；同一序号同时最多一个画像请求
// ==========================================

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::error::{ApiError, ApiResult};
use crate::config::app_config::AppConfig;
use crate::config::credential_store::CredentialStore;
use crate::db::fetch_source;
use crate::domain::analysis::{AnalyzedEmployee, Narrative};
use crate::engine::record_builder::build_employees;
use crate::narrative::NarrativeService;
use crate::repository::employee_source_repo::EmployeeSourceRepository;
use crate::repository::error::RepositoryError;

// ==========================================
// 返回类型
// ==========================================

/// 画像请求结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    /// 服务已返回（可能是固定画像），并已写回记录
    Completed(Narrative),
    /// 该序号已有画像请求在进行中
    AlreadyInFlight,
    /// 未配置密钥，未调用服务
    CredentialRequired,
}

/// 排行榜条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub seq: i64,
    pub name: String,
    pub score: u8,
}

impl From<&AnalyzedEmployee> for RankingEntry {
    fn from(employee: &AnalyzedEmployee) -> Self {
        Self {
            seq: employee.seq(),
            name: employee.name().to_string(),
            score: employee.calculated_score(),
        }
    }
}

/// 看板汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub count: usize,
    /// 平均分（四舍五入，空集为 0）
    pub average_score: u8,
    pub top_performer: Option<RankingEntry>,
    /// 按评分降序（同分保持序号顺序）
    pub ranking: Vec<RankingEntry>,
    pub location: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
}

// ==========================================
// 内部状态
// ==========================================

#[derive(Debug, Default)]
struct Snapshot {
    employees: Vec<AnalyzedEmployee>,
    location: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
    /// 记录集代次：每次替换（加载成功或失败清空）加一
    generation: u64,
}

/// 画像请求占位，析构时释放序号
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<i64>>,
    seq: i64,
}

impl<'a> InFlightGuard<'a> {
    /// 占用序号；已被占用时返回 None
    fn acquire(set: &'a Mutex<HashSet<i64>>, seq: i64) -> ApiResult<Option<Self>> {
        let mut guard = set
            .lock()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))?;
        if !guard.insert(seq) {
            return Ok(None);
        }
        Ok(Some(Self { set, seq }))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.set.lock() {
            guard.remove(&self.seq);
        }
    }
}

// ==========================================
// EmployeeApi
// ==========================================
pub struct EmployeeApi {
    config: AppConfig,
    narrative: Arc<dyn NarrativeService>,
    credentials: Arc<dyn CredentialStore>,
    snapshot: RwLock<Snapshot>,
    in_flight: Mutex<HashSet<i64>>,
}

impl EmployeeApi {
    /// 创建新的EmployeeApi实例（不加载数据）
    ///
    /// # 参数
    /// - config: 应用配置（默认数据源地址、下载超时）
    /// - narrative: AI 画像服务
    /// - credentials: 密钥存储
    pub fn new(
        config: AppConfig,
        narrative: Arc<dyn NarrativeService>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            config,
            narrative,
            credentials,
            snapshot: RwLock::new(Snapshot::default()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn read_snapshot(&self) -> ApiResult<RwLockReadGuard<'_, Snapshot>> {
        self.snapshot
            .read()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))
    }

    fn write_snapshot(&self) -> ApiResult<RwLockWriteGuard<'_, Snapshot>> {
        self.snapshot
            .write()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))
    }

    // ==========================================
    // 加载
    // ==========================================

    /// 加载数据源并整体替换记录集
    ///
    /// # 参数
    /// - location: 数据源地址；None 时使用配置中的地址
    ///
    /// # 返回
    /// - Ok(usize): 加载的记录数
    /// - Err(DataSourceUnavailable): 加载失败，此时记录集被清空
    pub async fn load(&self, location: Option<&str>) -> ApiResult<usize> {
        let location = location
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.config.db_location.as_str())
            .to_string();

        tracing::info!(location = %location, "开始加载员工数据");

        match self.fetch_employees(&location).await {
            Ok(employees) => {
                let count = employees.len();
                let mut snapshot = self.write_snapshot()?;
                *snapshot = Snapshot {
                    employees,
                    location: Some(location.clone()),
                    loaded_at: Some(Utc::now()),
                    generation: snapshot.generation + 1,
                };
                tracing::info!(location = %location, count, "员工数据加载完成");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(location = %location, error = %e, "员工数据加载失败，已清空记录集");
                let mut snapshot = self.write_snapshot()?;
                *snapshot = Snapshot {
                    location: Some(location),
                    generation: snapshot.generation + 1,
                    ..Snapshot::default()
                };
                Err(e)
            }
        }
    }

    /// 重新加载上一次使用的数据源
    pub async fn reload(&self) -> ApiResult<usize> {
        let location = self.read_snapshot()?.location.clone();
        self.load(location.as_deref()).await
    }

    async fn fetch_employees(&self, location: &str) -> ApiResult<Vec<AnalyzedEmployee>> {
        let source = fetch_source(location, self.config.fetch_timeout)
            .await
            .map_err(|e| ApiError::data_source(location, e))?;

        // 打开、校验与读取都是同步 SQLite 调用，放到阻塞线程；
        // source 随闭包移动以保证临时文件存活
        let employees = tokio::task::spawn_blocking(move || {
            let data_source = source.open()?;
            let repo = EmployeeSourceRepository::from_connection(data_source.connection());
            let rows = repo.load_all()?;
            tracing::debug!(
                location = data_source.location(),
                persons = rows.persons.len(),
                "关系行读取完成"
            );
            Ok::<_, RepositoryError>(build_employees(&rows))
        })
        .await
        .map_err(|e| ApiError::data_source(location, RepositoryError::InternalError(e.to_string())))?
        .map_err(|e| ApiError::data_source(location, e))?;

        Ok(employees)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 当前全部记录（按序号升序）
    pub fn list(&self) -> ApiResult<Vec<AnalyzedEmployee>> {
        Ok(self.read_snapshot()?.employees.clone())
    }

    /// 按序号查询
    pub fn get(&self, seq: i64) -> ApiResult<AnalyzedEmployee> {
        self.read_snapshot()?
            .employees
            .iter()
            .find(|e| e.seq() == seq)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("员工(序号={})不存在", seq)))
    }

    /// 检索：姓名、序号文本或画像标题包含关键词（不区分大小写）
    ///
    /// 空关键词返回全部记录
    pub fn search(&self, term: &str) -> ApiResult<Vec<AnalyzedEmployee>> {
        let term = term.trim().to_lowercase();
        let snapshot = self.read_snapshot()?;
        Ok(snapshot
            .employees
            .iter()
            .filter(|e| {
                e.name().to_lowercase().contains(&term)
                    || e.seq().to_string().contains(&term)
                    || e
                        .ai_analysis()
                        .map(|n| n.persona.to_lowercase().contains(&term))
                        .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    /// 看板汇总
    pub fn dashboard(&self) -> ApiResult<DashboardSummary> {
        let snapshot = self.read_snapshot()?;

        let mut ranking: Vec<RankingEntry> =
            snapshot.employees.iter().map(RankingEntry::from).collect();
        ranking.sort_by(|a, b| b.score.cmp(&a.score));

        let count = ranking.len();
        let average_score = if count == 0 {
            0
        } else {
            let total: u64 = ranking.iter().map(|r| u64::from(r.score)).sum();
            (total as f64 / count as f64).round() as u8
        };

        Ok(DashboardSummary {
            count,
            average_score,
            top_performer: ranking.first().cloned(),
            ranking,
            location: snapshot.location.clone(),
            loaded_at: snapshot.loaded_at,
        })
    }

    // ==========================================
    // AI 画像
    // ==========================================

    /// 该序号是否有画像请求在进行中
    pub fn is_analyzing(&self, seq: i64) -> bool {
        self.in_flight
            .lock()
            .map(|set| set.contains(&seq))
            .unwrap_or(false)
    }

    /// 请求 AI 画像
    ///
    /// # 返回
    /// - Ok(CredentialRequired): 未配置密钥，未调用服务
    /// - Ok(AlreadyInFlight): 同一序号已有请求进行中
    /// - Ok(Completed): 服务结果（失败时为固定画像）；请求期间未重新加载时写回记录
    /// - Err(NotFound): 序号不在当前记录集中
    pub async fn analyze(&self, seq: i64) -> ApiResult<AnalyzeOutcome> {
        let (employee, generation) = {
            let snapshot = self.read_snapshot()?;
            let record = snapshot
                .employees
                .iter()
                .find(|e| e.seq() == seq)
                .ok_or_else(|| ApiError::NotFound(format!("员工(序号={})不存在", seq)))?;
            (record.employee().clone(), snapshot.generation)
        };

        let credential = match self.credentials.get()? {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::info!(seq, "未配置 AI 密钥，跳过画像请求");
                return Ok(AnalyzeOutcome::CredentialRequired);
            }
        };

        let _guard = match InFlightGuard::acquire(&self.in_flight, seq)? {
            Some(guard) => guard,
            None => {
                tracing::debug!(seq, "画像请求进行中，忽略重复请求");
                return Ok(AnalyzeOutcome::AlreadyInFlight);
            }
        };

        let narrative = self.narrative.analyze(&employee, &credential).await;

        // 请求期间记录集被替换时，同一序号可能已是另一个人，结果不写回
        let mut snapshot = self.write_snapshot()?;
        let current = snapshot.generation;
        match snapshot.employees.iter_mut().find(|e| e.seq() == seq) {
            Some(record) if current == generation => record.set_ai_analysis(narrative.clone()),
            _ => tracing::warn!(
                seq,
                requested_generation = generation,
                current_generation = current,
                "画像返回时记录集已重新加载，结果未写回"
            ),
        }

        Ok(AnalyzeOutcome::Completed(narrative))
    }

    // ==========================================
    // 密钥
    // ==========================================

    /// 保存密钥；空串视为清除
    pub fn save_credential(&self, key: &str) -> ApiResult<()> {
        let key = key.trim();
        if key.is_empty() {
            self.credentials.clear()?;
        } else {
            self.credentials.set(key)?;
        }
        Ok(())
    }

    pub fn has_credential(&self) -> ApiResult<bool> {
        Ok(self
            .credentials
            .get()?
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false))
    }
}
