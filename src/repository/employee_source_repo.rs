// ==========================================
// 员工画像看板 - 员工数据源仓储
// ==========================================
// 红线: Repository 不含业务逻辑（缺省值策略在 engine::record_builder）
// ==========================================
// 职责: 读取五组关系行（person / person_basic / person_work /
//       person_education / ability_score），单元格保持原始类型
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Value;
use rusqlite::{Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// 行实体
// ==========================================

/// person 行
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRow {
    pub id: Value,
    pub seq: Value,
    pub name: Value,
    pub gender: Value,
    pub age: Value,
}

/// person_basic 行
#[derive(Debug, Clone, PartialEq)]
pub struct BasicRow {
    pub person_id: Value,
    pub hobby: Value,
    pub personality: Value,
    pub family: Value,
}

/// person_work 行
#[derive(Debug, Clone, PartialEq)]
pub struct WorkRow {
    pub person_id: Value,
    pub years_in_industry: Value,
    pub job_hops: Value,
    pub previous_job: Value,
}

/// person_education 行
#[derive(Debug, Clone, PartialEq)]
pub struct EducationRow {
    pub person_id: Value,
    pub degree: Value,
    pub school: Value,
    pub major: Value,
}

/// ability_score 行（每人 0..N 行）
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityScoreRow {
    pub person_id: Value,
    pub category: Value,
    pub ability: Value,
    pub level_text: Value,
    pub score: Value,
}

/// 一次加载读取到的全部关系行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRows {
    pub persons: Vec<PersonRow>,
    pub basics: Vec<BasicRow>,
    pub work: Vec<WorkRow>,
    pub education: Vec<EducationRow>,
    pub ability_scores: Vec<AbilityScoreRow>,
}

// ==========================================
// EmployeeSourceRepository
// ==========================================
pub struct EmployeeSourceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeSourceRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取全部五组关系行
    pub fn load_all(&self) -> RepositoryResult<SourceRows> {
        let rows = SourceRows {
            persons: self.find_persons()?,
            basics: self.find_basics()?,
            work: self.find_work()?,
            education: self.find_education()?,
            ability_scores: self.find_ability_scores()?,
        };

        tracing::debug!(
            persons = rows.persons.len(),
            basics = rows.basics.len(),
            work = rows.work.len(),
            education = rows.education.len(),
            ability_scores = rows.ability_scores.len(),
            "数据源读取完成"
        );

        Ok(rows)
    }

    pub fn find_persons(&self) -> RepositoryResult<Vec<PersonRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, seq, name, gender, age FROM person")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(PersonRow {
                    id: row.get(0)?,
                    seq: row.get(1)?,
                    name: row.get(2)?,
                    gender: row.get(3)?,
                    age: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }

    pub fn find_basics(&self) -> RepositoryResult<Vec<BasicRow>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT person_id, hobby, personality, family FROM person_basic")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(BasicRow {
                    person_id: row.get(0)?,
                    hobby: row.get(1)?,
                    personality: row.get(2)?,
                    family: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }

    pub fn find_work(&self) -> RepositoryResult<Vec<WorkRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT person_id, years_in_industry, job_hops, previous_job FROM person_work",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(WorkRow {
                    person_id: row.get(0)?,
                    years_in_industry: row.get(1)?,
                    job_hops: row.get(2)?,
                    previous_job: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }

    pub fn find_education(&self) -> RepositoryResult<Vec<EducationRow>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT person_id, degree, school, major FROM person_education")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(EducationRow {
                    person_id: row.get(0)?,
                    degree: row.get(1)?,
                    school: row.get(2)?,
                    major: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }

    pub fn find_ability_scores(&self) -> RepositoryResult<Vec<AbilityScoreRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT person_id, category, ability, level_text, score FROM ability_score",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(AbilityScoreRow {
                    person_id: row.get(0)?,
                    category: row.get(1)?,
                    ability: row.get(2)?,
                    level_text: row.get(3)?,
                    score: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }
}
