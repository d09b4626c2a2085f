// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 创建临时 SQLite 数据源（五张表）并插入测试数据
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;
use talent_board::domain::{
    AbilityRequirements, CategoryGroup, Competency, KnowledgeSkills, PersonalityTraits,
    ProfessionalSkills, Values,
};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().into_owned();

    let conn = Connection::open(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库（可写）
pub fn open(db_path: &str) -> Connection {
    Connection::open(db_path).expect("无法打开测试数据库")
}

/// 初始化数据库 schema
///
/// person.id 不设主键，便于构造重复/非数字 ID
fn init_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS person (
            id INTEGER,
            seq INTEGER,
            name TEXT,
            gender TEXT,
            age INTEGER
        );

        CREATE TABLE IF NOT EXISTS person_basic (
            person_id INTEGER,
            hobby TEXT,
            personality TEXT,
            family TEXT
        );

        CREATE TABLE IF NOT EXISTS person_work (
            person_id INTEGER,
            years_in_industry REAL,
            job_hops REAL,
            previous_job TEXT
        );

        CREATE TABLE IF NOT EXISTS person_education (
            person_id INTEGER,
            degree TEXT,
            school TEXT,
            major TEXT
        );

        CREATE TABLE IF NOT EXISTS ability_score (
            person_id INTEGER,
            category TEXT,
            ability TEXT,
            level_text TEXT,
            score REAL
        );
        "#,
    )?;
    Ok(())
}

// ==========================================
// 数据插入
// ==========================================

pub fn insert_person(
    conn: &Connection,
    id: Option<i64>,
    seq: Option<i64>,
    name: Option<&str>,
    gender: Option<&str>,
    age: Option<i64>,
) {
    conn.execute(
        "INSERT INTO person (id, seq, name, gender, age) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, seq, name, gender, age],
    )
    .expect("插入 person 失败");
}

pub fn insert_basic(conn: &Connection, person_id: i64, hobby: &str, personality: &str, family: &str) {
    conn.execute(
        "INSERT INTO person_basic (person_id, hobby, personality, family) VALUES (?1, ?2, ?3, ?4)",
        params![person_id, hobby, personality, family],
    )
    .expect("插入 person_basic 失败");
}

pub fn insert_work(conn: &Connection, person_id: i64, years: f64, hops: f64, previous_job: &str) {
    conn.execute(
        "INSERT INTO person_work (person_id, years_in_industry, job_hops, previous_job) VALUES (?1, ?2, ?3, ?4)",
        params![person_id, years, hops, previous_job],
    )
    .expect("插入 person_work 失败");
}

pub fn insert_education(conn: &Connection, person_id: i64, degree: &str, school: &str, major: &str) {
    conn.execute(
        "INSERT INTO person_education (person_id, degree, school, major) VALUES (?1, ?2, ?3, ?4)",
        params![person_id, degree, school, major],
    )
    .expect("插入 person_education 失败");
}

pub fn insert_ability(
    conn: &Connection,
    person_id: i64,
    category: &str,
    ability: &str,
    level_text: Option<&str>,
    score: Option<f64>,
) {
    conn.execute(
        "INSERT INTO ability_score (person_id, category, ability, level_text, score) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![person_id, category, ability, level_text, score],
    )
    .expect("插入 ability_score 失败");
}

/// 为某人写满全部维度
///
/// # 参数
/// - level: 定性维度的等级文本（高/中/低）
/// - score: 数值维度的分值
pub fn insert_all_dimensions(conn: &Connection, person_id: i64, level: &str, score: f64) {
    fn each<G: CategoryGroup>(mut f: impl FnMut(&str, &str)) {
        for dimension in G::DIMENSIONS {
            f(G::CATEGORY, dimension);
        }
    }

    let mut label = |category: &str, ability: &str| {
        insert_ability(conn, person_id, category, ability, Some(level), None)
    };
    each::<Values>(&mut label);
    each::<Competency>(&mut label);
    each::<ProfessionalSkills>(&mut label);
    each::<PersonalityTraits>(&mut label);

    let mut numeric = |category: &str, ability: &str| {
        insert_ability(conn, person_id, category, ability, None, Some(score))
    };
    each::<KnowledgeSkills>(&mut numeric);
    each::<AbilityRequirements>(&mut numeric);
}

/// 插入一名只有 person 行的员工
pub fn insert_bare_person(conn: &Connection, id: i64, seq: i64, name: &str) {
    insert_person(conn, Some(id), Some(seq), Some(name), Some("男"), Some(30));
}
