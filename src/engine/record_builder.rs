// ==========================================
// 员工画像看板 - 员工记录构建引擎
// ==========================================
// 输入: 五组关系行（SourceRows）
// 输出: 每个人一条标准记录 + 综合评分，按序号升序
// ==========================================
// 缺省值策略:
// - 文本字段: NULL/空串 → "待补充"（姓名 "未命名"，性别 "未知"）
// - 序号: seq 列 → 原始 id → 输入位置(1 起)
// - 定性维度: level_text → score → "中"（价值观为 "待补充"）
// - 数值维度: score → level_text（高5/中4/低3/数字）→ 3
// 坏行不报错，一律落到缺省值
// ==========================================

use crate::domain::analysis::AnalyzedEmployee;
use crate::domain::employee::{
    AbilityRequirements, BasicInfo, CategoryGroup, Competency, Education, Employee,
    KnowledgeSkills, PersonalityTraits, ProfessionalSkills, Values, WorkExperience,
};
use crate::domain::types::{format_number, Level, LevelLabel, Score, PLACEHOLDER_TEXT};
use crate::engine::scoring::calculate_employee_score;
use crate::repository::employee_source_repo::{
    AbilityScoreRow, BasicRow, EducationRow, PersonRow, SourceRows, WorkRow,
};
use rusqlite::types::Value;
use std::collections::{HashMap, HashSet};

/// 姓名缺省值
pub const UNNAMED: &str = "未命名";

/// 性别缺省值
pub const UNKNOWN_GENDER: &str = "未知";

// ==========================================
// 单元格取值
// ==========================================

/// 单元格 → 文本；NULL 与空串视为缺失
fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format_number(*f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// 单元格 → 数值；文本按数字解析
fn cell_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Integer(i) => *i as f64,
        Value::Real(f) => *f,
        Value::Text(s) => s.trim().parse::<f64>().ok()?,
        Value::Null | Value::Blob(_) => return None,
    };
    number.is_finite().then_some(number)
}

/// 单元格 → 人员 ID（必须是整数值）
fn cell_id(value: &Value) -> Option<i64> {
    cell_number(value).filter(|n| n.fract() == 0.0).map(|n| n as i64)
}

/// 单元格 → 正整数序号
fn positive_id(value: &Value) -> Option<i64> {
    cell_id(value).filter(|id| *id > 0)
}

fn text_or(value: &Value, fallback: &str) -> String {
    cell_text(value).unwrap_or_else(|| fallback.to_string())
}

/// 非负数值，缺失为 0
fn non_negative_or_zero(value: &Value) -> f64 {
    cell_number(value).filter(|n| *n >= 0.0).unwrap_or(0.0)
}

// ==========================================
// 维度取值
// ==========================================

/// 定性维度取值: level_text 优先，其次 score；都缺失或为空则用 fallback
fn pick_label(hit: Option<&AbilityScoreRow>, fallback: &LevelLabel) -> LevelLabel {
    let Some(row) = hit else {
        return fallback.clone();
    };

    let raw = if matches!(row.level_text, Value::Null) {
        &row.score
    } else {
        &row.level_text
    };

    match raw {
        Value::Integer(i) => LevelLabel::from_number(*i as f64),
        Value::Real(f) => LevelLabel::from_number(*f),
        other => cell_text(other)
            .map(|text| LevelLabel::from_text(&text))
            .unwrap_or_else(|| fallback.clone()),
    }
}

/// 数值维度取值: score 优先，其次 level_text；无法识别或越界为 3
fn pick_score(hit: Option<&AbilityScoreRow>) -> Score {
    let Some(row) = hit else {
        return Score::DEFAULT;
    };

    let raw = if matches!(row.score, Value::Null) {
        &row.level_text
    } else {
        &row.score
    };

    let parsed = match raw {
        Value::Integer(i) => Score::from_number(*i as f64),
        Value::Real(f) => Score::from_number(*f),
        Value::Text(s) => Score::from_text(s),
        Value::Null | Value::Blob(_) => None,
    };
    parsed.unwrap_or_default()
}

fn find_row<'a>(
    rows: &'a [&'a AbilityScoreRow],
    category: &str,
    ability: &str,
) -> Option<&'a AbilityScoreRow> {
    rows.iter()
        .copied()
        .find(|row| {
            cell_text(&row.category).as_deref() == Some(category)
                && cell_text(&row.ability).as_deref() == Some(ability)
        })
}

fn label_group<G: CategoryGroup<Value = LevelLabel>>(
    rows: &[&AbilityScoreRow],
    fallback: LevelLabel,
) -> G {
    G::from_fn(|dimension| pick_label(find_row(rows, G::CATEGORY, dimension), &fallback))
}

fn score_group<G: CategoryGroup<Value = Score>>(rows: &[&AbilityScoreRow]) -> G {
    G::from_fn(|dimension| pick_score(find_row(rows, G::CATEGORY, dimension)))
}

// ==========================================
// RecordBuilder - 员工记录构建引擎
// ==========================================
pub struct RecordBuilder {
    // 无状态引擎,不需要注入依赖
}

/// 按人员 ID 建立的只读索引
struct RowIndex<'a> {
    basics: HashMap<i64, &'a BasicRow>,
    work: HashMap<i64, &'a WorkRow>,
    education: HashMap<i64, &'a EducationRow>,
    abilities: HashMap<i64, Vec<&'a AbilityScoreRow>>,
}

impl<'a> RowIndex<'a> {
    fn new(rows: &'a SourceRows) -> Self {
        // 1:1 行同一人出现多行时，后出现的覆盖先出现的
        let basics = rows
            .basics
            .iter()
            .filter_map(|r| cell_id(&r.person_id).map(|id| (id, r)))
            .collect();
        let work = rows
            .work
            .iter()
            .filter_map(|r| cell_id(&r.person_id).map(|id| (id, r)))
            .collect();
        let education = rows
            .education
            .iter()
            .filter_map(|r| cell_id(&r.person_id).map(|id| (id, r)))
            .collect();

        let mut abilities: HashMap<i64, Vec<&'a AbilityScoreRow>> = HashMap::new();
        for row in &rows.ability_scores {
            if let Some(id) = cell_id(&row.person_id) {
                abilities.entry(id).or_default().push(row);
            }
        }

        Self {
            basics,
            work,
            education,
            abilities,
        }
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 构建全部员工记录
    ///
    /// # 返回
    /// 每个不同人员 ID 一条记录（重复 ID 保留第一条），按序号升序
    pub fn build(&self, rows: &SourceRows) -> Vec<AnalyzedEmployee> {
        let index = RowIndex::new(rows);
        let mut seen_ids: HashSet<i64> = HashSet::new();
        let mut employees = Vec::with_capacity(rows.persons.len());

        for (position, person) in rows.persons.iter().enumerate() {
            let person_id = cell_id(&person.id);

            if let Some(id) = person_id {
                if !seen_ids.insert(id) {
                    tracing::warn!(person_id = id, position, "人员 ID 重复，忽略后续行");
                    continue;
                }
            }

            let employee = self.build_employee(person, position, person_id, &index);
            let score = calculate_employee_score(&employee);
            employees.push(AnalyzedEmployee::new(employee, score));
        }

        // 稳定排序：序号相同时保持输入顺序
        employees.sort_by_key(|e| e.seq());

        tracing::info!(count = employees.len(), "员工记录构建完成");
        employees
    }

    /// 构建单条标准记录
    ///
    /// # 参数
    /// - `person`: person 行
    /// - `position`: 在输入中的位置（0 起）
    /// - `person_id`: 解析后的人员 ID（非整数时为 None，不关联任何子表）
    fn build_employee(
        &self,
        person: &PersonRow,
        position: usize,
        person_id: Option<i64>,
        index: &RowIndex<'_>,
    ) -> Employee {
        let seq = positive_id(&person.seq)
            .or_else(|| positive_id(&person.id))
            .unwrap_or(position as i64 + 1);

        let basic = person_id.and_then(|id| index.basics.get(&id).copied());
        let work = person_id.and_then(|id| index.work.get(&id).copied());
        let education = person_id.and_then(|id| index.education.get(&id).copied());
        let abilities: &[&AbilityScoreRow] = person_id
            .and_then(|id| index.abilities.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if person_id.is_none() {
            tracing::debug!(position, seq, "人员 ID 非数字，子表数据按缺省值处理");
        }

        let opt_text = |value: Option<&Value>| {
            value
                .and_then(cell_text)
                .unwrap_or_else(|| PLACEHOLDER_TEXT.to_string())
        };

        let mid = LevelLabel::Rated(Level::Mid);

        Employee {
            seq,
            basic: BasicInfo {
                name: text_or(&person.name, UNNAMED),
                gender: text_or(&person.gender, UNKNOWN_GENDER),
                age: cell_number(&person.age)
                    .filter(|n| *n >= 0.0)
                    .map(|n| n.min(u32::MAX as f64) as u32)
                    .unwrap_or(0),
                hobby: opt_text(basic.map(|r| &r.hobby)),
                personality: opt_text(basic.map(|r| &r.personality)),
                family: opt_text(basic.map(|r| &r.family)),
            },
            work: WorkExperience {
                years_in_industry: work
                    .map(|r| non_negative_or_zero(&r.years_in_industry))
                    .unwrap_or(0.0),
                job_hops: work
                    .map(|r| non_negative_or_zero(&r.job_hops))
                    .unwrap_or(0.0),
                previous_job: opt_text(work.map(|r| &r.previous_job)),
            },
            education: Education {
                degree: opt_text(education.map(|r| &r.degree)),
                school: opt_text(education.map(|r| &r.school)),
                major: opt_text(education.map(|r| &r.major)),
            },
            values: label_group::<Values>(
                abilities,
                LevelLabel::Unrated(PLACEHOLDER_TEXT.to_string()),
            ),
            competency: label_group::<Competency>(abilities, mid.clone()),
            professional_skills: label_group::<ProfessionalSkills>(abilities, mid.clone()),
            personality_traits: label_group::<PersonalityTraits>(abilities, mid),
            knowledge_skills: score_group::<KnowledgeSkills>(abilities),
            ability_requirements: score_group::<AbilityRequirements>(abilities),
        }
    }
}

/// 构建全部员工记录（便捷函数）
pub fn build_employees(rows: &SourceRows) -> Vec<AnalyzedEmployee> {
    RecordBuilder::new().build(rows)
}
