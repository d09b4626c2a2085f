// ==========================================
// 记录构建 + 评分 集成测试
// ==========================================
// 测试范围:
// 1. 每个人员 ID 恰好一条记录，按序号升序
// 2. 缺省值策略（序号回退、文本占位、维度缺省）
// 3. 幂等性与评分区间
// 链路: SQLite 文件 → EmployeeSourceRepository → RecordBuilder → Scorer
// ==========================================

mod test_helpers;

use std::sync::{Arc, Mutex};

use talent_board::db::open_readonly_connection;
use talent_board::domain::{AnalyzedEmployee, Level, LevelLabel, Score, PLACEHOLDER_TEXT};
use talent_board::engine::build_employees;
use talent_board::repository::EmployeeSourceRepository;
use test_helpers::*;

fn build_from(db_path: &str) -> Vec<AnalyzedEmployee> {
    let conn = open_readonly_connection(std::path::Path::new(db_path)).expect("只读打开失败");
    let repo = EmployeeSourceRepository::from_connection(Arc::new(Mutex::new(conn)));
    let rows = repo.load_all().expect("读取失败");
    build_employees(&rows)
}

fn seqs(employees: &[AnalyzedEmployee]) -> Vec<i64> {
    employees.iter().map(|e| e.seq()).collect()
}

// ==========================================
// 记录数量与顺序
// ==========================================

#[test]
fn test_one_record_per_person_sorted_by_seq() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open(&db_path);
    insert_bare_person(&conn, 1, 30, "甲");
    insert_bare_person(&conn, 2, 10, "乙");
    insert_bare_person(&conn, 3, 20, "丙");
    drop(conn);

    let employees = build_from(&db_path);
    assert_eq!(seqs(&employees), vec![10, 20, 30]);
    assert_eq!(employees[0].name(), "乙");
}

#[test]
fn test_duplicate_person_id_keeps_first_row() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open(&db_path);
    insert_bare_person(&conn, 1, 1, "先出现");
    insert_bare_person(&conn, 1, 2, "后出现");
    insert_bare_person(&conn, 2, 3, "其他人");
    drop(conn);

    let employees = build_from(&db_path);
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].name(), "先出现");
    assert_eq!(seqs(&employees), vec![1, 3]);
}

#[test]
fn test_empty_source_yields_empty_list() {
    let (_tmp, db_path) = create_test_db().unwrap();
    assert!(build_from(&db_path).is_empty());
}

// ==========================================
// 缺省值策略
// ==========================================

#[test]
fn test_seq_falls_back_to_id_then_position() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open(&db_path);
    insert_person(&conn, Some(1), Some(5), Some("有序号"), None, None);
    insert_person(&conn, Some(42), None, Some("用ID"), None, None);
    // 第 3 行：序号和 ID 都不可用 → 位置 3
    insert_person(&conn, None, None, Some("用位置"), None, None);
    drop(conn);

    let employees = build_from(&db_path);
    let by_name = |name: &str| {
        employees
            .iter()
            .find(|e| e.name() == name)
            .map(|e| e.seq())
            .unwrap()
    };
    assert_eq!(by_name("有序号"), 5);
    assert_eq!(by_name("用ID"), 42);
    assert_eq!(by_name("用位置"), 3);
    assert_eq!(seqs(&employees), vec![3, 5, 42]);
}

#[test]
fn test_person_without_related_rows_gets_defaults() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open(&db_path);
    insert_person(&conn, Some(1), Some(1), None, Some(""), None);
    drop(conn);

    let employees = build_from(&db_path);
    assert_eq!(employees.len(), 1);

    let record = employees[0].employee();
    assert_eq!(record.basic.name, "未命名");
    assert_eq!(record.basic.gender, "未知");
    assert_eq!(record.basic.age, 0);
    assert_eq!(record.basic.hobby, PLACEHOLDER_TEXT);
    assert_eq!(record.work.years_in_industry, 0.0);
    assert_eq!(record.work.previous_job, PLACEHOLDER_TEXT);
    assert_eq!(record.education.degree, PLACEHOLDER_TEXT);

    assert_eq!(
        record.values.aligned_with_company,
        LevelLabel::Unrated(PLACEHOLDER_TEXT.to_string())
    );
    assert_eq!(record.competency.expression, LevelLabel::Rated(Level::Mid));
    assert_eq!(record.knowledge_skills.industry_knowledge, Score::DEFAULT);

    // 只有缺省值: 知识 60、能力 60、特质 75、胜任+专业 75 → 66
    assert_eq!(employees[0].calculated_score(), 66);
}

#[test]
fn test_related_rows_and_label_resolution() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open(&db_path);
    insert_person(&conn, Some(7), Some(1), Some("张三"), Some("男"), Some(31));
    insert_basic(&conn, 7, "羽毛球", "外向", "已婚");
    insert_work(&conn, 7, 6.5, -2.0, "售前工程师");
    insert_education(&conn, 7, "硕士", "", "计算机");
    // 文本优先于分数
    insert_ability(&conn, 7, "胜任能力", "表达能力", Some("高"), Some(1.0));
    // 只有分数时按分数映射
    insert_ability(&conn, 7, "胜任能力", "思维能力", None, Some(2.0));
    // 无法识别的文本原样保留
    insert_ability(&conn, 7, "专业技能", "技术层面", Some("优秀"), None);
    // 数值维度：分数优先，其次文本
    insert_ability(&conn, 7, "知识技能", "行业知识", Some("高"), Some(2.0));
    insert_ability(&conn, 7, "知识技能", "专业知识", Some("高"), None);
    drop(conn);

    let employees = build_from(&db_path);
    let record = employees[0].employee();

    assert_eq!(record.basic.hobby, "羽毛球");
    assert_eq!(record.basic.age, 31);
    assert_eq!(record.work.years_in_industry, 6.5);
    assert_eq!(record.work.job_hops, 0.0);
    assert_eq!(record.education.school, PLACEHOLDER_TEXT);
    assert_eq!(record.education.major, "计算机");

    assert_eq!(record.competency.expression, LevelLabel::Rated(Level::High));
    assert_eq!(record.competency.thinking, LevelLabel::Rated(Level::Low));
    assert_eq!(record.competency.composure, LevelLabel::Rated(Level::Mid));
    assert_eq!(
        record.professional_skills.technical,
        LevelLabel::Unrated("优秀".to_string())
    );
    assert_eq!(record.knowledge_skills.industry_knowledge.value(), 2);
    assert_eq!(record.knowledge_skills.domain_knowledge.value(), 5);
    assert_eq!(record.knowledge_skills.product_understanding, Score::DEFAULT);
}

// ==========================================
// 评分
// ==========================================

#[test]
fn test_scores_for_uniform_profiles() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open(&db_path);
    insert_bare_person(&conn, 1, 1, "全高");
    insert_all_dimensions(&conn, 1, "高", 5.0);
    insert_bare_person(&conn, 2, 2, "全低");
    insert_all_dimensions(&conn, 2, "低", 1.0);
    drop(conn);

    let employees = build_from(&db_path);
    assert_eq!(employees[0].name(), "全高");
    assert_eq!(employees[0].calculated_score(), 98);
    assert_eq!(employees[1].name(), "全低");
    // 知识 20×0.25 + 能力 20×0.35 + 特质 55×0.2 + 胜任/专业 55×0.2 = 34
    assert_eq!(employees[1].calculated_score(), 34);

    for e in &employees {
        assert!(e.calculated_score() <= 100);
        assert!(e.ai_analysis().is_none());
    }
}

#[test]
fn test_build_is_idempotent() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open(&db_path);
    for id in 1..=5 {
        insert_bare_person(&conn, id, 6 - id, &format!("员工{}", id));
        insert_all_dimensions(&conn, id, if id % 2 == 0 { "高" } else { "低" }, id as f64);
    }
    drop(conn);

    let first = build_from(&db_path);
    let second = build_from(&db_path);
    assert_eq!(first, second);
    assert_eq!(seqs(&first), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_serialized_record_has_every_dimension() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open(&db_path);
    insert_bare_person(&conn, 1, 1, "张三");
    drop(conn);

    let employees = build_from(&db_path);
    let json = serde_json::to_value(&employees[0]).unwrap();

    assert_eq!(json["序号"], 1);
    assert_eq!(json["calculatedScore"], 66);
    assert!(json.get("aiAnalysis").is_none());
    assert_eq!(json["价值观"]["与公司价值观相符"], PLACEHOLDER_TEXT);
    assert_eq!(json["胜任能力"]["表达能力"], "中");
    assert_eq!(json["知识技能"]["行业知识"], 3);
    assert_eq!(json["人格特质"].as_object().unwrap().len(), 5);
    assert_eq!(json["能力要求"].as_object().unwrap().len(), 5);
}
