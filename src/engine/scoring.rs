// ==========================================
// 员工画像看板 - 综合评分引擎
// ==========================================
// 四项子分（均归一到 0-100）加权:
// - 知识技能   0.25  (分值/5)*100 的平均
// - 能力要求   0.35  (分值/5)*100 的平均
// - 人格特质   0.20  等级映射分的平均
// - 胜任能力+专业技能 0.20  6 个等级映射分的平均
// 纯函数: 无 I/O、无随机性
// ==========================================

use crate::domain::employee::{CategoryGroup, Employee};
use crate::domain::types::{Level, LevelLabel, Score};
use serde::Serialize;

pub const KNOWLEDGE_WEIGHT: f64 = 0.25;
pub const ABILITY_WEIGHT: f64 = 0.35;
pub const TRAITS_WEIGHT: f64 = 0.20;
pub const COMPETENCY_WEIGHT: f64 = 0.20;

/// 无法识别的等级标签的映射分（包括 "待补充"）
pub const UNRECOGNIZED_LEVEL_SCORE: f64 = 60.0;

/// 等级标签 → 0-100 映射分
///
/// 高/5 → 95，中/4 → 75，低/1-3 → 55，其他 → 60
pub fn level_score(label: &LevelLabel) -> f64 {
    match label.level() {
        Some(Level::High) => 95.0,
        Some(Level::Mid) => 75.0,
        Some(Level::Low) => 55.0,
        None => UNRECOGNIZED_LEVEL_SCORE,
    }
}

/// 1-5 分 → 0-100
pub fn scale_score(score: Score) -> f64 {
    score.value() as f64 / Score::MAX as f64 * 100.0
}

fn average<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// ==========================================
// ScoreBreakdown - 子分明细
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub knowledge: f64,
    pub ability: f64,
    pub traits: f64,
    pub competency: f64,
}

impl ScoreBreakdown {
    /// 计算四项子分
    pub fn of(employee: &Employee) -> Self {
        let knowledge = average(
            employee
                .knowledge_skills
                .values()
                .into_iter()
                .map(|s| scale_score(*s)),
        );
        let ability = average(
            employee
                .ability_requirements
                .values()
                .into_iter()
                .map(|s| scale_score(*s)),
        );
        let traits = average(
            employee
                .personality_traits
                .values()
                .into_iter()
                .map(level_score),
        );
        let competency = average(
            employee
                .competency
                .values()
                .into_iter()
                .chain(employee.professional_skills.values())
                .map(level_score),
        );

        Self {
            knowledge,
            ability,
            traits,
            competency,
        }
    }

    /// 加权合计（未取整）
    pub fn weighted_total(&self) -> f64 {
        self.knowledge * KNOWLEDGE_WEIGHT
            + self.ability * ABILITY_WEIGHT
            + self.traits * TRAITS_WEIGHT
            + self.competency * COMPETENCY_WEIGHT
    }
}

/// 计算综合评分 (0-100)
///
/// 取整使用 `f64::round`（四舍五入，.5 远离零）
pub fn calculate_employee_score(employee: &Employee) -> u8 {
    let total = ScoreBreakdown::of(employee).weighted_total();
    total.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::*;
    use crate::domain::types::PLACEHOLDER_TEXT;

    fn employee_with(label: LevelLabel, score: Score) -> Employee {
        Employee {
            seq: 1,
            basic: BasicInfo {
                name: "张三".into(),
                gender: "男".into(),
                age: 30,
                hobby: PLACEHOLDER_TEXT.into(),
                personality: PLACEHOLDER_TEXT.into(),
                family: PLACEHOLDER_TEXT.into(),
            },
            work: WorkExperience {
                years_in_industry: 0.0,
                job_hops: 0.0,
                previous_job: PLACEHOLDER_TEXT.into(),
            },
            education: Education {
                degree: PLACEHOLDER_TEXT.into(),
                school: PLACEHOLDER_TEXT.into(),
                major: PLACEHOLDER_TEXT.into(),
            },
            values: Values::from_fn(|_| LevelLabel::Unrated(PLACEHOLDER_TEXT.into())),
            competency: Competency::from_fn(|_| label.clone()),
            professional_skills: ProfessionalSkills::from_fn(|_| label.clone()),
            personality_traits: PersonalityTraits::from_fn(|_| label.clone()),
            knowledge_skills: KnowledgeSkills::from_fn(|_| score),
            ability_requirements: AbilityRequirements::from_fn(|_| score),
        }
    }

    #[test]
    fn test_level_score_table() {
        assert_eq!(level_score(&LevelLabel::from_text("高")), 95.0);
        assert_eq!(level_score(&LevelLabel::from_text("5")), 95.0);
        assert_eq!(level_score(&LevelLabel::from_text("中")), 75.0);
        assert_eq!(level_score(&LevelLabel::from_text("4")), 75.0);
        assert_eq!(level_score(&LevelLabel::from_text("低")), 55.0);
        assert_eq!(level_score(&LevelLabel::from_text("1")), 55.0);
        assert_eq!(level_score(&LevelLabel::from_text("技术弱，中")), 60.0);
        assert_eq!(level_score(&LevelLabel::from_text(PLACEHOLDER_TEXT)), 60.0);
    }

    #[test]
    fn test_defaults_score_66() {
        let emp = employee_with(LevelLabel::default(), Score::DEFAULT);
        let breakdown = ScoreBreakdown::of(&emp);
        assert!((breakdown.knowledge - 60.0).abs() < 1e-9);
        assert!((breakdown.ability - 60.0).abs() < 1e-9);
        assert!((breakdown.traits - 75.0).abs() < 1e-9);
        assert!((breakdown.competency - 75.0).abs() < 1e-9);
        assert_eq!(calculate_employee_score(&emp), 66);
    }

    #[test]
    fn test_all_high_scores_98() {
        // 25 + 35 + 19 + 19 = 98："高" 映射为 95 而非 100
        let emp = employee_with(LevelLabel::Rated(Level::High), Score::new(5).unwrap());
        assert_eq!(calculate_employee_score(&emp), 98);
    }

    #[test]
    fn test_all_low_scores() {
        // 20*0.25 + 20*0.35 + 55*0.2 + 55*0.2 = 34
        let emp = employee_with(LevelLabel::Rated(Level::Low), Score::new(1).unwrap());
        assert_eq!(calculate_employee_score(&emp), 34);
    }

    #[test]
    fn test_unrecognized_labels_use_60() {
        // 60*0.25 + 60*0.35 + 60*0.2 + 60*0.2 = 60
        let emp = employee_with(LevelLabel::Unrated("优秀".into()), Score::DEFAULT);
        assert_eq!(calculate_employee_score(&emp), 60);
    }

    #[test]
    fn test_values_do_not_affect_score() {
        let mut emp = employee_with(LevelLabel::default(), Score::DEFAULT);
        let before = calculate_employee_score(&emp);
        emp.values = Values::from_fn(|_| LevelLabel::Rated(Level::High));
        assert_eq!(calculate_employee_score(&emp), before);
    }

    #[test]
    fn test_competency_and_skills_are_averaged_together() {
        let mut emp = employee_with(LevelLabel::default(), Score::DEFAULT);
        emp.competency = Competency::from_fn(|_| LevelLabel::Rated(Level::High));
        emp.professional_skills = ProfessionalSkills::from_fn(|_| LevelLabel::Rated(Level::Low));
        let breakdown = ScoreBreakdown::of(&emp);
        assert!((breakdown.competency - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_deterministic_and_bounded() {
        let labels = [
            LevelLabel::Rated(Level::Low),
            LevelLabel::Rated(Level::Mid),
            LevelLabel::Rated(Level::High),
            LevelLabel::Unrated("x".into()),
        ];
        for label in labels {
            for v in Score::MIN..=Score::MAX {
                let emp = employee_with(label.clone(), Score::new(v).unwrap());
                let first = calculate_employee_score(&emp);
                assert_eq!(first, calculate_employee_score(&emp));
                assert!(first <= 100);
            }
        }
    }
}
