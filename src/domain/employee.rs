// ==========================================
// 员工画像看板 - 员工标准记录
// ==========================================
// 每个维度分组是固定字段的结构体：缺失维度由构造函数补默认值，
// 不存在"漏键"的可能
// 序列化字段名与前端数据结构保持一致（中文键）
// ==========================================

use crate::domain::types::{LevelLabel, Score};
use serde::Serialize;

// ==========================================
// CategoryGroup - 维度分组
// ==========================================
/// 固定维度集合
///
/// `DIMENSIONS` 的顺序即字段声明顺序，`values()` 按相同顺序返回
pub trait CategoryGroup: Sized {
    type Value;

    /// 分组名称（与 ability_score.category 一致）
    const CATEGORY: &'static str;

    /// 维度名称（与 ability_score.ability 一致）
    const DIMENSIONS: &'static [&'static str];

    /// 按维度名称逐个取值构造
    fn from_fn<F: FnMut(&'static str) -> Self::Value>(f: F) -> Self;

    /// 按维度顺序返回取值
    fn values(&self) -> Vec<&Self::Value>;
}

// ==========================================
// 定性分组
// ==========================================

/// 价值观
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Values {
    #[serde(rename = "与公司价值观相符")]
    pub aligned_with_company: LevelLabel,
    #[serde(rename = "与团队一起成长")]
    pub grows_with_team: LevelLabel,
}

impl CategoryGroup for Values {
    type Value = LevelLabel;
    const CATEGORY: &'static str = "价值观";
    const DIMENSIONS: &'static [&'static str] = &["与公司价值观相符", "与团队一起成长"];

    fn from_fn<F: FnMut(&'static str) -> LevelLabel>(mut f: F) -> Self {
        Self {
            aligned_with_company: f(Self::DIMENSIONS[0]),
            grows_with_team: f(Self::DIMENSIONS[1]),
        }
    }

    fn values(&self) -> Vec<&LevelLabel> {
        vec![&self.aligned_with_company, &self.grows_with_team]
    }
}

/// 胜任能力
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Competency {
    #[serde(rename = "表达能力")]
    pub expression: LevelLabel,
    #[serde(rename = "思维能力")]
    pub thinking: LevelLabel,
    #[serde(rename = "心理素质")]
    pub composure: LevelLabel,
}

impl CategoryGroup for Competency {
    type Value = LevelLabel;
    const CATEGORY: &'static str = "胜任能力";
    const DIMENSIONS: &'static [&'static str] = &["表达能力", "思维能力", "心理素质"];

    fn from_fn<F: FnMut(&'static str) -> LevelLabel>(mut f: F) -> Self {
        Self {
            expression: f(Self::DIMENSIONS[0]),
            thinking: f(Self::DIMENSIONS[1]),
            composure: f(Self::DIMENSIONS[2]),
        }
    }

    fn values(&self) -> Vec<&LevelLabel> {
        vec![&self.expression, &self.thinking, &self.composure]
    }
}

/// 专业技能
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessionalSkills {
    #[serde(rename = "技术层面")]
    pub technical: LevelLabel,
    #[serde(rename = "业务层面")]
    pub business: LevelLabel,
    #[serde(rename = "变现层面")]
    pub monetization: LevelLabel,
}

impl CategoryGroup for ProfessionalSkills {
    type Value = LevelLabel;
    const CATEGORY: &'static str = "专业技能";
    const DIMENSIONS: &'static [&'static str] = &["技术层面", "业务层面", "变现层面"];

    fn from_fn<F: FnMut(&'static str) -> LevelLabel>(mut f: F) -> Self {
        Self {
            technical: f(Self::DIMENSIONS[0]),
            business: f(Self::DIMENSIONS[1]),
            monetization: f(Self::DIMENSIONS[2]),
        }
    }

    fn values(&self) -> Vec<&LevelLabel> {
        vec![&self.technical, &self.business, &self.monetization]
    }
}

/// 人格特质
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalityTraits {
    #[serde(rename = "工作效率")]
    pub work_efficiency: LevelLabel,
    #[serde(rename = "创造性思维")]
    pub creative_thinking: LevelLabel,
    #[serde(rename = "商业嗅机")]
    pub business_acumen: LevelLabel,
    #[serde(rename = "个人亲和力")]
    pub affinity: LevelLabel,
    #[serde(rename = "思想超越")]
    pub transcendence: LevelLabel,
}

impl CategoryGroup for PersonalityTraits {
    type Value = LevelLabel;
    const CATEGORY: &'static str = "人格特质";
    const DIMENSIONS: &'static [&'static str] =
        &["工作效率", "创造性思维", "商业嗅机", "个人亲和力", "思想超越"];

    fn from_fn<F: FnMut(&'static str) -> LevelLabel>(mut f: F) -> Self {
        Self {
            work_efficiency: f(Self::DIMENSIONS[0]),
            creative_thinking: f(Self::DIMENSIONS[1]),
            business_acumen: f(Self::DIMENSIONS[2]),
            affinity: f(Self::DIMENSIONS[3]),
            transcendence: f(Self::DIMENSIONS[4]),
        }
    }

    fn values(&self) -> Vec<&LevelLabel> {
        vec![
            &self.work_efficiency,
            &self.creative_thinking,
            &self.business_acumen,
            &self.affinity,
            &self.transcendence,
        ]
    }
}

// ==========================================
// 数值分组
// ==========================================

/// 知识技能
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeSkills {
    #[serde(rename = "公司方案产品理解能力")]
    pub product_understanding: Score,
    #[serde(rename = "行业知识")]
    pub industry_knowledge: Score,
    #[serde(rename = "专业知识")]
    pub domain_knowledge: Score,
}

impl CategoryGroup for KnowledgeSkills {
    type Value = Score;
    const CATEGORY: &'static str = "知识技能";
    const DIMENSIONS: &'static [&'static str] = &["公司方案产品理解能力", "行业知识", "专业知识"];

    fn from_fn<F: FnMut(&'static str) -> Score>(mut f: F) -> Self {
        Self {
            product_understanding: f(Self::DIMENSIONS[0]),
            industry_knowledge: f(Self::DIMENSIONS[1]),
            domain_knowledge: f(Self::DIMENSIONS[2]),
        }
    }

    fn values(&self) -> Vec<&Score> {
        vec![
            &self.product_understanding,
            &self.industry_knowledge,
            &self.domain_knowledge,
        ]
    }
}

/// 能力要求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityRequirements {
    #[serde(rename = "客户痛点识别及需求探索能力")]
    pub pain_point_discovery: Score,
    #[serde(rename = "方案设计能力")]
    pub solution_design: Score,
    #[serde(rename = "业务价值传递能力")]
    pub value_delivery: Score,
    #[serde(rename = "客户关系管理与高层对话能力")]
    pub executive_relationship: Score,
    #[serde(rename = "资源协调组织能力")]
    pub resource_coordination: Score,
}

impl CategoryGroup for AbilityRequirements {
    type Value = Score;
    const CATEGORY: &'static str = "能力要求";
    const DIMENSIONS: &'static [&'static str] = &[
        "客户痛点识别及需求探索能力",
        "方案设计能力",
        "业务价值传递能力",
        "客户关系管理与高层对话能力",
        "资源协调组织能力",
    ];

    fn from_fn<F: FnMut(&'static str) -> Score>(mut f: F) -> Self {
        Self {
            pain_point_discovery: f(Self::DIMENSIONS[0]),
            solution_design: f(Self::DIMENSIONS[1]),
            value_delivery: f(Self::DIMENSIONS[2]),
            executive_relationship: f(Self::DIMENSIONS[3]),
            resource_coordination: f(Self::DIMENSIONS[4]),
        }
    }

    fn values(&self) -> Vec<&Score> {
        vec![
            &self.pain_point_discovery,
            &self.solution_design,
            &self.value_delivery,
            &self.executive_relationship,
            &self.resource_coordination,
        ]
    }
}

// ==========================================
// 基本信息 / 工作经历 / 教育背景
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicInfo {
    #[serde(rename = "姓名")]
    pub name: String,
    #[serde(rename = "性别")]
    pub gender: String,
    #[serde(rename = "年龄")]
    pub age: u32,
    #[serde(rename = "身体+爱好")]
    pub hobby: String,
    #[serde(rename = "性格")]
    pub personality: String,
    #[serde(rename = "家庭")]
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkExperience {
    /// 同行业年限
    #[serde(rename = "同行业年限")]
    pub years_in_industry: f64,
    /// 跳槽次数
    #[serde(rename = "跳槽次数")]
    pub job_hops: f64,
    #[serde(rename = "曾担任工作")]
    pub previous_job: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Education {
    #[serde(rename = "学历")]
    pub degree: String,
    #[serde(rename = "学校")]
    pub school: String,
    #[serde(rename = "专业")]
    pub major: String,
}

// ==========================================
// Employee - 员工标准记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    /// 序号（正整数，排序键）
    #[serde(rename = "序号")]
    pub seq: i64,
    #[serde(rename = "基本信息")]
    pub basic: BasicInfo,
    #[serde(rename = "工作经历")]
    pub work: WorkExperience,
    #[serde(rename = "教育背景")]
    pub education: Education,
    #[serde(rename = "价值观")]
    pub values: Values,
    #[serde(rename = "胜任能力")]
    pub competency: Competency,
    #[serde(rename = "专业技能")]
    pub professional_skills: ProfessionalSkills,
    #[serde(rename = "人格特质")]
    pub personality_traits: PersonalityTraits,
    #[serde(rename = "知识技能")]
    pub knowledge_skills: KnowledgeSkills,
    #[serde(rename = "能力要求")]
    pub ability_requirements: AbilityRequirements,
}
