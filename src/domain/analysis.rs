// ==========================================
// 员工画像看板 - 分析结果记录
// ==========================================
// AnalyzedEmployee = 标准记录 + 综合评分 + 可选 AI 画像
// 红线: 评分一经计算不可修改；构建后只允许写入 AI 画像
// ==========================================

use crate::domain::employee::Employee;
use serde::{Deserialize, Serialize};

/// 画像服务失败时的固定标题（分析中断）
pub const SENTINEL_PERSONA: &str = "分析中断";

/// 画像服务失败时的固定诊断（服务不可达，请检查密钥）
pub const SENTINEL_DIAGNOSIS: &str = "无法连接到 AI 服务。请检查您的 API Key 是否正确或额度是否充足。";

// ==========================================
// Narrative - AI 画像
// ==========================================
/// 只描述定性特征，不包含分数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    /// 简短画像标题（例如 "稳健的战略家"）
    pub persona: String,
    /// 2-3 句综合诊断
    pub diagnosis: String,
}

impl Narrative {
    pub fn new(persona: impl Into<String>, diagnosis: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            diagnosis: diagnosis.into(),
        }
    }

    /// 服务失败时的固定画像
    ///
    /// 调用方把它当作正常可展示的结果，不需要特殊处理
    pub fn sentinel() -> Self {
        Self::new(SENTINEL_PERSONA, SENTINEL_DIAGNOSIS)
    }

    pub fn is_sentinel(&self) -> bool {
        self.persona == SENTINEL_PERSONA && self.diagnosis == SENTINEL_DIAGNOSIS
    }
}

// ==========================================
// AnalyzedEmployee - 带评分的员工记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedEmployee {
    #[serde(flatten)]
    employee: Employee,

    #[serde(rename = "calculatedScore")]
    calculated_score: u8,

    #[serde(rename = "aiAnalysis", skip_serializing_if = "Option::is_none")]
    ai_analysis: Option<Narrative>,
}

impl AnalyzedEmployee {
    pub(crate) fn new(employee: Employee, calculated_score: u8) -> Self {
        Self {
            employee,
            calculated_score,
            ai_analysis: None,
        }
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn seq(&self) -> i64 {
        self.employee.seq
    }

    pub fn name(&self) -> &str {
        &self.employee.basic.name
    }

    /// 综合评分 (0-100)
    pub fn calculated_score(&self) -> u8 {
        self.calculated_score
    }

    pub fn ai_analysis(&self) -> Option<&Narrative> {
        self.ai_analysis.as_ref()
    }

    /// 写入 AI 画像（唯一允许的构建后修改）
    pub(crate) fn set_ai_analysis(&mut self, narrative: Narrative) {
        self.ai_analysis = Some(narrative);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        let sentinel = Narrative::sentinel();
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.persona, "分析中断");
        assert!(!Narrative::new("稳健的战略家", "擅长规划").is_sentinel());
    }
}
