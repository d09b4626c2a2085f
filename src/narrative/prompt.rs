// ==========================================
// 员工画像看板 - 画像提示词与响应结构
// ==========================================

use crate::domain::employee::Employee;
use serde_json::{json, Value};

/// 生成温度
pub const TEMPERATURE: f64 = 0.3;

/// 构建提示词（标准记录以 JSON 形式附在末尾）
pub fn build_prompt(employee: &Employee) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string(employee)?;
    Ok(format!(
        "作为北区客户部的高级HR专家，请分析该员工数据。\n\
         不要计算分数，也不要在回答中提及任何分数，重点分析其性格特质、能力强项和潜在短板。\n\
         \n\
         员工数据:\n\
         {data}\n"
    ))
}

/// 响应 JSON Schema：persona + diagnosis 均必填
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "persona": {
                "type": "STRING",
                "description": "一个简短、吸引人的画像标题，描述这个人（例如：'稳健的战略家'）。"
            },
            "diagnosis": {
                "type": "STRING",
                "description": "基于数据的综合性专业诊断，分析其优势和潜在风险（2-3句话）。不要包含具体分数。"
            }
        },
        "required": ["persona", "diagnosis"]
    })
}
