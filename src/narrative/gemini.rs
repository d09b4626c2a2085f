// ==========================================
// 员工画像看板 - Gemini 画像适配器
// ==========================================
// 接口: POST {base_url}/models/{model}:generateContent
// 认证: x-goog-api-key 请求头
// 输出: JSON Schema 约束的 {persona, diagnosis}
// ==========================================

use super::error::NarrativeError;
use super::prompt::{build_prompt, response_schema, TEMPERATURE};
use super::NarrativeService;
use crate::config::app_config::NarrativeConfig;
use crate::domain::analysis::Narrative;
use crate::domain::employee::Employee;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 响应体大小上限（1MB）
const MAX_RESPONSE_LEN: usize = 1_024 * 1_024;

// ==========================================
// API 类型
// ==========================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

// ==========================================
// GeminiNarrativeService
// ==========================================
#[derive(Debug, Clone)]
pub struct GeminiNarrativeService {
    client: reqwest::Client,
    config: NarrativeConfig,
}

impl GeminiNarrativeService {
    pub fn new(config: NarrativeConfig) -> Result<Self, NarrativeError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// 调用服务；错误由 `analyze` 统一转换为固定画像
    pub async fn try_analyze(
        &self,
        employee: &Employee,
        credential: &str,
    ) -> Result<Narrative, NarrativeError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(NarrativeError::MissingCredential);
        }

        let prompt = build_prompt(employee)?;
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: TEMPERATURE,
            },
        };

        let mut response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", credential)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > MAX_RESPONSE_LEN {
                return Err(NarrativeError::Status {
                    status: status.as_u16(),
                    message: "响应体过大".to_string(),
                });
            }
            bytes.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&bytes);

        if !status.is_success() {
            let message = serde_json::from_str::<GenerateContentResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                message,
            });
        }

        parse_response(&body)
    }
}

/// 解析 generateContent 响应中的画像 JSON
fn parse_response(body: &str) -> Result<Narrative, NarrativeError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;

    let text: String = parsed
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
        .ok_or(NarrativeError::EmptyResponse)?;

    Ok(serde_json::from_str::<Narrative>(&text)?)
}

#[async_trait]
impl NarrativeService for GeminiNarrativeService {
    async fn analyze(&self, employee: &Employee, credential: &str) -> Narrative {
        match self.try_analyze(employee, credential).await {
            Ok(narrative) => {
                tracing::info!(seq = employee.seq, persona = %narrative.persona, "AI 画像生成完成");
                narrative
            }
            Err(e) => {
                tracing::warn!(seq = employee.seq, error = %e, "AI 画像生成失败，返回固定画像");
                Narrative::sentinel()
            }
        }
    }
}
