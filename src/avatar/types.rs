use std::fmt;

use serde::{Deserialize, Serialize};

/// 批量合成请求
///
/// 除文本外都有固定默认值（与服务端示例一致），提交后不可变。
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub character: String,
    pub style: String,
    pub video_format: String,
    pub video_codec: String,
    pub subtitle_type: String,
    pub background_color: String,
    pub customized: bool,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: "en-US-JennyNeural".to_string(),
            character: "lisa".to_string(),
            style: "graceful-sitting".to_string(),
            video_format: "webm".to_string(),
            video_codec: "vp9".to_string(),
            subtitle_type: "soft_embedded".to_string(),
            background_color: "#212529".to_string(),
            customized: false,
        }
    }
}

/// 任务句柄（服务端返回的不透明 ID）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 任务状态
///
/// 由服务端返回的字符串映射而来；未识别的字符串按非终态处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// 解析服务端状态字符串
    ///
    /// "NotStarted" 视为 Pending；未识别的状态按 Pending（非终态）处理，
    /// 只记录告警，不中断轮询。
    pub fn parse(status: &str) -> Self {
        match status {
            "NotStarted" | "Pending" => JobStatus::Pending,
            "Running" => JobStatus::Running,
            "Succeeded" => JobStatus::Succeeded,
            "Failed" => JobStatus::Failed,
            other => {
                tracing::warn!("Unrecognized job status '{}', treating as pending", other);
                JobStatus::Pending
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

/// 单次轮询结果
///
/// result 仅在 Succeeded 时存在，为产物下载地址。
#[derive(Debug, Clone)]
pub struct JobPoll {
    pub status: JobStatus,
    pub result: Option<String>,
}

// ============================================================================
// 线上协议结构（camelCase JSON）
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SynthesisPayload {
    display_name: String,
    description: String,
    text_type: String,
    synthesis_config: SynthesisVoice,
    inputs: Vec<SynthesisInput>,
    properties: SynthesisProperties,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisVoice {
    voice: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisInput {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisProperties {
    talking_avatar_character: String,
    talking_avatar_style: String,
    video_format: String,
    video_codec: String,
    subtitle_type: String,
    background_color: String,
    customized: bool,
}

impl SynthesisPayload {
    pub(super) fn from_request(request: &SynthesisRequest) -> Self {
        Self {
            display_name: "Simple avatar synthesis".to_string(),
            description: "Simple avatar synthesis description".to_string(),
            text_type: "PlainText".to_string(),
            synthesis_config: SynthesisVoice {
                voice: request.voice.clone(),
            },
            inputs: vec![SynthesisInput {
                text: request.text.clone(),
            }],
            properties: SynthesisProperties {
                talking_avatar_character: request.character.clone(),
                talking_avatar_style: request.style.clone(),
                video_format: request.video_format.clone(),
                video_codec: request.video_codec.clone(),
                subtitle_type: request.subtitle_type.clone(),
                background_color: request.background_color.clone(),
                customized: request.customized,
            },
        }
    }
}

/// 任务资源响应（提交和查询共用同一个结构，outputs 可选）
#[derive(Deserialize)]
pub(super) struct JobResponse {
    pub(super) id: Option<String>,
    pub(super) status: Option<String>,
    pub(super) outputs: Option<JobOutputs>,
}

#[derive(Deserialize)]
pub(super) struct JobOutputs {
    pub(super) result: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_maps_known_strings() {
        assert_eq!(JobStatus::parse("NotStarted"), JobStatus::Pending);
        assert_eq!(JobStatus::parse("Pending"), JobStatus::Pending);
        assert_eq!(JobStatus::parse("Running"), JobStatus::Running);
        assert_eq!(JobStatus::parse("Succeeded"), JobStatus::Succeeded);
        assert_eq!(JobStatus::parse("Failed"), JobStatus::Failed);
    }

    #[test]
    fn status_parse_treats_unknown_as_pending() {
        let status = JobStatus::parse("Throttled");
        assert_eq!(status, JobStatus::Pending);
        assert!(!status.is_terminal());
    }

    #[test]
    fn terminal_states() {
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn payload_uses_camel_case_and_defaults() {
        let request = SynthesisRequest::new("Hello");
        let payload = SynthesisPayload::from_request(&request);
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["displayName"], "Simple avatar synthesis");
        assert_eq!(json["textType"], "PlainText");
        assert_eq!(json["synthesisConfig"]["voice"], "en-US-JennyNeural");
        assert_eq!(json["inputs"][0]["text"], "Hello");
        assert_eq!(json["properties"]["talkingAvatarCharacter"], "lisa");
        assert_eq!(json["properties"]["talkingAvatarStyle"], "graceful-sitting");
        assert_eq!(json["properties"]["videoFormat"], "webm");
        assert_eq!(json["properties"]["videoCodec"], "vp9");
        assert_eq!(json["properties"]["subtitleType"], "soft_embedded");
        assert_eq!(json["properties"]["backgroundColor"], "#212529");
        assert_eq!(json["properties"]["customized"], false);
    }

    #[test]
    fn job_response_parses_without_outputs() {
        let body = r#"{"id":"job-123","status":"Running"}"#;
        let response: JobResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.id.as_deref(), Some("job-123"));
        assert_eq!(response.status.as_deref(), Some("Running"));
        assert!(response.outputs.is_none());
    }

    #[test]
    fn job_response_parses_with_outputs() {
        let body = r#"{"id":"job-123","status":"Succeeded","outputs":{"result":"https://cdn/out.webm","summary":"https://cdn/summary.json"}}"#;
        let response: JobResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.outputs.and_then(|o| o.result).as_deref(),
            Some("https://cdn/out.webm")
        );
    }
}
