use async_trait::async_trait;

use super::types::{JobHandle, JobPoll, SynthesisRequest};

#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    #[error("Submission failed: HTTP {status}: {body}")]
    SubmissionFailed { status: u16, body: String },
    #[error("Poll failed: HTTP {status}: {body}")]
    PollFailed { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Synthesis text is empty")]
    EmptyText,
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 虚拟形象批量合成服务 trait
///
/// 提交一次合成请求，之后由调用方按自己的节奏轮询，
/// 直到观察到终态（Succeeded / Failed）为止。
/// 客户端不做重试、不做退避、也不重复提交同一个任务。
#[async_trait]
pub trait AvatarService: Send + Sync {
    /// 提交合成任务，返回任务句柄
    async fn submit(&self, request: &SynthesisRequest) -> Result<JobHandle, AvatarError>;

    /// 查询任务状态；Succeeded 时附带产物下载地址
    async fn poll(&self, handle: &JobHandle) -> Result<JobPoll, AvatarError>;
}
