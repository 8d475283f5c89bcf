use async_trait::async_trait;
use reqwest::Client;

use super::traits::{AvatarError, AvatarService};
use super::types::{JobHandle, JobPoll, JobResponse, JobStatus, SynthesisPayload, SynthesisRequest};

/// Azure 批量合成（talking avatar）客户端
///
/// 一次提交 + 调用方驱动的轮询，无内置重试/超时。
pub struct AzureAvatarClient {
    base_url: String,
    subscription_key: String,
    client: Client,
}

impl AzureAvatarClient {
    /// base_url 形如
    /// `https://{region}.customvoice.api.speech.microsoft.com/api/texttospeech/3.1-preview1/batchsynthesis/talkingavatar`
    pub fn new(client: Client, base_url: impl Into<String>, subscription_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            subscription_key: subscription_key.into(),
            client,
        }
    }

    fn job_url(&self, handle: &JobHandle) -> String {
        format!("{}/{}", self.base_url, handle.as_str())
    }
}

#[async_trait]
impl AvatarService for AzureAvatarClient {
    async fn submit(&self, request: &SynthesisRequest) -> Result<JobHandle, AvatarError> {
        if request.text.trim().is_empty() {
            return Err(AvatarError::EmptyText);
        }

        let payload = SynthesisPayload::from_request(request);

        let response = self
            .client
            .post(&self.base_url)
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AvatarError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AvatarError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AvatarError::SubmissionFailed {
                status: status.as_u16(),
                body,
            });
        }

        let result: JobResponse =
            serde_json::from_str(&body).map_err(|e| AvatarError::Api(e.to_string()))?;

        let job_id = result
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AvatarError::Api("Job response has no id".to_string()))?;

        tracing::info!("Batch avatar synthesis job submitted, id={}", job_id);
        Ok(JobHandle::new(job_id))
    }

    async fn poll(&self, handle: &JobHandle) -> Result<JobPoll, AvatarError> {
        let response = self
            .client
            .get(self.job_url(handle))
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .send()
            .await
            .map_err(|e| AvatarError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AvatarError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AvatarError::PollFailed {
                status: status.as_u16(),
                body,
            });
        }

        let result: JobResponse =
            serde_json::from_str(&body).map_err(|e| AvatarError::Api(e.to_string()))?;

        let raw_status = result
            .status
            .ok_or_else(|| AvatarError::Api("Job response has no status".to_string()))?;
        let job_status = JobStatus::parse(&raw_status);

        // 产物地址只在成功终态出现
        let artifact = if job_status == JobStatus::Succeeded {
            let url = result.outputs.and_then(|o| o.result).ok_or_else(|| {
                AvatarError::Api("Succeeded job has no outputs.result".to_string())
            })?;
            tracing::info!("Batch synthesis job {} succeeded, download URL: {}", handle, url);
            Some(url)
        } else {
            None
        };

        Ok(JobPoll {
            status: job_status,
            result: artifact,
        })
    }
}
