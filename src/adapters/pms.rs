use crate::config::RappConfig;
use crate::domain::model::{default_policy_data, PolicySubmission, ServiceRegistration};
use crate::domain::ports::PolicyManagement;
use crate::utils::error::{RappError, Result};
use crate::utils::metrics::RappMetrics;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const SERVICES_RESOURCE: &str = "services";
const POLICIES_RESOURCE: &str = "policies";

/// PMS 回應的原始內容，轉發給前端用
#[derive(Debug, Clone)]
pub struct PmsResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// 對 PMS `/a1-policy/v2` REST 介面的 client，所有呼叫共用同一個連線池
pub struct PmsClient {
    client: Client,
    metrics: RappMetrics,
    policy_data: serde_json::Value,
}

impl PmsClient {
    pub fn new(metrics: RappMetrics) -> Result<Self> {
        Self::with_timeout(metrics, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(metrics: RappMetrics, timeout: Duration) -> Result<Self> {
        // 3xx 不跟隨，只有 PMS 本身回 2xx 才算成功
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            metrics,
            policy_data: default_policy_data(),
        })
    }

    pub fn with_policy_data(mut self, policy_data: serde_json::Value) -> Self {
        self.policy_data = policy_data;
        self
    }

    pub fn policy_data(&self) -> &serde_json::Value {
        &self.policy_data
    }

    async fn put_json<T: Serialize + ?Sized>(
        &self,
        resource: &str,
        url: &str,
        body: &T,
    ) -> Result<u16> {
        tracing::debug!("📡 PUT {}", url);

        let response = match self.client.put(url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                self.metrics.record_a1_put(resource, "error");
                return Err(RappError::ApiError(e));
            }
        };

        let status = response.status();
        self.metrics.record_a1_put(resource, status.as_str());

        // 讀完 body，連線才會歸還給連線池
        match response.bytes().await {
            Ok(body) => tracing::debug!("PMS {} response body: {} bytes", resource, body.len()),
            Err(e) => tracing::debug!("Failed to drain PMS {} response: {}", resource, e),
        }

        tracing::info!("PUT /a1-policy/v2/{} -> {}", resource, status.as_u16());

        if !status.is_success() {
            return Err(RappError::UnexpectedStatus {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(status.as_u16())
    }

    /// 唯讀轉發：GET `{pms_url}{path}`，狀態碼與內容原樣帶回
    pub async fn forward_get(&self, config: &RappConfig, path: &str) -> Result<PmsResponse> {
        let url = config.pms_endpoint(path);
        tracing::debug!("📡 GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(PmsResponse {
            status,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl PolicyManagement for PmsClient {
    async fn register(&self, config: &RappConfig) -> Result<u16> {
        let registration = ServiceRegistration::from_config(config);
        let status = self
            .put_json(SERVICES_RESOURCE, &config.services_url(), &registration)
            .await?;

        tracing::info!("✅ Registered service '{}': {}", registration.service_id, status);
        Ok(status)
    }

    async fn submit_policy(&self, config: &RappConfig) -> Result<u16> {
        let submission = PolicySubmission::from_config(config, self.policy_data.clone());
        if let Some(limit) = submission.limit() {
            self.metrics.set_policy_limit(limit);
        }

        let status = self
            .put_json(POLICIES_RESOURCE, &config.policies_url(), &submission)
            .await?;

        tracing::info!(
            "✅ Put policy '{}' on ric '{}': {}",
            submission.policy_id,
            submission.ric_id,
            status
        );
        Ok(status)
    }
}
