use crate::config::RappConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const KEEP_ALIVE_INTERVAL_SECONDS: u64 = 3600;

/// 這個部署固定送出的 policy 內容
pub fn default_policy_data() -> serde_json::Value {
    serde_json::json!({ "note": "hello-from-rapp", "limit": 21 })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRegistration {
    pub service_id: String,
    pub keep_alive_interval_seconds: u64,
    pub callback_url: String,
}

impl ServiceRegistration {
    pub fn from_config(config: &RappConfig) -> Self {
        Self {
            service_id: config.service_id.clone(),
            keep_alive_interval_seconds: KEEP_ALIVE_INTERVAL_SECONDS,
            callback_url: config.callback_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySubmission {
    pub policy_id: String,
    pub ric_id: String,
    #[serde(rename = "policytype_id")]
    pub policy_type_id: String,
    pub service_id: String,
    pub status_notification_uri: String,
    /// schema 由 PMS 決定，保持為未定型的 JSON
    pub policy_data: serde_json::Value,
}

impl PolicySubmission {
    pub fn from_config(config: &RappConfig, policy_data: serde_json::Value) -> Self {
        Self {
            policy_id: config.policy_id.clone(),
            ric_id: config.ric_id.clone(),
            policy_type_id: config.policy_type_id.clone(),
            service_id: config.service_id.clone(),
            status_notification_uri: config.callback_url.clone(),
            policy_data,
        }
    }

    pub fn limit(&self) -> Option<f64> {
        self.policy_data.get("limit").and_then(|v| v.as_f64())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupState {
    Idle,
    Registering,
    SubmittingPolicy,
    Done,
    Failed,
}

impl StartupState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StartupState::Done | StartupState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StartupState::Idle => "idle",
            StartupState::Registering => "registering",
            StartupState::SubmittingPolicy => "submitting_policy",
            StartupState::Done => "done",
            StartupState::Failed => "failed",
        }
    }
}

impl fmt::Display for StartupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
