pub mod cli;

use crate::utils::error::Result;
use crate::utils::validation::{
    parse_port, validate_non_empty_string, validate_range, validate_url, Validate,
};
use std::env;

pub const DEFAULT_PMS_URL: &str = "http://policy-agent:8081";
pub const DEFAULT_SERVICE_ID: &str = "demo-rapp";
pub const DEFAULT_RIC_ID: &str = "ric2";
pub const DEFAULT_POLICY_ID: &str = "demo-policy-3";
pub const DEFAULT_POLICY_TYPE_ID: &str = "";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CALLBACK_URL: &str = "http://demo-rapp:8080/callback";
pub const DEFAULT_CORS_ALLOW_ORIGIN: &str = "*";

/// 啟動時解析一次的設定快照，之後只讀
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RappConfig {
    pub pms_url: String,
    pub service_id: String,
    pub ric_id: String,
    pub policy_id: String,
    /// 空字串代表沒有 policy type（A1 simulator 的 basic schema）
    pub policy_type_id: String,
    pub callback_url: String,
    pub port: u16,
    pub cors_allow_origin: String,
}

impl Default for RappConfig {
    fn default() -> Self {
        Self {
            pms_url: DEFAULT_PMS_URL.to_string(),
            service_id: DEFAULT_SERVICE_ID.to_string(),
            ric_id: DEFAULT_RIC_ID.to_string(),
            policy_id: DEFAULT_POLICY_ID.to_string(),
            policy_type_id: DEFAULT_POLICY_TYPE_ID.to_string(),
            callback_url: DEFAULT_CALLBACK_URL.to_string(),
            port: DEFAULT_PORT,
            cors_allow_origin: DEFAULT_CORS_ALLOW_ORIGIN.to_string(),
        }
    }
}

impl RappConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 依環境變數名稱查值；未設定的欄位使用預設值
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            Some(raw) if !raw.is_empty() => parse_port("PORT", &raw)?,
            _ => DEFAULT_PORT,
        };

        Ok(Self {
            pms_url: get("PMS_URL", DEFAULT_PMS_URL),
            service_id: get("SERVICE_ID", DEFAULT_SERVICE_ID),
            ric_id: get("RIC_ID", DEFAULT_RIC_ID),
            policy_id: get("POLICY_ID", DEFAULT_POLICY_ID),
            policy_type_id: get("POLICY_TYPE_ID", DEFAULT_POLICY_TYPE_ID),
            callback_url: get("CALLBACK_URL", DEFAULT_CALLBACK_URL),
            port,
            cors_allow_origin: get("CORS_ALLOW_ORIGIN", DEFAULT_CORS_ALLOW_ORIGIN),
        })
    }

    pub fn services_url(&self) -> String {
        self.pms_endpoint("/a1-policy/v2/services")
    }

    pub fn policies_url(&self) -> String {
        self.pms_endpoint("/a1-policy/v2/policies")
    }

    pub fn pms_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.pms_url.trim_end_matches('/'), path)
    }
}

impl Validate for RappConfig {
    fn validate(&self) -> Result<()> {
        validate_range("PORT", self.port, 1, u16::MAX)?;

        // 其餘欄位只警告，讓程式在沒有外部設定時也能起來
        if let Err(e) = validate_url("PMS_URL", &self.pms_url) {
            tracing::warn!("⚠️ {}", e);
        }
        if let Err(e) = validate_url("CALLBACK_URL", &self.callback_url) {
            tracing::warn!("⚠️ {}", e);
        }
        if let Err(e) = validate_non_empty_string("SERVICE_ID", &self.service_id) {
            tracing::warn!("⚠️ {}", e);
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
