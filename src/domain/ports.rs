use crate::config::RappConfig;
use crate::utils::error::Result;
use async_trait::async_trait;

/// PMS 對外提供的兩個控制面操作；成功時回傳 HTTP 狀態碼
#[async_trait]
pub trait PolicyManagement: Send + Sync {
    async fn register(&self, config: &RappConfig) -> Result<u16>;
    async fn submit_policy(&self, config: &RappConfig) -> Result<u16>;
}
