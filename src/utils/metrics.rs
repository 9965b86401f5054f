use crate::utils::error::Result;
use prometheus::{Encoder, Gauge, IntCounterVec, Opts, Registry, TextEncoder};

/// rApp 自己的 Prometheus 指標，HTTP 伺服器與 PMS client 共用同一份
#[derive(Clone)]
pub struct RappMetrics {
    registry: Registry,
    http_requests: IntCounterVec,
    a1_puts: IntCounterVec,
    policy_limit: Gauge,
}

impl RappMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("rapp_http_requests_total", "HTTP requests by path & code"),
            &["path", "code"],
        )?;
        let a1_puts = IntCounterVec::new(
            Opts::new("rapp_a1_put_total", "A1 PUT calls to PMS by resource"),
            &["resource", "status"],
        )?;
        let policy_limit = Gauge::new(
            "rapp_policy_limit",
            "Current policy_data.limit the rApp last attempted",
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(a1_puts.clone()))?;
        registry.register(Box::new(policy_limit.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            a1_puts,
            policy_limit,
        })
    }

    pub fn record_http_request(&self, path: &str, code: u16) {
        let code = code.to_string();
        self.http_requests
            .with_label_values(&[path, code.as_str()])
            .inc();
    }

    /// `status` 是 HTTP 狀態碼或連線失敗時的 "error"
    pub fn record_a1_put(&self, resource: &str, status: &str) {
        self.a1_puts.with_label_values(&[resource, status]).inc();
    }

    pub fn set_policy_limit(&self, limit: f64) {
        self.policy_limit.set(limit);
    }

    pub fn a1_put_count(&self, resource: &str, status: &str) -> u64 {
        self.a1_puts.with_label_values(&[resource, status]).get()
    }

    pub fn http_request_count(&self, path: &str, code: u16) -> u64 {
        let code = code.to_string();
        self.http_requests
            .with_label_values(&[path, code.as_str()])
            .get()
    }

    pub fn policy_limit(&self) -> f64 {
        self.policy_limit.get()
    }

    /// Prometheus 文字格式輸出
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
