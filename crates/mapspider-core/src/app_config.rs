use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub google_maps_api_key: String,
    pub log_level: String,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub default_max_requests: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_maps_api_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("output_dir", &self.output_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("default_max_requests", &self.default_max_requests)
            .finish()
    }
}
