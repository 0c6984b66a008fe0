use std::time::Duration;

/// The configuration for the mock DA backend.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct MockDaConfig {
    /// The namespace blobs are stored under. Mixed into every commitment.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Time every submission takes before it is confirmed, in milliseconds.
    #[serde(default)]
    pub submission_latency_ms: u64,
}

fn default_namespace() -> String {
    "mock".to_string()
}

impl Default for MockDaConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            submission_latency_ms: 0,
        }
    }
}

impl MockDaConfig {
    pub(crate) fn submission_latency(&self) -> Duration {
        Duration::from_millis(self.submission_latency_ms)
    }
}
