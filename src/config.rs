use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Simulated backend latency for catalog recommendations, in milliseconds
    #[serde(default = "default_recommendation_latency_ms")]
    pub recommendation_latency_ms: u64,

    /// Simulated backend latency for personalized recommendations, in milliseconds
    #[serde(default = "default_personalized_latency_ms")]
    pub personalized_latency_ms: u64,

    /// Simulated backend latency for routine suggestions, in milliseconds
    #[serde(default = "default_routine_latency_ms")]
    pub routine_latency_ms: u64,

    /// Optional JSON file replacing the built-in catalog
    #[serde(default)]
    pub catalog_path: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendation_latency_ms() -> u64 {
    1000
}

fn default_personalized_latency_ms() -> u64 {
    1500
}

fn default_routine_latency_ms() -> u64 {
    2000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            recommendation_latency_ms: default_recommendation_latency_ms(),
            personalized_latency_ms: default_personalized_latency_ms(),
            routine_latency_ms: default_routine_latency_ms(),
            catalog_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Configuration with every simulated latency set to zero, for tests and local tooling
    pub fn without_latency() -> Self {
        Self {
            recommendation_latency_ms: 0,
            personalized_latency_ms: 0,
            routine_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn recommendation_latency(&self) -> Duration {
        Duration::from_millis(self.recommendation_latency_ms)
    }

    pub fn personalized_latency(&self) -> Duration {
        Duration::from_millis(self.personalized_latency_ms)
    }

    pub fn routine_latency(&self) -> Duration {
        Duration::from_millis(self.routine_latency_ms)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
