use std::{env, fmt};

/// Deployment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Live,
    Local,
}

impl Stage {
    /// Parses a stage name. Anything other than `local` is `Live`.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("local") {
            Stage::Local
        } else {
            Stage::Live
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Live => "live",
            Stage::Local => "local",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store configuration, read once at startup and passed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// DynamoDB table holding the emotes (default: "emotes")
    pub table_name: String,
    /// AWS region (default: "ap-southeast-2")
    pub region: String,
    /// Endpoint override, e.g. a local DynamoDB (default: none)
    pub endpoint: Option<String>,
    /// Deployment stage (default: live)
    pub stage: Stage,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EMOTES_TABLE_NAME` - DynamoDB table name (default: "emotes")
    /// - `REGION` - AWS region (default: "ap-southeast-2")
    /// - `DYNAMODB_ENDPOINT` - Endpoint override (default: none)
    /// - `STAGE` - `local` or `live` (default: "live")
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("EMOTES_TABLE_NAME").unwrap_or_else(|_| "emotes".to_string()),
            region: env::var("REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            endpoint: env::var("DYNAMODB_ENDPOINT")
                .ok()
                .filter(|endpoint| !endpoint.trim().is_empty()),
            stage: env::var("STAGE")
                .map(|stage| Stage::parse(&stage))
                .unwrap_or(Stage::Live),
        }
    }

    /// Returns a display string for the target store.
    pub fn target_display(&self) -> String {
        match &self.endpoint {
            Some(url) => format!("DynamoDB table {} at {}", self.table_name, url),
            None => format!(
                "DynamoDB table {} (region: {})",
                self.table_name, self.region
            ),
        }
    }
}
