pub mod app_config;
pub mod business;
pub mod config;
pub mod outreach;
pub mod snapshot;
pub mod throttle;

pub use app_config::{AppConfig, MailCredentials};
pub use business::{Business, BusinessStatus, Coordinate};
pub use config::{load_app_config, load_app_config_from_env};
pub use outreach::{OutreachOutcome, OutreachReport, OutreachResult, SKIP_REASON_NO_EMAIL};
pub use snapshot::{load_json, save_json, SnapshotError};
pub use throttle::Throttle;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
