//! Domain values and configuration shared by the pitch pipeline crates.

pub mod app_config;
pub mod config;
pub mod pitch;

pub use app_config::{AppConfig, CreatorDefaults, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use pitch::{
    BrandProfile, CompetitorRecord, CompetitorSet, Creator, PitchRequest, PitchResult,
    ResearchSummary,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("brand website or handle is required")]
    MissingBrand,

    #[error("missing creator field: {0}")]
    MissingCreatorField(&'static str),
}
