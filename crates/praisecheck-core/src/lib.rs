//! Shared domain types and configuration for praisecheck.

mod app_config;
mod config;
mod review;

use thiserror::Error;

pub use app_config::{
    AppConfig, DEFAULT_AUTHOR_CLASS, DEFAULT_AUTHOR_PREFIX, DEFAULT_LEXICON_URL,
    DEFAULT_PAGE_URL_TEMPLATE, DEFAULT_REVIEW_CLASS,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use review::{Lexicon, MarkerSignature, Review, UNSCORED};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
