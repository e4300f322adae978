//! Error types for cam_hand

use thiserror::Error;

use hand_actions::ActionError;
use hand_landmarks::LandmarkError;

#[derive(Error, Debug)]
pub enum CamHandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Detector error: {0}")]
    Landmark(#[from] LandmarkError),

    #[error("Backend error: {0}")]
    Action(#[from] ActionError),

    #[error("Display error: {0}")]
    Display(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, CamHandError>;
