//! Errors at the edges of the simulation
//!
//! The simulation itself never fails; only the optional hand sensor and
//! settings loading can.

use thiserror::Error;

/// Failure to start or run a hand-tracking sensor
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("hand tracker is already running")]
    AlreadyRunning,
}

/// Failure to read a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
