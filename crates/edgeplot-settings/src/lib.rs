//! EdgePlot Settings Crate
//!
//! Handles run configuration: clustering, extraction and output options,
//! their validation, and persistence as JSON or TOML files.

pub mod config;
pub mod error;

pub use config::{
    AxisOrder, ClusterStrategy, ClusteringSettings, Config, ExtractionSettings, OutputSettings,
    PathOrdering, MIN_CANNY_THRESHOLD,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
