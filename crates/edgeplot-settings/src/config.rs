//! Configuration and settings management for EdgePlot
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Clustering (strategy, density and partition parameters, path ordering)
//! - Extraction (edge detection, foreground threshold, inversion, axis order and flip)
//! - Output (cluster markers, preview options)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Smallest Canny threshold accepted by validation
pub const MIN_CANNY_THRESHOLD: f32 = 1.0;

/// Clustering strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStrategy {
    /// Density-based clustering; cluster count emerges from the data
    #[default]
    Density,
    /// Partition into exactly `k` clusters
    Partition,
}

impl fmt::Display for ClusterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Density => write!(f, "density"),
            Self::Partition => write!(f, "partition"),
        }
    }
}

impl FromStr for ClusterStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "density" | "dbscan" => Ok(Self::Density),
            "partition" | "kmeans" | "k-means" => Ok(Self::Partition),
            _ => Err(ConfigError::UnknownOption {
                kind: "strategy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Point ordering inside a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathOrdering {
    /// Keep the extractor's scan order
    #[default]
    Input,
    /// Greedy nearest-neighbour walk
    Nearest,
}

impl fmt::Display for PathOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}

impl FromStr for PathOrdering {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "input" | "scan" => Ok(Self::Input),
            "nearest" | "nearest-neighbor" | "nearest_neighbor" => Ok(Self::Nearest),
            _ => Err(ConfigError::UnknownOption {
                kind: "ordering".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// How pixel positions map to X and Y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisOrder {
    /// X is the pixel row, Y the column
    #[default]
    RowColumn,
    /// X is the pixel column, Y the row
    ColumnRow,
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowColumn => write!(f, "row-column"),
            Self::ColumnRow => write!(f, "column-row"),
        }
    }
}

impl FromStr for AxisOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "row-column" | "row_column" | "rc" => Ok(Self::RowColumn),
            "column-row" | "column_row" | "cr" | "xy" => Ok(Self::ColumnRow),
            _ => Err(ConfigError::UnknownOption {
                kind: "axis order".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Clustering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringSettings {
    /// Which clustering strategy to run
    pub strategy: ClusterStrategy,
    /// Density neighbourhood radius in pixels
    pub eps: f64,
    /// Minimum neighbourhood size (the point itself included) for a core point
    pub min_samples: usize,
    /// Partition cluster count
    pub k: usize,
    /// Seed for partition centroid initialisation
    pub seed: u64,
    /// Upper bound on partition refinement iterations
    pub max_iterations: usize,
    /// Point ordering inside each cluster
    pub ordering: PathOrdering,
}

impl Default for ClusteringSettings {
    fn default() -> Self {
        Self {
            strategy: ClusterStrategy::Density,
            eps: 10.0,
            min_samples: 5,
            k: 30,
            seed: 0,
            max_iterations: 300,
            ordering: PathOrdering::Input,
        }
    }
}

/// Edge point extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Run Canny edge detection first; disable for images that already are edge maps
    pub edge_detect: bool,
    /// Canny lower hysteresis threshold
    pub canny_low: f32,
    /// Canny upper hysteresis threshold
    pub canny_high: f32,
    /// Luma value a pixel must exceed to count as foreground
    pub threshold: u8,
    /// Treat dark pixels as foreground instead
    pub invert: bool,
    /// Flip Y so that it grows upward (device space)
    pub flip_y: bool,
    /// Pixel axis that becomes X
    pub axis_order: AxisOrder,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            edge_detect: true,
            canny_low: 100.0,
            canny_high: 200.0,
            threshold: 128,
            invert: false,
            flip_y: false,
            axis_order: AxisOrder::RowColumn,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Write a `(Cluster <label>)` line before each cluster
    pub cluster_markers: bool,
    /// Include travel moves in SVG previews
    pub preview_travel: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            cluster_markers: true,
            preview_travel: false,
        }
    }
}

/// Complete run configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Clustering settings
    pub clustering: ClusteringSettings,
    /// Extraction settings
    pub extraction: ExtractionSettings,
    /// Output settings
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/edgeplot/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("edgeplot").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load the config at the default location, or defaults if there is none
    pub fn load_or_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            Ok(_) | Err(SettingsError::ConfigDirectory(_)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        debug!("Loaded config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    ///
    /// Only the parameters of the selected strategy are checked; `k` is
    /// irrelevant to a density run and `min_samples` to a partition run.
    pub fn validate(&self) -> ConfigResult<()> {
        let c = &self.clustering;

        match c.strategy {
            ClusterStrategy::Density => {
                if !c.eps.is_finite() || c.eps < 0.0 {
                    return Err(ConfigError::invalid(
                        "clustering.eps",
                        format!("must be a finite value >= 0, got {}", c.eps),
                    ));
                }
                if c.min_samples == 0 {
                    return Err(ConfigError::invalid(
                        "clustering.min_samples",
                        "must be > 0",
                    ));
                }
            }
            ClusterStrategy::Partition => {
                if c.k == 0 {
                    return Err(ConfigError::invalid("clustering.k", "must be > 0"));
                }
                if c.max_iterations == 0 {
                    return Err(ConfigError::invalid(
                        "clustering.max_iterations",
                        "must be > 0",
                    ));
                }
            }
        }

        let e = &self.extraction;
        if e.edge_detect {
            if !e.canny_low.is_finite() || e.canny_low < MIN_CANNY_THRESHOLD {
                return Err(ConfigError::invalid(
                    "extraction.canny_low",
                    format!("must be >= {}, got {}", MIN_CANNY_THRESHOLD, e.canny_low),
                ));
            }
            if !e.canny_high.is_finite() || e.canny_high < e.canny_low {
                return Err(ConfigError::invalid(
                    "extraction.canny_high",
                    format!("must be >= canny_low ({}), got {}", e.canny_low, e.canny_high),
                ));
            }
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
