//! # EdgePlot CAM Tools
//!
//! This crate turns edge points into a pen-plotter toolpath.
//!
//! ## Pipeline Stages
//!
//! - **Edge Point Extractor**: Canny edge detection, then foreground pixels in scan order
//! - **Point Clusterer**: density-based or partition-based grouping into strokes
//! - **Path Orderer**: draw order inside each stroke
//! - **Command Emitter**: pen-up travel and pen-down draw moves per stroke
//!
//! ## Supporting Infrastructure
//!
//! - **Synthesizer**: runs clustering, ordering and emission over one point set
//! - **Errors**: parameter validation and image loading errors

pub mod clustering;
pub mod edge_extractor;
pub mod emitter;
pub mod error;
pub mod path_order;
pub mod synthesizer;

// Re-export commonly used items
pub use clustering::{
    Clusterer, ClusteringParameters, DensityClusterer, DensityParameters, PartitionClusterer,
    PartitionParameters, PointClusterer,
};
pub use edge_extractor::{AxisOrder, EdgePointExtractor, ExtractionParameters};
pub use emitter::CommandEmitter;
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use path_order::PathOrderer;
pub use synthesizer::{SynthesisParameters, Toolpath, ToolpathSynthesizer};
