//! Point-cloud projection map generator.
//!
//! Reads a LAS/LAZ point cloud, removes outliers, projects the points
//! along a configured vector, and bins the projected pairs into two raster
//! products: a grayscale depth map and an RGB heat map.

pub mod cloud;
pub mod config;
pub mod denoise;
pub mod error;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod sink;

pub use config::Config;
pub use error::PipelineError;
pub use pipeline::ProjectionPipeline;
