/// End-to-end pipeline run: read, denoise, project, normalize, build and
/// save both maps. One linear pass per invocation, no retries.
use crate::cloud;
use crate::config::Config;
use crate::denoise::Denoiser;
use crate::error::PipelineError;
use crate::projection;
use crate::raster;
use crate::sink;

pub struct ProjectionPipeline<'a> {
    config: &'a Config,
}

impl<'a> ProjectionPipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Run the whole pipeline.
    ///
    /// Core-stage failures (unknown algorithm, empty projection, zero
    /// depth range) abort the run. Sink failures are logged and skipped so
    /// the heat map is still attempted when the depth map save failed.
    pub fn run(&self) -> Result<(), PipelineError> {
        let config = self.config;

        // Validate the denoise step before touching the input file.
        let denoiser = Denoiser::from_config(&config.noise_removal)?;

        let cloud = cloud::read_cloud(&config.cloud_path)?;
        let filtered = denoiser.apply(&cloud);

        let pairs = projection::project(filtered.points(), &config.projection_vector);
        if pairs.is_empty() {
            return Err(PipelineError::EmptyInput {
                stage: "projection",
            });
        }

        let (max_depth, min_depth) = projection::depth_range(&pairs)?;

        let depth_map = raster::build_depth_map(&pairs, max_depth, min_depth, config.image_size)?;
        if let Err(err) = sink::save_depth_map(
            &depth_map,
            &config.depth_map_path,
            config.create_output_dirs,
        ) {
            log::error!("depth map skipped: {err}");
        }

        let heat_map = raster::build_heat_map(&pairs, max_depth, min_depth, config.image_size)?;
        if let Err(err) =
            sink::save_heat_map(&heat_map, &config.heat_map_path, config.create_output_dirs)
        {
            log::error!("heat map skipped: {err}");
        }

        Ok(())
    }
}
