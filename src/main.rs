/// Point cloud to depth/heat map converter entry point.
use point_cloud_projector::{Config, ProjectionPipeline};
use std::env;
use std::path::Path;
use std::process;

const DEFAULT_CONFIG_PATH: &str = "config/projector.json";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config_path = match args.len() {
        1 => DEFAULT_CONFIG_PATH,
        2 => args[1].as_str(),
        _ => {
            eprintln!("Usage: {} [config.json]", args[0]);
            process::exit(1);
        }
    };

    let config = match Config::load(Path::new(config_path)) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            process::exit(1);
        }
    };

    if let Err(err) = ProjectionPipeline::new(&config).run() {
        log::error!("pipeline failed: {err}");
        process::exit(1);
    }
}
