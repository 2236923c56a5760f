/// End-to-end pipeline tests against synthesized LAS files.
use las::{Point, Writer};
use rand::Rng;
use std::path::{Path, PathBuf};

use point_cloud_projector::{Config, PipelineError, ProjectionPipeline};

fn write_cloud(path: &Path, coords: &[[f64; 3]]) {
    let mut writer = Writer::from_path(path, las::Header::default()).unwrap();
    for &[x, y, z] in coords {
        writer
            .write_point(Point {
                x,
                y,
                z,
                ..Default::default()
            })
            .unwrap();
    }
    writer.close().unwrap();
}

fn config_for(dir: &Path, cloud: PathBuf, algorithm: &str) -> Config {
    let params = match algorithm {
        "statistical" => r#"{ "nb_neighbors": 10, "std_ratio": 2.0 }"#,
        _ => r#"{ "nb_points": 1, "radius": 1.0 }"#,
    };
    let doc = format!(
        r#"{{
            "cloud_path": {cloud:?},
            "noise_removal": {{ "algorithm": {algorithm:?}, "params": {params} }},
            "projection_vector": [1.0, 0.0, 0.0],
            "image_size": [100, 100],
            "depth_map_path": {depth:?},
            "heat_map_path": {heat:?}
        }}"#,
        cloud = cloud,
        algorithm = algorithm,
        depth = dir.join("out/depth_map.png"),
        heat = dir.join("out/heat_map.png"),
    );
    Config::from_json(&doc).unwrap()
}

#[test]
fn random_cloud_produces_both_maps() {
    let dir = tempfile::tempdir().unwrap();
    let cloud_path = dir.path().join("cloud.las");

    let mut rng = rand::thread_rng();
    let coords: Vec<[f64; 3]> = (0..100)
        .map(|_| {
            [
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
            ]
        })
        .collect();
    write_cloud(&cloud_path, &coords);

    let config = config_for(dir.path(), cloud_path, "radius");
    ProjectionPipeline::new(&config).run().unwrap();

    let depth = image::open(&config.depth_map_path).unwrap().into_luma8();
    assert_eq!(depth.dimensions(), (100, 100));

    let heat = image::open(&config.heat_map_path).unwrap().into_rgb8();
    assert_eq!(heat.dimensions(), (100, 100));
    // every visited cell is pure red, and with 50 pairs at least one exists
    let reds = heat.pixels().filter(|p| p.0 == [255, 0, 0]).count();
    let blacks = heat.pixels().filter(|p| p.0 == [0, 0, 0]).count();
    assert!(reds > 0);
    assert_eq!(reds + blacks, 100 * 100);
}

#[test]
fn unknown_algorithm_fails_before_the_cloud_is_read() {
    let dir = tempfile::tempdir().unwrap();
    // deliberately nonexistent input: validation must come first
    let config = config_for(dir.path(), dir.path().join("missing.las"), "foo");

    let err = ProjectionPipeline::new(&config).run().unwrap_err();
    assert!(matches!(err, PipelineError::UnknownAlgorithm { name } if name == "foo"));
}

#[test]
fn empty_cloud_stops_before_any_map_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let cloud_path = dir.path().join("empty.las");
    write_cloud(&cloud_path, &[]);

    let config = config_for(dir.path(), cloud_path, "radius");
    let err = ProjectionPipeline::new(&config).run().unwrap_err();

    assert!(matches!(err, PipelineError::EmptyInput { .. }));
    assert!(!config.depth_map_path.exists());
    assert!(!config.heat_map_path.exists());
}

#[test]
fn single_point_cloud_yields_no_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let cloud_path = dir.path().join("one.las");
    write_cloud(&cloud_path, &[[0.5, 0.5, 0.5]]);

    let config = config_for(dir.path(), cloud_path, "radius");
    let err = ProjectionPipeline::new(&config).run().unwrap_err();
    assert!(matches!(err, PipelineError::EmptyInput { .. }));
}

#[test]
fn identical_points_hit_the_zero_range_guard() {
    let dir = tempfile::tempdir().unwrap();
    let cloud_path = dir.path().join("flat.las");
    write_cloud(&cloud_path, &[[0.5, 0.5, 0.5]; 10]);

    let config = config_for(dir.path(), cloud_path, "radius");
    let err = ProjectionPipeline::new(&config).run().unwrap_err();

    assert!(matches!(err, PipelineError::ZeroDepthRange { .. }));
    assert!(!config.depth_map_path.exists());
    assert!(!config.heat_map_path.exists());
}
