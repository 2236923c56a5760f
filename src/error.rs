/// Error taxonomy for the projection pipeline.
///
/// Every stage returns a typed error to its immediate caller, which decides
/// whether to skip that map's production or abort the run. Sink failures are
/// the only recoverable kind: the pipeline logs them and carries on.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("configuration error ({key}): {reason}")]
    Config { key: String, reason: String },
    #[error("no data left at the {stage} stage")]
    EmptyInput { stage: &'static str },
    #[error("degenerate depth range (max == min == {depth})")]
    ZeroDepthRange { depth: f64 },
    #[error("unknown noise removal algorithm {name:?}")]
    UnknownAlgorithm { name: String },
    #[error("point cloud read failed: {0}")]
    Las(#[from] las::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{map} map save failed: {reason}")]
    Sink { map: &'static str, reason: String },
}
