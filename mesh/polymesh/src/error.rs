//! Error types for the pipeline and the export seam.

use polymesh_dual::DualError;
use polymesh_planarity::PlanarityError;
use thiserror::Error;

/// Result type for [`DualPipeline::run`](crate::DualPipeline::run).
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for polygon export.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Import or dual construction failed.
    #[error("dual stage failed: {0}")]
    Dual(#[from] DualError),

    /// Smoothing could not walk the dual's vertex rings.
    #[error("planarity stage failed: {0}")]
    Planarity(#[from] PlanarityError),
}

/// Errors that can occur while exporting a polygon mesh.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The target only accepts triangles and the face is a larger polygon.
    #[error("face {face} has {arity} vertices but the exporter only accepts triangles")]
    PolygonalUnsupported {
        /// Offending face index.
        face: usize,
        /// Its vertex count.
        arity: usize,
    },

    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
