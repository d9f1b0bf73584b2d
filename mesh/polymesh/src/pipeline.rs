//! The import → dual → optimize → evaluate pipeline.

use polymesh_dual::{DualMesh, build_dual, import_triangle_mesh};
use polymesh_planarity::{FlattenReport, SmoothReport, flatten_faces, smooth_reproject_pca};
use polymesh_quality::{QualityMode, QualityStats, quality_stats, update_quality};
use polymesh_types::{MeshTopology, PolyMesh, TriMesh};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;

/// Which copy of the dual a quality entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// The dual as built.
    Dual,
    /// The dual after [`smooth_reproject_pca`].
    Smoothed,
    /// The dual after [`flatten_faces`].
    Flattened,
}

impl Variant {
    /// All variants, in report order.
    pub const ALL: [Self; 3] = [Self::Dual, Self::Smoothed, Self::Flattened];

    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dual => "dual",
            Self::Smoothed => "smoothed",
            Self::Flattened => "flattened",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Quality statistics for every evaluated (variant, metric) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityReport {
    entries: Vec<(Variant, QualityMode, QualityStats)>,
}

impl QualityReport {
    /// Statistics for one pair, if it was evaluated.
    #[must_use]
    pub fn get(&self, variant: Variant, mode: QualityMode) -> Option<&QualityStats> {
        self.entries
            .iter()
            .find(|(v, m, _)| *v == variant && *m == mode)
            .map(|(_, _, stats)| stats)
    }

    /// All entries in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Variant, QualityMode, QualityStats)> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, variant: Variant, mode: QualityMode, stats: QualityStats) {
        self.entries.push((variant, mode, stats));
    }

    fn modes(&self) -> Vec<QualityMode> {
        let mut modes = Vec::new();
        for &(_, mode, _) in &self.entries {
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }
        modes
    }
}

impl<'a> IntoIterator for &'a QualityReport {
    type Item = &'a (Variant, QualityMode, QualityStats);
    type IntoIter = std::slice::Iter<'a, (Variant, QualityMode, QualityStats)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for QualityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for mode in self.modes() {
            writeln!(f, "{mode} quality (lower is better)")?;
            writeln!(f, "  {:<10} {:>12} {:>12} {:>12}", "variant", "min", "max", "average")?;
            for variant in Variant::ALL {
                if let Some(stats) = self.get(variant, mode) {
                    writeln!(
                        f,
                        "  {:<10} {:>12.6} {:>12.6} {:>12.6}",
                        variant.name(),
                        stats.min,
                        stats.max,
                        stats.average
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Everything a pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The imported polygon mesh with its adjacency built.
    pub primal: PolyMesh,

    /// The dual as built.
    pub dual: DualMesh,

    /// A copy of the dual after smoothing.
    pub smoothed: PolyMesh,

    /// A copy of the dual after flattening.
    pub flattened: PolyMesh,

    /// What smoothing did.
    pub smooth_report: SmoothReport,

    /// What flattening did.
    pub flatten_report: FlattenReport,

    /// Quality statistics per variant and metric.
    pub report: QualityReport,
}

impl PipelineOutput {
    /// The mesh for one variant.
    #[must_use]
    pub fn variant(&self, variant: Variant) -> &PolyMesh {
        match variant {
            Variant::Dual => &self.dual.mesh,
            Variant::Smoothed => &self.smoothed,
            Variant::Flattened => &self.flattened,
        }
    }
}

/// Runs the full pipeline with a fixed configuration.
///
/// A pipeline holds no meshes between runs. Each call to [`run`](Self::run)
/// builds its own primal, dual and copies and hands them all back.
///
/// # Example
///
/// ```
/// use polymesh::{DualPipeline, PipelineConfig, Variant};
/// use polymesh::quality::QualityMode;
/// use polymesh::types::{icosphere, MeshTopology};
///
/// let pipeline = DualPipeline::new(PipelineConfig::fast());
/// let output = pipeline.run(&icosphere(1))?;
///
/// assert_eq!(output.dual.mesh.face_count(), 42);
/// let flat = output.report.get(Variant::Flattened, QualityMode::Planarity).unwrap();
/// assert!(flat.min < 1e-9);
/// println!("{}", output.report);
/// # Ok::<(), polymesh::PipelineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DualPipeline {
    config: PipelineConfig,
}

impl DualPipeline {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Import `input`, build its dual, smooth one copy and flatten another,
    /// then evaluate every configured metric on all three.
    ///
    /// The per-face quality left on each output mesh is that of the last
    /// configured metric.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Dual`](crate::PipelineError::Dual) when the
    /// input is malformed or not a closed consistently oriented manifold,
    /// and [`PipelineError::Planarity`](crate::PipelineError::Planarity) if
    /// smoothing cannot walk the dual's rings.
    pub fn run(&self, input: &TriMesh) -> PipelineResult<PipelineOutput> {
        info!(
            vertices = input.vertex_count(),
            triangles = input.face_count(),
            "Running dual pipeline"
        );

        let mut primal = import_triangle_mesh(input)?;
        let mut dual = build_dual(&mut primal, &self.config.dual)?;
        debug!(%dual, "Dual built");

        let mut smoothed = dual.mesh.clone();
        let smooth_report = smooth_reproject_pca(&mut smoothed, &self.config.smooth)?;
        debug!(%smooth_report, "Smoothed copy ready");

        let mut flattened = dual.mesh.clone();
        let flatten_report = flatten_faces(&mut flattened, &self.config.flatten);
        debug!(%flatten_report, "Flattened copy ready");

        let mut report = QualityReport::default();
        for &mode in &self.config.quality_modes {
            for (variant, mesh) in [
                (Variant::Dual, &mut dual.mesh),
                (Variant::Smoothed, &mut smoothed),
                (Variant::Flattened, &mut flattened),
            ] {
                update_quality(mesh, mode);
                if let Some(stats) = quality_stats(mesh) {
                    debug!(%variant, %mode, %stats, "Quality evaluated");
                    report.push(variant, mode, stats);
                }
            }
        }

        info!(entries = report.len(), "Dual pipeline complete");
        Ok(PipelineOutput {
            primal,
            dual,
            smoothed,
            flattened,
            smooth_report,
            flatten_report,
            report,
        })
    }
}
