//! Level-of-detail hierarchy built by repeated canopy passes

pub mod selector;

pub use selector::{DisplaySwapper, InitialView, LevelSelector};

use crate::cluster::{self, ClusterIds, NodeOrdering};
use crate::error::HierarchyError;
use crate::graph::Graph;
use crate::projection::Projector;
use crate::scale::SizeScale;

/// One level of detail: a precomputed graph snapshot and the zoom range it
/// serves
#[derive(Debug)]
pub struct Level {
    /// Zoom ratios strictly below this threshold select this level or a
    /// finer one
    pub ratio_threshold: f64,

    /// The viewport merge radius this level's graph was clustered with
    pub radius: f64,

    /// Immutable graph snapshot displayed at this level
    pub graph: Graph,
}

/// The ordered list of levels, finest first.
///
/// Built once, eagerly, before any interaction; never recomputed. Each
/// level's graph is an owned snapshot, so hosts can hand any of them to a
/// renderer without aliasing the hierarchy's state.
#[derive(Debug)]
pub struct LevelHierarchy {
    levels: Vec<Level>,
}

impl LevelHierarchy {
    /// Build the full hierarchy from a base graph.
    ///
    /// Level 0 holds a defensive copy of `base`; level i (i > 0) clusters
    /// level i-1's graph with radius `i * radius_step`. Passes run strictly
    /// in sequence because each one projects the barycenters produced by the
    /// previous one. A single cluster-id allocator spans all passes, so
    /// synthetic names never collide across levels.
    pub fn build<P: Projector>(
        base: &Graph,
        ratio_thresholds: &[f64],
        radius_step: f64,
        projector: &P,
        scale: &SizeScale,
        ordering: NodeOrdering,
    ) -> Result<Self, HierarchyError> {
        if ratio_thresholds.is_empty() {
            return Err(HierarchyError::NoLevels);
        }

        for (index, pair) in ratio_thresholds.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(HierarchyError::UnorderedThresholds { index: index + 1 });
            }
        }

        if !radius_step.is_finite() || radius_step < 0.0 {
            return Err(HierarchyError::InvalidRadiusStep { got: radius_step });
        }

        log::info!(
            "Building {} levels from a graph with {} nodes and {} edges",
            ratio_thresholds.len(),
            base.node_count(),
            base.edge_count()
        );

        let mut ids = ClusterIds::new();
        let mut levels: Vec<Level> = Vec::with_capacity(ratio_thresholds.len());

        for (i, &ratio_threshold) in ratio_thresholds.iter().enumerate() {
            let level = if i == 0 {
                Level {
                    ratio_threshold,
                    radius: 0.0,
                    graph: base.clone(),
                }
            } else {
                let radius = i as f64 * radius_step;
                let outcome = cluster::cluster(
                    &levels[i - 1].graph,
                    radius,
                    projector,
                    scale,
                    ordering,
                    &mut ids,
                );

                Level {
                    ratio_threshold,
                    radius,
                    graph: outcome.graph,
                }
            };

            log::info!(
                "Level {} (threshold {}, radius {}): {} nodes, {} edges",
                i,
                level.ratio_threshold,
                level.radius,
                level.graph.node_count(),
                level.graph.edge_count()
            );

            levels.push(level);
        }

        Ok(Self { levels })
    }

    /// All levels, finest first
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the hierarchy holds no levels (never true after `build`)
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level by index
    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }
}
