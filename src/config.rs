//! Configuration for the level-of-detail engine

use crate::cluster::NodeOrdering;
use crate::level::InitialView;

/// Tunable parameters for hierarchy construction and level selection
#[derive(Debug, Clone)]
pub struct Config {
    /// Zoom-ratio thresholds, strictly ascending, one per level
    pub ratio_thresholds: Vec<f64>,

    /// Viewport radius increment per level (level i clusters at i * step)
    pub radius_step: f64,

    /// Render-size range the size scale maps onto
    pub size_range: (f64, f64),

    /// Viewport dimensions in pixels the build camera projects into
    pub viewport: (f64, f64),

    /// Node enumeration policy for the greedy clustering pass
    pub ordering: NodeOrdering,

    /// Level displayed before the first camera event
    pub initial_view: InitialView,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ratio_thresholds: vec![0.07, 0.11, 0.2, 0.34, 0.58, 1.0],
            radius_step: 25.0,
            size_range: (4.0, 20.0),
            viewport: (1024.0, 768.0),
            ordering: NodeOrdering::ById,
            initial_view: InitialView::Coarsest,
        }
    }
}
