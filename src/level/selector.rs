//! Zoom-driven level selection state machine

use crate::graph::Graph;
use crate::level::{Level, LevelHierarchy};

/// Boundary the selector pushes snapshots through.
///
/// Swapping replaces the renderer's live graph wholesale (clear + import);
/// levels are precomputed snapshots, so no incremental diffing is needed.
/// Implementations must be O(graph size) and safe to call repeatedly.
pub trait DisplaySwapper {
    /// Replace the displayed graph with this snapshot
    fn swap(&mut self, graph: &Graph);
}

/// Which level is displayed before any camera event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialView {
    /// Start on level 0 (the unclustered input)
    Finest,

    /// Start on the last level (the default for a fully zoomed-out view)
    Coarsest,
}

/// Tracks the displayed level and reacts to camera-update events.
///
/// Not re-entrant: hosts must deliver camera events one at a time (a single
/// event loop, or one mutex around the selector and the displayed graph).
#[derive(Debug)]
pub struct LevelSelector {
    current: usize,
}

impl LevelSelector {
    /// Create a selector positioned on the configured initial level
    pub fn new(hierarchy: &LevelHierarchy, initial: InitialView) -> Self {
        let current = match initial {
            InitialView::Finest => 0,
            InitialView::Coarsest => hierarchy.len().saturating_sub(1),
        };

        Self { current }
    }

    /// Index of the level currently displayed
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Push the current level's snapshot through the swapper.
    ///
    /// Call once after construction so the initial view is displayed before
    /// the first camera event arrives.
    pub fn prime(&self, hierarchy: &LevelHierarchy, swapper: &mut dyn DisplaySwapper) {
        if let Some(level) = hierarchy.level(self.current) {
            swapper.swap(&level.graph);
        }
    }

    /// Resolve the level a zoom ratio maps to.
    ///
    /// The target is the first level, in threshold-ascending order, whose
    /// threshold strictly exceeds the ratio. Ratios at or beyond every
    /// threshold resolve to the coarsest level; ratios below the smallest
    /// threshold land on the finest. Never fails on out-of-range input.
    pub fn resolve(&self, hierarchy: &LevelHierarchy, ratio: f64) -> usize {
        hierarchy
            .levels()
            .iter()
            .position(|level| level.ratio_threshold > ratio)
            .unwrap_or_else(|| hierarchy.len().saturating_sub(1))
    }

    /// Handle a camera-update event.
    ///
    /// Returns the newly selected level when the selection changed, `None`
    /// when the ratio resolves to the level already displayed. Re-arriving
    /// at the same ratio is a no-op, so rapid event streams cannot trigger
    /// redundant renderer resets.
    pub fn on_camera_update<'a>(
        &mut self,
        hierarchy: &'a LevelHierarchy,
        ratio: f64,
    ) -> Option<&'a Level> {
        let target = self.resolve(hierarchy, ratio);
        if target == self.current {
            return None;
        }

        self.current = target;
        hierarchy.level(target)
    }

    /// Handle a camera-update event and push any new snapshot through the
    /// swapper. Returns whether a swap happened.
    pub fn dispatch(
        &mut self,
        hierarchy: &LevelHierarchy,
        ratio: f64,
        swapper: &mut dyn DisplaySwapper,
    ) -> bool {
        match self.on_camera_update(hierarchy, ratio) {
            Some(level) => {
                log::debug!(
                    "zoom ratio {} -> level {} ({} nodes)",
                    ratio,
                    self.current,
                    level.graph.node_count()
                );
                swapper.swap(&level.graph);
                true
            }
            None => false,
        }
    }
}
