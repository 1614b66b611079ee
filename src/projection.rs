//! Graph-space to viewport-space projection

use crate::graph::{Graph, Position};

/// Maps a stored graph-space position to viewport coordinates.
///
/// The clustering pass projects every node it touches through this trait, so
/// the merge radius is measured in on-screen units rather than layout units.
/// Implementations must be pure for the duration of one pass: the camera
/// state a projector captures may not change while a pass is running.
pub trait Projector {
    /// Project a graph-space position to viewport coordinates
    fn project(&self, position: Position) -> Position;
}

/// Passes graph coordinates through unchanged.
///
/// Useful for tests and headless runs where merge radii are expressed
/// directly in layout units.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjection;

impl Projector for IdentityProjection {
    fn project(&self, position: Position) -> Position {
        position
    }
}

/// Fixed linear camera transform from graph space to viewport pixels.
///
/// Mirrors the usual renderer convention: positions are offset by the camera
/// center, divided by the zoom ratio (larger ratio = zoomed further out) and
/// recentered on the viewport.
#[derive(Debug, Clone, Copy)]
pub struct CameraProjection {
    /// Camera focus point in graph space
    pub center: Position,

    /// Zoom ratio; larger values show more of the graph
    pub ratio: f64,

    /// Viewport dimensions in pixels (width, height)
    pub viewport: (f64, f64),
}

impl CameraProjection {
    /// Create a camera centered on the graph's bounding box at ratio 1.0.
    ///
    /// This is the camera state the hierarchy is built against: the default
    /// view before any zoom event has fired.
    pub fn framing(graph: &Graph, viewport: (f64, f64)) -> Self {
        let center = graph
            .position_extent()
            .map(|(min, max)| Position {
                x: (min.x + max.x) / 2.0,
                y: (min.y + max.y) / 2.0,
            })
            .unwrap_or(Position { x: 0.0, y: 0.0 });

        Self {
            center,
            ratio: 1.0,
            viewport,
        }
    }
}

impl Projector for CameraProjection {
    fn project(&self, position: Position) -> Position {
        Position {
            x: (position.x - self.center.x) / self.ratio + self.viewport.0 / 2.0,
            y: (position.y - self.center.y) / self.ratio + self.viewport.1 / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_input() {
        let p = Position { x: 3.5, y: -2.0 };
        assert_eq!(IdentityProjection.project(p), p);
    }

    #[test]
    fn camera_centers_viewport_on_focus() {
        let camera = CameraProjection {
            center: Position { x: 10.0, y: 20.0 },
            ratio: 1.0,
            viewport: (800.0, 600.0),
        };

        let projected = camera.project(Position { x: 10.0, y: 20.0 });
        assert_eq!(projected, Position { x: 400.0, y: 300.0 });
    }

    #[test]
    fn larger_ratio_compresses_screen_distance() {
        let camera = CameraProjection {
            center: Position { x: 0.0, y: 0.0 },
            ratio: 2.0,
            viewport: (800.0, 600.0),
        };

        let a = camera.project(Position { x: 0.0, y: 0.0 });
        let b = camera.project(Position { x: 100.0, y: 0.0 });

        assert_eq!(b.x - a.x, 50.0);
    }
}
