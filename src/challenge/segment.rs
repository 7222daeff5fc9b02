//! Path segment value type

use glam::Vec3;

/// One straight-line piece of a guided path.
///
/// Segments are created in traversal order when a challenge is built and are
/// never reordered or removed; completion is monotonic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Segment start point in world space.
    pub start: Vec3,
    /// Segment end point in world space.
    pub end: Vec3,
    /// Tube thickness used for rendering; the capture tolerance derives
    /// from it.
    pub radius: f32,
    /// Set once by the challenge, never cleared.
    pub completed: bool,
    /// Milliseconds since the Unix epoch; zero until completed.
    pub completed_time: u64,
}

impl Segment {
    /// Create an incomplete segment between two points.
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self {
            start,
            end,
            radius,
            completed: false,
            completed_time: 0,
        }
    }

    /// Distance within which a grab completes this segment.
    pub fn capture_radius(&self) -> f32 {
        self.radius * 3.0
    }

    /// Segment length in world units.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}
