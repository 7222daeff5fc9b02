//! Tracked point-cloud snapshot
//!
//! Holds the most recent set of raw tracked 3D points (hand or skeleton
//! keypoints) and renders one marker per point lying between the eye and the
//! display. The store is a full-replacement snapshot: no merging, no history,
//! no spatial index.

use crate::render::{Renderer, Style};
use glam::Vec3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::error;

/// Marker radius for rendered cloud points.
pub const MARKER_RADIUS: f32 = 0.1;

/// Latest snapshot of tracked 3D points.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    points: Vec<Vec3>,
}

impl PointCloud {
    /// Create an empty cloud.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored point set with a new snapshot.
    pub fn update_cloud(&mut self, points: Vec<Vec3>) {
        self.points = points;
    }

    /// The current point set.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Draw one marker per point in front of the eye.
    ///
    /// A point is drawn only when its depth is strictly less than the eye's;
    /// the rest are silently skipped. This is a cheap near-plane cull, not a
    /// frustum or occlusion test.
    pub fn draw_with(&self, renderer: &mut dyn Renderer, camera_offset: Vec3, eye: Vec3) {
        for point in &self.points {
            if point.z < eye.z {
                renderer.draw_point(*point + camera_offset, MARKER_RADIUS, Style::Neutral);
            }
        }
    }

    /// Write the point set as CSV: an `x, y, z` header, then one line per
    /// point. An existing file is truncated.
    ///
    /// A destination that cannot be opened is reported and the save
    /// abandoned; the simulation carries on.
    pub fn save<P: AsRef<Path>>(&self, path: P) {
        let path = path.as_ref();
        let file = match File::create(path) {
            Ok(file) => file,
            Err(err) => {
                error!("Could not open {path:?} for writing: {err}");
                return;
            }
        };

        let mut out = BufWriter::new(file);
        if let Err(err) = self.write_csv(&mut out) {
            error!("Could not write point cloud to {path:?}: {err}");
        }
    }

    fn write_csv(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "x, y, z")?;
        for point in &self.points {
            writeln!(out, "{}, {}, {}", point.x, point.y, point.z)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    #[test]
    fn test_update_replaces_points() {
        let mut cloud = PointCloud::new();
        cloud.update_cloud(vec![Vec3::X, Vec3::Y]);
        cloud.update_cloud(vec![Vec3::Z]);
        assert_eq!(cloud.points(), &[Vec3::Z]);
    }

    #[test]
    fn test_draws_only_points_in_front_of_eye() {
        let mut cloud = PointCloud::new();
        let eye = Vec3::new(0.0, 0.0, 2.0);
        cloud.update_cloud(vec![
            Vec3::new(0.0, 0.0, 1.0),  // in front
            Vec3::new(5.0, 1.0, -3.0), // in front
            Vec3::new(0.0, 0.0, 2.0),  // at eye depth: culled
            Vec3::new(0.0, 0.0, 4.0),  // behind: culled
        ]);

        let mut renderer = RecordingRenderer::new();
        cloud.draw_with(&mut renderer, Vec3::ZERO, eye);
        assert_eq!(renderer.point_count(), 2);
    }

    #[test]
    fn test_camera_offset_translates_markers() {
        let mut cloud = PointCloud::new();
        cloud.update_cloud(vec![Vec3::new(1.0, 2.0, 0.0)]);

        let mut renderer = RecordingRenderer::new();
        cloud.draw_with(&mut renderer, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 5.0));

        assert_eq!(
            renderer.calls,
            vec![crate::render::DrawCall::Point {
                position: Vec3::new(1.0, 2.0, -1.0),
                radius: MARKER_RADIUS,
                style: Style::Neutral,
            }]
        );
    }

    #[test]
    fn test_csv_layout() {
        let mut cloud = PointCloud::new();
        cloud.update_cloud(vec![Vec3::new(1.0, 2.5, -3.0), Vec3::ZERO]);

        let mut buffer = Vec::new();
        cloud.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "x, y, z\n1, 2.5, -3\n0, 0, 0\n");
    }

    #[test]
    fn test_save_to_unopenable_path_does_not_panic() {
        let cloud = PointCloud::new();
        cloud.save("no_such_directory/points.csv");
    }
}
