//! Off-axis display projection
//!
//! Derives the view-projection matrix that renders a world-space scene
//! correctly on a fixed physical planar display for an arbitrary, moving eye
//! position (the asymmetric-frustum technique used for head-tracked
//! fish-tank VR). The screen geometry is set once at construction; each
//! frame the caller asks for the matrix matching the tracked eye.

use glam::{Mat4, Vec3, Vec4};
use thiserror::Error;

/// Errors from [`Display`] construction.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Screen extents must be positive so the corners are non-collinear.
    #[error("display extents must be positive, got {width}x{height}")]
    InvalidExtent { width: f32, height: f32 },
    /// Clip distances must satisfy `0 < near < far`.
    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: f32, far: f32 },
}

/// A fixed physical planar display with a head-tracked projection.
///
/// The screen spans `x` in `[-width/2, width/2]` and `y` in `[0, height]` at
/// `z = 0` relative to `origin`; the viewer half-space is `+z`. Geometry is
/// static for the session, so the corner points and the orthonormal screen
/// basis are computed once.
#[derive(Debug, Clone)]
pub struct Display {
    origin: Vec3,
    // Screen corners: bottom-left, bottom-right, top-left
    pa: Vec3,
    pb: Vec3,
    pc: Vec3,
    // Orthonormal screen basis: right, up, normal
    sr: Vec3,
    su: Vec3,
    sn: Vec3,
    /// Physical screen width in world units.
    pub width: f32,
    /// Physical screen height in world units.
    pub height: f32,
    /// Physical depth of the volume behind the screen.
    pub depth: f32,
    near: f32,
    far: f32,
}

impl Display {
    /// Create a display from its physical geometry.
    pub fn new(
        origin: Vec3,
        width: f32,
        height: f32,
        depth: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, DisplayError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(DisplayError::InvalidExtent { width, height });
        }
        if near <= 0.0 || far <= near {
            return Err(DisplayError::InvalidClipPlanes { near, far });
        }

        let pa = origin + Vec3::new(-width / 2.0, 0.0, 0.0);
        let pb = origin + Vec3::new(width / 2.0, 0.0, 0.0);
        let pc = origin + Vec3::new(-width / 2.0, height, 0.0);

        let sr = (pb - pa).normalize();
        let su = (pc - pa).normalize();
        let sn = sr.cross(su).normalize();

        Ok(Self {
            origin,
            pa,
            pb,
            pc,
            sr,
            su,
            sn,
            width,
            height,
            depth,
            near,
            far,
        })
    }

    /// World origin of the screen rectangle.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// View-projection matrix for the given eye position.
    ///
    /// The frustum edges pass through the eye and the four screen corners, so
    /// the display behaves as a window into a fixed world frame: for an eye
    /// centered on the screen normal this reduces to a standard symmetric
    /// perspective, and it skews as the eye moves.
    ///
    /// Precondition: the eye lies strictly in the viewer half-space, i.e. its
    /// distance to the screen plane along the normal is positive. An eye on
    /// the plane divides by zero and the result is undefined.
    pub fn projection_to_eye(&self, eye: Vec3) -> Mat4 {
        let va = self.pa - eye;
        let vb = self.pb - eye;
        let vc = self.pc - eye;

        // Distance from the eye to the screen plane along the normal.
        let d = -self.sn.dot(va);
        let nd = self.near / d;

        // Signed frustum extents at the near plane.
        let l = self.sr.dot(va) * nd;
        let r = self.sr.dot(vb) * nd;
        let b = self.su.dot(va) * nd;
        let t = self.su.dot(vc) * nd;

        let projection = off_axis_frustum(l, r, b, t, self.near, self.far);

        // Re-express the world in the eye-relative, screen-aligned basis.
        let rotation = Mat4::from_cols(
            Vec4::new(self.sr.x, self.su.x, self.sn.x, 0.0),
            Vec4::new(self.sr.y, self.su.y, self.sn.y, 0.0),
            Vec4::new(self.sr.z, self.su.z, self.sn.z, 0.0),
            Vec4::W,
        );

        projection * rotation * Mat4::from_translation(-eye)
    }
}

/// Asymmetric perspective frustum (right-handed, OpenGL clip convention).
///
/// glam has no off-axis frustum constructor, so the matrix is built directly
/// from the four signed edge distances at the near plane.
fn off_axis_frustum(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
        Vec4::new(
            (r + l) / (r - l),
            (t + b) / (t - b),
            -(f + n) / (f - n),
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn to_ndc(m: Mat4, point: Vec3) -> Vec3 {
        let clip = m * point.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        assert!(Display::new(Vec3::ZERO, 0.0, 1.0, 1.0, 0.1, 10.0).is_err());
        assert!(Display::new(Vec3::ZERO, 1.0, -1.0, 1.0, 0.1, 10.0).is_err());
        assert!(Display::new(Vec3::ZERO, 1.0, 1.0, 1.0, 0.0, 10.0).is_err());
        assert!(Display::new(Vec3::ZERO, 1.0, 1.0, 1.0, 5.0, 5.0).is_err());
    }

    #[test]
    fn test_centered_eye_matches_symmetric_perspective() {
        let display = Display::new(Vec3::ZERO, 4.0, 3.0, 2.0, 1.0, 100.0).unwrap();
        let screen_centre = Vec3::new(0.0, 1.5, 0.0);
        let eye = screen_centre + Vec3::new(0.0, 0.0, 2.0);

        let got = display.projection_to_eye(eye);

        // Same field of view as the window the screen subtends from the eye.
        let fovy = 2.0 * (1.5_f32 / 2.0).atan();
        let expected = Mat4::perspective_rh_gl(fovy, 4.0 / 3.0, 1.0, 100.0)
            * Mat4::look_at_rh(eye, screen_centre, Vec3::Y);

        assert!(
            got.abs_diff_eq(expected, EPS),
            "got {got:?}, expected {expected:?}"
        );
    }

    #[test]
    fn test_screen_corners_map_to_ndc_corners() {
        let display = Display::new(Vec3::new(1.0, -2.0, 0.0), 4.0, 3.0, 2.0, 0.5, 50.0).unwrap();

        // Far off-centre eye: the frustum is heavily skewed, but its edges
        // still pass through the screen corners.
        let eye = Vec3::new(4.0, 3.5, 2.5);
        let m = display.projection_to_eye(eye);

        let pa = display.origin() + Vec3::new(-2.0, 0.0, 0.0);
        let pb = display.origin() + Vec3::new(2.0, 0.0, 0.0);
        let pc = display.origin() + Vec3::new(-2.0, 3.0, 0.0);

        let a = to_ndc(m, pa);
        let b = to_ndc(m, pb);
        let c = to_ndc(m, pc);

        assert!((a.x + 1.0).abs() < EPS && (a.y + 1.0).abs() < EPS, "pa -> {a:?}");
        assert!((b.x - 1.0).abs() < EPS && (b.y + 1.0).abs() < EPS, "pb -> {b:?}");
        assert!((c.x + 1.0).abs() < EPS && (c.y - 1.0).abs() < EPS, "pc -> {c:?}");
    }

    #[test]
    fn test_screen_plane_points_are_eye_invariant() {
        // The display is a window into a fixed world frame: a world point on
        // the screen plane keeps its NDC position wherever the eye moves.
        let display = Display::new(Vec3::ZERO, 4.0, 3.0, 2.0, 1.0, 100.0).unwrap();
        let screen_centre = Vec3::new(0.0, 1.5, 0.0);

        for eye in [
            Vec3::new(0.0, 1.5, 2.0),
            Vec3::new(1.0, 2.5, 3.0),
            Vec3::new(-2.0, 0.5, 1.0),
        ] {
            let ndc = to_ndc(display.projection_to_eye(eye), screen_centre);
            assert!(ndc.x.abs() < EPS && ndc.y.abs() < EPS, "eye {eye:?} -> {ndc:?}");
        }
    }

    #[test]
    fn test_depth_parallax_follows_the_eye() {
        let display = Display::new(Vec3::ZERO, 4.0, 3.0, 2.0, 1.0, 100.0).unwrap();

        // A point behind the screen plane appears on the same side the eye
        // moved to, like scenery behind a real window.
        let behind = Vec3::new(0.0, 1.5, -2.0);
        let from_left = to_ndc(display.projection_to_eye(Vec3::new(-1.0, 1.5, 2.0)), behind);
        let from_right = to_ndc(display.projection_to_eye(Vec3::new(1.0, 1.5, 2.0)), behind);

        assert!(from_left.x < 0.0 && from_right.x > 0.0);
        assert!((from_left.x + from_right.x).abs() < EPS);
    }

    #[test]
    fn test_depth_range_spans_clip_planes() {
        let display = Display::new(Vec3::ZERO, 2.0, 2.0, 1.0, 1.0, 10.0).unwrap();
        let eye = Vec3::new(0.0, 1.0, 3.0);
        let m = display.projection_to_eye(eye);

        // Points at the near and far plane distances along the view normal.
        let near_point = Vec3::new(0.0, 1.0, 3.0 - 1.0);
        let far_point = Vec3::new(0.0, 1.0, 3.0 - 10.0);
        assert!((to_ndc(m, near_point).z + 1.0).abs() < EPS);
        assert!((to_ndc(m, far_point).z - 1.0).abs() < 1e-4);
    }
}
