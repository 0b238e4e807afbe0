use pawn_math::{dvec3, DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Perspective camera looking down `-Z` at the pawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Point3,
    pub target: Point3,
    pub up: Vector3,
    /// Vertical field of view in radians
    pub fov_y: f64,
    /// Width / height
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    /// Eye height of the viewer at rest.
    pub const REST_HEIGHT: f64 = 0.5;
    /// Distance of the eye from the origin along `+Z`.
    pub const DISTANCE: f64 = 2.5;

    pub fn new(eye: Point3, target: Point3, up: Vector3, fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y,
            aspect,
            near,
            far,
        }
    }

    /// Camera whose eye sits at `height`, looking straight down `-Z`.
    pub fn at_height(height: f64) -> Self {
        let eye = dvec3(0.0, height, Self::DISTANCE);
        Self {
            eye,
            target: eye - Vector3::Z,
            ..Self::default()
        }
    }

    /// World to view transform.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style projection (NDC depth in `[-1, 1]`).
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    /// 45° vertical FOV, 4:3 viewport, eye at `(0, 0.5, 2.5)`.
    fn default() -> Self {
        let eye = dvec3(0.0, Self::REST_HEIGHT, Self::DISTANCE);
        Self {
            eye,
            target: eye - Vector3::Z,
            up: Vector3::Y,
            fov_y: std::f64::consts::FRAC_PI_4,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}
