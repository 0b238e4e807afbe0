//! Surface of revolution around the vertical (Y) axis.
//!
//! Each normalized profile row is swept through `divisions + 1` angular steps.
//! The last column repeats the first so the texture seam has its own `u = 1`
//! vertices; it reuses the first column's trig values so the seam closes
//! exactly.

use std::f64::consts::TAU;

use pawn_core::{PawnError, Result, Tolerance};
use pawn_geometry::NormalizedProfile;
use pawn_math::{dvec2, dvec3, Point2, Vector2, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::mesh::{Mesh, SurfaceVertex, TexRegion};

/// Angular resolution of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevolveConfig {
    /// Number of angular steps around the axis (at least 3)
    pub divisions: usize,
}

impl RevolveConfig {
    pub const MIN_DIVISIONS: usize = 3;

    pub fn validate(&self) -> Result<()> {
        if self.divisions < Self::MIN_DIVISIONS {
            return Err(PawnError::Config(format!(
                "angular divisions must be >= {}, got {}",
                Self::MIN_DIVISIONS,
                self.divisions
            )));
        }
        Ok(())
    }
}

impl Default for RevolveConfig {
    fn default() -> Self {
        Self { divisions: 64 }
    }
}

/// Which rule produced a vertex normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalSource {
    /// `normalize(cross(dtheta, dt))`
    Analytic,
    /// The row sits on the axis. Limit of the analytic normal as the radius
    /// goes to zero.
    AxisLimit,
    /// The curve derivative vanished. Tangent taken from neighbouring rows.
    FiniteDifference,
    /// Nothing usable. Snapped to `+Y`.
    AxisSnap,
}

/// Normal of the revolved surface at angle `theta`.
///
/// `derivative` is `(d radius, d height)` along the profile. `fallback_tangent`
/// is used when the derivative has zero length.
pub fn surface_normal(
    radius: f64,
    derivative: Vector2,
    theta: f64,
    fallback_tangent: Option<Vector2>,
) -> (Vector3, NormalSource) {
    let (sin, cos) = theta.sin_cos();
    let tol = Tolerance::default();

    let dt = dvec3(derivative.x * cos, derivative.y, derivative.x * sin);
    let dtheta = dvec3(-radius * sin, 0.0, radius * cos);
    let n = dtheta.cross(dt);
    let len = n.length();
    if tol.is_significant(len) {
        return (n / len, NormalSource::Analytic);
    }

    // cross(dtheta, dt) = radius * (-dh cos, dr, -dh sin)
    let meridian = |d: Vector2| -> Option<Vector3> {
        let m = dvec3(-d.y * cos, d.x, -d.y * sin);
        let len = m.length();
        tol.is_significant(len).then(|| m / len)
    };

    if let Some(n) = meridian(derivative) {
        return (n, NormalSource::AxisLimit);
    }
    if let Some(n) = fallback_tangent.and_then(meridian) {
        return (n, NormalSource::FiniteDifference);
    }
    (Vector3::Y, NormalSource::AxisSnap)
}

/// Triangle indices for a `rows x (divisions + 1)` vertex grid.
///
/// Each cell emits `(curr, next, curr + 1)` and `(curr + 1, next, next + 1)`,
/// where `curr` is on row `i` and `next` on row `i + 1`.
pub fn revolve_indices(rows: usize, divisions: usize) -> Vec<u32> {
    let stride = divisions + 1;
    let mut indices = Vec::with_capacity(rows.saturating_sub(1) * divisions * 6);
    for i in 0..rows.saturating_sub(1) {
        for j in 0..divisions {
            let curr = (i * stride + j) as u32;
            let next = ((i + 1) * stride + j) as u32;

            indices.push(curr);
            indices.push(next);
            indices.push(curr + 1);

            indices.push(curr + 1);
            indices.push(next);
            indices.push(next + 1);
        }
    }
    indices
}

/// Sweep a normalized profile around the Y axis.
///
/// Produces `rows * (divisions + 1)` vertices tagged [`TexRegion::Body`] and
/// `(rows - 1) * divisions * 6` indices.
pub fn revolve_profile(profile: &NormalizedProfile, divisions: usize) -> Result<Mesh> {
    RevolveConfig { divisions }.validate()?;
    let rows = profile.len();
    if rows == 0 {
        return Err(PawnError::Config("cannot revolve an empty profile".into()));
    }
    let stride = divisions + 1;
    if rows
        .checked_mul(stride)
        .and_then(|n| u32::try_from(n).ok())
        .is_none()
    {
        return Err(PawnError::Config(format!(
            "{} rows x {} columns exceeds u32 index range",
            rows, stride
        )));
    }

    let positions: Vec<Point2> = profile.rows.iter().map(|r| r.point.position).collect();

    let swept: Vec<(Vec<SurfaceVertex>, usize)> = (0..rows)
        .into_par_iter()
        .map(|i| {
            let row = &profile.rows[i];
            let radius = row.point.radius();
            let height = row.point.height();
            let neighbour_tangent = {
                let prev = positions[i.saturating_sub(1)];
                let next = positions[(i + 1).min(rows - 1)];
                next - prev
            };

            let mut fallbacks = 0;
            let vertices = (0..stride)
                .map(|j| {
                    let theta = TAU * (j % divisions) as f64 / divisions as f64;
                    let (sin, cos) = theta.sin_cos();
                    let (normal, source) = surface_normal(
                        radius,
                        row.point.derivative,
                        theta,
                        Some(neighbour_tangent),
                    );
                    if source != NormalSource::Analytic {
                        fallbacks += 1;
                    }
                    SurfaceVertex {
                        position: dvec3(radius * cos, height, radius * sin),
                        uv: dvec2(j as f64 / divisions as f64, row.v),
                        region: TexRegion::Body,
                        normal,
                    }
                })
                .collect();
            (vertices, fallbacks)
        })
        .collect();

    let mut vertices = Vec::with_capacity(rows * stride);
    let mut fallback_count = 0;
    for (row_vertices, fallbacks) in swept {
        vertices.extend(row_vertices);
        fallback_count += fallbacks;
    }

    if fallback_count > 0 {
        tracing::debug!(
            vertices = fallback_count,
            "revolve used fallback normals for degenerate rows"
        );
    }

    let indices = revolve_indices(rows, divisions);
    tracing::debug!(
        rows,
        divisions,
        vertices = vertices.len(),
        indices = indices.len(),
        "revolved profile"
    );
    Ok(Mesh { vertices, indices })
}
