//! CPU reference of the pawn fragment shader.
//!
//! Body fragments sample the body texture and receive diffuse plus Phong
//! specular light. Cap fragments sample the cap texture through a soft
//! circular mask and receive diffuse light only.

use glam::{Vec2, Vec3, Vec4};
use pawn_mesh::TexRegion;
use pawn_texture::PixelCanvas;

use crate::camera::Camera;

pub const CAP_MASK_RADIUS: f32 = 0.385;
pub const CAP_MASK_EDGE: f32 = 0.01;
/// Cap fragments with mask alpha below this are discarded.
pub const DISCARD_ALPHA: f32 = 0.01;
pub const BRIGHTNESS: f32 = 2.2;
pub const FILL_WEIGHT: f32 = 0.3;
pub const SHININESS: f32 = 128.0;
pub const SPECULAR_STRENGTH: f32 = 0.3;

/// Anything that can be sampled at a UV coordinate, returning straight RGBA
/// in `[0, 1]`.
pub trait TextureSampler {
    fn sample(&self, uv: Vec2) -> Vec4;
}

/// Constant color, handy as a stand-in for a missing texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor(pub Vec4);

impl TextureSampler for SolidColor {
    fn sample(&self, _uv: Vec2) -> Vec4 {
        self.0
    }
}

/// Nearest-texel lookup with repeat wrapping. Row 0 is `v = 0`.
impl TextureSampler for PixelCanvas {
    fn sample(&self, uv: Vec2) -> Vec4 {
        let wrap = |t: f32, n: u32| -> u32 {
            let i = (t.rem_euclid(1.0) * n as f32) as u32;
            i.min(n - 1)
        };
        if self.width() == 0 || self.height() == 0 {
            return Vec4::ZERO;
        }
        let px = self.pixel(wrap(uv.x, self.width()), wrap(uv.y, self.height()));
        let a = if px.len() == 4 { px[3] } else { 255 };
        Vec4::new(px[0] as f32, px[1] as f32, px[2] as f32, a as f32) / 255.0
    }
}

/// Lights and viewer shared by every fragment of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingContext {
    pub point_lights: [Vec3; 2],
    /// Direction the fill light travels in
    pub fill_direction: Vec3,
    pub light_color: Vec3,
    pub view_position: Vec3,
}

impl LightingContext {
    /// Default lights seen from `camera`.
    pub fn for_camera(camera: &Camera) -> Self {
        Self {
            view_position: camera.eye.as_vec3(),
            ..Self::default()
        }
    }
}

impl Default for LightingContext {
    fn default() -> Self {
        // doubled intensity, clamped to white
        let intensity = (2.0f32 * 1.0).min(1.0);
        Self {
            point_lights: [Vec3::new(-10.0, 0.0, 0.0), Vec3::new(0.0, 10.0, 0.0)],
            fill_direction: Vec3::NEG_Z,
            light_color: Vec3::splat(intensity),
            view_position: Camera::default().eye.as_vec3(),
        }
    }
}

/// Interpolated inputs of one fragment, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub uv: Vec2,
    /// Interpolated region value; decoded with [`TexRegion::from_shader_value`]
    pub tex_id: f32,
    pub world_position: Vec3,
    pub normal: Vec3,
}

/// Soft circular mask around the UV center.
pub fn cap_mask(uv: Vec2) -> f32 {
    let dist = (uv - Vec2::splat(0.5)).length();
    1.0 - smoothstep(CAP_MASK_RADIUS - CAP_MASK_EDGE, CAP_MASK_RADIUS + CAP_MASK_EDGE, dist)
}

/// Shade one fragment. Returns `None` when the fragment is discarded.
///
/// The color is linear and unclamped; alpha comes from the sampled texel
/// (times the cap mask).
pub fn shade_fragment<B, C>(ctx: &LightingContext, fragment: &Fragment, body: &B, cap: &C) -> Option<Vec4>
where
    B: TextureSampler + ?Sized,
    C: TextureSampler + ?Sized,
{
    let region = TexRegion::from_shader_value(fragment.tex_id);
    let base = match region {
        TexRegion::Body => body.sample(fragment.uv),
        TexRegion::Cap => {
            let alpha = cap_mask(fragment.uv);
            if alpha < DISCARD_ALPHA {
                return None;
            }
            cap.sample(fragment.uv) * Vec4::new(1.0, 1.0, 1.0, alpha)
        }
    };

    let norm = fragment.normal.normalize_or_zero();
    let view_dir = (ctx.view_position - fragment.world_position).normalize_or_zero();
    let light_dir1 = (ctx.point_lights[0] - fragment.world_position).normalize_or_zero();
    let light_dir2 = (ctx.point_lights[1] - fragment.world_position).normalize_or_zero();
    let fill_dir = (-ctx.fill_direction).normalize_or_zero();

    let diff1 = norm.dot(light_dir1).max(0.0);
    let diff2 = norm.dot(light_dir2).max(0.0);
    let diff3 = norm.dot(fill_dir).max(0.0) * FILL_WEIGHT;
    let diffuse = ((diff1 + diff2) * 0.5 + diff3) * BRIGHTNESS;

    let specular = match region {
        TexRegion::Body => {
            let spec = |light_dir: Vec3| view_dir.dot(reflect(-light_dir, norm)).max(0.0).powf(SHININESS);
            let lighting = (spec(light_dir1) + spec(light_dir2)) * 0.5 * BRIGHTNESS;
            SPECULAR_STRENGTH * ctx.light_color * lighting
        }
        TexRegion::Cap => Vec3::ZERO,
    };

    let lit = base.truncate() * ctx.light_color * diffuse + specular;
    Some(lit.extend(base.w))
}

fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
