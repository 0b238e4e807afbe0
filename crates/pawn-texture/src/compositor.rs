//! Full texture pipeline: decode, tile, rasterize the logo, blend.

use pawn_core::{PawnError, Result, Validate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::blend::blend_center;
use crate::canvas::PixelCanvas;
use crate::decode::ImageDecoder;
use crate::raster::rasterize_svg;
use crate::tiling::{tile_sources, TileGrid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub tiles_x: u32,
    pub tiles_y: u32,
    /// Chance that a tile uses the primary image
    pub primary_probability: f64,
    /// Logo box size relative to the canvas, per axis
    pub logo_fraction: f64,
    /// Fixed seed for reproducible tiling; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            tiles_x: 120,
            tiles_y: 68,
            primary_probability: 0.8,
            logo_fraction: 0.5,
            seed: None,
        }
    }
}

impl TextureConfig {
    pub fn grid(&self) -> TileGrid {
        TileGrid::new(self.tiles_x, self.tiles_y)
    }
}

impl Validate for TextureConfig {
    fn validate(&self) -> Result<()> {
        self.grid().validate()?;
        if !(0.0..=1.0).contains(&self.primary_probability) {
            return Err(PawnError::Config(format!(
                "primary probability must be in [0, 1], got {}",
                self.primary_probability
            )));
        }
        if !(self.logo_fraction > 0.0 && self.logo_fraction <= 1.0) {
            return Err(PawnError::Config(format!(
                "logo fraction must be in (0, 1], got {}",
                self.logo_fraction
            )));
        }
        Ok(())
    }
}

/// Encoded inputs of the compositor.
#[derive(Debug, Clone, Copy)]
pub struct TextureSources<'a> {
    pub primary: &'a [u8],
    pub secondary: &'a [u8],
    pub logo_svg: &'a [u8],
}

/// Compose the final RGBA texture.
///
/// Decode and SVG failures are returned as recoverable errors; nothing is
/// partially written.
pub fn compose_texture<D, R>(
    config: &TextureConfig,
    sources: &TextureSources<'_>,
    decoder: &D,
    rng: &mut R,
) -> Result<PixelCanvas>
where
    D: ImageDecoder + ?Sized,
    R: Rng + ?Sized,
{
    let _span = tracing::info_span!("compose_texture").entered();
    config.validate()?;

    let primary = decode_source(decoder, sources.primary, "primary")?;
    let secondary = decode_source(decoder, sources.secondary, "secondary")?;

    let tiled = tile_sources(
        &primary,
        &secondary,
        config.grid(),
        config.primary_probability,
        rng,
    )?;
    let mut canvas = tiled.canvas.to_rgba();

    let logo_w = ((canvas.width() as f64 * config.logo_fraction) as u32).max(1);
    let logo_h = ((canvas.height() as f64 * config.logo_fraction) as u32).max(1);
    let logo = rasterize_svg(sources.logo_svg, logo_w, logo_h).inspect_err(|e| {
        tracing::warn!(error = %e, "logo rasterization failed");
    })?;
    blend_center(&mut canvas, &logo)?;

    tracing::info!(
        width = canvas.width(),
        height = canvas.height(),
        logo_width = logo_w,
        logo_height = logo_h,
        "texture composed"
    );
    Ok(canvas)
}

/// [`compose_texture`] with an RNG seeded from `config.seed`, or from the OS
/// when unset.
pub fn compose_texture_seeded<D>(
    config: &TextureConfig,
    sources: &TextureSources<'_>,
    decoder: &D,
) -> Result<PixelCanvas>
where
    D: ImageDecoder + ?Sized,
{
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    compose_texture(config, sources, decoder, &mut rng)
}

fn decode_source<D: ImageDecoder + ?Sized>(
    decoder: &D,
    bytes: &[u8],
    which: &str,
) -> Result<PixelCanvas> {
    let decoded = decoder.decode(bytes).and_then(|canvas| {
        if canvas.width() == 0 || canvas.height() == 0 {
            return Err(PawnError::Decode(format!(
                "{} image decoded to empty {}x{} canvas",
                which,
                canvas.width(),
                canvas.height()
            )));
        }
        Ok(canvas)
    });
    decoded.inspect_err(|e| {
        tracing::warn!(source = which, error = %e, "failed to decode tile image");
    })
}
