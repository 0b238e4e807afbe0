//! Weighted random tiling of two equally sized source images.

use pawn_core::{PawnError, Result};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::canvas::PixelCanvas;

/// Which source image fills a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileSource {
    Primary,
    Secondary,
}

/// Tile counts along each canvas axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub tiles_x: u32,
    pub tiles_y: u32,
}

impl TileGrid {
    pub fn new(tiles_x: u32, tiles_y: u32) -> Self {
        Self { tiles_x, tiles_y }
    }

    pub fn tile_count(&self) -> usize {
        self.tiles_x as usize * self.tiles_y as usize
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.tiles_x == 0 || self.tiles_y == 0 {
            return Err(PawnError::Config(format!(
                "tile grid must be non-empty, got {}x{}",
                self.tiles_x, self.tiles_y
            )));
        }
        Ok(())
    }
}

/// Tiled canvas together with the per-tile choices that produced it.
#[derive(Debug, Clone)]
pub struct TiledCanvas {
    pub canvas: PixelCanvas,
    /// Row-major, `grid.tiles_x` entries per row
    pub choices: Vec<TileSource>,
    pub grid: TileGrid,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TiledCanvas {
    /// Source chosen for tile `(tx, ty)`.
    pub fn choice(&self, tx: u32, ty: u32) -> TileSource {
        self.choices[ty as usize * self.grid.tiles_x as usize + tx as usize]
    }
}

/// Draw one choice per tile, row-major. Each tile independently picks
/// [`TileSource::Primary`] with probability `primary_probability`.
pub fn choose_tiles<R: Rng + ?Sized>(
    grid: TileGrid,
    primary_probability: f64,
    rng: &mut R,
) -> Result<Vec<TileSource>> {
    grid.validate()?;
    if !(0.0..=1.0).contains(&primary_probability) {
        return Err(PawnError::Config(format!(
            "primary probability must be in [0, 1], got {}",
            primary_probability
        )));
    }
    Ok((0..grid.tile_count())
        .map(|_| {
            if rng.random_bool(primary_probability) {
                TileSource::Primary
            } else {
                TileSource::Secondary
            }
        })
        .collect())
}

/// Fill a `tiles_x * w` by `tiles_y * h` canvas with copies of the two
/// sources, which must share dimensions and channel count.
pub fn tile_sources<R: Rng + ?Sized>(
    primary: &PixelCanvas,
    secondary: &PixelCanvas,
    grid: TileGrid,
    primary_probability: f64,
    rng: &mut R,
) -> Result<TiledCanvas> {
    if !primary.same_shape(secondary) {
        return Err(PawnError::Canvas(format!(
            "tile sources differ: {}x{}x{} vs {}x{}x{}",
            primary.width(),
            primary.height(),
            primary.channels(),
            secondary.width(),
            secondary.height(),
            secondary.channels()
        )));
    }
    if primary.width() == 0 || primary.height() == 0 {
        return Err(PawnError::Canvas(format!(
            "tile sources must be non-empty, got {}x{}",
            primary.width(),
            primary.height()
        )));
    }
    let choices = choose_tiles(grid, primary_probability, rng)?;

    let tile_width = primary.width();
    let tile_height = primary.height();
    let width = grid
        .tiles_x
        .checked_mul(tile_width)
        .ok_or_else(|| PawnError::Canvas("tiled canvas width overflows".into()))?;
    let height = grid
        .tiles_y
        .checked_mul(tile_height)
        .ok_or_else(|| PawnError::Canvas("tiled canvas height overflows".into()))?;
    let mut canvas = PixelCanvas::new(width, height, primary.channels())?;

    let tile_stride = primary.stride();
    let stride = canvas.stride();
    canvas
        .pixels_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let ty = y / tile_height as usize;
            let src_row = y % tile_height as usize;
            let row_choices = &choices[ty * grid.tiles_x as usize..(ty + 1) * grid.tiles_x as usize];
            for (dst, choice) in row.chunks_exact_mut(tile_stride).zip(row_choices) {
                let src = match choice {
                    TileSource::Primary => primary,
                    TileSource::Secondary => secondary,
                };
                let start = src_row * tile_stride;
                dst.copy_from_slice(&src.pixels()[start..start + tile_stride]);
            }
        });

    let primaries = choices
        .iter()
        .filter(|c| **c == TileSource::Primary)
        .count();
    tracing::debug!(
        width,
        height,
        tiles = choices.len(),
        primaries,
        "tiled source images"
    );

    Ok(TiledCanvas {
        canvas,
        choices,
        grid,
        tile_width,
        tile_height,
    })
}
