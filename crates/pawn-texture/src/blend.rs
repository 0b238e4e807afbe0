//! Straight-alpha "over" compositing onto an opaque destination.

use pawn_core::{PawnError, Result};

use crate::canvas::PixelCanvas;

/// Blend one RGBA source pixel over one RGBA destination pixel.
///
/// The destination is treated as opaque and keeps alpha 255.
#[inline]
pub fn blend_over(dst: &mut [u8], src: &[u8]) {
    let a = src[3] as f32 / 255.0;
    for c in 0..3 {
        dst[c] = (src[c] as f32 * a + dst[c] as f32 * (1.0 - a)) as u8;
    }
    dst[3] = 255;
}

/// Blend `src` over the center of `dst`. Both canvases must be RGBA. A
/// source larger than the destination is clipped.
pub fn blend_center(dst: &mut PixelCanvas, src: &PixelCanvas) -> Result<()> {
    if dst.channels() != 4 || src.channels() != 4 {
        return Err(PawnError::Canvas(format!(
            "blending needs RGBA canvases, got {} and {} channels",
            dst.channels(),
            src.channels()
        )));
    }

    let offset_x = (dst.width() as i64 - src.width() as i64) / 2;
    let offset_y = (dst.height() as i64 - src.height() as i64) / 2;
    let dst_stride = dst.stride();
    let (dst_w, dst_h) = (dst.width() as i64, dst.height() as i64);
    let pixels = dst.pixels_mut();

    for sy in 0..src.height() {
        let dy = offset_y + sy as i64;
        if dy < 0 || dy >= dst_h {
            continue;
        }
        for sx in 0..src.width() {
            let dx = offset_x + sx as i64;
            if dx < 0 || dx >= dst_w {
                continue;
            }
            let i = dy as usize * dst_stride + dx as usize * 4;
            blend_over(&mut pixels[i..i + 4], src.pixel(sx, sy));
        }
    }
    Ok(())
}
