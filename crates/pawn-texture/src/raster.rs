//! SVG rasterization into a straight-alpha RGBA canvas.

use pawn_core::{PawnError, Result};
use resvg::{tiny_skia, usvg};

use crate::canvas::PixelCanvas;

/// Uniform scale plus centering offset mapping SVG user space into a target
/// pixel box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Fit an `svg_width x svg_height` document inside `width x height` keeping
/// its aspect ratio, centered on the unused axis.
pub fn fit_transform(svg_width: f32, svg_height: f32, width: u32, height: u32) -> FitTransform {
    let scale = (width as f32 / svg_width).min(height as f32 / svg_height);
    FitTransform {
        scale,
        offset_x: (width as f32 - svg_width * scale) * 0.5,
        offset_y: (height as f32 - svg_height * scale) * 0.5,
    }
}

/// Rasterize `svg` into a transparent `width x height` RGBA canvas.
///
/// Parse failures are reported as [`PawnError::Vector`].
pub fn rasterize_svg(svg: &[u8], width: u32, height: u32) -> Result<PixelCanvas> {
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default())
        .map_err(|e| PawnError::Vector(e.to_string()))?;
    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(PawnError::Vector(format!(
            "document has empty size {}x{}",
            size.width(),
            size.height()
        )));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PawnError::Canvas(format!("cannot allocate {}x{} raster", width, height)))?;
    let fit = fit_transform(size.width(), size.height(), width, height);
    let transform =
        tiny_skia::Transform::from_row(fit.scale, 0.0, 0.0, fit.scale, fit.offset_x, fit.offset_y);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied color
    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    tracing::debug!(width, height, scale = fit.scale, "rasterized vector logo");
    PixelCanvas::from_raw(width, height, 4, pixels)
}
