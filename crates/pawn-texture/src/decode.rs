//! Raster decoding behind a small trait so callers can swap the backend.

use image::DynamicImage;
use pawn_core::{PawnError, Result};

use crate::canvas::PixelCanvas;

/// Turns encoded image bytes into a [`PixelCanvas`].
///
/// Failures must come back as [`PawnError::Decode`] so the caller can treat
/// them as recoverable.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelCanvas>;
}

impl<F> ImageDecoder for F
where
    F: Fn(&[u8]) -> Result<PixelCanvas>,
{
    fn decode(&self, bytes: &[u8]) -> Result<PixelCanvas> {
        self(bytes)
    }
}

/// Decoder backed by the `image` crate (PNG and JPEG).
///
/// Images without alpha decode to 3 channels, images with alpha to 4.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder {
    /// Flip rows so the first row is the bottom of the image.
    pub flip_vertically: bool,
}

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelCanvas> {
        let image = image::load_from_memory(bytes).map_err(|e| PawnError::Decode(e.to_string()))?;
        let image = if self.flip_vertically {
            image.flipv()
        } else {
            image
        };
        canvas_from_image(image)
    }
}

fn canvas_from_image(image: DynamicImage) -> Result<PixelCanvas> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(PawnError::Decode(format!(
            "image has empty dimensions {}x{}",
            width, height
        )));
    }
    if image.color().has_alpha() {
        PixelCanvas::from_raw(width, height, 4, image.to_rgba8().into_raw())
    } else {
        PixelCanvas::from_raw(width, height, 3, image.to_rgb8().into_raw())
    }
}
