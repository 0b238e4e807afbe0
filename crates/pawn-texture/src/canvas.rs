use pawn_core::{PawnError, Result, Validate};

/// Row-major 8-bit pixel buffer with 3 (RGB) or 4 (RGBA) channels.
///
/// The buffer length always equals `width * height * channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    /// Zero-filled canvas.
    pub fn new(width: u32, height: u32, channels: u8) -> Result<Self> {
        let len = buffer_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            pixels: vec![0u8; len],
        })
    }

    /// Canvas filled with a solid RGBA color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Result<Self> {
        let mut canvas = Self::new(width, height, 4)?;
        for chunk in canvas.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
        Ok(canvas)
    }

    /// Wrap an existing buffer, checking its length.
    pub fn from_raw(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<Self> {
        let len = buffer_len(width, height, channels)?;
        if pixels.len() != len {
            return Err(PawnError::Canvas(format!(
                "buffer of {} bytes does not match {}x{}x{}",
                pixels.len(),
                width,
                height,
                channels
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    pub fn same_shape(&self, other: &PixelCanvas) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Channel bytes of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let i = y as usize * self.stride() + x as usize * c;
        &self.pixels[i..i + c]
    }

    /// Copy of the rectangle starting at `(x, y)` with the given size.
    pub fn region(&self, x: u32, y: u32, width: u32, height: u32) -> Result<PixelCanvas> {
        if x.checked_add(width).map_or(true, |r| r > self.width)
            || y.checked_add(height).map_or(true, |b| b > self.height)
        {
            return Err(PawnError::Canvas(format!(
                "region {}x{} at ({}, {}) exceeds {}x{} canvas",
                width, height, x, y, self.width, self.height
            )));
        }
        let c = self.channels as usize;
        let row_bytes = width as usize * c;
        let mut pixels = Vec::with_capacity(row_bytes * height as usize);
        for row in y..y + height {
            let start = row as usize * self.stride() + x as usize * c;
            pixels.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        PixelCanvas::from_raw(width, height, self.channels, pixels)
    }

    /// RGBA copy; RGB pixels gain an opaque alpha channel.
    pub fn to_rgba(&self) -> PixelCanvas {
        if self.channels == 4 {
            return self.clone();
        }
        let pixels = self
            .pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect();
        PixelCanvas {
            width: self.width,
            height: self.height,
            channels: 4,
            pixels,
        }
    }
}

impl Validate for PixelCanvas {
    fn validate(&self) -> Result<()> {
        let len = buffer_len(self.width, self.height, self.channels)?;
        if self.pixels.len() != len {
            return Err(PawnError::Canvas(format!(
                "buffer of {} bytes does not match {}x{}x{}",
                self.pixels.len(),
                self.width,
                self.height,
                self.channels
            )));
        }
        Ok(())
    }
}

fn buffer_len(width: u32, height: u32, channels: u8) -> Result<usize> {
    if channels != 3 && channels != 4 {
        return Err(PawnError::Canvas(format!(
            "unsupported channel count {}",
            channels
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or_else(|| PawnError::Canvas(format!("{}x{} canvas is too large", width, height)))
}
