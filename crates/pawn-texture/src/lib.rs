//! Procedural texture compositing.
//!
//! Two small source images are tiled into a large canvas with weighted random
//! selection, a vector logo is rasterized at a fraction of the canvas size,
//! and the logo is alpha-blended over the canvas center.
//!
//! # Example
//! ```no_run
//! use pawn_texture::{compose_texture, ImageCrateDecoder, TextureConfig, TextureSources};
//! use rand::SeedableRng;
//!
//! let primary = std::fs::read("carpet_1.png")?;
//! let secondary = std::fs::read("carpet_2.png")?;
//! let logo = std::fs::read("logo.svg")?;
//! let sources = TextureSources {
//!     primary: &primary,
//!     secondary: &secondary,
//!     logo_svg: &logo,
//! };
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let canvas = compose_texture(&TextureConfig::default(), &sources, &ImageCrateDecoder::default(), &mut rng)?;
//! assert_eq!(canvas.channels(), 4);
//! # Ok::<(), pawn_core::PawnError>(())
//! ```

mod blend;
mod canvas;
mod compositor;
mod decode;
mod raster;
mod tiling;

pub use blend::{blend_center, blend_over};
pub use canvas::PixelCanvas;
pub use compositor::{compose_texture, compose_texture_seeded, TextureConfig, TextureSources};
pub use decode::{ImageCrateDecoder, ImageDecoder};
pub use raster::{fit_transform, rasterize_svg, FitTransform};
pub use tiling::{choose_tiles, tile_sources, TileGrid, TileSource, TiledCanvas};
