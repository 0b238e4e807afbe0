use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use pawn_core::PawnError;
use pawn_texture::{
    compose_texture, compose_texture_seeded, ImageCrateDecoder, ImageDecoder, TextureConfig,
    TextureSources,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="10" height="10">
    <circle cx="5" cy="5" r="5" fill="#000000"/>
</svg>"##;

fn png(color: [u8; 3], w: u32, h: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(w, h, Rgb(color));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn config(seed: u64) -> TextureConfig {
    TextureConfig {
        tiles_x: 12,
        tiles_y: 7,
        seed: Some(seed),
        ..TextureConfig::default()
    }
}

#[test]
fn test_png_sources_compose() {
    let red = png([255, 0, 0], 5, 3);
    let green = png([0, 255, 0], 5, 3);
    let sources = TextureSources {
        primary: &red,
        secondary: &green,
        logo_svg: LOGO.as_bytes(),
    };
    let canvas = compose_texture_seeded(&config(1), &sources, &ImageCrateDecoder::default()).unwrap();
    assert_eq!(canvas.width(), 60);
    assert_eq!(canvas.height(), 21);
    assert_eq!(canvas.channels(), 4);
    // every pixel is opaque after blending
    assert!(canvas.pixels().chunks_exact(4).all(|p| p[3] == 255));
    // logo disc is black at the center
    assert_eq!(canvas.pixel(30, 10), &[0, 0, 0, 255]);
}

#[test]
fn test_same_seed_reproduces_texture() {
    let red = png([255, 0, 0], 4, 4);
    let green = png([0, 255, 0], 4, 4);
    let sources = TextureSources {
        primary: &red,
        secondary: &green,
        logo_svg: LOGO.as_bytes(),
    };
    let decoder = ImageCrateDecoder::default();
    let a = compose_texture_seeded(&config(99), &sources, &decoder).unwrap();
    let b = compose_texture_seeded(&config(99), &sources, &decoder).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_probability_one_uses_primary_everywhere_outside_logo() {
    let red = png([255, 0, 0], 4, 4);
    let green = png([0, 255, 0], 4, 4);
    let sources = TextureSources {
        primary: &red,
        secondary: &green,
        logo_svg: LOGO.as_bytes(),
    };
    let config = TextureConfig {
        primary_probability: 1.0,
        ..config(3)
    };
    let mut rng = StdRng::seed_from_u64(0);
    let canvas = compose_texture(&config, &sources, &ImageCrateDecoder::default(), &mut rng).unwrap();
    // the top row lies outside the centered logo box
    for x in 0..canvas.width() {
        assert_eq!(canvas.pixel(x, 0), &[255, 0, 0, 255]);
    }
}

#[test]
fn test_corrupt_tile_is_recoverable() {
    let red = png([255, 0, 0], 4, 4);
    let sources = TextureSources {
        primary: &red,
        secondary: b"\x89PNG truncated",
        logo_svg: LOGO.as_bytes(),
    };
    let err = compose_texture_seeded(&config(1), &sources, &ImageCrateDecoder::default()).unwrap_err();
    assert!(matches!(err, PawnError::Decode(_)));
    assert!(err.is_recoverable());
}

#[test]
fn test_corrupt_logo_is_vector_error() {
    let red = png([255, 0, 0], 4, 4);
    let sources = TextureSources {
        primary: &red,
        secondary: &red,
        logo_svg: b"<svg",
    };
    let err = compose_texture_seeded(&config(1), &sources, &ImageCrateDecoder::default()).unwrap_err();
    assert!(matches!(err, PawnError::Vector(_)));
}

#[test]
fn test_mismatched_tile_sizes_rejected() {
    let sources = TextureSources {
        primary: &png([255, 0, 0], 4, 4),
        secondary: &png([0, 255, 0], 5, 4),
        logo_svg: LOGO.as_bytes(),
    };
    let decoder = ImageCrateDecoder::default();
    assert_eq!(decoder.decode(sources.primary).unwrap().width(), 4);
    let err = compose_texture_seeded(&config(1), &sources, &decoder).unwrap_err();
    assert!(matches!(err, PawnError::Canvas(_)));
    assert!(!err.is_recoverable());
}
