use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use palette::Srgb;

use crate::types::AppError;

pub fn hex_to_rgb(hex: &str) -> Result<Srgb<f32>, AppError> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(AppError::InvalidColor(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| AppError::InvalidColor(hex.to_string()))
    };
    Ok(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn rgb_to_pixel(rgb: Srgb<f32>, alpha: u8) -> Rgba<u8> {
    Rgba([
        to_channel(rgb.red * 255.0),
        to_channel(rgb.green * 255.0),
        to_channel(rgb.blue * 255.0),
        alpha,
    ])
}

pub fn interpolate_color(color1: &Srgb<f32>, color2: &Srgb<f32>, t: f32) -> Srgb<f32> {
    Srgb::new(
        color1.red + (color2.red - color1.red) * t,
        color1.green + (color2.green - color1.green) * t,
        color1.blue + (color2.blue - color1.blue) * t,
    )
}

/// Rounds and clamps a float into a `u8` channel.
pub fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

pub fn blend_colors(color1: Rgba<u8>, color2: Rgba<u8>, blend_factor: f32) -> Rgba<u8> {
    let mix = |a: u8, b: u8| to_channel(a as f32 + (b as f32 - a as f32) * blend_factor);
    Rgba([
        mix(color1[0], color2[0]),
        mix(color1[1], color2[1]),
        mix(color1[2], color2[2]),
        mix(color1[3], color2[3]),
    ])
}

pub fn load_image(path: &Path) -> Result<RgbaImage, AppError> {
    let img = image::open(path).map_err(|source| AppError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

pub fn save_image(img: &RgbaImage, path: &Path) -> Result<(), AppError> {
    img.save(path).map_err(|source| AppError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Size a `src_w`×`src_h` image must be scaled to, keeping its aspect ratio,
/// so that it covers a `width`×`height` box.
pub fn cover_dimensions(src_w: u32, src_h: u32, width: u32, height: u32) -> (u32, u32) {
    let src_ratio = src_w as f64 / src_h as f64;
    let dst_ratio = width as f64 / height as f64;

    if src_ratio > dst_ratio {
        let new_w = (height as f64 * src_ratio) as u32;
        (new_w.max(width), height)
    } else {
        let new_h = (width as f64 / src_ratio) as u32;
        (width, new_h.max(height))
    }
}

pub fn cover_crop(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_w, src_h) = img.dimensions();
    let (new_w, new_h) = cover_dimensions(src_w, src_h, width, height);

    let resized = imageops::resize(img, new_w, new_h, FilterType::Lanczos3);
    let left = (new_w - width) / 2;
    let top = (new_h - height) / 2;
    imageops::crop_imm(&resized, left, top, width, height).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x / 7 + y / 5) % 2 == 0 {
                Rgba([200, 120, 40, 255])
            } else {
                Rgba([20, 40, 90, 255])
            }
        })
    }

    #[test]
    fn cover_crop_always_hits_target_size() {
        let sources = [(1600, 900), (900, 1600), (880, 560), (37, 11), (30, 200), (512, 512)];
        let targets = [(880, 560), (512, 512), (256, 256), (10, 300)];

        for &(sw, sh) in &sources {
            let src = checker(sw, sh);
            for &(w, h) in &targets {
                let out = cover_crop(&src, w, h);
                assert_eq!(out.dimensions(), (w, h), "source {}x{} -> {}x{}", sw, sh, w, h);
            }
        }
    }

    #[test]
    fn cover_scale_is_uniform() {
        let cases = [
            (1600, 900, 880, 560),
            (900, 1600, 880, 560),
            (4032, 3024, 512, 512),
            (640, 480, 256, 256),
            (300, 301, 880, 560),
        ];

        for &(sw, sh, w, h) in &cases {
            let (nw, nh) = cover_dimensions(sw, sh, w, h);
            assert!(nw >= w && nh >= h);
            // nw/sw == nh/sh up to truncating one axis to whole pixels.
            let skew = (nw as i64 * sh as i64 - nh as i64 * sw as i64).abs();
            assert!(
                skew <= sw.max(sh) as i64,
                "{}x{} -> {}x{} scaled unevenly",
                sw,
                sh,
                nw,
                nh
            );
        }
    }

    #[test]
    fn cover_dimensions_match_target_on_the_tight_axis() {
        assert_eq!(cover_dimensions(1600, 900, 880, 560), (995, 560));
        assert_eq!(cover_dimensions(900, 1600, 880, 560), (880, 1564));
        assert_eq!(cover_dimensions(1000, 1000, 512, 512), (512, 512));
    }

    #[test]
    fn hex_parses_with_or_without_hash() {
        let a = hex_to_rgb("#f58b4a").unwrap();
        let b = hex_to_rgb("f58b4a").unwrap();
        assert_eq!(rgb_to_pixel(a, 255), Rgba([245, 139, 74, 255]));
        assert_eq!(rgb_to_pixel(a, 9), rgb_to_pixel(b, 9));
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(matches!(hex_to_rgb("#12345"), Err(AppError::InvalidColor(_))));
        assert!(matches!(hex_to_rgb("#zz0000"), Err(AppError::InvalidColor(_))));
    }

    #[test]
    fn blend_colors_interpolates_every_channel() {
        let a = Rgba([0, 100, 200, 255]);
        let b = Rgba([100, 200, 0, 55]);
        assert_eq!(blend_colors(a, b, 0.0), a);
        assert_eq!(blend_colors(a, b, 1.0), b);
        assert_eq!(blend_colors(a, b, 0.5), Rgba([50, 150, 100, 155]));
    }
}
