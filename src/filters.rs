use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::filter::gaussian_blur_f32;
use palette::Srgb;

use crate::utils::{blend_colors, interpolate_color, rgb_to_pixel, to_channel};

/// A 3×3 convolution kernel, applied as `sum(kernel * px) / scale + offset`.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub weights: [f32; 9],
    pub scale: f32,
    pub offset: f32,
}

pub const FIND_EDGES: Kernel = Kernel {
    weights: [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
    scale: 1.0,
    offset: 0.0,
};

pub const CONTOUR: Kernel = Kernel {
    weights: [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
    scale: 1.0,
    offset: 255.0,
};

pub const SMOOTH: Kernel = Kernel {
    weights: [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0],
    scale: 13.0,
    offset: 0.0,
};

fn convolve_at<F>(kernel: &Kernel, x: u32, y: u32, sample: F) -> f32
where
    F: Fn(u32, u32) -> f32,
{
    let mut sum = 0.0;
    for ky in 0..3 {
        for kx in 0..3 {
            let weight = kernel.weights[(ky * 3 + kx) as usize];
            sum += weight * sample(x + kx - 1, y + ky - 1);
        }
    }
    sum / kernel.scale + kernel.offset
}

fn is_border(x: u32, y: u32, width: u32, height: u32) -> bool {
    x == 0 || y == 0 || x + 1 >= width || y + 1 >= height
}

/// Convolves a grayscale image. Border pixels are copied unchanged.
pub fn convolve_gray(img: &GrayImage, kernel: &Kernel) -> GrayImage {
    let (width, height) = img.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if is_border(x, y, width, height) {
            return *img.get_pixel(x, y);
        }
        let value = convolve_at(kernel, x, y, |sx, sy| img.get_pixel(sx, sy)[0] as f32);
        Luma([to_channel(value)])
    })
}

/// Convolves the color channels of an RGBA image, leaving alpha untouched.
pub fn convolve_rgba(img: &RgbaImage, kernel: &Kernel) -> RgbaImage {
    let (width, height) = img.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let pixel = *img.get_pixel(x, y);
        if is_border(x, y, width, height) {
            return pixel;
        }
        let mut out = pixel;
        for c in 0..3 {
            let value = convolve_at(kernel, x, y, |sx, sy| img.get_pixel(sx, sy)[c] as f32);
            out[c] = to_channel(value);
        }
        out
    })
}

pub fn gaussian_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

fn luma(pixel: &Rgba<u8>) -> f32 {
    (pixel[0] as f32 * 299.0 + pixel[1] as f32 * 587.0 + pixel[2] as f32 * 114.0) / 1000.0
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0f64, 0u64), |(s, n), v| (s + v as f64, n + 1));
    if count == 0 {
        0.0
    } else {
        (sum / count as f64).round() as f32
    }
}

/// Pushes every value away from (or toward) the image's mean gray level.
pub fn enhance_contrast_gray(img: &GrayImage, factor: f32) -> GrayImage {
    let level = mean(img.pixels().map(|p| p[0] as f32));
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = to_channel(level + factor * (pixel[0] as f32 - level));
    }
    out
}

pub fn enhance_contrast(img: &RgbaImage, factor: f32) -> RgbaImage {
    let level = mean(img.pixels().map(luma));
    let degenerate = Rgba([level as u8, level as u8, level as u8, 255]);
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        *pixel = blend_colors(degenerate, *pixel, factor);
    }
    out
}

/// Scales saturation by blending each pixel against its own gray value.
pub fn enhance_color(img: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        let gray = to_channel(luma(pixel));
        let degenerate = Rgba([gray, gray, gray, pixel[3]]);
        *pixel = blend_colors(degenerate, *pixel, factor);
    }
    out
}

pub fn enhance_sharpness(img: &RgbaImage, factor: f32) -> RgbaImage {
    let smoothed = convolve_rgba(img, &SMOOTH);
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        blend_colors(*smoothed.get_pixel(x, y), *img.get_pixel(x, y), factor)
    })
}

/// Maps a grayscale image onto the gradient `black` → `white` with a constant alpha.
pub fn gradient_map(img: &GrayImage, black: Srgb<f32>, white: Srgb<f32>, alpha: u8) -> RgbaImage {
    let mut lut = [Rgba([0u8; 4]); 256];
    for (level, entry) in lut.iter_mut().enumerate() {
        let color = interpolate_color(&black, &white, level as f32 / 255.0);
        *entry = rgb_to_pixel(color, alpha);
    }
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        lut[img.get_pixel(x, y)[0] as usize]
    })
}

/// Per-channel `a + ratio * (b - a)` of two same-sized images.
pub fn blend_images(a: &RgbaImage, b: &RgbaImage, ratio: f32) -> RgbaImage {
    RgbaImage::from_fn(a.width(), a.height(), |x, y| {
        blend_colors(*a.get_pixel(x, y), *b.get_pixel(x, y), ratio)
    })
}
