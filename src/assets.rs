use std::path::PathBuf;

use image::imageops::{self, grayscale};
use image::{Rgb, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::colors::{
    DARK_FALLBACK, HAND, HUB, NAVY, NAVY_LIGHT, ORANGE, PATTERN_ALT_BASE, PATTERN_BASE, RIM,
    STRIPE, VIGNETTE, WARM_FALLBACK,
};
use crate::constants::{
    Asset, BG_PATTERN, BG_PATTERN_ALT, BUILDINGS_GOLDEN, DIAL_RADIUS, HALO_RINGS, HERO,
    ICON_CLOCK, ICON_PALETTE_COUNT, OFFICE_SUNSET, REQUIRED_REFERENCES, RIM_WIDTH, STYLE_GIA,
    SUNSET_HORIZON, WATER_ABSTRACT,
};
use crate::filters::{
    blend_images, convolve_gray, enhance_color, enhance_contrast, enhance_contrast_gray,
    enhance_sharpness, gaussian_blur, gradient_map, CONTOUR, FIND_EDGES,
};
use crate::quantize::dominant_colors;
use crate::types::{AppConfig, AppError};
use crate::utils::{cover_crop, hex_to_rgb, load_image, save_image};

/// One of the four independent generation steps.
pub struct BuildStep {
    pub asset: Asset,
    pub sources: &'static str,
    pub run: fn(&AppConfig) -> Result<(), AppError>,
}

pub const BUILD_STEPS: [BuildStep; 4] = [
    BuildStep {
        asset: HERO,
        sources: "reference_bg/04 + 03",
        run: build_hero,
    },
    BuildStep {
        asset: BG_PATTERN,
        sources: "reference_bg/08",
        run: build_bg_pattern,
    },
    BuildStep {
        asset: BG_PATTERN_ALT,
        sources: "reference_bg/03",
        run: build_bg_pattern_alt,
    },
    BuildStep {
        asset: ICON_CLOCK,
        sources: "reference_style/01 + reference_bg/01 palette",
        run: build_clock_icon,
    },
];

pub fn missing_references(config: &AppConfig) -> Vec<PathBuf> {
    REQUIRED_REFERENCES
        .iter()
        .map(|r| config.reference_path(*r))
        .filter(|path| !path.exists())
        .collect()
}

pub fn check_references(config: &AppConfig) -> Result<(), AppError> {
    let missing = missing_references(config);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingReferences(missing))
    }
}

// Hero

pub fn build_hero(config: &AppConfig) -> Result<(), AppError> {
    let sunset = load_image(&config.reference_path(SUNSET_HORIZON))?;
    let city = load_image(&config.reference_path(BUILDINGS_GOLDEN))?;

    let hero = render_hero(&sunset, &city, config.hero_blend);
    save_image(&hero, &config.output_path(HERO))
}

pub fn render_hero(sunset: &RgbaImage, city: &RgbaImage, blend: f32) -> RgbaImage {
    let base = cover_crop(sunset, HERO.width, HERO.height);
    let city = cover_crop(city, HERO.width, HERO.height);
    let city = enhance_color(&enhance_contrast(&city, 1.15), 1.05);

    let mut hero = blend_images(&base, &city, blend);
    imageops::overlay(&mut hero, &vignette(HERO.width, HERO.height), 0, 0);
    enhance_sharpness(&hero, 1.08)
}

/// Transparent on the left, darkening toward the right edge for text contrast.
fn vignette(width: u32, height: u32) -> RgbaImage {
    let start = width as f32 * 0.35;
    let span = width as f32 * 0.65;
    RgbaImage::from_fn(width, height, |x, _| {
        let t = ((x as f32 - start) / span).max(0.0);
        let alpha = (110.0 * t) as u8;
        Rgba([VIGNETTE[0], VIGNETTE[1], VIGNETTE[2], alpha])
    })
}

// Background patterns

pub fn build_bg_pattern(config: &AppConfig) -> Result<(), AppError> {
    let water = load_image(&config.reference_path(WATER_ABSTRACT))?;
    let pattern = render_bg_pattern(&water, config.noise_seed, config.noise_dots)?;
    save_image(&pattern, &config.output_path(BG_PATTERN))
}

pub fn render_bg_pattern(src: &RgbaImage, seed: u64, dots: u32) -> Result<RgbaImage, AppError> {
    let (width, height) = (BG_PATTERN.width, BG_PATTERN.height);
    let src = cover_crop(src, width, height);

    let edges = convolve_gray(&grayscale(&src), &FIND_EDGES);
    let edges = enhance_contrast_gray(&gaussian_blur(&edges, 0.8), 1.7);
    let tint = gradient_map(&edges, hex_to_rgb(NAVY)?, hex_to_rgb(ORANGE)?, 60);

    let mut out = RgbaImage::from_pixel(width, height, Rgba(PATTERN_BASE));
    imageops::overlay(&mut out, &tint, 0, 0);
    imageops::overlay(&mut out, &noise_layer(width, height, seed, dots), 0, 0);
    Ok(out)
}

/// Sparse, faint white dots so tiled areas feel less flat.
pub fn noise_layer(width: u32, height: u32, seed: u64, dots: u32) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut layer = RgbaImage::new(width, height);
    for _ in 0..dots {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        let alpha = rng.gen_range(5..=16);
        layer.put_pixel(x, y, Rgba([255, 255, 255, alpha]));
    }
    layer
}

pub fn build_bg_pattern_alt(config: &AppConfig) -> Result<(), AppError> {
    let skyline = load_image(&config.reference_path(BUILDINGS_GOLDEN))?;
    let pattern = render_bg_pattern_alt(&skyline)?;
    save_image(&pattern, &config.output_path(BG_PATTERN_ALT))
}

pub fn render_bg_pattern_alt(src: &RgbaImage) -> Result<RgbaImage, AppError> {
    let (width, height) = (BG_PATTERN_ALT.width, BG_PATTERN_ALT.height);
    let src = cover_crop(src, width, height);

    let lines = convolve_gray(&grayscale(&src), &CONTOUR);
    let lines = enhance_contrast_gray(&gaussian_blur(&lines, 1.0), 1.8);
    let tinted = gradient_map(&lines, hex_to_rgb(NAVY_LIGHT)?, hex_to_rgb(ORANGE)?, 78);

    let mut out = RgbaImage::from_pixel(width, height, Rgba(PATTERN_ALT_BASE));
    draw_stripes(&mut out);
    imageops::overlay(&mut out, &tinted, 0, 0);
    Ok(out)
}

/// Writes the stripe color straight into `img`, replacing what is there.
fn draw_stripes(img: &mut RgbaImage) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    for i in (-w..2 * w).step_by(24) {
        draw_line_segment_mut(img, (i as f32, 0.0), ((i + w) as f32, h as f32), Rgba(STRIPE));
    }
}

// Clock icon

pub fn build_clock_icon(config: &AppConfig) -> Result<(), AppError> {
    let style = load_image(&config.reference_path(STYLE_GIA))?;
    let sunset = load_image(&config.reference_path(OFFICE_SUNSET))?;

    let icon = render_clock_icon(&style, &sunset);
    save_image(&icon, &config.output_path(ICON_CLOCK))
}

/// Picks the (warm, dark) pair the icon is painted with.
pub fn icon_colors(palette: &[Rgb<u8>]) -> ([u8; 3], [u8; 3]) {
    let warm = palette
        .iter()
        .find(|c| c[0] > c[2])
        .map_or(WARM_FALLBACK, |c| c.0);
    let dark = palette
        .iter()
        .find(|c| (c[0] as u32 + c[1] as u32 + c[2] as u32) < 210)
        .map_or(DARK_FALLBACK, |c| c.0);
    (warm, dark)
}

pub fn render_clock_icon(style: &RgbaImage, sunset: &RgbaImage) -> RgbaImage {
    let size = ICON_CLOCK.width;

    let mut composite = cover_crop(style, size, size);
    imageops::overlay(&mut composite, &cover_crop(sunset, size, size), 0, 0);
    let palette = dominant_colors(&composite, ICON_PALETTE_COUNT);
    let (warm, dark) = icon_colors(&palette);

    let c = (size / 2) as i32;
    let center = (c, c);
    let r = DIAL_RADIUS;
    let mut img = RgbaImage::new(size, size);

    // dial, painted from the rim inward
    for i in (1..=r).rev() {
        let t = i as f32 / r as f32;
        let mix = |k: usize| (warm[k] as f32 * (1.0 - t * 0.3) + dark[k] as f32 * (t * 0.3)) as u8;
        draw_filled_circle_mut(&mut img, center, i, Rgba([mix(0), mix(1), mix(2), 255]));
    }

    // solid rim band, every pixel in (r - RIM_WIDTH, r]
    let (inner, outer) = ((r - RIM_WIDTH) as f32, r as f32);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let d = (x as f32 - c as f32).hypot(y as f32 - c as f32);
        if d > inner && d <= outer {
            *pixel = Rgba(RIM);
        }
    }

    let origin = (c as f32, c as f32);
    draw_thick_line(&mut img, origin, (c as f32, (c - 56) as f32), 7.0, Rgba(HAND));
    draw_thick_line(&mut img, origin, ((c + 38) as f32, (c + 14) as f32), 9.0, Rgba(HAND));
    draw_filled_circle_mut(&mut img, center, 8, Rgba(HUB));

    let mut halo = RgbaImage::new(size, size);
    for step in 1..=HALO_RINGS {
        let color = Rgba([warm[0], warm[1], warm[2], (7 * step) as u8]);
        draw_hollow_circle_mut(&mut halo, center, r + step, color);
    }

    imageops::overlay(&mut img, &halo, 0, 0);
    img
}

fn draw_thick_line(
    img: &mut RgbaImage,
    start: (f32, f32),
    end: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return;
    }
    let half = width / 2.0;
    let (nx, ny) = (-dy / len * half, dx / len * half);
    let corner = |p: (f32, f32), sign: f32| {
        Point::new((p.0 + sign * nx).round() as i32, (p.1 + sign * ny).round() as i32)
    };
    let poly = [
        corner(start, 1.0),
        corner(end, 1.0),
        corner(end, -1.0),
        corner(start, -1.0),
    ];
    draw_polygon_mut(img, &poly, color);
}
