use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbaImage};

use crate::constants::{PALETTE_MAX_COLORS, PALETTE_SAMPLE_SIZE};

/// A set of pixels that median cut keeps splitting.
struct ColorBox {
    pixels: Vec<[u8; 3]>,
}

impl ColorBox {
    fn range(&self, channel: usize) -> u8 {
        let (min, max) = self
            .pixels
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[channel]), hi.max(p[channel])));
        max.saturating_sub(min)
    }

    fn widest_channel(&self) -> (usize, u8) {
        (0..3)
            .map(|c| (c, self.range(c)))
            .fold((0, 0), |best, cur| if cur.1 > best.1 { cur } else { best })
    }

    fn splittable(&self) -> bool {
        self.pixels.len() > 1 && self.widest_channel().1 > 0
    }

    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.pixels.sort_unstable_by_key(|p| (p[channel], p[0], p[1], p[2]));

        // Never split inside a run of equal values, so both halves stay disjoint.
        let mut median = self.pixels.len() / 2;
        let pivot = self.pixels[median][channel];
        while median > 0 && self.pixels[median - 1][channel] == pivot {
            median -= 1;
        }
        if median == 0 {
            median = self.pixels.partition_point(|p| p[channel] <= pivot);
        }

        let upper = self.pixels.split_off(median);
        (self, ColorBox { pixels: upper })
    }

    fn average(&self) -> [u8; 3] {
        let mut sum = [0u64; 3];
        for p in &self.pixels {
            for c in 0..3 {
                sum[c] += p[c] as u64;
            }
        }
        let n = self.pixels.len() as u64;
        [
            ((sum[0] + n / 2) / n) as u8,
            ((sum[1] + n / 2) / n) as u8,
            ((sum[2] + n / 2) / n) as u8,
        ]
    }
}

/// Median-cut quantization. Returns each palette color with the number of
/// pixels mapped to it, unordered.
pub fn median_cut(pixels: Vec<[u8; 3]>, max_colors: usize) -> Vec<([u8; 3], usize)> {
    if pixels.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let mut boxes = vec![ColorBox { pixels }];
    while boxes.len() < max_colors {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.splittable())
            .max_by_key(|(i, b)| (b.pixels.len(), std::cmp::Reverse(*i)))
            .map(|(i, _)| i);

        let Some(index) = candidate else {
            break;
        };
        let (lower, upper) = boxes.swap_remove(index).split();
        boxes.push(lower);
        boxes.push(upper);
    }

    boxes
        .iter()
        .map(|b| (b.average(), b.pixels.len()))
        .collect()
}

/// The `count` most frequent colors of `img` after downsampling and
/// quantizing, most frequent first.
pub fn dominant_colors(img: &RgbaImage, count: usize) -> Vec<Rgb<u8>> {
    let tiny = imageops::resize(
        img,
        PALETTE_SAMPLE_SIZE,
        PALETTE_SAMPLE_SIZE,
        FilterType::Lanczos3,
    );
    let pixels = tiny.pixels().map(|p| [p[0], p[1], p[2]]).collect();
    rank_colors(median_cut(pixels, PALETTE_MAX_COLORS), count)
}

/// Merges repeated palette entries and returns the `count` most used.
fn rank_colors(palette: Vec<([u8; 3], usize)>, count: usize) -> Vec<Rgb<u8>> {
    // Distinct boxes can average to the same color.
    let mut counts: HashMap<[u8; 3], usize> = HashMap::new();
    for (color, n) in palette {
        *counts.entry(color).or_default() += n;
    }

    let mut ranked: Vec<([u8; 3], usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(count).map(|(c, _)| Rgb(c)).collect()
}
