//! Mean blur over an integral image.
//!
//! Each pixel becomes the rounded mean of the `(2dx+1) × (2dy+1)` window
//! centred on it. Windows are clipped at the image border, and the divisor is
//! the area of the clipped window.
//!
//! The prefix sums and the write-back run in a single raster scan. Writing a
//! pixel needs the prefix sum at the bottom-right corner of its window, so
//! the write-back trails the prefix-sum pass by `width * (dy + 1)` positions.
//! By then every original value the window covers has already been folded
//! into the accumulator, which makes it safe to overwrite pixels in place.

use log::debug;

use crate::error::Result;
use crate::image::{try_zeroed, Graymap};
use crate::metrics::{Counter, Metrics};

/// Whether a window of half-width `half` (full size `2 * half + 1`) fits in `extent`.
#[inline]
pub(crate) fn window_fits(half: usize, extent: usize) -> bool {
    half < extent.div_ceil(2)
}

/// Blur `img` in place with window half-widths `dx`, `dy`.
///
/// # Panics
/// If `2dx + 1 > width` or `2dy + 1 > height`.
pub fn blur(img: &mut Graymap, dx: usize, dy: usize) -> Result<()> {
    blur_with(img, dx, dy, &mut ())
}

/// [`blur`], counting scan steps into `metrics`.
pub fn blur_with<M: Metrics>(img: &mut Graymap, dx: usize, dy: usize, metrics: &mut M) -> Result<()> {
    let (width, height) = (img.width(), img.height());
    assert!(
        window_fits(dx, width) && window_fits(dy, height),
        "blur half-widths dx={dx} dy={dy} too large for a {width}x{height} image"
    );

    let size = width * height;
    let lag = width * (dy + 1);
    let mut sums = try_zeroed::<u64>(size)?;
    let pixels = img.as_raw_mut();

    debug!("blur dx={dx} dy={dy} over {width}x{height}, {} steps", size + lag);

    for i in 0..size + lag {
        if i < size {
            let (x, y) = (i % width, i / width);
            let mut s = u64::from(pixels[i]);
            if x > 0 {
                s += sums[i - 1];
            }
            if y > 0 {
                s += sums[i - width];
            }
            if x > 0 && y > 0 {
                s -= sums[i - width - 1];
            }
            sums[i] = s;
        }

        if i >= lag {
            let b = i - lag;
            let (bx, by) = (b % width, b / width);
            let left = bx.saturating_sub(dx);
            let right = (bx + dx).min(width - 1);
            let top = by.saturating_sub(dy);
            let bottom = (by + dy).min(height - 1);

            // Add before subtracting so the unsigned sum never dips below zero.
            let mut total = sums[bottom * width + right];
            if left > 0 && top > 0 {
                total += sums[(top - 1) * width + left - 1];
            }
            if left > 0 {
                total -= sums[bottom * width + left - 1];
            }
            if top > 0 {
                total -= sums[(top - 1) * width + right];
            }

            let area = ((right - left + 1) * (bottom - top + 1)) as u64;
            pixels[b] = ((total + area / 2) / area) as u8;
        }
    }

    metrics.add(Counter::BlurIteration, (size + lag) as u64);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Counters;

    /// Direct clipped-window mean, for comparison.
    fn naive_blur(img: &Graymap, dx: usize, dy: usize) -> Vec<u8> {
        let (w, h) = (img.width(), img.height());
        let mut out = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let (x0, x1) = (x.saturating_sub(dx), (x + dx).min(w - 1));
                let (y0, y1) = (y.saturating_sub(dy), (y + dy).min(h - 1));
                let mut sum = 0u64;
                for sy in y0..=y1 {
                    for sx in x0..=x1 {
                        sum += img.get(sx, sy) as u64;
                    }
                }
                let area = ((x1 - x0 + 1) * (y1 - y0 + 1)) as u64;
                out.push(((sum + area / 2) / area) as u8);
            }
        }
        out
    }

    fn noise(width: usize, height: usize) -> Graymap {
        let mut state = 0x2545_f491u32;
        let data = (0..width * height)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        Graymap::from_raw(width, height, 255, data).unwrap()
    }

    #[test]
    fn test_blur_single_row() {
        let mut img = Graymap::from_raw(3, 1, 255, vec![0, 255, 0]).unwrap();
        blur(&mut img, 1, 0).unwrap();
        assert_eq!(img.as_raw(), &[128, 85, 128]);
    }

    #[test]
    fn test_blur_zero_window_is_identity() {
        let original = noise(6, 5);
        let mut img = original.clone();
        blur(&mut img, 0, 0).unwrap();
        assert_eq!(img, original);
    }

    #[test]
    fn test_blur_constant_image_unchanged() {
        let mut img = Graymap::from_raw(7, 5, 200, vec![123; 35]).unwrap();
        blur(&mut img, 3, 2).unwrap();
        assert!(img.as_raw().iter().all(|&p| p == 123));
    }

    #[test]
    fn test_blur_matches_naive_mean() {
        for &(w, h, dx, dy) in &[(9, 7, 1, 1), (9, 7, 4, 0), (5, 11, 0, 5), (16, 9, 3, 2)] {
            let mut img = noise(w, h);
            let expected = naive_blur(&img, dx, dy);
            blur(&mut img, dx, dy).unwrap();
            assert_eq!(img.as_raw(), expected.as_slice(), "w={w} h={h} dx={dx} dy={dy}");
        }
    }

    #[test]
    fn test_blur_counts_scan_steps() {
        let mut img = noise(5, 4);
        let mut counters = Counters::new();
        blur_with(&mut img, 1, 1, &mut counters).unwrap();
        assert_eq!(counters.blur_iterations, 20 + 5 * 2);
    }

    #[test]
    fn test_window_fits() {
        assert!(window_fits(0, 1));
        assert!(window_fits(1, 3));
        assert!(window_fits(1, 4));
        assert!(!window_fits(2, 4));
        assert!(!window_fits(0, 0));
        assert!(!window_fits(usize::MAX / 2 + 1, 3));
    }

    #[test]
    #[should_panic]
    fn test_blur_huge_half_width_panics() {
        // 2 * dx + 1 would wrap around to 1
        let mut img = noise(3, 3);
        let _ = blur(&mut img, usize::MAX / 2 + 1, 0);
    }

    #[test]
    #[should_panic]
    fn test_blur_window_too_wide_panics() {
        let mut img = noise(4, 4);
        let _ = blur(&mut img, 2, 0);
    }
}
