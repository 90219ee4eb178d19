//! Exact subimage search.
//!
//! Brute force: every anchor is compared pixel by pixel, so a full scan costs
//! `O(W1·H1·W2·H2)` in the worst case.

use log::debug;

use crate::image::Graymap;
use crate::metrics::{Counter, Metrics};

/// Whether `needle` equals the window of `haystack` whose top-left is `(x, y)`.
///
/// # Panics
/// If `(x, y)` is not a pixel of `haystack` or the window does not fit inside it.
pub fn match_subimage(haystack: &Graymap, x: usize, y: usize, needle: &Graymap) -> bool {
    match_subimage_with(haystack, x, y, needle, &mut ())
}

/// [`match_subimage`], counting pixel comparisons into `metrics`.
pub fn match_subimage_with<M: Metrics>(
    haystack: &Graymap,
    x: usize,
    y: usize,
    needle: &Graymap,
    metrics: &mut M,
) -> bool {
    let (w, h) = (needle.width(), needle.height());
    assert!(
        haystack.valid_pos(x, y) && haystack.valid_rect(x, y, w, h),
        "{w}x{h} window at ({x}, {y}) outside {}x{} image",
        haystack.width(),
        haystack.height()
    );

    let window = haystack.view();
    let mut compared = 0u64;
    let mut matched = true;
    for ((cy, cx), &p) in needle.view().indexed_iter() {
        compared += 1;
        if window[[y + cy, x + cx]] != p {
            matched = false;
            break;
        }
    }
    metrics.add(Counter::Comparison, compared);
    matched
}

/// First position, in raster order, where `needle` occurs inside `haystack`.
///
/// # Returns
/// `Some((x, y))` of the top-left corner, or `None` when there is no match or
/// `haystack` has no pixels. An empty `needle` matches at `(0, 0)`.
///
/// # Panics
/// If `needle` is wider or taller than `haystack`.
pub fn locate_subimage(haystack: &Graymap, needle: &Graymap) -> Option<(usize, usize)> {
    locate_subimage_with(haystack, needle, &mut ())
}

/// [`locate_subimage`], counting comparisons and rejected anchors into `metrics`.
pub fn locate_subimage_with<M: Metrics>(
    haystack: &Graymap,
    needle: &Graymap,
    metrics: &mut M,
) -> Option<(usize, usize)> {
    assert!(
        haystack.valid_rect(0, 0, needle.width(), needle.height()),
        "{}x{} image cannot contain {}x{} image",
        haystack.width(),
        haystack.height(),
        needle.width(),
        needle.height()
    );

    if haystack.is_empty() {
        debug!("subimage not found: empty image");
        return None;
    }

    // Anchors must be pixels of the haystack, even for an empty needle.
    let last_x = (haystack.width() - needle.width()).min(haystack.width() - 1);
    let last_y = (haystack.height() - needle.height()).min(haystack.height() - 1);
    for y in 0..=last_y {
        for x in 0..=last_x {
            if match_subimage_with(haystack, x, y, needle, metrics) {
                debug!("subimage found at ({x}, {y})");
                return Some((x, y));
            }
            metrics.add(Counter::Comparison, 1);
        }
    }
    debug!("subimage not found");
    None
}
