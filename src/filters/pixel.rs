//! Pixel-wise filters: Negative, Threshold, Brighten.
//!
//! These remap each level independently of its neighbours, in place.
//! They never fail and never allocate.

use crate::image::Graymap;

// ============================================================================
// Negative
// ============================================================================

/// Photographic negative: `p ← maxval − p`.
///
/// A level stored above `maxval` through [`Graymap::set`] wraps around modulo
/// 256 rather than panicking.
pub fn negative(img: &mut Graymap) {
    let maxval = img.maxval();
    img.view_mut().mapv_inplace(|p| maxval.wrapping_sub(p));
}

// ============================================================================
// Threshold
// ============================================================================

/// Binary threshold: levels below `level` become 0, the rest become `maxval`.
///
/// # Arguments
/// * `img` - Image modified in place
/// * `level` - Cut-off level; `0` turns every pixel white
pub fn threshold(img: &mut Graymap, level: u8) {
    let maxval = img.maxval();
    img.view_mut()
        .mapv_inplace(|p| if p < level { 0 } else { maxval });
}

// ============================================================================
// Brighten
// ============================================================================

/// Multiply every level by `factor`, saturating at 0 and `maxval`.
///
/// # Arguments
/// * `img` - Image modified in place
/// * `factor` - Scale: 0.0 = black, 1.0 = no change, above 1.0 brightens
///
/// Products inside the range are rounded half up.
pub fn brighten(img: &mut Graymap, factor: f64) {
    let maxval = img.maxval();
    let ceiling = f64::from(maxval);
    img.view_mut().mapv_inplace(|p| {
        let v = f64::from(p) * factor;
        if v > ceiling {
            maxval
        } else if v < 0.0 {
            0
        } else {
            (v + 0.5) as u8
        }
    });
}
