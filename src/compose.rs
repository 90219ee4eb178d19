//! Two-image compositing: Paste, Blend.
//!
//! Both write `src` into `dst` at `(x, y)` in place, without allocating.
//! `src` must fit inside `dst` at that position. The borrow rules already
//! forbid passing the same image as both source and destination.

use ndarray::{s, Zip};

use crate::image::Graymap;

fn assert_fits(dst: &Graymap, x: usize, y: usize, src: &Graymap) {
    assert!(
        dst.valid_rect(x, y, src.width(), src.height()),
        "{}x{} image does not fit at ({x}, {y}) in {}x{} image",
        src.width(),
        src.height(),
        dst.width(),
        dst.height()
    );
}

/// Copy every pixel of `src` into `dst` with `src`'s top-left at `(x, y)`.
///
/// # Panics
/// If `src` does not fit.
pub fn paste(dst: &mut Graymap, x: usize, y: usize, src: &Graymap) {
    assert_fits(dst, x, y, src);
    let (w, h) = (src.width(), src.height());
    dst.view_mut()
        .slice_mut(s![y..y + h, x..x + w])
        .assign(&src.view());
}

/// Mix `src` into `dst` at `(x, y)`: `d ← d·(1 − alpha) + s·alpha`.
///
/// The result is clamped to `[0, dst.maxval]` and rounded half up. `alpha`
/// outside `[0, 1]` extrapolates and relies on the clamp.
///
/// # Panics
/// If `src` does not fit.
pub fn blend(dst: &mut Graymap, x: usize, y: usize, src: &Graymap, alpha: f64) {
    assert_fits(dst, x, y, src);
    let (w, h) = (src.width(), src.height());
    let ceiling = f64::from(dst.maxval());
    Zip::from(dst.view_mut().slice_mut(s![y..y + h, x..x + w]))
        .and(&src.view())
        .for_each(|d, &s| {
            let v = (f64::from(*d) * (1.0 - alpha) + f64::from(s) * alpha).clamp(0.0, ceiling);
            *d = (v + 0.5) as u8;
        });
}
