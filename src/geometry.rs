//! Geometric transforms: Rotate, Mirror, Crop.
//!
//! Each returns a new image with the source's maxval and leaves the source
//! untouched. Allocation of the result is the only way they can fail.

use ndarray::s;

use crate::error::Result;
use crate::image::Graymap;

/// Rotate 90° anticlockwise.
///
/// The result is `height × width`; source `(x, y)` lands at
/// `(y, width − 1 − x)`.
pub fn rotate(img: &Graymap) -> Result<Graymap> {
    let (width, height) = (img.width(), img.height());
    let mut out = Graymap::new(height, width, img.maxval())?;
    let src = img.view();
    let mut dst = out.view_mut();
    for y in 0..height {
        for x in 0..width {
            dst[[width - 1 - x, y]] = src[[y, x]];
        }
    }
    Ok(out)
}

/// Flip left-right.
pub fn mirror(img: &Graymap) -> Result<Graymap> {
    let width = img.width();
    let mut out = Graymap::new(width, img.height(), img.maxval())?;
    let src = img.view();
    let mut dst = out.view_mut();
    for ((y, x), &p) in src.indexed_iter() {
        dst[[y, width - 1 - x]] = p;
    }
    Ok(out)
}

/// Copy the `w × h` rectangle whose top-left corner is `(x, y)`.
///
/// # Panics
/// If the rectangle is not completely inside `img`.
pub fn crop(img: &Graymap, x: usize, y: usize, w: usize, h: usize) -> Result<Graymap> {
    assert!(
        img.valid_rect(x, y, w, h),
        "crop rectangle {w}x{h} at ({x}, {y}) outside {}x{} image",
        img.width(),
        img.height()
    );
    let mut out = Graymap::new(w, h, img.maxval())?;
    out.view_mut()
        .assign(&img.view().slice(s![y..y + h, x..x + w]));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graymap {
        // 3 wide, 2 high:
        // 1 2 3
        // 4 5 6
        Graymap::from_raw(3, 2, 9, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_rotate_anticlockwise() {
        let img = sample();
        let r = rotate(&img).unwrap();
        assert_eq!((r.width(), r.height(), r.maxval()), (2, 3, 9));
        // 3 6
        // 2 5
        // 1 4
        assert_eq!(r.as_raw(), &[3, 6, 2, 5, 1, 4]);
        assert_eq!(img, sample());
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let data = (0..20).collect();
        let img = Graymap::from_raw(5, 4, 255, data).unwrap();
        let mut r = img.clone();
        for _ in 0..4 {
            r = rotate(&r).unwrap();
        }
        assert_eq!(r, img);
    }

    #[test]
    fn test_mirror() {
        let m = mirror(&sample()).unwrap();
        assert_eq!((m.width(), m.height()), (3, 2));
        assert_eq!(m.as_raw(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let img = sample();
        assert_eq!(mirror(&mirror(&img).unwrap()).unwrap(), img);
    }

    #[test]
    fn test_crop() {
        let c = crop(&sample(), 1, 0, 2, 2).unwrap();
        assert_eq!((c.width(), c.height(), c.maxval()), (2, 2, 9));
        assert_eq!(c.as_raw(), &[2, 3, 5, 6]);
    }

    #[test]
    fn test_crop_empty_rect() {
        let c = crop(&sample(), 3, 2, 0, 0).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_crop_outside_panics() {
        let _ = crop(&sample(), 2, 0, 2, 1);
    }

    #[test]
    fn test_transforms_of_empty_image() {
        let img = Graymap::new(0, 3, 255).unwrap();
        let r = rotate(&img).unwrap();
        assert_eq!((r.width(), r.height()), (3, 0));
        assert!(mirror(&img).unwrap().is_empty());
    }
}
