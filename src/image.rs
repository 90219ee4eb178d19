//! Owned 8-bit graymap and its pixel accessors.
//!
//! Pixels live in an `Array2<u8>` of shape `(height, width)` kept in standard
//! (row-major) layout, so `[[y, x]]` addresses raster index `y * width + x`
//! and [`Graymap::as_raw`] is the raster-scan byte buffer.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use crate::error::{GraymapError, Result};

/// Largest white level a pixel can carry.
pub const PIX_MAX: u8 = 255;

/// 8-bit grayscale image with a white level (`maxval`).
///
/// Pixel values are not clamped to `maxval` by [`Graymap::set`]; only the
/// filters saturate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graymap {
    width: usize,
    height: usize,
    maxval: u8,
    pixels: Array2<u8>,
}

/// Allocate `len` zeroed elements, reporting failure instead of aborting.
pub(crate) fn try_zeroed<T: Copy + Default>(len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| GraymapError::Allocation { pixels: len })?;
    buf.resize(len, T::default());
    Ok(buf)
}

impl Graymap {
    /// Create a black image of `width × height` pixels.
    ///
    /// # Panics
    /// If `maxval` is zero.
    pub fn new(width: usize, height: usize, maxval: u8) -> Result<Self> {
        assert!(maxval > 0, "maxval must be in 1..=255");
        let len = width
            .checked_mul(height)
            .ok_or(GraymapError::Allocation { pixels: usize::MAX })?;
        let data = try_zeroed::<u8>(len)?;
        let pixels = Array2::from_shape_vec((height, width), data)
            .map_err(|_| GraymapError::Allocation { pixels: len })?;
        Ok(Self {
            width,
            height,
            maxval,
            pixels,
        })
    }

    /// Adopt an existing raster-order buffer.
    ///
    /// Returns `None` if `data.len() != width * height` or `maxval` is zero.
    pub fn from_raw(width: usize, height: usize, maxval: u8, data: Vec<u8>) -> Option<Self> {
        if maxval == 0 || width.checked_mul(height) != Some(data.len()) {
            return None;
        }
        let pixels = Array2::from_shape_vec((height, width), data).ok()?;
        Some(Self {
            width,
            height,
            maxval,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// White level.
    #[inline]
    pub fn maxval(&self) -> u8 {
        self.maxval
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `(x, y)` lies inside the image.
    #[inline]
    pub fn valid_pos(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Whether the `w × h` rectangle at `(x, y)` lies completely inside the image.
    pub fn valid_rect(&self, x: usize, y: usize, w: usize, h: usize) -> bool {
        matches!(x.checked_add(w), Some(r) if r <= self.width)
            && matches!(y.checked_add(h), Some(b) if b <= self.height)
    }

    /// Pixel level at `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        debug_assert!(self.valid_pos(x, y), "pixel ({x}, {y}) out of bounds");
        self.pixels[[y, x]]
    }

    /// Set the pixel at `(x, y)`. The level is stored as given, even above `maxval`.
    ///
    /// # Panics
    /// If `(x, y)` is outside the image.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, level: u8) {
        debug_assert!(self.valid_pos(x, y), "pixel ({x}, {y}) out of bounds");
        self.pixels[[y, x]] = level;
    }

    /// Minimum and maximum pixel levels.
    ///
    /// # Panics
    /// On an image with no pixels.
    pub fn stats(&self) -> (u8, u8) {
        assert!(!self.is_empty(), "stats of an empty image");
        self.pixels
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &p| (lo.min(p), hi.max(p)))
    }

    /// Read-only `(height, width)` view.
    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    /// Mutable `(height, width)` view.
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, u8> {
        self.pixels.view_mut()
    }

    /// Raster-order pixel buffer.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels
            .as_slice()
            .expect("graymap pixels are kept in standard layout")
    }

    /// Mutable raster-order pixel buffer.
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        self.pixels
            .as_slice_mut()
            .expect("graymap pixels are kept in standard layout")
    }

    /// Consume the image, returning its raster-order buffer.
    pub fn into_raw(self) -> Vec<u8> {
        let (data, _offset) = self.pixels.into_raw_vec_and_offset();
        data
    }
}

/// Release the image held in `slot`, leaving `None` behind.
///
/// Does nothing if the slot is already empty.
pub fn destroy(slot: &mut Option<Graymap>) {
    drop(slot.take());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let img = Graymap::new(3, 2, 255).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.maxval(), 255);
        assert_eq!(img.as_raw(), &[0u8; 6]);
    }

    #[test]
    fn test_new_zero_size() {
        let img = Graymap::new(0, 5, 10).unwrap();
        assert!(img.is_empty());
        assert!(img.as_raw().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_zero_maxval() {
        let _ = Graymap::new(1, 1, 0);
    }

    #[test]
    fn test_new_reports_overflowing_size() {
        let err = Graymap::new(usize::MAX, 2, 255).unwrap_err();
        assert!(matches!(err, GraymapError::Allocation { .. }));
    }

    #[test]
    fn test_raster_index() {
        let mut img = Graymap::new(4, 3, 255).unwrap();
        img.set(1, 2, 77);
        assert_eq!(img.as_raw()[2 * 4 + 1], 77);
        assert_eq!(img.get(1, 2), 77);
    }

    #[test]
    fn test_set_allows_values_above_maxval() {
        let mut img = Graymap::new(1, 1, 100).unwrap();
        img.set(0, 0, 200);
        assert_eq!(img.get(0, 0), 200);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds_panics() {
        let img = Graymap::new(2, 2, 255).unwrap();
        img.get(2, 0);
    }

    #[test]
    fn test_valid_pos_and_rect() {
        let img = Graymap::new(4, 3, 255).unwrap();
        assert!(img.valid_pos(3, 2));
        assert!(!img.valid_pos(4, 0));
        assert!(!img.valid_pos(0, 3));

        assert!(img.valid_rect(0, 0, 4, 3));
        assert!(img.valid_rect(4, 3, 0, 0));
        assert!(!img.valid_rect(1, 0, 4, 1));
        assert!(!img.valid_rect(0, 1, 1, 3));
        assert!(!img.valid_rect(usize::MAX, 0, 2, 1));
    }

    #[test]
    fn test_stats() {
        let img = Graymap::from_raw(3, 1, 255, vec![40, 7, 99]).unwrap();
        assert_eq!(img.stats(), (7, 99));
    }

    #[test]
    #[should_panic]
    fn test_stats_on_empty_panics() {
        Graymap::new(0, 0, 255).unwrap().stats();
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(Graymap::from_raw(2, 2, 255, vec![0; 3]).is_none());
        assert!(Graymap::from_raw(2, 2, 0, vec![0; 4]).is_none());
        let img = Graymap::from_raw(2, 2, 255, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(img.get(0, 1), 3);
        assert_eq!(img.into_raw(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut slot = Some(Graymap::new(2, 2, 255).unwrap());
        destroy(&mut slot);
        assert!(slot.is_none());
        destroy(&mut slot);
        assert!(slot.is_none());
    }
}
