//! Graymap
//!
//! 8-bit grayscale image manipulation with optional Python bindings via PyO3
//! and WASM bindings for JavaScript.
//!
//! ## Image Model
//! A [`Graymap`] owns a `width × height` raster of `u8` levels plus a white
//! level `maxval` in `1..=255`. Pixel `(x, y)` lives at raster index
//! `y * width + x`.
//!
//! ## Operations
//! - **I/O**: binary `P5` graymap files (`codec`)
//! - **Pixel-wise**: negative, threshold, brighten (`filters::pixel`)
//! - **Geometric**: rotate, mirror, crop, each returning a new image (`geometry`)
//! - **Compositing**: paste, blend (`compose`)
//! - **Search**: exact subimage match and locate (`search`)
//! - **Blur**: clipped-window mean filter over an integral image (`filters::blur`)
//!
//! ## Errors
//! Allocation and I/O failures come back as [`GraymapError`]. Passing
//! coordinates or rectangles outside an image is a caller bug and panics.

pub mod codec;
pub mod compose;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod image;
pub mod metrics;
pub mod search;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use codec::{load, load_with, read_pgm, save, save_with, write_pgm};
pub use compose::{blend, paste};
pub use error::{GraymapError, Result};
pub use filters::{blur, blur_with, brighten, negative, threshold};
pub use geometry::{crop, mirror, rotate};
pub use image::{destroy, Graymap, PIX_MAX};
pub use metrics::{Counter, Counters, Metrics};
pub use search::{locate_subimage, locate_subimage_with, match_subimage, match_subimage_with};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use std::path::PathBuf;

    use numpy::{IntoPyArray, PyArray2};
    use pyo3::exceptions::{PyIndexError, PyMemoryError, PyOSError, PyValueError};
    use pyo3::prelude::*;

    use crate::filters::blur::window_fits;
    use crate::{GraymapError, Graymap};

    fn to_py_err(err: GraymapError) -> PyErr {
        match err {
            GraymapError::Allocation { .. } => PyMemoryError::new_err(err.to_string()),
            GraymapError::Format(_) => PyValueError::new_err(err.to_string()),
            GraymapError::Io { .. } => PyOSError::new_err(err.to_string()),
        }
    }

    fn check_fits(dst: &Graymap, x: usize, y: usize, src: &Graymap) -> PyResult<()> {
        if dst.valid_rect(x, y, src.width(), src.height()) {
            Ok(())
        } else {
            Err(PyValueError::new_err("image does not fit at the given position"))
        }
    }

    /// 8-bit grayscale image.
    #[pyclass(name = "Graymap", module = "graymap")]
    pub struct PyGraymap {
        inner: Graymap,
    }

    #[pymethods]
    impl PyGraymap {
        /// Create a black image.
        #[new]
        #[pyo3(signature = (width, height, maxval=255))]
        fn new(width: usize, height: usize, maxval: u8) -> PyResult<Self> {
            if maxval == 0 {
                return Err(PyValueError::new_err("maxval must be in 1..=255"));
            }
            let inner = Graymap::new(width, height, maxval).map_err(to_py_err)?;
            Ok(Self { inner })
        }

        /// Load a binary graymap file.
        #[staticmethod]
        fn load(path: PathBuf) -> PyResult<Self> {
            let inner = crate::codec::load(path).map_err(to_py_err)?;
            Ok(Self { inner })
        }

        /// Save as a binary graymap file.
        fn save(&self, path: PathBuf) -> PyResult<()> {
            crate::codec::save(&self.inner, path).map_err(to_py_err)
        }

        #[getter]
        fn width(&self) -> usize {
            self.inner.width()
        }

        #[getter]
        fn height(&self) -> usize {
            self.inner.height()
        }

        #[getter]
        fn maxval(&self) -> u8 {
            self.inner.maxval()
        }

        fn get_pixel(&self, x: usize, y: usize) -> PyResult<u8> {
            if !self.inner.valid_pos(x, y) {
                return Err(PyIndexError::new_err("pixel position out of range"));
            }
            Ok(self.inner.get(x, y))
        }

        fn set_pixel(&mut self, x: usize, y: usize, level: u8) -> PyResult<()> {
            if !self.inner.valid_pos(x, y) {
                return Err(PyIndexError::new_err("pixel position out of range"));
            }
            self.inner.set(x, y, level);
            Ok(())
        }

        /// Minimum and maximum levels.
        fn stats(&self) -> PyResult<(u8, u8)> {
            if self.inner.is_empty() {
                return Err(PyValueError::new_err("image has no pixels"));
            }
            Ok(self.inner.stats())
        }

        fn negative(&mut self) {
            crate::filters::negative(&mut self.inner);
        }

        fn threshold(&mut self, level: u8) {
            crate::filters::threshold(&mut self.inner, level);
        }

        fn brighten(&mut self, factor: f64) {
            crate::filters::brighten(&mut self.inner, factor);
        }

        /// Rotated copy, 90 degrees anticlockwise.
        fn rotate(&self) -> PyResult<Self> {
            let inner = crate::geometry::rotate(&self.inner).map_err(to_py_err)?;
            Ok(Self { inner })
        }

        /// Left-right flipped copy.
        fn mirror(&self) -> PyResult<Self> {
            let inner = crate::geometry::mirror(&self.inner).map_err(to_py_err)?;
            Ok(Self { inner })
        }

        fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> PyResult<Self> {
            if !self.inner.valid_rect(x, y, w, h) {
                return Err(PyValueError::new_err("crop rectangle outside image"));
            }
            let inner = crate::geometry::crop(&self.inner, x, y, w, h).map_err(to_py_err)?;
            Ok(Self { inner })
        }

        fn paste(&mut self, x: usize, y: usize, other: PyRef<'_, PyGraymap>) -> PyResult<()> {
            check_fits(&self.inner, x, y, &other.inner)?;
            crate::compose::paste(&mut self.inner, x, y, &other.inner);
            Ok(())
        }

        fn blend(
            &mut self,
            x: usize,
            y: usize,
            other: PyRef<'_, PyGraymap>,
            alpha: f64,
        ) -> PyResult<()> {
            check_fits(&self.inner, x, y, &other.inner)?;
            crate::compose::blend(&mut self.inner, x, y, &other.inner, alpha);
            Ok(())
        }

        /// First `(x, y)` where `other` occurs, or None.
        fn locate(&self, other: PyRef<'_, PyGraymap>) -> PyResult<Option<(usize, usize)>> {
            check_fits(&self.inner, 0, 0, &other.inner)?;
            Ok(crate::search::locate_subimage(&self.inner, &other.inner))
        }

        /// Mean blur with window half-widths `dx`, `dy`.
        fn blur(&mut self, dx: usize, dy: usize) -> PyResult<()> {
            if !window_fits(dx, self.inner.width()) || !window_fits(dy, self.inner.height()) {
                return Err(PyValueError::new_err("blur window larger than image"));
            }
            crate::filters::blur(&mut self.inner, dx, dy).map_err(to_py_err)
        }

        /// Copy pixels into a (height, width) numpy array.
        fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<u8>> {
            self.inner.view().to_owned().into_pyarray(py)
        }
    }

    /// Graymap Rust extension module
    #[pymodule]
    pub fn graymap(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PyGraymap>()?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::graymap;
