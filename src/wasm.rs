//! WebAssembly exports for graymap operations.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! Images cross the boundary as flat raster-order byte arrays together with
//! `width`, `height` and `maxval`.

use wasm_bindgen::prelude::*;

use crate::codec::{read_pgm, write_pgm};
use crate::filters::{blur, brighten, negative, threshold};
use crate::geometry::{mirror, rotate};
use crate::image::Graymap;

fn from_flat(data: &[u8], width: usize, height: usize, maxval: u8) -> Graymap {
    Graymap::from_raw(width, height, maxval, data.to_vec()).expect("Invalid dimensions")
}

fn to_js(err: crate::GraymapError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Pixel-wise
// ============================================================================

/// Photographic negative: each level becomes `maxval - level`.
///
/// # Arguments
/// * `data` - Flat array of levels in raster order (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `maxval` - White level, 1-255
///
/// # Returns
/// Flat array of inverted levels
#[wasm_bindgen]
pub fn negative_gray_wasm(data: &[u8], width: usize, height: usize, maxval: u8) -> Vec<u8> {
    let mut img = from_flat(data, width, height, maxval);
    negative(&mut img);
    img.into_raw()
}

/// Binary threshold to 0 / maxval.
///
/// # Arguments
/// * `data` - Flat array of levels in raster order (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `maxval` - White level, 1-255
/// * `level` - Levels below this become 0, the rest become `maxval`
///
/// # Returns
/// Flat array of 0 and `maxval` levels
#[wasm_bindgen]
pub fn threshold_gray_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    maxval: u8,
    level: u8,
) -> Vec<u8> {
    let mut img = from_flat(data, width, height, maxval);
    threshold(&mut img, level);
    img.into_raw()
}

/// Multiply levels by `factor`, saturating at maxval.
///
/// # Arguments
/// * `data` - Flat array of levels in raster order (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `maxval` - White level, 1-255
/// * `factor` - Scale applied to every level, rounded half up
///
/// # Returns
/// Flat array of scaled levels
#[wasm_bindgen]
pub fn brighten_gray_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    maxval: u8,
    factor: f64,
) -> Vec<u8> {
    let mut img = from_flat(data, width, height, maxval);
    brighten(&mut img, factor);
    img.into_raw()
}

// ============================================================================
// Blur
// ============================================================================

/// Clipped-window mean blur.
///
/// # Arguments
/// * `data` - Flat array of levels in raster order (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `maxval` - White level, 1-255
/// * `dx` - Horizontal half-width; the window is `2 * dx + 1` pixels wide
/// * `dy` - Vertical half-width; the window is `2 * dy + 1` pixels tall
///
/// # Returns
/// Flat array of blurred levels, or an error string if the scratch buffer
/// cannot be allocated
#[wasm_bindgen]
pub fn blur_gray_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    maxval: u8,
    dx: usize,
    dy: usize,
) -> Result<Vec<u8>, JsValue> {
    let mut img = from_flat(data, width, height, maxval);
    blur(&mut img, dx, dy).map_err(to_js)?;
    Ok(img.into_raw())
}

// ============================================================================
// Geometric
// ============================================================================

/// Rotate 90° anticlockwise.
///
/// # Arguments
/// * `data` - Flat array of levels in raster order (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `maxval` - White level, 1-255
///
/// # Returns
/// Flat array of the rotated image, `height` pixels wide and `width` tall
#[wasm_bindgen]
pub fn rotate_gray_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    maxval: u8,
) -> Result<Vec<u8>, JsValue> {
    let img = from_flat(data, width, height, maxval);
    Ok(rotate(&img).map_err(to_js)?.into_raw())
}

/// Flip left-right.
///
/// # Arguments
/// * `data` - Flat array of levels in raster order (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `maxval` - White level, 1-255
///
/// # Returns
/// Flat array of the mirrored image
#[wasm_bindgen]
pub fn mirror_gray_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    maxval: u8,
) -> Result<Vec<u8>, JsValue> {
    let img = from_flat(data, width, height, maxval);
    Ok(mirror(&img).map_err(to_js)?.into_raw())
}

// ============================================================================
// File format
// ============================================================================

/// A decoded `P5` file.
#[wasm_bindgen]
pub struct DecodedGraymap {
    pub width: usize,
    pub height: usize,
    pub maxval: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl DecodedGraymap {
    /// Raster-order pixel bytes.
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

/// Decode a `P5` file.
///
/// # Arguments
/// * `bytes` - Complete file contents
///
/// # Returns
/// Dimensions, white level and pixels, or an error string for a malformed file
#[wasm_bindgen]
pub fn decode_pgm_wasm(bytes: &[u8]) -> Result<DecodedGraymap, JsValue> {
    let img = read_pgm(bytes).map_err(to_js)?;
    Ok(DecodedGraymap {
        width: img.width(),
        height: img.height(),
        maxval: img.maxval(),
        pixels: img.into_raw(),
    })
}

/// Encode raw pixels as a `P5` file.
///
/// # Arguments
/// * `data` - Flat array of levels in raster order (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `maxval` - White level, 1-255
///
/// # Returns
/// Complete file contents
#[wasm_bindgen]
pub fn encode_pgm_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    maxval: u8,
) -> Result<Vec<u8>, JsValue> {
    let img = from_flat(data, width, height, maxval);
    let mut out = Vec::new();
    write_pgm(&img, &mut out).map_err(to_js)?;
    Ok(out)
}
