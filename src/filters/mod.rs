//! In-place filters for graymaps.
//!
//! ## Filter Categories
//!
//! - **Pixel-wise**: negative, threshold, brighten (`pixel.rs`)
//! - **Spatial**: windowed mean blur over an integral image (`blur.rs`)
//!
//! All filters modify the image in place and keep every pixel within
//! `[0, maxval]` through saturation. Only the blur allocates (its prefix-sum
//! accumulator) and can therefore fail.

pub mod blur;
pub mod pixel;

pub use blur::{blur, blur_with};
pub use pixel::{brighten, negative, threshold};
