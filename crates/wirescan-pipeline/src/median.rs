//! Local median threshold for noise suppression.
//!
//! Wraps [`imageproc::filter::median_filter`] to compute the windowed
//! median the threshold compares against. The filter uses clamped
//! (replicated) borders, so windows that extend past the image edge
//! behave like standard neighborhood shapes.
//!
//! The raw decision — pixel exceeds its neighborhood median by more than
//! the offset — marks the locally *bright* background as foreground. The
//! structures of interest are dark relative to their surroundings, so the
//! mask is inverted before rescaling, and membership lands on
//! [`MASK_ON`](crate::types::MASK_ON).

use image::GrayImage;

use crate::types::{DeriveConfig, MASK_OFF, MASK_ON};

/// Derive the noise-suppressed mask from a raw intensity image.
///
/// Per-pixel rule: compare against the median of the square neighborhood
/// of half-width `config.median_radius`, invert, and rescale so that
/// locally-dark pixels map to 255 and locally-bright pixels to 0. The
/// input is never mutated; the result is a new buffer.
///
/// Total over all valid images — there is no failure mode.
#[must_use = "returns the derived mask"]
pub fn local_median_mask(image: &GrayImage, config: &DeriveConfig) -> GrayImage {
    let medians =
        imageproc::filter::median_filter(image, config.median_radius, config.median_radius);
    let offset = i32::from(config.median_offset);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = i32::from(image.get_pixel(x, y).0[0]);
        let median = i32::from(medians.get_pixel(x, y).0[0]);
        let locally_bright = pixel > median + offset;
        image::Luma([if locally_bright { MASK_OFF } else { MASK_ON }])
    })
}
