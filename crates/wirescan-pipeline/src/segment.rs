//! Global segmentation by the minimum-histogram criterion.
//!
//! The cutoff is a single global statistic, not a local window: the 256-bin
//! intensity histogram is repeatedly smoothed with a 3-point moving mean
//! until exactly two local maxima remain, and the threshold is placed at
//! the deepest valley between the peaks. Pixels strictly above the cutoff
//! become mask members.
//!
//! A histogram that never becomes bimodal (a constant image is the obvious
//! case) has no minimum threshold; that is the one failure mode.

use image::GrayImage;

use crate::types::{MASK_OFF, MASK_ON, PipelineError};

/// Maximum number of histogram smoothing passes before giving up.
const SMOOTH_ITERATION_CAP: usize = 10_000;

/// Compute the global minimum-threshold cutoff for an image.
///
/// # Errors
///
/// Returns [`PipelineError::ThresholdNotFound`] if the histogram is still
/// not bimodal after [`SMOOTH_ITERATION_CAP`] smoothing passes.
pub fn minimum_threshold_level(image: &GrayImage) -> Result<u8, PipelineError> {
    let mut histogram = [0.0_f64; 256];
    for pixel in image.pixels() {
        histogram[usize::from(pixel.0[0])] += 1.0;
    }

    let mut iterations = 0;
    while !is_bimodal(&histogram) {
        if iterations >= SMOOTH_ITERATION_CAP {
            return Err(PipelineError::ThresholdNotFound { iterations });
        }
        histogram = smooth(&histogram);
        iterations += 1;
    }

    let mut maxima = local_maxima(&histogram);
    let (Some(first_peak), Some(second_peak)) = (maxima.next(), maxima.next()) else {
        return Err(PipelineError::ThresholdNotFound { iterations });
    };

    let mut level = first_peak;
    for i in first_peak..=second_peak {
        if histogram[i] < histogram[level] {
            level = i;
        }
    }
    Ok(u8::try_from(level).unwrap_or(u8::MAX))
}

/// Derive the global segmentation mask from a raw intensity image.
///
/// Pixels strictly above the minimum-threshold cutoff map to 255, the rest
/// to 0. The input is never mutated; the result is a new buffer.
///
/// # Errors
///
/// Returns [`PipelineError::ThresholdNotFound`] when no cutoff exists; see
/// [`minimum_threshold_level`].
pub fn minimum_threshold_mask(image: &GrayImage) -> Result<GrayImage, PipelineError> {
    let level = minimum_threshold_level(image)?;
    Ok(GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y).0[0];
        image::Luma([if pixel > level { MASK_ON } else { MASK_OFF }])
    }))
}

/// Indices of strict local maxima. Edge bins cannot be maxima.
fn local_maxima(histogram: &[f64; 256]) -> impl Iterator<Item = usize> {
    (1..255).filter(|&i| histogram[i] > histogram[i - 1] && histogram[i] > histogram[i + 1])
}

fn is_bimodal(histogram: &[f64; 256]) -> bool {
    local_maxima(histogram).count() == 2
}

/// One 3-point moving-mean pass with clamped (replicated) edge bins.
fn smooth(histogram: &[f64; 256]) -> [f64; 256] {
    std::array::from_fn(|i| {
        let left = histogram[i.saturating_sub(1)];
        let right = histogram[(i + 1).min(255)];
        (left + histogram[i] + right) / 3.0
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// 32x32 image, left half at 40, right half at 200.
    fn bimodal_image() -> GrayImage {
        GrayImage::from_fn(32, 32, |x, _y| {
            if x < 16 {
                image::Luma([40])
            } else {
                image::Luma([200])
            }
        })
    }

    #[test]
    fn level_falls_between_the_modes() {
        let level = minimum_threshold_level(&bimodal_image()).unwrap();
        assert!(
            level > 40 && level < 200,
            "expected cutoff between the modes, got {level}",
        );
    }

    #[test]
    fn mask_is_strictly_binary() {
        let mask = minimum_threshold_mask(&bimodal_image()).unwrap();
        for pixel in mask.pixels() {
            assert!(
                pixel.0[0] == MASK_ON || pixel.0[0] == MASK_OFF,
                "expected 0 or 255, got {}",
                pixel.0[0],
            );
        }
    }

    #[test]
    fn bright_mode_is_foreground() {
        let mask = minimum_threshold_mask(&bimodal_image()).unwrap();
        assert_eq!(mask.get_pixel(0, 0).0[0], MASK_OFF);
        assert_eq!(mask.get_pixel(31, 0).0[0], MASK_ON);
    }

    #[test]
    fn constant_image_has_no_threshold() {
        let img = GrayImage::from_fn(16, 16, |_, _| image::Luma([128]));
        let result = minimum_threshold_level(&img);
        assert!(matches!(
            result,
            Err(PipelineError::ThresholdNotFound { .. })
        ));
    }

    #[test]
    fn multimodal_histogram_smooths_down_to_two_modes() {
        // Three close spikes on the dark side plus two on the bright side:
        // more than two maxima initially, so smoothing passes must run
        // before the valley can be placed.
        let img = GrayImage::from_fn(30, 30, |x, y| {
            let value = match (x + y * 30) % 5 {
                0 => 30,
                1 => 32,
                2 => 34,
                3 => 200,
                _ => 202,
            };
            image::Luma([value])
        });
        let level = minimum_threshold_level(&img).unwrap();
        assert!(
            level > 34 && level < 200,
            "expected cutoff between the clusters, got {level}",
        );
    }

    #[test]
    fn mask_dimensions_match_input() {
        let mask = minimum_threshold_mask(&bimodal_image()).unwrap();
        assert_eq!(mask.width(), 32);
        assert_eq!(mask.height(), 32);
    }
}
