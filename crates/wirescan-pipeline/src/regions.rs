//! Wire-region isolation by mask subtraction.

use image::GrayImage;

use crate::types::PipelineError;

/// Subtract the segmentation mask from the wire mask, pixel-wise.
///
/// `output[p] = max(0, wires[p] - seg[p])` — unsigned arithmetic clamps
/// negative results to zero. This isolates pixels the wire mask claims
/// that the coarse global threshold did not. Both inputs are left
/// untouched; the result is a new buffer.
///
/// # Errors
///
/// Returns [`PipelineError::DimensionMismatch`] if the masks differ in
/// size.
pub fn subtract_mask(wires: &GrayImage, seg: &GrayImage) -> Result<GrayImage, PipelineError> {
    if wires.dimensions() != seg.dimensions() {
        return Err(PipelineError::DimensionMismatch {
            wires_width: wires.width(),
            wires_height: wires.height(),
            seg_width: seg.width(),
            seg_height: seg.height(),
        });
    }

    Ok(GrayImage::from_fn(wires.width(), wires.height(), |x, y| {
        let w = wires.get_pixel(x, y).0[0];
        let s = seg.get_pixel(x, y).0[0];
        image::Luma([w.saturating_sub(s)])
    }))
}
