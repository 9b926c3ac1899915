//! The per-image run: derivation stages interleaved with analysis scripts.

use std::path::Path;
use std::time::Instant;

use wirescan_analysis::{AnalysisScript, ScriptError, run_script};
use wirescan_pipeline::{PipelineError, local_median_mask, minimum_threshold_mask, subtract_mask};

use crate::config::RunConfig;
use crate::storage::{self, Stage, StorageError};

/// Any failure of a run. All variants are terminal: the run aborts and
/// the error propagates to the caller for display, never logged-and-
/// continued.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Mask derivation failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Reading or writing an image failed, or a precondition file is
    /// missing.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An analysis script could not be launched or reported failure.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Process one micrograph end to end.
///
/// Stage order is fixed and synchronous — every stage, including its
/// durable write, completes before the next starts, because the analysis
/// scripts read files produced by the earlier stages:
///
/// 1. local-median mask → `_median`
/// 2. small-feature analysis (also produces the `_wires` mask externally)
/// 3. global segmentation → `_seg`
/// 4. wire-region isolation (`_wires` − seg, in memory) → `_wires_seg`
/// 5. large-feature analysis
///
/// # Errors
///
/// Any [`RunError`] aborts the run at the failing stage; later stages do
/// not execute and their outputs are not written.
pub fn run(image_path: &Path, config: &RunConfig) -> Result<(), RunError> {
    let stem = storage::source_stem(image_path)?;
    let raw = storage::load_grayscale(image_path)?;
    tracing::info!(
        image = %image_path.display(),
        width = raw.width(),
        height = raw.height(),
        "loaded source image"
    );

    let prefix = storage::script_prefix(&config.output_dir, &stem);
    let prefix_arg = prefix.display().to_string();

    // 1. Noise-suppressed local-median mask.
    let started = Instant::now();
    let median = local_median_mask(&raw, &config.derive);
    let median_path = storage::derived_path(&config.output_dir, &stem, Stage::Median);
    storage::save_mask(&median_path, &median)?;
    tracing::info!(path = %median_path.display(), elapsed = ?started.elapsed(), "median mask written");

    // 2. Small-scale feature analysis.
    run_script(
        &config.interpreter,
        AnalysisScript::SmallFeatures,
        &[prefix_arg.clone(), config.pixels_per_micro.to_string()],
    )?;

    // 3. Global segmentation.
    let started = Instant::now();
    let seg = minimum_threshold_mask(&raw)?;
    let seg_path = storage::derived_path(&config.output_dir, &stem, Stage::Seg);
    storage::save_mask(&seg_path, &seg)?;
    tracing::info!(path = %seg_path.display(), elapsed = ?started.elapsed(), "segmentation mask written");

    // 4. Wire-region isolation. The wire mask is the one genuinely
    // external input: it is produced by the small-feature script, so it
    // is read back from storage, while the segmentation mask is passed
    // forward in memory.
    let wires_path = storage::derived_path(&config.output_dir, &stem, Stage::Wires);
    let wires = storage::load_wire_mask(&wires_path)?;
    let wires_seg = subtract_mask(&wires, &seg)?;
    let wires_seg_path = storage::derived_path(&config.output_dir, &stem, Stage::WiresSeg);
    storage::save_mask(&wires_seg_path, &wires_seg)?;
    tracing::info!(path = %wires_seg_path.display(), "wire-region mask written");

    // 5. Large-scale feature analysis.
    run_script(
        &config.interpreter,
        AnalysisScript::LargeFeatures,
        &[
            prefix_arg,
            config.iterations.to_string(),
            config.extra_iterations.to_string(),
            config.pixels_per_micro.to_string(),
        ],
    )?;

    Ok(())
}
