//! wirescan-pipeline: Pure mask derivation for micrograph analysis (sans-IO).
//!
//! Turns a raw greyscale micrograph into the derived masks the external
//! analysis scripts consume:
//!
//! 1. [`median::local_median_mask`] — noise-suppressed mask via an
//!    inverted local median threshold (the `_median` stage).
//! 2. [`segment::minimum_threshold_mask`] — global segmentation via the
//!    minimum-histogram criterion (the `_seg` stage).
//! 3. [`regions::subtract_mask`] — wire-region isolation, `wires − seg`
//!    clamped at zero (the `_wires_seg` stage).
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! `GrayImage` buffers and never mutates an input in place; each stage
//! produces a new buffer. Persistence, stage naming, and the interpreter
//! handoff between stages live in the `wirescan` binary crate.

pub mod median;
pub mod regions;
pub mod segment;
pub mod types;

pub use median::local_median_mask;
pub use regions::subtract_mask;
pub use segment::{minimum_threshold_level, minimum_threshold_mask};
pub use types::{DeriveConfig, GrayImage, MASK_OFF, MASK_ON, PipelineError};
