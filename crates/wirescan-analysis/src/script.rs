//! Embedded analysis programs.
//!
//! The two feature-analysis programs ship inside the binary as string
//! resources and are streamed to the interpreter's stdin at run time, so
//! nothing is ever extracted to a temporary file. Their content is opaque
//! to this crate: they consume file paths and stringified numbers and
//! either succeed or fail.

/// One of the embedded feature-analysis programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisScript {
    /// Small-scale feature statistics over the `_median` mask. Also
    /// produces the `_wires` mask consumed later in the run.
    SmallFeatures,
    /// Large-scale feature statistics over the `_wires_seg` mask.
    LargeFeatures,
}

impl AnalysisScript {
    /// Short name used in logs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SmallFeatures => "small_features",
            Self::LargeFeatures => "large_features",
        }
    }

    /// Full program text.
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::SmallFeatures => include_str!("../scripts/small_features.py"),
            Self::LargeFeatures => include_str!("../scripts/large_features.py"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_are_non_empty() {
        assert!(!AnalysisScript::SmallFeatures.source().is_empty());
        assert!(!AnalysisScript::LargeFeatures.source().is_empty());
    }

    #[test]
    fn names_are_distinct() {
        assert_ne!(
            AnalysisScript::SmallFeatures.name(),
            AnalysisScript::LargeFeatures.name(),
        );
    }
}
