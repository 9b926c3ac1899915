//! Run configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wirescan_pipeline::DeriveConfig;

/// Everything one run needs beyond the input image itself.
///
/// Serializable so a full configuration can be supplied as one JSON blob
/// via `--config-json`, bypassing the individual flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory all derived images are written to and read back from.
    /// Single-writer per run; outputs overwrite deterministically.
    pub output_dir: PathBuf,

    /// Interpreter executable the embedded analysis programs run under.
    pub interpreter: PathBuf,

    /// Pixels per micrometer. Never interpreted here — passed through to
    /// the analysis scripts as a string.
    pub pixels_per_micro: u32,

    /// Primary morphological iteration count, pass-through only.
    pub iterations: u32,

    /// Secondary morphological iteration count, pass-through only.
    pub extra_iterations: u32,

    /// Mask-derivation parameters.
    #[serde(default)]
    pub derive: DeriveConfig,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn config_json_round_trip() {
        let config = RunConfig {
            output_dir: PathBuf::from("/data/out"),
            interpreter: PathBuf::from("/usr/bin/python3"),
            pixels_per_micro: 12,
            iterations: 3,
            extra_iterations: 1,
            derive: DeriveConfig::default(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn derive_section_is_optional_in_json() {
        let json = r#"{
            "output_dir": "/data/out",
            "interpreter": "/usr/bin/python3",
            "pixels_per_micro": 12,
            "iterations": 0,
            "extra_iterations": 0
        }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.derive, DeriveConfig::default());
    }
}
