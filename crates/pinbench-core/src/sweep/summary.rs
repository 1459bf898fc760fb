use crate::config::SweepConfig;
use crate::placement::PlacementStats;
use serde::{Deserialize, Serialize};

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub grid_size: usize,
    pub min_pins: usize,
    pub max_pins: usize,
    pub repetitions: usize,
    pub seed: u64,
    pub instances: usize,
    /// Placement counters summed over every instance.
    #[serde(default)]
    pub placement: PlacementStats,
    #[serde(default)]
    pub files_written: usize,
}

impl SweepSummary {
    pub(crate) fn for_config(config: &SweepConfig) -> Self {
        Self {
            schema_version: default_schema_version(),
            grid_size: config.grid_size,
            min_pins: config.min_pins,
            max_pins: config.max_pins,
            repetitions: config.repetitions,
            seed: config.seed,
            instances: 0,
            placement: PlacementStats::default(),
            files_written: 0,
        }
    }

    /// Share of pins that needed the forward probe.
    pub fn probe_ratio(&self) -> f64 {
        if self.placement.pins == 0 {
            return 0.0;
        }
        self.placement.probe_fallbacks as f64 / self.placement.pins as f64
    }
}
