pub mod ordering;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Ticks;

pub const DEFAULT_TIME_QUANTUM: Ticks = 2;
pub const DEFAULT_AGING_THRESHOLD: Ticks = 5;

/// The closed set of scheduling policies.
///
/// Selection and preemption rules live in [`ordering`]; this enum is the
/// configuration-facing identity, serialized under the canonical names
/// callers configure with (`"FCFS"`, `"SJF"`, `"SRTF"`, `"RR"`,
/// `"Priority"`, `"PriorityNP"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SJF")]
    Sjf,
    #[serde(rename = "SRTF")]
    Srtf,
    #[serde(rename = "RR")]
    RoundRobin,
    #[serde(rename = "Priority")]
    Priority,
    #[serde(rename = "PriorityNP")]
    PriorityNp,
}

impl Algorithm {
    /// Resolves a configuration name. Unrecognized names fall back to FCFS
    /// (FIFO dispatch, no preemption).
    pub fn parse(name: &str) -> Self {
        match name {
            "FCFS" => Self::Fcfs,
            "SJF" => Self::Sjf,
            "SRTF" => Self::Srtf,
            "RR" => Self::RoundRobin,
            "Priority" => Self::Priority,
            "PriorityNP" => Self::PriorityNp,
            _ => Self::Fcfs,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::RoundRobin => "RR",
            Self::Priority => "Priority",
            Self::PriorityNp => "PriorityNP",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Fcfs
    }
}

/// Engine configuration. Setters clamp rather than reject: a non-positive
/// quantum or aging threshold becomes 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedConfig {
    pub algorithm: Algorithm,
    pub time_quantum: Ticks,
    pub aging_enabled: bool,
    pub aging_threshold: Ticks,
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Fcfs,
            time_quantum: DEFAULT_TIME_QUANTUM,
            aging_enabled: false,
            aging_threshold: DEFAULT_AGING_THRESHOLD,
        }
    }
}

impl SchedConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn set_time_quantum(&mut self, quantum: Ticks) {
        self.time_quantum = quantum.max(1);
    }

    pub fn set_aging(&mut self, enabled: bool) {
        self.aging_enabled = enabled;
    }

    pub fn set_aging_threshold(&mut self, threshold: Ticks) {
        self.aging_threshold = threshold.max(1);
    }
}
