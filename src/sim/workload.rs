use crate::core::{ProcessId, Ticks};

/// Static description of a process, as fed to the engine.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub id: ProcessId,
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: u32,
}

impl ProcessSpec {
    pub fn new(
        id: ProcessId,
        name: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            arrival_time,
            burst_time,
            priority,
        }
    }
}

/// The four-process reference workload used by the demo and several tests.
pub fn reference_workload() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new(1, "P1", 0, 5, 2),
        ProcessSpec::new(2, "P2", 1, 3, 1),
        ProcessSpec::new(3, "P3", 2, 1, 3),
        ProcessSpec::new(4, "P4", 4, 2, 4),
    ]
}
