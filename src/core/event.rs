use std::fmt;

use crate::core::{ProcessId, Ticks};

/// One observable occurrence within a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    Arrived {
        id: ProcessId,
    },
    QuantumExpired {
        id: ProcessId,
    },
    Preempted {
        id: ProcessId,
        by: ProcessId,
    },
    Running {
        id: ProcessId,
        remaining: Ticks,
    },
    Finished {
        id: ProcessId,
    },
    // Priority boost that moved the process below its original baseline
    Aged {
        id: ProcessId,
        priority: u32,
    },
    Idle,
}

/// Everything that happened during one tick. The `Display` rendering is the
/// human-readable trace line returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTrace {
    pub time: Ticks,
    pub events: Vec<TickEvent>,
}

impl TickTrace {
    pub fn new(time: Ticks) -> Self {
        Self {
            time,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    pub fn was_idle(&self) -> bool {
        self.events.contains(&TickEvent::Idle)
    }
}

impl fmt::Display for TickTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time {}: ", self.time)?;
        for event in &self.events {
            match event {
                TickEvent::Arrived { id } => write!(f, "Process {id} arrived. ")?,
                TickEvent::QuantumExpired { id } => {
                    write!(f, "Process {id} quantum expired. ")?;
                }
                TickEvent::Preempted { id, by } => {
                    write!(f, "Process {id} preempted by Process {by}. ")?;
                }
                TickEvent::Running { id, remaining } => {
                    write!(f, "Running Process {id} ({remaining} remaining). ")?;
                }
                TickEvent::Finished { id } => write!(f, "Process {id} finished. ")?,
                TickEvent::Aged { id, priority } => {
                    write!(f, "[Aged: P{id} priority={priority}] ")?;
                }
                TickEvent::Idle => write!(f, "CPU Idle. ")?,
            }
        }
        Ok(())
    }
}
