use super::workload::ProcessSpec;
use crate::{
    core::{Process, SchedCore, Snapshot, TickTrace, Ticks},
    policy::SchedConfig,
};

/// Batch harness: configures an engine with a workload, drives it to
/// completion under a caller-imposed tick cap, and keeps the trace of every
/// tick for inspection.
///
/// The cap exists because the engine itself never bounds a simulation; a
/// malformed workload that cannot drain is a harness-level warning, not an
/// engine fault.
pub struct Sim {
    pub core: SchedCore,
    traces: Vec<TickTrace>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RunError {
    TickCapReached { cap: Ticks },
}

impl Sim {
    pub fn new(config: SchedConfig, specs: Vec<ProcessSpec>) -> Self {
        let mut core = SchedCore::new(config);
        for spec in specs {
            core.add_process(
                spec.id,
                spec.name,
                spec.arrival_time,
                spec.burst_time,
                spec.priority,
            );
        }

        Self {
            core,
            traces: Vec::new(),
        }
    }

    pub fn step(&mut self) -> &TickTrace {
        let trace = self.core.tick();
        self.traces.push(trace);
        self.traces.last().expect("trace was just pushed")
    }

    /// Ticks until the engine drains, or fails once `cap` ticks have elapsed
    /// without completion.
    pub fn run_to_completion(&mut self, cap: Ticks) -> Result<Ticks, RunError> {
        while !self.core.is_finished() {
            if self.core.state.now >= cap {
                return Err(RunError::TickCapReached { cap });
            }
            self.step();
        }
        Ok(self.core.state.now)
    }

    pub fn is_complete(&self) -> bool {
        self.core.is_finished()
    }

    pub fn traces(&self) -> &[TickTrace] {
        &self.traces
    }

    pub fn snapshot(&self) -> Snapshot {
        self.core.snapshot()
    }

    /// Maps every finished process through `f`, for feeding mean estimators.
    pub fn finished_metric<'s, F>(&'s self, f: F) -> impl Iterator<Item = f64> + 's
    where
        F: Fn(&Process) -> Ticks + 's,
    {
        self.core.state.finished.iter().map(move |p| f(p) as f64)
    }
}
